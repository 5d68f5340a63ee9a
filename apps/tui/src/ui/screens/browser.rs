use crate::app::state::{App, Viewport};
use crate::ui::widgets::fragment::fragment_lines;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_browser(app: &mut App, f: &mut Frame<'_>) {
    let area = f.area();
    let show_search = app.search_active || !app.search_query.is_empty();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(if show_search { 3 } else { 0 }),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(app, f, chunks[0]);
    render_content(app, f, chunks[1]);
    if show_search {
        render_search(app, f, chunks[2]);
    }
    render_help(app, f, chunks[3]);
}

fn render_header(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let location = app
        .current
        .as_ref()
        .map_or_else(|| "(loading)".to_string(), |route| route.path());

    let line = TextLine::from(vec![
        Span::styled(
            app.server.clone(),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(" / "),
        Span::styled(location, Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled(
            format!("history: {}", app.history.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let block = Block::default()
        .title("Farmer's Dashboard")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_content(app: &mut App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let title = app
        .current
        .as_ref()
        .map_or("Content", |route| route.kind());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    let viewport = Viewport {
        width: usize::from(inner.width),
        height: usize::from(inner.height),
    };

    if app.fragment.is_empty() {
        app.fit_viewport(viewport, 0, None);
        let paragraph = Paragraph::new("Nothing to show yet.")
            .block(block)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, area);
        return;
    }

    let matches: Vec<usize> = app
        .visible_links()
        .into_iter()
        .map(|(ordinal, _, _)| ordinal)
        .collect();
    let rendered = fragment_lines(&app.fragment, app.selected_ordinal(), &|ordinal| {
        matches.contains(&ordinal)
    })
    .wrapped(viewport.width);

    let offset = app.fit_viewport(viewport, rendered.lines.len(), rendered.selected_line);

    // Lines are pre-wrapped to the pane width, so rows and lines agree
    let paragraph = Paragraph::new(Text::from(rendered.lines))
        .block(block)
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    f.render_widget(paragraph, area);
}

fn render_search(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let cursor = if app.search_active { "_" } else { "" };
    let paragraph = Paragraph::new(format!("/{}{cursor}", app.search_query))
        .block(
            Block::default()
                .title("Filter links")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn render_help(app: &App, f: &mut Frame<'_>, area: ratatui::layout::Rect) {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut help_text = vec![
        Span::styled("↑/↓", key_style),
        Span::raw(": Select   "),
        Span::styled("Enter", key_style),
        Span::raw(": Open   "),
        Span::styled("Backspace", key_style),
        Span::raw(": Back   "),
        Span::styled("/", key_style),
        Span::raw(": Filter   "),
        Span::styled("r", key_style),
        Span::raw(": Reload   "),
        Span::styled("q", key_style),
        Span::raw(": Quit"),
    ];
    if !app.status_message.is_empty() {
        help_text.push(Span::raw("   "));
        help_text.push(Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::Gray),
        ));
    }

    let help_paragraph = Paragraph::new(TextLine::from(help_text))
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);

    f.render_widget(help_paragraph, area);
}
