use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use romi_dashboard_core::highlight::{tokenize, TokenKind};
use romi_dashboard_core::{Fragment, Node};

/// Lines for a fragment plus the index of the line holding the selected link
pub struct FragmentLines {
    pub lines: Vec<TextLine<'static>>,
    pub selected_line: Option<usize>,
}

impl FragmentLines {
    /// Hard-wraps every line to `width` columns so that one line is one
    /// screen row. `selected_line` moves to the first row of its link.
    pub fn wrapped(self, width: usize) -> Self {
        let Self {
            lines,
            selected_line,
        } = self;
        if width == 0 {
            return Self {
                lines,
                selected_line,
            };
        }

        let mut rows = Vec::with_capacity(lines.len());
        let mut selected_row = None;
        for (index, line) in lines.into_iter().enumerate() {
            if selected_line == Some(index) {
                selected_row = Some(rows.len());
            }
            rows.extend(wrap_line(line, width));
        }

        Self {
            lines: rows,
            selected_line: selected_row,
        }
    }
}

fn wrap_line(line: TextLine<'static>, width: usize) -> Vec<TextLine<'static>> {
    let mut rows = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut used = 0;

    for span in line.spans {
        let style = span.style;
        let mut chunk = String::new();
        for ch in span.content.chars() {
            if used == width {
                if !chunk.is_empty() {
                    current.push(Span::styled(std::mem::take(&mut chunk), style));
                }
                rows.push(TextLine::from(std::mem::take(&mut current)));
                used = 0;
            }
            chunk.push(ch);
            used += 1;
        }
        if !chunk.is_empty() {
            current.push(Span::styled(chunk, style));
        }
    }

    rows.push(TextLine::from(current));
    rows
}

/// Flattens a fragment into terminal lines.
///
/// `selected` is a link ordinal as in [`Fragment::links`]; `is_match` tells
/// whether a link passes the current search filter.
pub fn fragment_lines(
    fragment: &Fragment,
    selected: Option<usize>,
    is_match: &dyn Fn(usize) -> bool,
) -> FragmentLines {
    let mut out = FragmentLines {
        lines: Vec::new(),
        selected_line: None,
    };
    let mut ordinal = 0;

    for node in fragment.nodes() {
        match node {
            Node::Text { class, text } => {
                out.lines
                    .push(TextLine::from(Span::styled(text.clone(), text_style(class))));
            }
            Node::Link { label, .. } => {
                let style = if selected == Some(ordinal) {
                    out.selected_line = Some(out.lines.len());
                    Style::default()
                        .bg(Color::Rgb(0, 0, 238))
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else if is_match(ordinal) {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                out.lines.push(TextLine::from(vec![
                    Span::raw("  › "),
                    Span::styled(label.clone(), style),
                ]));
                ordinal += 1;
            }
            Node::LineBreak => {}
            Node::Image { src, .. } => {
                out.lines.push(TextLine::from(Span::styled(
                    format!("  [image] {src}"),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Node::Table { rows } => {
                for row in rows {
                    let cells: Vec<String> = row.iter().map(cell_label).collect();
                    out.lines.push(TextLine::from(Span::styled(
                        format!("  {}", cells.join("  ")),
                        Style::default().fg(Color::Gray),
                    )));
                }
            }
            Node::Code { json, .. } => {
                out.lines.extend(json.lines().map(json_line));
            }
        }
    }

    out
}

fn text_style(class: &str) -> Style {
    if class.ends_with("-title") {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if class.ends_with("-name") {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Image cells show the image id rather than the whole URL
fn cell_label(node: &Node) -> String {
    match node {
        Node::Image { src, .. } => {
            let path = src.split('?').next().unwrap_or(src);
            let id = path.rsplit('/').next().unwrap_or(path);
            format!("[{id}]")
        }
        Node::Link { label, .. } => label.clone(),
        Node::Text { text, .. } => text.clone(),
        Node::Code { json, .. } => json.clone(),
        Node::LineBreak | Node::Table { .. } => String::new(),
    }
}

fn json_line(line: &str) -> TextLine<'static> {
    let spans: Vec<Span<'static>> = tokenize(line)
        .into_iter()
        .map(|token| {
            let color = match token.kind {
                TokenKind::Plain => Color::White,
                TokenKind::Key => Color::Cyan,
                TokenKind::String => Color::Green,
                TokenKind::Number => Color::Yellow,
                TokenKind::Boolean => Color::Magenta,
                TokenKind::Null => Color::Gray,
            };
            Span::styled(token.text.to_string(), Style::default().fg(color))
        })
        .collect();
    TextLine::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use romi_dashboard_core::Route;

    fn sample() -> Fragment {
        let mut fragment = Fragment::new();
        fragment
            .text("Chatelain", "farm-name")
            .text("Zones", "farm-zones-title")
            .link("bed-1", Route::Farms, "zone-name")
            .link("bed-2", Route::Farms, "zone-name")
            .table(vec![vec![Node::Image {
                class: "scan-image",
                src: "http://h/images/f/z/img3?size=thumb".to_string(),
            }]])
            .code("{\n    \"ok\": true\n}", "analysis-results");
        fragment
    }

    fn plain(line: &TextLine<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn selected_link_line_is_reported() {
        let rendered = fragment_lines(&sample(), Some(1), &|_| true);

        assert_eq!(rendered.selected_line, Some(3));
        assert_eq!(plain(&rendered.lines[3]), "  › bed-2");
    }

    #[test]
    fn images_and_json_are_flattened() {
        let rendered = fragment_lines(&sample(), None, &|_| true);
        let text: Vec<String> = rendered.lines.iter().map(plain).collect();

        assert_eq!(text[4], "  [img3]");
        assert_eq!(&text[5..], ["{", "    \"ok\": true", "}"]);
        assert_eq!(rendered.selected_line, None);
    }

    #[test]
    fn wrapping_counts_screen_rows() {
        let mut fragment = Fragment::new();
        fragment
            .text("x".repeat(25), "analysis-description")
            .link("bed-1", Route::Farms, "zone-name");

        let rendered = fragment_lines(&fragment, Some(0), &|_| true).wrapped(10);
        let text: Vec<String> = rendered.lines.iter().map(plain).collect();

        assert_eq!(text, vec!["x".repeat(10), "x".repeat(10), "x".repeat(5), "  › bed-1".to_string()]);
        assert_eq!(rendered.selected_line, Some(3));
    }

    #[test]
    fn wrapping_keeps_span_styles() {
        let rows = wrap_line(json_line("    \"key\": 1"), 6);
        let text: Vec<String> = rows.iter().map(plain).collect();

        assert_eq!(text, vec!["    \"k", "ey\": 1"]);
        assert_eq!(rows[1].spans[0].style.fg, Some(Color::Cyan));
    }

    #[test]
    fn json_tokens_are_coloured() {
        let line = json_line("    \"ok\": true");
        let key = line.spans.iter().find(|span| span.content == "\"ok\":");
        assert_eq!(key.map(|span| span.style.fg), Some(Some(Color::Cyan)));
    }
}
