use crate::app::state::App;
use crossterm::event::KeyCode;

pub fn handle_browse_input(app: &mut App, key: KeyCode) {
    let has_links = !app.visible_links().is_empty();

    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Esc => {
            if !app.search_query.is_empty() {
                app.clear_search();
            }
        }
        KeyCode::Char('/') => {
            app.search_active = true;
        }
        KeyCode::Enter | KeyCode::Right => app.follow_selected(),
        KeyCode::Backspace | KeyCode::Left => app.go_back(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Up if has_links => app.select_previous(1),
        KeyCode::Down if has_links => app.select_next(1),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(app.page_rows()),
        KeyCode::PageDown => app.scroll_down(app.page_rows()),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        _ => {}
    }
}
