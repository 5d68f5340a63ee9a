// UI module for romi_dashboard
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &mut App, f: &mut Frame<'_>) {
    screens::browser::render_browser(app, f);

    if let Some(message) = &app.alert {
        widgets::popup::render_alert(message, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use crate::app::handle_input;
    use crossterm::event::KeyCode;
    use romi_dashboard_core::{Fragment, Route, Surface};

    fn screen_text(app: &mut App) -> Result<String, Box<dyn std::error::Error>> {
        sized_screen_text(app, 100, 30)
    }

    fn sized_screen_text(
        app: &mut App,
        width: u16,
        height: u16,
    ) -> Result<String, Box<dyn std::error::Error>> {
        let mut terminal = Terminal::new(TestBackend::new(width, height))?;
        terminal.draw(|f| ui(app, f))?;
        Ok(terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect())
    }

    #[test]
    fn draws_links_and_alert() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(Route::Farms, "http://0.0.0.0:5000".to_string());
        let mut fragment = Fragment::new();
        fragment.link("Chatelain", Route::Farm { farm: "f1".to_string() }, "farm-name");
        app.replace(fragment);
        app.current = Some(Route::Farms);

        let text = screen_text(&mut app)?;
        assert!(text.contains("Chatelain"));
        assert!(text.contains("http://0.0.0.0:5000"));

        app.alert("Request for http://h/farms failed: Status 500");
        let text = screen_text(&mut app)?;
        assert!(text.contains("Status 500"));
        Ok(())
    }

    #[test]
    fn end_reaches_rows_after_the_last_link() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(Route::Farms, String::new());
        app.pending = None;
        let mut fragment = Fragment::new();
        fragment.link("Stitching (Finished)", Route::Farms, "analysis-name");
        for row in 0..40 {
            fragment.text(format!("row{row}"), "scan-image");
        }
        app.replace(fragment);

        sized_screen_text(&mut app, 80, 20)?;
        for _ in 0..100 {
            handle_input(&mut app, KeyCode::PageDown);
            handle_input(&mut app, KeyCode::Down);
        }
        let text = sized_screen_text(&mut app, 80, 20)?;
        assert!(text.contains("row39"));

        handle_input(&mut app, KeyCode::Home);
        handle_input(&mut app, KeyCode::End);
        let text = sized_screen_text(&mut app, 80, 20)?;
        assert!(text.contains("row39"));
        Ok(())
    }

    #[test]
    fn wrapped_json_scrolls_to_its_end() -> Result<(), Box<dyn std::error::Error>> {
        let mut app = App::new(Route::Farms, String::new());
        app.pending = None;
        let mut json = String::from("{\n");
        for line in 0..20 {
            json.push_str(&format!("    \"k{line}\": \"{}\",\n", "v".repeat(150)));
        }
        json.push_str("    \"zzlast\": 1\n}");
        let mut fragment = Fragment::new();
        fragment.code(json, "analysis-results");
        app.replace(fragment);

        sized_screen_text(&mut app, 80, 20)?;
        for _ in 0..200 {
            handle_input(&mut app, KeyCode::Down);
        }
        let text = sized_screen_text(&mut app, 80, 20)?;
        assert!(text.contains("zzlast"));

        handle_input(&mut app, KeyCode::Up);
        let before = app.scroll;
        handle_input(&mut app, KeyCode::Up);
        assert_eq!(app.scroll + 1, before);
        Ok(())
    }
}
