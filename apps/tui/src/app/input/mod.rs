mod alert;
mod browse;
mod search;

use crate::app::state::App;
use crossterm::event::KeyCode;

/// Routes a key press to the handler for the current mode. An open alert is
/// modal and swallows everything else.
pub fn handle_input(app: &mut App, key: KeyCode) {
    if app.alert.is_some() {
        alert::handle_alert_input(app, key);
    } else if app.search_active {
        search::handle_search_input(app, key);
    } else {
        browse::handle_browse_input(app, key);
    }
}
