use crate::app::state::App;
use crossterm::event::KeyCode;

/// Returns true while a notice is shown; Enter or Esc dismisses it.
pub fn handle_notice_input(app: &mut App, key: KeyCode) -> bool {
    if app.notice.is_none() {
        return false;
    }

    if matches!(key, KeyCode::Enter | KeyCode::Esc) {
        app.notice = None;
    }
    true
}
