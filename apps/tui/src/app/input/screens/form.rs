use crate::app::state::App;
use crossterm::event::KeyCode;

pub async fn handle_form_input(app: &mut App, key: KeyCode) {
    if app.form.editing {
        handle_edit_input(app, key);
        return;
    }

    match key {
        KeyCode::Esc => app.close_form(),
        KeyCode::Char('s' | 'S') => app.submit_form().await,
        KeyCode::Char('r' | 'R') => {
            app.form.clear();
            app.status_message = "Form cleared".to_string();
        }
        KeyCode::Up => app.form.focus_prev(),
        KeyCode::Down | KeyCode::Tab => app.form.focus_next(),
        KeyCode::Enter => app.form.editing = true,
        _ => {}
    }
}

fn handle_edit_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Enter | KeyCode::Esc => app.form.editing = false,
        KeyCode::Tab => {
            app.form.focus_next();
        }
        KeyCode::Char(c) => app.form.push_char(c),
        KeyCode::Backspace => app.form.pop_char(),
        _ => {}
    }
}
