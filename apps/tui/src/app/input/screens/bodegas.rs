use crate::app::input::helpers::jump;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub async fn handle_bodegas_input(app: &mut App, key: KeyCode) {
    let total_rows = app.bodegas.len();

    match key {
        KeyCode::Esc => {
            if app.bodega_view.is_some() {
                app.bodega_view = None;
            } else {
                app.screen = AppScreen::Main;
            }
        }
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Enter => {
            if total_rows > 0 {
                app.view_selected_bodega().await;
            }
        }
        KeyCode::Char('d') => {
            if total_rows > 0 {
                app.delete_selected_bodega().await;
            }
        }
        KeyCode::Char('n') => app.open_form(),
        KeyCode::Char('r') => {
            if let Err(e) = app.fetch_bodegas().await {
                app.status_message = format!("Failed to fetch bodegas from database: {e}");
            }
        }
        KeyCode::Up => {
            app.selected_bodega_index = jump(app.selected_bodega_index, -1, total_rows);
            app.bodega_view = None;
        }
        KeyCode::Down => {
            app.selected_bodega_index = jump(app.selected_bodega_index, 1, total_rows);
            app.bodega_view = None;
        }
        KeyCode::PageUp => {
            app.selected_bodega_index = jump(app.selected_bodega_index, -5, total_rows);
        }
        KeyCode::PageDown => {
            app.selected_bodega_index = jump(app.selected_bodega_index, 5, total_rows);
        }
        KeyCode::Home => {
            app.selected_bodega_index = 0;
        }
        KeyCode::End => {
            app.selected_bodega_index = total_rows.saturating_sub(1);
        }
        _ => {}
    }
}
