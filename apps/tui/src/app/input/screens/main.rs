use crate::app::input::helpers::jump;
use crate::app::state::App;
use crossterm::event::KeyCode;

const PAGE: isize = 5;
const DETAIL_PAGE: i32 = 10;

pub async fn handle_main_input(app: &mut App, key: KeyCode) {
    if app.search_active {
        handle_search_input(app, key);
        return;
    }

    if handle_detail_input(app, key) {
        return;
    }

    let total_rows = app.filtered_indices.len();

    match key {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Up => app.cursor = jump(app.cursor, -1, total_rows),
        KeyCode::Down => app.cursor = jump(app.cursor, 1, total_rows),
        KeyCode::PageUp => app.cursor = jump(app.cursor, -PAGE, total_rows),
        KeyCode::PageDown => app.cursor = jump(app.cursor, PAGE, total_rows),
        KeyCode::Home => app.cursor = 0,
        KeyCode::End => app.cursor = total_rows.saturating_sub(1),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_cursor(),
        KeyCode::Char('c') => app.reset(),
        KeyCode::Char('/') => app.start_search(),
        KeyCode::Char('o') => app.open_map(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('b') => app.open_bodegas().await,
        KeyCode::Char('n') => app.open_form(),
        KeyCode::Esc => {
            if !app.search_query.is_empty() {
                app.clear_search();
            }
        }
        _ => {}
    }
}

/// Keys of the detail overlay; the list keeps every other key.
fn handle_detail_input(app: &mut App, key: KeyCode) -> bool {
    if app.detail.is_none() {
        return false;
    }

    match key {
        KeyCode::Esc => {
            app.close_detail();
            true
        }
        KeyCode::Char('i') => {
            app.open_detail_image();
            true
        }
        KeyCode::Char('j') => {
            app.scroll_detail(1);
            true
        }
        KeyCode::Char('k') => {
            app.scroll_detail(-1);
            true
        }
        KeyCode::Char('J') => {
            app.scroll_detail(DETAIL_PAGE);
            true
        }
        KeyCode::Char('K') => {
            app.scroll_detail(-DETAIL_PAGE);
            true
        }
        KeyCode::Char(ch @ '1'..='9') => {
            if let Some(number) = ch.to_digit(10).and_then(|n| usize::try_from(n).ok()) {
                app.open_detail_link(number);
            }
            true
        }
        _ => false,
    }
}

fn handle_search_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => app.clear_search(),
        KeyCode::Enter | KeyCode::Down => {
            app.search_active = false;
            app.cursor = 0;
        }
        KeyCode::Backspace => {
            app.search_query.pop();
            app.update_search();
        }
        KeyCode::Char(ch) => {
            app.search_query.push(ch);
            app.cursor = 0;
            app.update_search();
        }
        _ => {}
    }
}
