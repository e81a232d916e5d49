use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod bodegas;
mod form;
mod help;
mod main;
mod notice;

pub async fn dispatch_input(app: &mut App, key: KeyCode) {
    if notice::handle_notice_input(app, key) {
        return;
    }

    if help::handle_help_toggle(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Main => main::handle_main_input(app, key).await,
        AppScreen::Bodegas => bodegas::handle_bodegas_input(app, key).await,
        AppScreen::BodegaForm => form::handle_form_input(app, key).await,
    }
}
