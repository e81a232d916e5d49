// UI module for vinos_ibericos
// Handles all UI rendering functions

pub mod screens;
pub mod widgets;

use crate::app::state::AppScreen;
use crate::app::App;
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    match app.screen {
        AppScreen::Main => screens::main::render_main(app, f),
        AppScreen::Bodegas => screens::bodegas::render_bodegas_view(app, f),
        AppScreen::BodegaForm => screens::form::render_form(app, f),
    }

    if app.show_help {
        widgets::popup::render_help_popup(f);
    }

    // Notices stay above everything else
    if let Some(notice) = &app.notice {
        widgets::popup::render_notice(f, notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Notice;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use vinos_ibericos::config::{AppConfig, AssetsConfig, MapConfig};
    use vinos_ibericos::domain::{Coordinates, Location};

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn test_app(dir: &std::path::Path) -> App {
        let config = AppConfig {
            locations_path: dir.join("vinedos.json"),
            assets: AssetsConfig::for_assets(dir),
            map: MapConfig::for_assets(dir),
            database_url: "sqlite::memory:".to_string(),
            map_output: dir.join("map.html"),
            open_map_on_start: false,
            log_file: dir.join("test.log"),
            debug: false,
        };
        let locations = vec![
            Location::new(
                "Rioja",
                Coordinates::new(42.46, -2.45),
                "<p>See <a href=\"https://riojawine.com\">the council</a></p>",
                "",
            ),
            Location::new("Toro", Coordinates::new(41.52, -5.39), "", ""),
        ];
        App::new(config, locations)
    }

    #[test]
    fn main_screen_lists_regions_and_detail() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut app = test_app(dir.path());
        let mut terminal = Terminal::new(TestBackend::new(120, 30))?;

        terminal.draw(|f| ui(&app, f))?;
        let text = buffer_text(&terminal);
        assert!(text.contains("Rioja"));
        assert!(text.contains("Toro"));
        assert!(text.contains("Map"));

        app.toggle_cursor();
        terminal.draw(|f| ui(&app, f))?;
        let text = buffer_text(&terminal);
        assert!(text.contains("Image not found"));
        assert!(text.contains("https://riojawine.com"));
        Ok(())
    }

    #[test]
    fn notice_and_form_render() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let mut app = test_app(dir.path());
        let mut terminal = Terminal::new(TestBackend::new(100, 30))?;

        app.open_form();
        app.notify(Notice::error("Invalid bodega", "Town is required"));
        terminal.draw(|f| ui(&app, f))?;
        let text = buffer_text(&terminal);
        assert!(text.contains("New bodega"));
        assert!(text.contains("Invalid bodega"));
        Ok(())
    }
}
