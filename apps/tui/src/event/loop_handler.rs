use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use vinos_ibericos::db::BodegaRecord;

use crate::app::{handle_input, App};
use crate::ui;

/// Run the application in headless mode (no UI)
pub async fn run_headless(app: &mut App, json: bool) -> Result<()> {
    app.initialize_db().await?;

    if json {
        render_headless_json(app).await?;
    } else {
        render_headless_stats(app).await?;
    }

    Ok(())
}

/// Print the map document for `filter` and exit
pub fn run_render(app: &App, filter: Option<&str>) {
    let html = app.actions.renderer.render(&app.locations, filter);
    println!("{html}");
}

async fn render_headless_stats(app: &App) -> Result<()> {
    let stats = build_headless_stats(app).await?;

    println!("\nVinos Ibéricos");
    println!("==============");
    println!("Locations file: {}", stats.locations_file);
    println!("Database: {}", stats.database);
    println!("Total locations: {}", stats.total_locations);
    println!("Total bodegas: {}", stats.total_bodegas);

    println!("\nLocations:");
    for name in &stats.locations {
        println!("- {name}");
    }

    println!("\nBodegas:");
    for bodega in &stats.bodegas {
        println!(
            "- {} | {} | {} | {}",
            bodega.id, bodega.name, bodega.town, bodega.do_name
        );
    }

    Ok(())
}

async fn render_headless_json(app: &App) -> Result<()> {
    let stats = build_headless_stats(app).await?;
    let json = serde_json::to_string_pretty(&stats)?;
    println!("{json}");
    Ok(())
}

async fn build_headless_stats(app: &App) -> Result<HeadlessStats> {
    let total_bodegas = app.actions.count_bodegas().await?;
    let bodegas = app.actions.fetch_bodegas().await?;

    Ok(HeadlessStats {
        locations_file: app.config.locations_path.display().to_string(),
        database: app.actions.database_url().to_string(),
        total_locations: app.locations.len(),
        total_bodegas,
        locations: app.locations.iter().map(|l| l.name.clone()).collect(),
        bodegas,
    })
}

#[derive(serde::Serialize)]
struct HeadlessStats {
    locations_file: String,
    database: String,
    total_locations: usize,
    total_bodegas: i64,
    locations: Vec<String>,
    bodegas: Vec<BodegaRecord>,
}

/// Run the main application event loop
pub async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    // First frame shows the default map
    app.refresh_map();
    if app.config.open_map_on_start {
        app.open_map();
    }

    loop {
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code).await;
                    if !app.running {
                        info!("Quit requested");
                        break;
                    }
                }
                Ok(Event::Resize(width, height)) => {
                    debug!("Terminal resized to {width}x{height}");
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("Event read error: {e}");
                }
            }
        }
    }
    Ok(())
}
