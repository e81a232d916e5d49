mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::{App, Notice};
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use log::{error, info, warn};
use vinos_ibericos::config::AppConfig;
use vinos_ibericos::data::load_locations;
use vinos_ibericos::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = AppConfig::from_env()?;
    if let Err(e) = logging::init(&config.log_file, config.debug) {
        eprintln!("Logging disabled: {e}");
    }

    // Without usable location data there is nothing to show
    let locations = match load_locations(&config.locations_path) {
        Ok(locations) => locations,
        Err(e) => {
            error!("Cannot start: {e}");
            eprintln!("Vinos Ibéricos cannot start: {e}");
            std::process::exit(1);
        }
    };
    info!(
        "Loaded {} locations from {}",
        locations.len(),
        config.locations_path.display()
    );

    let mut app = App::new(config, locations);

    if let Some(filter) = args.render_filter() {
        event::run_render(&app, filter);
        return Ok(());
    }

    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json).await;
    }

    if let Err(e) = app.initialize_db().await {
        warn!("Database unavailable: {e}");
        app.notify(Notice::error(
            "Database unavailable",
            format!("{e}\nBodega records are disabled; the map still works."),
        ));
    }

    let mut terminal = terminal::setup_terminal()?;

    let result = event::run(&mut terminal, &mut app).await;

    terminal::cleanup_terminal_state(true, true);

    if let Some(manager) = &app.actions.manager {
        manager.close().await;
    }

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
