use std::fs::{self, OpenOptions};
use std::path::Path;

use color_eyre::eyre::{eyre, Result};
use env_logger::{Env, Target};

/// Default filter when `RUST_LOG` is unset.
pub const fn default_filter(debug: bool) -> &'static str {
    if debug {
        "debug"
    } else {
        "info"
    }
}

/// Sends log records to `log_file` so they never reach the terminal the UI
/// draws on.
pub fn init(log_file: &Path, debug: bool) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| eyre!("Failed to open log file {}: {e}", log_file.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter(debug)))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| eyre!("Failed to initialise logging: {e}"))?;

    log::info!("Logging to {}", log_file.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_lowers_the_default_level() {
        assert_eq!(default_filter(true), "debug");
        assert_eq!(default_filter(false), "info");
    }
}
