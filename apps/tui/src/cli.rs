use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "vinos_ibericos",
    version,
    about = "Map and record browser for Iberian wine regions"
)]
pub struct CliArgs {
    /// Print a summary and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the map document, optionally focused on a location, and exit
    #[arg(long, value_name = "NAME", num_args = 0..=1, default_missing_value = "")]
    pub render: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override database path
    #[arg(long, value_name = "PATH")]
    pub db: Option<String>,

    /// Override the locations file
    #[arg(long, value_name = "PATH")]
    pub data: Option<String>,

    /// Override the assets directory (images, icon, boundaries)
    #[arg(long, value_name = "PATH")]
    pub assets: Option<String>,

    /// Override where the map document is written
    #[arg(long = "map-out", value_name = "PATH")]
    pub map_out: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(db) = &self.db {
            std::env::set_var("DATABASE_NAME", db);
        }
        if let Some(path) = &self.data {
            std::env::set_var("VINEDOS_FILE", path);
        }
        if let Some(dir) = &self.assets {
            std::env::set_var("ASSETS_DIR", dir);
        }
        if let Some(path) = &self.map_out {
            std::env::set_var("MAP_OUTPUT", path);
        }
        if self.debug {
            std::env::set_var("DEBUG", "1");
        }
    }

    /// Location filter for `--render`; a bare flag renders the default view.
    pub fn render_filter(&self) -> Option<Option<&str>> {
        self.render
            .as_deref()
            .map(|name| Some(name.trim()).filter(|n| !n.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_flag_takes_an_optional_name() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from(["vinos_ibericos", "--render"])?;
        assert_eq!(args.render_filter(), Some(None));

        let args = CliArgs::try_parse_from(["vinos_ibericos", "--render", "Rioja"])?;
        assert_eq!(args.render_filter(), Some(Some("Rioja")));

        let args = CliArgs::try_parse_from(["vinos_ibericos", "--headless", "--json"])?;
        assert_eq!(args.render_filter(), None);
        assert!(args.headless && args.json);
        Ok(())
    }

    #[test]
    fn path_overrides_are_parsed() -> Result<(), clap::Error> {
        let args = CliArgs::try_parse_from([
            "vinos_ibericos",
            "--db",
            "data/bodegas.db",
            "--data",
            "vinedos.json",
            "--map-out",
            "/tmp/map.html",
        ])?;
        assert_eq!(args.db.as_deref(), Some("data/bodegas.db"));
        assert_eq!(args.data.as_deref(), Some("vinedos.json"));
        assert_eq!(args.map_out.as_deref(), Some("/tmp/map.html"));
        assert_eq!(args.assets, None);
        Ok(())
    }
}
