use color_eyre::eyre::eyre;
use dotenv::dotenv;
use std::env;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "vinos_ibericos";

/// Colours shared by the map tooltips, popups and boundary overlays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub primary: String,
    pub parchment: String,
    pub dark: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: "#590212".to_string(),
            parchment: "#e8d9cc".to_string(),
            dark: "#261d15".to_string(),
        }
    }
}

/// Viewport, marker and overlay settings for the generated map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub default_center: (f64, f64),
    pub initial_zoom: u8,
    pub focus_zoom: u8,
    pub popup_width: u32,
    pub icon_size: (u32, u32),
    pub focus_icon_size: (u32, u32),
    pub icon_url: String,
    pub boundary_dir: PathBuf,
    pub palette: Palette,
}

impl MapConfig {
    pub fn for_assets(assets_dir: &Path) -> Self {
        Self {
            icon_url: assets_dir.join("tinto.png").display().to_string(),
            boundary_dir: assets_dir.join("geojson"),
            ..Self::default()
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: (40.0, -3.3),
            initial_zoom: 7,
            focus_zoom: 10,
            popup_width: 400,
            icon_size: (40, 40),
            focus_icon_size: (60, 60),
            icon_url: "assets/tinto.png".to_string(),
            boundary_dir: PathBuf::from("assets/geojson"),
            palette: Palette::default(),
        }
    }
}

/// Where location images live and which file stands in for missing ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsConfig {
    pub img_dir: PathBuf,
    pub placeholder: String,
    pub detail_image_size: (u32, u32),
}

impl AssetsConfig {
    pub fn for_assets(assets_dir: &Path) -> Self {
        Self {
            img_dir: assets_dir.join("img"),
            ..Self::default()
        }
    }

    pub fn placeholder_path(&self) -> PathBuf {
        self.img_dir.join(&self.placeholder)
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            img_dir: PathBuf::from("assets/img"),
            placeholder: "default_img.jpg".to_string(),
            detail_image_size: (600, 320),
        }
    }
}

/// Application configuration, built once at start-up and handed to each
/// component.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub locations_path: PathBuf,
    pub assets: AssetsConfig,
    pub map: MapConfig,
    pub database_url: String,
    pub map_output: PathBuf,
    pub open_map_on_start: bool,
    pub log_file: PathBuf,
    pub debug: bool,
}

impl AppConfig {
    /// Reads `.env`, then the process environment.
    pub fn from_env() -> color_eyre::eyre::Result<Self> {
        dotenv().ok();

        let base_dir: PathBuf = env::current_dir()?;

        let locations_path = resolve(
            &base_dir,
            &env::var("VINEDOS_FILE").unwrap_or_else(|_| "vinedos.json".to_string()),
        );
        let assets_dir = resolve(
            &base_dir,
            &env::var("ASSETS_DIR").unwrap_or_else(|_| "assets".to_string()),
        );

        let db_name = env::var("DATABASE_NAME").unwrap_or_else(|_| "bodegas.db".to_string());
        let database_path = base_dir.join(&db_name);

        // Create parent directory if it doesn't exist
        if let Some(parent) = database_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let database_url = database_url_for(&database_path)?;

        let data_dir = dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join(APP_DIR);

        let map_output = env::var("MAP_OUTPUT")
            .map_or_else(|_| data_dir.join("map.html"), |path| resolve(&base_dir, &path));
        let log_file = env::var("LOG_FILE").map_or_else(
            |_| data_dir.join(format!("{APP_DIR}.log")),
            |path| resolve(&base_dir, &path),
        );

        Ok(Self {
            locations_path,
            assets: AssetsConfig::for_assets(&assets_dir),
            map: MapConfig::for_assets(&assets_dir),
            database_url,
            map_output,
            open_map_on_start: flag("OPEN_MAP"),
            log_file,
            debug: flag("DEBUG"),
        })
    }
}

/// Formats a SQLite path the way SQLx expects it.
///
/// Absolute paths need three slashes (`sqlite:///abs/path.db`), relative
/// paths two (`sqlite://rel/path.db`).
pub fn database_url_for(database_path: &Path) -> color_eyre::eyre::Result<String> {
    let path_str = database_path
        .to_str()
        .ok_or_else(|| eyre!("Invalid database path"))?;

    let clean_path = path_str.trim_start_matches('/');

    let url = if database_path.is_absolute() {
        format!("sqlite:///{clean_path}")
    } else {
        format!("sqlite://{clean_path}")
    };
    Ok(url)
}

fn resolve(base_dir: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

fn flag(name: &str) -> bool {
    env::var(name).is_ok_and(|value| !matches!(value.trim(), "" | "0" | "false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_database_url_has_three_slashes() -> Result<(), Box<dyn std::error::Error>> {
        let url = database_url_for(Path::new("/var/data/bodegas.db"))?;
        assert_eq!(url, "sqlite:///var/data/bodegas.db");
        Ok(())
    }

    #[test]
    fn relative_database_url_has_two_slashes() -> Result<(), Box<dyn std::error::Error>> {
        let url = database_url_for(Path::new("data/bodegas.db"))?;
        assert_eq!(url, "sqlite://data/bodegas.db");
        Ok(())
    }

    #[test]
    fn asset_paths_derive_from_assets_dir() {
        let map = MapConfig::for_assets(Path::new("/srv/assets"));
        assert_eq!(map.boundary_dir, PathBuf::from("/srv/assets/geojson"));
        assert!(map.icon_url.ends_with("tinto.png"));

        let assets = AssetsConfig::for_assets(Path::new("/srv/assets"));
        assert_eq!(
            assets.placeholder_path(),
            PathBuf::from("/srv/assets/img/default_img.jpg")
        );
    }
}
