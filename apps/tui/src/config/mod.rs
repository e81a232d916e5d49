mod app_config;

pub use app_config::{database_url_for, AppConfig, AssetsConfig, MapConfig, Palette};
