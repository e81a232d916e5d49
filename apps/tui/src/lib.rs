// Export our modules for use in binaries and tests
pub mod config;
pub mod data;
pub mod db;
pub mod detail;
pub mod domain;
pub mod forms;
pub mod logging;
pub mod map;
pub mod selection;

pub use domain::{Coordinates, Location};
pub use selection::{Selection, SelectionChange};
