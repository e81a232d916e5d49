mod loader;

pub use loader::{load_locations, DataError};
