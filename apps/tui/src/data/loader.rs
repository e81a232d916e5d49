use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{Location, RawLocation};

/// Raised when the locations file is missing or cannot be used.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("locations file {} not found", path.display())]
    NotFound { path: PathBuf },
    #[error("locations file {} is empty", path.display())]
    Empty { path: PathBuf },
    #[error("failed to read locations file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("locations file {} must contain a JSON array", path.display())]
    NotAnArray { path: PathBuf },
}

/// Loads and validates the location records stored at `path`.
///
/// Elements that do not carry a name, a `[lat, lon]` pair, a description and
/// an image reference are dropped, as are later records reusing a name; the
/// file itself must exist and hold a JSON array.
pub fn load_locations(path: &Path) -> Result<Vec<Location>, DataError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            DataError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DataError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    if content.trim().is_empty() {
        return Err(DataError::Empty {
            path: path.to_path_buf(),
        });
    }

    let value: Value = serde_json::from_str(&content).map_err(|source| DataError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = value else {
        return Err(DataError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    let total = items.len();
    let mut seen = HashSet::new();
    let locations: Vec<Location> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let location = serde_json::from_value::<RawLocation>(item)
                .ok()
                .and_then(RawLocation::validate);
            match location {
                None => {
                    debug!("Dropping invalid location record at index {index}");
                    None
                }
                Some(location) if !seen.insert(location.name.clone()) => {
                    debug!(
                        "Dropping duplicate location {:?} at index {index}",
                        location.name
                    );
                    None
                }
                location => location,
            }
        })
        .collect();

    info!(
        "Loaded {} of {total} location records from {}",
        locations.len(),
        path.display()
    );

    Ok(locations)
}
