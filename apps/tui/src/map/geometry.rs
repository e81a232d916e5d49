use std::fs;
use std::path::{Path, PathBuf};

use geojson::{GeoJson, Value};
use log::{debug, warn};

use crate::domain::geometry_key;

/// Filled outline of a location, in `[lat, lon]` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    pub points: Vec<[f64; 2]>,
}

impl Boundary {
    /// South-west and north-east corners enclosing every point
    pub fn bounds(&self) -> Option<[[f64; 2]; 2]> {
        let first = self.points.first()?;
        let init = [*first, *first];
        Some(self.points.iter().fold(init, |[min, max], [lat, lon]| {
            [
                [min[0].min(*lat), min[1].min(*lon)],
                [max[0].max(*lat), max[1].max(*lon)],
            ]
        }))
    }
}

pub fn boundary_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.geojson", geometry_key(name)))
}

/// Reads the boundary file for `name`, if there is a usable one.
///
/// Any failure (missing file, bad JSON, no feature, non-polygon geometry)
/// yields `None`.
pub fn load_boundary(dir: &Path, name: &str) -> Option<Boundary> {
    let path = boundary_path(dir, name);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            debug!("No boundary for {name} at {}: {e}", path.display());
            return None;
        }
    };

    let boundary = parse_boundary(&content);
    if boundary.is_none() {
        warn!("Ignoring unusable boundary file {}", path.display());
    }
    boundary
}

fn parse_boundary(content: &str) -> Option<Boundary> {
    let GeoJson::FeatureCollection(collection) = content.parse::<GeoJson>().ok()? else {
        return None;
    };
    let geometry = collection.features.into_iter().next()?.geometry?;

    let ring = match geometry.value {
        Value::Polygon(rings) => rings.into_iter().next()?,
        Value::MultiPolygon(polygons) => polygons.into_iter().next()?.into_iter().next()?,
        _ => return None,
    };

    let points: Vec<[f64; 2]> = ring
        .iter()
        .map(|position| match position.as_slice() {
            [lon, lat, ..] => Some([*lat, *lon]),
            _ => None,
        })
        .collect::<Option<_>>()?;

    if points.is_empty() {
        return None;
    }
    Some(Boundary { points })
}
