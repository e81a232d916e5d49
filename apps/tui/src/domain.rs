use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds coordinates from a `[lat, lon]` slice, rejecting any other arity
    pub fn from_slice(values: &[f64]) -> Option<Self> {
        match values {
            [lat, lon] if lat.is_finite() && lon.is_finite() => Some(Self::new(*lat, *lon)),
            _ => None,
        }
    }

    pub const fn as_array(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

/// A winery region or town shown on the map.
///
/// `name` is the display key: it is unique within a loaded list and drives
/// selection, map focus and the boundary file lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub coords: Coordinates,
    pub description: String,
    pub image: String,
}

impl Location {
    pub fn new(
        name: impl Into<String>,
        coords: Coordinates,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            coords,
            description: description.into(),
            image: image.into(),
        }
    }

    /// File stem of the boundary geometry for this location
    pub fn geometry_key(&self) -> String {
        geometry_key(&self.name)
    }
}

/// Lower-cases a name and replaces spaces with underscores.
pub fn geometry_key(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Raw JSON shape of a location record, before validation.
#[derive(Debug, Deserialize)]
pub(crate) struct RawLocation {
    #[serde(rename = "nom", alias = "name")]
    pub name: String,
    pub coords: Vec<f64>,
    pub description: String,
    #[serde(rename = "img", alias = "image")]
    pub image: String,
}

impl RawLocation {
    pub(crate) fn validate(self) -> Option<Location> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let coords = Coordinates::from_slice(&self.coords)?;
        Some(Location::new(name, coords, self.description, self.image))
    }
}

/// Returns the locations sorted by name, the order of the selection panel.
pub fn sorted_by_name(locations: &[Location]) -> Vec<Location> {
    let mut sorted = locations.to_vec();
    sorted.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_key_normalizes_name() {
        assert_eq!(geometry_key("Ribera del Duero"), "ribera_del_duero");
        assert_eq!(geometry_key("Rioja"), "rioja");
    }

    #[test]
    fn coordinates_require_exactly_two_values() {
        assert_eq!(
            Coordinates::from_slice(&[40.0, -3.3]),
            Some(Coordinates::new(40.0, -3.3))
        );
        assert_eq!(Coordinates::from_slice(&[40.0]), None);
        assert_eq!(Coordinates::from_slice(&[40.0, -3.3, 1.0]), None);
        assert_eq!(Coordinates::from_slice(&[f64::NAN, 1.0]), None);
    }

    #[test]
    fn raw_location_accepts_both_key_spellings() -> Result<(), Box<dyn std::error::Error>> {
        let short: RawLocation = serde_json::from_str(
            r#"{"nom":"A","coords":[1.0,2.0],"description":"d","img":"a.png"}"#,
        )?;
        let long: RawLocation = serde_json::from_str(
            r#"{"name":"A","coords":[1.0,2.0],"description":"d","image":"a.png"}"#,
        )?;

        assert_eq!(short.validate(), long.validate());
        Ok(())
    }

    #[test]
    fn sorted_by_name_ignores_case() {
        let locations = vec![
            Location::new("rioja", Coordinates::new(0.0, 0.0), "", ""),
            Location::new("Bierzo", Coordinates::new(0.0, 0.0), "", ""),
            Location::new("Cava", Coordinates::new(0.0, 0.0), "", ""),
        ];
        let names: Vec<_> = sorted_by_name(&locations)
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, ["Bierzo", "Cava", "rioja"]);
    }
}
