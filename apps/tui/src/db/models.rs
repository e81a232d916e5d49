use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::FromRow;
use thiserror::Error;

use crate::db::fields::{FieldKind, FieldSpec, FIELDS};

/// Field values keyed by column name; `None` marks an absent value.
pub type FieldMap = BTreeMap<String, Option<String>>;

#[derive(Debug, Error)]
pub enum BodegaError {
    #[error("field '{field}' is required")]
    MissingField { field: &'static str },
    #[error("field '{field}' must be {expected}, got {value:?}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
        value: String,
    },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// A row of the bodegas table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct BodegaRecord {
    pub id: i64,
    pub name: String,
    pub cp: Option<i64>,
    pub town: String,
    pub street: Option<String>,
    pub number: Option<i64>,
    pub comp: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub website: Option<String>,
    pub do_name: String,
}

impl BodegaRecord {
    /// Display value of a column, `None` when the column is empty or unknown.
    pub fn field(&self, key: &str) -> Option<String> {
        match key {
            "id" => Some(self.id.to_string()),
            "name" => Some(self.name.clone()),
            "cp" => self.cp.map(|v| v.to_string()),
            "town" => Some(self.town.clone()),
            "street" => self.street.clone(),
            "number" => self.number.map(|v| v.to_string()),
            "comp" => self.comp.clone(),
            "lat" => Some(self.lat.to_string()),
            "lon" => Some(self.lon.to_string()),
            "website" => self.website.clone(),
            "do_name" => Some(self.do_name.clone()),
            _ => None,
        }
    }
}

/// A bodega ready for insertion, every field already coerced.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBodega {
    pub name: String,
    pub cp: Option<i64>,
    pub town: String,
    pub street: Option<String>,
    pub number: Option<i64>,
    pub comp: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub website: Option<String>,
    pub do_name: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Coerced {
    Text(String),
    Integer(i64),
    Real(f64),
}

fn coerce(spec: &FieldSpec, raw: &str) -> Result<Coerced, BodegaError> {
    let invalid = || BodegaError::InvalidField {
        field: spec.key,
        expected: spec.kind.label(),
        value: raw.to_string(),
    };

    match spec.kind {
        FieldKind::Text => Ok(Coerced::Text(raw.to_string())),
        FieldKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Coerced::Integer)
            .map_err(|_| invalid()),
        FieldKind::Real => match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Coerced::Real(value)),
            _ => Err(invalid()),
        },
    }
}

struct Coercer<'a> {
    data: &'a FieldMap,
}

impl Coercer<'_> {
    fn value(&self, key: &str) -> Result<Option<Coerced>, BodegaError> {
        let Some(spec) = FIELDS.iter().find(|spec| spec.key == key) else {
            return Ok(None);
        };
        match self.data.get(key).and_then(Option::as_deref) {
            Some(raw) => coerce(spec, raw).map(Some),
            None if spec.required => Err(BodegaError::MissingField { field: spec.key }),
            None => Ok(None),
        }
    }

    fn text(&self, key: &str) -> Result<Option<String>, BodegaError> {
        Ok(match self.value(key)? {
            Some(Coerced::Text(v)) => Some(v),
            _ => None,
        })
    }

    fn integer(&self, key: &str) -> Result<Option<i64>, BodegaError> {
        Ok(match self.value(key)? {
            Some(Coerced::Integer(v)) => Some(v),
            _ => None,
        })
    }

    fn real(&self, key: &str) -> Result<Option<f64>, BodegaError> {
        Ok(match self.value(key)? {
            Some(Coerced::Real(v)) => Some(v),
            _ => None,
        })
    }
}

impl TryFrom<&FieldMap> for NewBodega {
    type Error = BodegaError;

    /// Coerces each field to its declared type.
    ///
    /// Missing required fields and values that do not parse are reported
    /// with the column name, in table order.
    fn try_from(data: &FieldMap) -> Result<Self, Self::Error> {
        let c = Coercer { data };
        let name = c.text("name")?.unwrap_or_default();
        let cp = c.integer("cp")?;
        let town = c.text("town")?.unwrap_or_default();
        let street = c.text("street")?;
        let number = c.integer("number")?;
        let comp = c.text("comp")?;
        let lat = c.real("lat")?.unwrap_or_default();
        let lon = c.real("lon")?.unwrap_or_default();
        let website = c.text("website")?;
        let do_name = c.text("do_name")?.unwrap_or_default();

        Ok(Self {
            name,
            cp,
            town,
            street,
            number,
            comp,
            lat,
            lon,
            website,
            do_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FieldMap {
        [
            ("name", Some("Bodega Test")),
            ("cp", Some("12345")),
            ("town", Some("Testville")),
            ("street", Some("Rue des Vins")),
            ("number", Some("42")),
            ("comp", None),
            ("lat", Some("12.345")),
            ("lon", Some("67.890")),
            ("website", Some("https://bodega-test.com")),
            ("do_name", Some("DO Test")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
        .collect()
    }

    #[test]
    fn coerces_declared_types() -> Result<(), BodegaError> {
        let bodega = NewBodega::try_from(&sample())?;
        assert_eq!(bodega.cp, Some(12345));
        assert_eq!(bodega.number, Some(42));
        assert!((bodega.lat - 12.345).abs() < f64::EPSILON);
        assert_eq!(bodega.comp, None);
        assert_eq!(bodega.do_name, "DO Test");
        Ok(())
    }

    #[test]
    fn rejects_non_numeric_integer() {
        let mut data = sample();
        data.insert("cp".to_string(), Some("12a45".to_string()));
        let err = NewBodega::try_from(&data);
        assert!(matches!(err, Err(BodegaError::InvalidField { field: "cp", .. })));
    }

    #[test]
    fn rejects_non_finite_real() {
        let mut data = sample();
        data.insert("lon".to_string(), Some("NaN".to_string()));
        let err = NewBodega::try_from(&data);
        assert!(matches!(err, Err(BodegaError::InvalidField { field: "lon", .. })));
    }

    #[test]
    fn reports_missing_required_field() {
        let mut data = sample();
        data.remove("town");
        let err = NewBodega::try_from(&data);
        assert!(matches!(err, Err(BodegaError::MissingField { field: "town" })));
    }

    #[test]
    fn error_message_names_the_field() {
        let mut data = sample();
        data.insert("lat".to_string(), Some("north".to_string()));
        let message = NewBodega::try_from(&data)
            .err()
            .map(|e| e.to_string())
            .unwrap_or_default();
        assert!(message.contains("'lat'"));
        assert!(message.contains("decimal number"));
    }
}
