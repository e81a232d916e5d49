use std::fmt;

use crate::db::{FieldKind, FieldMap, FieldSpec, FIELDS};

/// First field that prevents a form from being submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub key: &'static str,
    pub label: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The field \u{ab} {} \u{bb} {}", self.label, self.reason)
    }
}

impl std::error::Error for FormError {}

/// Input buffers for one bodega, one per column of [`FIELDS`].
#[derive(Debug, Clone)]
pub struct BodegaForm {
    values: Vec<String>,
    pub focus: usize,
    pub editing: bool,
}

impl Default for BodegaForm {
    fn default() -> Self {
        Self::new()
    }
}

impl BodegaForm {
    pub fn new() -> Self {
        Self {
            values: vec![String::new(); FIELDS.len()],
            focus: 0,
            editing: false,
        }
    }

    pub const fn fields() -> &'static [FieldSpec] {
        &FIELDS
    }

    pub fn value(&self, index: usize) -> &str {
        self.values.get(index).map_or("", String::as_str)
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        if let Some(index) = FIELDS.iter().position(|spec| spec.key == key) {
            self.values[index] = value.into();
        }
    }

    pub fn focused_spec(&self) -> &'static FieldSpec {
        &FIELDS[self.focus.min(FIELDS.len() - 1)]
    }

    pub fn push_char(&mut self, ch: char) {
        if let Some(value) = self.values.get_mut(self.focus) {
            value.push(ch);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(value) = self.values.get_mut(self.focus) {
            value.pop();
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
    }

    /// Empties every input and returns to the first field.
    pub fn clear(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
        self.focus = 0;
        self.editing = false;
    }

    /// Checks required fields and numeric formats, in table order.
    pub fn validate(&self) -> Result<(), FormError> {
        for (spec, raw) in FIELDS.iter().zip(&self.values) {
            let value = raw.trim();
            let error = |reason| FormError {
                key: spec.key,
                label: spec.label,
                reason,
            };

            if value.is_empty() {
                if spec.required {
                    return Err(error("is required"));
                }
                continue;
            }

            match spec.kind {
                FieldKind::Integer if value.parse::<i64>().is_err() => {
                    return Err(error("must contain digits only"));
                }
                FieldKind::Real if !value.parse::<f64>().is_ok_and(f64::is_finite) => {
                    return Err(error("must contain a decimal number"));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Values ready for the record manager: trimmed, address fields
    /// title-cased, empty inputs absent.
    pub fn normalized(&self) -> FieldMap {
        FIELDS
            .iter()
            .zip(&self.values)
            .map(|(spec, raw)| {
                let value = raw.trim();
                let value = if value.is_empty() {
                    None
                } else if spec.title_case {
                    Some(title_case(value))
                } else {
                    Some(value.to_string())
                };
                (spec.key.to_string(), value)
            })
            .collect()
    }

    /// Validates then normalizes.
    pub fn submit(&self) -> Result<FieldMap, FormError> {
        self.validate()?;
        Ok(self.normalized())
    }
}

/// Upper-cases the first letter of every run of letters and lower-cases the
/// rest (`"rue DES vins"` becomes `"Rue Des Vins"`).
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            result.push(ch);
            in_word = false;
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> BodegaForm {
        let mut form = BodegaForm::new();
        form.set_value("name", "  bodegas muga ");
        form.set_value("cp", "26200");
        form.set_value("town", "HARO");
        form.set_value("street", "barrio de la estación");
        form.set_value("lat", "42.5786");
        form.set_value("lon", "-2.8467");
        form.set_value("website", "https://bodegasmuga.com");
        form.set_value("do_name", "Rioja");
        form
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("rue DES vins"), "Rue Des Vins");
        assert_eq!(title_case("jerez-xérès"), "Jerez-Xérès");
        assert_eq!(title_case("bâtiment 2b"), "Bâtiment 2B");
    }

    #[test]
    fn normalized_trims_title_cases_and_drops_empty() {
        let data = filled_form().normalized();
        assert_eq!(data["name"].as_deref(), Some("Bodegas Muga"));
        assert_eq!(data["town"].as_deref(), Some("Haro"));
        assert_eq!(data["street"].as_deref(), Some("Barrio De La Estación"));
        assert_eq!(data["do_name"].as_deref(), Some("Rioja"));
        assert_eq!(data["website"].as_deref(), Some("https://bodegasmuga.com"));
        assert_eq!(data["comp"], None);
        assert_eq!(data["number"], None);
        assert_eq!(data.len(), FIELDS.len());
    }

    #[test]
    fn missing_required_field_is_reported_first() {
        let mut form = filled_form();
        form.set_value("town", "   ");
        form.set_value("lat", "");

        let err = form.validate().err();
        assert_eq!(err.as_ref().map(|e| e.key), Some("town"));
        assert_eq!(err.map(|e| e.reason), Some("is required"));
    }

    #[test]
    fn numeric_fields_must_parse() {
        let mut form = filled_form();
        form.set_value("cp", "26-200");
        assert_eq!(form.validate().err().map(|e| e.key), Some("cp"));

        let mut form = filled_form();
        form.set_value("lon", "west");
        let err = form.validate().err();
        assert_eq!(err.as_ref().map(|e| e.key), Some("lon"));
        assert_eq!(
            err.map(|e| e.to_string()),
            Some("The field \u{ab} Longitude \u{bb} must contain a decimal number".to_string())
        );
    }

    #[test]
    fn empty_optional_numeric_field_is_accepted() {
        let form = filled_form();
        assert!(form.validate().is_ok());
        assert!(form.submit().is_ok());
    }

    #[test]
    fn editing_follows_focus() {
        let mut form = BodegaForm::new();
        form.focus_prev();
        assert_eq!(form.focused_spec().key, "do_name");
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focused_spec().key, "cp");

        form.push_char('2');
        form.push_char('6');
        form.pop_char();
        assert_eq!(form.value(1), "2");

        form.clear();
        assert_eq!(form.value(1), "");
        assert_eq!(form.focus, 0);
    }
}
