pub const TABLE_NAME: &str = "bodegas";

/// Declared storage type of a bodega column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Real,
}

impl FieldKind {
    pub const fn sql_type(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Real => "REAL",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Real => "decimal number",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub kind: FieldKind,
    /// Title-cased by the input form before storage
    pub title_case: bool,
}

const fn field(
    key: &'static str,
    label: &'static str,
    required: bool,
    kind: FieldKind,
    title_case: bool,
) -> FieldSpec {
    FieldSpec {
        key,
        label,
        required,
        kind,
        title_case,
    }
}

/// Columns of the bodegas table, in storage order (after `id`).
pub const FIELDS: [FieldSpec; 10] = [
    field("name", "Bodega name", true, FieldKind::Text, true),
    field("cp", "Postal code", false, FieldKind::Integer, false),
    field("town", "Town", true, FieldKind::Text, true),
    field("street", "Street", false, FieldKind::Text, true),
    field("number", "Number", false, FieldKind::Integer, false),
    field("comp", "Address complement", false, FieldKind::Text, true),
    field("lat", "Latitude", true, FieldKind::Real, false),
    field("lon", "Longitude", true, FieldKind::Real, false),
    field("website", "Website", false, FieldKind::Text, false),
    field("do_name", "Designation of origin", true, FieldKind::Text, false),
];

pub fn field_spec(key: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.key == key)
}

/// `CREATE TABLE IF NOT EXISTS` statement derived from [`FIELDS`].
pub fn create_table_sql() -> String {
    let columns: Vec<String> = FIELDS
        .iter()
        .map(|spec| {
            let not_null = if spec.required { " NOT NULL" } else { "" };
            format!("{} {}{not_null}", spec.key, spec.kind.sql_type())
        })
        .collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (\n    id INTEGER PRIMARY KEY,\n    {}\n)",
        columns.join(",\n    ")
    )
}

/// Comma separated column list without `id`.
pub fn column_list() -> String {
    FIELDS
        .iter()
        .map(|spec| spec.key)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_declares_types_and_constraints() {
        let sql = create_table_sql();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS bodegas"));
        assert!(sql.contains("id INTEGER PRIMARY KEY"));
        assert!(sql.contains("name TEXT NOT NULL"));
        assert!(sql.contains("cp INTEGER,"));
        assert!(sql.contains("lat REAL NOT NULL"));
        assert!(sql.contains("website TEXT,"));
        assert!(sql.contains("do_name TEXT NOT NULL\n)"));
    }

    #[test]
    fn column_list_follows_field_order() {
        assert_eq!(
            column_list(),
            "name, cp, town, street, number, comp, lat, lon, website, do_name"
        );
    }

    #[test]
    fn looks_up_fields_by_key() {
        assert_eq!(field_spec("lat").map(|f| f.kind), Some(FieldKind::Real));
        assert!(field_spec("unknown").is_none());
    }
}
