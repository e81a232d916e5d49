pub mod fields;
pub mod migrations;
pub mod models;
pub mod queries;

pub use fields::{FieldKind, FieldSpec, FIELDS};
pub use migrations::{create_database_pool, setup_database};
pub use models::{BodegaError, BodegaRecord, FieldMap, NewBodega};
pub use queries::BodegaManager;
