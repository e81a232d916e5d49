pub mod bodegas;
pub mod form;
pub mod main;
