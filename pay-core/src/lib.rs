pub mod calculations;
pub mod models;
pub mod tables;

pub use models::*;
pub use tables::{TableError, TaxTableProvider};
