pub mod provider;

pub use provider::{TableError, TaxTableProvider};
