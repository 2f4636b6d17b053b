//! Flat-file persistence: one JSON array per collection.

pub mod error;
pub mod json_store;
mod records;

pub use error::*;
pub use json_store::*;
