//! Customer and admin interaction contexts over the shared collections.

pub mod admin;
pub mod customer;
pub mod error;
pub mod watcher;

pub use admin::*;
pub use customer::*;
pub use error::*;
pub use watcher::*;
