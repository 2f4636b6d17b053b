//! System orchestration, configuration, startup, and shutdown logic.

pub mod config;
pub mod desk_system;
pub mod logging;

pub use config::*;
pub use desk_system::*;
pub use logging::*;
