//! gotchi-core - Shared functionality for the gotchi tools
//!
//! Configuration, standard paths and small formatting helpers.

pub mod config;
pub mod format;
pub mod paths;

pub use config::Config;
pub use paths::Paths;
