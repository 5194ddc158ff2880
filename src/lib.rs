pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::{router, serve, AppState};
pub use config::TomlConfig;
pub use core::{engine::ScanEngine, registry::Registry, service::ScanSimulator};
pub use utils::error::{Result, ScanApiError};
