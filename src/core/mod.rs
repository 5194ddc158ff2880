pub mod catalog;
pub mod engine;
pub mod generator;
pub mod ids;
pub mod registry;
pub mod service;

pub use crate::domain::model::{Domain, Endpoint, Scan, ScanState, ScanStatus, ScanView};
pub use crate::domain::ports::{Clock, ConfigProvider, RandomSource, ScanService};
pub use crate::utils::error::Result;
