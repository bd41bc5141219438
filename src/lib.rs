pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{CalamineWorkbook, JsonSettingsStore};
pub use app::{App, SumSelection};
pub use crate::core::{engine::SumEngine, pipeline::SumPipeline};
pub use utils::error::{Result, SumLoadError};
