pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::HttpFetcher, storage::LocalStorage};
pub use config::{toml_config::TomlConfig, ScrapeConfig};
pub use crate::core::{etl::EtlEngine, etl::RunReport, pipeline::ArchivePipeline};
pub use utils::error::{Result, ScrapeError};
