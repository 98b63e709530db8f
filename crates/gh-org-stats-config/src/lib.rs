//! Configuration for gh-org-stats
//!
//! This crate provides:
//! - Loading the run configuration from the environment (and `.env`)
//! - Default locations of output files

pub mod app_config;
pub mod paths;

pub use app_config::{ConfigError, StatsConfig};
pub use paths::{default_output_path, DEFAULT_OUTPUT_FILE};
