//! Configuration system for Skylight.
//!
//! Provides render settings that persist to disk as RON files, with CLI
//! overrides via clap and validation before rendering.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, Config, ConfigOrigin, DebugConfig, ImageConfig, OutputConfig, SamplingConfig, SceneConfig,
    TableConfig,
};
pub use error::ConfigError;
