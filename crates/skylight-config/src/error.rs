//! Configuration error types.

use std::path::PathBuf;

/// Errors from loading, saving or validating `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid config", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("cannot serialize config")]
    Serialize(#[from] ron::Error),

    /// A setting is outside its usable range.
    #[error("invalid `{setting}`: {reason}")]
    Invalid {
        setting: &'static str,
        reason: String,
    },

    #[error("no config directory available on this platform")]
    NoConfigDir,
}
