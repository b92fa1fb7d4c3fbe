//! Errors raised while loading or saving engine configuration.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors from [`SynthConfig`](crate::SynthConfig) file and TOML handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config '{path}': {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be written.
    #[error("cannot write config '{path}': {source}")]
    Write {
        /// File that was being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The directory holding the configuration file could not be created.
    #[error("cannot create config directory '{path}': {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Malformed TOML or an unknown key.
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be encoded as TOML.
    #[error("cannot encode config as TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    /// Well-formed TOML with a value outside its allowed range.
    #[error("invalid config: {0}")]
    Invalid(#[from] ValidationError),
}

impl ConfigError {
    pub(crate) fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn create_dir(path: &Path, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.to_path_buf(),
            source,
        }
    }

    /// File or directory involved, for filesystem errors.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } | Self::CreateDir { path, .. } => {
                Some(path)
            }
            Self::Parse(_) | Self::Encode(_) | Self::Invalid(_) => None,
        }
    }
}
