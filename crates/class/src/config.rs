//! Class system configuration.
//!
//! Configuration is a small TOML document; every key is optional:
//!
//! ```toml
//! # Slots added to the chain registry each time it fills up.
//! registry-growth = 10
//! # Epoch a new class system starts at.
//! initial-epoch = 1
//! ```

use std::num::{NonZeroU32, NonZeroUsize};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::epoch::Epoch;
use crate::registry::DEFAULT_GROWTH;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an invalid value.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Tunables for a [`crate::ClassSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ClassSystemConfig {
	pub registry_growth: NonZeroUsize,
	pub initial_epoch: NonZeroU32,
}

impl ClassSystemConfig {
	pub const DEFAULT: Self = Self {
		registry_growth: DEFAULT_GROWTH,
		initial_epoch: NonZeroU32::MIN,
	};

	pub fn from_toml_str(input: &str) -> Result<Self> {
		Ok(toml::from_str(input)?)
	}

	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let input = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&input)
	}

	pub fn initial_epoch(&self) -> Epoch {
		Epoch::new(self.initial_epoch)
	}
}

impl Default for ClassSystemConfig {
	fn default() -> Self {
		Self::DEFAULT
	}
}
