//! User configuration for the extension runtime.
//!
//! ```toml
//! [keys]
//! "file.save" = "ctrl+s"
//! "layout.toggle-side" = ["alt", "#49"]
//! "view.refresh" = []          # unbind
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use quire_keymap::Chord;
use serde::{Deserialize, Serialize};


/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The document is not valid TOML or does not match the expected shape. Malformed
	/// chords are reported here too.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Per-action shortcut overrides. Key: action name, value: replacement chord.
///
/// An empty chord unbinds the action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeysConfig(HashMap<String, Chord>);

impl KeysConfig {
	pub fn get(&self, action: &str) -> Option<&Chord> {
		self.0.get(action)
	}

	pub fn insert(&mut self, action: impl Into<String>, keys: Chord) -> Option<Chord> {
		self.0.insert(action.into(), keys)
	}

	/// Merge another keys config, with `other` taking precedence.
	pub fn merge(&mut self, other: KeysConfig) {
		self.0.extend(other.0);
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionsConfig {
	pub keys: KeysConfig,
}

impl ExtensionsConfig {
	pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(input)?)
	}

	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml(&input)?;
		tracing::debug!(path = %path.display(), overrides = config.keys.len(), "config loaded");
		Ok(config)
	}

	/// Merge another config, with `other` taking precedence.
	pub fn merge(&mut self, other: ExtensionsConfig) {
		self.keys.merge(other.keys);
	}
}
