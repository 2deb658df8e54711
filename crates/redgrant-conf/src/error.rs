//! Settings errors

use std::path::PathBuf;

/// Errors raised while loading or validating settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("Failed to read settings file {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse settings: {0}")]
	Parse(#[from] toml::de::Error),

	#[error("Missing environment variable: {0}")]
	MissingVariable(String),

	#[error("Failed to parse environment variable '{key}' (value length: {value_len}): {error}")]
	InvalidVariable {
		key: String,
		value_len: usize,
		error: String,
	},

	#[error("Invalid environment variable name '{name}': {reason}")]
	InvalidVariableName { name: String, reason: String },

	#[error("Invalid settings: {0}")]
	Validation(String),
}

/// Result type for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
