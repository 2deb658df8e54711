//! Environment variable overrides
//!
//! Every setting can be supplied through an environment variable named
//! after its section and field, e.g. `REDGRANT_CONNECTION_HOST` or
//! `REDGRANT_POOL_MAX_CONNECTIONS`.

use std::env;
use std::str::FromStr;

use crate::error::{SettingsError, SettingsResult};

/// Prefix applied to every environment variable read by [`Env`]
pub const ENV_PREFIX: &str = "REDGRANT_";

/// Environment variable reader with prefix support
#[derive(Debug, Clone)]
pub struct Env {
	/// Optional prefix for environment variables (e.g., "REDGRANT_")
	pub prefix: Option<String>,
}

impl Env {
	/// Create a reader without a prefix
	pub fn new() -> Self {
		Self { prefix: None }
	}

	/// Set a prefix for all environment variable lookups
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = Some(prefix.into());
		self
	}

	/// Get the full key name with prefix
	fn key_name(&self, key: &str) -> String {
		match &self.prefix {
			Some(prefix) => format!("{}{}", prefix, key),
			None => key.to_string(),
		}
	}

	/// Read an optional string value
	pub fn optional_str(&self, key: &str) -> SettingsResult<Option<String>> {
		let full_key = self.key_name(key);
		validate_env_var_name(&full_key)?;

		match env::var(&full_key) {
			Ok(val) => Ok(Some(val)),
			Err(env::VarError::NotPresent) => Ok(None),
			Err(env::VarError::NotUnicode(_)) => Err(SettingsError::InvalidVariable {
				key: full_key,
				value_len: 0,
				error: "value is not valid unicode".to_string(),
			}),
		}
	}

	/// Read a required string value
	pub fn str(&self, key: &str) -> SettingsResult<String> {
		self.optional_str(key)?
			.ok_or_else(|| SettingsError::MissingVariable(self.key_name(key)))
	}

	/// Read and parse an optional value
	pub fn parse<T>(&self, key: &str) -> SettingsResult<Option<T>>
	where
		T: FromStr,
		T::Err: std::fmt::Display,
	{
		match self.optional_str(key)? {
			Some(val) => val
				.trim()
				.parse::<T>()
				.map(Some)
				.map_err(|e| SettingsError::InvalidVariable {
					key: self.key_name(key),
					value_len: val.len(),
					error: e.to_string(),
				}),
			None => Ok(None),
		}
	}

	/// Read an optional boolean value
	pub fn bool(&self, key: &str) -> SettingsResult<Option<bool>> {
		match self.optional_str(key)? {
			Some(val) => parse_bool(&val)
				.map(Some)
				.map_err(|error| SettingsError::InvalidVariable {
					key: self.key_name(key),
					value_len: val.len(),
					error,
				}),
			None => Ok(None),
		}
	}
}

impl Default for Env {
	fn default() -> Self {
		Self::new().with_prefix(ENV_PREFIX)
	}
}

/// Parse a boolean the way shell users write them
pub fn parse_bool(value: &str) -> Result<bool, String> {
	match value.trim().to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" | "" => Ok(false),
		other => Err(format!("Invalid boolean value: {}", other)),
	}
}

/// Reject variable names the platform cannot represent
pub fn validate_env_var_name(name: &str) -> SettingsResult<()> {
	if name.is_empty() {
		return Err(SettingsError::InvalidVariableName {
			name: name.to_string(),
			reason: "name must not be empty".to_string(),
		});
	}
	if name.contains('=') {
		return Err(SettingsError::InvalidVariableName {
			name: name.to_string(),
			reason: "name must not contain '='".to_string(),
		});
	}
	if name.chars().any(|c| c == '\0' || c.is_control()) {
		return Err(SettingsError::InvalidVariableName {
			name: name.to_string(),
			reason: "name must not contain control characters".to_string(),
		});
	}
	Ok(())
}
