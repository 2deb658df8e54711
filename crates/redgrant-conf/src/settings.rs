//! Settings model
//!
//! [`Settings`] has three sections: `connection` (required), `pool` and
//! `reconcile` (both optional, with defaults).

use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use crate::env::Env;
use crate::error::{SettingsError, SettingsResult};

/// Default Redshift port
pub const DEFAULT_PORT: u16 = 5439;

/// Default owner id of system schemas
pub const DEFAULT_SYSTEM_OWNER_ID: i64 = 1;

/// Complete reconciler settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
	pub connection: ConnectionSettings,
	#[serde(default)]
	pub pool: PoolSettings,
	#[serde(default)]
	pub reconcile: ReconcileSettings,
}

impl Settings {
	/// Parse and validate settings from a TOML document
	pub fn from_toml_str(source: &str) -> SettingsResult<Self> {
		let settings: Settings = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read, parse and validate a TOML settings file
	pub fn from_file(path: impl AsRef<Path>) -> SettingsResult<Self> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	/// Build settings purely from environment variables
	///
	/// `CONNECTION_HOST`, `CONNECTION_USER` and `CONNECTION_PASSWORD` are
	/// required; every other value falls back to its default.
	pub fn from_env(env: &Env) -> SettingsResult<Self> {
		let mut settings = Settings {
			connection: ConnectionSettings::new(
				env.str("CONNECTION_HOST")?,
				env.str("CONNECTION_USER")?,
				SecretString::from(env.str("CONNECTION_PASSWORD")?),
			),
			pool: PoolSettings::default(),
			reconcile: ReconcileSettings::default(),
		};
		settings.apply_env(env)?;
		Ok(settings)
	}

	/// Load a TOML file and apply environment overrides on top of it
	pub fn load(path: impl AsRef<Path>, env: &Env) -> SettingsResult<Self> {
		let mut settings = Self::from_file(path)?;
		settings.apply_env(env)?;
		Ok(settings)
	}

	/// Override fields with any environment variables that are set,
	/// then re-validate
	pub fn apply_env(&mut self, env: &Env) -> SettingsResult<()> {
		let conn = &mut self.connection;
		if let Some(host) = env.optional_str("CONNECTION_HOST")? {
			conn.host = host;
		}
		if let Some(user) = env.optional_str("CONNECTION_USER")? {
			conn.user = user;
		}
		if let Some(password) = env.optional_str("CONNECTION_PASSWORD")? {
			conn.password = SecretString::from(password);
		}
		if let Some(port) = env.parse("CONNECTION_PORT")? {
			conn.port = port;
		}
		if let Some(sslmode) = env.parse("CONNECTION_SSLMODE")? {
			conn.sslmode = sslmode;
		}
		if let Some(timeout) = env.parse("CONNECTION_STATEMENT_TIMEOUT")? {
			conn.statement_timeout = Some(timeout);
		}

		let pool = &mut self.pool;
		if let Some(max) = env.parse("POOL_MAX_CONNECTIONS")? {
			pool.max_connections = max;
		}
		if let Some(min) = env.parse("POOL_MIN_CONNECTIONS")? {
			pool.min_connections = min;
		}
		if let Some(secs) = env.parse("POOL_ACQUIRE_TIMEOUT")? {
			pool.acquire_timeout = secs;
		}
		if let Some(secs) = env.parse("POOL_IDLE_TIMEOUT")? {
			pool.idle_timeout = secs;
		}
		if let Some(secs) = env.parse("POOL_MAX_LIFETIME")? {
			pool.max_lifetime = secs;
		}
		if let Some(flag) = env.bool("POOL_TEST_BEFORE_ACQUIRE")? {
			pool.test_before_acquire = flag;
		}

		let reconcile = &mut self.reconcile;
		if let Some(mode) = env.parse("RECONCILE_PARTIAL_COVERAGE")? {
			reconcile.partial_coverage = mode;
		}
		if let Some(coverage) = env.parse("RECONCILE_EMPTY_SCHEMA_COVERAGE")? {
			reconcile.empty_schema_coverage = coverage;
		}
		if let Some(owner) = env.parse("RECONCILE_SYSTEM_OWNER_ID")? {
			reconcile.system_owner_id = owner;
		}

		self.validate()
	}

	/// Validate every section
	pub fn validate(&self) -> SettingsResult<()> {
		self.connection.validate()?;
		self.pool.validate()
	}
}

/// How to reach the cluster
///
/// The password is held as a [`SecretString`] and never appears in
/// `Debug` output.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionSettings {
	pub host: String,
	pub user: String,
	#[serde(deserialize_with = "deserialize_secret")]
	pub password: SecretString,
	#[serde(default = "default_port")]
	pub port: u16,
	#[serde(default)]
	pub sslmode: SslMode,
	/// Server-side statement timeout in milliseconds
	#[serde(default)]
	pub statement_timeout: Option<u64>,
}

impl ConnectionSettings {
	/// Connection settings with default port and TLS mode
	pub fn new(host: impl Into<String>, user: impl Into<String>, password: SecretString) -> Self {
		Self {
			host: host.into(),
			user: user.into(),
			password,
			port: DEFAULT_PORT,
			sslmode: SslMode::default(),
			statement_timeout: None,
		}
	}

	pub fn with_port(mut self, port: u16) -> Self {
		self.port = port;
		self
	}

	pub fn with_sslmode(mut self, sslmode: SslMode) -> Self {
		self.sslmode = sslmode;
		self
	}

	pub fn with_statement_timeout(mut self, millis: u64) -> Self {
		self.statement_timeout = Some(millis);
		self
	}

	pub fn validate(&self) -> SettingsResult<()> {
		if self.host.trim().is_empty() {
			return Err(SettingsError::Validation(
				"connection.host must not be empty".to_string(),
			));
		}
		if self.user.trim().is_empty() {
			return Err(SettingsError::Validation(
				"connection.user must not be empty".to_string(),
			));
		}
		if self.port == 0 {
			return Err(SettingsError::Validation(
				"connection.port must be greater than 0".to_string(),
			));
		}
		if self.statement_timeout == Some(0) {
			return Err(SettingsError::Validation(
				"connection.statement_timeout must be greater than 0 when set".to_string(),
			));
		}
		Ok(())
	}
}

fn default_port() -> u16 {
	DEFAULT_PORT
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
	D: Deserializer<'de>,
{
	String::deserialize(deserializer).map(SecretString::from)
}

/// TLS negotiation mode, named as in libpq
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
	Disable,
	Prefer,
	#[default]
	Require,
	VerifyCa,
	VerifyFull,
}

impl SslMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			SslMode::Disable => "disable",
			SslMode::Prefer => "prefer",
			SslMode::Require => "require",
			SslMode::VerifyCa => "verify-ca",
			SslMode::VerifyFull => "verify-full",
		}
	}
}

impl fmt::Display for SslMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SslMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"disable" => Ok(SslMode::Disable),
			"prefer" => Ok(SslMode::Prefer),
			"require" => Ok(SslMode::Require),
			"verify-ca" => Ok(SslMode::VerifyCa),
			"verify-full" => Ok(SslMode::VerifyFull),
			other => Err(format!("Unknown sslmode: {}", other)),
		}
	}
}

/// Per-database connection pool bounds
///
/// Timeouts are in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
	pub max_connections: u32,
	pub min_connections: u32,
	pub acquire_timeout: u64,
	pub idle_timeout: u64,
	pub max_lifetime: u64,
	/// Ping a pooled connection before handing it out
	pub test_before_acquire: bool,
}

impl PoolSettings {
	pub fn with_max_connections(mut self, max: u32) -> Self {
		self.max_connections = max;
		self
	}

	pub fn with_min_connections(mut self, min: u32) -> Self {
		self.min_connections = min;
		self
	}

	pub fn acquire_timeout_duration(&self) -> Duration {
		Duration::from_secs(self.acquire_timeout)
	}

	pub fn idle_timeout_duration(&self) -> Duration {
		Duration::from_secs(self.idle_timeout)
	}

	pub fn max_lifetime_duration(&self) -> Duration {
		Duration::from_secs(self.max_lifetime)
	}

	/// Validate the configuration
	pub fn validate(&self) -> SettingsResult<()> {
		if self.max_connections == 0 {
			return Err(SettingsError::Validation(
				"pool.max_connections must be greater than 0".to_string(),
			));
		}
		if self.min_connections > self.max_connections {
			return Err(SettingsError::Validation(
				"pool.min_connections cannot exceed pool.max_connections".to_string(),
			));
		}
		if self.acquire_timeout == 0 {
			return Err(SettingsError::Validation(
				"pool.acquire_timeout must be greater than 0".to_string(),
			));
		}
		Ok(())
	}
}

impl Default for PoolSettings {
	fn default() -> Self {
		Self {
			max_connections: 10,
			min_connections: 0,
			acquire_timeout: 30,
			idle_timeout: 600,
			max_lifetime: 1800,
			test_before_acquire: true,
		}
	}
}

/// How a privilege held on only some tables of a schema is read back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartialCoverageMode {
	/// Report the negation of the previously declared value so the next
	/// update re-applies the declaration to the whole schema
	#[default]
	Toggle,
	/// Keep the previously declared value and flag the privilege as drifted
	Report,
}

impl FromStr for PartialCoverageMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"toggle" => Ok(PartialCoverageMode::Toggle),
			"report" => Ok(PartialCoverageMode::Report),
			other => Err(format!("Unknown partial coverage mode: {}", other)),
		}
	}
}

/// Coverage assigned to a schema that contains no tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptySchemaCoverage {
	#[default]
	Ungranted,
	Granted,
}

impl EmptySchemaCoverage {
	pub fn fraction(&self) -> f64 {
		match self {
			EmptySchemaCoverage::Ungranted => 0.0,
			EmptySchemaCoverage::Granted => 1.0,
		}
	}
}

impl FromStr for EmptySchemaCoverage {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"ungranted" => Ok(EmptySchemaCoverage::Ungranted),
			"granted" => Ok(EmptySchemaCoverage::Granted),
			other => Err(format!("Unknown empty schema coverage: {}", other)),
		}
	}
}

/// Interpretation rules applied by the reconciler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReconcileSettings {
	pub partial_coverage: PartialCoverageMode,
	pub empty_schema_coverage: EmptySchemaCoverage,
	/// Owner id of protected system schemas
	pub system_owner_id: i64,
}

impl ReconcileSettings {
	pub fn with_partial_coverage(mut self, mode: PartialCoverageMode) -> Self {
		self.partial_coverage = mode;
		self
	}

	pub fn with_empty_schema_coverage(mut self, coverage: EmptySchemaCoverage) -> Self {
		self.empty_schema_coverage = coverage;
		self
	}

	pub fn with_system_owner_id(mut self, owner_id: i64) -> Self {
		self.system_owner_id = owner_id;
		self
	}
}

impl Default for ReconcileSettings {
	fn default() -> Self {
		Self {
			partial_coverage: PartialCoverageMode::Toggle,
			empty_schema_coverage: EmptySchemaCoverage::Ungranted,
			system_owner_id: DEFAULT_SYSTEM_OWNER_ID,
		}
	}
}
