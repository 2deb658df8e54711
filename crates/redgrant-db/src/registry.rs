//! Per-database connection registry
//!
//! A cluster hosts many databases and a connection is bound to exactly one
//! of them, so the registry keeps one pool per database name. Pools are
//! created lazily on first use and reused afterwards; connections are
//! health-checked before being handed out and recycled after
//! `pool.max_lifetime`.

use dashmap::DashMap;
use redgrant_conf::{ConnectionSettings, PoolSettings, Settings, SslMode};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};

fn ssl_mode(mode: SslMode) -> PgSslMode {
	match mode {
		SslMode::Disable => PgSslMode::Disable,
		SslMode::Prefer => PgSslMode::Prefer,
		SslMode::Require => PgSslMode::Require,
		SslMode::VerifyCa => PgSslMode::VerifyCa,
		SslMode::VerifyFull => PgSslMode::VerifyFull,
	}
}

/// Lazily populated map from database name to connection pool
pub struct ConnectionRegistry {
	connection: ConnectionSettings,
	pool: PoolSettings,
	pools: DashMap<String, PgPool>,
}

impl ConnectionRegistry {
	pub fn new(connection: ConnectionSettings, pool: PoolSettings) -> Self {
		Self {
			connection,
			pool,
			pools: DashMap::new(),
		}
	}

	pub fn from_settings(settings: &Settings) -> Self {
		Self::new(settings.connection.clone(), settings.pool.clone())
	}

	/// Connect options for `database`
	pub fn connect_options(&self, database: &str) -> PgConnectOptions {
		let conn = &self.connection;
		let mut options = PgConnectOptions::new()
			.host(&conn.host)
			.port(conn.port)
			.username(&conn.user)
			.password(conn.password.expose_secret())
			.database(database)
			.ssl_mode(ssl_mode(conn.sslmode))
			.application_name("redgrant");
		if let Some(millis) = conn.statement_timeout {
			options = options.options([("statement_timeout", millis.to_string())]);
		}
		options
	}

	/// The pool for `database`, created on first use
	///
	/// Creation does not connect; the first acquire does.
	pub fn pool(&self, database: &str) -> PgPool {
		if let Some(pool) = self.pools.get(database) {
			return pool.value().clone();
		}
		self.pools
			.entry(database.to_string())
			.or_insert_with(|| {
				tracing::debug!(
					database = %database,
					url = %self.describe(database),
					"creating connection pool"
				);
				PgPoolOptions::new()
					.min_connections(self.pool.min_connections)
					.max_connections(self.pool.max_connections)
					.acquire_timeout(self.pool.acquire_timeout_duration())
					.idle_timeout(self.pool.idle_timeout_duration())
					.max_lifetime(self.pool.max_lifetime_duration())
					.test_before_acquire(self.pool.test_before_acquire)
					.connect_lazy_with(self.connect_options(database))
			})
			.value()
			.clone()
	}

	/// Connection URL for `database` with the password masked
	/// Connection URL for `database` with the password masked
	pub fn describe(&self, database: &str) -> String {
		let conn = &self.connection;
		format!(
			"postgres://{}:***@{}:{}/{}?sslmode={}",
			conn.user, conn.host, conn.port, database, conn.sslmode
		)
	}

	pub fn contains(&self, database: &str) -> bool {
		self.pools.contains_key(database)
	}

	pub fn len(&self) -> usize {
		self.pools.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pools.is_empty()
	}

	/// Close and forget the pool for `database`
	pub async fn close(&self, database: &str) {
		if let Some((_, pool)) = self.pools.remove(database) {
			pool.close().await;
		}
	}

	/// Close and forget every pool
	pub async fn close_all(&self) {
		let names: Vec<String> = self.pools.iter().map(|e| e.key().clone()).collect();
		for name in names {
			self.close(&name).await;
		}
	}
}

impl std::fmt::Debug for ConnectionRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConnectionRegistry")
			.field("host", &self.connection.host)
			.field("port", &self.connection.port)
			.field("databases", &self.pools.len())
			.finish()
	}
}
