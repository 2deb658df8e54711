//! # redgrant-conf
//!
//! Settings for the privilege reconciler: how to reach the cluster, how
//! large the per-database connection pools may grow, and how ambiguous
//! catalog observations are interpreted.
//!
//! Settings are read from TOML and may be overridden from environment
//! variables carrying the `REDGRANT_` prefix.
//!
//! ## Example
//!
//! ```
//! use redgrant_conf::{PartialCoverageMode, Settings, SslMode};
//!
//! let settings = Settings::from_toml_str(
//!     r#"
//!     [connection]
//!     host = "cluster.example.com"
//!     user = "admin"
//!     password = "hunter2"
//!
//!     [reconcile]
//!     partial_coverage = "report"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(settings.connection.port, 5439);
//! assert_eq!(settings.connection.sslmode, SslMode::Require);
//! assert_eq!(settings.reconcile.partial_coverage, PartialCoverageMode::Report);
//! ```

pub mod env;
pub mod error;
pub mod settings;

pub use env::{ENV_PREFIX, Env};
pub use error::{SettingsError, SettingsResult};
pub use settings::{
	ConnectionSettings, EmptySchemaCoverage, PartialCoverageMode, PoolSettings,
	ReconcileSettings, Settings, SslMode,
};
