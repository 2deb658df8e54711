//! # Redgrant
//!
//! Declarative management of Redshift privileges held by groups.
//!
//! A binding ties one group to one schema and declares, per privilege kind,
//! whether the group should hold it. Two families exist:
//!
//! - **schema bindings** cover `SELECT`, `INSERT`, `UPDATE`, `DELETE` and
//!   `REFERENCES` on every table of the schema, plus `USAGE` and `CREATE` on
//!   the schema itself
//! - **default-privilege bindings** cover the five table privileges granted
//!   automatically on tables an owner creates in the schema later
//!
//! The [`Reconciler`] reads bindings back from the system catalogs, computes
//! the minimal set of `GRANT`/`REVOKE` statements to converge them, and runs
//! each operation in a single transaction.
//!
//! ## Crates
//!
//! - [`query`] - DCL statement builders and Redshift SQL rendering
//! - [`conf`] - TOML and environment settings
//! - [`db`] - connection pools, catalog queries and ACL decoding
//! - [`reconcile`] - binding model, diffing and the reconciler
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use redgrant::prelude::*;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load("redgrant.toml", &Env::default())?;
//! let registry = Arc::new(ConnectionRegistry::from_settings(&settings));
//! let reconciler = Reconciler::new(PgCatalog::new(registry.clone()), settings.reconcile);
//!
//! let desired = DesiredBinding::default_group(100_123, 105)
//!     .with_owner(100)
//!     .grant(PrivilegeKind::Select);
//! let binding = reconciler.create("analytics", &desired).await?;
//! println!("{} holds {:?}", binding.group_name, binding.privileges);
//!
//! registry.close_all().await;
//! # Ok(())
//! # }
//! ```

pub use redgrant_conf as conf;
pub use redgrant_db as db;
pub use redgrant_query as query;
pub use redgrant_reconcile as reconcile;

pub use redgrant_conf::{Env, Settings, SettingsError};
pub use redgrant_db::{ConnectionRegistry, DatabaseError, PgCatalog};
pub use redgrant_reconcile::{
	Binding, BindingId, BindingKind, DesiredBinding, PrivilegeKind, PrivilegeSet, ReadOutcome,
	ReconcileError, ReconcileResult, Reconciler,
};

/// Everything needed to configure and run a reconciler
pub mod prelude {
	pub use redgrant_conf::{
		EmptySchemaCoverage, Env, PartialCoverageMode, ReconcileSettings, Settings,
	};
	pub use redgrant_db::{CatalogConnector, CatalogTransaction, ConnectionRegistry, PgCatalog};
	pub use redgrant_reconcile::prelude::*;
}
