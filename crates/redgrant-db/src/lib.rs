//! # redgrant-db
//!
//! Database layer of the privilege reconciler.
//!
//! - [`acl`]: decoding of packed Redshift ACL strings
//! - [`catalog`]: the transactional catalog accessor the reconciler talks to
//! - [`postgres`]: the accessor implementation over the PostgreSQL wire protocol
//! - [`registry`]: one lazily created connection pool per target database
//!
//! ## Example
//!
//! ```
//! use redgrant_db::acl::AclList;
//!
//! let acl = AclList::parse("admin=arwdRxt/admin|group analysts=rx/admin");
//! assert!(acl.has_group_privilege("analysts", 'r'));
//! assert!(!acl.has_group_privilege("analysts", 'a'));
//! assert!(!acl.contains_group("analyst"));
//! ```

pub mod acl;
pub mod catalog;
pub mod error;
pub mod postgres;
pub mod registry;

pub use acl::AclList;
pub use catalog::{CatalogConnector, CatalogTransaction, SchemaInfo};
pub use error::{DatabaseError, DbResult};
pub use postgres::{PgCatalog, PgCatalogTransaction};
pub use registry::ConnectionRegistry;

/// Re-export commonly used types
pub mod prelude {
	pub use crate::acl::*;
	pub use crate::catalog::*;
	pub use crate::error::*;
	pub use crate::postgres::*;
	pub use crate::registry::*;
}
