//! # redgrant-query
//!
//! Typed builders for the Data Control Language statements issued by the
//! privilege reconciler, and the SQL backend that renders them for Redshift.
//!
//! Statements are built from validated identifiers and rendered through a
//! [`QueryBuilder`](backend::QueryBuilder), which passes every identifier
//! through [`pg_escape::quote_identifier`].
//!
//! ## Example
//!
//! ```
//! use redgrant_query::prelude::*;
//!
//! let stmt = GrantStatement::new()
//!     .privilege(Privilege::Select)
//!     .on_all_tables_in_schema("analytics")
//!     .to(Grantee::group("analysts"));
//!
//! assert_eq!(
//!     stmt.to_string(RedshiftQueryBuilder::new()),
//!     "GRANT SELECT ON ALL TABLES IN SCHEMA analytics TO GROUP analysts"
//! );
//! ```

pub mod backend;
pub mod dcl;

/// Re-export commonly used types
pub mod prelude {
	pub use crate::backend::{QueryBuilder, RedshiftQueryBuilder};
	pub use crate::dcl::{
		AlterDefaultPrivilegesStatement, DclStatement, DclStatementBuilder, DefaultPrivilegeAction,
		GrantStatement, Grantee, ObjectType, Privilege, RevokeStatement,
	};
}
