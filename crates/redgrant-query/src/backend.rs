//! SQL Backend implementations
//!
//! Only Redshift is targeted. The trait stays object-safe so a catalog can
//! hold a `&dyn QueryBuilder` and tests can substitute their own renderer.

use crate::dcl::{AlterDefaultPrivilegesStatement, GrantStatement, RevokeStatement};

mod redshift;
mod sql_writer;

pub use redshift::RedshiftQueryBuilder;
pub use sql_writer::SqlWriter;

/// Query builder trait for generating SQL from DCL statements
///
/// # Examples
///
/// ```
/// use redgrant_query::backend::{QueryBuilder, RedshiftQueryBuilder};
/// use redgrant_query::dcl::{GrantStatement, Grantee, Privilege};
///
/// let builder = RedshiftQueryBuilder::new();
/// let stmt = GrantStatement::new()
///     .privilege(Privilege::Usage)
///     .on_schema("analytics")
///     .to(Grantee::group("analysts"));
///
/// assert_eq!(
///     builder.build_grant(&stmt),
///     "GRANT USAGE ON SCHEMA analytics TO GROUP analysts"
/// );
/// ```
pub trait QueryBuilder {
	/// Build GRANT statement
	fn build_grant(&self, stmt: &GrantStatement) -> String;

	/// Build REVOKE statement
	fn build_revoke(&self, stmt: &RevokeStatement) -> String;

	/// Build ALTER DEFAULT PRIVILEGES statement
	fn build_alter_default_privileges(&self, stmt: &AlterDefaultPrivilegesStatement) -> String;

	/// Quote an identifier for this dialect
	fn escape_iden(&self, ident: &str) -> String;
}

impl<T: QueryBuilder + ?Sized> QueryBuilder for &T {
	fn build_grant(&self, stmt: &GrantStatement) -> String {
		(**self).build_grant(stmt)
	}

	fn build_revoke(&self, stmt: &RevokeStatement) -> String {
		(**self).build_revoke(stmt)
	}

	fn build_alter_default_privileges(&self, stmt: &AlterDefaultPrivilegesStatement) -> String {
		(**self).build_alter_default_privileges(stmt)
	}

	fn escape_iden(&self, ident: &str) -> String {
		(**self).escape_iden(ident)
	}
}
