//! Data Control Language (DCL) support
//!
//! This module provides type-safe builders for the statements the reconciler
//! issues: `GRANT`, `REVOKE` and `ALTER DEFAULT PRIVILEGES`.
//!
//! # Examples
//!
//! ```
//! use redgrant_query::dcl::{Grantee, ObjectType, Privilege};
//!
//! let privilege = Privilege::Usage;
//! assert_eq!(privilege.as_sql(), "USAGE");
//!
//! let object_type = ObjectType::AllTablesInSchema;
//! assert_eq!(object_type.as_sql(), "ALL TABLES IN SCHEMA");
//!
//! let grantee = Grantee::group("analysts");
//! assert_eq!(grantee.name(), "analysts");
//! ```

mod default_privileges;
mod grant;
mod grantee;
mod object;
mod privilege;
mod revoke;

#[cfg(test)]
mod tests;

pub use default_privileges::{AlterDefaultPrivilegesStatement, DefaultPrivilegeAction};
pub use grant::GrantStatement;
pub use grantee::Grantee;
pub use object::ObjectType;
pub use privilege::Privilege;
pub use revoke::RevokeStatement;

use crate::backend::QueryBuilder;

/// Rendering entry point shared by every DCL statement
pub trait DclStatementBuilder {
	/// Render the statement with a dynamically chosen backend
	fn build_any(&self, query_builder: &dyn QueryBuilder) -> String;

	/// Render the statement with the given backend
	///
	/// # Examples
	///
	/// ```
	/// use redgrant_query::prelude::*;
	///
	/// let stmt = RevokeStatement::new()
	///     .privilege(Privilege::Create)
	///     .on_schema("analytics")
	///     .from(Grantee::group("analysts"));
	///
	/// assert_eq!(
	///     stmt.to_string(RedshiftQueryBuilder::new()),
	///     "REVOKE CREATE ON SCHEMA analytics FROM GROUP analysts"
	/// );
	/// ```
	fn to_string<T: QueryBuilder>(&self, query_builder: T) -> String
	where
		Self: Sized,
	{
		self.build_any(&query_builder)
	}
}

impl DclStatementBuilder for GrantStatement {
	fn build_any(&self, query_builder: &dyn QueryBuilder) -> String {
		query_builder.build_grant(self)
	}
}

impl DclStatementBuilder for RevokeStatement {
	fn build_any(&self, query_builder: &dyn QueryBuilder) -> String {
		query_builder.build_revoke(self)
	}
}

impl DclStatementBuilder for AlterDefaultPrivilegesStatement {
	fn build_any(&self, query_builder: &dyn QueryBuilder) -> String {
		query_builder.build_alter_default_privileges(self)
	}
}

/// Any statement the reconciler can hand to a catalog for execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DclStatement {
	Grant(GrantStatement),
	Revoke(RevokeStatement),
	AlterDefaultPrivileges(AlterDefaultPrivilegesStatement),
}

impl DclStatement {
	/// Validate the wrapped statement
	pub fn validate(&self) -> Result<(), String> {
		match self {
			DclStatement::Grant(stmt) => stmt.validate(),
			DclStatement::Revoke(stmt) => stmt.validate(),
			DclStatement::AlterDefaultPrivileges(stmt) => stmt.validate(),
		}
	}
}

fn validate_names(objects: &[String], grantees: &[Grantee]) -> Result<(), String> {
	if objects.iter().any(String::is_empty) {
		return Err("Object names must not be empty".to_string());
	}
	if grantees.iter().any(|g| g.name().is_empty()) {
		return Err("Grantee names must not be empty".to_string());
	}
	Ok(())
}

impl DclStatementBuilder for DclStatement {
	fn build_any(&self, query_builder: &dyn QueryBuilder) -> String {
		match self {
			DclStatement::Grant(stmt) => stmt.build_any(query_builder),
			DclStatement::Revoke(stmt) => stmt.build_any(query_builder),
			DclStatement::AlterDefaultPrivileges(stmt) => stmt.build_any(query_builder),
		}
	}
}

impl From<GrantStatement> for DclStatement {
	fn from(stmt: GrantStatement) -> Self {
		DclStatement::Grant(stmt)
	}
}

impl From<RevokeStatement> for DclStatement {
	fn from(stmt: RevokeStatement) -> Self {
		DclStatement::Revoke(stmt)
	}
}

impl From<AlterDefaultPrivilegesStatement> for DclStatement {
	fn from(stmt: AlterDefaultPrivilegesStatement) -> Self {
		DclStatement::AlterDefaultPrivileges(stmt)
	}
}
