//! Redshift query builder backend
//!
//! Redshift speaks the PostgreSQL wire protocol but its DCL differs: group
//! grantees are written `GROUP name`, and default privileges are scoped with
//! `FOR USER`.

use super::{QueryBuilder, SqlWriter};
use crate::dcl::{
	AlterDefaultPrivilegesStatement, GrantStatement, Grantee, ObjectType, RevokeStatement,
};

/// Redshift query builder
///
/// Identifiers go through [`pg_escape::quote_identifier`], which leaves plain
/// lower-case names bare and double-quotes everything else.
///
/// # Examples
///
/// ```
/// use redgrant_query::backend::{QueryBuilder, RedshiftQueryBuilder};
/// use redgrant_query::dcl::{Grantee, Privilege, RevokeStatement};
///
/// let builder = RedshiftQueryBuilder::new();
/// let stmt = RevokeStatement::new()
///     .privilege(Privilege::Select)
///     .on_all_tables_in_schema("Sales Data")
///     .from(Grantee::group("analysts"));
///
/// assert_eq!(
///     builder.build_revoke(&stmt),
///     "REVOKE SELECT ON ALL TABLES IN SCHEMA \"Sales Data\" FROM GROUP analysts"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RedshiftQueryBuilder;

impl RedshiftQueryBuilder {
	/// Create a new Redshift query builder
	pub fn new() -> Self {
		Self
	}

	fn push_grantees(&self, writer: &mut SqlWriter, grantees: &[Grantee]) {
		writer.push_list(grantees, ", ", |w, grantee| {
			w.push("GROUP ");
			w.push_identifier(grantee.name(), |s| self.escape_iden(s));
		});
	}

	fn push_on_clause(&self, writer: &mut SqlWriter, object_type: ObjectType, objects: &[String]) {
		writer.push_keyword("ON");
		writer.push_space();
		writer.push(object_type.as_sql());
		if object_type.takes_objects() {
			writer.push_space();
			writer.push_list(objects, ", ", |w, obj| {
				w.push_identifier(obj, |s| self.escape_iden(s));
			});
		}
	}
}

impl QueryBuilder for RedshiftQueryBuilder {
	fn build_grant(&self, stmt: &GrantStatement) -> String {
		let mut writer = SqlWriter::new();

		writer.push("GRANT");
		writer.push_space();
		writer.push_list(&stmt.privileges, ", ", |w, privilege| {
			w.push(privilege.as_sql());
		});

		self.push_on_clause(&mut writer, stmt.object_type, &stmt.objects);

		writer.push_keyword("TO");
		writer.push_space();
		self.push_grantees(&mut writer, &stmt.grantees);

		writer.into_string()
	}

	fn build_revoke(&self, stmt: &RevokeStatement) -> String {
		let mut writer = SqlWriter::new();

		writer.push("REVOKE");
		writer.push_space();
		writer.push_list(&stmt.privileges, ", ", |w, privilege| {
			w.push(privilege.as_sql());
		});

		self.push_on_clause(&mut writer, stmt.object_type, &stmt.objects);

		writer.push_keyword("FROM");
		writer.push_space();
		self.push_grantees(&mut writer, &stmt.grantees);

		writer.into_string()
	}

	fn build_alter_default_privileges(&self, stmt: &AlterDefaultPrivilegesStatement) -> String {
		let mut writer = SqlWriter::new();

		writer.push("ALTER DEFAULT PRIVILEGES");

		if !stmt.target_users.is_empty() {
			writer.push_keyword("FOR USER");
			writer.push_space();
			writer.push_list(&stmt.target_users, ", ", |w, user| {
				w.push_identifier(user, |s| self.escape_iden(s));
			});
		}

		if !stmt.schemas.is_empty() {
			writer.push_keyword("IN SCHEMA");
			writer.push_space();
			writer.push_list(&stmt.schemas, ", ", |w, schema| {
				w.push_identifier(schema, |s| self.escape_iden(s));
			});
		}

		writer.push_keyword(stmt.action.as_sql());
		writer.push_space();
		writer.push_list(&stmt.privileges, ", ", |w, privilege| {
			w.push(privilege.as_sql());
		});

		self.push_on_clause(&mut writer, stmt.object_type(), &[]);

		writer.push_keyword(stmt.action.preposition());
		writer.push_space();
		self.push_grantees(&mut writer, &stmt.grantees);

		writer.into_string()
	}

	fn escape_iden(&self, ident: &str) -> String {
		pg_escape::quote_identifier(ident).into_owned()
	}
}
