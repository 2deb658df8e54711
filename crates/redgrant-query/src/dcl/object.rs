//! Database object types for DCL statements

/// Database object types for DCL statements
///
/// # Examples
///
/// ```
/// use redgrant_query::dcl::ObjectType;
///
/// assert_eq!(ObjectType::Schema.as_sql(), "SCHEMA");
/// assert_eq!(ObjectType::Tables.as_sql(), "TABLES");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
	/// A schema itself (`ON SCHEMA name`)
	Schema,
	/// Every table currently in a schema (`ON ALL TABLES IN SCHEMA name`)
	AllTablesInSchema,
	/// Future tables, only valid inside `ALTER DEFAULT PRIVILEGES`
	Tables,
}

impl ObjectType {
	/// Returns the SQL keyword for this object type
	pub fn as_sql(&self) -> &'static str {
		match self {
			ObjectType::Schema => "SCHEMA",
			ObjectType::AllTablesInSchema => "ALL TABLES IN SCHEMA",
			ObjectType::Tables => "TABLES",
		}
	}

	/// Whether statements on this object type name explicit objects
	///
	/// `TABLES` inside `ALTER DEFAULT PRIVILEGES` is scoped by the enclosing
	/// `IN SCHEMA` clause instead.
	pub fn takes_objects(&self) -> bool {
		!matches!(self, ObjectType::Tables)
	}
}
