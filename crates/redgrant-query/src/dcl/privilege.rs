//! SQL privilege types for GRANT and REVOKE statements

use super::ObjectType;

/// SQL privilege types for GRANT and REVOKE statements
///
/// Only the privileges Redshift accepts on schemas and tables are modelled.
///
/// # Examples
///
/// ```
/// use redgrant_query::dcl::Privilege;
///
/// let privilege = Privilege::Select;
/// assert_eq!(privilege.as_sql(), "SELECT");
/// assert_eq!(privilege.acl_letter(), 'r');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Privilege {
	/// SELECT privilege - Read data from tables
	Select,
	/// INSERT privilege - Insert rows into tables
	Insert,
	/// UPDATE privilege - Modify rows in tables
	Update,
	/// DELETE privilege - Remove rows from tables
	Delete,
	/// REFERENCES privilege - Create foreign keys
	References,
	/// USAGE privilege - Look up objects within a schema
	Usage,
	/// CREATE privilege - Create objects within a schema
	Create,
}

impl Privilege {
	/// Returns the SQL keyword for this privilege
	///
	/// # Examples
	///
	/// ```
	/// use redgrant_query::dcl::Privilege;
	///
	/// assert_eq!(Privilege::References.as_sql(), "REFERENCES");
	/// ```
	pub fn as_sql(&self) -> &'static str {
		match self {
			Privilege::Select => "SELECT",
			Privilege::Insert => "INSERT",
			Privilege::Update => "UPDATE",
			Privilege::Delete => "DELETE",
			Privilege::References => "REFERENCES",
			Privilege::Usage => "USAGE",
			Privilege::Create => "CREATE",
		}
	}

	/// Returns the letter that encodes this privilege inside a packed ACL item
	///
	/// # Examples
	///
	/// ```
	/// use redgrant_query::dcl::Privilege;
	///
	/// assert_eq!(Privilege::Update.acl_letter(), 'w');
	/// assert_eq!(Privilege::Usage.acl_letter(), 'U');
	/// ```
	pub fn acl_letter(&self) -> char {
		match self {
			Privilege::Select => 'r',
			Privilege::Insert => 'a',
			Privilege::Update => 'w',
			Privilege::Delete => 'd',
			Privilege::References => 'x',
			Privilege::Usage => 'U',
			Privilege::Create => 'C',
		}
	}

	/// Checks if this privilege is valid for the given object type
	///
	/// # Examples
	///
	/// ```
	/// use redgrant_query::dcl::{ObjectType, Privilege};
	///
	/// assert!(Privilege::Select.is_valid_for_object(ObjectType::AllTablesInSchema));
	/// assert!(!Privilege::Select.is_valid_for_object(ObjectType::Schema));
	/// assert!(Privilege::Usage.is_valid_for_object(ObjectType::Schema));
	/// ```
	pub fn is_valid_for_object(&self, object_type: ObjectType) -> bool {
		match (self, object_type) {
			(
				Privilege::Select
				| Privilege::Insert
				| Privilege::Update
				| Privilege::Delete
				| Privilege::References,
				ObjectType::AllTablesInSchema | ObjectType::Tables,
			) => true,

			(Privilege::Usage | Privilege::Create, ObjectType::Schema) => true,

			_ => false,
		}
	}
}
