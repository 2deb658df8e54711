//! GRANT statement builder

use super::{Grantee, ObjectType, Privilege};

/// GRANT statement builder
///
/// # Examples
///
/// ```
/// use redgrant_query::dcl::{GrantStatement, Grantee, Privilege};
///
/// let stmt = GrantStatement::new()
///     .privilege(Privilege::Select)
///     .privilege(Privilege::Insert)
///     .on_all_tables_in_schema("analytics")
///     .to(Grantee::group("analysts"));
///
/// assert!(stmt.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantStatement {
	/// List of privileges to grant
	pub privileges: Vec<Privilege>,
	/// Type of object (SCHEMA, ALL TABLES IN SCHEMA)
	pub object_type: ObjectType,
	/// List of object names
	pub objects: Vec<String>,
	/// List of grantees
	pub grantees: Vec<Grantee>,
}

impl GrantStatement {
	/// Create a new empty GRANT statement
	pub fn new() -> Self {
		Self {
			privileges: Vec::new(),
			object_type: ObjectType::AllTablesInSchema,
			objects: Vec::new(),
			grantees: Vec::new(),
		}
	}

	/// Add a single privilege to grant
	pub fn privilege(mut self, privilege: Privilege) -> Self {
		self.privileges.push(privilege);
		self
	}

	/// Set all privileges at once
	pub fn privileges(mut self, privileges: Vec<Privilege>) -> Self {
		self.privileges = privileges;
		self
	}

	/// Set the object type
	pub fn object_type(mut self, object_type: ObjectType) -> Self {
		self.object_type = object_type;
		self
	}

	/// Add a single object
	pub fn object(mut self, object: impl Into<String>) -> Self {
		self.objects.push(object.into());
		self
	}

	/// Convenience method: Grant on a SCHEMA
	///
	/// # Examples
	///
	/// ```
	/// use redgrant_query::dcl::{GrantStatement, ObjectType, Privilege};
	///
	/// let stmt = GrantStatement::new()
	///     .privilege(Privilege::Usage)
	///     .on_schema("analytics");
	///
	/// assert_eq!(stmt.object_type, ObjectType::Schema);
	/// assert_eq!(stmt.objects, vec!["analytics".to_string()]);
	/// ```
	pub fn on_schema(mut self, schema: impl Into<String>) -> Self {
		self.object_type = ObjectType::Schema;
		self.objects.push(schema.into());
		self
	}

	/// Convenience method: Grant on ALL TABLES IN SCHEMA
	pub fn on_all_tables_in_schema(mut self, schema: impl Into<String>) -> Self {
		self.object_type = ObjectType::AllTablesInSchema;
		self.objects.push(schema.into());
		self
	}

	/// Add a single grantee
	pub fn to(mut self, grantee: Grantee) -> Self {
		self.grantees.push(grantee);
		self
	}

	/// Set all grantees at once
	pub fn grantees(mut self, grantees: Vec<Grantee>) -> Self {
		self.grantees = grantees;
		self
	}

	/// Validate the GRANT statement
	///
	/// # Validation Rules
	///
	/// 1. At least one privilege must be specified
	/// 2. At least one object must be specified
	/// 3. At least one grantee must be specified
	/// 4. Privilege must be valid for the object type
	/// 5. Object and grantee names must not be empty
	pub fn validate(&self) -> Result<(), String> {
		if self.privileges.is_empty() {
			return Err("At least one privilege must be specified".to_string());
		}

		if self.objects.is_empty() {
			return Err("At least one object must be specified".to_string());
		}

		if self.grantees.is_empty() {
			return Err("At least one grantee must be specified".to_string());
		}

		for privilege in &self.privileges {
			if !privilege.is_valid_for_object(self.object_type) {
				return Err(format!(
					"Privilege {:?} is not valid for object type {:?}",
					privilege, self.object_type
				));
			}
		}

		super::validate_names(&self.objects, &self.grantees)
	}
}

impl Default for GrantStatement {
	fn default() -> Self {
		Self::new()
	}
}
