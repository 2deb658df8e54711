//! REVOKE statement builder

use super::{Grantee, ObjectType, Privilege};

/// REVOKE statement builder
///
/// # Examples
///
/// ```
/// use redgrant_query::dcl::{Grantee, Privilege, RevokeStatement};
///
/// let stmt = RevokeStatement::new()
///     .privilege(Privilege::Insert)
///     .on_all_tables_in_schema("analytics")
///     .from(Grantee::group("analysts"));
///
/// assert!(stmt.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeStatement {
	/// List of privileges to revoke
	pub privileges: Vec<Privilege>,
	/// Type of object (SCHEMA, ALL TABLES IN SCHEMA)
	pub object_type: ObjectType,
	/// List of object names
	pub objects: Vec<String>,
	/// List of grantees
	pub grantees: Vec<Grantee>,
}

impl RevokeStatement {
	/// Create a new empty REVOKE statement
	pub fn new() -> Self {
		Self {
			privileges: Vec::new(),
			object_type: ObjectType::AllTablesInSchema,
			objects: Vec::new(),
			grantees: Vec::new(),
		}
	}

	/// Add a single privilege to revoke
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

	/// Convenience method: Revoke on a SCHEMA
	pub fn on_schema(mut self, schema: impl Into<String>) -> Self {
		self.object_type = ObjectType::Schema;
		self.objects.push(schema.into());
		self
	}

	/// Convenience method: Revoke on ALL TABLES IN SCHEMA
	pub fn on_all_tables_in_schema(mut self, schema: impl Into<String>) -> Self {
		self.object_type = ObjectType::AllTablesInSchema;
		self.objects.push(schema.into());
		self
	}

	/// Add a single grantee
	pub fn from(mut self, grantee: Grantee) -> Self {
		self.grantees.push(grantee);
		self
	}

	/// Set all grantees at once
	pub fn grantees(mut self, grantees: Vec<Grantee>) -> Self {
		self.grantees = grantees;
		self
	}

	/// Validate the REVOKE statement
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

impl Default for RevokeStatement {
	fn default() -> Self {
		Self::new()
	}
}
