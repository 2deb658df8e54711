//! ALTER DEFAULT PRIVILEGES statement builder

use super::{Grantee, ObjectType, Privilege};

/// Direction of a default-privilege change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultPrivilegeAction {
	Grant,
	Revoke,
}

impl DefaultPrivilegeAction {
	pub fn as_sql(&self) -> &'static str {
		match self {
			DefaultPrivilegeAction::Grant => "GRANT",
			DefaultPrivilegeAction::Revoke => "REVOKE",
		}
	}

	/// Preposition introducing the grantee list
	pub fn preposition(&self) -> &'static str {
		match self {
			DefaultPrivilegeAction::Grant => "TO",
			DefaultPrivilegeAction::Revoke => "FROM",
		}
	}
}

/// ALTER DEFAULT PRIVILEGES statement builder
///
/// Changes the privileges applied to tables created in the future. Without
/// [`for_user`](Self::for_user) the change applies to tables created by the
/// connecting user.
///
/// # Examples
///
/// ```
/// use redgrant_query::dcl::{AlterDefaultPrivilegesStatement, Grantee, Privilege};
///
/// let stmt = AlterDefaultPrivilegesStatement::grant()
///     .for_user("etl")
///     .in_schema("analytics")
///     .privilege(Privilege::Select)
///     .grantee(Grantee::group("analysts"));
///
/// assert!(stmt.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterDefaultPrivilegesStatement {
	/// GRANT or REVOKE
	pub action: DefaultPrivilegeAction,
	/// Owners whose future objects are affected (`FOR USER ...`)
	pub target_users: Vec<String>,
	/// Schemas the change is limited to (`IN SCHEMA ...`)
	pub schemas: Vec<String>,
	/// List of privileges to grant or revoke
	pub privileges: Vec<Privilege>,
	/// List of grantees
	pub grantees: Vec<Grantee>,
}

impl AlterDefaultPrivilegesStatement {
	/// Create a new default-privilege statement for the given action
	pub fn new(action: DefaultPrivilegeAction) -> Self {
		Self {
			action,
			target_users: Vec::new(),
			schemas: Vec::new(),
			privileges: Vec::new(),
			grantees: Vec::new(),
		}
	}

	/// Shorthand for `new(DefaultPrivilegeAction::Grant)`
	pub fn grant() -> Self {
		Self::new(DefaultPrivilegeAction::Grant)
	}

	/// Shorthand for `new(DefaultPrivilegeAction::Revoke)`
	pub fn revoke() -> Self {
		Self::new(DefaultPrivilegeAction::Revoke)
	}

	/// Limit the change to objects created by this user
	pub fn for_user(mut self, user: impl Into<String>) -> Self {
		self.target_users.push(user.into());
		self
	}

	/// Limit the change to objects created in this schema
	pub fn in_schema(mut self, schema: impl Into<String>) -> Self {
		self.schemas.push(schema.into());
		self
	}

	/// Add a single privilege
	pub fn privilege(mut self, privilege: Privilege) -> Self {
		self.privileges.push(privilege);
		self
	}

	/// Set all privileges at once
	pub fn privileges(mut self, privileges: Vec<Privilege>) -> Self {
		self.privileges = privileges;
		self
	}

	/// Add a single grantee
	pub fn grantee(mut self, grantee: Grantee) -> Self {
		self.grantees.push(grantee);
		self
	}

	/// Object type the statement applies to; always future `TABLES`
	pub fn object_type(&self) -> ObjectType {
		ObjectType::Tables
	}

	/// Validate the statement
	///
	/// # Validation Rules
	///
	/// 1. At least one privilege must be specified
	/// 2. At least one grantee must be specified
	/// 3. Privilege must be valid for tables
	/// 4. Schema, owner and grantee names must not be empty
	pub fn validate(&self) -> Result<(), String> {
		if self.privileges.is_empty() {
			return Err("At least one privilege must be specified".to_string());
		}

		if self.grantees.is_empty() {
			return Err("At least one grantee must be specified".to_string());
		}

		for privilege in &self.privileges {
			if !privilege.is_valid_for_object(ObjectType::Tables) {
				return Err(format!(
					"Privilege {:?} is not valid for default privileges on tables",
					privilege
				));
			}
		}

		if self.target_users.iter().any(String::is_empty) {
			return Err("Target user names must not be empty".to_string());
		}

		super::validate_names(&self.schemas, &self.grantees)
	}
}
