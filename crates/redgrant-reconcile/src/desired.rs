//! Declared binding state

use serde::{Deserialize, Serialize};

use crate::binding::{BindingId, BindingKind};
use crate::error::{ReconcileError, ReconcileResult};
use crate::privilege::{PrivilegeKind, PrivilegeSet};

/// What the caller wants a binding to look like
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesiredBinding {
	pub kind: BindingKind,
	pub schema_id: i64,
	pub group_id: i64,
	/// Narrow default privileges to tables created by this user
	#[serde(default)]
	pub owner_id: Option<i64>,
	#[serde(default)]
	pub privileges: PrivilegeSet,
}

impl DesiredBinding {
	pub fn new(kind: BindingKind, schema_id: i64, group_id: i64) -> Self {
		Self {
			kind,
			schema_id,
			group_id,
			owner_id: None,
			privileges: PrivilegeSet::new(),
		}
	}

	pub fn schema_group(schema_id: i64, group_id: i64) -> Self {
		Self::new(BindingKind::SchemaGroup, schema_id, group_id)
	}

	pub fn default_group(schema_id: i64, group_id: i64) -> Self {
		Self::new(BindingKind::DefaultGroup, schema_id, group_id)
	}

	pub fn with_owner(mut self, owner_id: i64) -> Self {
		self.owner_id = Some(owner_id);
		self
	}

	/// Declare `kind` as granted
	pub fn grant(mut self, kind: PrivilegeKind) -> Self {
		self.privileges.set(kind, true);
		self
	}

	/// Declare `kind` with an explicit flag
	pub fn declare(mut self, kind: PrivilegeKind, granted: bool) -> Self {
		self.privileges.set(kind, granted);
		self
	}

	pub fn id(&self) -> BindingId {
		BindingId {
			schema_id: self.schema_id,
			group_id: self.group_id,
			owner_id: self.owner_id,
		}
	}

	/// Normalize the declaration to the family vocabulary
	///
	/// Every vocabulary kind gets an explicit flag (undeclared kinds are
	/// `false`). Fails when nothing is granted, when a kind outside the
	/// vocabulary is granted, or when an owner is given for a family that
	/// has none.
	pub fn extract(&self) -> ReconcileResult<PrivilegeSet> {
		if self.owner_id.is_some() && !self.kind.accepts_owner() {
			return Err(ReconcileError::InvalidIdentity {
				input: self.id().to_string(),
				reason: format!("{} bindings have no owner", self.kind),
			});
		}
		if let Some(privilege) = self
			.privileges
			.granted()
			.find(|privilege| !self.kind.supports(*privilege))
		{
			return Err(ReconcileError::UnsupportedPrivilege {
				privilege,
				kind: self.kind,
			});
		}
		let set: PrivilegeSet = self
			.kind
			.vocabulary()
			.iter()
			.map(|kind| (*kind, self.privileges.get(*kind)))
			.collect();
		if !set.any_granted() {
			return Err(ReconcileError::NoPrivileges);
		}
		Ok(set)
	}
}
