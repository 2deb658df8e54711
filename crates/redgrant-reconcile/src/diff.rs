//! Diff engine
//!
//! Actions are produced in vocabulary order and only for kinds whose
//! desired flag differs from the observed one, so applying an unchanged
//! declaration issues nothing.

use crate::binding::BindingKind;
use crate::privilege::{PrivilegeKind, PrivilegeSet};

/// One statement-worth of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
	Grant(PrivilegeKind),
	Revoke(PrivilegeKind),
}

impl Action {
	pub fn kind(&self) -> PrivilegeKind {
		match self {
			Action::Grant(kind) | Action::Revoke(kind) => *kind,
		}
	}

	pub fn is_grant(&self) -> bool {
		matches!(self, Action::Grant(_))
	}
}

/// Actions turning `observed` into `desired` over the family vocabulary
pub fn diff(kind: BindingKind, desired: &PrivilegeSet, observed: &PrivilegeSet) -> Vec<Action> {
	kind.vocabulary()
		.iter()
		.copied()
		.filter(|privilege| desired.get(*privilege) != observed.get(*privilege))
		.map(|privilege| {
			if desired.get(privilege) {
				Action::Grant(privilege)
			} else {
				Action::Revoke(privilege)
			}
		})
		.collect()
}

/// Grants for every desired kind, used when a binding is created
pub fn initial_grants(kind: BindingKind, desired: &PrivilegeSet) -> Vec<Action> {
	kind.vocabulary()
		.iter()
		.copied()
		.filter(|privilege| desired.get(*privilege))
		.map(Action::Grant)
		.collect()
}

/// Revokes for the whole family vocabulary, regardless of tracked state
pub fn blanket_revoke(kind: BindingKind) -> Vec<Action> {
	kind.vocabulary().iter().copied().map(Action::Revoke).collect()
}
