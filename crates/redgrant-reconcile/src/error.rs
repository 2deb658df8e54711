//! Reconciliation errors

use redgrant_db::DatabaseError;

use crate::binding::BindingKind;
use crate::privilege::PrivilegeKind;

/// Errors returned by reconciler operations
///
/// Validation errors are raised before any statement is executed. Catalog
/// errors keep the driver's message.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
	#[error("Must have at least 1 privilege")]
	NoPrivileges,

	#[error("{privilege} cannot be declared on a {kind} binding")]
	UnsupportedPrivilege {
		privilege: PrivilegeKind,
		kind: BindingKind,
	},

	#[error("Privileges cannot be granted on system schema {schema}")]
	SystemSchema { schema: String },

	#[error("Invalid binding identity '{input}': {reason}")]
	InvalidIdentity { input: String, reason: String },

	#[error("Refusing to execute invalid statement: {0}")]
	InvalidStatement(String),

	#[error("{entity} {id} not found")]
	NotFound { entity: &'static str, id: String },

	#[error("Failed to open transaction: {0}")]
	TransactionBegin(#[source] DatabaseError),

	#[error(transparent)]
	Catalog(#[from] DatabaseError),
}

impl ReconcileError {
	pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
		ReconcileError::NotFound {
			entity,
			id: id.to_string(),
		}
	}

	/// Whether the error was raised before touching the catalog
	pub fn is_validation(&self) -> bool {
		matches!(
			self,
			ReconcileError::NoPrivileges
				| ReconcileError::UnsupportedPrivilege { .. }
				| ReconcileError::SystemSchema { .. }
				| ReconcileError::InvalidIdentity { .. }
				| ReconcileError::InvalidStatement(_)
		)
	}
}

/// Result type for reconciler operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;
