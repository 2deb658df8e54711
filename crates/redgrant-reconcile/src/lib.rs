//! # redgrant-reconcile
//!
//! Converges the privileges a Redshift group holds on a schema to a
//! declared state.
//!
//! Two binding families are supported:
//!
//! - [`BindingKind::SchemaGroup`]: `USAGE`/`CREATE` on the schema and
//!   `SELECT`, `INSERT`, `UPDATE`, `DELETE`, `REFERENCES` on all of its tables
//! - [`BindingKind::DefaultGroup`]: the table privileges applied to tables
//!   created in the schema in the future, optionally by one owner only
//!
//! A binding is identified by `schemaId_groupId[_ownerId]`
//! ([`BindingId`]). The [`Reconciler`] creates, reads, updates, deletes and
//! imports bindings, each operation inside a single catalog transaction.
//!
//! ## Example
//!
//! ```
//! use redgrant_reconcile::prelude::*;
//!
//! let desired = DesiredBinding::schema_group(5, 12)
//!     .grant(PrivilegeKind::Usage)
//!     .grant(PrivilegeKind::Select);
//!
//! assert_eq!(desired.id().to_string(), "5_12");
//!
//! let observed = PrivilegeSet::from_granted([PrivilegeKind::Usage]);
//! let actions = diff(BindingKind::SchemaGroup, &desired.privileges, &observed);
//! assert_eq!(actions, vec![Action::Grant(PrivilegeKind::Select)]);
//! ```

pub mod binding;
pub mod coverage;
pub mod desired;
pub mod diff;
pub mod error;
pub mod executor;
pub mod privilege;
pub mod reconciler;

pub use binding::{Binding, BindingId, BindingKind, ReadOutcome};
pub use coverage::{Coverage, CoverageDecision};
pub use desired::DesiredBinding;
pub use diff::{Action, blanket_revoke, diff, initial_grants};
pub use error::{ReconcileError, ReconcileResult};
pub use executor::Target;
pub use privilege::{PrivilegeKind, PrivilegeLevel, PrivilegeSet};
pub use reconciler::Reconciler;

/// Re-export commonly used types
pub mod prelude {
	pub use crate::binding::{Binding, BindingId, BindingKind, ReadOutcome};
	pub use crate::coverage::{Coverage, CoverageDecision};
	pub use crate::desired::DesiredBinding;
	pub use crate::diff::{Action, blanket_revoke, diff, initial_grants};
	pub use crate::error::{ReconcileError, ReconcileResult};
	pub use crate::privilege::{PrivilegeKind, PrivilegeLevel, PrivilegeSet};
	pub use crate::reconciler::Reconciler;
}
