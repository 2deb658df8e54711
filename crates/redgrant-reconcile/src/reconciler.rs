//! Reconciler
//!
//! Every operation opens one catalog transaction, runs all of its lookups
//! and statements on it, and commits only if every step succeeded.
//! Failures roll back explicitly; a transaction dropped on an early return
//! rolls back on its own. Steps are awaited one after another and nothing
//! is retried.

use redgrant_conf::ReconcileSettings;
use redgrant_db::acl::coverage_fraction;
use redgrant_db::{CatalogConnector, CatalogTransaction, SchemaInfo};

use crate::binding::{Binding, BindingId, BindingKind, ReadOutcome};
use crate::coverage::Coverage;
use crate::desired::DesiredBinding;
use crate::diff::{blanket_revoke, diff, initial_grants};
use crate::error::{ReconcileError, ReconcileResult};
use crate::executor::{Target, apply};
use crate::privilege::{PrivilegeLevel, PrivilegeSet};

/// The only system-owned schema bindings may be created on
const PUBLIC_SCHEMA: &str = "public";

/// Names and ids a binding identity resolved to
struct Resolved {
	schema: SchemaInfo,
	group: String,
	owner: Option<String>,
	/// Owner whose default ACL a default-privilege binding reads
	default_acl_owner: Option<i64>,
}

impl Resolved {
	fn target(&self) -> Target {
		let target = Target::new(self.schema.name.clone(), self.group.clone());
		match &self.owner {
			Some(owner) => target.with_owner(owner.clone()),
			None => target,
		}
	}
}

/// Reconciles privilege bindings through a [`CatalogConnector`]
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use redgrant_conf::Settings;
/// use redgrant_db::{ConnectionRegistry, PgCatalog};
/// use redgrant_reconcile::prelude::*;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = Settings::from_file("redgrant.toml")?;
/// let registry = Arc::new(ConnectionRegistry::from_settings(&settings));
/// let reconciler = Reconciler::new(PgCatalog::new(registry), settings.reconcile);
///
/// let desired = DesiredBinding::schema_group(100_123, 105)
///     .grant(PrivilegeKind::Usage)
///     .grant(PrivilegeKind::Select);
/// let binding = reconciler.create("analytics", &desired).await?;
/// assert_eq!(binding.id.to_string(), "100123_105");
/// # Ok(())
/// # }
/// ```
pub struct Reconciler<C> {
	connector: C,
	settings: ReconcileSettings,
}

impl<C: CatalogConnector> Reconciler<C> {
	pub fn new(connector: C, settings: ReconcileSettings) -> Self {
		Self {
			connector,
			settings,
		}
	}

	pub fn connector(&self) -> &C {
		&self.connector
	}

	pub fn settings(&self) -> &ReconcileSettings {
		&self.settings
	}

	/// Whether the binding identified by `id` exists
	///
	/// A schema binding exists when the group appears in the ACL of the
	/// schema or of any of its tables; a default-privilege binding exists
	/// when the group appears in the default ACL for the owner.
	pub async fn exists(&self, database: &str, kind: BindingKind, id: &str) -> ReconcileResult<bool> {
		let id = BindingId::parse(kind, id)?;
		let mut tx = self.begin(database).await?;
		let result = self.exists_in(tx.as_mut(), kind, &id).await;
		self.finish(database, tx, result).await
	}

	/// Create a binding granting every declared privilege
	pub async fn create(&self, database: &str, desired: &DesiredBinding) -> ReconcileResult<Binding> {
		let mut tx = self.begin(database).await?;
		let result = self.create_in(tx.as_mut(), desired).await;
		let binding = self.finish(database, tx, result).await?;
		tracing::info!(
			database = %database,
			binding = %binding.id,
			kind = %binding.kind,
			"binding created"
		);
		Ok(binding)
	}

	/// Read the current state of a binding
	///
	/// `previous` is the last declared state; it decides how partial table
	/// coverage is reported. An identity whose schema, group or owner no
	/// longer exists reads as [`ReadOutcome::Absent`].
	pub async fn read(
		&self,
		database: &str,
		kind: BindingKind,
		id: &BindingId,
		previous: Option<&PrivilegeSet>,
	) -> ReconcileResult<ReadOutcome> {
		let mut tx = self.begin(database).await?;
		let result = self.read_in(tx.as_mut(), kind, id, previous).await;
		self.finish(database, tx, result).await
	}

	/// Converge a binding from `observed` to `desired`
	///
	/// Only kinds whose flag changed produce a statement. `observed` must
	/// be a state of the same binding.
	pub async fn update(
		&self,
		database: &str,
		desired: &DesiredBinding,
		observed: &Binding,
	) -> ReconcileResult<Binding> {
		let id = desired.id();
		if observed.id != id || observed.kind != desired.kind {
			return Err(ReconcileError::InvalidIdentity {
				input: observed.id.to_string(),
				reason: format!(
					"observed {} binding does not match declared {} binding {}",
					observed.kind, desired.kind, id
				),
			});
		}
		let mut tx = self.begin(database).await?;
		let result = self.update_in(tx.as_mut(), desired, observed).await;
		let binding = self.finish(database, tx, result).await?;
		tracing::info!(
			database = %database,
			binding = %binding.id,
			kind = %binding.kind,
			"binding updated"
		);
		Ok(binding)
	}

	/// Revoke every privilege the binding's family can hold
	pub async fn delete(&self, database: &str, kind: BindingKind, id: &BindingId) -> ReconcileResult<()> {
		let mut tx = self.begin(database).await?;
		let result = self.delete_in(tx.as_mut(), kind, id).await;
		self.finish(database, tx, result).await?;
		tracing::info!(database = %database, binding = %id, kind = %kind, "binding deleted");
		Ok(())
	}

	/// Read a binding from its identity string alone
	pub async fn import(&self, database: &str, kind: BindingKind, id: &str) -> ReconcileResult<Binding> {
		let parsed = BindingId::parse(kind, id)?;
		match self.read(database, kind, &parsed, None).await? {
			ReadOutcome::Present(binding) => Ok(binding),
			ReadOutcome::Absent => Err(ReconcileError::not_found("binding", id)),
		}
	}

	/// Look up a schema by name
	pub async fn lookup_schema(&self, database: &str, name: &str) -> ReconcileResult<SchemaInfo> {
		let mut tx = self.begin(database).await?;
		let result = match tx.schema_by_name(name).await {
			Ok(Some(schema)) => Ok(schema),
			Ok(None) => Err(ReconcileError::not_found("schema", name)),
			Err(e) => Err(e.into()),
		};
		self.finish(database, tx, result).await
	}

	async fn begin(&self, database: &str) -> ReconcileResult<Box<dyn CatalogTransaction>> {
		self.connector
			.begin(database)
			.await
			.map_err(ReconcileError::TransactionBegin)
	}

	/// Commit on success, roll back on failure
	async fn finish<T>(
		&self,
		database: &str,
		tx: Box<dyn CatalogTransaction>,
		result: ReconcileResult<T>,
	) -> ReconcileResult<T> {
		match result {
			Ok(value) => {
				tx.commit().await?;
				Ok(value)
			}
			Err(e) => {
				tracing::warn!(database = %database, error = %e, "rolling back transaction");
				if let Err(rollback_err) = tx.rollback().await {
					tracing::warn!(
						database = %database,
						error = %rollback_err,
						"rollback failed"
					);
				}
				Err(e)
			}
		}
	}

	async fn exists_in(
		&self,
		tx: &mut dyn CatalogTransaction,
		kind: BindingKind,
		id: &BindingId,
	) -> ReconcileResult<bool> {
		let Some(resolved) = self.resolve(tx, kind, id).await? else {
			return Ok(false);
		};
		let schema_id = resolved.schema.id;
		match kind {
			BindingKind::SchemaGroup => {
				if tx.schema_acl(schema_id).await?.contains_group(&resolved.group) {
					return Ok(true);
				}
				let tables = tx.table_acls(schema_id).await?;
				Ok(tables.iter().any(|acl| acl.contains_group(&resolved.group)))
			}
			BindingKind::DefaultGroup => {
				let owner_id = match resolved.default_acl_owner {
					Some(owner_id) => owner_id,
					None => return Ok(false),
				};
				Ok(tx
					.default_acl(schema_id, owner_id)
					.await?
					.is_some_and(|acl| acl.contains_group(&resolved.group)))
			}
		}
	}

	async fn create_in(
		&self,
		tx: &mut dyn CatalogTransaction,
		desired: &DesiredBinding,
	) -> ReconcileResult<Binding> {
		let privileges = desired.extract()?;
		let id = desired.id();

		let schema = tx
			.schema_by_id(id.schema_id)
			.await?
			.ok_or_else(|| ReconcileError::not_found("schema", id.schema_id))?;
		if self.is_system_schema(&schema) {
			return Err(ReconcileError::SystemSchema {
				schema: schema.name,
			});
		}
		let resolved = self
			.resolve_names(tx, desired.kind, &id, schema)
			.await?
			.ok_or_else(|| ReconcileError::not_found("binding", id))?;

		let actions = initial_grants(desired.kind, &privileges);
		apply(tx, desired.kind, &resolved.target(), &actions).await?;

		self.observe(tx, desired.kind, id, resolved, Some(&privileges))
			.await
	}

	async fn read_in(
		&self,
		tx: &mut dyn CatalogTransaction,
		kind: BindingKind,
		id: &BindingId,
		previous: Option<&PrivilegeSet>,
	) -> ReconcileResult<ReadOutcome> {
		match self.resolve(tx, kind, id).await? {
			Some(resolved) => {
				let binding = self.observe(tx, kind, *id, resolved, previous).await?;
				Ok(ReadOutcome::Present(binding))
			}
			None => {
				tracing::debug!(binding = %id, kind = %kind, "binding no longer resolves");
				Ok(ReadOutcome::Absent)
			}
		}
	}

	async fn update_in(
		&self,
		tx: &mut dyn CatalogTransaction,
		desired: &DesiredBinding,
		observed: &Binding,
	) -> ReconcileResult<Binding> {
		let privileges = desired.extract()?;
		let id = desired.id();
		let resolved = self
			.resolve(tx, desired.kind, &id)
			.await?
			.ok_or_else(|| ReconcileError::not_found("binding", id))?;

		let actions = diff(desired.kind, &privileges, &observed.privileges);
		if actions.is_empty() {
			tracing::debug!(binding = %id, "binding already converged");
		}
		apply(tx, desired.kind, &resolved.target(), &actions).await?;

		self.observe(tx, desired.kind, id, resolved, Some(&privileges))
			.await
	}

	async fn delete_in(
		&self,
		tx: &mut dyn CatalogTransaction,
		kind: BindingKind,
		id: &BindingId,
	) -> ReconcileResult<()> {
		let resolved = self
			.resolve(tx, kind, id)
			.await?
			.ok_or_else(|| ReconcileError::not_found("binding", id))?;
		apply(tx, kind, &resolved.target(), &blanket_revoke(kind)).await
	}

	fn is_system_schema(&self, schema: &SchemaInfo) -> bool {
		schema.owner_id == self.settings.system_owner_id && schema.name != PUBLIC_SCHEMA
	}

	/// Resolve every id of the identity, `None` if any is gone
	async fn resolve(
		&self,
		tx: &mut dyn CatalogTransaction,
		kind: BindingKind,
		id: &BindingId,
	) -> ReconcileResult<Option<Resolved>> {
		match tx.schema_by_id(id.schema_id).await? {
			Some(schema) => self.resolve_names(tx, kind, id, schema).await,
			None => Ok(None),
		}
	}

	async fn resolve_names(
		&self,
		tx: &mut dyn CatalogTransaction,
		kind: BindingKind,
		id: &BindingId,
		schema: SchemaInfo,
	) -> ReconcileResult<Option<Resolved>> {
		let Some(group) = tx.group_name(id.group_id).await? else {
			return Ok(None);
		};
		let (owner, default_acl_owner) = match (kind, id.owner_id) {
			(BindingKind::SchemaGroup, _) => (None, None),
			(BindingKind::DefaultGroup, Some(owner_id)) => match tx.user_name(owner_id).await? {
				Some(name) => (Some(name), Some(owner_id)),
				None => return Ok(None),
			},
			(BindingKind::DefaultGroup, None) => (None, Some(tx.current_user_id().await?)),
		};
		Ok(Some(Resolved {
			schema,
			group,
			owner,
			default_acl_owner,
		}))
	}

	/// Read the privilege flags of a resolved binding
	async fn observe(
		&self,
		tx: &mut dyn CatalogTransaction,
		kind: BindingKind,
		id: BindingId,
		resolved: Resolved,
		previous: Option<&PrivilegeSet>,
	) -> ReconcileResult<Binding> {
		let mut privileges = PrivilegeSet::new();
		let mut drift = std::collections::BTreeSet::new();
		let schema_id = resolved.schema.id;
		let group = resolved.group.as_str();

		match kind {
			BindingKind::SchemaGroup => {
				let schema_acl = tx.schema_acl(schema_id).await?;
				let tables = tx.table_acls(schema_id).await?;
				for privilege in kind.vocabulary() {
					let letter = privilege.acl_letter();
					let granted = match privilege.level() {
						PrivilegeLevel::Schema => schema_acl.has_group_privilege(group, letter),
						PrivilegeLevel::Table => {
							let fraction = coverage_fraction(&tables, group, letter)
								.unwrap_or_else(|| self.settings.empty_schema_coverage.fraction());
							let declared = previous.and_then(|p| p.declared(*privilege));
							let decision = Coverage::from_fraction(fraction)
								.decide(declared, self.settings.partial_coverage);
							if decision.drift {
								tracing::warn!(
									binding = %id,
									privilege = %privilege,
									coverage = fraction,
									"privilege is held on only some tables"
								);
								drift.insert(*privilege);
							}
							decision.granted
						}
					};
					privileges.set(*privilege, granted);
				}
			}
			BindingKind::DefaultGroup => {
				let acl = match resolved.default_acl_owner {
					Some(owner_id) => tx.default_acl(schema_id, owner_id).await?,
					None => None,
				}
				.unwrap_or_default();
				for privilege in kind.vocabulary() {
					privileges.set(
						*privilege,
						acl.has_group_privilege(group, privilege.acl_letter()),
					);
				}
			}
		}

		Ok(Binding {
			id,
			kind,
			schema_name: resolved.schema.name,
			group_name: resolved.group,
			owner_name: resolved.owner,
			privileges,
			drift,
		})
	}
}
