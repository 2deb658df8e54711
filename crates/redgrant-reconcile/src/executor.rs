//! Statement executor
//!
//! Renders actions into DCL statements for the binding's family and runs
//! them, in order, on the operation's transaction. The first failure
//! aborts the rest.

use redgrant_db::CatalogTransaction;
use redgrant_query::dcl::{
	AlterDefaultPrivilegesStatement, DclStatement, GrantStatement, Grantee, RevokeStatement,
};

use crate::binding::BindingKind;
use crate::diff::Action;
use crate::error::{ReconcileError, ReconcileResult};
use crate::privilege::PrivilegeLevel;

/// Resolved names a binding's statements are addressed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
	pub schema: String,
	pub group: String,
	/// `FOR USER` of default-privilege statements
	pub owner: Option<String>,
}

impl Target {
	pub fn new(schema: impl Into<String>, group: impl Into<String>) -> Self {
		Self {
			schema: schema.into(),
			group: group.into(),
			owner: None,
		}
	}

	pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
		self.owner = Some(owner.into());
		self
	}
}

/// Build the statement for one action
///
/// The statement is validated before it is returned; an empty name or a
/// privilege the family cannot hold is rejected.
///
/// # Examples
///
/// ```
/// use redgrant_query::prelude::*;
/// use redgrant_reconcile::{Action, BindingKind, PrivilegeKind, Target};
/// use redgrant_reconcile::executor::render;
///
/// let target = Target::new("analytics", "analysts").with_owner("etl");
/// let stmt = render(BindingKind::DefaultGroup, Action::Revoke(PrivilegeKind::Delete), &target)
///     .unwrap();
///
/// assert_eq!(
///     stmt.to_string(RedshiftQueryBuilder::new()),
///     "ALTER DEFAULT PRIVILEGES FOR USER etl IN SCHEMA analytics REVOKE DELETE ON TABLES FROM GROUP analysts"
/// );
/// ```
pub fn render(kind: BindingKind, action: Action, target: &Target) -> ReconcileResult<DclStatement> {
	let statement = build(kind, action, target);
	statement
		.validate()
		.map_err(ReconcileError::InvalidStatement)?;
	Ok(statement)
}

fn build(kind: BindingKind, action: Action, target: &Target) -> DclStatement {
	let privilege = action.kind().privilege();
	let grantee = Grantee::group(target.group.clone());

	match kind {
		BindingKind::SchemaGroup => {
			let on_schema = action.kind().level() == PrivilegeLevel::Schema;
			match action {
				Action::Grant(_) => {
					let stmt = GrantStatement::new().privilege(privilege).to(grantee);
					let stmt = if on_schema {
						stmt.on_schema(target.schema.clone())
					} else {
						stmt.on_all_tables_in_schema(target.schema.clone())
					};
					stmt.into()
				}
				Action::Revoke(_) => {
					let stmt = RevokeStatement::new().privilege(privilege).from(grantee);
					let stmt = if on_schema {
						stmt.on_schema(target.schema.clone())
					} else {
						stmt.on_all_tables_in_schema(target.schema.clone())
					};
					stmt.into()
				}
			}
		}
		BindingKind::DefaultGroup => {
			let stmt = match action {
				Action::Grant(_) => AlterDefaultPrivilegesStatement::grant(),
				Action::Revoke(_) => AlterDefaultPrivilegesStatement::revoke(),
			};
			let stmt = match &target.owner {
				Some(owner) => stmt.for_user(owner.clone()),
				None => stmt,
			};
			stmt.in_schema(target.schema.clone())
				.privilege(privilege)
				.grantee(grantee)
				.into()
		}
	}
}

/// Execute `actions` in order on `tx`
pub async fn apply(
	tx: &mut dyn CatalogTransaction,
	kind: BindingKind,
	target: &Target,
	actions: &[Action],
) -> ReconcileResult<()> {
	for action in actions {
		let statement = render(kind, *action, target)?;
		tracing::debug!(
			kind = %kind,
			schema = %target.schema,
			group = %target.group,
			action = ?action,
			"applying privilege change"
		);
		tx.execute(&statement).await?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::privilege::PrivilegeKind;
	use redgrant_query::prelude::*;
	use rstest::*;

	#[fixture]
	fn target() -> Target {
		Target::new("analytics", "analysts")
	}

	fn sql(stmt: &DclStatement) -> String {
		stmt.to_string(RedshiftQueryBuilder::new())
	}

	#[rstest]
	#[case(
		Action::Grant(PrivilegeKind::Select),
		"GRANT SELECT ON ALL TABLES IN SCHEMA analytics TO GROUP analysts"
	)]
	#[case(
		Action::Revoke(PrivilegeKind::References),
		"REVOKE REFERENCES ON ALL TABLES IN SCHEMA analytics FROM GROUP analysts"
	)]
	#[case(
		Action::Grant(PrivilegeKind::Usage),
		"GRANT USAGE ON SCHEMA analytics TO GROUP analysts"
	)]
	#[case(
		Action::Revoke(PrivilegeKind::Create),
		"REVOKE CREATE ON SCHEMA analytics FROM GROUP analysts"
	)]
	fn test_render_schema_group(target: Target, #[case] action: Action, #[case] expected: &str) {
		// Act
		let stmt = render(BindingKind::SchemaGroup, action, &target).unwrap();

		// Assert
		assert_eq!(sql(&stmt), expected);
	}

	#[rstest]
	fn test_render_default_group_without_owner(target: Target) {
		// Act
		let stmt = render(
			BindingKind::DefaultGroup,
			Action::Grant(PrivilegeKind::Insert),
			&target,
		)
		.unwrap();

		// Assert
		assert_eq!(
			sql(&stmt),
			"ALTER DEFAULT PRIVILEGES IN SCHEMA analytics GRANT INSERT ON TABLES TO GROUP analysts"
		);
	}

	#[rstest]
	fn test_render_quotes_names() {
		// Arrange
		let target = Target::new("Finance", "data team");

		// Act
		let stmt = render(
			BindingKind::SchemaGroup,
			Action::Grant(PrivilegeKind::Usage),
			&target,
		)
		.unwrap();

		// Assert
		assert_eq!(
			sql(&stmt),
			"GRANT USAGE ON SCHEMA \"Finance\" TO GROUP \"data team\""
		);
	}

	#[rstest]
	fn test_render_rejects_schema_privilege_as_default(target: Target) {
		// Act
		let result = render(
			BindingKind::DefaultGroup,
			Action::Grant(PrivilegeKind::Usage),
			&target,
		);

		// Assert
		assert!(matches!(
			result,
			Err(ReconcileError::InvalidStatement(ref reason)) if reason.contains("not valid")
		));
	}

	#[rstest]
	#[case(Target::new("", "analysts"))]
	#[case(Target::new("analytics", ""))]
	#[case(Target::new("analytics", "analysts").with_owner(""))]
	fn test_render_rejects_empty_names(#[case] target: Target) {
		// Act
		let result = render(
			BindingKind::DefaultGroup,
			Action::Revoke(PrivilegeKind::Select),
			&target,
		);

		// Assert
		assert!(matches!(result, Err(ReconcileError::InvalidStatement(_))));
	}

	#[rstest]
	#[tokio::test]
	async fn test_apply_stops_before_invalid_statement() {
		// Arrange
		let catalog = redgrant_test::MemoryCatalog::new()
			.with_group(12, "analysts")
			.with_schema(5, "analytics", 100);
		let mut tx = redgrant_db::CatalogConnector::begin(&catalog, "dev").await.unwrap();
		let actions = [
			Action::Grant(PrivilegeKind::Select),
			Action::Grant(PrivilegeKind::Create),
		];

		// Act
		let result = apply(
			tx.as_mut(),
			BindingKind::DefaultGroup,
			&Target::new("analytics", "analysts"),
			&actions,
		)
		.await;

		// Assert
		assert!(matches!(result, Err(ReconcileError::InvalidStatement(_))));
		assert_eq!(
			catalog.statements(),
			vec!["ALTER DEFAULT PRIVILEGES IN SCHEMA analytics GRANT SELECT ON TABLES TO GROUP analysts"]
		);
	}
}
