//! Behavioural guarantees of the reconciler, exercised end to end against
//! the in-memory catalog.

use redgrant_conf::ReconcileSettings;
use redgrant_reconcile::prelude::*;
use redgrant_test::MemoryCatalog;
use redgrant_test::fixtures::*;
use redgrant_test::logging::init_test_logging;
use rstest::*;

const DATABASE: &str = "warehouse";

fn reconciler(catalog: &MemoryCatalog) -> Reconciler<MemoryCatalog> {
	init_test_logging();
	Reconciler::new(catalog.clone(), ReconcileSettings::default())
}

fn analysts_on_analytics() -> DesiredBinding {
	DesiredBinding::schema_group(ANALYTICS_SCHEMA_ID, ANALYSTS_GROUP_ID)
}

#[rstest]
#[tokio::test]
async fn test_update_with_unchanged_declaration_issues_nothing(cluster: MemoryCatalog) {
	// Arrange
	let reconciler = reconciler(&cluster);
	let desired = analysts_on_analytics()
		.grant(PrivilegeKind::Usage)
		.grant(PrivilegeKind::Select);
	let created = reconciler.create(DATABASE, &desired).await.unwrap();
	cluster.clear_statements();

	// Act
	let updated = reconciler.update(DATABASE, &desired, &created).await.unwrap();

	// Assert
	assert!(cluster.statements().is_empty());
	assert_eq!(updated, created);
}

#[rstest]
#[case(&[PrivilegeKind::Usage])]
#[case(&[PrivilegeKind::Select, PrivilegeKind::Usage])]
#[case(&[PrivilegeKind::Insert, PrivilegeKind::Delete, PrivilegeKind::Create])]
#[case(&PrivilegeKind::ALL)]
#[tokio::test]
async fn test_create_then_read_round_trips(cluster: MemoryCatalog, #[case] granted: &[PrivilegeKind]) {
	// Arrange
	let reconciler = reconciler(&cluster);
	let desired = granted
		.iter()
		.fold(analysts_on_analytics(), |d, kind| d.grant(*kind));
	let declared = desired.extract().unwrap();
	let created = reconciler.create(DATABASE, &desired).await.unwrap();

	// Act
	let read = reconciler
		.read(DATABASE, BindingKind::SchemaGroup, &created.id, Some(&declared))
		.await
		.unwrap();

	// Assert
	let binding = read.into_binding().unwrap();
	for kind in PrivilegeKind::ALL {
		assert_eq!(binding.privileges.get(kind), granted.contains(&kind), "{}", kind);
	}
	assert!(!binding.has_drift());
}

#[rstest]
#[tokio::test]
async fn test_failed_statement_rolls_back_whole_create(cluster: MemoryCatalog) {
	// Arrange
	let reconciler = reconciler(&cluster);
	let desired = analysts_on_analytics()
		.grant(PrivilegeKind::Select)
		.grant(PrivilegeKind::Insert)
		.grant(PrivilegeKind::Update)
		.grant(PrivilegeKind::Usage);
	cluster.fail_on("GRANT UPDATE");

	// Act
	let result = reconciler.create(DATABASE, &desired).await;

	// Assert
	assert!(matches!(result, Err(ReconcileError::Catalog(_))));
	assert_eq!(
		cluster.statements(),
		vec![
			"GRANT SELECT ON ALL TABLES IN SCHEMA analytics TO GROUP analysts".to_string(),
			"GRANT INSERT ON ALL TABLES IN SCHEMA analytics TO GROUP analysts".to_string(),
			"GRANT UPDATE ON ALL TABLES IN SCHEMA analytics TO GROUP analysts".to_string(),
		]
	);
	assert_eq!(cluster.commits(), 0);
	assert_eq!(cluster.rollbacks(), 1);

	cluster.clear_failures();
	let read = reconciler
		.read(DATABASE, BindingKind::SchemaGroup, &desired.id(), None)
		.await
		.unwrap()
		.into_binding()
		.unwrap();
	assert!(!read.privileges.any_granted());
	for table in ANALYTICS_TABLES {
		assert!(cluster.table_acl(ANALYTICS_SCHEMA_ID, table).unwrap().is_empty());
	}
}

#[rstest]
#[tokio::test]
async fn test_create_requires_a_granted_privilege(cluster: MemoryCatalog) {
	// Arrange
	let reconciler = reconciler(&cluster);
	let desired = analysts_on_analytics()
		.declare(PrivilegeKind::Select, false)
		.declare(PrivilegeKind::Usage, false);

	// Act
	let result = reconciler.create(DATABASE, &desired).await;

	// Assert
	assert!(matches!(result, Err(ReconcileError::NoPrivileges)));
	assert!(cluster.statements().is_empty());
	assert_eq!(cluster.commits(), 0);
	assert_eq!(cluster.rollbacks(), 1);
}

#[rstest]
#[tokio::test]
async fn test_update_requires_a_granted_privilege(cluster: MemoryCatalog) {
	// Arrange
	let reconciler = reconciler(&cluster);
	let created = reconciler
		.create(DATABASE, &analysts_on_analytics().grant(PrivilegeKind::Usage))
		.await
		.unwrap();
	cluster.clear_statements();
	let cleared = analysts_on_analytics().declare(PrivilegeKind::Usage, false);

	// Act
	let result = reconciler.update(DATABASE, &cleared, &created).await;

	// Assert
	assert!(matches!(result, Err(ReconcileError::NoPrivileges)));
	assert!(cluster.statements().is_empty());
	assert!(
		cluster
			.schema_acl(ANALYTICS_SCHEMA_ID)
			.unwrap()
			.has_group_privilege("analysts", 'U')
	);
}

#[rstest]
#[case::schema_group(DesiredBinding::schema_group(PG_CATALOG_SCHEMA_ID, ANALYSTS_GROUP_ID))]
#[case::default_group(DesiredBinding::default_group(PG_CATALOG_SCHEMA_ID, ANALYSTS_GROUP_ID))]
#[case::default_group_for_owner(
	DesiredBinding::default_group(PG_CATALOG_SCHEMA_ID, ANALYSTS_GROUP_ID).with_owner(ETL_USER_ID)
)]
#[tokio::test]
async fn test_system_schema_is_protected(cluster: MemoryCatalog, #[case] binding: DesiredBinding) {
	// Arrange
	let reconciler = reconciler(&cluster);
	let desired = binding.grant(PrivilegeKind::Select);

	// Act
	let result = reconciler.create(DATABASE, &desired).await;

	// Assert
	assert!(matches!(
		result,
		Err(ReconcileError::SystemSchema { ref schema }) if schema == "pg_catalog"
	));
	assert!(cluster.statements().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_public_schema_is_reconcilable(cluster: MemoryCatalog) {
	// Arrange
	let reconciler = reconciler(&cluster);
	let desired = DesiredBinding::schema_group(PUBLIC_SCHEMA_ID, ANALYSTS_GROUP_ID)
		.grant(PrivilegeKind::Usage)
		.grant(PrivilegeKind::Select);

	// Act
	let binding = reconciler.create(DATABASE, &desired).await.unwrap();

	// Assert
	assert_eq!(binding.schema_name, "public");
	assert!(binding.privileges.get(PrivilegeKind::Select));
	assert!(binding.privileges.get(PrivilegeKind::Usage));
	assert_eq!(cluster.commits(), 1);
}

#[rstest]
#[case::all_granted(&["orders", "customers", "events"], Some(false), true)]
#[case::none_granted(&[], Some(true), false)]
#[case::partial_after_grant(&["orders", "customers"], Some(true), false)]
#[case::partial_after_revoke(&["orders", "customers"], Some(false), true)]
#[case::partial_on_import(&["orders"], None, true)]
#[tokio::test]
async fn test_table_coverage_collapses_to_flag(
	cluster: MemoryCatalog,
	#[case] granted_on: &[&str],
	#[case] previous_select: Option<bool>,
	#[case] expected: bool,
) {
	// Arrange
	let reconciler = reconciler(&cluster);
	cluster.grant_on_schema(ANALYTICS_SCHEMA_ID, "analysts", 'U');
	for table in granted_on {
		cluster.grant_on_table(ANALYTICS_SCHEMA_ID, table, "analysts", 'r');
	}
	let previous = previous_select.map(|select| {
		PrivilegeSet::from_granted([PrivilegeKind::Usage]).with(PrivilegeKind::Select, select)
	});
	let id = BindingId::new(ANALYTICS_SCHEMA_ID, ANALYSTS_GROUP_ID);

	// Act
	let binding = reconciler
		.read(DATABASE, BindingKind::SchemaGroup, &id, previous.as_ref())
		.await
		.unwrap()
		.into_binding()
		.unwrap();

	// Assert
	assert_eq!(binding.privileges.get(PrivilegeKind::Select), expected);
	let partial = !granted_on.is_empty() && granted_on.len() < ANALYTICS_TABLES.len();
	assert_eq!(binding.drift.contains(&PrivilegeKind::Select), partial);
}

#[rstest]
#[tokio::test]
async fn test_delete_revokes_whole_vocabulary(cluster: MemoryCatalog) {
	// Arrange
	let reconciler = reconciler(&cluster);
	let created = reconciler
		.create(DATABASE, &analysts_on_analytics().grant(PrivilegeKind::Select))
		.await
		.unwrap();
	cluster.clear_statements();

	// Act
	reconciler
		.delete(DATABASE, BindingKind::SchemaGroup, &created.id)
		.await
		.unwrap();

	// Assert
	assert_eq!(
		cluster.statements(),
		vec![
			"REVOKE SELECT ON ALL TABLES IN SCHEMA analytics FROM GROUP analysts",
			"REVOKE INSERT ON ALL TABLES IN SCHEMA analytics FROM GROUP analysts",
			"REVOKE UPDATE ON ALL TABLES IN SCHEMA analytics FROM GROUP analysts",
			"REVOKE DELETE ON ALL TABLES IN SCHEMA analytics FROM GROUP analysts",
			"REVOKE REFERENCES ON ALL TABLES IN SCHEMA analytics FROM GROUP analysts",
			"REVOKE USAGE ON SCHEMA analytics FROM GROUP analysts",
			"REVOKE CREATE ON SCHEMA analytics FROM GROUP analysts",
		]
	);
	assert!(
		!reconciler
			.exists(DATABASE, BindingKind::SchemaGroup, "5_12")
			.await
			.unwrap()
	);
}

#[rstest]
#[tokio::test]
async fn test_import_matches_created_state(cluster: MemoryCatalog) {
	// Arrange
	let reconciler = reconciler(&cluster);
	let desired = DesiredBinding::schema_group(5, 12)
		.grant(PrivilegeKind::Usage)
		.grant(PrivilegeKind::Select)
		.grant(PrivilegeKind::References);
	let created = reconciler.create(DATABASE, &desired).await.unwrap();

	// Act
	let imported = reconciler
		.import(DATABASE, BindingKind::SchemaGroup, "5_12")
		.await
		.unwrap();

	// Assert
	assert_eq!(created.id.to_string(), "5_12");
	assert_eq!(imported, created);
}
