//! `rstest` fixtures
//!
//! [`cluster`] builds a small cluster:
//!
//! | id | kind | name | notes |
//! |---|---|---|---|
//! | 1 | user | `rdsdb` | system owner |
//! | 100 | user | `admin` | connecting user |
//! | 101 | user | `etl` | |
//! | 12 | group | `analysts` | |
//! | 13 | group | `analysts_ro` | name extends `analysts` |
//! | 5 | schema | `analytics` | owned by `admin`; tables `orders`, `customers`, `events`; index `orders_pkey` |
//! | 6 | schema | `staging` | owned by `admin`, no tables |
//! | 11 | schema | `pg_catalog` | owned by the system user |
//! | 2200 | schema | `public` | owned by the system user; table `notes` |

use redgrant_db::DatabaseError;
use rstest::*;

use crate::memory::{DEFAULT_CURRENT_USER_ID, MemoryCatalog, SYSTEM_USER_ID};
use crate::mock::MockConnector;

pub const ADMIN_USER_ID: i64 = DEFAULT_CURRENT_USER_ID;
pub const ETL_USER_ID: i64 = 101;
pub const ANALYSTS_GROUP_ID: i64 = 12;
pub const ANALYSTS_RO_GROUP_ID: i64 = 13;
pub const ANALYTICS_SCHEMA_ID: i64 = 5;
pub const STAGING_SCHEMA_ID: i64 = 6;
pub const PG_CATALOG_SCHEMA_ID: i64 = 11;
pub const PUBLIC_SCHEMA_ID: i64 = 2200;

/// Tables of the `analytics` schema
pub const ANALYTICS_TABLES: [&str; 3] = ["orders", "customers", "events"];

#[fixture]
pub fn cluster() -> MemoryCatalog {
	MemoryCatalog::new()
		.with_user(ETL_USER_ID, "etl")
		.with_group(ANALYSTS_GROUP_ID, "analysts")
		.with_group(ANALYSTS_RO_GROUP_ID, "analysts_ro")
		.with_schema(ANALYTICS_SCHEMA_ID, "analytics", ADMIN_USER_ID)
		.with_table(ANALYTICS_SCHEMA_ID, "orders", ADMIN_USER_ID)
		.with_table(ANALYTICS_SCHEMA_ID, "customers", ADMIN_USER_ID)
		.with_table(ANALYTICS_SCHEMA_ID, "events", ETL_USER_ID)
		.with_index(ANALYTICS_SCHEMA_ID, "orders_pkey", ADMIN_USER_ID)
		.with_schema(STAGING_SCHEMA_ID, "staging", ADMIN_USER_ID)
		.with_schema(PG_CATALOG_SCHEMA_ID, "pg_catalog", SYSTEM_USER_ID)
		.with_schema(PUBLIC_SCHEMA_ID, "public", SYSTEM_USER_ID)
		.with_table(PUBLIC_SCHEMA_ID, "notes", ADMIN_USER_ID)
}

/// A connector whose transactions can never be opened
#[fixture]
pub fn unreachable_connector() -> MockConnector {
	let mut mock = MockConnector::new();
	mock.expect_begin().returning(|_| {
		Err(DatabaseError::Rejected {
			sql: "BEGIN".to_string(),
			message: "connection refused".to_string(),
		})
	});
	mock
}

#[cfg(test)]
mod tests {
	use super::*;
	use redgrant_db::CatalogConnector;

	#[rstest]
	#[tokio::test]
	async fn test_cluster_lists_only_tables(cluster: MemoryCatalog) {
		// Arrange
		let mut tx = cluster.begin("dev").await.unwrap();

		// Act
		let tables = tx.table_acls(ANALYTICS_SCHEMA_ID).await.unwrap();
		let staging = tx.table_acls(STAGING_SCHEMA_ID).await.unwrap();

		// Assert
		assert_eq!(tables.len(), ANALYTICS_TABLES.len());
		assert!(staging.is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_unreachable_connector(unreachable_connector: MockConnector) {
		// Act
		let result = unreachable_connector.begin("dev").await;

		// Assert
		assert!(matches!(result, Err(DatabaseError::Rejected { sql, .. }) if sql == "BEGIN"));
	}
}
