//! Catalog accessor over the PostgreSQL wire protocol
//!
//! Redshift speaks the PostgreSQL protocol and exposes the same system
//! catalogs (`pg_namespace`, `pg_class`, `pg_group`, `pg_user`,
//! `pg_default_acl`). Every literal is a bound parameter; ACL arrays are
//! fetched `|`-joined and decoded with [`AclList`].

use std::sync::Arc;

use async_trait::async_trait;
use redgrant_query::backend::RedshiftQueryBuilder;
use redgrant_query::dcl::{DclStatement, DclStatementBuilder};
use sqlx::{Postgres, Transaction};

use crate::acl::AclList;
use crate::catalog::{CatalogConnector, CatalogTransaction, SchemaInfo};
use crate::error::{DatabaseError, DbResult};
use crate::registry::ConnectionRegistry;

const SCHEMA_BY_ID: &str = "SELECT nsp.oid::bigint, nsp.nspname::text, nsp.nspowner::bigint \
	FROM pg_namespace nsp WHERE nsp.oid::bigint = $1";

const SCHEMA_BY_NAME: &str = "SELECT nsp.oid::bigint, nsp.nspname::text, nsp.nspowner::bigint \
	FROM pg_namespace nsp WHERE nsp.nspname = $1";

const GROUP_NAME: &str = "SELECT groname::text FROM pg_group WHERE grosysid::bigint = $1";

const USER_NAME: &str = "SELECT usename::text FROM pg_user WHERE usesysid::bigint = $1";

const CURRENT_USER_ID: &str =
	"SELECT usesysid::bigint FROM pg_user WHERE usename = current_user";

const SCHEMA_ACL: &str = "SELECT array_to_string(nsp.nspacl, '|') \
	FROM pg_namespace nsp WHERE nsp.oid::bigint = $1";

const TABLE_ACLS: &str = "SELECT array_to_string(cl.relacl, '|') \
	FROM pg_user pu JOIN pg_class cl ON pu.usesysid = cl.relowner \
	WHERE cl.relnamespace::bigint = $1 AND cl.relkind <> 'i'";

const DEFAULT_ACL: &str = "SELECT array_to_string(acl.defaclacl, '|') \
	FROM pg_default_acl acl \
	WHERE acl.defaclnamespace::bigint = $1 AND acl.defacluser::bigint = $2 \
	AND acl.defaclobjtype = 'r'";

/// Opens [`PgCatalogTransaction`]s using pools from a [`ConnectionRegistry`]
#[derive(Debug, Clone)]
pub struct PgCatalog {
	registry: Arc<ConnectionRegistry>,
}

impl PgCatalog {
	pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
		Self { registry }
	}

	pub fn registry(&self) -> &Arc<ConnectionRegistry> {
		&self.registry
	}
}

#[async_trait]
impl CatalogConnector for PgCatalog {
	async fn begin(&self, database: &str) -> DbResult<Box<dyn CatalogTransaction>> {
		let pool = self.registry.pool(database);
		let tx = pool.begin().await?;
		tracing::debug!(database = %database, "transaction opened");
		Ok(Box::new(PgCatalogTransaction::new(database, tx)))
	}
}

/// A catalog transaction on one database
///
/// Wraps a [`sqlx::Transaction`], which rolls back when dropped uncommitted.
pub struct PgCatalogTransaction {
	database: String,
	tx: Transaction<'static, Postgres>,
	builder: RedshiftQueryBuilder,
}

impl PgCatalogTransaction {
	pub fn new(database: impl Into<String>, tx: Transaction<'static, Postgres>) -> Self {
		Self {
			database: database.into(),
			tx,
			builder: RedshiftQueryBuilder::new(),
		}
	}

	async fn fetch_schema(&mut self, sql: &str, bind: SchemaKey<'_>) -> DbResult<Option<SchemaInfo>> {
		let query = sqlx::query_as::<_, (i64, String, i64)>(sql);
		let query = match bind {
			SchemaKey::Id(id) => query.bind(id),
			SchemaKey::Name(name) => query.bind(name),
		};
		let row = query.fetch_optional(&mut *self.tx).await?;
		Ok(row.map(|(id, name, owner_id)| SchemaInfo { id, name, owner_id }))
	}
}

enum SchemaKey<'a> {
	Id(i64),
	Name(&'a str),
}

#[async_trait]
impl CatalogTransaction for PgCatalogTransaction {
	async fn schema_by_id(&mut self, schema_id: i64) -> DbResult<Option<SchemaInfo>> {
		self.fetch_schema(SCHEMA_BY_ID, SchemaKey::Id(schema_id)).await
	}

	async fn schema_by_name(&mut self, name: &str) -> DbResult<Option<SchemaInfo>> {
		self.fetch_schema(SCHEMA_BY_NAME, SchemaKey::Name(name)).await
	}

	async fn group_name(&mut self, group_id: i64) -> DbResult<Option<String>> {
		Ok(sqlx::query_scalar::<_, String>(GROUP_NAME)
			.bind(group_id)
			.fetch_optional(&mut *self.tx)
			.await?)
	}

	async fn user_name(&mut self, user_id: i64) -> DbResult<Option<String>> {
		Ok(sqlx::query_scalar::<_, String>(USER_NAME)
			.bind(user_id)
			.fetch_optional(&mut *self.tx)
			.await?)
	}

	async fn current_user_id(&mut self) -> DbResult<i64> {
		sqlx::query_scalar::<_, i64>(CURRENT_USER_ID)
			.fetch_optional(&mut *self.tx)
			.await?
			.ok_or_else(|| DatabaseError::Decode("current_user is not listed in pg_user".to_string()))
	}

	async fn schema_acl(&mut self, schema_id: i64) -> DbResult<AclList> {
		let packed = sqlx::query_scalar::<_, Option<String>>(SCHEMA_ACL)
			.bind(schema_id)
			.fetch_optional(&mut *self.tx)
			.await?
			.flatten();
		Ok(AclList::from_nullable(packed.as_deref()))
	}

	async fn table_acls(&mut self, schema_id: i64) -> DbResult<Vec<AclList>> {
		let rows = sqlx::query_scalar::<_, Option<String>>(TABLE_ACLS)
			.bind(schema_id)
			.fetch_all(&mut *self.tx)
			.await?;
		Ok(rows
			.iter()
			.map(|packed| AclList::from_nullable(packed.as_deref()))
			.collect())
	}

	async fn default_acl(&mut self, schema_id: i64, owner_id: i64) -> DbResult<Option<AclList>> {
		let row = sqlx::query_scalar::<_, Option<String>>(DEFAULT_ACL)
			.bind(schema_id)
			.bind(owner_id)
			.fetch_optional(&mut *self.tx)
			.await?;
		Ok(row.map(|packed| AclList::from_nullable(packed.as_deref())))
	}

	async fn execute(&mut self, statement: &DclStatement) -> DbResult<()> {
		let sql = statement.build_any(&self.builder);
		tracing::debug!(database = %self.database, sql = %sql, "executing statement");
		sqlx::query(&sql)
			.execute(&mut *self.tx)
			.await
			.map_err(|source| DatabaseError::Statement {
				sql: sql.clone(),
				source,
			})?;
		Ok(())
	}

	async fn commit(self: Box<Self>) -> DbResult<()> {
		let this = *self;
		tracing::debug!(database = %this.database, "committing transaction");
		this.tx.commit().await?;
		Ok(())
	}

	async fn rollback(self: Box<Self>) -> DbResult<()> {
		let this = *self;
		tracing::debug!(database = %this.database, "rolling back transaction");
		this.tx.rollback().await?;
		Ok(())
	}
}
