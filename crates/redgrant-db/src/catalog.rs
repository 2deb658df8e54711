//! Catalog accessor
//!
//! The reconciler never touches a driver directly. It opens a
//! [`CatalogTransaction`] through a [`CatalogConnector`], performs every
//! lookup and statement of one operation on it, then commits or rolls back.
//!
//! Ids are compared as `i64` throughout; the catalog's `oid`/`int4`
//! columns are widened by the implementation.

use async_trait::async_trait;
use redgrant_query::dcl::DclStatement;

use crate::acl::AclList;
use crate::error::DbResult;

/// A schema as recorded in the namespace catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaInfo {
	pub id: i64,
	pub name: String,
	pub owner_id: i64,
}

/// One open catalog transaction
///
/// Dropping a transaction without calling [`commit`](Self::commit) discards
/// everything executed on it.
#[async_trait]
pub trait CatalogTransaction: Send {
	/// Look up a schema by id
	async fn schema_by_id(&mut self, schema_id: i64) -> DbResult<Option<SchemaInfo>>;

	/// Look up a schema by name
	async fn schema_by_name(&mut self, name: &str) -> DbResult<Option<SchemaInfo>>;

	/// Resolve a group id to its name
	async fn group_name(&mut self, group_id: i64) -> DbResult<Option<String>>;

	/// Resolve a user id to its name
	async fn user_name(&mut self, user_id: i64) -> DbResult<Option<String>>;

	/// The id of the user this transaction runs as
	async fn current_user_id(&mut self) -> DbResult<i64>;

	/// ACL of the schema itself
	async fn schema_acl(&mut self, schema_id: i64) -> DbResult<AclList>;

	/// ACLs of every non-index relation in the schema, one per relation
	async fn table_acls(&mut self, schema_id: i64) -> DbResult<Vec<AclList>>;

	/// Default ACL for tables created in the schema by `owner_id`
	///
	/// `None` when no default privileges were ever altered for that pair.
	async fn default_acl(&mut self, schema_id: i64, owner_id: i64) -> DbResult<Option<AclList>>;

	/// Execute a DCL statement
	async fn execute(&mut self, statement: &DclStatement) -> DbResult<()>;

	/// Make everything executed on this transaction visible
	async fn commit(self: Box<Self>) -> DbResult<()>;

	/// Discard everything executed on this transaction
	async fn rollback(self: Box<Self>) -> DbResult<()>;
}

/// Opens catalog transactions against a named database
#[async_trait]
pub trait CatalogConnector: Send + Sync {
	async fn begin(&self, database: &str) -> DbResult<Box<dyn CatalogTransaction>>;
}
