//! In-memory catalog
//!
//! [`MemoryCatalog`] models the parts of a Redshift cluster the reconciler
//! reads and writes: schemas with their tables, groups, users, and default
//! ACLs. Statements are applied to the ACL strings the same way the cluster
//! records them, so reads decode exactly what a real catalog would return.
//!
//! Each transaction works on a private copy of the catalog. Commit
//! publishes the copy; rollback or drop discards it. Every executed
//! statement is logged, committed or not.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use redgrant_db::{AclList, CatalogConnector, CatalogTransaction, DatabaseError, DbResult, SchemaInfo};
use redgrant_query::backend::RedshiftQueryBuilder;
use redgrant_query::dcl::{
	DclStatement, DclStatementBuilder, DefaultPrivilegeAction, Grantee, ObjectType, Privilege,
};

/// Id of the bootstrap superuser that owns system schemas
pub const SYSTEM_USER_ID: i64 = 1;

/// Id of the user transactions run as unless changed
pub const DEFAULT_CURRENT_USER_ID: i64 = 100;

#[derive(Debug, Clone)]
struct MemoryTable {
	owner_id: i64,
	index: bool,
	acl: AclList,
}

#[derive(Debug, Clone)]
struct MemorySchema {
	name: String,
	owner_id: i64,
	acl: AclList,
	tables: BTreeMap<String, MemoryTable>,
}

#[derive(Debug, Clone, Default)]
struct CatalogState {
	schemas: BTreeMap<i64, MemorySchema>,
	groups: BTreeMap<i64, String>,
	users: BTreeMap<i64, String>,
	default_acls: BTreeMap<(i64, i64), AclList>,
	current_user_id: i64,
}

#[derive(Debug, Default)]
struct Shared {
	state: CatalogState,
	statements: Vec<String>,
	fail_on: Option<String>,
	fail_begin: Option<String>,
	begun: usize,
	commits: usize,
	rollbacks: usize,
}

/// Shared handle to an in-memory catalog
///
/// Clones share state, so a test can keep one handle for inspection while
/// the reconciler owns another.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
	shared: Arc<Mutex<Shared>>,
}

impl Default for MemoryCatalog {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryCatalog {
	/// A catalog with the system user (`rdsdb`, id 1) and the connecting
	/// user (`admin`, id 100)
	pub fn new() -> Self {
		let mut state = CatalogState {
			current_user_id: DEFAULT_CURRENT_USER_ID,
			..CatalogState::default()
		};
		state.users.insert(SYSTEM_USER_ID, "rdsdb".to_string());
		state.users.insert(DEFAULT_CURRENT_USER_ID, "admin".to_string());
		Self {
			shared: Arc::new(Mutex::new(Shared {
				state,
				..Shared::default()
			})),
		}
	}

	pub fn with_user(self, id: i64, name: impl Into<String>) -> Self {
		self.shared.lock().state.users.insert(id, name.into());
		self
	}

	pub fn with_group(self, id: i64, name: impl Into<String>) -> Self {
		self.shared.lock().state.groups.insert(id, name.into());
		self
	}

	pub fn with_schema(self, id: i64, name: impl Into<String>, owner_id: i64) -> Self {
		self.shared.lock().state.schemas.insert(
			id,
			MemorySchema {
				name: name.into(),
				owner_id,
				acl: AclList::new(),
				tables: BTreeMap::new(),
			},
		);
		self
	}

	/// Add a table to an existing schema
	pub fn with_table(self, schema_id: i64, name: impl Into<String>, owner_id: i64) -> Self {
		self.add_relation(schema_id, name.into(), owner_id, false);
		self
	}

	/// Add an index, which carries an ACL but is not a table
	pub fn with_index(self, schema_id: i64, name: impl Into<String>, owner_id: i64) -> Self {
		self.add_relation(schema_id, name.into(), owner_id, true);
		self
	}

	/// Run subsequent transactions as `user_id`
	pub fn with_current_user(self, user_id: i64) -> Self {
		self.shared.lock().state.current_user_id = user_id;
		self
	}

	fn add_relation(&self, schema_id: i64, name: String, owner_id: i64, index: bool) {
		let mut shared = self.shared.lock();
		if let Some(schema) = shared.state.schemas.get_mut(&schema_id) {
			schema.tables.insert(
				name,
				MemoryTable {
					owner_id,
					index,
					acl: AclList::new(),
				},
			);
		}
	}

	/// Grant a privilege letter on one table outside any transaction
	pub fn grant_on_table(&self, schema_id: i64, table: &str, group: &str, letter: char) {
		let mut shared = self.shared.lock();
		let grantor = shared.state.grantor();
		if let Some(t) = shared
			.state
			.schemas
			.get_mut(&schema_id)
			.and_then(|s| s.tables.get_mut(table))
		{
			t.acl.grant_group(group, letter, &grantor);
		}
	}

	/// Revoke a privilege letter on one table outside any transaction
	pub fn revoke_on_table(&self, schema_id: i64, table: &str, group: &str, letter: char) {
		let mut shared = self.shared.lock();
		if let Some(t) = shared
			.state
			.schemas
			.get_mut(&schema_id)
			.and_then(|s| s.tables.get_mut(table))
		{
			t.acl.revoke_group(group, letter);
		}
	}

	/// Grant a privilege letter on a schema outside any transaction
	pub fn grant_on_schema(&self, schema_id: i64, group: &str, letter: char) {
		let mut shared = self.shared.lock();
		let grantor = shared.state.grantor();
		if let Some(schema) = shared.state.schemas.get_mut(&schema_id) {
			schema.acl.grant_group(group, letter, &grantor);
		}
	}

	/// Grant a default privilege letter outside any transaction
	pub fn grant_default(&self, schema_id: i64, owner_id: i64, group: &str, letter: char) {
		let mut shared = self.shared.lock();
		let grantor = shared.state.grantor();
		shared
			.state
			.default_acls
			.entry((schema_id, owner_id))
			.or_default()
			.grant_group(group, letter, &grantor);
	}

	pub fn rename_group(&self, id: i64, name: impl Into<String>) {
		let mut shared = self.shared.lock();
		let new_name = name.into();
		let Some(old_name) = shared.state.groups.insert(id, new_name.clone()) else {
			return;
		};
		for schema in shared.state.schemas.values_mut() {
			rename_in(&mut schema.acl, &old_name, &new_name);
			for table in schema.tables.values_mut() {
				rename_in(&mut table.acl, &old_name, &new_name);
			}
		}
		for acl in shared.state.default_acls.values_mut() {
			rename_in(acl, &old_name, &new_name);
		}
	}

	pub fn drop_group(&self, id: i64) {
		self.shared.lock().state.groups.remove(&id);
	}

	pub fn drop_schema(&self, id: i64) {
		self.shared.lock().state.schemas.remove(&id);
	}

	/// Fail every statement whose SQL contains `needle`
	pub fn fail_on(&self, needle: impl Into<String>) {
		self.shared.lock().fail_on = Some(needle.into());
	}

	/// Fail every attempt to open a transaction
	pub fn fail_begin(&self, message: impl Into<String>) {
		self.shared.lock().fail_begin = Some(message.into());
	}

	/// Stop injecting failures
	pub fn clear_failures(&self) {
		let mut shared = self.shared.lock();
		shared.fail_on = None;
		shared.fail_begin = None;
	}

	/// Every statement executed so far, in order
	pub fn statements(&self) -> Vec<String> {
		self.shared.lock().statements.clone()
	}

	pub fn clear_statements(&self) {
		self.shared.lock().statements.clear();
	}

	/// Number of transactions opened
	pub fn transactions_begun(&self) -> usize {
		self.shared.lock().begun
	}

	pub fn commits(&self) -> usize {
		self.shared.lock().commits
	}

	/// Number of transactions rolled back explicitly or dropped uncommitted
	pub fn rollbacks(&self) -> usize {
		self.shared.lock().rollbacks
	}

	/// Committed ACL of a schema
	pub fn schema_acl(&self, schema_id: i64) -> Option<AclList> {
		self.shared
			.lock()
			.state
			.schemas
			.get(&schema_id)
			.map(|s| s.acl.clone())
	}

	/// Committed ACL of a table
	pub fn table_acl(&self, schema_id: i64, table: &str) -> Option<AclList> {
		self.shared
			.lock()
			.state
			.schemas
			.get(&schema_id)
			.and_then(|s| s.tables.get(table))
			.map(|t| t.acl.clone())
	}

	/// Committed default ACL for tables created by `owner_id`
	pub fn default_acl(&self, schema_id: i64, owner_id: i64) -> Option<AclList> {
		self.shared
			.lock()
			.state
			.default_acls
			.get(&(schema_id, owner_id))
			.cloned()
	}
}

fn rename_in(acl: &mut AclList, old: &str, new: &str) {
	let Some(letters) = acl.group_privileges(old).map(str::to_string) else {
		return;
	};
	for letter in letters.chars() {
		acl.revoke_group(old, letter);
		acl.grant_group(new, letter, "rdsdb");
	}
}

#[async_trait]
impl CatalogConnector for MemoryCatalog {
	async fn begin(&self, database: &str) -> DbResult<Box<dyn CatalogTransaction>> {
		let mut shared = self.shared.lock();
		if let Some(message) = &shared.fail_begin {
			return Err(DatabaseError::Rejected {
				sql: "BEGIN".to_string(),
				message: message.clone(),
			});
		}
		shared.begun += 1;
		let staged = shared.state.clone();
		drop(shared);
		Ok(Box::new(MemoryTransaction {
			shared: Arc::clone(&self.shared),
			database: database.to_string(),
			staged,
			finished: false,
		}))
	}
}

/// A transaction on a [`MemoryCatalog`]
pub struct MemoryTransaction {
	shared: Arc<Mutex<Shared>>,
	database: String,
	staged: CatalogState,
	finished: bool,
}

impl MemoryTransaction {
	pub fn database(&self) -> &str {
		&self.database
	}
}

impl Drop for MemoryTransaction {
	fn drop(&mut self) {
		if !self.finished {
			self.shared.lock().rollbacks += 1;
		}
	}
}

#[async_trait]
impl CatalogTransaction for MemoryTransaction {
	async fn schema_by_id(&mut self, schema_id: i64) -> DbResult<Option<SchemaInfo>> {
		Ok(self
			.staged
			.schemas
			.get(&schema_id)
			.map(|s| schema_info(schema_id, s)))
	}

	async fn schema_by_name(&mut self, name: &str) -> DbResult<Option<SchemaInfo>> {
		Ok(self
			.staged
			.schemas
			.iter()
			.find(|(_, s)| s.name == name)
			.map(|(id, s)| schema_info(*id, s)))
	}

	async fn group_name(&mut self, group_id: i64) -> DbResult<Option<String>> {
		Ok(self.staged.groups.get(&group_id).cloned())
	}

	async fn user_name(&mut self, user_id: i64) -> DbResult<Option<String>> {
		Ok(self.staged.users.get(&user_id).cloned())
	}

	async fn current_user_id(&mut self) -> DbResult<i64> {
		Ok(self.staged.current_user_id)
	}

	async fn schema_acl(&mut self, schema_id: i64) -> DbResult<AclList> {
		Ok(self
			.staged
			.schemas
			.get(&schema_id)
			.map(|s| s.acl.clone())
			.unwrap_or_default())
	}

	async fn table_acls(&mut self, schema_id: i64) -> DbResult<Vec<AclList>> {
		let users = &self.staged.users;
		Ok(self
			.staged
			.schemas
			.get(&schema_id)
			.map(|s| {
				s.tables
					.values()
					.filter(|t| !t.index && users.contains_key(&t.owner_id))
					.map(|t| t.acl.clone())
					.collect()
			})
			.unwrap_or_default())
	}

	async fn default_acl(&mut self, schema_id: i64, owner_id: i64) -> DbResult<Option<AclList>> {
		Ok(self.staged.default_acls.get(&(schema_id, owner_id)).cloned())
	}

	async fn execute(&mut self, statement: &DclStatement) -> DbResult<()> {
		let sql = statement.build_any(&RedshiftQueryBuilder::new());
		let fail_on = {
			let mut shared = self.shared.lock();
			shared.statements.push(sql.clone());
			shared.fail_on.clone()
		};
		if fail_on.is_some_and(|needle| sql.contains(&needle)) {
			return Err(DatabaseError::Rejected {
				sql,
				message: "injected failure".to_string(),
			});
		}
		self.staged.apply(statement, &sql)
	}

	async fn commit(self: Box<Self>) -> DbResult<()> {
		let mut this = *self;
		this.finished = true;
		let staged = std::mem::take(&mut this.staged);
		let mut shared = this.shared.lock();
		shared.state = staged;
		shared.commits += 1;
		Ok(())
	}

	async fn rollback(self: Box<Self>) -> DbResult<()> {
		let mut this = *self;
		this.finished = true;
		this.shared.lock().rollbacks += 1;
		Ok(())
	}
}

fn schema_info(id: i64, schema: &MemorySchema) -> SchemaInfo {
	SchemaInfo {
		id,
		name: schema.name.clone(),
		owner_id: schema.owner_id,
	}
}

fn rejected(sql: &str, message: impl Into<String>) -> DatabaseError {
	DatabaseError::Rejected {
		sql: sql.to_string(),
		message: message.into(),
	}
}

/// ACL letter of a privilege, rejected when it does not apply to the object type
fn letter_for(privilege: Privilege, object_type: ObjectType, sql: &str) -> DbResult<char> {
	if !privilege.is_valid_for_object(object_type) {
		let object = match object_type {
			ObjectType::Schema => "schema",
			ObjectType::AllTablesInSchema | ObjectType::Tables => "relation",
		};
		return Err(rejected(
			sql,
			format!("invalid privilege type {} for {}", privilege.as_sql(), object),
		));
	}
	Ok(privilege.acl_letter())
}

impl CatalogState {
	fn grantor(&self) -> String {
		self.users
			.get(&self.current_user_id)
			.cloned()
			.unwrap_or_else(|| "rdsdb".to_string())
	}

	fn schema_id_by_name(&self, name: &str, sql: &str) -> DbResult<i64> {
		self.schemas
			.iter()
			.find(|(_, s)| s.name == name)
			.map(|(id, _)| *id)
			.ok_or_else(|| rejected(sql, format!("schema \"{}\" does not exist", name)))
	}

	fn user_id_by_name(&self, name: &str, sql: &str) -> DbResult<i64> {
		self.users
			.iter()
			.find(|(_, u)| u.as_str() == name)
			.map(|(id, _)| *id)
			.ok_or_else(|| rejected(sql, format!("user \"{}\" does not exist", name)))
	}

	fn group_names<'a>(&self, grantees: &'a [Grantee], sql: &str) -> DbResult<Vec<&'a str>> {
		grantees
			.iter()
			.map(|grantee| {
				let name = grantee.name();
				if self.groups.values().any(|g| g == name) {
					Ok(name)
				} else {
					Err(rejected(sql, format!("group \"{}\" does not exist", name)))
				}
			})
			.collect()
	}

	fn apply(&mut self, statement: &DclStatement, sql: &str) -> DbResult<()> {
		let grantor = self.grantor();
		match statement {
			DclStatement::Grant(stmt) => {
				let groups = self.group_names(&stmt.grantees, sql)?;
				for object in &stmt.objects {
					let schema_id = self.schema_id_by_name(object, sql)?;
					for privilege in &stmt.privileges {
						let letter = letter_for(*privilege, stmt.object_type, sql)?;
						for group in &groups {
							self.for_each_acl(schema_id, stmt.object_type, |acl| {
								acl.grant_group(group, letter, &grantor)
							});
						}
					}
				}
				Ok(())
			}
			DclStatement::Revoke(stmt) => {
				let groups = self.group_names(&stmt.grantees, sql)?;
				for object in &stmt.objects {
					let schema_id = self.schema_id_by_name(object, sql)?;
					for privilege in &stmt.privileges {
						let letter = letter_for(*privilege, stmt.object_type, sql)?;
						for group in &groups {
							self.for_each_acl(schema_id, stmt.object_type, |acl| {
								acl.revoke_group(group, letter)
							});
						}
					}
				}
				Ok(())
			}
			DclStatement::AlterDefaultPrivileges(stmt) => {
				let groups = self.group_names(&stmt.grantees, sql)?;
				let owners = match stmt.target_users.as_slice() {
					[] => vec![self.current_user_id],
					users => users
						.iter()
						.map(|user| self.user_id_by_name(user, sql))
						.collect::<DbResult<Vec<_>>>()?,
				};
				for schema in &stmt.schemas {
					let schema_id = self.schema_id_by_name(schema, sql)?;
					for owner_id in &owners {
						for privilege in &stmt.privileges {
							let letter = letter_for(*privilege, stmt.object_type(), sql)?;
							let acl = self.default_acls.entry((schema_id, *owner_id)).or_default();
							for group in &groups {
								match stmt.action {
									DefaultPrivilegeAction::Grant => acl.grant_group(group, letter, &grantor),
									DefaultPrivilegeAction::Revoke => acl.revoke_group(group, letter),
								}
							}
						}
					}
				}
				Ok(())
			}
		}
	}

	fn for_each_acl<F>(&mut self, schema_id: i64, object_type: ObjectType, mut f: F)
	where
		F: FnMut(&mut AclList),
	{
		let Some(schema) = self.schemas.get_mut(&schema_id) else {
			return;
		};
		match object_type {
			ObjectType::Schema => f(&mut schema.acl),
			ObjectType::AllTablesInSchema | ObjectType::Tables => {
				for table in schema.tables.values_mut().filter(|t| !t.index) {
					f(&mut table.acl);
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use redgrant_query::dcl::{AlterDefaultPrivilegesStatement, GrantStatement, RevokeStatement};
	use rstest::*;

	#[fixture]
	fn catalog() -> MemoryCatalog {
		MemoryCatalog::new()
			.with_user(101, "etl")
			.with_group(12, "analysts")
			.with_schema(5, "analytics", 100)
			.with_table(5, "orders", 100)
			.with_table(5, "customers", 101)
			.with_index(5, "orders_pkey", 100)
	}

	fn select_on_tables() -> DclStatement {
		GrantStatement::new()
			.privilege(Privilege::Select)
			.on_all_tables_in_schema("analytics")
			.to(Grantee::group("analysts"))
			.into()
	}

	#[rstest]
	#[tokio::test]
	async fn test_grant_on_all_tables_skips_indexes(catalog: MemoryCatalog) {
		// Arrange
		let mut tx = catalog.begin("dev").await.unwrap();

		// Act
		tx.execute(&select_on_tables()).await.unwrap();
		tx.commit().await.unwrap();

		// Assert
		assert!(catalog.table_acl(5, "orders").unwrap().has_group_privilege("analysts", 'r'));
		assert!(catalog.table_acl(5, "customers").unwrap().has_group_privilege("analysts", 'r'));
		assert!(catalog.table_acl(5, "orders_pkey").unwrap().is_empty());
		assert_eq!(
			catalog.statements(),
			vec!["GRANT SELECT ON ALL TABLES IN SCHEMA analytics TO GROUP analysts".to_string()]
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_uncommitted_changes_are_discarded_on_drop(catalog: MemoryCatalog) {
		// Arrange
		let mut tx = catalog.begin("dev").await.unwrap();

		// Act
		tx.execute(&select_on_tables()).await.unwrap();
		drop(tx);

		// Assert
		assert!(catalog.table_acl(5, "orders").unwrap().is_empty());
		assert_eq!(catalog.rollbacks(), 1);
		assert_eq!(catalog.commits(), 0);
	}

	#[rstest]
	#[tokio::test]
	async fn test_staged_changes_are_visible_inside_transaction(catalog: MemoryCatalog) {
		// Arrange
		let mut tx = catalog.begin("dev").await.unwrap();

		// Act
		tx.execute(&select_on_tables()).await.unwrap();
		let tables = tx.table_acls(5).await.unwrap();
		tx.rollback().await.unwrap();

		// Assert
		assert_eq!(tables.len(), 2);
		assert!(tables.iter().all(|acl| acl.has_group_privilege("analysts", 'r')));
		assert!(catalog.table_acl(5, "orders").unwrap().is_empty());
		assert_eq!(catalog.rollbacks(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_revoke_on_schema(catalog: MemoryCatalog) {
		// Arrange
		catalog.grant_on_schema(5, "analysts", 'U');
		catalog.grant_on_schema(5, "analysts", 'C');
		let stmt: DclStatement = RevokeStatement::new()
			.privilege(Privilege::Create)
			.on_schema("analytics")
			.from(Grantee::group("analysts"))
			.into();
		let mut tx = catalog.begin("dev").await.unwrap();

		// Act
		tx.execute(&stmt).await.unwrap();
		tx.commit().await.unwrap();

		// Assert
		let acl = catalog.schema_acl(5).unwrap();
		assert!(acl.has_group_privilege("analysts", 'U'));
		assert!(!acl.has_group_privilege("analysts", 'C'));
	}

	#[rstest]
	#[case(None, 100)]
	#[case(Some("etl"), 101)]
	#[tokio::test]
	async fn test_alter_default_privileges_targets_owner(
		catalog: MemoryCatalog,
		#[case] owner: Option<&str>,
		#[case] expected_owner_id: i64,
	) {
		// Arrange
		let stmt = AlterDefaultPrivilegesStatement::grant()
			.in_schema("analytics")
			.privilege(Privilege::Insert)
			.grantee(Grantee::group("analysts"));
		let stmt = match owner {
			Some(owner) => stmt.for_user(owner),
			None => stmt,
		};
		let mut tx = catalog.begin("dev").await.unwrap();

		// Act
		tx.execute(&stmt.into()).await.unwrap();
		tx.commit().await.unwrap();

		// Assert
		let acl = catalog.default_acl(5, expected_owner_id).unwrap();
		assert!(acl.has_group_privilege("analysts", 'a'));
	}

	#[rstest]
	#[tokio::test]
	async fn test_unknown_group_is_rejected(catalog: MemoryCatalog) {
		// Arrange
		let stmt: DclStatement = GrantStatement::new()
			.privilege(Privilege::Usage)
			.on_schema("analytics")
			.to(Grantee::group("nobody"))
			.into();
		let mut tx = catalog.begin("dev").await.unwrap();

		// Act
		let result = tx.execute(&stmt).await;

		// Assert
		assert!(matches!(
			result,
			Err(DatabaseError::Rejected { message, .. }) if message.contains("\"nobody\" does not exist")
		));
	}

	#[rstest]
	#[tokio::test]
	async fn test_invalid_privilege_for_object_is_rejected(catalog: MemoryCatalog) {
		// Arrange
		let stmt: DclStatement = GrantStatement::new()
			.privilege(Privilege::Usage)
			.on_all_tables_in_schema("analytics")
			.to(Grantee::group("analysts"))
			.into();
		let mut tx = catalog.begin("dev").await.unwrap();

		// Act
		let result = tx.execute(&stmt).await;

		// Assert
		assert!(matches!(result, Err(DatabaseError::Rejected { .. })));
	}

	#[rstest]
	#[tokio::test]
	async fn test_failure_injection(catalog: MemoryCatalog) {
		// Arrange
		catalog.fail_on("SELECT");
		let mut tx = catalog.begin("dev").await.unwrap();

		// Act
		let result = tx.execute(&select_on_tables()).await;

		// Assert
		assert!(matches!(
			result,
			Err(DatabaseError::Rejected { message, .. }) if message == "injected failure"
		));
		assert_eq!(catalog.statements().len(), 1);
	}

	#[rstest]
	#[tokio::test]
	async fn test_fail_begin(catalog: MemoryCatalog) {
		// Arrange
		catalog.fail_begin("connection refused");

		// Act
		let result = catalog.begin("dev").await;

		// Assert
		assert!(result.is_err());
		assert_eq!(catalog.transactions_begun(), 0);
	}

	#[rstest]
	fn test_rename_group_moves_acl_entries(catalog: MemoryCatalog) {
		// Arrange
		catalog.grant_on_table(5, "orders", "analysts", 'r');

		// Act
		catalog.rename_group(12, "analysts_v2");

		// Assert
		let acl = catalog.table_acl(5, "orders").unwrap();
		assert!(acl.has_group_privilege("analysts_v2", 'r'));
		assert!(!acl.contains_group("analysts"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_table_acls_skip_tables_of_dropped_owners() {
		// Arrange
		let catalog = MemoryCatalog::new()
			.with_schema(5, "analytics", 100)
			.with_table(5, "orders", 100)
			.with_table(5, "orphan", 999);
		let mut tx = catalog.begin("dev").await.unwrap();

		// Act
		let tables = tx.table_acls(5).await.unwrap();

		// Assert
		assert_eq!(tables.len(), 1);
	}
}
