//! `mockall` mocks of the catalog seams

use mockall::mock;
use redgrant_db::{CatalogConnector, CatalogTransaction, DbResult};

mock! {
	/// Mock implementation of [`CatalogConnector`]
	///
	/// Useful for failures the in-memory catalog cannot express, such as
	/// asserting which database a transaction was opened against.
	///
	/// ```rust
	/// use redgrant_db::{CatalogConnector, DatabaseError};
	/// use redgrant_test::MockConnector;
	///
	/// #[tokio::main]
	/// async fn main() {
	///     let mut mock = MockConnector::new();
	///     mock.expect_begin()
	///         .withf(|database| database.to_string() == "warehouse")
	///         .times(1)
	///         .returning(|_| {
	///             Err(DatabaseError::Rejected {
	///                 sql: "BEGIN".to_string(),
	///                 message: "too many connections".to_string(),
	///             })
	///         });
	///
	///     assert!(mock.begin("warehouse").await.is_err());
	/// }
	/// ```
	pub Connector {}

	#[async_trait::async_trait]
	impl CatalogConnector for Connector {
		async fn begin(&self, database: &str) -> DbResult<Box<dyn CatalogTransaction>>;
	}
}
