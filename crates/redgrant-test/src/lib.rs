//! # redgrant-test
//!
//! Testing utilities for the privilege reconciler.
//!
//! - [`MemoryCatalog`]: an in-memory Redshift-like catalog that applies
//!   DCL statements to ACL strings, with transactional staging, a
//!   statement log and failure injection
//! - [`MockConnector`]: a `mockall` mock of the catalog connector
//! - [`fixtures`]: `rstest` fixtures with a small pre-populated cluster
//! - [`logging`]: `tracing` output for tests
//!
//! ## Example
//!
//! ```
//! use redgrant_test::MemoryCatalog;
//!
//! let catalog = MemoryCatalog::new()
//!     .with_group(12, "analysts")
//!     .with_schema(5, "analytics", 100)
//!     .with_table(5, "orders", 100);
//!
//! catalog.grant_on_table(5, "orders", "analysts", 'r');
//! assert!(catalog.table_acl(5, "orders").unwrap().has_group_privilege("analysts", 'r'));
//! ```

pub mod fixtures;
pub mod logging;
pub mod memory;
pub mod mock;

pub use memory::{MemoryCatalog, MemoryTransaction};
pub use mock::MockConnector;
