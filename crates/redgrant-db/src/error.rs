//! Database errors

/// Errors raised by catalog access and statement execution
///
/// Driver error text is preserved so callers see exactly what the cluster
/// reported.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
	#[error("SQL error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Statement `{sql}` failed: {source}")]
	Statement {
		sql: String,
		#[source]
		source: sqlx::Error,
	},

	#[error("Statement `{sql}` was rejected: {message}")]
	Rejected { sql: String, message: String },

	#[error("Failed to decode catalog value: {0}")]
	Decode(String),
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DatabaseError>;
