//! Grantee of DCL statements

/// Recipient of a GRANT or REVOKE
///
/// Privileges are only ever managed for user groups, rendered `GROUP name`.
///
/// # Examples
///
/// ```
/// use redgrant_query::dcl::Grantee;
///
/// let group = Grantee::group("analysts");
/// assert_eq!(group.name(), "analysts");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grantee {
	group: String,
}

impl Grantee {
	/// Create a group grantee
	pub fn group(name: impl Into<String>) -> Self {
		Self { group: name.into() }
	}

	/// Name of the group
	pub fn name(&self) -> &str {
		&self.group
	}
}
