//! Privilege vocabulary
//!
//! [`PrivilegeKind`] is the closed set of privileges a binding can declare,
//! ordered `SELECT, INSERT, UPDATE, DELETE, REFERENCES, USAGE, CREATE`.
//! [`PrivilegeSet`] maps each kind to a flag and iterates in that order, so
//! action lists and statement logs are reproducible.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use redgrant_query::dcl::Privilege;
use serde::{Deserialize, Serialize};

/// What a privilege applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrivilegeLevel {
	/// Granted on every table of a schema
	Table,
	/// Granted on the schema object itself
	Schema,
}

/// One privilege of the reconciled vocabulary
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PrivilegeKind {
	Select,
	Insert,
	Update,
	Delete,
	References,
	Usage,
	Create,
}

impl PrivilegeKind {
	/// Every kind, in vocabulary order
	pub const ALL: [PrivilegeKind; 7] = [
		PrivilegeKind::Select,
		PrivilegeKind::Insert,
		PrivilegeKind::Update,
		PrivilegeKind::Delete,
		PrivilegeKind::References,
		PrivilegeKind::Usage,
		PrivilegeKind::Create,
	];

	/// The DCL privilege this kind is granted as
	pub fn privilege(&self) -> Privilege {
		match self {
			PrivilegeKind::Select => Privilege::Select,
			PrivilegeKind::Insert => Privilege::Insert,
			PrivilegeKind::Update => Privilege::Update,
			PrivilegeKind::Delete => Privilege::Delete,
			PrivilegeKind::References => Privilege::References,
			PrivilegeKind::Usage => Privilege::Usage,
			PrivilegeKind::Create => Privilege::Create,
		}
	}

	/// The letter encoding this kind in a packed ACL
	pub fn acl_letter(&self) -> char {
		self.privilege().acl_letter()
	}

	pub fn level(&self) -> PrivilegeLevel {
		match self {
			PrivilegeKind::Usage | PrivilegeKind::Create => PrivilegeLevel::Schema,
			_ => PrivilegeLevel::Table,
		}
	}

	/// Lowercase name, as used in declarations
	pub fn name(&self) -> &'static str {
		match self {
			PrivilegeKind::Select => "select",
			PrivilegeKind::Insert => "insert",
			PrivilegeKind::Update => "update",
			PrivilegeKind::Delete => "delete",
			PrivilegeKind::References => "references",
			PrivilegeKind::Usage => "usage",
			PrivilegeKind::Create => "create",
		}
	}
}

impl fmt::Display for PrivilegeKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.privilege().as_sql())
	}
}

impl FromStr for PrivilegeKind {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		PrivilegeKind::ALL
			.into_iter()
			.find(|kind| kind.name().eq_ignore_ascii_case(s))
			.ok_or_else(|| format!("Unknown privilege: {}", s))
	}
}

/// A flag per privilege kind
///
/// Kinds that were never set read as `false`.
///
/// # Examples
///
/// ```
/// use redgrant_reconcile::{PrivilegeKind, PrivilegeSet};
///
/// let set = PrivilegeSet::from_granted([PrivilegeKind::Usage, PrivilegeKind::Select]);
/// assert!(set.get(PrivilegeKind::Select));
/// assert!(!set.get(PrivilegeKind::Insert));
/// assert_eq!(
///     set.granted().collect::<Vec<_>>(),
///     vec![PrivilegeKind::Select, PrivilegeKind::Usage]
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivilegeSet {
	flags: BTreeMap<PrivilegeKind, bool>,
}

impl PrivilegeSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// A set with exactly `kinds` granted
	pub fn from_granted<I>(kinds: I) -> Self
	where
		I: IntoIterator<Item = PrivilegeKind>,
	{
		Self {
			flags: kinds.into_iter().map(|kind| (kind, true)).collect(),
		}
	}

	/// Builder form of [`set`](Self::set)
	pub fn with(mut self, kind: PrivilegeKind, granted: bool) -> Self {
		self.set(kind, granted);
		self
	}

	pub fn set(&mut self, kind: PrivilegeKind, granted: bool) {
		self.flags.insert(kind, granted);
	}

	pub fn get(&self, kind: PrivilegeKind) -> bool {
		self.flags.get(&kind).copied().unwrap_or(false)
	}

	/// The explicitly recorded flag, if any
	pub fn declared(&self, kind: PrivilegeKind) -> Option<bool> {
		self.flags.get(&kind).copied()
	}

	pub fn any_granted(&self) -> bool {
		self.flags.values().any(|granted| *granted)
	}

	/// Granted kinds, in vocabulary order
	pub fn granted(&self) -> impl Iterator<Item = PrivilegeKind> + '_ {
		self.flags
			.iter()
			.filter(|(_, granted)| **granted)
			.map(|(kind, _)| *kind)
	}

	/// Recorded flags, in vocabulary order
	pub fn iter(&self) -> impl Iterator<Item = (PrivilegeKind, bool)> + '_ {
		self.flags.iter().map(|(kind, granted)| (*kind, *granted))
	}
}

impl FromIterator<(PrivilegeKind, bool)> for PrivilegeSet {
	fn from_iter<I: IntoIterator<Item = (PrivilegeKind, bool)>>(iter: I) -> Self {
		Self {
			flags: iter.into_iter().collect(),
		}
	}
}
