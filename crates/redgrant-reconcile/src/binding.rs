//! Bindings and their identity
//!
//! A binding is identified by the numeric ids it was created from, encoded
//! as `schemaId_groupId` or `schemaId_groupId_ownerId`. Names are resolved
//! from the ids on every operation, so renaming a schema or group does not
//! orphan the binding.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ReconcileError, ReconcileResult};
use crate::privilege::{PrivilegeKind, PrivilegeSet};

const TABLE_VOCABULARY: &[PrivilegeKind] = &[
	PrivilegeKind::Select,
	PrivilegeKind::Insert,
	PrivilegeKind::Update,
	PrivilegeKind::Delete,
	PrivilegeKind::References,
];

/// The family a binding belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
	/// Privileges on a schema and on every table currently in it
	SchemaGroup,
	/// Default privileges on tables created in a schema in the future
	DefaultGroup,
}

impl BindingKind {
	/// Privileges a binding of this family can hold, in vocabulary order
	pub fn vocabulary(&self) -> &'static [PrivilegeKind] {
		match self {
			BindingKind::SchemaGroup => &PrivilegeKind::ALL,
			BindingKind::DefaultGroup => TABLE_VOCABULARY,
		}
	}

	pub fn supports(&self, kind: PrivilegeKind) -> bool {
		self.vocabulary().contains(&kind)
	}

	/// Whether identities of this family may carry an owner id
	pub fn accepts_owner(&self) -> bool {
		matches!(self, BindingKind::DefaultGroup)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			BindingKind::SchemaGroup => "schema_group",
			BindingKind::DefaultGroup => "default_group",
		}
	}
}

impl fmt::Display for BindingKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Identity of a binding
///
/// # Examples
///
/// ```
/// use redgrant_reconcile::{BindingId, BindingKind};
///
/// let id = BindingId::parse(BindingKind::DefaultGroup, "5_12_100").unwrap();
/// assert_eq!(id.owner_id, Some(100));
/// assert_eq!(id.to_string(), "5_12_100");
///
/// assert!(BindingId::parse(BindingKind::SchemaGroup, "5_12_100").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId {
	pub schema_id: i64,
	pub group_id: i64,
	/// Owner of future tables, for default-privilege bindings
	pub owner_id: Option<i64>,
}

impl BindingId {
	pub fn new(schema_id: i64, group_id: i64) -> Self {
		Self {
			schema_id,
			group_id,
			owner_id: None,
		}
	}

	pub fn with_owner(mut self, owner_id: i64) -> Self {
		self.owner_id = Some(owner_id);
		self
	}

	/// Parse an identity string for a binding of `kind`
	pub fn parse(kind: BindingKind, input: &str) -> ReconcileResult<Self> {
		let id: BindingId = input.parse()?;
		if id.owner_id.is_some() && !kind.accepts_owner() {
			return Err(invalid_identity(
				input,
				format!("{} bindings are identified by schemaId_groupId", kind),
			));
		}
		Ok(id)
	}
}

impl fmt::Display for BindingId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.owner_id {
			Some(owner_id) => write!(f, "{}_{}_{}", self.schema_id, self.group_id, owner_id),
			None => write!(f, "{}_{}", self.schema_id, self.group_id),
		}
	}
}

impl FromStr for BindingId {
	type Err = ReconcileError;

	fn from_str(input: &str) -> Result<Self, Self::Err> {
		let parts: Vec<&str> = input.split('_').collect();
		if !(2..=3).contains(&parts.len()) {
			return Err(invalid_identity(
				input,
				"expected schemaId_groupId or schemaId_groupId_ownerId",
			));
		}
		let mut ids = Vec::with_capacity(parts.len());
		for part in &parts {
			let id = parse_id(part).ok_or_else(|| {
				invalid_identity(input, format!("'{}' is not a canonical numeric id", part))
			})?;
			ids.push(id);
		}
		Ok(Self {
			schema_id: ids[0],
			group_id: ids[1],
			owner_id: ids.get(2).copied(),
		})
	}
}

impl Serialize for BindingId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for BindingId {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = String::deserialize(deserializer)?;
		raw.parse().map_err(serde::de::Error::custom)
	}
}

/// Parse one id part, accepting only its canonical decimal spelling
fn parse_id(part: &str) -> Option<i64> {
	let digits = part.strip_prefix('-').unwrap_or(part);
	let canonical = match digits.as_bytes() {
		[] => false,
		[b'0'] => digits.len() == part.len(),
		[b'0', ..] => false,
		bytes => bytes.iter().all(u8::is_ascii_digit),
	};
	if !canonical {
		return None;
	}
	part.parse().ok()
}

fn invalid_identity(input: &str, reason: impl Into<String>) -> ReconcileError {
	ReconcileError::InvalidIdentity {
		input: input.to_string(),
		reason: reason.into(),
	}
}

/// The observed state of a binding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
	pub id: BindingId,
	pub kind: BindingKind,
	pub schema_name: String,
	pub group_name: String,
	/// Owner of future tables, for default-privilege bindings with an owner
	pub owner_name: Option<String>,
	/// One flag per kind of the family vocabulary
	pub privileges: PrivilegeSet,
	/// Kinds held on only some of the schema's tables
	#[serde(default)]
	pub drift: BTreeSet<PrivilegeKind>,
}

impl Binding {
	pub fn has_drift(&self) -> bool {
		!self.drift.is_empty()
	}
}

/// Result of reading a binding
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
	Present(Binding),
	/// The schema, group or owner no longer exists
	Absent,
}

impl ReadOutcome {
	pub fn is_present(&self) -> bool {
		matches!(self, ReadOutcome::Present(_))
	}

	pub fn into_binding(self) -> Option<Binding> {
		match self {
			ReadOutcome::Present(binding) => Some(binding),
			ReadOutcome::Absent => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("5_12", BindingId::new(5, 12))]
	#[case("5_12_100", BindingId::new(5, 12).with_owner(100))]
	#[case("100001_1_1", BindingId::new(100001, 1).with_owner(1))]
	#[case("0_12", BindingId::new(0, 12))]
	#[case("-5_12", BindingId::new(-5, 12))]
	fn test_parse_identity(#[case] input: &str, #[case] expected: BindingId) {
		// Act
		let id: BindingId = input.parse().unwrap();

		// Assert
		assert_eq!(id, expected);
		assert_eq!(id.to_string(), input);
	}

	#[rstest]
	#[case("")]
	#[case("5")]
	#[case("5_")]
	#[case("5_x")]
	#[case("5_12_100_7")]
	#[case("5-12")]
	#[case("05_12")]
	#[case("+5_12")]
	#[case("5_+12")]
	#[case("5_12_007")]
	#[case("-0_12")]
	#[case(" 5_12")]
	fn test_parse_rejects_malformed(#[case] input: &str) {
		// Act
		let result = input.parse::<BindingId>();

		// Assert
		assert!(matches!(
			result,
			Err(ReconcileError::InvalidIdentity { input: ref got, .. }) if got == input
		));
	}

	#[rstest]
	fn test_schema_group_rejects_owner() {
		// Act
		let result = BindingId::parse(BindingKind::SchemaGroup, "5_12_100");

		// Assert
		assert!(matches!(result, Err(ReconcileError::InvalidIdentity { .. })));
	}

	#[rstest]
	fn test_default_group_owner_is_optional() {
		// Act
		let id = BindingId::parse(BindingKind::DefaultGroup, "5_12").unwrap();

		// Assert
		assert_eq!(id.owner_id, None);
	}

	#[rstest]
	fn test_vocabularies() {
		assert_eq!(BindingKind::SchemaGroup.vocabulary().len(), 7);
		assert_eq!(BindingKind::DefaultGroup.vocabulary().len(), 5);
		assert!(!BindingKind::DefaultGroup.supports(PrivilegeKind::Usage));
		assert!(BindingKind::SchemaGroup.supports(PrivilegeKind::Create));
	}

	#[rstest]
	fn test_binding_serializes_identity_as_string() {
		// Arrange
		let binding = Binding {
			id: BindingId::new(5, 12),
			kind: BindingKind::SchemaGroup,
			schema_name: "analytics".to_string(),
			group_name: "analysts".to_string(),
			owner_name: None,
			privileges: PrivilegeSet::from_granted([PrivilegeKind::Usage]),
			drift: BTreeSet::new(),
		};

		// Act
		let json = serde_json::to_value(&binding).unwrap();
		let back: Binding = serde_json::from_value(json.clone()).unwrap();

		// Assert
		assert_eq!(json["id"], "5_12");
		assert_eq!(json["kind"], "schema_group");
		assert_eq!(json["privileges"]["usage"], true);
		assert_eq!(back, binding);
	}

	#[rstest]
	fn test_read_outcome() {
		assert!(!ReadOutcome::Absent.is_present());
		assert_eq!(ReadOutcome::Absent.into_binding(), None);
	}
}
