//! Packed ACL decoding
//!
//! Redshift stores object privileges as an array of entries of the form
//! `subject=letters/grantor`, where the subject of a group entry is
//! `group <name>`. Catalog queries fetch the array joined with `|` and
//! [`AclList`] decodes it.
//!
//! Letters: `r` SELECT, `a` INSERT, `w` UPDATE, `d` DELETE,
//! `x` REFERENCES, `U` USAGE, `C` CREATE.

/// Delimiter used when joining ACL arrays in catalog queries
pub const ACL_DELIMITER: char = '|';

const GROUP_PREFIX: &str = "group ";

// Canonical letter order when an entry is rewritten
const LETTER_ORDER: &str = "arwdRxtXUCT";

/// A decoded ACL: the entries of one object's privilege array
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AclList {
	entries: Vec<String>,
}

impl AclList {
	/// An ACL with no entries
	pub fn new() -> Self {
		Self::default()
	}

	/// Decode a `|`-joined ACL string
	///
	/// An empty string decodes to an empty list.
	pub fn parse(packed: &str) -> Self {
		Self {
			entries: packed
				.split(ACL_DELIMITER)
				.map(str::trim)
				.filter(|e| !e.is_empty())
				.map(str::to_string)
				.collect(),
		}
	}

	/// Decode a nullable ACL column
	pub fn from_nullable(packed: Option<&str>) -> Self {
		packed.map(Self::parse).unwrap_or_default()
	}

	pub fn entries(&self) -> &[String] {
		&self.entries
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Re-join the entries with the catalog delimiter
	pub fn joined(&self) -> String {
		let delimiter = ACL_DELIMITER.to_string();
		self.entries.join(&delimiter)
	}

	/// The privilege letters held by `group`, if it has an entry
	///
	/// Matching is on the whole grantee name, so `analyst` never matches
	/// the entry of `analysts`.
	pub fn group_privileges(&self, group: &str) -> Option<&str> {
		self.entries
			.iter()
			.filter_map(|entry| split_group_entry(entry))
			.find(|(name, _)| name == group)
			.map(|(_, letters)| letters)
	}

	/// Whether `group` has an entry at all
	pub fn contains_group(&self, group: &str) -> bool {
		self.group_privileges(group).is_some()
	}

	/// Whether `group` holds the privilege encoded by `letter`
	pub fn has_group_privilege(&self, group: &str, letter: char) -> bool {
		self.group_privileges(group)
			.is_some_and(|letters| letters.contains(letter))
	}

	/// Add `letter` to the entry of `group`, creating the entry if needed
	pub fn grant_group(&mut self, group: &str, letter: char, grantor: &str) {
		let position = self.position_of(group);
		match position {
			Some(idx) => {
				let (letters, old_grantor) = {
					let (_, letters) = split_group_entry(&self.entries[idx]).unwrap_or_default();
					let grantor = self.entries[idx]
						.rsplit_once('/')
						.map(|(_, g)| g.to_string())
						.unwrap_or_else(|| grantor.to_string());
					(letters.to_string(), grantor)
				};
				if letters.contains(letter) {
					return;
				}
				let letters = canonical_letters(&format!("{}{}", letters, letter));
				self.entries[idx] = render_group_entry(group, &letters, &old_grantor);
			}
			None => {
				self.entries
					.push(render_group_entry(group, &letter.to_string(), grantor));
			}
		}
	}

	/// Remove `letter` from the entry of `group`; an entry left with no
	/// letters is dropped
	pub fn revoke_group(&mut self, group: &str, letter: char) {
		let Some(idx) = self.position_of(group) else {
			return;
		};
		let entry = &self.entries[idx];
		let letters: String = split_group_entry(entry)
			.map(|(_, l)| l.chars().filter(|c| *c != letter).collect())
			.unwrap_or_default();
		if letters.is_empty() {
			self.entries.remove(idx);
			return;
		}
		let grantor = entry
			.rsplit_once('/')
			.map(|(_, g)| g.to_string())
			.unwrap_or_default();
		self.entries[idx] = render_group_entry(group, &letters, &grantor);
	}

	fn position_of(&self, group: &str) -> Option<usize> {
		self.entries.iter().position(|entry| {
			split_group_entry(entry).is_some_and(|(name, _)| name == group)
		})
	}
}

/// Fraction of `tables` on which `group` holds `letter`
///
/// Returns `None` when there are no tables; the caller decides what an
/// empty schema means.
pub fn coverage_fraction(tables: &[AclList], group: &str, letter: char) -> Option<f64> {
	if tables.is_empty() {
		return None;
	}
	let granted = tables
		.iter()
		.filter(|acl| acl.has_group_privilege(group, letter))
		.count();
	Some(granted as f64 / tables.len() as f64)
}

/// Split `group <name>=<letters>/<grantor>` into name and letters
fn split_group_entry(entry: &str) -> Option<(String, &str)> {
	let rest = entry.strip_prefix(GROUP_PREFIX)?;
	let (name, after_name) = match rest.strip_prefix('"') {
		Some(quoted) => {
			let mut name = String::new();
			let mut end = None;
			let mut chars = quoted.char_indices().peekable();
			while let Some((i, c)) = chars.next() {
				if c != '"' {
					name.push(c);
					continue;
				}
				if let Some(&(_, '"')) = chars.peek() {
					chars.next();
					name.push('"');
				} else {
					end = Some(i + 1);
					break;
				}
			}
			(name, &quoted[end?..])
		}
		None => {
			let eq = rest.find('=')?;
			(rest[..eq].to_string(), &rest[eq..])
		}
	};
	let after_eq = after_name.strip_prefix('=')?;
	let letters = match after_eq.find('/') {
		Some(slash) => &after_eq[..slash],
		None => after_eq,
	};
	Some((name, letters))
}

fn render_group_entry(group: &str, letters: &str, grantor: &str) -> String {
	format!("{}{}={}/{}", GROUP_PREFIX, quote_acl_name(group), letters, grantor)
}

fn quote_acl_name(name: &str) -> String {
	let plain = !name.is_empty()
		&& name
			.chars()
			.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
	if plain {
		name.to_string()
	} else {
		format!("\"{}\"", name.replace('"', "\"\""))
	}
}

fn canonical_letters(letters: &str) -> String {
	let mut chars: Vec<char> = letters.chars().collect();
	chars.sort_by_key(|c| LETTER_ORDER.find(*c).unwrap_or(LETTER_ORDER.len()));
	chars.dedup();
	chars.into_iter().collect()
}
