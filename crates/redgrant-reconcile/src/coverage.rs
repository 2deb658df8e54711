//! Table coverage
//!
//! A table-level privilege on a schema is really one privilege per table,
//! and the tables may disagree. The fraction of tables holding the
//! privilege collapses to granted, absent or partial; partial has no
//! faithful boolean form and is resolved by [`PartialCoverageMode`].

use redgrant_conf::PartialCoverageMode;

/// Collapsed coverage of one privilege over a schema's tables
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coverage {
	/// Held on every table
	Granted,
	/// Held on no table
	Absent,
	/// Held on some tables; the fraction is strictly between 0 and 1
	Partial(f64),
}

impl Coverage {
	/// Collapse a fraction: `>= 1` is granted, `<= 0` is absent
	pub fn from_fraction(fraction: f64) -> Self {
		if fraction >= 1.0 {
			Coverage::Granted
		} else if fraction <= 0.0 {
			Coverage::Absent
		} else {
			Coverage::Partial(fraction)
		}
	}

	pub fn is_partial(&self) -> bool {
		matches!(self, Coverage::Partial(_))
	}

	/// Turn the coverage into a flag
	///
	/// `previous` is the value last declared for the privilege, `None` when
	/// nothing was declared (import). Partial coverage reads as the negation
	/// of `previous` in [`PartialCoverageMode::Toggle`], so the next update
	/// re-applies the declaration to the whole schema, and as `previous`
	/// itself in [`PartialCoverageMode::Report`], so no statement is issued
	/// and the drift is surfaced instead.
	///
	/// # Examples
	///
	/// ```
	/// use redgrant_conf::PartialCoverageMode;
	/// use redgrant_reconcile::Coverage;
	///
	/// let partial = Coverage::from_fraction(2.0 / 3.0);
	/// let toggled = partial.decide(Some(true), PartialCoverageMode::Toggle);
	/// assert!(!toggled.granted);
	/// assert!(toggled.drift);
	///
	/// let reported = partial.decide(Some(true), PartialCoverageMode::Report);
	/// assert!(reported.granted);
	/// assert!(reported.drift);
	/// ```
	pub fn decide(&self, previous: Option<bool>, mode: PartialCoverageMode) -> CoverageDecision {
		match self {
			Coverage::Granted => CoverageDecision::settled(true),
			Coverage::Absent => CoverageDecision::settled(false),
			Coverage::Partial(_) => {
				let previous = previous.unwrap_or(false);
				let granted = match mode {
					PartialCoverageMode::Toggle => !previous,
					PartialCoverageMode::Report => previous,
				};
				CoverageDecision {
					granted,
					drift: true,
				}
			}
		}
	}
}

/// A resolved flag and whether it came from partial coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageDecision {
	pub granted: bool,
	pub drift: bool,
}

impl CoverageDecision {
	fn settled(granted: bool) -> Self {
		Self {
			granted,
			drift: false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(1.0, Coverage::Granted)]
	#[case(1.5, Coverage::Granted)]
	#[case(0.0, Coverage::Absent)]
	#[case(-0.1, Coverage::Absent)]
	#[case(0.5, Coverage::Partial(0.5))]
	fn test_from_fraction(#[case] fraction: f64, #[case] expected: Coverage) {
		assert_eq!(Coverage::from_fraction(fraction), expected);
	}

	#[rstest]
	#[case(Some(true), false)]
	#[case(Some(false), true)]
	#[case(None, true)]
	fn test_toggle_negates_previous(#[case] previous: Option<bool>, #[case] expected: bool) {
		// Arrange
		let coverage = Coverage::from_fraction(2.0 / 3.0);

		// Act
		let decision = coverage.decide(previous, PartialCoverageMode::Toggle);

		// Assert
		assert_eq!(decision.granted, expected);
		assert!(decision.drift);
	}

	#[rstest]
	#[case(Some(true), true)]
	#[case(Some(false), false)]
	#[case(None, false)]
	fn test_report_keeps_previous(#[case] previous: Option<bool>, #[case] expected: bool) {
		// Arrange
		let coverage = Coverage::from_fraction(1.0 / 3.0);

		// Act
		let decision = coverage.decide(previous, PartialCoverageMode::Report);

		// Assert
		assert_eq!(decision.granted, expected);
		assert!(decision.drift);
	}

	#[rstest]
	#[case(PartialCoverageMode::Toggle)]
	#[case(PartialCoverageMode::Report)]
	fn test_full_coverage_ignores_previous(#[case] mode: PartialCoverageMode) {
		assert_eq!(
			Coverage::Granted.decide(Some(false), mode),
			CoverageDecision {
				granted: true,
				drift: false
			}
		);
		assert_eq!(
			Coverage::Absent.decide(Some(true), mode),
			CoverageDecision {
				granted: false,
				drift: false
			}
		);
	}
}
