//! Time-of-day interval validation.
//!
//! Every write path that touches time slots or template items funnels its
//! intervals through here. An interval is the half-open range
//! `[start, end)`; two intervals conflict only when they intersect with
//! non-zero measure, so a slot ending at 10:00 may sit next to one
//! starting at 10:00.

use jiff::civil::Time;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntervalError {
    #[error("time range end must be after start")]
    InvalidRange,

    #[error("time ranges overlap")]
    Overlap,
}

/// A validated, non-empty time-of-day interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: Time,
    end: Time,
}

impl Interval {
    /// Build an interval, rejecting empty and inverted ranges.
    ///
    /// # Errors
    ///
    /// Returns [`IntervalError::InvalidRange`] when `end <= start`.
    pub fn new(start: Time, end: Time) -> Result<Self, IntervalError> {
        if end <= start {
            return Err(IntervalError::InvalidRange);
        }

        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> Time {
        self.start
    }

    #[must_use]
    pub fn end(self) -> Time {
        self.end
    }

    /// Strict intersection; touching endpoints do not count.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Check that no two intervals in the set intersect.
///
/// Deterministic under reordering of the input: intervals are sorted by
/// start time and adjacent pairs compared.
///
/// # Errors
///
/// Returns [`IntervalError::Overlap`] when any two intervals intersect.
pub fn validate_disjoint(intervals: &[Interval]) -> Result<(), IntervalError> {
    let mut sorted = intervals.to_vec();
    sorted.sort_by_key(|interval| interval.start);

    for pair in sorted.windows(2) {
        if let [previous, next] = pair
            && next.start < previous.end
        {
            return Err(IntervalError::Overlap);
        }
    }

    Ok(())
}

/// Check a new interval against an already-persisted set.
///
/// Callers updating an existing row must exclude that row from
/// `existing` before calling.
///
/// # Errors
///
/// Returns [`IntervalError::Overlap`] when the candidate intersects any
/// existing interval.
pub fn validate_against(candidate: Interval, existing: &[Interval]) -> Result<(), IntervalError> {
    if existing.iter().any(|other| candidate.overlaps(*other)) {
        return Err(IntervalError::Overlap);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use super::*;

    fn interval(start_h: i8, start_m: i8, end_h: i8, end_m: i8) -> Interval {
        Interval::new(time(start_h, start_m, 0, 0), time(end_h, end_m, 0, 0)).unwrap()
    }

    #[test]
    fn rejects_inverted_and_zero_length_ranges() {
        assert_eq!(
            Interval::new(time(10, 0, 0, 0), time(9, 0, 0, 0)),
            Err(IntervalError::InvalidRange)
        );
        assert_eq!(
            Interval::new(time(10, 0, 0, 0), time(10, 0, 0, 0)),
            Err(IntervalError::InvalidRange)
        );
    }

    #[test]
    fn disjoint_intervals_pass() {
        let intervals = [interval(9, 0, 10, 0), interval(14, 0, 15, 0)];

        assert_eq!(validate_disjoint(&intervals), Ok(()));
    }

    #[test]
    fn touching_endpoints_are_not_an_overlap() {
        let intervals = [
            interval(9, 0, 10, 0),
            interval(10, 0, 11, 0),
            interval(11, 0, 12, 0),
        ];

        assert_eq!(validate_disjoint(&intervals), Ok(()));
    }

    #[test]
    fn intersecting_intervals_fail() {
        let intervals = [interval(9, 0, 10, 30), interval(10, 0, 11, 0)];

        assert_eq!(validate_disjoint(&intervals), Err(IntervalError::Overlap));
    }

    #[test]
    fn containment_is_an_overlap() {
        let intervals = [interval(9, 0, 12, 0), interval(10, 0, 11, 0)];

        assert_eq!(validate_disjoint(&intervals), Err(IntervalError::Overlap));
    }

    #[test]
    fn validation_is_order_independent() {
        let forward = [interval(9, 0, 10, 30), interval(10, 0, 11, 0)];
        let backward = [interval(10, 0, 11, 0), interval(9, 0, 10, 30)];

        assert_eq!(validate_disjoint(&forward), validate_disjoint(&backward));

        let forward_ok = [interval(9, 0, 10, 0), interval(10, 0, 11, 0)];
        let backward_ok = [interval(10, 0, 11, 0), interval(9, 0, 10, 0)];

        assert_eq!(
            validate_disjoint(&forward_ok),
            validate_disjoint(&backward_ok)
        );
    }

    #[test]
    fn pairwise_overlap_law_holds() {
        // validate_disjoint succeeds iff no two distinct intervals
        // strictly intersect.
        let sets: &[&[Interval]] = &[
            &[],
            &[interval(9, 0, 10, 0)],
            &[interval(9, 0, 10, 0), interval(10, 0, 11, 0)],
            &[interval(9, 0, 10, 0), interval(9, 30, 10, 30)],
            &[
                interval(8, 0, 9, 0),
                interval(12, 0, 13, 0),
                interval(9, 0, 9, 30),
            ],
        ];

        for set in sets {
            let brute_force = set.iter().enumerate().any(|(i, a)| {
                set.iter()
                    .enumerate()
                    .any(|(j, b)| i != j && a.overlaps(*b))
            });

            assert_eq!(
                validate_disjoint(set).is_err(),
                brute_force,
                "law violated for {set:?}"
            );
        }
    }

    #[test]
    fn candidate_against_existing_respects_touching() {
        let existing = [interval(9, 0, 10, 30)];

        assert_eq!(
            validate_against(interval(10, 0, 11, 0), &existing),
            Err(IntervalError::Overlap)
        );
        assert_eq!(
            validate_against(interval(10, 30, 11, 0), &existing),
            Ok(())
        );
    }

    #[test]
    fn candidate_against_empty_set_passes() {
        assert_eq!(validate_against(interval(9, 0, 10, 0), &[]), Ok(()));
    }
}
