//! Picking the optimal route from a candidate set.

use std::cmp::Ordering;

use crate::domain::{Candidate, CandidateSet, OptimalRoute};

/// Error from route selection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectError {
    /// The set has no real candidates, only reserved slots.
    #[error("no driving route found")]
    NoRouteFound,
}

/// Order candidates by preference.
///
/// Candidates are compared by:
/// 1. Time (shorter is better)
/// 2. Distance (shorter is better)
/// 3. Ordinal (earlier on the page is better)
pub fn compare_candidates(a: &Candidate, b: &Candidate) -> Ordering {
    a.time_minutes
        .cmp(&b.time_minutes)
        .then_with(|| a.distance_miles.total_cmp(&b.distance_miles))
        .then_with(|| a.ordinal.cmp(&b.ordinal))
}

/// Select the optimal route.
///
/// Only real candidates are considered; reserved slots never win. A set
/// without real candidates is an error rather than a zero-length route.
pub fn select_optimal(set: &CandidateSet) -> Result<OptimalRoute, SelectError> {
    set.candidates()
        .iter()
        .min_by(|a, b| compare_candidates(a, b))
        .map(OptimalRoute::from)
        .ok_or(SelectError::NoRouteFound)
}

/// Rank candidates best-first.
pub fn rank_candidates(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(compare_candidates);
    candidates
}
