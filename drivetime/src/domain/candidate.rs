//! Route candidates parsed out of a directions page.

use std::fmt;

/// One driving alternative found on a directions page.
///
/// `time_minutes` is already the worst case of every duration reading
/// shown for this alternative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// 1-based position among the successfully parsed candidates.
    pub ordinal: u32,
    pub distance_miles: f64,
    pub time_minutes: u32,
}

impl Candidate {
    pub fn new(ordinal: u32, distance_miles: f64, time_minutes: u32) -> Self {
        Self {
            ordinal,
            distance_miles,
            time_minutes,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "route {} ({} miles, {} min)",
            self.ordinal, self.distance_miles, self.time_minutes
        )
    }
}

/// Default number of empty slots appended after the real candidates.
pub const DEFAULT_RESERVED_SLOTS: usize = 2;

/// The candidates for one query, plus reserved empty slots.
///
/// The reserved slots keep a persisted schema wide enough for a later run
/// that finds more alternatives than the first one did. They are never
/// candidates for selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSet {
    candidates: Vec<Candidate>,
    reserved: usize,
}

/// A position in a [`CandidateSet`]: either a real candidate or an empty
/// reserved slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slot<'a> {
    Filled(&'a Candidate),
    Reserved,
}

impl CandidateSet {
    /// Build a set from candidates in discovery order.
    ///
    /// Candidates are sorted by ordinal so the slot numbering always matches
    /// the ordinals the parser assigned.
    pub fn new(mut candidates: Vec<Candidate>, reserved: usize) -> Self {
        candidates.sort_by_key(|c| c.ordinal);
        Self {
            candidates,
            reserved,
        }
    }

    /// The real candidates, in ordinal order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Number of reserved empty slots after the candidates.
    pub fn reserved(&self) -> usize {
        self.reserved
    }

    /// True if there is no real candidate to select from.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Every slot with its 1-based slot number, real candidates first.
    pub fn slots(&self) -> impl Iterator<Item = (usize, Slot<'_>)> + '_ {
        self.candidates
            .iter()
            .map(Slot::Filled)
            .chain(std::iter::repeat_n(Slot::Reserved, self.reserved))
            .enumerate()
            .map(|(i, slot)| (i + 1, slot))
    }
}

/// The route chosen for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimalRoute {
    pub distance_miles: f64,
    pub time_minutes: u32,
    /// Ordinal of the candidate this route was taken from.
    pub ordinal: u32,
}

impl From<&Candidate> for OptimalRoute {
    fn from(c: &Candidate) -> Self {
        Self {
            distance_miles: c.distance_miles,
            time_minutes: c.time_minutes,
            ordinal: c.ordinal,
        }
    }
}
