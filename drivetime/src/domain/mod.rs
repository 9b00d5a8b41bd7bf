//! Domain types for the drive-time survey.
//!
//! Route candidates and the chosen route, the locations being surveyed,
//! and the timestamp fields recorded with every row.

mod candidate;
mod coords;
mod time;

pub use candidate::{Candidate, CandidateSet, DEFAULT_RESERVED_SLOTS, OptimalRoute, Slot};
pub use coords::{CoordinateTable, CoordsError, LatLon, RoutePair};
pub use time::{ClockSource, FixedClock, SystemClock, Timestamp, half_hour_bucket};
