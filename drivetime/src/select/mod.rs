//! Optimal route selection.
//!
//! A query may turn up several driving alternatives. The recorded route is
//! the fastest one, with distance and then page order breaking ties.

mod rank;

pub use rank::{SelectError, compare_candidates, rank_candidates, select_optimal};
