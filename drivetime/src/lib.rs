//! Drive-time survey.
//!
//! Records how long it currently takes to drive between pairs of places,
//! by reading route estimates out of public directions pages and
//! appending the fastest driving route for each pair to a CSV table.

pub mod domain;
pub mod extract;
pub mod maps;
pub mod row;
pub mod select;
pub mod sink;
pub mod survey;
