//! The survey driver.
//!
//! Walks a list of origin-destination pairs and, for each one, fetches the
//! directions page, picks out the driving routes and appends one row to
//! the sink. Queries run strictly one after another with a fixed pause in
//! between.

mod config;
mod run;

pub use config::SurveyConfig;
pub use run::{QueryError, QueryOutcome, Survey, SurveyReport};
