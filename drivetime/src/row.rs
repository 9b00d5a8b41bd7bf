//! Building the flat record written for each query.

use std::fmt;

use crate::domain::{CandidateSet, Slot, Timestamp};
use crate::select::{SelectError, select_optimal};

/// Column holding the `origin_to_destination` label.
pub const ROUTE_COLUMN: &str = "route";
pub const OPTIMAL_DISTANCE_COLUMN: &str = "optimal_drive_distance_miles";
pub const OPTIMAL_TIME_COLUMN: &str = "optimal_drive_time_minutes";

/// Which route fields a row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputMode {
    /// Only the optimal route, under fixed column names.
    #[default]
    Optimal,
    /// Every candidate slot, numbered, including reserved empty slots.
    Raw,
}

/// A single value in a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Miles(f64),
    Minutes(u32),
    Empty,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            // Whole miles keep a trailing `.0` so the column reads as decimal.
            FieldValue::Miles(m) if m.fract() == 0.0 => write!(f, "{m:.1}"),
            FieldValue::Miles(m) => write!(f, "{m}"),
            FieldValue::Minutes(m) => write!(f, "{m}"),
            FieldValue::Empty => Ok(()),
        }
    }
}

/// An ordered mapping of column name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRow {
    fields: Vec<(String, FieldValue)>,
}

impl ResultRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, or replace the value of an existing one in place.
    pub fn push(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.push(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Column names in construction order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builds result rows from a query's candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowBuilder {
    mode: OutputMode,
}

impl RowBuilder {
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Build the row for one query.
    ///
    /// Columns are the route label, the route fields for the configured
    /// mode, then the timestamp fields. A set with no real candidates is
    /// reported as [`SelectError::NoRouteFound`] in either mode.
    pub fn build(
        &self,
        label: &str,
        timestamp: &Timestamp,
        set: &CandidateSet,
    ) -> Result<ResultRow, SelectError> {
        if set.is_empty() {
            return Err(SelectError::NoRouteFound);
        }

        let mut row = ResultRow::new().with(ROUTE_COLUMN, FieldValue::Text(label.to_string()));

        match self.mode {
            OutputMode::Optimal => {
                let route = select_optimal(set)?;
                row.push(
                    OPTIMAL_DISTANCE_COLUMN,
                    FieldValue::Miles(route.distance_miles),
                );
                row.push(OPTIMAL_TIME_COLUMN, FieldValue::Minutes(route.time_minutes));
            }
            OutputMode::Raw => {
                for (n, slot) in set.slots() {
                    let (distance, time) = match slot {
                        Slot::Filled(c) => (
                            FieldValue::Miles(c.distance_miles),
                            FieldValue::Minutes(c.time_minutes),
                        ),
                        Slot::Reserved => (FieldValue::Empty, FieldValue::Empty),
                    };
                    row.push(format!("route_{n}_distance_miles"), distance);
                    row.push(format!("route_{n}_time_minutes"), time);
                }
            }
        }

        row.push("date", FieldValue::Text(timestamp.date.clone()));
        row.push("dayofweek", FieldValue::Text(timestamp.weekday.clone()));
        row.push("time", FieldValue::Text(timestamp.clock_time.clone()));
        row.push("time_halfhour", FieldValue::Text(timestamp.half_hour.clone()));

        Ok(row)
    }
}
