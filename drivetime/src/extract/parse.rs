//! Parsing one window into a route candidate.
//!
//! A directions page mixes driving and public-transit alternatives in the
//! same region of text, and shows each driving route with one or more
//! duration estimates. A window becomes a candidate only if it looks like a
//! driving route, has a readable distance and has at least one readable
//! duration. The candidate keeps the longest of those durations.

use tracing::{debug, trace};

use crate::domain::Candidate;

use super::config::ExtractConfig;
use super::pattern::PatternExtractor;
use super::window::Window;

/// Why a window did not produce a candidate.
///
/// These never abort a query: the window is skipped and the next one is
/// parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CandidateParseFailure {
    /// The window mentions a non-driving mode of travel.
    #[error("non-driving route (found {0:?})")]
    Transit(String),

    /// No quoted field ends at the distance unit within the lookback bound.
    #[error("distance field not found")]
    MissingDistance,

    /// The distance field is not a number of miles.
    #[error("invalid distance: {0:?}")]
    InvalidDistance(String),

    /// Every duration field was missing, a range, or unparseable.
    #[error("no usable duration readings")]
    NoDurations,
}

/// Distance and worst-case duration read from one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteReading {
    pub distance_miles: f64,
    pub time_minutes: u32,
}

/// Turns windows into candidates, numbering them in the order they parse.
pub struct CandidateParser<'a, P> {
    config: &'a ExtractConfig,
    extractor: &'a P,
    next_ordinal: u32,
}

impl<'a, P: PatternExtractor> CandidateParser<'a, P> {
    pub fn new(config: &'a ExtractConfig, extractor: &'a P) -> Self {
        Self {
            config,
            extractor,
            next_ordinal: 1,
        }
    }

    /// Parse a window, assigning the next ordinal on success.
    ///
    /// Windows that fail to parse are logged and skipped; they do not use
    /// up an ordinal.
    pub fn parse(&mut self, window: &Window<'_>) -> Option<Candidate> {
        match self.read(window.text) {
            Ok(reading) => {
                let candidate = Candidate::new(
                    self.next_ordinal,
                    reading.distance_miles,
                    reading.time_minutes,
                );
                self.next_ordinal += 1;
                trace!(offset = window.marker_offset, %candidate, "parsed window");
                Some(candidate)
            }
            Err(failure) => {
                debug!(offset = window.marker_offset, %failure, "skipping window");
                None
            }
        }
    }

    /// Read distance and worst-case duration from window text.
    pub fn read(&self, text: &str) -> Result<RouteReading, CandidateParseFailure> {
        if let Some(token) = self
            .config
            .transit_tokens
            .iter()
            .find(|token| text.contains(token.as_str()))
        {
            return Err(CandidateParseFailure::Transit(token.clone()));
        }

        let distance_miles = self.read_distance(text)?;
        let time_minutes = self
            .read_durations(text)
            .into_iter()
            .max()
            .ok_or(CandidateParseFailure::NoDurations)?;

        Ok(RouteReading {
            distance_miles,
            time_minutes,
        })
    }

    fn read_distance(&self, text: &str) -> Result<f64, CandidateParseFailure> {
        let anchor = self
            .extractor
            .find(text, &self.config.distance_anchor)
            .into_iter()
            .next()
            .ok_or(CandidateParseFailure::MissingDistance)?;
        let field = self
            .extractor
            .extract_quoted_field(text, anchor, self.config.lookback)
            .ok_or(CandidateParseFailure::MissingDistance)?;

        parse_miles(field).ok_or_else(|| CandidateParseFailure::InvalidDistance(field.to_string()))
    }

    /// Every duration reading in the window, in minutes.
    ///
    /// Range estimates and unreadable fields are left out.
    fn read_durations(&self, text: &str) -> Vec<u32> {
        self.extractor
            .find(text, &self.config.duration_anchor)
            .into_iter()
            .filter_map(|anchor| {
                self.extractor
                    .extract_quoted_field(text, anchor, self.config.lookback)
            })
            .filter(|field| !field.contains(self.config.range_chars.as_slice()))
            .filter_map(|field| parse_minutes(field, &self.config.hour_unit))
            .collect()
    }
}

/// Parse a distance such as `12.3` or `1,204` as miles.
fn parse_miles(field: &str) -> Option<f64> {
    let miles: f64 = field.replace(',', "").trim().parse().ok()?;
    (miles.is_finite() && miles >= 0.0).then_some(miles)
}

/// Parse a duration field as whole minutes.
///
/// The field has already had its trailing minute unit cut off, so it reads
/// either `25` or `1 hr 5`.
fn parse_minutes(field: &str, hour_unit: &str) -> Option<u32> {
    match field.split_once(hour_unit) {
        Some((hours, minutes)) => {
            let hours: u32 = hours.trim().parse().ok()?;
            let minutes: u32 = minutes.trim().parse().ok()?;
            hours.checked_mul(60)?.checked_add(minutes)
        }
        None => field.trim().parse().ok(),
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::extract::QuoteScan;
    use proptest::prelude::*;

    /// Render minutes the way the page does: plain below an hour, with an
    /// hour part otherwise.
    fn render_minutes(minutes: u32) -> String {
        if minutes < 60 {
            format!("{minutes}")
        } else {
            format!("{} hr {}", minutes / 60, minutes % 60)
        }
    }

    /// A driving window with a distance and the given duration readings.
    fn driving_window(tenths: u32, readings: &[u32]) -> String {
        let mut text = format!(
            r#"null,[\"{}.{} miles\",{}]"#,
            tenths / 10,
            tenths % 10,
            tenths * 160
        );
        for minutes in readings {
            text.push_str(&format!(r#",[\"{} min\",{}]"#, render_minutes(*minutes), minutes * 60));
        }
        text
    }

    proptest! {
        #[test]
        fn duration_is_maximum_of_readings(
            tenths in 1u32..10_000,
            readings in prop::collection::vec(0u32..600, 1..6),
        ) {
            let config = ExtractConfig::default();
            let parser = CandidateParser::new(&config, &QuoteScan);

            let reading = parser.read(&driving_window(tenths, &readings)).unwrap();

            prop_assert_eq!(reading.time_minutes, *readings.iter().max().unwrap());
            prop_assert!((reading.distance_miles - f64::from(tenths) / 10.0).abs() < 1e-9);
        }

        #[test]
        fn transit_token_always_rejects(
            tenths in 1u32..10_000,
            readings in prop::collection::vec(0u32..600, 1..6),
            token_idx in 0usize..6,
            at_start in any::<bool>(),
        ) {
            let config = ExtractConfig::default();
            let parser = CandidateParser::new(&config, &QuoteScan);
            let token = &config.transit_tokens[token_idx];

            let body = driving_window(tenths, &readings);
            let text = if at_start {
                format!("{token} {body}")
            } else {
                format!("{body} {token}")
            };

            prop_assert!(matches!(
                parser.read(&text),
                Err(CandidateParseFailure::Transit(_))
            ));
        }

        #[test]
        fn range_readings_never_count(
            tenths in 1u32..10_000,
            readings in prop::collection::vec(0u32..600, 1..4),
            low in 0u32..50,
        ) {
            let config = ExtractConfig::default();
            let parser = CandidateParser::new(&config, &QuoteScan);

            // A range estimate longer than any real reading must not win.
            let mut text = driving_window(tenths, &readings);
            text.push_str(&format!(r#",[\"{low}–999 min\"]"#));

            let reading = parser.read(&text).unwrap();
            prop_assert_eq!(reading.time_minutes, *readings.iter().max().unwrap());
        }
    }
}
