//! Route-candidate extraction from directions page text.
//!
//! The page is a large blob of escaped JavaScript with no stable
//! structure. Extraction works in three steps:
//!
//! 1. Cut a window of text around every distance marker.
//! 2. Parse each window into at most one driving candidate.
//! 3. Collect the candidates into a [`CandidateSet`] with reserved slots.

mod config;
mod parse;
mod pattern;
mod window;

pub use config::ExtractConfig;
pub use parse::{CandidateParseFailure, CandidateParser, RouteReading};
pub use pattern::{PatternExtractor, QuoteScan};
pub use window::{Window, extract_windows};

use crate::domain::CandidateSet;

/// Extract every driving candidate from a page.
///
/// Windows that fail to parse are skipped. `reserved` empty slots are
/// appended after the real candidates.
pub fn extract_candidates<P: PatternExtractor>(
    blob: &str,
    config: &ExtractConfig,
    extractor: &P,
    reserved: usize,
) -> CandidateSet {
    let windows = extract_windows(blob, config, extractor);
    let mut parser = CandidateParser::new(config, extractor);
    let candidates = windows.iter().filter_map(|w| parser.parse(w)).collect();
    CandidateSet::new(candidates, reserved)
}
