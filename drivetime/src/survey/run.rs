//! Running queries end to end.
//!
//! Each query is fetched, extracted, reduced to a row and appended before
//! the next one starts. A failing query is reported and the run moves on.

use tracing::{error, info};

use crate::domain::{ClockSource, RoutePair};
use crate::extract::{ExtractConfig, PatternExtractor, QuoteScan, extract_candidates};
use crate::maps::{FetchError, PageFetcher};
use crate::row::{ResultRow, RowBuilder};
use crate::select::SelectError;
use crate::sink::{AppendOutcome, SinkError, TabularSink};

use super::config::SurveyConfig;

/// Why a single query produced no row.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The directions page could not be fetched
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The page had no usable driving route
    #[error(transparent)]
    NoRoute(#[from] SelectError),

    /// The row could not be written
    #[error("write failed: {0}")]
    Sink(#[from] SinkError),
}

/// Result of one successful query.
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    pub label: String,
    /// Real candidates found on the page.
    pub candidates: usize,
    pub row: ResultRow,
    pub append: AppendOutcome,
}

/// Summary of a whole run.
#[derive(Debug, Default)]
pub struct SurveyReport {
    pub written: Vec<QueryOutcome>,
    /// Label and error of every failed query, in run order.
    pub failures: Vec<(String, QueryError)>,
}

impl SurveyReport {
    pub fn total(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs route queries against a page fetcher and records them in a sink.
pub struct Survey<F, C, S, P = QuoteScan> {
    fetcher: F,
    clock: C,
    sink: S,
    extractor: P,
    extract: ExtractConfig,
    rows: RowBuilder,
    config: SurveyConfig,
}

impl<F, C, S> Survey<F, C, S>
where
    F: PageFetcher,
    C: ClockSource,
    S: TabularSink,
{
    /// Create a survey using the default text extraction.
    pub fn new(fetcher: F, clock: C, sink: S, config: SurveyConfig) -> Self {
        Self {
            fetcher,
            clock,
            sink,
            extractor: QuoteScan,
            extract: ExtractConfig::default(),
            rows: RowBuilder::new(config.mode),
            config,
        }
    }
}

impl<F, C, S, P> Survey<F, C, S, P>
where
    F: PageFetcher,
    C: ClockSource,
    S: TabularSink,
    P: PatternExtractor,
{
    /// Replace the text extraction strategy.
    pub fn with_extractor<Q: PatternExtractor>(self, extractor: Q) -> Survey<F, C, S, Q> {
        Survey {
            fetcher: self.fetcher,
            clock: self.clock,
            sink: self.sink,
            extractor,
            extract: self.extract,
            rows: self.rows,
            config: self.config,
        }
    }

    /// Replace the extraction markers and bounds.
    pub fn with_extract_config(mut self, extract: ExtractConfig) -> Self {
        self.extract = extract;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Fetch, extract, select and record one route.
    pub async fn run_query(&mut self, pair: &RoutePair) -> Result<QueryOutcome, QueryError> {
        let label = pair.label();
        let blob = self
            .fetcher
            .fetch(pair.origin_coords, pair.destination_coords)
            .await?;

        let set = extract_candidates(
            &blob,
            &self.extract,
            &self.extractor,
            self.config.reserved_slots,
        );
        let timestamp = self.clock.now();
        let row = self.rows.build(&label, &timestamp, &set)?;
        let append = self.sink.append(&row)?;

        Ok(QueryOutcome {
            label,
            candidates: set.len(),
            row,
            append,
        })
    }

    /// Run every pair in order, pausing between queries.
    pub async fn run(&mut self, pairs: &[RoutePair]) -> SurveyReport {
        let mut report = SurveyReport::default();

        for (i, pair) in pairs.iter().enumerate() {
            if i > 0 && !self.config.delay().is_zero() {
                tokio::time::sleep(self.config.delay()).await;
            }

            match self.run_query(pair).await {
                Ok(outcome) => {
                    info!(
                        route = %outcome.label,
                        candidates = outcome.candidates,
                        "recorded route"
                    );
                    report.written.push(outcome);
                }
                Err(e) => {
                    let label = pair.label();
                    error!(route = %label, error = %e, "query failed");
                    report.failures.push((label, e));
                }
            }
        }

        report
    }
}
