//! Mock page fetcher for running without network access.
//!
//! Serves canned page bodies keyed by coordinate pair, either registered
//! in code or loaded from a directory of saved pages.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::domain::{CoordinateTable, LatLon};

use super::error::FetchError;
use super::{PageFetcher, directions_path};

/// Fetcher that returns pre-registered page bodies.
#[derive(Debug, Clone, Default)]
pub struct MockPageFetcher {
    pages: HashMap<String, String>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockPageFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the page returned for a route.
    pub fn with_page(mut self, origin: LatLon, destination: LatLon, body: impl Into<String>) -> Self {
        self.pages
            .insert(directions_path(origin, destination), body.into());
        self
    }

    /// Load saved pages named `{origin}_to_{destination}.txt`.
    ///
    /// Location names are resolved through `coords`; files whose names do
    /// not match a known pair are ignored.
    pub fn from_dir(dir: impl AsRef<Path>, coords: &CoordinateTable) -> Result<Self, FetchError> {
        let dir = dir.as_ref();
        let mut fetcher = Self::new();

        for pair in coords.all_pairs() {
            let path = dir.join(format!("{}.txt", pair.label()));
            match std::fs::read_to_string(&path) {
                Ok(body) => {
                    fetcher = fetcher.with_page(pair.origin_coords, pair.destination_coords, body);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(FetchError::NotFound(format!("{}: {e}", path.display())));
                }
            }
        }

        Ok(fetcher)
    }

    /// Routes requested so far, as `lat,lon/lat,lon` paths.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl PageFetcher for MockPageFetcher {
    async fn fetch(&self, origin: LatLon, destination: LatLon) -> Result<String, FetchError> {
        let path = directions_path(origin, destination);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(path.clone());
        }
        self.pages
            .get(&path)
            .cloned()
            .ok_or(FetchError::NotFound(path))
    }
}
