//! Fetching directions pages.
//!
//! The survey only needs the raw text of a directions page for a pair of
//! coordinates. [`PageFetcher`] is that boundary; [`MapsClient`] fetches
//! over HTTP and [`MockPageFetcher`] serves saved pages.

mod client;
mod error;
mod mock;

pub use client::{FetchConfig, MapsClient};
pub use error::FetchError;
pub use mock::MockPageFetcher;

use std::future::Future;

use crate::domain::LatLon;

/// Source of directions page text.
pub trait PageFetcher {
    /// Fetch the page describing routes from `origin` to `destination`.
    fn fetch(
        &self,
        origin: LatLon,
        destination: LatLon,
    ) -> impl Future<Output = Result<String, FetchError>>;
}

/// The `lat,lon/lat,lon` path identifying a route.
pub(crate) fn directions_path(origin: LatLon, destination: LatLon) -> String {
    format!("{origin}/{destination}")
}
