//! Slicing a page into candidate windows.

use super::config::ExtractConfig;
use super::pattern::{PatternExtractor, back_chars, forward_chars};

/// A slice of page text around one window-marker occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window<'a> {
    /// Byte offset of the marker in the page.
    pub marker_offset: usize,
    pub text: &'a str,
}

/// Cut a window around every occurrence of the window marker.
///
/// Windows are returned in page order. Markers closer together than the
/// window span produce overlapping windows; each is parsed independently.
pub fn extract_windows<'a, P: PatternExtractor>(
    blob: &'a str,
    config: &ExtractConfig,
    extractor: &P,
) -> Vec<Window<'a>> {
    extractor
        .find(blob, &config.window_marker)
        .into_iter()
        .filter(|&offset| blob.is_char_boundary(offset))
        .map(|offset| {
            let start = back_chars(blob, offset, config.before);
            let end = forward_chars(blob, offset, config.after);
            Window {
                marker_offset: offset,
                text: &blob[start..end],
            }
        })
        .collect()
}
