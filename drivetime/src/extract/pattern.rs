//! Low-level text search over page content.
//!
//! The page format drifts over time, so the search primitives live behind
//! [`PatternExtractor`]. Swapping the strategy leaves parsing rules and
//! route selection untouched.

/// Text search primitives used by the window extractor and the parser.
pub trait PatternExtractor {
    /// Byte offsets of every occurrence of `marker` in `text`, in order.
    fn find(&self, text: &str, marker: &str) -> Vec<usize>;

    /// The trimmed text between the nearest `"` before `anchor` and
    /// `anchor` itself.
    ///
    /// `anchor` is a byte offset into `text`. The quote must lie within
    /// `lookback` characters of the anchor; otherwise `None`.
    fn extract_quoted_field<'a>(
        &self,
        text: &'a str,
        anchor: usize,
        lookback: usize,
    ) -> Option<&'a str>;
}

/// Plain substring search with a bounded backward scan for quotes.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteScan;

impl PatternExtractor for QuoteScan {
    fn find(&self, text: &str, marker: &str) -> Vec<usize> {
        if marker.is_empty() {
            return Vec::new();
        }
        text.match_indices(marker).map(|(i, _)| i).collect()
    }

    fn extract_quoted_field<'a>(
        &self,
        text: &'a str,
        anchor: usize,
        lookback: usize,
    ) -> Option<&'a str> {
        let head = text.get(..anchor)?;
        let (quote, _) = head
            .char_indices()
            .rev()
            .take(lookback)
            .find(|(_, c)| *c == '"')?;
        Some(head[quote + 1..].trim())
    }
}

/// Move `idx` back by up to `n` characters.
pub(crate) fn back_chars(text: &str, idx: usize, n: usize) -> usize {
    if n == 0 {
        return idx;
    }
    text[..idx]
        .char_indices()
        .rev()
        .take(n)
        .last()
        .map_or(idx, |(i, _)| i)
}

/// Move `idx` forward by up to `n` characters.
pub(crate) fn forward_chars(text: &str, idx: usize, n: usize) -> usize {
    text[idx..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(i, _)| idx + i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_returns_every_occurrence() {
        let offsets = QuoteScan.find("a miles b miles c", "miles");
        assert_eq!(offsets, vec![2, 10]);
    }

    #[test]
    fn find_adjacent_single_char_markers() {
        let offsets = QuoteScan.find("aaa", "a");
        assert_eq!(offsets, vec![0, 1, 2]);
    }

    #[test]
    fn find_empty_marker_finds_nothing() {
        assert!(QuoteScan.find("anything", "").is_empty());
    }

    #[test]
    fn quoted_field_is_trimmed() {
        let text = r#"[\"12.3 miles\"]"#;
        let anchor = text.find("miles").unwrap();
        assert_eq!(QuoteScan.extract_quoted_field(text, anchor, 10), Some("12.3"));
    }

    #[test]
    fn quote_beyond_lookback_is_not_found() {
        let text = r#""123456789012 min"#;
        let anchor = text.find("min").unwrap();
        assert_eq!(QuoteScan.extract_quoted_field(text, anchor, 10), None);
        assert_eq!(
            QuoteScan.extract_quoted_field(text, anchor, 14),
            Some("123456789012")
        );
    }

    #[test]
    fn nearest_quote_wins() {
        let text = r#""1" "2 min"#;
        let anchor = text.find("min").unwrap();
        assert_eq!(QuoteScan.extract_quoted_field(text, anchor, 10), Some("2"));
    }

    #[test]
    fn lookback_counts_characters_not_bytes() {
        // The en dash is three bytes but one character.
        let text = "\"10–15 min";
        let anchor = text.find("min").unwrap();
        assert_eq!(QuoteScan.extract_quoted_field(text, anchor, 7), Some("10–15"));
    }

    #[test]
    fn anchor_off_char_boundary_yields_none() {
        let text = "\"–";
        assert_eq!(QuoteScan.extract_quoted_field(text, 2, 10), None);
    }

    #[test]
    fn char_stepping_clamps_at_bounds() {
        let text = "ab–cd";
        assert_eq!(back_chars(text, 2, 50), 0);
        assert_eq!(back_chars(text, 5, 1), 2);
        assert_eq!(forward_chars(text, 2, 1), 5);
        assert_eq!(forward_chars(text, 2, 100), text.len());
    }
}
