//! Text markers and bounds used when scanning a directions page.

/// Configuration for route-candidate extraction.
///
/// The defaults match the escaped JavaScript strings embedded in a
/// directions page, where a route reads like `\"12.3 miles\"` followed by
/// one or more `\"25 min\"` duration estimates.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Marker that starts a candidate window.
    pub window_marker: String,

    /// Characters kept before each window marker.
    pub before: usize,

    /// Characters kept after each window marker.
    pub after: usize,

    /// Escaped distance unit that ends the distance field.
    pub distance_anchor: String,

    /// Escaped duration unit that ends each duration field.
    pub duration_anchor: String,

    /// Unit separating hours from minutes inside a duration field.
    pub hour_unit: String,

    /// How far back from an anchor to look for the opening quote.
    pub lookback: usize,

    /// Any of these in a window marks it as a non-driving route.
    pub transit_tokens: Vec<String>,

    /// Characters that mark a duration field as a range, not a reading.
    pub range_chars: Vec<char>,
}

impl ExtractConfig {
    /// Set the window size around each marker.
    pub fn with_window(mut self, before: usize, after: usize) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    /// Set the quote lookback bound.
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    /// Replace the transit tokens.
    pub fn with_transit_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transit_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            window_marker: "miles".to_string(),
            before: 50,
            after: 1300,
            distance_anchor: "miles\\".to_string(),
            duration_anchor: "min\\".to_string(),
            hour_unit: "hr".to_string(),
            lookback: 10,
            transit_tokens: ["every", "Ticket", "$", "Walk", "Transit", "Train"]
                .into_iter()
                .map(String::from)
                .collect(),
            range_chars: vec!['\u{2013}', '\u{2014}', '-'],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ExtractConfig::default();

        assert_eq!(config.window_marker, "miles");
        assert_eq!(config.before, 50);
        assert_eq!(config.after, 1300);
        assert_eq!(config.distance_anchor, "miles\\");
        assert_eq!(config.duration_anchor, "min\\");
        assert_eq!(config.lookback, 10);
        assert_eq!(config.transit_tokens.len(), 6);
        assert!(config.range_chars.contains(&'–'));
    }

    #[test]
    fn custom_config() {
        let config = ExtractConfig::default()
            .with_window(10, 200)
            .with_lookback(4)
            .with_transit_tokens(["Ferry"]);

        assert_eq!(config.before, 10);
        assert_eq!(config.after, 200);
        assert_eq!(config.lookback, 4);
        assert_eq!(config.transit_tokens, vec!["Ferry".to_string()]);
    }
}
