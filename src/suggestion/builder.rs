//! Builder that filters candidate strings against unconsumed input

use super::{StringRange, Suggestion, Suggestions};

/// Collects suggestions for the text starting at an anchor position
///
/// Candidates are accepted only when the text typed so far (`remaining`) is empty
/// or a case-insensitive prefix of the candidate. Every accepted candidate replaces
/// `[start, input.len())`.
#[derive(Debug, Clone)]
pub struct SuggestionsBuilder {
    input: String,
    start: usize,
    remaining: String,
    remaining_lower: String,
    result: Vec<Suggestion>,
}

impl SuggestionsBuilder {
    /// Create a builder over `input` anchored at byte offset `start`
    ///
    /// The anchor is clamped to the input length.
    pub fn new(input: impl Into<String>, start: usize) -> Self {
        let input = input.into();
        let mut start = start.min(input.len());
        while !input.is_char_boundary(start) {
            start -= 1;
        }
        let remaining = input[start..].to_string();
        let remaining_lower = remaining.to_lowercase();
        Self {
            input,
            start,
            remaining,
            remaining_lower,
            result: Vec::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Text from the anchor to the end of input
    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    /// Lowercased [`remaining`](Self::remaining)
    pub fn remaining_lowercase(&self) -> &str {
        &self.remaining_lower
    }

    /// Whether `text` would pass the prefix filter
    pub fn matches(&self, text: &str) -> bool {
        self.remaining.is_empty() || text.to_lowercase().starts_with(&self.remaining_lower)
    }

    fn range(&self) -> StringRange {
        StringRange::new(self.start, self.input.len())
    }

    /// Offer `text` as a replacement for the remaining input
    pub fn suggest(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if self.matches(&text) {
            let range = self.range();
            self.result.push(Suggestion::new(range, text));
        }
        self
    }

    /// Offer `text` with a tooltip
    pub fn suggest_with_tooltip(
        &mut self,
        text: impl Into<String>,
        tooltip: impl Into<String>,
    ) -> &mut Self {
        let text = text.into();
        if self.matches(&text) {
            let range = self.range();
            self.result
                .push(Suggestion::with_tooltip(range, text, tooltip));
        }
        self
    }

    /// Offer every candidate from an iterator
    pub fn suggest_all<I, S>(&mut self, candidates: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for candidate in candidates {
            self.suggest(candidate);
        }
        self
    }

    /// Fresh builder over the same input with the same anchor
    pub fn restart(&self) -> SuggestionsBuilder {
        SuggestionsBuilder::new(self.input.clone(), self.start)
    }

    /// Fresh builder over the same input anchored at `start`
    pub fn create_offset(&self, start: usize) -> SuggestionsBuilder {
        SuggestionsBuilder::new(self.input.clone(), start)
    }

    /// Finalize into a canonical set
    pub fn build(self) -> Suggestions {
        let range = self
            .result
            .iter()
            .map(Suggestion::range)
            .reduce(StringRange::encompassing)
            .unwrap_or(StringRange::at(self.start));
        Suggestions::new(range, self.result)
    }

    /// Finalize into a canonical set, as a future
    pub async fn build_async(self) -> Suggestions {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(suggestions: &Suggestions) -> Vec<&str> {
        suggestions.list().iter().map(|s| s.text()).collect()
    }

    #[test]
    fn test_prefix_filter() {
        let mut builder = SuggestionsBuilder::new("te", 0);
        builder.suggest("test");
        builder.suggest("hello");
        let built = builder.build();
        assert_eq!(texts(&built), vec!["test"]);
        assert_eq!(built.range(), StringRange::new(0, 2));
    }

    #[test]
    fn test_prefix_filter_is_case_insensitive() {
        let mut builder = SuggestionsBuilder::new("give St", 5);
        builder.suggest("steve").suggest("STONE").suggest("alex");
        assert_eq!(texts(&builder.build()), vec!["steve", "STONE"]);
    }

    #[test]
    fn test_empty_remaining_accepts_everything() {
        let mut builder = SuggestionsBuilder::new("gamemode ", 9);
        builder.suggest_all(["survival", "creative"]);
        let built = builder.build();
        assert_eq!(texts(&built), vec!["creative", "survival"]);
        assert_eq!(built.range(), StringRange::at(9));
    }

    #[test]
    fn test_exact_match_is_kept() {
        let mut builder = SuggestionsBuilder::new("true", 0);
        builder.suggest("true");
        assert_eq!(texts(&builder.build()), vec!["true"]);
    }

    #[test]
    fn test_tooltip_is_recorded() {
        let mut builder = SuggestionsBuilder::new("", 0);
        builder.suggest_with_tooltip("creative", "Unlimited resources");
        let built = builder.build();
        assert_eq!(built.list()[0].tooltip(), Some("Unlimited resources"));
    }

    #[test]
    fn test_restart_and_offset() {
        let mut builder = SuggestionsBuilder::new("tp 10 20", 3);
        builder.suggest("10");
        let restarted = builder.restart();
        assert_eq!(restarted.start(), 3);
        assert!(restarted.build().is_empty());

        let offset = builder.create_offset(6);
        assert_eq!(offset.remaining(), "20");
        assert_eq!(offset.input(), "tp 10 20");
    }

    #[test]
    fn test_anchor_is_clamped() {
        let builder = SuggestionsBuilder::new("abc", 10);
        assert_eq!(builder.start(), 3);
        assert_eq!(builder.remaining(), "");
    }

    #[tokio::test]
    async fn test_build_async() {
        let mut builder = SuggestionsBuilder::new("he", 0);
        builder.suggest("help");
        let built = builder.build_async().await;
        assert_eq!(texts(&built), vec!["help"]);
    }
}
