//! Suggestion primitives for partial-input completion
//!
//! The suggestion engine produces [`Suggestions`]: a range of the user's input plus
//! an ordered list of replacement candidates.
//!
//! # Architecture
//!
//! - **StringRange**: half-open byte range over the input line
//! - **Suggestion**: one replacement candidate with an optional tooltip
//! - **Suggestions**: a canonical (sorted, deduplicated) set of candidates
//! - **SuggestionsBuilder**: filters candidates against the unconsumed input
//! - **merge**: combines the sets produced by several tree nodes
//!
//! # Examples
//!
//! ```
//! use cmdtree::suggestion::SuggestionsBuilder;
//!
//! let mut builder = SuggestionsBuilder::new("gamemode cr", 9);
//! builder.suggest("creative").suggest("survival");
//! let suggestions = builder.build();
//!
//! assert_eq!(suggestions.list().len(), 1);
//! assert_eq!(suggestions.list()[0].apply("gamemode cr"), "gamemode creative");
//! ```

mod builder;
mod range;

pub use builder::SuggestionsBuilder;
pub use range::StringRange;

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

/// A proposed replacement for a range of the input
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Suggestion {
    range: StringRange,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    tooltip: Option<String>,
}

impl Suggestion {
    pub fn new(range: StringRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
            tooltip: None,
        }
    }

    pub fn with_tooltip(range: StringRange, text: impl Into<String>, tooltip: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
            tooltip: Some(tooltip.into()),
        }
    }

    pub fn range(&self) -> StringRange {
        self.range
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Replace this suggestion's range of `input` with its text
    pub fn apply(&self, input: &str) -> String {
        if self.range.start() == 0 && self.range.end() >= input.len() {
            return self.text.clone();
        }
        let start = self.range.start().min(input.len());
        let end = self.range.end().min(input.len());
        let mut result = String::with_capacity(input.len() + self.text.len());
        result.push_str(input.get(..start).unwrap_or(""));
        result.push_str(&self.text);
        result.push_str(input.get(end..).unwrap_or(""));
        result
    }

    /// Canonical ordering: case-insensitive by text
    ///
    /// Ties fall back to the exact text, then the tooltip, then the range, so that a
    /// sorted list does not depend on the order its entries arrived in.
    pub fn compare(&self, other: &Suggestion) -> Ordering {
        self.text
            .to_lowercase()
            .cmp(&other.text.to_lowercase())
            .then_with(|| self.text.cmp(&other.text))
            .then_with(|| self.tooltip.cmp(&other.tooltip))
            .then_with(|| self.range.cmp(&other.range))
    }
}

/// A canonical set of suggestions over one input range
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Suggestions {
    range: StringRange,
    suggestions: Vec<Suggestion>,
}

impl Suggestions {
    /// Create a set, sorting and deduplicating `suggestions`
    pub fn new(range: StringRange, suggestions: Vec<Suggestion>) -> Self {
        Self {
            range,
            suggestions: canonicalize(suggestions),
        }
    }

    /// Empty set anchored at `pos`
    pub fn empty_at(pos: usize) -> Self {
        Self {
            range: StringRange::at(pos),
            suggestions: Vec::new(),
        }
    }

    /// Empty set anchored at the start of input
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn range(&self) -> StringRange {
        self.range
    }

    pub fn list(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    /// Replacement texts in order
    pub fn texts(&self) -> Vec<&str> {
        self.suggestions.iter().map(Suggestion::text).collect()
    }

    /// Merge several sets into one
    ///
    /// All suggestions are concatenated, sorted, and deduplicated by exact text; the
    /// merged range covers every input range. A single input is returned as is and
    /// no input yields [`Suggestions::empty`].
    pub fn merge(sets: impl IntoIterator<Item = Suggestions>) -> Suggestions {
        let mut sets = sets.into_iter();
        let Some(first) = sets.next() else {
            return Suggestions::empty();
        };
        let Some(second) = sets.next() else {
            return first;
        };

        let mut range = StringRange::encompassing(first.range, second.range);
        let mut all = first.suggestions;
        all.extend(second.suggestions);
        for set in sets {
            range = StringRange::encompassing(range, set.range);
            all.extend(set.suggestions);
        }

        Suggestions::new(range, all)
    }
}

impl IntoIterator for Suggestions {
    type Item = Suggestion;
    type IntoIter = std::vec::IntoIter<Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.suggestions.into_iter()
    }
}

/// Sort by [`Suggestion::compare`] and keep the first entry for each exact text
fn canonicalize(mut suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    suggestions.sort_by(Suggestion::compare);
    let mut seen = HashSet::new();
    suggestions.retain(|s| seen.insert(s.text.clone()));
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(range: StringRange, texts: &[&str]) -> Suggestions {
        Suggestions::new(
            range,
            texts.iter().map(|t| Suggestion::new(range, *t)).collect(),
        )
    }

    #[test]
    fn test_apply_replaces_range() {
        let suggestion = Suggestion::new(StringRange::new(6, 9), "world");
        assert_eq!(suggestion.apply("hello wor"), "hello world");
    }

    #[test]
    fn test_apply_whole_input() {
        let suggestion = Suggestion::new(StringRange::new(0, 3), "give");
        assert_eq!(suggestion.apply("giv"), "give");
    }

    #[test]
    fn test_apply_insert_in_middle() {
        let suggestion = Suggestion::new(StringRange::at(5), "big ");
        assert_eq!(suggestion.apply("echo world"), "echo big world");
    }

    #[test]
    fn test_merge_sorts_case_insensitively() {
        let range = StringRange::at(0);
        let merged = Suggestions::merge(vec![
            set(range, &["zebra"]),
            set(range, &["apple"]),
            set(range, &["mango"]),
        ]);
        assert_eq!(merged.texts(), vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_merge_mixed_case_order() {
        let range = StringRange::at(0);
        let merged = Suggestions::merge(vec![set(range, &["Banana", "apple"]), set(range, &["Cherry"])]);
        assert_eq!(merged.texts(), vec!["apple", "Banana", "Cherry"]);
    }

    #[test]
    fn test_merge_deduplicates_exact_text() {
        let range = StringRange::at(0);
        let merged = Suggestions::merge(vec![set(range, &["test"]), set(range, &["test"])]);
        assert_eq!(merged.texts(), vec!["test"]);
    }

    #[test]
    fn test_merge_keeps_case_variants() {
        let range = StringRange::at(0);
        let merged = Suggestions::merge(vec![set(range, &["test"]), set(range, &["Test"])]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_is_order_independent() {
        let a = Suggestions::new(
            StringRange::new(2, 4),
            vec![
                Suggestion::with_tooltip(StringRange::new(2, 4), "alpha", "first"),
                Suggestion::new(StringRange::new(2, 4), "Beta"),
            ],
        );
        let b = Suggestions::new(
            StringRange::new(3, 4),
            vec![
                Suggestion::new(StringRange::new(3, 4), "alpha"),
                Suggestion::new(StringRange::new(3, 4), "gamma"),
            ],
        );
        let c = set(StringRange::new(2, 5), &["beta", "delta"]);

        let orders = [
            vec![a.clone(), b.clone(), c.clone()],
            vec![c.clone(), b.clone(), a.clone()],
            vec![b.clone(), a.clone(), c.clone()],
            vec![c.clone(), a.clone(), b.clone()],
        ];
        let expected = Suggestions::merge(orders[0].clone());
        for order in orders {
            assert_eq!(Suggestions::merge(order), expected);
        }
        assert_eq!(expected.range(), StringRange::new(2, 5));
        assert_eq!(expected.texts(), vec!["alpha", "Beta", "beta", "delta", "gamma"]);
        assert_eq!(expected.list()[0].tooltip(), None);
    }

    #[test]
    fn test_merge_single_is_identity() {
        let only = set(StringRange::new(1, 3), &["x", "y"]);
        assert_eq!(Suggestions::merge(vec![only.clone()]), only);
    }

    #[test]
    fn test_merge_empty() {
        let merged = Suggestions::merge(Vec::new());
        assert!(merged.is_empty());
        assert_eq!(merged.range(), StringRange::at(0));
    }

    #[test]
    fn test_new_is_canonical() {
        let range = StringRange::at(0);
        let built = Suggestions::new(
            range,
            vec![
                Suggestion::new(range, "b"),
                Suggestion::new(range, "a"),
                Suggestion::new(range, "b"),
            ],
        );
        assert_eq!(built.texts(), vec!["a", "b"]);
    }

    #[test]
    fn test_serializes_without_empty_tooltip() {
        let suggestion = Suggestion::new(StringRange::new(0, 2), "give");
        let json = serde_json::to_string(&suggestion).unwrap();
        assert_eq!(json, r#"{"range":{"start":0,"end":2},"text":"give"}"#);
    }
}
