//! Suggestion providers for argument nodes
//!
//! An argument node may carry a custom provider. Providers run while the user is
//! still typing, can be asynchronous (for example to read a live roster), and must
//! not fail: the worst they may return is an empty set.

use async_trait::async_trait;

use super::context::CommandContext;
use crate::suggestion::{Suggestions, SuggestionsBuilder};

/// Produces suggestions for one argument node
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    /// Suggest values for the argument
    ///
    /// # Arguments
    /// * `context` - Arguments parsed so far on the current path
    /// * `builder` - Builder anchored where the argument starts
    async fn suggestions(
        &self,
        context: &CommandContext<'_>,
        builder: SuggestionsBuilder,
    ) -> Suggestions;
}

/// Adapter turning a synchronous closure into a [`SuggestionProvider`]
pub(crate) struct FnProvider<F>(pub(crate) F);

#[async_trait]
impl<F> SuggestionProvider for FnProvider<F>
where
    F: Fn(&CommandContext<'_>, SuggestionsBuilder) -> Suggestions + Send + Sync,
{
    async fn suggestions(
        &self,
        context: &CommandContext<'_>,
        builder: SuggestionsBuilder,
    ) -> Suggestions {
        (self.0)(context, builder)
    }
}

/// Provider suggesting a fixed list of values
#[derive(Debug, Clone)]
pub struct StaticSuggestions {
    values: Vec<(String, Option<String>)>,
}

impl StaticSuggestions {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(|v| (v.into(), None)).collect(),
        }
    }

    /// Append a value with a tooltip
    pub fn with_tooltip(mut self, value: impl Into<String>, tooltip: impl Into<String>) -> Self {
        self.values.push((value.into(), Some(tooltip.into())));
        self
    }
}

#[async_trait]
impl SuggestionProvider for StaticSuggestions {
    async fn suggestions(
        &self,
        _context: &CommandContext<'_>,
        mut builder: SuggestionsBuilder,
    ) -> Suggestions {
        for (value, tooltip) in &self.values {
            match tooltip {
                Some(tooltip) => builder.suggest_with_tooltip(value.clone(), tooltip.clone()),
                None => builder.suggest(value.clone()),
            };
        }
        builder.build()
    }
}
