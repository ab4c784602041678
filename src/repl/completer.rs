//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use crate::command::CommandDispatcher;
use crate::sender::CommandSender;

/// Completer backed by the dispatcher's suggestion engine
pub struct TreeCompleter {
    dispatcher: Arc<CommandDispatcher>,
    sender: Arc<dyn CommandSender>,
    show_tooltips: bool,
}

impl TreeCompleter {
    /// Create a new completer
    ///
    /// # Arguments
    /// * `dispatcher` - Commands to complete against
    /// * `sender` - Sender whose permissions decide what is visible
    /// * `show_tooltips` - Whether suggestion tooltips become menu descriptions
    ///
    /// # Returns
    /// * `Self` - New completer
    pub fn new(
        dispatcher: Arc<CommandDispatcher>,
        sender: Arc<dyn CommandSender>,
        show_tooltips: bool,
    ) -> Self {
        Self {
            dispatcher,
            sender,
            show_tooltips,
        }
    }
}

impl Completer for TreeCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let suggestions = futures::executor::block_on(self.dispatcher.suggestions_at(
            self.sender.as_ref(),
            line,
            pos,
        ));

        suggestions
            .into_iter()
            .map(|suggestion| Suggestion {
                value: suggestion.text().to_string(),
                description: if self.show_tooltips {
                    suggestion.tooltip().map(str::to_string)
                } else {
                    None
                },
                span: Span::new(suggestion.range().start(), suggestion.range().end()),
                append_whitespace: true,
                ..Default::default()
            })
            .collect()
    }
}
