//! Hinter for reedline - completes the current token inline
//!
//! When exactly one suggestion extends the token under the cursor, the rest of it
//! is shown as a dimmed hint. Otherwise the most recent history entry with the same
//! prefix is used.

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{Hinter, History};

use crate::command::CommandDispatcher;
use crate::sender::CommandSender;

/// Inline hinter backed by the suggestion engine and history
pub struct TreeHinter {
    dispatcher: Arc<CommandDispatcher>,
    sender: Arc<dyn CommandSender>,
    /// Style for hints
    style: Style,
    /// Current hint text
    current_hint: String,
}

impl TreeHinter {
    pub fn new(dispatcher: Arc<CommandDispatcher>, sender: Arc<dyn CommandSender>) -> Self {
        Self {
            dispatcher,
            sender,
            style: Style::new().italic().fg(Color::DarkGray),
            current_hint: String::new(),
        }
    }

    fn suggestion_hint(&self, line: &str) -> Option<String> {
        let suggestions =
            futures::executor::block_on(self.dispatcher.suggestions(self.sender.as_ref(), line));
        let [only] = suggestions.list() else {
            return None;
        };

        let typed = line.get(only.range().start()..)?;
        let rest = only.text().get(typed.len()..)?;
        let extends = only.text().len() > typed.len() && only.text().starts_with(typed);
        extends.then(|| rest.to_string())
    }

    fn history_hint(line: &str, history: &dyn History) -> Option<String> {
        let item = history
            .search(reedline::SearchQuery::last_with_prefix(line.to_string(), None))
            .ok()
            .and_then(|results| results.into_iter().next())?;

        let history_line = item.command_line.as_str();
        if history_line.len() > line.len() && history_line.starts_with(line) {
            Some(history_line[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Hinter for TreeHinter {
    /// Provide a hint for the current line
    ///
    /// # Arguments
    /// * `line` - The current input line
    /// * `pos` - Cursor position
    /// * `history` - Command history
    /// * `use_ansi_coloring` - Whether to use ANSI colors
    /// * `_cwd` - Current working directory (unused)
    ///
    /// # Returns
    /// * `String` - Hint text to display after the cursor
    fn handle(
        &mut self,
        line: &str,
        pos: usize,
        history: &dyn History,
        use_ansi_coloring: bool,
        _cwd: &str,
    ) -> String {
        self.current_hint.clear();

        if pos != line.len() || line.trim().is_empty() {
            return String::new();
        }

        let Some(hint) = self
            .suggestion_hint(line)
            .or_else(|| Self::history_hint(line, history))
        else {
            return String::new();
        };

        self.current_hint = hint;
        if use_ansi_coloring {
            self.style.paint(&self.current_hint).to_string()
        } else {
            self.current_hint.clone()
        }
    }

    fn complete_hint(&self) -> String {
        self.current_hint.clone()
    }

    /// Return the next word of the hint
    fn next_hint_token(&self) -> String {
        let trimmed = self.current_hint.trim_start();
        let leading = self.current_hint.len() - trimmed.len();
        let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
        self.current_hint[..leading + end].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{self, World};
    use crate::sender::ConsoleSender;
    use reedline::FileBackedHistory;

    fn create_test_history() -> Box<dyn History> {
        let path = std::env::temp_dir().join(format!("cmdtree-hinter-{}.txt", std::process::id()));
        Box::new(FileBackedHistory::with_file(100, path).unwrap())
    }

    fn create_test_hinter() -> TreeHinter {
        let dispatcher = builtin::dispatcher(Arc::new(World::default())).unwrap();
        let sender = Arc::new(ConsoleSender::new("console").with_permission("cmdtree.*"));
        TreeHinter::new(dispatcher, sender)
    }

    #[test]
    fn test_unique_suggestion_is_hinted() {
        let mut hinter = create_test_hinter();
        let history = create_test_history();
        let hint = hinter.handle("gamemode cr", 11, history.as_ref(), false, "/tmp");
        assert_eq!(hint, "eative");
        assert_eq!(hinter.complete_hint(), "eative");
    }

    #[test]
    fn test_ambiguous_prefix_has_no_suggestion_hint() {
        let mut hinter = create_test_hinter();
        let history = create_test_history();
        let hint = hinter.handle("gamemode s", 10, history.as_ref(), false, "/tmp");
        assert_eq!(hint, "");
    }

    #[test]
    fn test_empty_line_no_hint() {
        let mut hinter = create_test_hinter();
        let history = create_test_history();
        assert_eq!(hinter.handle("", 0, history.as_ref(), true, "/tmp"), "");
    }

    #[test]
    fn test_cursor_not_at_end_no_hint() {
        let mut hinter = create_test_hinter();
        let history = create_test_history();
        assert_eq!(hinter.handle("gamemode cr", 3, history.as_ref(), true, "/tmp"), "");
    }

    #[test]
    fn test_next_hint_token() {
        let mut hinter = create_test_hinter();
        hinter.current_hint = " steve diamond".to_string();
        assert_eq!(hinter.next_hint_token(), " steve");
    }
}
