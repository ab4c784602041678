//! Custom prompt implementation for the cmdtree shell

use nu_ansi_term::Color;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Prompt showing the sender name and the configured prompt text
pub struct ShellPrompt {
    /// Sender display name
    sender: String,
    /// Prompt text
    prompt: String,
    /// Operators get a `#` indicator
    operator: bool,
    color: bool,
}

impl ShellPrompt {
    /// Create a new prompt
    ///
    /// # Arguments
    /// * `sender` - Sender display name
    /// * `prompt` - Prompt text
    /// * `operator` - Whether the sender is an operator
    /// * `color` - Whether to color the prompt
    ///
    /// # Returns
    /// * `Self` - New prompt
    pub fn new(sender: String, prompt: String, operator: bool, color: bool) -> Self {
        Self {
            sender,
            prompt,
            operator,
            color,
        }
    }
}

impl Prompt for ShellPrompt {
    /// Render the left prompt (main prompt)
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        if self.color {
            format!(
                "{}@{}",
                Color::Cyan.paint(&self.sender),
                Color::Green.bold().paint(&self.prompt)
            )
            .into()
        } else {
            format!("{}@{}", self.sender, self.prompt).into()
        }
    }

    /// Render the right prompt (empty in our case)
    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the prompt indicator
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        if self.operator { "# ".into() } else { "> ".into() }
    }

    /// Render the multiline prompt indicator, shown while a quote is open
    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "... ".into()
    }

    /// Render the history search prompt
    ///
    /// # Arguments
    /// * `history_search` - History search state
    ///
    /// # Returns
    /// * `std::borrow::Cow<str>` - History search prompt
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}
