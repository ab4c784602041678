//! Highlighter coloring the command label by whether it resolves

use std::sync::Arc;

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::command::CommandDispatcher;
use crate::sender::CommandSender;

/// Colors a known, usable label green and anything else in the label slot red
pub struct LabelHighlighter {
    dispatcher: Arc<CommandDispatcher>,
    sender: Arc<dyn CommandSender>,
    enabled: bool,
}

impl LabelHighlighter {
    pub fn new(dispatcher: Arc<CommandDispatcher>, sender: Arc<dyn CommandSender>, enabled: bool) -> Self {
        Self {
            dispatcher,
            sender,
            enabled,
        }
    }

    fn label_style(&self, label: &str) -> Style {
        match self.dispatcher.find(label) {
            Some(command) if command.can_use(self.sender.as_ref()) => Color::Green.bold(),
            _ => Style::new().fg(Color::Red),
        }
    }
}

impl Highlighter for LabelHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let start = line.len() - line.trim_start().len();
        let end = line[start..]
            .find(char::is_whitespace)
            .map_or(line.len(), |offset| start + offset);

        if start > 0 {
            styled.push((Style::default(), line[..start].to_string()));
        }
        if end > start {
            let label = &line[start..end];
            styled.push((self.label_style(label), label.to_string()));
        }
        if end < line.len() {
            styled.push((Style::default(), line[end..].to_string()));
        }
        styled
    }
}
