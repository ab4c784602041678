//! Command dispatcher routing input lines to registered commands
//!
//! The dispatcher owns every [`Command`] and indexes them by name and alias. It
//! routes a full line to the command its first token names, completes command
//! labels while the first token is still being typed, and lists help entries.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use super::{Command, truncate_at};
use crate::error::{BuildError, DispatchError, Result};
use crate::parser::CursorScanner;
use crate::sender::CommandSender;
use crate::suggestion::{Suggestions, SuggestionsBuilder};

/// Help information for one command as a given sender sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelpEntry {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub usage: String,
}

/// Registry of commands keyed by name and alias
#[derive(Debug, Default)]
pub struct CommandDispatcher {
    commands: Vec<Command>,
    labels: HashMap<String, usize>,
}

impl CommandDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command under its name and aliases
    ///
    /// # Errors
    /// Returns `DuplicateLabel` if the name or an alias is already taken. Nothing is
    /// registered in that case.
    pub fn register(&mut self, command: Command) -> std::result::Result<(), BuildError> {
        if let Some(taken) = command.labels().find(|label| self.labels.contains_key(*label)) {
            return Err(BuildError::DuplicateLabel(taken.to_string()));
        }

        let index = self.commands.len();
        for label in command.labels() {
            self.labels.insert(label.to_string(), index);
        }
        debug!("Registered command '{}'", command.name());
        self.commands.push(command);
        Ok(())
    }

    /// Look up a command by name or alias
    pub fn find(&self, label: &str) -> Option<&Command> {
        self.labels.get(label).map(|&index| &self.commands[index])
    }

    /// Commands in registration order
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Route a line to the command its first token names
    ///
    /// # Arguments
    /// * `sender` - Who issued the line
    /// * `line` - Full input line
    ///
    /// # Returns
    /// * `Result<i32>` - Executor result or dispatch error
    pub fn execute(&self, sender: &dyn CommandSender, line: &str) -> Result<i32> {
        let label = CursorScanner::new(line).read_unquoted_string();
        let command = self
            .find(label)
            .ok_or_else(|| DispatchError::UnknownCommand(label.to_string()))?;

        debug!("Dispatching '{}' to command '{}'", line, command.name());
        command.execute(sender, line)
    }

    /// Complete a partial line
    ///
    /// While the first token is incomplete every label of every command the sender
    /// can use is offered; afterwards the named command completes the rest.
    pub async fn suggestions(&self, sender: &dyn CommandSender, line: &str) -> Suggestions {
        let mut scanner = CursorScanner::new(line);
        let label = scanner.read_unquoted_string();

        if !scanner.at_whitespace() {
            let mut builder = SuggestionsBuilder::new(line, 0);
            for command in self.commands.iter().filter(|c| c.can_use(sender)) {
                builder.suggest_all(command.labels());
            }
            return builder.build();
        }

        match self.find(label) {
            Some(command) => command.get_suggestions(sender, line).await,
            None => Suggestions::empty_at(line.len()),
        }
    }

    /// Complete the part of `line` before `cursor`
    pub async fn suggestions_at(
        &self,
        sender: &dyn CommandSender,
        line: &str,
        cursor: usize,
    ) -> Suggestions {
        self.suggestions(sender, truncate_at(line, cursor)).await
    }

    /// Help for every command the sender can use, sorted by name
    pub fn help_entries(&self, sender: &dyn CommandSender) -> Vec<HelpEntry> {
        let mut entries: Vec<HelpEntry> = self
            .commands
            .iter()
            .filter(|command| command.can_use(sender))
            .map(|command| HelpEntry {
                name: command.name().to_string(),
                aliases: command.aliases().to_vec(),
                description: command.description().to_string(),
                usage: command.usage(sender),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CmdTreeError;
    use crate::parser::ArgumentType;
    use crate::sender::ConsoleSender;
    use crate::tree::{argument, literal};

    fn dispatcher() -> CommandDispatcher {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher
            .register(
                Command::builder(
                    literal("teleport").then(
                        argument("x", ArgumentType::double())
                            .then(argument("y", ArgumentType::double()).executes(|_| Ok(2))),
                    ),
                )
                .alias("tp")
                .description("Move somewhere")
                .build()
                .unwrap(),
            )
            .unwrap();
        dispatcher
            .register(
                Command::builder(literal("echo").executes(|_| Ok(1)))
                    .description("Say something")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        dispatcher
            .register(
                Command::builder(literal("stop").executes(|_| Ok(0)))
                    .permission("cmdtree.stop")
                    .build()
                    .unwrap(),
            )
            .unwrap();
        dispatcher
    }

    #[test]
    fn test_routes_by_name_and_alias() {
        let dispatcher = dispatcher();
        let sender = ConsoleSender::new("console");
        assert_eq!(dispatcher.execute(&sender, "echo").unwrap(), 1);
        assert_eq!(dispatcher.execute(&sender, "tp 1 2").unwrap(), 2);
        assert_eq!(dispatcher.find("tp").unwrap().name(), "teleport");
    }

    #[test]
    fn test_unknown_label() {
        let dispatcher = dispatcher();
        let sender = ConsoleSender::new("console");
        assert!(matches!(
            dispatcher.execute(&sender, "fly"),
            Err(CmdTreeError::Dispatch(DispatchError::UnknownCommand(ref label))) if label == "fly"
        ));
    }

    #[test]
    fn test_duplicate_label_is_rejected() {
        let mut dispatcher = dispatcher();
        let clash = Command::builder(literal("tp")).build().unwrap();
        assert_eq!(
            dispatcher.register(clash).unwrap_err(),
            BuildError::DuplicateLabel("tp".to_string())
        );
        assert_eq!(dispatcher.len(), 3);
    }

    #[tokio::test]
    async fn test_label_completion_hides_unusable_commands() {
        let dispatcher = dispatcher();
        let guest = ConsoleSender::new("guest");
        let suggestions = dispatcher.suggestions(&guest, "").await;
        assert_eq!(suggestions.texts(), vec!["echo", "teleport", "tp"]);

        let op = ConsoleSender::new("op").with_operator(true);
        let suggestions = dispatcher.suggestions(&op, "st").await;
        assert_eq!(suggestions.texts(), vec!["stop"]);
    }

    #[tokio::test]
    async fn test_delegates_past_the_label() {
        let dispatcher = dispatcher();
        let sender = ConsoleSender::new("console");
        assert!(dispatcher.suggestions(&sender, "tp ").await.is_empty());
        assert!(dispatcher.suggestions(&sender, "nope ").await.is_empty());
    }

    #[test]
    fn test_help_entries_sorted_and_filtered() {
        let dispatcher = dispatcher();
        let sender = ConsoleSender::new("console");
        let entries = dispatcher.help_entries(&sender);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["echo", "teleport"]);
        assert_eq!(entries[1].aliases, vec!["tp".to_string()]);
        assert_eq!(entries[1].usage, "teleport <x> <y>");
    }
}
