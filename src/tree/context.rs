//! Per-invocation command context

use std::collections::HashMap;
use std::fmt;

use crate::command::Command;
use crate::error::CommandError;
use crate::parser::{ArgumentValue, FromArgumentValue};
use crate::sender::CommandSender;

/// Everything an executor or suggestion provider learns about one invocation
///
/// Built fresh for every execute/suggest pass and never mutated afterwards. It
/// borrows the sender, the input and the command; argument values are owned copies.
pub struct CommandContext<'a> {
    sender: &'a dyn CommandSender,
    input: &'a str,
    label: &'a str,
    arguments: HashMap<String, ArgumentValue>,
    command: &'a Command,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(
        sender: &'a dyn CommandSender,
        input: &'a str,
        label: &'a str,
        arguments: HashMap<String, ArgumentValue>,
        command: &'a Command,
    ) -> Self {
        Self {
            sender,
            input,
            label,
            arguments,
            command,
        }
    }

    pub fn sender(&self) -> &'a dyn CommandSender {
        self.sender
    }

    /// The raw input line
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Name or alias the command was invoked with
    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn command(&self) -> &'a Command {
        self.command
    }

    /// All resolved arguments
    pub fn arguments(&self) -> &HashMap<String, ArgumentValue> {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentValue> {
        self.arguments.get(name)
    }

    pub fn has_argument(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    /// Typed lookup of a required argument
    ///
    /// # Errors
    /// Returns a [`CommandError`] if the argument is missing or has another type.
    pub fn get<T: FromArgumentValue>(&self, name: &str) -> Result<T, CommandError> {
        let value = self
            .arguments
            .get(name)
            .ok_or_else(|| CommandError::new(format!("No such argument '{name}' exists on this command")))?;
        T::from_value(value).ok_or_else(|| {
            CommandError::new(format!(
                "Argument '{name}' is defined as {value:?}, not {}",
                T::TYPE_NAME
            ))
        })
    }

    /// Typed lookup of an optional argument
    pub fn get_or<T: FromArgumentValue>(&self, name: &str, default: T) -> T {
        self.arguments
            .get(name)
            .and_then(T::from_value)
            .unwrap_or(default)
    }

    /// Send a message to the sender
    pub fn reply(&self, message: &str) {
        self.sender.send_message(message);
    }
}

impl fmt::Debug for CommandContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("sender", &self.sender.name())
            .field("input", &self.input)
            .field("label", &self.label)
            .field("arguments", &self.arguments)
            .field("command", &self.command.name())
            .finish()
    }
}
