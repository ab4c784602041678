//! Commands: a named root node plus the algorithms that walk it
//!
//! A [`Command`] owns the root literal of a node tree, its aliases, an optional
//! permission and a description. It exposes the three operations a host needs:
//!
//! - [`Command::execute`]: match a full line and run the executor it ends on
//! - [`Command::get_suggestions`]: complete a partial line
//! - [`Command::usage`]: describe the tree as the sender sees it
//!
//! # Matching
//!
//! Matching is greedy and single-path. At every depth the children are tried in
//! insertion order and the first one that consumes a whole token wins; the walker
//! never comes back to try a later sibling.
//!
//! # Examples
//!
//! ```
//! use cmdtree::command::Command;
//! use cmdtree::parser::ArgumentType;
//! use cmdtree::sender::ConsoleSender;
//! use cmdtree::tree::{argument, literal};
//!
//! let command = Command::builder(
//!     literal("double").then(
//!         argument("value", ArgumentType::integer())
//!             .executes(|ctx| Ok(ctx.get::<i32>("value")? * 2)),
//!     ),
//! )
//! .build()
//! .unwrap();
//!
//! let sender = ConsoleSender::new("console");
//! assert_eq!(command.execute(&sender, "double 21").unwrap(), 42);
//! ```

pub mod dispatcher;

pub use dispatcher::{CommandDispatcher, HelpEntry};

use std::collections::HashMap;
use std::fmt;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use tracing::{debug, trace};

use crate::error::{BuildError, CmdTreeError, DispatchError, Result};
use crate::parser::CursorScanner;
use crate::sender::CommandSender;
use crate::suggestion::{Suggestions, SuggestionsBuilder};
use crate::tree::{CommandContext, CommandNode, LiteralBuilder, LiteralNode, NodeMatch, TreeNode};

/// A top-level command
pub struct Command {
    root: LiteralNode,
    aliases: Vec<String>,
    permission: Option<String>,
    description: String,
}

/// Builder for [`Command`]
pub struct CommandBuilder {
    root: LiteralBuilder,
    aliases: Vec<String>,
    permission: Option<String>,
    description: String,
}

impl CommandBuilder {
    /// Add an alternative label
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Require `permission` to see or run the command
    pub fn permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Freeze the tree
    ///
    /// # Errors
    /// * `InvalidLiteral` - a literal or alias is empty or contains whitespace
    /// * `GreedyArgumentHasChildren` - a greedy string argument has children
    /// * `DuplicateArgument` - an argument name repeats along one path
    /// * `DuplicateLabel` - an alias repeats the name or another alias
    pub fn build(self) -> std::result::Result<Command, BuildError> {
        let root = self.root.build_literal(&mut Vec::new())?;

        let mut labels = vec![root.literal().to_string()];
        for alias in &self.aliases {
            if alias.is_empty() || alias.chars().any(char::is_whitespace) {
                return Err(BuildError::InvalidLiteral(alias.clone()));
            }
            if labels.contains(alias) {
                return Err(BuildError::DuplicateLabel(alias.clone()));
            }
            labels.push(alias.clone());
        }

        Ok(Command {
            root,
            aliases: self.aliases,
            permission: self.permission,
            description: self.description,
        })
    }
}

impl Command {
    /// Start building a command rooted at `root`
    pub fn builder(root: LiteralBuilder) -> CommandBuilder {
        CommandBuilder {
            root,
            aliases: Vec::new(),
            permission: None,
            description: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        self.root.literal()
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn permission(&self) -> Option<&str> {
        self.permission.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn root(&self) -> &LiteralNode {
        &self.root
    }

    /// Name followed by every alias
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether `label` is the name or one of the aliases (case-sensitive)
    pub fn matches_label(&self, label: &str) -> bool {
        self.labels().any(|l| l == label)
    }

    /// Whether the sender passes the command permission and the root predicate
    pub fn can_use(&self, sender: &dyn CommandSender) -> bool {
        self.permission
            .as_deref()
            .is_none_or(|permission| sender.has_permission(permission))
            && self.root.can_use(sender)
    }

    /// Match `input` against the tree and run the executor the path ends on
    ///
    /// # Arguments
    /// * `sender` - Who issued the line
    /// * `input` - Full line, label included
    ///
    /// # Returns
    /// * `Result<i32>` - The executor's result
    ///
    /// # Errors
    /// * `UnknownCommand` - first token is neither the name nor an alias
    /// * `PermissionDenied` - sender fails the command access check
    /// * `UnknownArgument` - input remains but no visible child matches it
    /// * `IncompleteCommand` - no executor on the matched path
    /// * `Command` - the executor itself failed
    pub fn execute(&self, sender: &dyn CommandSender, input: &str) -> Result<i32> {
        let mut scanner = CursorScanner::new(input);
        let label = scanner.read_unquoted_string();
        if !self.matches_label(label) {
            return Err(DispatchError::UnknownCommand(label.to_string()).into());
        }
        if !self.can_use(sender) {
            return Err(DispatchError::PermissionDenied {
                command: self.name().to_string(),
            }
            .into());
        }

        let mut arguments = HashMap::new();
        let mut children = self.root.children();
        let mut executor = self.root.executor();

        loop {
            scanner.skip_whitespace();
            if !scanner.can_read() {
                break;
            }

            let mut matched = None;
            let mut cause = None;
            for child in children.iter().filter(|child| child.can_use(sender)) {
                match child.try_match(&mut scanner, &mut arguments) {
                    NodeMatch::Matched => {
                        matched = Some(child);
                        break;
                    }
                    NodeMatch::Rejected(Some(e)) => cause = Some(e),
                    NodeMatch::Rejected(None) => {}
                }
            }

            let Some(child) = matched else {
                debug!(
                    "No child of '{}' matched at position {}",
                    self.name(),
                    scanner.cursor()
                );
                return Err(DispatchError::UnknownArgument {
                    position: scanner.cursor(),
                    input: input.to_string(),
                    cause,
                }
                .into());
            };

            trace!("Matched node '{}'", child.name());
            children = child.children();
            if let Some(child_executor) = child.executor() {
                executor = Some(child_executor);
            }
        }

        let Some(executor) = executor else {
            return Err(DispatchError::IncompleteCommand {
                command: self.name().to_string(),
                usage: self.usage(sender),
            }
            .into());
        };

        let context = CommandContext::new(sender, input, label, arguments, self);
        debug!("Executing '{}' for {}", self.name(), sender.name());
        executor(&context).map_err(CmdTreeError::from)
    }

    /// Complete a partial line
    ///
    /// While the label is still being typed the name and aliases are offered. Past
    /// the label the tree is replayed over every fully typed token, and all visible
    /// children of the node where the replay stops contribute suggestions anchored
    /// at the stop position. Never fails; unknown input yields an empty set.
    pub async fn get_suggestions(&self, sender: &dyn CommandSender, input: &str) -> Suggestions {
        if !self.can_use(sender) {
            return Suggestions::empty_at(input.len());
        }

        let mut scanner = CursorScanner::new(input);
        let label = scanner.read_unquoted_string();
        if !scanner.at_whitespace() {
            let mut builder = SuggestionsBuilder::new(input, 0);
            for label in self.labels() {
                builder.suggest(label);
            }
            return builder.build();
        }
        if !self.matches_label(label) {
            return Suggestions::empty_at(input.len());
        }

        let mut arguments = HashMap::new();
        let mut children = self.root.children();
        loop {
            scanner.skip_whitespace();
            if !scanner.can_read() {
                break;
            }

            let mut next = None;
            for child in children.iter().filter(|child| child.can_use(sender)) {
                let mut fork = scanner;
                if let NodeMatch::Matched = child.try_match(&mut fork, &mut arguments) {
                    if fork.at_whitespace() {
                        scanner = fork;
                        next = Some(child);
                        break;
                    }
                    if let Some(node) = child.as_argument() {
                        arguments.remove(node.name());
                    }
                }
            }

            match next {
                Some(child) => children = child.children(),
                None => break,
            }
        }

        let start = scanner.cursor();
        trace!("Collecting suggestions for '{}' at {}", self.name(), start);
        let context = CommandContext::new(sender, input, label, arguments, self);

        let mut pending: Vec<BoxFuture<'_, Suggestions>> = Vec::new();
        for child in children.iter().filter(|child| child.can_use(sender)) {
            let mut builder = SuggestionsBuilder::new(input, start);
            match child {
                CommandNode::Literal(node) => {
                    builder.suggest(node.literal());
                    pending.push(future::ready(builder.build()).boxed());
                }
                CommandNode::Argument(node) => match node.provider() {
                    Some(provider) => pending.push(provider.suggestions(&context, builder)),
                    None => pending.push(future::ready(node.kind().list_suggestions(builder)).boxed()),
                },
            }
        }

        let mut results = future::join_all(pending).await;
        match results.len() {
            0 => Suggestions::empty_at(start),
            1 => results.remove(0),
            _ => Suggestions::merge(results),
        }
    }

    /// Complete the part of `input` before `cursor`
    pub async fn get_suggestions_at(
        &self,
        sender: &dyn CommandSender,
        input: &str,
        cursor: usize,
    ) -> Suggestions {
        self.get_suggestions(sender, truncate_at(input, cursor)).await
    }

    /// Compact usage string as `sender` sees it
    ///
    /// A node with one visible child chains into it, several children render as
    /// `(a|b)`, and the segment after an executable node is wrapped in `[...]`.
    pub fn usage(&self, sender: &dyn CommandSender) -> String {
        match child_usage(&self.root, sender) {
            Some(rest) => format!("{} {rest}", self.name()),
            None => self.name().to_string(),
        }
    }

    /// One line per executable path visible to `sender`
    pub fn all_usage(&self, sender: &dyn CommandSender) -> Vec<String> {
        let mut lines = Vec::new();
        collect_paths(&self.root, self.name().to_string(), sender, &mut lines);
        lines
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("aliases", &self.aliases)
            .field("permission", &self.permission)
            .field("description", &self.description)
            .field("root", &self.root)
            .finish()
    }
}

/// Clamp `cursor` to a char boundary of `input` and cut there
pub(crate) fn truncate_at(input: &str, cursor: usize) -> &str {
    let mut cursor = cursor.min(input.len());
    while !input.is_char_boundary(cursor) {
        cursor -= 1;
    }
    &input[..cursor]
}

fn child_usage<N: TreeNode>(node: &N, sender: &dyn CommandSender) -> Option<String> {
    let children = node.visible_children(sender);
    let segment = match children.as_slice() {
        [] => return None,
        [only] => match child_usage(*only, sender) {
            Some(rest) => format!("{} {rest}", only.usage_text()),
            None => only.usage_text(),
        },
        many => {
            let options: Vec<String> = many.iter().map(|child| child.usage_text()).collect();
            format!("({})", options.join("|"))
        }
    };

    if node.is_executable() {
        Some(format!("[{segment}]"))
    } else {
        Some(segment)
    }
}

fn collect_paths<N: TreeNode>(
    node: &N,
    prefix: String,
    sender: &dyn CommandSender,
    lines: &mut Vec<String>,
) {
    if node.is_executable() {
        lines.push(prefix.clone());
    }
    for child in node.visible_children(sender) {
        collect_paths(child, format!("{prefix} {}", child.usage_text()), sender, lines);
    }
}
