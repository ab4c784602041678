//! Literal and argument nodes

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::context::CommandContext;
use super::provider::SuggestionProvider;
use crate::error::{ArgumentParseError, CommandError};
use crate::parser::{ArgumentType, ArgumentValue, CursorScanner};
use crate::sender::CommandSender;

/// Outcome of running an executor
pub type CommandResult = std::result::Result<i32, CommandError>;

/// Action attached to a node, run once when a line ends on that node's path
pub type Executor = Arc<dyn Fn(&CommandContext<'_>) -> CommandResult + Send + Sync>;

/// Access predicate; a node whose predicate rejects the sender is invisible to it
pub type Requirement = Arc<dyn Fn(&dyn CommandSender) -> bool + Send + Sync>;

/// Accessors shared by every node kind
pub trait TreeNode {
    /// Children in match priority order
    fn children(&self) -> &[CommandNode];

    fn executor(&self) -> Option<&Executor>;

    fn requirement(&self) -> Option<&Requirement>;

    /// Whether the sender passes this node's access predicate
    fn can_use(&self, sender: &dyn CommandSender) -> bool {
        self.requirement().is_none_or(|requirement| requirement(sender))
    }

    fn is_executable(&self) -> bool {
        self.executor().is_some()
    }

    /// Children the sender is allowed to see
    fn visible_children(&self, sender: &dyn CommandSender) -> Vec<&CommandNode> {
        self.children()
            .iter()
            .filter(|child| child.can_use(sender))
            .collect()
    }
}

/// A node in a command tree
pub enum CommandNode {
    /// Matches one exact keyword
    Literal(LiteralNode),
    /// Decodes one typed value
    Argument(ArgumentNode),
}

/// Outcome of matching one child at the cursor
pub(crate) enum NodeMatch {
    Matched,
    /// The child did not match; carries the decode failure for argument nodes
    Rejected(Option<ArgumentParseError>),
}

impl CommandNode {
    /// Literal text or argument name
    pub fn name(&self) -> &str {
        match self {
            CommandNode::Literal(node) => &node.literal,
            CommandNode::Argument(node) => &node.name,
        }
    }

    /// How this node appears in usage strings: `literal` or `<name>`
    pub fn usage_text(&self) -> String {
        match self {
            CommandNode::Literal(node) => node.literal.clone(),
            CommandNode::Argument(node) => format!("<{}>", node.name),
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralNode> {
        match self {
            CommandNode::Literal(node) => Some(node),
            CommandNode::Argument(_) => None,
        }
    }

    pub fn as_argument(&self) -> Option<&ArgumentNode> {
        match self {
            CommandNode::Literal(_) => None,
            CommandNode::Argument(node) => Some(node),
        }
    }

    /// Try to consume this node's token at the scanner cursor
    ///
    /// A match must end at whitespace or end of input. On a match the decoded value
    /// of an argument node is stored in `arguments`; otherwise the cursor is restored.
    pub(crate) fn try_match(
        &self,
        scanner: &mut CursorScanner<'_>,
        arguments: &mut HashMap<String, ArgumentValue>,
    ) -> NodeMatch {
        let start = scanner.cursor();
        match self {
            CommandNode::Literal(node) => {
                let token = scanner.read_unquoted_string();
                if token == node.literal && scanner.at_boundary() {
                    return NodeMatch::Matched;
                }
                scanner.set_cursor(start);
                NodeMatch::Rejected(None)
            }
            CommandNode::Argument(node) => match node.kind.parse(scanner) {
                Ok(value) if scanner.at_boundary() => {
                    arguments.insert(node.name.clone(), value);
                    NodeMatch::Matched
                }
                Ok(_) => {
                    scanner.set_cursor(start);
                    NodeMatch::Rejected(None)
                }
                Err(e) => {
                    scanner.set_cursor(start);
                    NodeMatch::Rejected(Some(e))
                }
            },
        }
    }
}

impl TreeNode for CommandNode {
    fn children(&self) -> &[CommandNode] {
        match self {
            CommandNode::Literal(node) => node.children(),
            CommandNode::Argument(node) => node.children(),
        }
    }

    fn executor(&self) -> Option<&Executor> {
        match self {
            CommandNode::Literal(node) => node.executor(),
            CommandNode::Argument(node) => node.executor(),
        }
    }

    fn requirement(&self) -> Option<&Requirement> {
        match self {
            CommandNode::Literal(node) => node.requirement(),
            CommandNode::Argument(node) => node.requirement(),
        }
    }
}

/// Node matching one exact keyword
pub struct LiteralNode {
    pub(crate) literal: String,
    pub(crate) children: Vec<CommandNode>,
    pub(crate) executor: Option<Executor>,
    pub(crate) requirement: Option<Requirement>,
}

impl LiteralNode {
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl TreeNode for LiteralNode {
    fn children(&self) -> &[CommandNode] {
        &self.children
    }

    fn executor(&self) -> Option<&Executor> {
        self.executor.as_ref()
    }

    fn requirement(&self) -> Option<&Requirement> {
        self.requirement.as_ref()
    }
}

/// Node decoding one typed value
pub struct ArgumentNode {
    pub(crate) name: String,
    pub(crate) kind: ArgumentType,
    pub(crate) children: Vec<CommandNode>,
    pub(crate) executor: Option<Executor>,
    pub(crate) requirement: Option<Requirement>,
    pub(crate) provider: Option<Arc<dyn SuggestionProvider>>,
}

impl ArgumentNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &ArgumentType {
        &self.kind
    }

    /// Custom suggestion provider, if one was attached
    pub fn provider(&self) -> Option<&Arc<dyn SuggestionProvider>> {
        self.provider.as_ref()
    }
}

impl TreeNode for ArgumentNode {
    fn children(&self) -> &[CommandNode] {
        &self.children
    }

    fn executor(&self) -> Option<&Executor> {
        self.executor.as_ref()
    }

    fn requirement(&self) -> Option<&Requirement> {
        self.requirement.as_ref()
    }
}

/* ===== Debug impls ===== */

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandNode::Literal(node) => fmt::Debug::fmt(node, f),
            CommandNode::Argument(node) => fmt::Debug::fmt(node, f),
        }
    }
}

impl fmt::Debug for LiteralNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiteralNode")
            .field("literal", &self.literal)
            .field("executable", &self.executor.is_some())
            .field("restricted", &self.requirement.is_some())
            .field("children", &self.children)
            .finish()
    }
}

impl fmt::Debug for ArgumentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentNode")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("executable", &self.executor.is_some())
            .field("restricted", &self.requirement.is_some())
            .field("custom_suggestions", &self.provider.is_some())
            .field("children", &self.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::sender::ConsoleSender;
    use crate::tree::{argument, literal};

    fn build(builder: impl Into<crate::tree::NodeBuilder>) -> CommandNode {
        let builder: crate::tree::NodeBuilder = builder.into();
        builder.build(&mut Vec::new()).unwrap()
    }

    #[test]
    fn test_literal_match_requires_whole_token() {
        let node = build(literal("creative"));
        let mut args = HashMap::new();

        let mut scanner = CursorScanner::new("creativex");
        assert!(matches!(node.try_match(&mut scanner, &mut args), NodeMatch::Rejected(None)));
        assert_eq!(scanner.cursor(), 0);

        let mut scanner = CursorScanner::new("creative now");
        assert!(matches!(node.try_match(&mut scanner, &mut args), NodeMatch::Matched));
        assert_eq!(scanner.cursor(), 8);
    }

    #[test]
    fn test_argument_match_records_value() {
        let node = build(argument("count", ArgumentType::integer_between(1, 64)));
        let mut args = HashMap::new();
        let mut scanner = CursorScanner::new("32");
        assert!(matches!(node.try_match(&mut scanner, &mut args), NodeMatch::Matched));
        assert_eq!(args.get("count"), Some(&ArgumentValue::Integer(32)));
    }

    #[test]
    fn test_argument_rejection_keeps_cause() {
        let node = build(argument("count", ArgumentType::integer_between(1, 64)));
        let mut args = HashMap::new();
        let mut scanner = CursorScanner::new("65");
        match node.try_match(&mut scanner, &mut args) {
            NodeMatch::Rejected(Some(e)) => assert_eq!(e.kind, ParseErrorKind::OutOfBounds),
            _ => panic!("expected an out of bounds rejection"),
        }
        assert_eq!(scanner.cursor(), 0);
        assert!(args.is_empty());
    }

    #[test]
    fn test_quoted_argument_needs_trailing_boundary() {
        let node = build(argument("text", ArgumentType::string()));
        let mut args = HashMap::new();
        let mut scanner = CursorScanner::new("\"abc\"def");
        assert!(matches!(node.try_match(&mut scanner, &mut args), NodeMatch::Rejected(None)));
        assert_eq!(scanner.cursor(), 0);
    }

    #[test]
    fn test_usage_text_and_visibility() {
        let node = build(
            literal("admin")
                .then(argument("target", ArgumentType::word()))
                .then(literal("secret").requires_permission("cmdtree.secret")),
        );
        assert_eq!(node.usage_text(), "admin");
        assert_eq!(node.children()[0].usage_text(), "<target>");

        let guest = ConsoleSender::new("guest");
        let names: Vec<&str> = node
            .visible_children(&guest)
            .into_iter()
            .map(CommandNode::name)
            .collect();
        assert_eq!(names, vec!["target"]);

        let admin = ConsoleSender::new("admin").with_permission("cmdtree.secret");
        assert_eq!(node.visible_children(&admin).len(), 2);
    }
}
