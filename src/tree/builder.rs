//! Fluent builders that freeze into immutable node trees

use std::sync::Arc;

use super::context::CommandContext;
use super::node::{ArgumentNode, CommandNode, CommandResult, Executor, LiteralNode, Requirement};
use super::provider::{FnProvider, SuggestionProvider};
use crate::error::BuildError;
use crate::parser::ArgumentType;
use crate::sender::CommandSender;
use crate::suggestion::{Suggestions, SuggestionsBuilder};

/// Start a literal node
pub fn literal(literal: impl Into<String>) -> LiteralBuilder {
    LiteralBuilder {
        literal: literal.into(),
        parts: NodeParts::default(),
    }
}

/// Start an argument node
pub fn argument(name: impl Into<String>, kind: ArgumentType) -> ArgumentBuilder {
    ArgumentBuilder {
        name: name.into(),
        kind,
        parts: NodeParts::default(),
        provider: None,
    }
}

#[derive(Default)]
struct NodeParts {
    children: Vec<NodeBuilder>,
    executor: Option<Executor>,
    requirement: Option<Requirement>,
}

impl NodeParts {
    fn build_children(self, path: &mut Vec<String>) -> Result<BuiltParts, BuildError> {
        let children = self
            .children
            .into_iter()
            .map(|child| child.build(path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BuiltParts {
            children,
            executor: self.executor,
            requirement: self.requirement,
        })
    }
}

struct BuiltParts {
    children: Vec<CommandNode>,
    executor: Option<Executor>,
    requirement: Option<Requirement>,
}

/// Builder for a [`LiteralNode`]
pub struct LiteralBuilder {
    literal: String,
    parts: NodeParts,
}

impl LiteralBuilder {
    /// Append a child; children are tried in the order they are added
    pub fn then(mut self, child: impl Into<NodeBuilder>) -> Self {
        self.parts.children.push(child.into());
        self
    }

    /// Run `executor` when input ends at this node
    pub fn executes<F>(mut self, executor: F) -> Self
    where
        F: Fn(&CommandContext<'_>) -> CommandResult + Send + Sync + 'static,
    {
        self.parts.executor = Some(Arc::new(executor));
        self
    }

    /// Hide this node from senders that fail `requirement`
    pub fn requires<F>(mut self, requirement: F) -> Self
    where
        F: Fn(&dyn CommandSender) -> bool + Send + Sync + 'static,
    {
        self.parts.requirement = Some(Arc::new(requirement));
        self
    }

    /// Hide this node from senders lacking `permission`
    pub fn requires_permission(self, permission: impl Into<String>) -> Self {
        let permission = permission.into();
        self.requires(move |sender| sender.has_permission(&permission))
    }

    pub(crate) fn build_literal(self, path: &mut Vec<String>) -> Result<LiteralNode, BuildError> {
        if self.literal.is_empty() || self.literal.chars().any(char::is_whitespace) {
            return Err(BuildError::InvalidLiteral(self.literal));
        }
        let parts = self.parts.build_children(path)?;
        Ok(LiteralNode {
            literal: self.literal,
            children: parts.children,
            executor: parts.executor,
            requirement: parts.requirement,
        })
    }
}

/// Builder for an [`ArgumentNode`]
pub struct ArgumentBuilder {
    name: String,
    kind: ArgumentType,
    parts: NodeParts,
    provider: Option<Arc<dyn SuggestionProvider>>,
}

impl ArgumentBuilder {
    /// Append a child; children are tried in the order they are added
    pub fn then(mut self, child: impl Into<NodeBuilder>) -> Self {
        self.parts.children.push(child.into());
        self
    }

    /// Run `executor` when input ends at this node
    pub fn executes<F>(mut self, executor: F) -> Self
    where
        F: Fn(&CommandContext<'_>) -> CommandResult + Send + Sync + 'static,
    {
        self.parts.executor = Some(Arc::new(executor));
        self
    }

    /// Hide this node from senders that fail `requirement`
    pub fn requires<F>(mut self, requirement: F) -> Self
    where
        F: Fn(&dyn CommandSender) -> bool + Send + Sync + 'static,
    {
        self.parts.requirement = Some(Arc::new(requirement));
        self
    }

    /// Hide this node from senders lacking `permission`
    pub fn requires_permission(self, permission: impl Into<String>) -> Self {
        let permission = permission.into();
        self.requires(move |sender| sender.has_permission(&permission))
    }

    /// Replace the type's intrinsic suggestions with a custom provider
    pub fn suggests(mut self, provider: impl SuggestionProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Replace the type's intrinsic suggestions with a synchronous closure
    pub fn suggests_with<F>(self, provider: F) -> Self
    where
        F: Fn(&CommandContext<'_>, SuggestionsBuilder) -> Suggestions + Send + Sync + 'static,
    {
        self.suggests(FnProvider(provider))
    }

    fn build_argument(self, path: &mut Vec<String>) -> Result<ArgumentNode, BuildError> {
        if path.contains(&self.name) {
            return Err(BuildError::DuplicateArgument(self.name));
        }
        if self.kind.is_greedy() && !self.parts.children.is_empty() {
            return Err(BuildError::GreedyArgumentHasChildren(self.name));
        }

        path.push(self.name.clone());
        let parts = self.parts.build_children(path);
        path.pop();
        let parts = parts?;

        Ok(ArgumentNode {
            name: self.name,
            kind: self.kind,
            children: parts.children,
            executor: parts.executor,
            requirement: parts.requirement,
            provider: self.provider,
        })
    }
}

/// Either kind of node builder
pub enum NodeBuilder {
    Literal(LiteralBuilder),
    Argument(ArgumentBuilder),
}

impl NodeBuilder {
    /// Freeze into a node
    ///
    /// `path` holds the argument names already bound above this node.
    pub(crate) fn build(self, path: &mut Vec<String>) -> Result<CommandNode, BuildError> {
        match self {
            NodeBuilder::Literal(builder) => builder.build_literal(path).map(CommandNode::Literal),
            NodeBuilder::Argument(builder) => builder.build_argument(path).map(CommandNode::Argument),
        }
    }
}

impl From<LiteralBuilder> for NodeBuilder {
    fn from(builder: LiteralBuilder) -> Self {
        NodeBuilder::Literal(builder)
    }
}

impl From<ArgumentBuilder> for NodeBuilder {
    fn from(builder: ArgumentBuilder) -> Self {
        NodeBuilder::Argument(builder)
    }
}
