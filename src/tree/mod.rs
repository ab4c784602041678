//! Command node trees
//!
//! A command is a tree of nodes. Literal nodes match one exact keyword, argument
//! nodes decode one typed value. Any node may carry an executor, an access predicate
//! hiding it from some senders, and argument nodes may carry a custom suggestion
//! provider.
//!
//! Trees are assembled with the [`literal`] and [`argument`] builders and frozen by
//! [`Command::builder`](crate::command::Command::builder); they never change
//! afterwards.
//!
//! # Examples
//!
//! ```
//! use cmdtree::parser::ArgumentType;
//! use cmdtree::tree::{argument, literal};
//!
//! let give = literal("give").then(
//!     argument("target", ArgumentType::word()).then(
//!         argument("count", ArgumentType::integer_between(1, 64))
//!             .executes(|ctx| ctx.get::<i32>("count")),
//!     ),
//! );
//! # let _ = give;
//! ```

mod builder;
mod context;
mod node;
mod provider;

pub use builder::{ArgumentBuilder, LiteralBuilder, NodeBuilder, argument, literal};
pub use context::CommandContext;
pub use node::{ArgumentNode, CommandNode, CommandResult, Executor, LiteralNode, Requirement, TreeNode};
pub use provider::{StaticSuggestions, SuggestionProvider};

pub(crate) use node::NodeMatch;
