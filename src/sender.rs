//! Command senders
//!
//! The command tree never talks to users directly. Everything it needs to know
//! about whoever typed a line goes through the [`CommandSender`] trait: a display
//! name, a permission check used by access predicates, and a message channel used
//! by executors.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Whoever issued a command
pub trait CommandSender: Send + Sync {
    /// Display name of the sender
    fn name(&self) -> &str;

    /// Deliver a message to the sender
    fn send_message(&self, message: &str);

    /// Whether the sender holds `permission`
    fn has_permission(&self, permission: &str) -> bool;
}

/// Where a [`ConsoleSender`] delivers its messages
#[derive(Debug, Clone)]
pub enum MessageSink {
    /// Print to standard output
    Stdout,
    /// Keep messages in memory
    Capture(Arc<Mutex<Vec<String>>>),
}

/// Local console sender with a fixed permission set
///
/// Permission nodes are dot separated. A granted node ending in `*` covers every
/// node below it (`world.*` grants `world.time.set`), and a lone `*` grants
/// everything, as does operator mode.
#[derive(Debug, Clone)]
pub struct ConsoleSender {
    name: String,
    permissions: HashSet<String>,
    operator: bool,
    sink: MessageSink,
}

impl ConsoleSender {
    /// Create a sender without permissions that prints to stdout
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: HashSet::new(),
            operator: false,
            sink: MessageSink::Stdout,
        }
    }

    /// Grant a permission node
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    /// Grant several permission nodes
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Operators pass every permission check
    pub fn with_operator(mut self, operator: bool) -> Self {
        self.operator = operator;
        self
    }

    /// Capture messages in memory instead of printing them
    ///
    /// Returns the sender and a handle to the captured messages.
    pub fn capturing(mut self) -> (Self, Arc<Mutex<Vec<String>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        self.sink = MessageSink::Capture(buffer.clone());
        (self, buffer)
    }

    pub fn is_operator(&self) -> bool {
        self.operator
    }

    /// Granted permission nodes, sorted
    pub fn permissions(&self) -> Vec<&str> {
        let mut list: Vec<&str> = self.permissions.iter().map(String::as_str).collect();
        list.sort_unstable();
        list
    }
}

impl CommandSender for ConsoleSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn send_message(&self, message: &str) {
        match &self.sink {
            MessageSink::Stdout => println!("{message}"),
            MessageSink::Capture(buffer) => {
                if let Ok(mut messages) = buffer.lock() {
                    messages.push(message.to_string());
                }
            }
        }
    }

    fn has_permission(&self, permission: &str) -> bool {
        if self.operator || permission.is_empty() {
            return true;
        }
        if self.permissions.contains(permission) || self.permissions.contains("*") {
            return true;
        }

        // Walk up the node: a.b.c -> a.b.* -> a.*
        let mut node = permission;
        while let Some(idx) = node.rfind('.') {
            node = &node[..idx];
            if self.permissions.contains(&format!("{node}.*")) {
                return true;
            }
        }
        false
    }
}
