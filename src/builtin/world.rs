//! Shared demo state: an online roster and a set of boolean flags

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::suggestion::{Suggestions, SuggestionsBuilder};
use crate::tree::{CommandContext, SuggestionProvider};

/// Flags known to the `toggle` command, with their descriptions
pub const KNOWN_FLAGS: &[(&str, &str)] = &[
    ("daylight", "Advance the day/night cycle"),
    ("debug", "Verbose command feedback"),
    ("pvp", "Allow players to damage each other"),
    ("weather", "Advance the weather cycle"),
];

/// State shared by the builtin commands
#[derive(Debug, Default)]
pub struct World {
    pub roster: Roster,
    pub flags: Flags,
}

impl World {
    /// World with the given players online
    pub fn with_players<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roster: Roster::new(players),
            flags: Flags::default(),
        }
    }
}

/// Names of the players currently online
#[derive(Debug, Default)]
pub struct Roster {
    players: RwLock<BTreeSet<String>>,
}

impl Roster {
    pub fn new<I, S>(players: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: RwLock::new(players.into_iter().map(Into::into).collect()),
        }
    }

    /// Sorted player names
    pub async fn names(&self) -> Vec<String> {
        self.players.read().await.iter().cloned().collect()
    }

    pub async fn add(&self, name: impl Into<String>) -> bool {
        self.players.write().await.insert(name.into())
    }

    pub async fn remove(&self, name: &str) -> bool {
        self.players.write().await.remove(name)
    }

    /// Non-blocking membership check for synchronous executors
    ///
    /// Returns `None` while a writer holds the lock.
    pub fn try_contains(&self, name: &str) -> Option<bool> {
        self.players.try_read().ok().map(|players| players.contains(name))
    }

    /// Non-blocking snapshot of the roster
    pub fn try_names(&self) -> Option<Vec<String>> {
        self.players
            .try_read()
            .ok()
            .map(|players| players.iter().cloned().collect())
    }

    /// Non-blocking insert; `None` while the lock is held
    pub fn try_add(&self, name: impl Into<String>) -> Option<bool> {
        self.players
            .try_write()
            .ok()
            .map(|mut players| players.insert(name.into()))
    }

    /// Non-blocking removal; `None` while the lock is held
    pub fn try_remove(&self, name: &str) -> Option<bool> {
        self.players
            .try_write()
            .ok()
            .map(|mut players| players.remove(name))
    }
}

/// Boolean switches flipped by the `toggle` command
#[derive(Debug, Default)]
pub struct Flags {
    values: Mutex<BTreeMap<String, bool>>,
}

impl Flags {
    /// Current value; unset flags are off
    pub fn get(&self, flag: &str) -> bool {
        self.values
            .lock()
            .map(|values| values.get(flag).copied().unwrap_or(false))
            .unwrap_or(false)
    }

    pub fn set(&self, flag: &str, value: bool) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(flag.to_string(), value);
        }
    }

    /// All flags that were ever set
    pub fn snapshot(&self) -> BTreeMap<String, bool> {
        self.values
            .lock()
            .map(|values| values.clone())
            .unwrap_or_default()
    }
}

/// Suggests the names of online players
pub struct RosterProvider {
    world: std::sync::Arc<World>,
}

impl RosterProvider {
    pub fn new(world: std::sync::Arc<World>) -> Self {
        Self { world }
    }
}

#[async_trait]
impl SuggestionProvider for RosterProvider {
    async fn suggestions(
        &self,
        _context: &CommandContext<'_>,
        mut builder: SuggestionsBuilder,
    ) -> Suggestions {
        let names = self.world.roster.names().await;
        builder.suggest_all(names);
        builder.build_async().await
    }
}
