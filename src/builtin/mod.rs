//! Builtin demo command set
//!
//! The shell registers these commands so the command tree can be driven
//! interactively:
//!
//! - `help [<command>]` (alias `?`)
//! - `echo <message...>` (alias `say`)
//! - `give <target> <item> [<count>]`
//! - `gamemode (survival|creative|adventure|spectator) [<target>]` (alias `gm`)
//! - `teleport [<target>] <x> <y> <z>` (alias `tp`)
//! - `toggle <flag> [<state>]`
//! - `roster (list|add|remove)`
//!
//! Player names come from a [`Roster`] behind an async lock, so their suggestions
//! go through an asynchronous provider.

mod help;
mod player;
mod utility;
mod world;

pub use help::HelpIndex;
pub use player::{GAME_MODES, ITEMS};
pub use world::{Flags, KNOWN_FLAGS, Roster, RosterProvider, World};

use std::sync::{Arc, OnceLock};

use tracing::{debug, warn};

use crate::command::CommandDispatcher;
use crate::error::Result;

/// Players online when the shell starts
pub const DEFAULT_PLAYERS: &[&str] = &["alex", "notch", "steve"];

/// Build a dispatcher holding every builtin command
///
/// # Arguments
/// * `world` - State shared by the commands
///
/// # Returns
/// * `Result<Arc<CommandDispatcher>>` - Shared dispatcher or build error
pub fn dispatcher(world: Arc<World>) -> Result<Arc<CommandDispatcher>> {
    let index: HelpIndex = Arc::new(OnceLock::new());

    let mut dispatcher = CommandDispatcher::new();
    dispatcher.register(help::help(index.clone())?)?;
    dispatcher.register(utility::echo()?)?;
    dispatcher.register(player::give(world.clone())?)?;
    dispatcher.register(player::gamemode(world.clone())?)?;
    dispatcher.register(player::teleport(world.clone())?)?;
    dispatcher.register(player::roster(world.clone())?)?;
    dispatcher.register(utility::toggle(world)?)?;

    let dispatcher = Arc::new(dispatcher);
    if index.set(Arc::downgrade(&dispatcher)).is_err() {
        warn!("Help index was already bound");
    }
    debug!("Registered {} builtin commands", dispatcher.len());
    Ok(dispatcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CmdTreeError, DispatchError};
    use crate::sender::ConsoleSender;

    fn setup() -> (Arc<CommandDispatcher>, Arc<World>) {
        let world = Arc::new(World::with_players(DEFAULT_PLAYERS.iter().copied()));
        (dispatcher(world.clone()).unwrap(), world)
    }

    fn admin() -> (ConsoleSender, Arc<std::sync::Mutex<Vec<String>>>) {
        ConsoleSender::new("console")
            .with_permission("cmdtree.*")
            .capturing()
    }

    #[test]
    fn test_give_default_and_explicit_count() {
        let (dispatcher, _) = setup();
        let (sender, messages) = admin();

        assert_eq!(dispatcher.execute(&sender, "give steve diamond").unwrap(), 1);
        assert_eq!(dispatcher.execute(&sender, "give steve diamond 16").unwrap(), 16);
        assert_eq!(
            *messages.lock().unwrap(),
            vec!["Gave 1 [diamond] to steve", "Gave 16 [diamond] to steve"]
        );
    }

    #[test]
    fn test_give_offline_player() {
        let (dispatcher, _) = setup();
        let (sender, _) = admin();
        assert!(matches!(
            dispatcher.execute(&sender, "give herobrine stone"),
            Err(CmdTreeError::Command(_))
        ));
    }

    #[test]
    fn test_gamemode_modes() {
        let (dispatcher, _) = setup();
        let (sender, messages) = admin();
        assert_eq!(dispatcher.execute(&sender, "gamemode creative").unwrap(), 1);
        assert_eq!(dispatcher.execute(&sender, "gm spectator alex").unwrap(), 3);
        assert_eq!(messages.lock().unwrap()[1], "Set alex's game mode to spectator");
    }

    #[test]
    fn test_teleport_self_and_target() {
        let (dispatcher, _) = setup();
        let (sender, messages) = admin();
        dispatcher.execute(&sender, "tp 1 64 -2.5").unwrap();
        dispatcher.execute(&sender, "teleport notch 0 70 0").unwrap();
        let messages = messages.lock().unwrap();
        assert_eq!(messages[0], "Teleported console to 1.00, 64.00, -2.50");
        assert_eq!(messages[1], "Teleported notch to 0.00, 70.00, 0.00");
    }

    #[test]
    fn test_echo_keeps_whitespace() {
        let (dispatcher, _) = setup();
        let (sender, messages) = admin();
        dispatcher.execute(&sender, "say hello   big world").unwrap();
        assert_eq!(messages.lock().unwrap()[0], "hello   big world");
    }

    #[test]
    fn test_toggle_sets_flag() {
        let (dispatcher, world) = setup();
        let (sender, _) = admin();
        assert_eq!(dispatcher.execute(&sender, "toggle pvp TRUE").unwrap(), 1);
        assert!(world.flags.get("pvp"));
        assert_eq!(dispatcher.execute(&sender, "toggle pvp").unwrap(), 1);
    }

    #[test]
    fn test_roster_commands() {
        let (dispatcher, world) = setup();
        let (sender, _) = admin();
        dispatcher.execute(&sender, "roster add herobrine").unwrap();
        assert_eq!(world.roster.try_contains("herobrine"), Some(true));
        assert!(dispatcher.execute(&sender, "roster add herobrine").is_err());
        assert_eq!(dispatcher.execute(&sender, "roster list").unwrap(), 4);
        dispatcher.execute(&sender, "roster remove herobrine").unwrap();
        assert_eq!(world.roster.try_contains("herobrine"), Some(false));
    }

    #[test]
    fn test_help_respects_permissions() {
        let (dispatcher, _) = setup();
        let (guest, messages) = ConsoleSender::new("guest").capturing();
        assert_eq!(dispatcher.execute(&guest, "help").unwrap(), 2);
        assert_eq!(
            *messages.lock().unwrap(),
            vec![
                "echo <message> - Print a message",
                "help [<command>] - List commands or show how to use one",
            ]
        );

        assert!(matches!(
            dispatcher.execute(&guest, "give steve stone"),
            Err(CmdTreeError::Dispatch(DispatchError::PermissionDenied { .. }))
        ));
        assert!(dispatcher.execute(&guest, "help give").is_err());
    }

    #[test]
    fn test_help_for_one_command() {
        let (dispatcher, _) = setup();
        let (sender, messages) = admin();
        assert_eq!(dispatcher.execute(&sender, "help give").unwrap(), 2);
        let messages = messages.lock().unwrap();
        assert_eq!(messages[0], "Give an item to an online player");
        assert_eq!(messages[1], "  give <target> <item>");
        assert_eq!(messages[2], "  give <target> <item> <count>");
    }

    #[tokio::test]
    async fn test_roster_suggestions() {
        let (dispatcher, world) = setup();
        let (sender, _) = admin();
        world.roster.add("sam").await;

        let suggestions = dispatcher.suggestions(&sender, "give s").await;
        assert_eq!(suggestions.texts(), vec!["sam", "steve"]);

        let suggestions = dispatcher.suggestions(&sender, "gamemode creative ").await;
        assert_eq!(suggestions.texts(), vec!["alex", "notch", "sam", "steve"]);
    }

    #[tokio::test]
    async fn test_toggle_suggestions_carry_tooltips() {
        let (dispatcher, _) = setup();
        let (sender, _) = admin();
        let suggestions = dispatcher.suggestions(&sender, "toggle d").await;
        assert_eq!(suggestions.texts(), vec!["daylight", "debug"]);
        assert_eq!(suggestions.list()[1].tooltip(), Some("Verbose command feedback"));
    }

    #[tokio::test]
    async fn test_help_argument_suggestions() {
        let (dispatcher, _) = setup();
        let (guest, _) = ConsoleSender::new("guest").capturing();
        let suggestions = dispatcher.suggestions(&guest, "help ").await;
        assert_eq!(suggestions.texts(), vec!["echo", "help"]);
    }
}
