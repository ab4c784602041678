//! Player commands: give, gamemode, teleport, roster

use std::sync::Arc;

use tracing::warn;

use crate::command::Command;
use crate::error::{BuildError, CommandError};
use crate::parser::ArgumentType;
use crate::tree::{CommandContext, CommandResult, StaticSuggestions, argument, literal};

use super::world::{RosterProvider, World};

/// Items the `give` command suggests
pub const ITEMS: &[&str] = &[
    "bread",
    "diamond",
    "gold_ingot",
    "iron_ingot",
    "oak_log",
    "stone",
];

/// Game modes accepted by `gamemode`
pub const GAME_MODES: &[(&str, i32)] = &[
    ("survival", 0),
    ("creative", 1),
    ("adventure", 2),
    ("spectator", 3),
];

/// `give <target> <item> [<count>]`
pub fn give(world: Arc<World>) -> Result<Command, BuildError> {
    let for_item = world.clone();
    let for_count = world.clone();
    Command::builder(
        literal("give").then(
            argument("target", ArgumentType::word())
                .suggests(RosterProvider::new(world))
                .then(
                    argument("item", ArgumentType::word())
                        .suggests(StaticSuggestions::new(ITEMS.iter().copied()))
                        .executes(move |ctx| give_items(ctx, &for_item, 1))
                        .then(
                            argument("count", ArgumentType::integer_between(1, 64))
                                .executes(move |ctx| {
                                    let count = ctx.get::<i32>("count")?;
                                    give_items(ctx, &for_count, count)
                                }),
                        ),
                ),
        ),
    )
    .permission("cmdtree.give")
    .description("Give an item to an online player")
    .build()
}

fn give_items(ctx: &CommandContext<'_>, world: &World, count: i32) -> CommandResult {
    let target = ctx.get::<String>("target")?;
    let item = ctx.get::<String>("item")?;
    require_online(world, &target)?;
    ctx.reply(&format!("Gave {count} [{item}] to {target}"));
    Ok(count)
}

/// `gamemode (survival|creative|adventure|spectator) [<target>]`
pub fn gamemode(world: Arc<World>) -> Result<Command, BuildError> {
    let mut root = literal("gamemode");
    for &(mode, id) in GAME_MODES {
        let for_target = world.clone();
        root = root.then(
            literal(mode)
                .executes(move |ctx| {
                    ctx.reply(&format!("Set own game mode to {mode}"));
                    Ok(id)
                })
                .then(
                    argument("target", ArgumentType::word())
                        .suggests(RosterProvider::new(world.clone()))
                        .executes(move |ctx| {
                            let target = ctx.get::<String>("target")?;
                            require_online(&for_target, &target)?;
                            ctx.reply(&format!("Set {target}'s game mode to {mode}"));
                            Ok(id)
                        }),
                ),
        );
    }

    Command::builder(root)
        .alias("gm")
        .permission("cmdtree.gamemode")
        .description("Change a game mode")
        .build()
}

/// `teleport <x> <y> <z>` or `teleport <target> <x> <y> <z>`
pub fn teleport(world: Arc<World>) -> Result<Command, BuildError> {
    Command::builder(
        literal("teleport")
            .then(argument("x", ArgumentType::double()).then(
                argument("y", ArgumentType::double()).then(
                    argument("z", ArgumentType::double()).executes(|ctx| {
                        let name = ctx.sender().name().to_string();
                        teleport_to(ctx, &name)
                    }),
                ),
            ))
            .then(
                argument("target", ArgumentType::word())
                    .suggests(RosterProvider::new(world.clone()))
                    .then(argument("x", ArgumentType::double()).then(
                        argument("y", ArgumentType::double()).then(
                            argument("z", ArgumentType::double()).executes(move |ctx| {
                                let target = ctx.get::<String>("target")?;
                                require_online(&world, &target)?;
                                teleport_to(ctx, &target)
                            }),
                        ),
                    )),
            ),
    )
    .alias("tp")
    .permission("cmdtree.teleport")
    .description("Move a player to a position")
    .build()
}

fn teleport_to(ctx: &CommandContext<'_>, who: &str) -> CommandResult {
    let x = ctx.get::<f64>("x")?;
    let y = ctx.get::<f64>("y")?;
    let z = ctx.get::<f64>("z")?;
    ctx.reply(&format!("Teleported {who} to {x:.2}, {y:.2}, {z:.2}"));
    Ok(1)
}

/// `roster list|add <name>|remove <name>`
pub fn roster(world: Arc<World>) -> Result<Command, BuildError> {
    let for_list = world.clone();
    let for_add = world.clone();
    Command::builder(
        literal("roster")
            .then(literal("list").executes(move |ctx| {
                let names = for_list.roster.try_names().ok_or_else(roster_busy)?;
                if names.is_empty() {
                    ctx.reply("Nobody is online");
                } else {
                    ctx.reply(&format!("Online ({}): {}", names.len(), names.join(", ")));
                }
                Ok(i32::try_from(names.len()).unwrap_or(i32::MAX))
            }))
            .then(
                literal("add").then(argument("name", ArgumentType::word()).executes(move |ctx| {
                    let name = ctx.get::<String>("name")?;
                    if !for_add.roster.try_add(name.clone()).ok_or_else(roster_busy)? {
                        return Err(CommandError::new(format!("{name} is already online")));
                    }
                    ctx.reply(&format!("{name} joined"));
                    Ok(1)
                })),
            )
            .then(
                literal("remove").then(
                    argument("name", ArgumentType::word())
                        .suggests(RosterProvider::new(world.clone()))
                        .executes(move |ctx| {
                            let name = ctx.get::<String>("name")?;
                            if !world.roster.try_remove(&name).ok_or_else(roster_busy)? {
                                return Err(CommandError::new(format!("{name} is not online")));
                            }
                            ctx.reply(&format!("{name} left"));
                            Ok(1)
                        }),
                ),
            ),
    )
    .permission("cmdtree.roster")
    .description("Manage the online roster")
    .build()
}

fn require_online(world: &World, name: &str) -> Result<(), CommandError> {
    match world.roster.try_contains(name) {
        Some(true) => Ok(()),
        Some(false) => Err(CommandError::new(format!("No player named '{name}' is online"))),
        None => Err(roster_busy()),
    }
}

fn roster_busy() -> CommandError {
    warn!("Roster lock contended during command execution");
    CommandError::new("The roster is being updated, try again")
}
