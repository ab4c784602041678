//! Utility commands: echo and toggle

use std::sync::Arc;

use crate::command::Command;
use crate::error::BuildError;
use crate::parser::ArgumentType;
use crate::tree::{StaticSuggestions, argument, literal};

use super::world::{KNOWN_FLAGS, World};

/// `echo <message...>`
pub fn echo() -> Result<Command, BuildError> {
    Command::builder(
        literal("echo").then(
            argument("message", ArgumentType::greedy_string()).executes(|ctx| {
                let message = ctx.get::<String>("message")?;
                ctx.reply(&message);
                Ok(i32::try_from(message.chars().count()).unwrap_or(i32::MAX))
            }),
        ),
    )
    .alias("say")
    .description("Print a message")
    .build()
}

/// `toggle <flag> [<state>]`
pub fn toggle(world: Arc<World>) -> Result<Command, BuildError> {
    let flags = KNOWN_FLAGS
        .iter()
        .fold(StaticSuggestions::new(Vec::<String>::new()), |provider, (flag, about)| {
            provider.with_tooltip(*flag, *about)
        });
    let for_query = world.clone();

    Command::builder(
        literal("toggle").then(
            argument("flag", ArgumentType::word())
                .suggests(flags)
                .executes(move |ctx| {
                    let flag = ctx.get::<String>("flag")?;
                    let value = for_query.flags.get(&flag);
                    ctx.reply(&format!("{flag} is {}", on_off(value)));
                    Ok(i32::from(value))
                })
                .then(
                    argument("state", ArgumentType::boolean()).executes(move |ctx| {
                        let flag = ctx.get::<String>("flag")?;
                        let state = ctx.get::<bool>("state")?;
                        world.flags.set(&flag, state);
                        ctx.reply(&format!("{flag} is now {}", on_off(state)));
                        Ok(i32::from(state))
                    }),
                ),
        ),
    )
    .permission("cmdtree.toggle")
    .description("Show or set a world flag")
    .build()
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
