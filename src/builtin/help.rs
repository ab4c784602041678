//! The `help` command
//!
//! Help lists the commands of the dispatcher it is registered in. The dispatcher is
//! only complete once every command is registered, so help holds a weak handle that
//! is filled in after the dispatcher is shared.

use std::sync::{Arc, OnceLock, Weak};

use crate::command::{Command, CommandDispatcher};
use crate::error::{BuildError, CommandError};
use crate::parser::ArgumentType;
use crate::tree::{CommandContext, CommandResult, argument, literal};

/// Late-bound handle to the dispatcher that owns the help command
pub type HelpIndex = Arc<OnceLock<Weak<CommandDispatcher>>>;

/// `help [<command>]`
pub fn help(index: HelpIndex) -> Result<Command, BuildError> {
    let for_list = index.clone();
    let for_detail = index.clone();
    Command::builder(
        literal("help")
            .executes(move |ctx| list_commands(ctx, &for_list))
            .then(
                argument("command", ArgumentType::word())
                    .suggests_with(move |ctx, mut builder| {
                        if let Some(dispatcher) = index.get().and_then(Weak::upgrade) {
                            for command in dispatcher.commands() {
                                if command.can_use(ctx.sender()) {
                                    builder.suggest(command.name());
                                }
                            }
                        }
                        builder.build()
                    })
                    .executes(move |ctx| describe_command(ctx, &for_detail)),
            ),
    )
    .alias("?")
    .description("List commands or show how to use one")
    .build()
}

fn dispatcher(index: &HelpIndex) -> Result<Arc<CommandDispatcher>, CommandError> {
    index
        .get()
        .and_then(Weak::upgrade)
        .ok_or_else(|| CommandError::new("Help is not available yet"))
}

fn list_commands(ctx: &CommandContext<'_>, index: &HelpIndex) -> CommandResult {
    let dispatcher = dispatcher(index)?;
    let entries = dispatcher.help_entries(ctx.sender());
    for entry in &entries {
        if entry.description.is_empty() {
            ctx.reply(&entry.usage);
        } else {
            ctx.reply(&format!("{} - {}", entry.usage, entry.description));
        }
    }
    Ok(i32::try_from(entries.len()).unwrap_or(i32::MAX))
}

fn describe_command(ctx: &CommandContext<'_>, index: &HelpIndex) -> CommandResult {
    let dispatcher = dispatcher(index)?;
    let label = ctx.get::<String>("command")?;
    let command = dispatcher
        .find(&label)
        .filter(|command| command.can_use(ctx.sender()))
        .ok_or_else(|| CommandError::new(format!("Unknown command: {label}")))?;

    if !command.description().is_empty() {
        ctx.reply(command.description());
    }
    let lines = command.all_usage(ctx.sender());
    for line in &lines {
        ctx.reply(&format!("  {line}"));
    }
    if !command.aliases().is_empty() {
        ctx.reply(&format!("Aliases: {}", command.aliases().join(", ")));
    }
    Ok(i32::try_from(lines.len()).unwrap_or(i32::MAX))
}
