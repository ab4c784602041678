//! cmdtree - interactive command tree shell
//!
//! Drives the builtin command set through an interactive REPL with tab
//! completion, or runs one-shot subcommands.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! cmdtree
//!
//! # Run one line as an operator
//! cmdtree --op exec give steve diamond 3
//!
//! # Ask for completions
//! cmdtree complete "gamemode s"
//! ```

use std::sync::Arc;

use tracing::debug;

use cmdtree::builtin::{self, DEFAULT_PLAYERS, World};
use cmdtree::cli::CliInterface;
use cmdtree::error::Result;
use cmdtree::repl::{ReplEngine, Session};

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// This function orchestrates the application startup:
/// 1. Parse command-line arguments
/// 2. Load configuration
/// 3. Initialize logging
/// 4. Handle subcommands or start the interactive shell
///
/// # Returns
/// * `Result<()>` - Success or error
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    let session = create_session(&cli)?;

    if cli.handle_subcommand(&session).await? {
        return Ok(());
    }

    cli.print_banner(session.dispatcher().len());

    let mut repl = ReplEngine::new(session, cli.config())?;
    repl.run()?;

    if !cli.args().quiet {
        println!("Goodbye!");
    }
    Ok(())
}

/// Build the builtin dispatcher and the configured console sender
fn create_session(cli: &CliInterface) -> Result<Session> {
    let world = Arc::new(World::with_players(DEFAULT_PLAYERS.iter().copied()));
    let dispatcher = builtin::dispatcher(world)?;
    let sender = Arc::new(cli.config().console.sender());
    debug!(
        "Session for '{}' with permissions {:?}",
        cli.config().console.name,
        sender.permissions()
    );

    Ok(Session::new(
        dispatcher,
        sender,
        cli.config().shell.color_output,
    ))
}

/// Initialize logging system based on the configured level
///
/// Verbosity flags are already folded into the configuration by the CLI layer.
///
/// # Arguments
/// * `cli` - CLI interface holding the effective configuration
fn initialize_logging(cli: &CliInterface) {
    let level = cli.config().logging.level.to_tracing_level();

    // stdout is reserved for command output and completion lists
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
