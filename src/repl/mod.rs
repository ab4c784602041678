//! REPL (Read-Eval-Print Loop) engine for the cmdtree shell
//!
//! This module provides an interactive shell interface with features:
//! - Command line editing with reedline
//! - Command history management
//! - Completion menu fed by the command tree's suggestion engine
//! - Inline hints and label highlighting
//! - Multi-line input while a quoted string is open
//!
//! # Architecture
//!
//! [`ReplEngine`] owns the line editor and the prompt. Every line it reads is
//! handed to a [`Session`], which dispatches it for the console sender and turns
//! failures into printable messages.

mod completer;
mod highlighter;
mod hinter;
mod prompt;
mod validator;

pub use completer::TreeCompleter;
pub use highlighter::LabelHighlighter;
pub use hinter::TreeHinter;
pub use prompt::ShellPrompt;
pub use validator::QuoteValidator;

use std::sync::Arc;

use nu_ansi_term::Color;
use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use tracing::debug;

use crate::command::CommandDispatcher;
use crate::config::Config;
use crate::error::{CmdTreeError, Result};
use crate::sender::{CommandSender, ConsoleSender};

const COMPLETION_MENU: &str = "completion_menu";

/// Lines that end the session instead of being dispatched
const EXIT_WORDS: &[&str] = &["exit", "quit"];

/// What happened to one input line
#[derive(Debug)]
pub enum LineOutcome {
    /// Blank line, nothing dispatched
    Empty,
    /// The user asked to leave
    Exit,
    /// The command ran and returned this result
    Executed(i32),
    /// Dispatch or the executor failed
    Failed(CmdTreeError),
}

/// Dispatches lines for one sender
pub struct Session {
    dispatcher: Arc<CommandDispatcher>,
    sender: Arc<ConsoleSender>,
    color_enabled: bool,
}

impl Session {
    pub fn new(
        dispatcher: Arc<CommandDispatcher>,
        sender: Arc<ConsoleSender>,
        color_enabled: bool,
    ) -> Self {
        Self {
            dispatcher,
            sender,
            color_enabled,
        }
    }

    pub fn dispatcher(&self) -> &Arc<CommandDispatcher> {
        &self.dispatcher
    }

    pub fn sender(&self) -> &Arc<ConsoleSender> {
        &self.sender
    }

    /// Dispatch one input line
    ///
    /// # Arguments
    /// * `line` - Raw line as read from the editor
    ///
    /// # Returns
    /// * `LineOutcome` - Result of the line
    pub fn handle_line(&self, line: &str) -> LineOutcome {
        let line = line.trim();
        if line.is_empty() {
            return LineOutcome::Empty;
        }
        if EXIT_WORDS.contains(&line) {
            return LineOutcome::Exit;
        }

        debug!("Dispatching line for {}: {}", self.sender.name(), line);
        match self.dispatcher.execute(self.sender.as_ref(), line) {
            Ok(code) => LineOutcome::Executed(code),
            Err(e) => LineOutcome::Failed(e),
        }
    }

    /// Render an error the way the shell prints it
    pub fn format_error(&self, error: &CmdTreeError) -> String {
        let message = format!("Error: {error}");
        if self.color_enabled {
            Color::Red.paint(message).to_string()
        } else {
            message
        }
    }
}

/// REPL engine for interactive command execution
pub struct ReplEngine {
    /// Line editor for command input
    editor: Reedline,

    prompt: ShellPrompt,

    session: Session,

    /// Whether to continue running
    running: bool,
}

impl ReplEngine {
    /// Create a new REPL engine
    ///
    /// # Arguments
    /// * `session` - Dispatcher and sender the lines go to
    /// * `config` - Shell and history configuration
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(session: Session, config: &Config) -> Result<Self> {
        let color_enabled = session.color_enabled;
        let dispatcher = session.dispatcher.clone();
        let sender: Arc<dyn CommandSender> = session.sender.clone();

        let history = if config.history.persist {
            FileBackedHistory::with_file(config.history.max_size, config.history.file_path.clone())?
        } else {
            FileBackedHistory::new(config.history.max_size)?
        };

        let menu = ColumnarMenu::default()
            .with_name(COMPLETION_MENU)
            .with_columns(config.shell.menu_columns);

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let editor = Reedline::create()
            .with_history(Box::new(history))
            .with_completer(Box::new(TreeCompleter::new(
                dispatcher.clone(),
                sender.clone(),
                config.shell.show_tooltips,
            )))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_hinter(Box::new(TreeHinter::new(dispatcher.clone(), sender.clone())))
            .with_highlighter(Box::new(LabelHighlighter::new(dispatcher, sender, color_enabled)))
            .with_validator(Box::new(QuoteValidator::new()))
            .with_partial_completions(true);

        let prompt = ShellPrompt::new(
            session.sender.name().to_string(),
            config.shell.prompt.clone(),
            session.sender.is_operator(),
            color_enabled,
        );

        Ok(Self {
            editor,
            prompt,
            session,
            running: true,
        })
    }

    /// Start the REPL loop
    ///
    /// Reads lines until `exit`, Ctrl-D or Ctrl-C, printing every failure.
    ///
    /// # Returns
    /// * `Result<()>` - Ok when REPL exits normally, error on failure
    pub fn run(&mut self) -> Result<()> {
        while self.running {
            let Some(line) = self.read_line()? else {
                break;
            };

            match self.session.handle_line(&line) {
                LineOutcome::Empty => {}
                LineOutcome::Exit => self.stop(),
                LineOutcome::Executed(code) => debug!("Command returned {}", code),
                LineOutcome::Failed(e) => eprintln!("{}", self.session.format_error(&e)),
            }
        }
        Ok(())
    }

    /// Read a single line of input
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line or None on EOF
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            // Ctrl-C / Ctrl-D
            Signal::CtrlC | Signal::CtrlD => Ok(None),
            #[allow(unreachable_patterns)]
            _ => Ok(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{self, DEFAULT_PLAYERS, World};
    use crate::error::DispatchError;

    fn session(sender: ConsoleSender, color: bool) -> Session {
        let world = Arc::new(World::with_players(DEFAULT_PLAYERS.iter().copied()));
        Session::new(builtin::dispatcher(world).unwrap(), Arc::new(sender), color)
    }

    #[test]
    fn test_blank_and_exit_lines() {
        let session = session(ConsoleSender::new("console"), false);
        assert!(matches!(session.handle_line("   "), LineOutcome::Empty));
        assert!(matches!(session.handle_line("exit"), LineOutcome::Exit));
        assert!(matches!(session.handle_line(" quit "), LineOutcome::Exit));
    }

    #[test]
    fn test_executed_line() {
        let (sender, messages) = ConsoleSender::new("console").capturing();
        let session = session(sender, false);
        assert!(matches!(session.handle_line("echo hi"), LineOutcome::Executed(2)));
        assert_eq!(*messages.lock().unwrap(), vec!["hi"]);
    }

    #[test]
    fn test_failed_line() {
        let session = session(ConsoleSender::new("console"), false);
        match session.handle_line("frobnicate") {
            LineOutcome::Failed(e) => {
                assert!(matches!(
                    e,
                    CmdTreeError::Dispatch(DispatchError::UnknownCommand(ref label)) if label == "frobnicate"
                ));
                assert_eq!(session.format_error(&e), "Error: Unknown command: frobnicate");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_colored_error() {
        let session = session(ConsoleSender::new("console"), true);
        let error = CmdTreeError::Generic("boom".to_string());
        let rendered = session.format_error(&error);
        assert!(rendered.contains("Error: boom"));
        assert_ne!(rendered, "Error: boom");
    }
}
