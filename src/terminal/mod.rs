//! Command interpreter core
//!
//! A [`Terminal`] owns one [`Dispatcher`] and a command table per [`Mode`].
//! Each input line is parsed, looked up in the active table and run through
//! the [`ExecutionGuard`]. Session state is passed in explicitly by the
//! caller so that every workflow sees the same connection.

pub mod command;
pub mod console;
pub mod dispatcher;
pub mod guard;
pub mod parser;
pub mod session;

pub use command::{Command, CommandTable, GuardPolicy, Route, Workflow};
pub use console::{BufferedConsole, Console, Emission};
pub use dispatcher::Dispatcher;
pub use guard::{failure_message, ExecutionGuard, GuardFlags};
pub use parser::{parse_input, ParsedInput};
pub use session::SessionState;

use crate::errors::TerminalError;
use crate::messages;
use crate::workflows::Services;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Named command vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Main,
    Bonding,
    Chat,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Main, Mode::Bonding, Mode::Chat];

    pub fn name(&self) -> &'static str {
        match self {
            Mode::Main => "main",
            Mode::Bonding => "bonding",
            Mode::Chat => "chat",
        }
    }

    pub fn prompt(&self) -> String {
        format!("gc/{} $ ", self.name())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = TerminalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "main" => Ok(Mode::Main),
            "bonding" => Ok(Mode::Bonding),
            "chat" => Ok(Mode::Chat),
            _ => Err(TerminalError::validation(messages::AVAILABLE_PROJECTS)),
        }
    }
}

/// Interactive shell over the dispatcher
pub struct Terminal {
    dispatcher: Dispatcher,
    main: CommandTable,
    bonding: CommandTable,
    chat: CommandTable,
    mode: Mode,
}

impl Terminal {
    pub fn new(services: Services, console: Arc<dyn Console>, seed: Option<u64>) -> Self {
        Self {
            dispatcher: Dispatcher::new(services, console, seed),
            main: CommandTable::main_mode(),
            bonding: CommandTable::bonding_mode(),
            chat: CommandTable::chat_mode(),
            mode: Mode::Main,
        }
    }

    /// Start in `mode` instead of main
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn prompt(&self) -> String {
        self.mode.prompt()
    }

    pub fn table(&self) -> &CommandTable {
        match self.mode {
            Mode::Main => &self.main,
            Mode::Bonding => &self.bonding,
            Mode::Chat => &self.chat,
        }
    }

    pub fn guard_flags(&self) -> &GuardFlags {
        self.dispatcher.guard_flags()
    }

    pub fn banner(&self) {
        for line in messages::BANNER.lines() {
            self.dispatcher.console().emit_line(line);
        }
    }

    /// Handle one input line, including the `cd` shell command
    pub async fn handle_line(&mut self, session: &mut SessionState, raw: &str) {
        let input = parse_input(raw);
        if input.command == "cd" {
            self.change_mode(&input.argument);
            return;
        }
        let table = match self.mode {
            Mode::Main => &self.main,
            Mode::Bonding => &self.bonding,
            Mode::Chat => &self.chat,
        };
        self.dispatcher.handle_command(table, session, raw).await;
    }

    fn change_mode(&mut self, argument: &str) {
        let console = self.dispatcher.console();
        match argument.parse::<Mode>() {
            Ok(mode) => {
                info!(from = %self.mode, to = %mode, "mode changed");
                self.mode = mode;
                console.emit_line(&messages::mode_switched(mode.name()));
            }
            Err(err) => console.emit_line(&err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("Bonding".parse::<Mode>().unwrap(), Mode::Bonding);
        assert_eq!(" main ".parse::<Mode>().unwrap(), Mode::Main);
        assert_eq!("chat".parse::<Mode>().unwrap(), Mode::Chat);
        let err = "staking".parse::<Mode>().unwrap_err();
        assert_eq!(err.to_string(), messages::AVAILABLE_PROJECTS);
        assert!("".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_prompt() {
        assert_eq!(Mode::Main.prompt(), "gc/main $ ");
        assert_eq!(Mode::Bonding.prompt(), "gc/bonding $ ");
        assert_eq!(Mode::Chat.prompt(), "gc/chat $ ");
        assert_eq!(Mode::default(), Mode::Main);
    }
}
