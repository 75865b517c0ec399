//! `gcterm` command line
//!
//! Without `--command` the terminal runs interactively: the banner is shown
//! and lines are read from stdin until EOF or `exit`. Each `--command`
//! line is run in order instead, then the process exits.

use crate::config::TerminalConfig;
use crate::errors::TerminalResult;
use crate::logging::{init_logging, LogFormat, LoggingConfig};
use crate::terminal::{Mode, SessionState, Terminal};
use crate::workflows::Services;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

pub mod utils;

use utils::{echo_command, print_info, print_prompt, TermConsole};

/// GTON Capital terminal
#[derive(Parser, Debug)]
#[command(name = "gcterm")]
#[command(version)]
#[command(about = "Text terminal for the GTON Capital contracts", long_about = None)]
pub struct Cli {
    /// Default network for `switch` (fantom, fantom-testnet, ethereum, ...)
    #[arg(short, long)]
    pub network: Option<String>,

    /// JSON-RPC endpoint of the wallet provider
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Config file (defaults to ~/.gcterm/config.json when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Starting mode
    #[arg(short, long, default_value = "main")]
    pub mode: Mode,

    /// Seed for the choice of "command not found" replies
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long)]
    pub debug: bool,

    #[arg(long)]
    pub trace: bool,

    /// Log format: text, json or compact
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Also write logs to this directory
    #[arg(long)]
    pub log_dir: Option<String>,

    /// Run this line and exit (repeatable)
    #[arg(short = 'x', long = "command")]
    pub commands: Vec<String>,
}

impl Cli {
    /// Environment logging settings with flags on top
    pub fn logging_config(&self) -> LoggingConfig {
        let mut config = LoggingConfig::from_env();
        config.debug |= self.debug;
        config.trace |= self.trace;
        if let Some(format) = self.log_format {
            config = config.with_format(format);
        }
        if let Some(dir) = &self.log_dir {
            config = config.with_logging_dir(dir.clone());
        }
        config
    }

    /// Config file (or defaults) with environment and flag overrides
    pub fn terminal_config(&self) -> TerminalResult<TerminalConfig> {
        let mut config = TerminalConfig::load_or_default(self.config.as_deref())?;
        if let Some(network) = &self.network {
            config.network = network.to_lowercase();
        }
        if let Some(endpoint) = &self.endpoint {
            config.rpc_endpoint = endpoint.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

/// Parse arguments and run
pub async fn run() -> anyhow::Result<()> {
    run_with(Cli::parse()).await
}

pub async fn run_with(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli.logging_config());
    let config = cli.terminal_config()?;
    info!(
        network = %config.network,
        endpoint = %config.rpc_endpoint,
        mode = %cli.mode,
        "starting terminal"
    );

    let console = Arc::new(TermConsole::new());
    let mut terminal =
        Terminal::new(Services::over_rpc(config), console, cli.seed).with_mode(cli.mode);
    let mut session = SessionState::new();

    if !cli.commands.is_empty() {
        for line in &cli.commands {
            echo_command(&terminal.prompt(), line);
            terminal.handle_line(&mut session, line).await;
        }
        return Ok(());
    }

    terminal.banner();
    repl(&mut terminal, &mut session).await
}

async fn repl(terminal: &mut Terminal, session: &mut SessionState) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(&terminal.prompt())?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => break,
            _ => terminal.handle_line(session, line).await,
        }
    }
    print_info("Bye");
    Ok(())
}
