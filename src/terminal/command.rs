//! Command vocabulary: commands, the workflows they run, and per-mode
//! lookup tables.

use crate::errors::TerminalResult;
use crate::messages;
use crate::terminal::SessionState;
use crate::workflows::{bonding, chat, common, WorkflowContext};
use std::collections::BTreeMap;

/// A command name and whether it needs an argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub requires_argument: bool,
}

impl Command {
    pub fn new(name: impl Into<String>, requires_argument: bool) -> Self {
        Self {
            name: name.into(),
            requires_argument,
        }
    }
}

/// Every workflow a command can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    Connect,
    SwitchNetwork,
    Balance,
    AddToken,
    Faucet,
    MainHelp,
    BondingHelp,
    Preview,
    Mint,
    Claim,
    Info,
    Tokens,
    Types,
    Bonds,
    ChatHelp,
    Whitelist,
}

impl Workflow {
    /// Run the workflow with an already lower-cased argument
    pub async fn run(
        self,
        ctx: &WorkflowContext<'_>,
        session: &mut SessionState,
        argument: &str,
    ) -> TerminalResult<()> {
        match self {
            Workflow::Connect => common::connect(ctx, session).await,
            Workflow::SwitchNetwork => common::switch_network(ctx, argument).await,
            Workflow::Balance => common::balance(ctx, session, argument).await,
            Workflow::AddToken => common::add_token(ctx, argument).await,
            Workflow::Faucet => common::faucet(ctx, argument).await,
            Workflow::MainHelp => {
                common::help(ctx);
                Ok(())
            }
            Workflow::BondingHelp => {
                bonding::help(ctx);
                Ok(())
            }
            Workflow::Preview => bonding::preview(ctx, argument).await,
            Workflow::Mint => bonding::mint(ctx, session, argument).await,
            Workflow::Claim => bonding::claim(ctx, argument).await,
            Workflow::Info => bonding::info(ctx, argument).await,
            Workflow::Tokens => {
                bonding::tokens(ctx);
                Ok(())
            }
            Workflow::Types => {
                bonding::types(ctx);
                Ok(())
            }
            Workflow::Bonds => bonding::bonds(ctx, session).await,
            Workflow::ChatHelp => {
                chat::help(ctx);
                Ok(())
            }
            Workflow::Whitelist => chat::whitelist(ctx).await,
        }
    }
}

/// How a route is wrapped by the execution guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardPolicy {
    /// Runs without touching the lock or loading flags
    Unguarded,
    /// Runs inside the guard; a failure prints `error_override` when set
    Guarded { error_override: Option<&'static str> },
}

impl GuardPolicy {
    pub const fn guarded() -> Self {
        GuardPolicy::Guarded {
            error_override: None,
        }
    }

    pub const fn with_override(message: &'static str) -> Self {
        GuardPolicy::Guarded {
            error_override: Some(message),
        }
    }
}

/// A table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub command: Command,
    pub workflow: Workflow,
    pub guard: GuardPolicy,
}

impl Route {
    pub fn new(command: Command, workflow: Workflow, guard: GuardPolicy) -> Self {
        Self {
            command,
            workflow,
            guard,
        }
    }
}

/// Name → route lookup for one mode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTable {
    routes: BTreeMap<String, Route>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, returning the one it replaced
    pub fn insert(&mut self, route: Route) -> Option<Route> {
        self.routes.insert(route.command.name.clone(), route)
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(
        mut self,
        name: &str,
        workflow: Workflow,
        requires_argument: bool,
        guard: GuardPolicy,
    ) -> Self {
        self.insert(Route::new(
            Command::new(name, requires_argument),
            workflow,
            guard,
        ));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.routes.contains_key(name)
    }

    /// Command names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Union of both tables. On a name collision the `mode` entry wins.
    pub fn merge(base: &CommandTable, mode: &CommandTable) -> CommandTable {
        let mut merged = base.clone();
        for route in mode.routes.values() {
            if let Some(shadowed) = merged.insert(route.clone()) {
                tracing::debug!(
                    command = %shadowed.command.name,
                    "mode table overrides base command"
                );
            }
        }
        merged
    }

    /// Wallet commands available in every mode
    pub fn base() -> CommandTable {
        CommandTable::new()
            .with(
                "join",
                Workflow::Connect,
                false,
                GuardPolicy::with_override(messages::CONNECT_FAILED),
            )
            .with(
                "switch",
                Workflow::SwitchNetwork,
                false,
                GuardPolicy::with_override(messages::SWITCH_FAILED),
            )
            .with(
                "balance",
                Workflow::Balance,
                false,
                GuardPolicy::with_override(messages::BALANCE_FAILED),
            )
            .with(
                "add",
                Workflow::AddToken,
                false,
                GuardPolicy::with_override(messages::ADD_TOKEN_FAILED),
            )
            .with("faucet", Workflow::Faucet, false, GuardPolicy::guarded())
    }

    pub fn main_mode() -> CommandTable {
        let mode = CommandTable::new().with(
            "help",
            Workflow::MainHelp,
            false,
            GuardPolicy::Unguarded,
        );
        CommandTable::merge(&CommandTable::base(), &mode)
    }

    pub fn bonding_mode() -> CommandTable {
        let mode = CommandTable::new()
            .with("preview", Workflow::Preview, true, GuardPolicy::guarded())
            .with("mint", Workflow::Mint, true, GuardPolicy::guarded())
            .with("claim", Workflow::Claim, true, GuardPolicy::guarded())
            .with("info", Workflow::Info, true, GuardPolicy::guarded())
            .with("tokens", Workflow::Tokens, false, GuardPolicy::Unguarded)
            .with("types", Workflow::Types, false, GuardPolicy::Unguarded)
            .with("bonds", Workflow::Bonds, false, GuardPolicy::guarded())
            .with("help", Workflow::BondingHelp, false, GuardPolicy::Unguarded);
        CommandTable::merge(&CommandTable::base(), &mode)
    }

    pub fn chat_mode() -> CommandTable {
        let mode = CommandTable::new()
            .with(
                "whitelist",
                Workflow::Whitelist,
                false,
                GuardPolicy::with_override(messages::WHITELIST_FAILED),
            )
            .with("help", Workflow::ChatHelp, false, GuardPolicy::Unguarded);
        CommandTable::merge(&CommandTable::base(), &mode)
    }
}
