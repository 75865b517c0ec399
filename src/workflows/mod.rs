//! Workflow handlers and the collaborators they run against.

pub mod bonding;
pub mod chat;
pub mod common;

use crate::chain::{ChainClient, Clock, HttpTransport, RpcProvider, SystemClock, WalletProvider};
use crate::config::TerminalConfig;
use crate::messenger::{Messenger, MessengerClient};
use crate::terminal::Console;
use std::sync::Arc;

/// Shared collaborators of a terminal
#[derive(Clone)]
pub struct Services {
    pub wallet: Arc<dyn WalletProvider>,
    pub chain: Arc<dyn ChainClient>,
    pub messenger: Arc<dyn Messenger>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<TerminalConfig>,
}

impl Services {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        chain: Arc<dyn ChainClient>,
        messenger: Arc<dyn Messenger>,
        clock: Arc<dyn Clock>,
        config: Arc<TerminalConfig>,
    ) -> Self {
        Self {
            wallet,
            chain,
            messenger,
            clock,
            config,
        }
    }

    /// JSON-RPC wallet and chain over the configured endpoint, HTTP
    /// messenger, wall clock
    pub fn over_rpc(config: TerminalConfig) -> Self {
        let config = Arc::new(config);
        let provider = Arc::new(RpcProvider::new(
            HttpTransport::new(config.rpc_endpoint.clone()),
            Arc::clone(&config),
        ));
        Self {
            wallet: provider.clone(),
            chain: provider,
            messenger: Arc::new(MessengerClient::new(config.messenger_url.clone())),
            clock: Arc::new(SystemClock),
            config,
        }
    }

    pub fn context<'a>(&'a self, console: &'a dyn Console) -> WorkflowContext<'a> {
        WorkflowContext {
            wallet: self.wallet.as_ref(),
            chain: self.chain.as_ref(),
            messenger: self.messenger.as_ref(),
            clock: self.clock.as_ref(),
            config: &self.config,
            console,
        }
    }
}

/// Borrowed view handed to each workflow invocation
#[derive(Clone, Copy)]
pub struct WorkflowContext<'a> {
    pub wallet: &'a dyn WalletProvider,
    pub chain: &'a dyn ChainClient,
    pub messenger: &'a dyn Messenger,
    pub clock: &'a dyn Clock,
    pub config: &'a TerminalConfig,
    pub console: &'a dyn Console,
}

impl WorkflowContext<'_> {
    /// Emit the explorer link of a transaction
    pub fn emit_tx_link(&self, tx_hash: &str) {
        self.console
            .emit_link(crate::messages::VIEW_TXN, &self.config.tx_url(tx_hash));
    }
}
