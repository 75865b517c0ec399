//! Wallet and chain collaborators
//!
//! Workflows never talk to a network directly. They go through the
//! [`WalletProvider`], [`ChainClient`] and [`Clock`] traits, which keeps the
//! command core testable with in-memory doubles. [`provider::RpcProvider`] is
//! the production implementation over JSON-RPC.

pub mod abi;
pub mod provider;
pub mod rpc;

use crate::config::{ChainParams, TokenInfo};
use crate::errors::TerminalResult;
use crate::utils::{unix_now, Wei};
use async_trait::async_trait;

pub use provider::RpcProvider;
pub use rpc::{HttpTransport, RpcTransport};

/// On-chain state of a bond
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondInfo {
    pub is_active: bool,
    /// Unix seconds
    pub issue_timestamp: i64,
    /// Unix seconds; claims are rejected before this
    pub release_timestamp: i64,
    pub release_amount: Wei,
}

/// Outcome of a mined transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub transaction_hash: String,
    /// Token id minted by the transaction, if it minted one
    pub minted_id: Option<u128>,
}

impl TxReceipt {
    pub fn new(transaction_hash: impl Into<String>) -> Self {
        Self {
            transaction_hash: transaction_hash.into(),
            minted_id: None,
        }
    }

    pub fn with_minted_id(mut self, id: u128) -> Self {
        self.minted_id = Some(id);
        self
    }
}

/// Account access and wallet-side requests
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Request account access; returns the selected address.
    ///
    /// Fails with `NoWalletProvider` when no compatible provider answers.
    async fn connect_wallet(&self) -> TerminalResult<String>;

    /// Ask the wallet to switch to (or add) a chain
    async fn switch_chain(&self, chain: &ChainParams) -> TerminalResult<()>;

    /// Ask the wallet to track an ERC-20 token
    async fn add_token(&self, token: &TokenInfo) -> TerminalResult<()>;
}

/// Reads and transactions against GC contracts
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// ERC-20 balance of `owner`
    async fn balance_of(&self, owner: &str, token: &str) -> TerminalResult<Wei>;

    /// GTON staked by `owner` in the sGTON contract
    async fn staked_share(&self, owner: &str) -> TerminalResult<Wei>;

    async fn allowance(&self, token: &str, owner: &str, spender: &str) -> TerminalResult<Wei>;

    async fn approve(&self, token: &str, spender: &str, amount: Wei) -> TerminalResult<TxReceipt>;

    /// Testnet airdrop of `token`
    async fn faucet(&self, token: &str) -> TerminalResult<TxReceipt>;

    /// Issue a bond paid in an ERC-20 token
    async fn mint(&self, contract: &str, amount: Wei) -> TerminalResult<TxReceipt>;

    /// Issue a bond paid in the native currency
    async fn mint_native(&self, contract: &str, amount: Wei) -> TerminalResult<TxReceipt>;

    async fn bond_ids(&self, owner: &str) -> TerminalResult<Vec<u128>>;

    /// Bonding contract that issued `bond_id`
    async fn bonding_contract_of(&self, bond_id: u128) -> TerminalResult<String>;

    async fn bond_info(&self, contract: &str, bond_id: u128) -> TerminalResult<BondInfo>;

    async fn claim(&self, contract: &str, bond_id: u128) -> TerminalResult<TxReceipt>;

    /// Quoted `(amount_out, discount)` for paying `amount`
    async fn quote_amount_out(&self, contract: &str, amount: Wei) -> TerminalResult<(Wei, Wei)>;

    /// Current discount of a bonding contract in percent
    async fn quote_discount_percent(&self, contract: &str) -> TerminalResult<u128>;
}

/// Source of the current time for time-gated workflows
pub trait Clock: Send + Sync {
    /// Unix seconds
    fn now(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        unix_now()
    }
}
