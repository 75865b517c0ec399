//! In-memory collaborators for terminal tests.

#![allow(dead_code)]

use async_trait::async_trait;
use gcterm::{
    BondInfo, BufferedConsole, ChainClient, ChainParams, Clock, GuardFlags, Messenger, Services,
    SessionState, TerminalConfig, TerminalError, TerminalResult, Terminal, TokenInfo, TxReceipt,
    WalletProvider, Wei, WhitelistEntry,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

pub const ACCOUNT: &str = "0x1111111111111111111111111111111111111111";
pub const STORAGE: &str = "0x2222222222222222222222222222222222222222";
pub const GTON_7D: &str = "0x3333333333333333333333333333333333333333";
pub const FTM_30D: &str = "0x4444444444444444444444444444444444444444";
pub const USDC_90D: &str = "0x5555555555555555555555555555555555555555";
pub const TX_HASH: &str = "0xfeed";

pub const ONE: u128 = 1_000_000_000_000_000_000;

/// A collaborator call as observed by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ConnectWallet,
    SwitchChain(String),
    AddToken(String),
    BalanceOf { owner: String, token: String },
    StakedShare(String),
    Allowance { token: String, owner: String, spender: String },
    Approve { token: String, spender: String, amount: u128 },
    Faucet(String),
    Mint { contract: String, amount: u128 },
    MintNative { contract: String, amount: u128 },
    BondIds(String),
    BondingContractOf(u128),
    BondInfo { contract: String, bond_id: u128 },
    Claim { contract: String, bond_id: u128 },
    QuoteAmountOut { contract: String, amount: u128 },
    QuoteDiscountPercent(String),
    Whitelist,
}

/// Canned answers of the mock
#[derive(Debug, Clone)]
pub struct MockState {
    pub address: String,
    /// Returned by every call when set
    pub error: Option<TerminalError>,
    pub balances: HashMap<String, Wei>,
    pub share: Wei,
    pub allowance: Wei,
    pub bond_ids: Vec<u128>,
    pub bond_contract: String,
    pub bond_info: BondInfo,
    pub minted_id: Option<u128>,
    pub quote: (Wei, Wei),
    pub discount_percent: u128,
    pub whitelist: Vec<WhitelistEntry>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            address: ACCOUNT.to_string(),
            error: None,
            balances: HashMap::new(),
            share: Wei::ZERO,
            allowance: Wei::ZERO,
            bond_ids: Vec::new(),
            bond_contract: GTON_7D.to_string(),
            bond_info: BondInfo {
                is_active: true,
                issue_timestamp: 1_641_373_387,
                release_timestamp: 1_641_978_187,
                release_amount: Wei::new(ONE + ONE / 4),
            },
            minted_id: Some(7),
            quote: (Wei::new(2 * ONE), Wei::new(ONE / 10)),
            discount_percent: 5,
            whitelist: Vec::new(),
        }
    }
}

/// Wallet and chain double that records every call together with the guard
/// lock state at the moment of the call
#[derive(Default)]
pub struct MockBackend {
    pub state: Mutex<MockState>,
    calls: Mutex<Vec<Call>>,
    lock_samples: Mutex<Vec<bool>>,
    flags: Mutex<Option<GuardFlags>>,
}

impl MockBackend {
    pub fn new(state: MockState) -> Self {
        Self {
            state: Mutex::new(state),
            ..Default::default()
        }
    }

    /// Sample these flags on every call
    pub fn spy_on(&self, flags: GuardFlags) {
        *self.flags.lock().unwrap() = Some(flags);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Lock flag as seen by each call
    pub fn lock_samples(&self) -> Vec<bool> {
        self.lock_samples.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
        self.lock_samples.lock().unwrap().clear();
    }

    pub fn fail_with(&self, error: TerminalError) {
        self.state.lock().unwrap().error = Some(error);
    }

    pub fn update(&self, f: impl FnOnce(&mut MockState)) {
        f(&mut self.state.lock().unwrap());
    }

    fn record(&self, call: Call) -> TerminalResult<MockState> {
        if let Some(flags) = self.flags.lock().unwrap().as_ref() {
            self.lock_samples.lock().unwrap().push(flags.is_locked());
        }
        self.calls.lock().unwrap().push(call);
        let state = self.state.lock().unwrap().clone();
        match &state.error {
            Some(error) => Err(error.clone()),
            None => Ok(state),
        }
    }

    fn receipt() -> TxReceipt {
        TxReceipt::new(TX_HASH)
    }
}

#[async_trait]
impl WalletProvider for MockBackend {
    async fn connect_wallet(&self) -> TerminalResult<String> {
        Ok(self.record(Call::ConnectWallet)?.address)
    }

    async fn switch_chain(&self, chain: &ChainParams) -> TerminalResult<()> {
        self.record(Call::SwitchChain(chain.chain_id_hex.clone()))?;
        Ok(())
    }

    async fn add_token(&self, token: &TokenInfo) -> TerminalResult<()> {
        self.record(Call::AddToken(token.symbol.clone()))?;
        Ok(())
    }
}

#[async_trait]
impl ChainClient for MockBackend {
    async fn balance_of(&self, owner: &str, token: &str) -> TerminalResult<Wei> {
        let state = self.record(Call::BalanceOf {
            owner: owner.to_string(),
            token: token.to_string(),
        })?;
        Ok(state.balances.get(token).copied().unwrap_or(Wei::ZERO))
    }

    async fn staked_share(&self, owner: &str) -> TerminalResult<Wei> {
        Ok(self.record(Call::StakedShare(owner.to_string()))?.share)
    }

    async fn allowance(&self, token: &str, owner: &str, spender: &str) -> TerminalResult<Wei> {
        let state = self.record(Call::Allowance {
            token: token.to_string(),
            owner: owner.to_string(),
            spender: spender.to_string(),
        })?;
        Ok(state.allowance)
    }

    async fn approve(&self, token: &str, spender: &str, amount: Wei) -> TerminalResult<TxReceipt> {
        self.record(Call::Approve {
            token: token.to_string(),
            spender: spender.to_string(),
            amount: amount.as_u128(),
        })?;
        Ok(Self::receipt())
    }

    async fn faucet(&self, token: &str) -> TerminalResult<TxReceipt> {
        self.record(Call::Faucet(token.to_string()))?;
        Ok(Self::receipt())
    }

    async fn mint(&self, contract: &str, amount: Wei) -> TerminalResult<TxReceipt> {
        let state = self.record(Call::Mint {
            contract: contract.to_string(),
            amount: amount.as_u128(),
        })?;
        Ok(minted(&state))
    }

    async fn mint_native(&self, contract: &str, amount: Wei) -> TerminalResult<TxReceipt> {
        let state = self.record(Call::MintNative {
            contract: contract.to_string(),
            amount: amount.as_u128(),
        })?;
        Ok(minted(&state))
    }

    async fn bond_ids(&self, owner: &str) -> TerminalResult<Vec<u128>> {
        Ok(self.record(Call::BondIds(owner.to_string()))?.bond_ids)
    }

    async fn bonding_contract_of(&self, bond_id: u128) -> TerminalResult<String> {
        Ok(self.record(Call::BondingContractOf(bond_id))?.bond_contract)
    }

    async fn bond_info(&self, contract: &str, bond_id: u128) -> TerminalResult<BondInfo> {
        let state = self.record(Call::BondInfo {
            contract: contract.to_string(),
            bond_id,
        })?;
        Ok(state.bond_info)
    }

    async fn claim(&self, contract: &str, bond_id: u128) -> TerminalResult<TxReceipt> {
        self.record(Call::Claim {
            contract: contract.to_string(),
            bond_id,
        })?;
        Ok(Self::receipt())
    }

    async fn quote_amount_out(&self, contract: &str, amount: Wei) -> TerminalResult<(Wei, Wei)> {
        let state = self.record(Call::QuoteAmountOut {
            contract: contract.to_string(),
            amount: amount.as_u128(),
        })?;
        Ok(state.quote)
    }

    async fn quote_discount_percent(&self, contract: &str) -> TerminalResult<u128> {
        Ok(self
            .record(Call::QuoteDiscountPercent(contract.to_string()))?
            .discount_percent)
    }
}

#[async_trait]
impl Messenger for MockBackend {
    async fn whitelist(&self) -> TerminalResult<Vec<WhitelistEntry>> {
        Ok(self.record(Call::Whitelist)?.whitelist)
    }
}

fn minted(state: &MockState) -> TxReceipt {
    match state.minted_id {
        Some(id) => TxReceipt::new(TX_HASH).with_minted_id(id),
        None => TxReceipt::new(TX_HASH),
    }
}

/// Settable clock
#[derive(Debug, Default)]
pub struct FixedClock(AtomicI64);

impl FixedClock {
    pub fn at(now: i64) -> Self {
        Self(AtomicI64::new(now))
    }

    pub fn set(&self, now: i64) {
        self.0.store(now, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Config with every bonding contract used by the tests
pub fn test_config() -> TerminalConfig {
    let mut config = TerminalConfig::default();
    config.storage_address = STORAGE.to_string();
    let mut contracts: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    contracts
        .entry("gton".into())
        .or_default()
        .insert("7d".into(), GTON_7D.into());
    contracts
        .entry("ftm".into())
        .or_default()
        .insert("30d".into(), FTM_30D.into());
    contracts
        .entry("usdc".into())
        .or_default()
        .insert("90d".into(), USDC_90D.into());
    config.bonding_contracts = contracts;
    config
}

/// Terminal wired to the mocks
pub struct Harness {
    pub backend: Arc<MockBackend>,
    pub clock: Arc<FixedClock>,
    pub console: BufferedConsole,
    pub config: Arc<TerminalConfig>,
    pub terminal: Terminal,
    pub session: SessionState,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: TerminalConfig) -> Self {
        let backend = Arc::new(MockBackend::new(MockState::default()));
        let clock = Arc::new(FixedClock::at(0));
        let console = BufferedConsole::new();
        let config = Arc::new(config);
        let services = Services::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            clock.clone(),
            Arc::clone(&config),
        );
        let terminal = Terminal::new(services, Arc::new(console.clone()), Some(42));
        backend.spy_on(terminal.guard_flags().clone());
        Self {
            backend,
            clock,
            console,
            config,
            terminal,
            session: SessionState::new(),
        }
    }

    pub fn services(&self) -> Services {
        Services::new(
            self.backend.clone(),
            self.backend.clone(),
            self.backend.clone(),
            self.clock.clone(),
            Arc::clone(&self.config),
        )
    }

    /// Run one line and return the text lines it emitted
    pub async fn run(&mut self, line: &str) -> Vec<String> {
        self.console.clear();
        self.terminal.handle_line(&mut self.session, line).await;
        self.console.lines()
    }

    /// Connect the wallet and forget the calls it made
    pub async fn connect(&mut self) {
        let lines = self.run("join").await;
        assert_eq!(lines, vec![format!("Connected successfully: {}", ACCOUNT)]);
        self.backend.clear();
        self.console.clear();
    }
}
