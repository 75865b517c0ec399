//! Configuration and network settings for the GC terminal
//!
//! Defaults target Fantom mainnet. A JSON file (`~/.gcterm/config.json` or
//! `GCTERM_CONFIG`) may override any field; missing fields keep their
//! defaults. Environment variables are applied last.

use crate::core::constants::{
    DEFAULT_ALLOWED_CHAIN_IDS, DEFAULT_EXPLORER_TX_URL, DEFAULT_MESSENGER_URL, DEFAULT_NETWORK,
    DEFAULT_RECEIPT_POLL_ATTEMPTS, DEFAULT_RECEIPT_POLL_INTERVAL_MS, DEFAULT_RPC_ENDPOINT,
    GTON_ADDRESS, STAKING_ADDRESS, TOKEN_DECIMALS,
};
use crate::errors::{TerminalError, TerminalResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// Native currency description handed to the wallet when adding a chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Wallet-facing description of a network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainParams {
    /// Decimal chain id as reported by `net_version`
    pub chain_id: String,
    pub chain_id_hex: String,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub native_currency: NativeCurrency,
    pub block_explorer_urls: Vec<String>,
}

impl ChainParams {
    /// Chains every wallet knows about can only be switched to, not added
    pub fn is_builtin(&self) -> bool {
        matches!(self.chain_id_hex.to_lowercase().as_str(), "0x1" | "0x3")
    }
}

/// ERC-20 token known to the terminal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: String,
    pub symbol: String,
    pub decimals: u32,
}

impl TokenInfo {
    pub fn new(address: &str, symbol: &str, decimals: u32) -> Self {
        Self {
            address: address.to_string(),
            symbol: symbol.to_string(),
            decimals,
        }
    }
}

/// Built-in network map (name -> params)
pub fn default_networks() -> BTreeMap<String, ChainParams> {
    let mut map = BTreeMap::new();
    map.insert(
        "fantom".to_string(),
        ChainParams {
            chain_id: "250".to_string(),
            chain_id_hex: "0xfa".to_string(),
            chain_name: "Fantom Mainnet".to_string(),
            rpc_urls: vec!["https://rpc.fantom.network".to_string()],
            native_currency: NativeCurrency {
                name: "FTM".to_string(),
                symbol: "FTM".to_string(),
                decimals: 18,
            },
            block_explorer_urls: vec!["https://ftmscan.com/".to_string()],
        },
    );
    map.insert(
        "fantom-testnet".to_string(),
        ChainParams {
            chain_id: "4002".to_string(),
            chain_id_hex: "0xfa2".to_string(),
            chain_name: "Fantom Testnet".to_string(),
            rpc_urls: vec!["https://rpc.testnet.fantom.network".to_string()],
            native_currency: NativeCurrency {
                name: "FTM".to_string(),
                symbol: "FTM".to_string(),
                decimals: 18,
            },
            block_explorer_urls: vec!["https://testnet.ftmscan.com/".to_string()],
        },
    );
    map.insert(
        "ethereum".to_string(),
        ChainParams {
            chain_id: "1".to_string(),
            chain_id_hex: "0x1".to_string(),
            chain_name: "Ethereum Mainnet".to_string(),
            rpc_urls: vec!["https://cloudflare-eth.com".to_string()],
            native_currency: NativeCurrency {
                name: "Ether".to_string(),
                symbol: "ETH".to_string(),
                decimals: 18,
            },
            block_explorer_urls: vec!["https://etherscan.io/".to_string()],
        },
    );
    map
}

/// Terminal configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Network `switch` targets when called without an argument
    pub network: String,
    pub networks: BTreeMap<String, ChainParams>,
    /// `net_version` values accepted after `join`
    pub allowed_chain_ids: Vec<String>,
    pub rpc_endpoint: String,
    pub explorer_tx_url: String,
    pub is_testnet: bool,
    pub gton: TokenInfo,
    pub sgton: TokenInfo,
    pub staking_address: String,
    /// Bond NFT storage contract
    pub storage_address: String,
    /// ERC-20 tokens accepted by bonds, keyed by bond token name
    pub bond_tokens: BTreeMap<String, TokenInfo>,
    /// Bonding contracts: token name -> bond type -> address
    pub bonding_contracts: BTreeMap<String, BTreeMap<String, String>>,
    pub receipt_poll_interval_ms: u64,
    pub receipt_poll_attempts: u32,
    /// Base URL of the messenger mailbox API
    pub messenger_url: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        let mut bond_tokens = BTreeMap::new();
        bond_tokens.insert(
            "gton".to_string(),
            TokenInfo::new(GTON_ADDRESS, "GTON", TOKEN_DECIMALS),
        );
        bond_tokens.insert(
            "usdc".to_string(),
            TokenInfo::new("0x04068DA6C83AFCFA0e13ba15A6696662335D5B75", "USDC", 6),
        );

        Self {
            network: DEFAULT_NETWORK.to_string(),
            networks: default_networks(),
            allowed_chain_ids: DEFAULT_ALLOWED_CHAIN_IDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            rpc_endpoint: DEFAULT_RPC_ENDPOINT.to_string(),
            explorer_tx_url: DEFAULT_EXPLORER_TX_URL.to_string(),
            is_testnet: false,
            gton: TokenInfo::new(GTON_ADDRESS, "GTON", TOKEN_DECIMALS),
            sgton: TokenInfo::new(STAKING_ADDRESS, "SGTON", TOKEN_DECIMALS),
            staking_address: STAKING_ADDRESS.to_string(),
            storage_address: String::new(),
            bond_tokens,
            bonding_contracts: BTreeMap::new(),
            receipt_poll_interval_ms: DEFAULT_RECEIPT_POLL_INTERVAL_MS,
            receipt_poll_attempts: DEFAULT_RECEIPT_POLL_ATTEMPTS,
            messenger_url: DEFAULT_MESSENGER_URL.to_string(),
        }
    }
}

fn address_regex() -> &'static Regex {
    static ADDRESS: OnceLock<Regex> = OnceLock::new();
    ADDRESS.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("valid address regex"))
}

/// Check `0x`-prefixed 20-byte hex address format
pub fn is_valid_address(address: &str) -> bool {
    address_regex().is_match(address)
}

/// Default config file location (`GCTERM_CONFIG` or `~/.gcterm/config.json`)
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var("GCTERM_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::home_dir()
        .unwrap_or_default()
        .join(".gcterm")
        .join("config.json")
}

impl TerminalConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `GCTERM_*` environment overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(network) = env::var("GCTERM_NETWORK") {
            self.network = network.to_lowercase();
        }
        if let Ok(endpoint) = env::var("GCTERM_RPC_ENDPOINT") {
            self.rpc_endpoint = endpoint;
        }
        if let Ok(url) = env::var("GCTERM_EXPLORER_TX_URL") {
            self.explorer_tx_url = url;
        }
        if let Ok(url) = env::var("GCTERM_MESSENGER_URL") {
            self.messenger_url = url;
        }
        self
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> TerminalResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded terminal config");
        Ok(config)
    }

    /// Load `path` if given, else the default location if it exists, else
    /// defaults. Environment overrides are applied on top.
    pub fn load_or_default(path: Option<&Path>) -> TerminalResult<Self> {
        let config = match path {
            Some(path) => Self::load(path)?,
            None => {
                let default_path = default_config_path();
                if default_path.exists() {
                    Self::load(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        let config = config.with_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check addresses and cross references
    pub fn validate(&self) -> TerminalResult<()> {
        if !self.networks.contains_key(&self.network) {
            return Err(TerminalError::config(format!(
                "default network '{}' is not defined",
                self.network
            )));
        }
        if self.receipt_poll_attempts == 0 {
            return Err(TerminalError::config("receipt_poll_attempts must be positive"));
        }
        let url = self.messenger_url.as_str();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(TerminalError::config(format!(
                "messenger_url must be an http(s) URL, got '{}'",
                url
            )));
        }

        let mut addresses: Vec<(&str, &str)> = vec![
            ("gton", self.gton.address.as_str()),
            ("sgton", self.sgton.address.as_str()),
            ("staking_address", self.staking_address.as_str()),
        ];
        if !self.storage_address.is_empty() {
            addresses.push(("storage_address", self.storage_address.as_str()));
        }
        for (name, token) in &self.bond_tokens {
            addresses.push((name.as_str(), token.address.as_str()));
        }
        for by_type in self.bonding_contracts.values() {
            for address in by_type.values() {
                addresses.push(("bonding_contracts", address.as_str()));
            }
        }

        for (field, address) in addresses {
            if !is_valid_address(address) {
                return Err(TerminalError::config(format!(
                    "invalid address for {}: '{}'",
                    field, address
                )));
            }
        }
        Ok(())
    }

    /// Params of a named network
    pub fn chain(&self, name: &str) -> Option<&ChainParams> {
        self.networks.get(name)
    }

    pub fn network_names(&self) -> Vec<&str> {
        self.networks.keys().map(String::as_str).collect()
    }

    /// Bonding contract for a token/type pair
    pub fn bonding_contract(&self, token: &str, bond_type: &str) -> Option<&str> {
        self.bonding_contracts
            .get(token)
            .and_then(|by_type| by_type.get(bond_type))
            .map(String::as_str)
    }

    /// ERC-20 token accepted by bonds
    pub fn bond_token(&self, token: &str) -> Option<&TokenInfo> {
        self.bond_tokens.get(token)
    }

    /// Bond NFT storage contract
    pub fn storage_address(&self) -> TerminalResult<&str> {
        if self.storage_address.is_empty() {
            return Err(TerminalError::config("bond storage address is not configured"));
        }
        Ok(&self.storage_address)
    }

    /// Explorer link for a transaction hash
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}{}", self.explorer_tx_url, tx_hash)
    }

    pub fn receipt_poll_interval(&self) -> Duration {
        Duration::from_millis(self.receipt_poll_interval_ms)
    }
}
