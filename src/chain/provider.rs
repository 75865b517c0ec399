//! JSON-RPC implementation of the wallet and chain collaborators.
//!
//! Talks to an EIP-1193 style endpoint: a node with unlocked accounts or a
//! wallet bridge that answers `eth_requestAccounts`, signs
//! `eth_sendTransaction`, and understands the `wallet_*` methods. The
//! account returned by `connect_wallet` is the sender of every transaction.

use crate::chain::abi::{
    decode_uint_array, decode_words, encode_call, event_topic, parse_quantity, to_quantity,
    word_at, word_to_address, word_to_bool, word_to_u128, AbiValue, Word,
};
use crate::chain::rpc::RpcTransport;
use crate::chain::{BondInfo, ChainClient, TxReceipt, WalletProvider};
use crate::config::{ChainParams, TerminalConfig, TokenInfo};
use crate::errors::{TerminalError, TerminalResult, TransactionFailed};
use crate::utils::Wei;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Contract functions and events used by the terminal
pub mod signatures {
    pub const BALANCE_OF: &str = "balanceOf(address)";
    pub const ALLOWANCE: &str = "allowance(address,address)";
    pub const APPROVE: &str = "approve(address,uint256)";
    pub const FAUCET: &str = "faucet()";
    pub const USER_SHARE: &str = "userShare(address)";
    pub const MINT: &str = "mint(uint256)";
    pub const MINT_NATIVE: &str = "mintNative()";
    pub const USER_IDS: &str = "userIds(address)";
    pub const ISSUED_BY: &str = "issuedBy(uint256)";
    pub const BOND_INFO: &str = "bondInfo(uint256)";
    pub const CLAIM: &str = "claim(uint256)";
    pub const AMOUNT_OUT: &str = "amountOut(uint256)";
    pub const DISCOUNT_PERCENT: &str = "discountPercent()";
    pub const TRANSFER_EVENT: &str = "Transfer(address,address,uint256)";
}

/// JSON-RPC error code for "method not found"
const METHOD_NOT_FOUND: i64 = -32601;

/// Wallet + chain collaborator over a [`RpcTransport`]
pub struct RpcProvider<T> {
    transport: T,
    config: Arc<TerminalConfig>,
    account: RwLock<Option<String>>,
}

impl<T: RpcTransport> RpcProvider<T> {
    pub fn new(transport: T, config: Arc<TerminalConfig>) -> Self {
        Self {
            transport,
            config,
            account: RwLock::new(None),
        }
    }

    /// Account selected by the last successful `connect_wallet`
    pub fn account(&self) -> Option<String> {
        self.account
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_account(&self, address: &str) {
        *self
            .account
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(address.to_string());
    }

    fn sender(&self) -> TerminalResult<String> {
        self.account().ok_or(TerminalError::NotConnected)
    }

    /// `eth_call` against the latest block
    async fn call(&self, to: &str, data: String) -> TerminalResult<Vec<Word>> {
        let result = self
            .transport
            .request("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        let hex = result
            .as_str()
            .ok_or_else(|| TerminalError::external("eth_call returned a non-string result"))?;
        decode_words(hex)
    }

    async fn call_uint(&self, to: &str, signature: &str, args: &[AbiValue<'_>]) -> TerminalResult<u128> {
        let words = self.call(to, encode_call(signature, args)?).await?;
        word_to_u128(word_at(&words, 0)?)
    }

    /// Submit a transaction from the connected account and wait for it
    async fn send(&self, to: &str, data: String, value: Option<Wei>) -> TerminalResult<TxReceipt> {
        let from = self.sender()?;
        let mut tx = json!({ "from": from, "to": to, "data": data });
        if let Some(value) = value {
            tx["value"] = Value::String(to_quantity(value.as_u128()));
        }

        let result = self
            .transport
            .request("eth_sendTransaction", json!([tx]))
            .await?;
        let hash = result
            .as_str()
            .ok_or_else(|| TerminalError::external("eth_sendTransaction returned no hash"))?
            .to_string();
        info!(tx_hash = %hash, to, "Transaction submitted");

        self.wait_for_receipt(&hash).await
    }

    async fn wait_for_receipt(&self, hash: &str) -> TerminalResult<TxReceipt> {
        let attempts = self.config.receipt_poll_attempts;
        for attempt in 1..=attempts {
            let receipt = self
                .transport
                .request("eth_getTransactionReceipt", json!([hash]))
                .await?;
            if receipt.is_null() {
                debug!(tx_hash = hash, attempt, "Receipt not available yet");
                tokio::time::sleep(self.config.receipt_poll_interval()).await;
                continue;
            }
            return parse_receipt(hash, &receipt);
        }
        warn!(tx_hash = hash, attempts, "Gave up waiting for receipt");
        Err(TransactionFailed::with_hash(
            format!("no receipt after {} attempts", attempts),
            hash,
        )
        .into())
    }
}

/// Check status and pull the minted token id out of an ERC-721 mint log
fn parse_receipt(hash: &str, receipt: &Value) -> TerminalResult<TxReceipt> {
    let status = receipt
        .get("status")
        .and_then(Value::as_str)
        .map(parse_quantity)
        .transpose()?;
    if status == Some(0) {
        return Err(TransactionFailed::with_hash("execution reverted", hash).into());
    }

    let transfer_topic = event_topic(signatures::TRANSFER_EVENT);
    let zero_word = format!("0x{}", "0".repeat(64));
    let minted_id = receipt
        .get("logs")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|log| log.get("topics").and_then(Value::as_array))
        .find(|topics| {
            topics.len() == 4
                && topics[0].as_str().map(str::to_lowercase) == Some(transfer_topic.clone())
                && topics[1].as_str() == Some(zero_word.as_str())
        })
        .and_then(|topics| topics[3].as_str())
        .map(parse_quantity)
        .transpose()?;

    let mut tx = TxReceipt::new(hash);
    tx.minted_id = minted_id;
    Ok(tx)
}

#[async_trait]
impl<T: RpcTransport> WalletProvider for RpcProvider<T> {
    async fn connect_wallet(&self) -> TerminalResult<String> {
        let accounts = match self.transport.request("eth_requestAccounts", json!([])).await {
            Ok(accounts) => accounts,
            Err(TerminalError::Rpc(err)) if err.code == Some(METHOD_NOT_FOUND) => {
                return Err(TerminalError::NoWalletProvider)
            }
            Err(err) => return Err(err),
        };
        let address = accounts
            .as_array()
            .and_then(|list| list.first())
            .and_then(Value::as_str)
            .ok_or(TerminalError::NoWalletProvider)?
            .to_string();

        let chain_id = self.transport.request("net_version", json!([])).await?;
        let chain_id = chain_id.as_str().map(str::to_string).unwrap_or_else(|| chain_id.to_string());
        if !self.config.allowed_chain_ids.iter().any(|id| *id == chain_id) {
            warn!(chain_id = %chain_id, "Wallet is on an unsupported network");
            return Err(TerminalError::WrongNetwork);
        }

        self.set_account(&address);
        info!(address = %address, chain_id = %chain_id, "Wallet connected");
        Ok(address)
    }

    async fn switch_chain(&self, chain: &ChainParams) -> TerminalResult<()> {
        if chain.is_builtin() {
            self.transport
                .request(
                    "wallet_switchEthereumChain",
                    json!([{ "chainId": chain.chain_id_hex }]),
                )
                .await?;
        } else {
            self.transport
                .request(
                    "wallet_addEthereumChain",
                    json!([{
                        "chainId": chain.chain_id_hex,
                        "chainName": chain.chain_name,
                        "rpcUrls": chain.rpc_urls,
                        "nativeCurrency": chain.native_currency,
                        "blockExplorerUrls": chain.block_explorer_urls,
                    }]),
                )
                .await?;
        }
        info!(chain = %chain.chain_name, "Switched chain");
        Ok(())
    }

    async fn add_token(&self, token: &TokenInfo) -> TerminalResult<()> {
        self.transport
            .request(
                "wallet_watchAsset",
                json!({
                    "type": "ERC20",
                    "options": {
                        "address": token.address,
                        "symbol": token.symbol,
                        "decimals": token.decimals,
                    }
                }),
            )
            .await?;
        Ok(())
    }
}

#[async_trait]
impl<T: RpcTransport> ChainClient for RpcProvider<T> {
    async fn balance_of(&self, owner: &str, token: &str) -> TerminalResult<Wei> {
        self.call_uint(token, signatures::BALANCE_OF, &[AbiValue::Address(owner)])
            .await
            .map(Wei)
    }

    async fn staked_share(&self, owner: &str) -> TerminalResult<Wei> {
        self.call_uint(
            &self.config.staking_address,
            signatures::USER_SHARE,
            &[AbiValue::Address(owner)],
        )
        .await
        .map(Wei)
    }

    async fn allowance(&self, token: &str, owner: &str, spender: &str) -> TerminalResult<Wei> {
        self.call_uint(
            token,
            signatures::ALLOWANCE,
            &[AbiValue::Address(owner), AbiValue::Address(spender)],
        )
        .await
        .map(Wei)
    }

    async fn approve(&self, token: &str, spender: &str, amount: Wei) -> TerminalResult<TxReceipt> {
        let data = encode_call(
            signatures::APPROVE,
            &[AbiValue::Address(spender), amount.into()],
        )?;
        self.send(token, data, None).await
    }

    async fn faucet(&self, token: &str) -> TerminalResult<TxReceipt> {
        self.send(token, encode_call(signatures::FAUCET, &[])?, None)
            .await
    }

    async fn mint(&self, contract: &str, amount: Wei) -> TerminalResult<TxReceipt> {
        let data = encode_call(signatures::MINT, &[amount.into()])?;
        self.send(contract, data, None).await
    }

    async fn mint_native(&self, contract: &str, amount: Wei) -> TerminalResult<TxReceipt> {
        let data = encode_call(signatures::MINT_NATIVE, &[])?;
        self.send(contract, data, Some(amount)).await
    }

    async fn bond_ids(&self, owner: &str) -> TerminalResult<Vec<u128>> {
        let storage = self.config.storage_address()?;
        let data = encode_call(signatures::USER_IDS, &[AbiValue::Address(owner)])?;
        let words = self.call(storage, data).await?;
        decode_uint_array(&words, 0)
    }

    async fn bonding_contract_of(&self, bond_id: u128) -> TerminalResult<String> {
        let storage = self.config.storage_address()?;
        let data = encode_call(signatures::ISSUED_BY, &[AbiValue::Uint(bond_id)])?;
        let words = self.call(storage, data).await?;
        Ok(word_to_address(word_at(&words, 0)?))
    }

    async fn bond_info(&self, contract: &str, bond_id: u128) -> TerminalResult<BondInfo> {
        let data = encode_call(signatures::BOND_INFO, &[AbiValue::Uint(bond_id)])?;
        let words = self.call(contract, data).await?;
        let timestamp = |index: usize| -> TerminalResult<i64> {
            let raw = word_to_u128(word_at(&words, index)?)?;
            i64::try_from(raw).map_err(|_| TerminalError::external("Timestamp out of range"))
        };
        Ok(BondInfo {
            is_active: word_to_bool(word_at(&words, 0)?)?,
            issue_timestamp: timestamp(1)?,
            release_timestamp: timestamp(2)?,
            release_amount: Wei(word_to_u128(word_at(&words, 3)?)?),
        })
    }

    async fn claim(&self, contract: &str, bond_id: u128) -> TerminalResult<TxReceipt> {
        let data = encode_call(signatures::CLAIM, &[AbiValue::Uint(bond_id)])?;
        self.send(contract, data, None).await
    }

    async fn quote_amount_out(&self, contract: &str, amount: Wei) -> TerminalResult<(Wei, Wei)> {
        let data = encode_call(signatures::AMOUNT_OUT, &[amount.into()])?;
        let words = self.call(contract, data).await?;
        Ok((
            Wei(word_to_u128(word_at(&words, 0)?)?),
            Wei(word_to_u128(word_at(&words, 1)?)?),
        ))
    }

    async fn quote_discount_percent(&self, contract: &str) -> TerminalResult<u128> {
        self.call_uint(contract, signatures::DISCOUNT_PERCENT, &[])
            .await
    }
}
