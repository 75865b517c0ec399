//! Error types for the GC terminal
//!
//! Every failure a command can hit is a [`TerminalError`]. Its `Display`
//! output is exactly the line the user sees when no override applies, so
//! messages here are phrased for the terminal, not for developers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// Provider Errors
// =============================================================================

/// Error object returned by a JSON-RPC endpoint
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{message}")]
pub struct RpcError {
    /// Message reported by the endpoint
    pub message: String,
    /// JSON-RPC error code if the endpoint sent one
    pub code: Option<i64>,
    /// The method that failed
    pub method: Option<String>,
}

impl RpcError {
    /// Create a new RPC error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            method: None,
        }
    }

    /// Create a new RPC error with the endpoint's error code and method
    pub fn with_code(message: impl Into<String>, code: i64, method: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: Some(code),
            method: Some(method.into()),
        }
    }

    /// EIP-1193 "user rejected request"
    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(4001)
    }
}

/// Error when a submitted transaction reverted or never got a receipt
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Transaction failed: {message}")]
pub struct TransactionFailed {
    /// Detailed error message
    pub message: String,
    /// The transaction hash if available
    pub tx_hash: Option<String>,
}

impl TransactionFailed {
    /// Create a new transaction failed error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tx_hash: None,
        }
    }

    /// Create a new transaction failed error with hash
    pub fn with_hash(message: impl Into<String>, tx_hash: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            tx_hash: Some(tx_hash.into()),
        }
    }
}

// =============================================================================
// Unified Error Enum
// =============================================================================

/// Unified error type for command dispatch, workflows and collaborators
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalError {
    // Dispatch errors
    /// Unknown command; carries the randomly chosen not-found line
    #[error("{0}")]
    CommandNotFound(String),
    #[error("You should provide args for calling this function. e.g mint gton 7d 1")]
    MissingArgument,

    // Workflow errors
    /// Bad user input detected before any external call
    #[error("{0}")]
    Validation(String),
    #[error("First - connect the website by typing >join")]
    NotConnected,
    /// A domain rule rejected the request (e.g. claim before release)
    #[error("{0}")]
    DomainRule(String),

    // Collaborator errors
    #[error("No compatible wallet provider found")]
    NoWalletProvider,
    #[error("Wallet is connected to an unsupported network")]
    WrongNetwork,
    /// Message propagated verbatim from a collaborator
    #[error("{0}")]
    ExternalCall(String),
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error(transparent)]
    TransactionFailed(#[from] TransactionFailed),

    // Ambient errors (converted to String for Serialize/Deserialize)
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("JSON error: {0}")]
    Json(String),
}

// =============================================================================
// From implementations for external error types
// =============================================================================

impl From<std::io::Error> for TerminalError {
    fn from(err: std::io::Error) -> Self {
        TerminalError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TerminalError {
    fn from(err: serde_json::Error) -> Self {
        TerminalError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for TerminalError {
    fn from(err: reqwest::Error) -> Self {
        TerminalError::Rpc(RpcError::new(err.to_string()))
    }
}

impl From<hex::FromHexError> for TerminalError {
    fn from(err: hex::FromHexError) -> Self {
        TerminalError::ExternalCall(format!("Malformed hex in response: {}", err))
    }
}

/// Result type alias for terminal operations
pub type TerminalResult<T> = Result<T, TerminalError>;

impl TerminalError {
    pub fn validation(msg: impl Into<String>) -> Self {
        TerminalError::Validation(msg.into())
    }

    pub fn external(msg: impl Into<String>) -> Self {
        TerminalError::ExternalCall(msg.into())
    }

    pub fn domain(msg: impl Into<String>) -> Self {
        TerminalError::DomainRule(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        TerminalError::Config(msg.into())
    }

    /// Errors detected before any collaborator was called
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TerminalError::Validation(_) | TerminalError::MissingArgument
        )
    }

    /// Errors raised by a wallet or chain collaborator
    pub fn is_external(&self) -> bool {
        matches!(
            self,
            TerminalError::ExternalCall(_)
                | TerminalError::Rpc(_)
                | TerminalError::TransactionFailed(_)
                | TerminalError::NoWalletProvider
                | TerminalError::WrongNetwork
        )
    }

    pub fn is_not_connected(&self) -> bool {
        matches!(self, TerminalError::NotConnected)
    }
}
