//! Connection state shared by every command of a terminal session.

use crate::errors::{TerminalError, TerminalResult};

/// Whether a wallet is connected, and which account.
///
/// Created disconnected; only the `join` workflow changes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    connected: bool,
    address: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Record a successful wallet connection
    pub fn connect(&mut self, address: impl Into<String>) {
        self.connected = true;
        self.address = Some(address.into());
    }

    /// Connected account, or `NotConnected`
    pub fn require_address(&self) -> TerminalResult<&str> {
        match (self.connected, self.address.as_deref()) {
            (true, Some(address)) => Ok(address),
            _ => Err(TerminalError::NotConnected),
        }
    }
}
