//! Execution guard: holds the lock and loading flags for the duration of a
//! workflow and turns its failure into a single user-facing line.

use crate::errors::{TerminalError, TerminalResult};
use crate::terminal::{Console, SessionState};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Advisory lock and loading flags. Clones observe the same flags.
#[derive(Debug, Clone, Default)]
pub struct GuardFlags {
    locked: Arc<AtomicBool>,
    loading: Arc<AtomicBool>,
}

impl GuardFlags {
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    fn set(&self, value: bool) {
        self.locked.store(value, Ordering::SeqCst);
        self.loading.store(value, Ordering::SeqCst);
    }
}

/// Flags held while alive; dropping it releases both.
struct GuardScope<'a> {
    flags: &'a GuardFlags,
    console: &'a dyn Console,
}

impl<'a> GuardScope<'a> {
    fn acquire(flags: &'a GuardFlags, console: &'a dyn Console) -> Self {
        flags.set(true);
        console.set_locked(true);
        console.set_loading(true);
        Self { flags, console }
    }
}

impl Drop for GuardScope<'_> {
    fn drop(&mut self) {
        self.flags.set(false);
        self.console.set_loading(false);
        self.console.set_locked(false);
    }
}

/// Wraps guarded workflows of one dispatcher
#[derive(Debug, Clone, Default)]
pub struct ExecutionGuard {
    flags: GuardFlags,
}

impl ExecutionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self) -> &GuardFlags {
        &self.flags
    }

    /// Run `work` with the flags held.
    ///
    /// The flags are set before `work` is first polled and cleared on every
    /// exit, including a panic unwinding through the await.
    pub async fn run<F>(&self, console: &dyn Console, work: F) -> TerminalResult<()>
    where
        F: Future<Output = TerminalResult<()>>,
    {
        let _scope = GuardScope::acquire(&self.flags, console);
        work.await
    }

    /// Report the outcome of a guarded workflow.
    ///
    /// Emits nothing on success. A failure prints one line chosen by
    /// [`failure_message`].
    pub fn report(
        &self,
        console: &dyn Console,
        session: &SessionState,
        error_override: Option<&str>,
        outcome: TerminalResult<()>,
    ) {
        if let Err(err) = outcome {
            warn!(error = %err, connected = session.is_connected(), "command failed");
            console.emit_line(&failure_message(session, error_override, &err));
        }
    }
}

/// Message for a failed guarded workflow.
///
/// A disconnected session always gets the connect prompt, then the route's
/// override applies, then the error's own message.
pub fn failure_message(
    session: &SessionState,
    error_override: Option<&str>,
    err: &TerminalError,
) -> String {
    if !session.is_connected() {
        return TerminalError::NotConnected.to_string();
    }
    match error_override {
        Some(message) => message.to_string(),
        None => err.to_string(),
    }
}
