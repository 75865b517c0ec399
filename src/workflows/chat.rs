//! Messenger workflows: whitelist listing and the chat help.

use crate::errors::TerminalResult;
use crate::messages;
use crate::workflows::WorkflowContext;
use tracing::debug;

/// `whitelist`: accounts that can receive messages
pub async fn whitelist(ctx: &WorkflowContext<'_>) -> TerminalResult<()> {
    let entries = ctx.messenger.whitelist().await?;
    debug!(count = entries.len(), "whitelist loaded");
    if entries.is_empty() {
        ctx.console.emit_line(messages::WHITELIST_EMPTY);
        return Ok(());
    }
    ctx.console.emit_line(messages::WHITELIST_HEADER);
    for entry in &entries {
        ctx.console
            .emit_line(&messages::whitelist_entry(&entry.name, &entry.address));
    }
    Ok(())
}

pub fn help(ctx: &WorkflowContext<'_>) {
    for line in messages::CHAT_HELP {
        ctx.console.emit_line(line);
    }
}
