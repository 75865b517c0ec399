//! Wallet workflows shared by every mode: join, switch, balance, add, faucet
//! and the main help.

use crate::config::TokenInfo;
use crate::core::constants::{FULL_DECIMALS, SUMMARY_DECIMALS};
use crate::errors::{TerminalError, TerminalResult};
use crate::messages;
use crate::terminal::SessionState;
use crate::utils::{format_units, strip_trailing_zeros, Wei};
use crate::workflows::WorkflowContext;
use tracing::{debug, info};

/// Token names understood by `balance`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceToken {
    Gton,
    Sgton,
    /// sGTON balance net of the staked share
    Harvest,
    All,
}

impl BalanceToken {
    pub fn parse(argument: &str) -> TerminalResult<Self> {
        match argument.trim() {
            "gton" => Ok(BalanceToken::Gton),
            "sgton" => Ok(BalanceToken::Sgton),
            "harvest" => Ok(BalanceToken::Harvest),
            "all" => Ok(BalanceToken::All),
            _ => Err(TerminalError::validation(messages::BALANCE_TOKENS)),
        }
    }
}

/// `join`: connect the wallet and remember the account
pub async fn connect(ctx: &WorkflowContext<'_>, session: &mut SessionState) -> TerminalResult<()> {
    let address = ctx.wallet.connect_wallet().await?;
    info!(address = %address, "wallet connected");
    session.connect(address.clone());
    ctx.console.emit_line(&messages::connected(&address));
    Ok(())
}

/// `switch [network]`: ask the wallet to move to a configured network
pub async fn switch_network(ctx: &WorkflowContext<'_>, argument: &str) -> TerminalResult<()> {
    let name = match argument.trim() {
        "" => ctx.config.network.as_str(),
        name => name,
    };
    let chain = ctx.config.chain(name).ok_or_else(|| {
        TerminalError::validation(format!(
            "Available networks are: {}",
            ctx.config.network_names().join(", ")
        ))
    })?;
    ctx.wallet.switch_chain(chain).await?;
    ctx.console.emit_line(&messages::chain_switched(&chain.chain_name));
    Ok(())
}

/// Harvestable sGTON; zero when the share exceeds the balance
fn harvest(sgton_balance: Wei, share: Wei) -> Wei {
    sgton_balance.saturating_sub(share)
}

fn summary(amount: Wei, token: &TokenInfo) -> String {
    strip_trailing_zeros(&format_units(amount, token.decimals, SUMMARY_DECIMALS))
}

/// `balance gton | sgton | harvest | all`
pub async fn balance(
    ctx: &WorkflowContext<'_>,
    session: &SessionState,
    argument: &str,
) -> TerminalResult<()> {
    let token = BalanceToken::parse(argument)?;
    let owner = session.require_address()?;
    let config = ctx.config;

    let (amount, decimals) = match token {
        BalanceToken::All => {
            let sgton_balance = ctx.chain.balance_of(owner, &config.sgton.address).await?;
            let share = ctx.chain.staked_share(owner).await?;
            let gton_balance = ctx.chain.balance_of(owner, &config.gton.address).await?;

            let lines = [
                format!("Harvest: {}", summary(harvest(sgton_balance, share), &config.sgton)),
                format!("SGTON:   {}", summary(share, &config.sgton)),
                format!("GTON:    {}", summary(gton_balance, &config.gton)),
            ];
            for line in &lines {
                ctx.console.emit_line(line);
            }
            return Ok(());
        }
        BalanceToken::Gton => (
            ctx.chain.balance_of(owner, &config.gton.address).await?,
            config.gton.decimals,
        ),
        BalanceToken::Sgton => (ctx.chain.staked_share(owner).await?, config.sgton.decimals),
        BalanceToken::Harvest => {
            let sgton_balance = ctx.chain.balance_of(owner, &config.sgton.address).await?;
            let share = ctx.chain.staked_share(owner).await?;
            (harvest(sgton_balance, share), config.sgton.decimals)
        }
    };

    debug!(?token, amount = %amount, "balance read");
    ctx.console
        .emit_line(&messages::token_balance(&format_units(amount, decimals, FULL_DECIMALS)));
    Ok(())
}

/// `add gton | sgton`: ask the wallet to track a token
pub async fn add_token(ctx: &WorkflowContext<'_>, argument: &str) -> TerminalResult<()> {
    let token = match argument.trim() {
        "gton" => &ctx.config.gton,
        "sgton" => &ctx.config.sgton,
        _ => return Err(TerminalError::validation(messages::ADD_TOKEN_TOKENS)),
    };
    ctx.wallet.add_token(token).await?;
    ctx.console.emit_line(messages::ADD_TOKEN_DONE);
    Ok(())
}

/// `faucet <token>`: testnet airdrop. Without a known token only prints usage.
pub async fn faucet(ctx: &WorkflowContext<'_>, argument: &str) -> TerminalResult<()> {
    let token = match argument.trim() {
        "gton" => &ctx.config.gton,
        "sgton" => &ctx.config.sgton,
        _ => {
            ctx.console.emit_line(messages::FAUCET_USAGE);
            return Ok(());
        }
    };
    let receipt = ctx.chain.faucet(&token.address).await?;
    ctx.console.emit_line(messages::FAUCET_DONE);
    ctx.emit_tx_link(&receipt.transaction_hash);
    Ok(())
}

/// `help` in the main mode
pub fn help(ctx: &WorkflowContext<'_>) {
    for line in messages::MAIN_HELP {
        ctx.console.emit_line(line);
    }
    if ctx.config.is_testnet {
        ctx.console.emit_line(messages::FAUCET_HELP);
    }
}
