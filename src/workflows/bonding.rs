//! Bonding workflows: preview, mint, claim, info, bonds and the static
//! listings of the bonding mode.

use crate::config::TerminalConfig;
use crate::core::constants::{FULL_DECIMALS, SUMMARY_DECIMALS, TOKEN_DECIMALS};
use crate::errors::{TerminalError, TerminalResult};
use crate::messages;
use crate::terminal::SessionState;
use crate::utils::{format_timestamp, format_units, parse_units, Wei};
use crate::workflows::WorkflowContext;
use std::fmt;
use tracing::{debug, info};

/// Tokens a bond can be paid with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondToken {
    Ftm,
    Gton,
    Usdc,
}

impl BondToken {
    pub const ALL: [BondToken; 3] = [BondToken::Ftm, BondToken::Gton, BondToken::Usdc];

    pub fn name(&self) -> &'static str {
        match self {
            BondToken::Ftm => "ftm",
            BondToken::Gton => "gton",
            BondToken::Usdc => "usdc",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.name() == name)
    }

    /// Paid in the chain's native currency, so no allowance is involved
    pub fn is_native(&self) -> bool {
        matches!(self, BondToken::Ftm)
    }
}

impl fmt::Display for BondToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bond lock periods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BondType {
    Week,
    Month,
    Quarter,
}

impl BondType {
    pub const ALL: [BondType; 3] = [BondType::Week, BondType::Month, BondType::Quarter];

    pub fn name(&self) -> &'static str {
        match self {
            BondType::Week => "7d",
            BondType::Month => "30d",
            BondType::Quarter => "90d",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bond_type| bond_type.name() == name)
    }
}

impl fmt::Display for BondType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated `<token> <type> <amount>` arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BondRequest {
    pub token: BondToken,
    pub bond_type: BondType,
    pub amount: Wei,
    /// ERC-20 address of the payment token; `None` for the native token
    pub token_address: Option<String>,
}

/// Parse `<token> <type> <amount>`, split on single spaces.
///
/// The amount is converted with the payment token's decimals (18 for the
/// native token).
pub fn parse_bond_request(argument: &str, config: &TerminalConfig) -> TerminalResult<BondRequest> {
    let invalid = || TerminalError::validation(messages::INVALID_ARGUMENTS);
    let mut parts = argument.trim_end().split(' ');
    let token = parts.next().and_then(BondToken::parse).ok_or_else(invalid)?;
    let bond_type = parts.next().and_then(BondType::parse).ok_or_else(invalid)?;
    let amount = parts.next().unwrap_or_default();

    let (decimals, token_address) = if token.is_native() {
        (TOKEN_DECIMALS, None)
    } else {
        let info = config.bond_token(token.name()).ok_or_else(|| {
            TerminalError::config(format!("bond token {} is not configured", token))
        })?;
        (info.decimals, Some(info.address.clone()))
    };

    let amount = parse_units(amount, decimals)
        .filter(|amount| !amount.is_zero())
        .ok_or_else(invalid)?;

    Ok(BondRequest {
        token,
        bond_type,
        amount,
        token_address,
    })
}

/// Bond ids are plain decimal integers
pub fn parse_bond_id(argument: &str) -> TerminalResult<u128> {
    argument
        .trim()
        .parse::<u128>()
        .map_err(|_| TerminalError::validation(messages::INVALID_BOND_ID))
}

fn bonding_contract<'a>(config: &'a TerminalConfig, request: &BondRequest) -> TerminalResult<&'a str> {
    config
        .bonding_contract(request.token.name(), request.bond_type.name())
        .ok_or_else(|| {
            TerminalError::validation(format!(
                "Bonding contract is not configured for {} {}",
                request.token, request.bond_type
            ))
        })
}

/// `preview <token> <type> <amount>`: quote a bond without issuing it
pub async fn preview(ctx: &WorkflowContext<'_>, argument: &str) -> TerminalResult<()> {
    let request = parse_bond_request(argument, ctx.config)?;
    let contract = bonding_contract(ctx.config, &request)?;

    let (amount_out, discount) = ctx.chain.quote_amount_out(contract, request.amount).await?;
    let percent = ctx.chain.quote_discount_percent(contract).await?;

    ctx.console.emit_line(&format!(
        "You will receive {} of sGTON",
        format_units(amount_out, TOKEN_DECIMALS, FULL_DECIMALS)
    ));
    ctx.console.emit_line(&format!(
        "Discount for this offer will be {} - {}%",
        format_units(discount, TOKEN_DECIMALS, FULL_DECIMALS),
        percent
    ));
    Ok(())
}

/// `mint <token> <type> <amount>`: issue a bond, approving the payment
/// token first when the allowance is short
pub async fn mint(
    ctx: &WorkflowContext<'_>,
    session: &SessionState,
    argument: &str,
) -> TerminalResult<()> {
    let request = parse_bond_request(argument, ctx.config)?;
    let contract = bonding_contract(ctx.config, &request)?;
    let owner = session.require_address()?;

    let receipt = match &request.token_address {
        None => ctx.chain.mint_native(contract, request.amount).await?,
        Some(token_address) => {
            let allowance = ctx.chain.allowance(token_address, owner, contract).await?;
            if allowance < request.amount {
                debug!(
                    allowance = %allowance,
                    required = %request.amount,
                    "allowance too low, requesting approval"
                );
                ctx.chain
                    .approve(token_address, contract, request.amount)
                    .await?;
            }
            ctx.chain.mint(contract, request.amount).await?
        }
    };

    let bond_id = receipt
        .minted_id
        .ok_or_else(|| TerminalError::external(messages::MINT_WITHOUT_ID))?;
    info!(bond_id, token = %request.token, bond_type = %request.bond_type, "bond issued");
    ctx.console.emit_line(&messages::bond_issued(bond_id));
    ctx.emit_tx_link(&receipt.transaction_hash);
    Ok(())
}

/// `claim <id>`: redeem a released bond
pub async fn claim(ctx: &WorkflowContext<'_>, argument: &str) -> TerminalResult<()> {
    let bond_id = parse_bond_id(argument)?;
    let storage = ctx.config.storage_address()?;

    let contract = ctx.chain.bonding_contract_of(bond_id).await?;
    let bond = ctx.chain.bond_info(&contract, bond_id).await?;
    if ctx.clock.now() < bond.release_timestamp {
        return Err(TerminalError::domain(messages::CLAIM_TOO_EARLY));
    }

    // The bond NFT approval shares the ERC-20 selector; the amount slot
    // carries the token id.
    ctx.chain
        .approve(storage, &contract, Wei::new(bond_id))
        .await?;
    let receipt = ctx.chain.claim(&contract, bond_id).await?;

    info!(bond_id, "bond claimed");
    ctx.console.emit_line(&messages::bond_claimed(bond_id));
    ctx.emit_tx_link(&receipt.transaction_hash);
    Ok(())
}

/// `info <id>`
pub async fn info(ctx: &WorkflowContext<'_>, argument: &str) -> TerminalResult<()> {
    let bond_id = parse_bond_id(argument)?;
    let contract = ctx.chain.bonding_contract_of(bond_id).await?;
    let bond = ctx.chain.bond_info(&contract, bond_id).await?;

    let status = if bond.is_active { "Active" } else { "Claimed" };
    ctx.console.emit_line(&format!("Status: {}", status));
    ctx.console
        .emit_line(&format!("Issued: {}", format_timestamp(bond.issue_timestamp)));
    ctx.console.emit_line(&format!(
        "Claim date: {}",
        format_timestamp(bond.release_timestamp)
    ));
    ctx.console.emit_line(&format!(
        "Release amount: {}",
        format_units(bond.release_amount, TOKEN_DECIMALS, SUMMARY_DECIMALS)
    ));
    Ok(())
}

/// `bonds`: ids of bonds held by the connected account
pub async fn bonds(ctx: &WorkflowContext<'_>, session: &SessionState) -> TerminalResult<()> {
    let owner = session.require_address()?;
    let ids = ctx.chain.bond_ids(owner).await?;
    let line = match ids.as_slice() {
        [] => return Err(TerminalError::domain(messages::NO_BONDS)),
        [id] => format!("Your bond id is: {}", id),
        ids => format!(
            "Your bond ids are: {}",
            ids.iter()
                .map(u128::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    };
    ctx.console.emit_line(&line);
    Ok(())
}

pub fn tokens(ctx: &WorkflowContext<'_>) {
    ctx.console.emit_line("Available tokens: ");
    for token in BondToken::ALL {
        ctx.console.emit_line(&format!("-  {}", token));
    }
}

pub fn types(ctx: &WorkflowContext<'_>) {
    ctx.console.emit_line("Available bond types: ");
    for bond_type in BondType::ALL {
        ctx.console.emit_line(&format!("-  {}", bond_type));
    }
}

/// `help` in the bonding mode
pub fn help(ctx: &WorkflowContext<'_>) {
    for line in messages::BONDING_HELP {
        ctx.console.emit_line(line);
    }
}
