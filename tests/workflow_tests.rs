mod common;

use common::{Call, Harness, ACCOUNT, FTM_30D, GTON_7D, ONE, STORAGE, TX_HASH, USDC_90D};
use gcterm::messages;
use gcterm::{TerminalConfig, TerminalError, Wei, WhitelistEntry};

fn link() -> Vec<(String, String)> {
    vec![(
        messages::VIEW_TXN.to_string(),
        format!("https://ftmscan.com/tx/{}", TX_HASH),
    )]
}

#[tokio::test]
async fn test_join_stores_address() {
    let mut h = Harness::new();
    assert_eq!(
        h.run("join").await,
        vec![format!("Connected successfully: {}", ACCOUNT)]
    );
    assert!(h.session.is_connected());
    assert_eq!(h.session.address(), Some(ACCOUNT));
}

#[tokio::test]
async fn test_switch_default_and_named_network() {
    let mut h = Harness::new();
    h.connect().await;

    assert_eq!(h.run("switch").await, vec!["Successfully switched to Fantom Mainnet."]);
    assert_eq!(
        h.run("switch fantom-testnet").await,
        vec!["Successfully switched to Fantom Testnet."]
    );
    assert_eq!(
        h.backend.calls(),
        vec![Call::SwitchChain("0xfa".into()), Call::SwitchChain("0xfa2".into())]
    );
}

#[tokio::test]
async fn test_switch_unknown_network_makes_no_call() {
    let mut h = Harness::new();
    h.connect().await;
    // override applies to validation failures too
    assert_eq!(h.run("switch solana").await, vec![messages::SWITCH_FAILED]);
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_balance_all_prints_three_stripped_lines() {
    let mut h = Harness::new();
    h.connect().await;
    let sgton = h.config.sgton.address.clone();
    let gton = h.config.gton.address.clone();
    h.backend.update(|s| {
        s.balances.insert(sgton.clone(), Wei::new(10 * ONE + ONE / 2));
        s.balances.insert(gton.clone(), Wei::new(1_234_560_000_000_000_000));
        s.share = Wei::new(3 * ONE);
    });

    assert_eq!(
        h.run("balance all").await,
        vec!["Harvest: 7.5", "SGTON:   3", "GTON:    1.2346"]
    );
    assert_eq!(
        h.backend.calls(),
        vec![
            Call::BalanceOf { owner: ACCOUNT.into(), token: sgton },
            Call::StakedShare(ACCOUNT.into()),
            Call::BalanceOf { owner: ACCOUNT.into(), token: gton },
        ]
    );
}

#[tokio::test]
async fn test_balance_all_zero() {
    let mut h = Harness::new();
    h.connect().await;
    assert_eq!(
        h.run("balance all").await,
        vec!["Harvest: 0", "SGTON:   0", "GTON:    0"]
    );
}

#[tokio::test]
async fn test_balance_single_tokens() {
    let mut h = Harness::new();
    h.connect().await;
    let sgton = h.config.sgton.address.clone();
    let gton = h.config.gton.address.clone();
    h.backend.update(|s| {
        s.balances.insert(sgton, Wei::new(5 * ONE));
        s.balances.insert(gton, Wei::new(ONE / 4));
        s.share = Wei::new(2 * ONE);
    });

    assert_eq!(
        h.run("balance gton").await,
        vec!["Token balance: 0.250000000000000000"]
    );
    assert_eq!(
        h.run("balance sgton").await,
        vec!["Token balance: 2.000000000000000000"]
    );
    assert_eq!(
        h.run("balance harvest").await,
        vec!["Token balance: 3.000000000000000000"]
    );
}

#[tokio::test]
async fn test_harvest_never_negative() {
    let mut h = Harness::new();
    h.connect().await;
    h.backend.update(|s| s.share = Wei::new(ONE));
    assert_eq!(
        h.run("balance harvest").await,
        vec!["Token balance: 0.000000000000000000"]
    );
}

#[tokio::test]
async fn test_add_token() {
    let mut h = Harness::new();
    h.connect().await;
    assert_eq!(h.run("add sgton").await, vec![messages::ADD_TOKEN_DONE]);
    assert_eq!(h.backend.calls(), vec![Call::AddToken("SGTON".into())]);

    h.backend.clear();
    assert_eq!(h.run("add usdc").await, vec![messages::ADD_TOKEN_FAILED]);
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_faucet() {
    let mut h = Harness::new();
    h.connect().await;

    assert_eq!(h.run("faucet").await, vec![messages::FAUCET_USAGE]);
    assert_eq!(h.run("faucet btc").await, vec![messages::FAUCET_USAGE]);
    assert!(h.backend.calls().is_empty());

    assert_eq!(h.run("faucet gton").await, vec![messages::FAUCET_DONE]);
    assert_eq!(h.console.links(), link());
    assert_eq!(
        h.backend.calls(),
        vec![Call::Faucet(h.config.gton.address.clone())]
    );
}

#[tokio::test]
async fn test_main_help_lists_faucet_on_testnet_only() {
    let mut h = Harness::new();
    let lines = h.run("help").await;
    assert_eq!(lines.len(), messages::MAIN_HELP.len());
    assert!(!lines.contains(&messages::FAUCET_HELP.to_string()));

    let mut config = common::test_config();
    config.is_testnet = true;
    let mut h = Harness::with_config(config);
    let lines = h.run("help").await;
    assert_eq!(lines.last().map(String::as_str), Some(messages::FAUCET_HELP));
}

#[tokio::test]
async fn test_mint_skips_approval_when_allowance_suffices() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;
    h.backend.update(|s| s.allowance = Wei::new(5 * ONE));

    assert_eq!(
        h.run("mint gton 7d 2").await,
        vec!["You have successfully issued bond with id 7"]
    );
    assert_eq!(h.console.links(), link());

    let gton = h.config.gton.address.clone();
    assert_eq!(
        h.backend.calls(),
        vec![
            Call::Allowance { token: gton, owner: ACCOUNT.into(), spender: GTON_7D.into() },
            Call::Mint { contract: GTON_7D.into(), amount: 2 * ONE },
        ]
    );
}

#[tokio::test]
async fn test_mint_approves_once_when_allowance_short() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;
    h.backend.update(|s| s.allowance = Wei::new(ONE));

    h.run("mint gton 7d 2").await;
    let gton = h.config.gton.address.clone();
    assert_eq!(
        h.backend.calls(),
        vec![
            Call::Allowance { token: gton.clone(), owner: ACCOUNT.into(), spender: GTON_7D.into() },
            Call::Approve { token: gton, spender: GTON_7D.into(), amount: 2 * ONE },
            Call::Mint { contract: GTON_7D.into(), amount: 2 * ONE },
        ]
    );
}

#[tokio::test]
async fn test_mint_uses_token_decimals() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;
    h.backend.update(|s| s.allowance = Wei::MAX);

    h.run("mint usdc 90d 1.5").await;
    assert_eq!(
        h.backend.calls().last(),
        Some(&Call::Mint { contract: USDC_90D.into(), amount: 1_500_000 })
    );
}

#[tokio::test]
async fn test_mint_native_has_no_allowance_step() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;

    assert_eq!(
        h.run("mint ftm 30d 0.5").await,
        vec!["You have successfully issued bond with id 7"]
    );
    assert_eq!(
        h.backend.calls(),
        vec![Call::MintNative { contract: FTM_30D.into(), amount: ONE / 2 }]
    );
}

#[tokio::test]
async fn test_mint_invalid_arguments() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;

    for line in ["mint dai 7d 1", "mint gton 1y 1", "mint gton 7d lots", "mint gton"] {
        assert_eq!(h.run(line).await, vec![messages::INVALID_ARGUMENTS], "{line}");
    }
    assert_eq!(
        h.run("mint gton 30d 1").await,
        vec!["Bonding contract is not configured for gton 30d"]
    );
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_mint_without_minted_id_fails() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;
    h.backend.update(|s| s.minted_id = None);

    assert_eq!(h.run("mint ftm 30d 1").await, vec![messages::MINT_WITHOUT_ID]);
    assert!(h.console.links().is_empty());
}

#[tokio::test]
async fn test_claim_before_release_makes_no_mutating_call() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;
    let release = h.backend.state.lock().unwrap().bond_info.release_timestamp;
    h.clock.set(release - 1);

    assert_eq!(h.run("claim 3").await, vec![messages::CLAIM_TOO_EARLY]);
    assert_eq!(
        h.backend.calls(),
        vec![
            Call::BondingContractOf(3),
            Call::BondInfo { contract: GTON_7D.into(), bond_id: 3 },
        ]
    );
}

#[tokio::test]
async fn test_claim_after_release_approves_then_claims() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;
    let release = h.backend.state.lock().unwrap().bond_info.release_timestamp;
    h.clock.set(release);

    assert_eq!(
        h.run("claim 3").await,
        vec!["You have successfully claimed bond with id 3"]
    );
    assert_eq!(h.console.links(), link());
    assert_eq!(
        h.backend.calls()[2..],
        [
            Call::Approve { token: STORAGE.into(), spender: GTON_7D.into(), amount: 3 },
            Call::Claim { contract: GTON_7D.into(), bond_id: 3 },
        ]
    );
}

#[tokio::test]
async fn test_claim_invalid_id() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;
    assert_eq!(h.run("claim abc").await, vec![messages::INVALID_BOND_ID]);
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_claim_requires_storage_address() {
    let mut config = common::test_config();
    config.storage_address.clear();
    let mut h = Harness::with_config(config);
    h.connect().await;
    h.run("cd bonding").await;

    let lines = h.run("claim 3").await;
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("storage address"));
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_info() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;

    assert_eq!(
        h.run("info 3").await,
        vec![
            "Status: Active",
            "Issued: 5 Jan 2022 9:3:7",
            "Claim date: 12 Jan 2022 9:3:7",
            "Release amount: 1.2500",
        ]
    );

    h.backend.update(|s| s.bond_info.is_active = false);
    assert_eq!(h.run("info 3").await[0], "Status: Claimed");
}

#[tokio::test]
async fn test_preview() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;

    assert_eq!(
        h.run("preview gton 7d 1").await,
        vec![
            "You will receive 2.000000000000000000 of sGTON",
            "Discount for this offer will be 0.100000000000000000 - 5%",
        ]
    );
    assert_eq!(
        h.backend.calls(),
        vec![
            Call::QuoteAmountOut { contract: GTON_7D.into(), amount: ONE },
            Call::QuoteDiscountPercent(GTON_7D.into()),
        ]
    );
}

#[tokio::test]
async fn test_bonds() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd bonding").await;

    assert_eq!(h.run("bonds").await, vec![messages::NO_BONDS]);
    h.backend.update(|s| s.bond_ids = vec![7]);
    assert_eq!(h.run("bonds").await, vec!["Your bond id is: 7"]);
    h.backend.update(|s| s.bond_ids = vec![1, 2]);
    assert_eq!(h.run("bonds").await, vec!["Your bond ids are: 1, 2"]);
}

#[tokio::test]
async fn test_tokens_types_and_help() {
    let mut h = Harness::new();
    h.run("cd bonding").await;

    assert_eq!(
        h.run("tokens").await,
        vec!["Available tokens: ", "-  ftm", "-  gton", "-  usdc"]
    );
    assert_eq!(
        h.run("types").await,
        vec!["Available bond types: ", "-  7d", "-  30d", "-  90d"]
    );
    assert_eq!(h.run("help").await.len(), messages::BONDING_HELP.len());
    assert!(h.backend.calls().is_empty());
}

#[tokio::test]
async fn test_default_config_has_no_bonding_contracts() {
    let mut h = Harness::with_config(TerminalConfig::default());
    h.connect().await;
    h.run("cd bonding").await;
    assert_eq!(
        h.run("preview ftm 7d 1").await,
        vec!["Bonding contract is not configured for ftm 7d"]
    );
}

fn whitelisted(id: u64, name: &str, address: &str) -> WhitelistEntry {
    WhitelistEntry {
        id,
        address: address.to_string(),
        open_key: format!("key-{}", id),
        name: name.to_string(),
    }
}

#[tokio::test]
async fn test_whitelist_lists_accounts_without_wallet() {
    let mut h = Harness::new();
    h.backend.update(|s| {
        s.whitelist = vec![
            whitelisted(1, "alice", ACCOUNT),
            whitelisted(2, "bob", STORAGE),
        ]
    });
    assert_eq!(h.run("cd chat").await, vec!["Switched to chat"]);

    assert_eq!(
        h.run("whitelist").await,
        vec![
            messages::WHITELIST_HEADER.to_string(),
            format!("alice - {}", ACCOUNT),
            format!("bob - {}", STORAGE),
        ]
    );
    assert_eq!(h.backend.calls(), vec![Call::Whitelist]);
    assert_eq!(h.backend.lock_samples(), vec![true]);
}

#[tokio::test]
async fn test_whitelist_empty() {
    let mut h = Harness::new();
    h.run("cd chat").await;
    assert_eq!(h.run("whitelist").await, vec![messages::WHITELIST_EMPTY]);
}

#[tokio::test]
async fn test_whitelist_failure_messages() {
    let mut h = Harness::new();
    h.connect().await;
    h.run("cd chat").await;
    h.backend.fail_with(TerminalError::external("mailbox down"));
    assert_eq!(h.run("whitelist").await, vec![messages::WHITELIST_FAILED]);
}

#[tokio::test]
async fn test_chat_help_and_wallet_commands() {
    let mut h = Harness::new();
    h.run("cd chat").await;
    assert_eq!(h.run("help").await.len(), messages::CHAT_HELP.len());
    assert!(h.backend.calls().is_empty());

    h.connect().await;
    h.run("add gton").await;
    assert_eq!(h.backend.calls(), vec![Call::AddToken("GTON".into())]);

    let lines = h.run("mint gton 7d 1").await;
    assert_eq!(lines.len(), 1);
    assert!(messages::NOT_FOUND.contains(&lines[0].as_str()));
}
