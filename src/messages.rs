//! Static text shown by the terminal.

/// Command prefix used in help texts
pub const PREFIX: &str = ">";

pub const BANNER: &str = r#"
       ██████╗  ██████╗    ████████╗███████╗██████╗ ███╗   ███╗
      ██╔════╝ ██╔════╝    ╚══██╔══╝██╔════╝██╔══██╗████╗ ████║
      ██║  ███╗██║            ██║   █████╗  ██████╔╝██╔████╔██║
      ██║   ██║██║            ██║   ██╔══╝  ██╔══██╗██║╚██╔╝██║
      ╚██████╔╝╚██████╗       ██║   ███████╗██║  ██║██║ ╚═╝ ██║
       ╚═════╝  ╚═════╝       ╚═╝   ╚══════╝╚═╝  ╚═╝╚═╝     ╚═╝

              Welcome to the GTON CAPITAL (GC) terminal!

   Work with the GC smart contracts directly, on testnet and mainnet.

            Type >help to see the list of available commands.
"#;

/// Lines printed by `help` in the main mode. `faucet` is appended on testnets.
pub const MAIN_HELP: &[&str] = &[
    "Available commands:",
    ">help - this output",
    ">join - connect wallet to the terminal",
    ">switch [network] - switch wallet chain (fantom by default)",
    ">balance gton | sgton | harvest | all - get actual erc20 token balance",
    ">add gton | sgton - add tokens to the wallet",
    ">cd main | bonding | chat - change project",
];

/// Faucet help line, only listed on testnets
pub const FAUCET_HELP: &str = ">faucet gton - receive gton airdrop";

/// Lines printed by `help` in the bonding mode.
pub const BONDING_HELP: &[&str] = &[
    "Available bonding commands:",
    ">help - this output",
    ">tokens - list tokens accepted for bonds",
    ">types - list bond types",
    ">preview <token> <type> <amount> - show what a bond would pay out",
    ">mint <token> <type> <amount> - issue a bond",
    ">bonds - list your bond ids",
    ">info <id> - show bond status",
    ">claim <id> - claim a released bond",
    ">join | >switch | >balance | >add | >faucet - wallet commands",
    ">cd main | bonding | chat - change project",
];

/// Lines printed by `help` in the chat mode.
pub const CHAT_HELP: &[&str] = &[
    "Available chat commands:",
    ">help - this output",
    ">whitelist - list accounts you can message",
    ">join | >switch | >balance | >add | >faucet - wallet commands",
    ">cd main | bonding | chat - change project",
];

/// Pool of replies to an unknown command; one is picked at random.
pub const NOT_FOUND: &[&str] = &[
    "Command not found. Type >help to see what I can do.",
    "I don't know that one. Try >help.",
    "Hmm, that's not a command. Type >help for the list.",
    "Unknown command. Did you mean something from >help?",
    "Nope, never heard of it. >help lists everything I understand.",
];

pub const VIEW_TXN: &str = "View transaction";

pub const CONNECT_FAILED: &str = "Error while connecting wallet, please try again";
pub const SWITCH_FAILED: &str = "Error while switching chain, make sure the wallet is connected.";
pub const BALANCE_FAILED: &str = "Something went wrong, please try again";
pub const ADD_TOKEN_FAILED: &str = "Error adding token to the wallet";

pub const ADD_TOKEN_DONE: &str = "Successfully added token to the wallet.";
pub const FAUCET_DONE: &str = "Successfully airdropped GTON.";
pub const FAUCET_USAGE: &str = "Pass token name as second argument";

pub const BALANCE_TOKENS: &str = "Available tokens are: gton, sgton, harvest";
pub const ADD_TOKEN_TOKENS: &str = "Available tokens are: gton, sgton";

pub const INVALID_ARGUMENTS: &str = "Invalid arguments are passed";
pub const INVALID_BOND_ID: &str = "Invalid bond id";
pub const NO_BONDS: &str = "You don't have active bonds.";
pub const CLAIM_TOO_EARLY: &str = "Bond is not allowed to claim yet";
pub const MINT_WITHOUT_ID: &str = "Mint transaction did not report a bond id";

pub const AVAILABLE_PROJECTS: &str = "Available projects: main, bonding, chat";

pub const WHITELIST_HEADER: &str = "Whitelisted accounts:";
pub const WHITELIST_EMPTY: &str = "Whitelist is empty.";
pub const WHITELIST_FAILED: &str = "Error while loading the whitelist, please try again";

pub fn connected(address: &str) -> String {
    format!("Connected successfully: {}", address)
}

pub fn chain_switched(chain_name: &str) -> String {
    format!("Successfully switched to {}.", chain_name)
}

pub fn token_balance(amount: &str) -> String {
    format!("Token balance: {}", amount)
}

pub fn bond_issued(id: u128) -> String {
    format!("You have successfully issued bond with id {}", id)
}

pub fn bond_claimed(id: u128) -> String {
    format!("You have successfully claimed bond with id {}", id)
}

pub fn whitelist_entry(name: &str, address: &str) -> String {
    format!("{} - {}", name, address)
}

pub fn mode_switched(mode: &str) -> String {
    format!("Switched to {}", mode)
}
