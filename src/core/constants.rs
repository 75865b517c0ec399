//! Core constants for the GTON Capital terminal.
//! Token units follow the ERC-20 convention used by every GC contract.

/// Decimals of GTON, sGTON and the native currency
pub const TOKEN_DECIMALS: u32 = 18;

/// WEI/ETHER conversion factor (1 token = 1e18 base units)
pub const WEI_PER_TOKEN: u128 = 1_000_000_000_000_000_000;

/// Compile-time assertion that the conversion factor matches the decimals
#[allow(dead_code)]
const _: () = assert!(
    WEI_PER_TOKEN == 10u128.pow(TOKEN_DECIMALS),
    "WEI_PER_TOKEN must equal 10^TOKEN_DECIMALS"
);

/// Largest decimals value a u128 base-unit amount can represent sensibly
pub const MAX_DECIMALS: u32 = 36;

/// Decimals used when printing balances in the summary view
pub const SUMMARY_DECIMALS: u32 = 4;

/// Decimals used when printing a single token balance or a quote
pub const FULL_DECIMALS: u32 = 18;

/// Default JSON-RPC endpoint of the wallet bridge / node
pub const DEFAULT_RPC_ENDPOINT: &str = "http://127.0.0.1:8545";

/// Default block explorer transaction URL prefix
pub const DEFAULT_EXPLORER_TX_URL: &str = "https://ftmscan.com/tx/";

/// Default network name
pub const DEFAULT_NETWORK: &str = "fantom";

/// Chain ids (as returned by `net_version`) accepted after connecting
pub const DEFAULT_ALLOWED_CHAIN_IDS: &[&str] = &["250", "4002"];

/// GTON token on Fantom
pub const GTON_ADDRESS: &str = "0xc1be9a4d5d45beeacae296a7bd5fadbfc14602c4";

/// sGTON staking contract on Fantom (also the sGTON token)
pub const STAKING_ADDRESS: &str = "0xB0dAAb4eb0C23aFFaA5c9943d6f361b51479ac48";

/// Receipt polling defaults
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u64 = 1_000;
pub const DEFAULT_RECEIPT_POLL_ATTEMPTS: u32 = 120;

/// Mailbox API of the GC messenger
pub const DEFAULT_MESSENGER_URL: &str =
    "http://a5bffd3b4a14c4a5a85a1e5d01d3a5b6-bc51aedea274507b.elb.eu-west-2.amazonaws.com/api/mailbox/";

/// Zero address, used as the `from` of ERC-721 mints
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
