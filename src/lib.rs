pub mod chain;
pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod messages;
pub mod messenger;
pub mod terminal;
pub mod utils;
pub mod workflows;

pub use chain::{
    BondInfo, ChainClient, Clock, HttpTransport, RpcProvider, RpcTransport, SystemClock,
    TxReceipt, WalletProvider,
};
pub use config::{ChainParams, TerminalConfig, TokenInfo};
pub use errors::{RpcError, TerminalError, TerminalResult, TransactionFailed};

// Re-export logging module
pub use logging::{init_logging, is_initialized, LogFormat, LoggingConfig};

pub use messenger::{Messenger, MessengerClient, WhitelistEntry};
pub use terminal::{
    parse_input, BufferedConsole, Command, CommandTable, Console, Dispatcher, Emission,
    ExecutionGuard, GuardFlags, GuardPolicy, Mode, ParsedInput, Route, SessionState, Terminal,
    Workflow,
};
pub use utils::{format_units, parse_units, Wei};
pub use workflows::{Services, WorkflowContext};
