pub mod time;
pub mod units;

pub use time::{format_timestamp, unix_now};
pub use units::{format_units, parse_units, strip_trailing_zeros, Wei};
