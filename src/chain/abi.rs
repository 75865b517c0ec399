//! Minimal Solidity ABI encoding for contract calls.
//!
//! Only static arguments (addresses and uint256) are encoded. Return data is
//! split into 32-byte words; helpers decode uints, bools, addresses and a
//! dynamic `uint256[]`.

use crate::errors::{TerminalError, TerminalResult};
use crate::utils::Wei;
use sp_core::hashing::keccak_256;

/// ABI word size in bytes
pub const WORD: usize = 32;

pub type Word = [u8; WORD];

/// Static call argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiValue<'a> {
    Address(&'a str),
    Uint(u128),
}

impl From<Wei> for AbiValue<'_> {
    fn from(amount: Wei) -> Self {
        AbiValue::Uint(amount.as_u128())
    }
}

/// First four bytes of keccak-256 of the function signature
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak_256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// `0x`-prefixed keccak-256 of an event signature (log topic 0)
pub fn event_topic(signature: &str) -> String {
    format!("0x{}", hex::encode(keccak_256(signature.as_bytes())))
}

fn strip_0x(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

fn encode_value(value: &AbiValue<'_>) -> TerminalResult<Word> {
    let mut word = [0u8; WORD];
    match value {
        AbiValue::Address(address) => {
            let bytes = hex::decode(strip_0x(address))?;
            if bytes.len() != 20 {
                return Err(TerminalError::validation(format!(
                    "Invalid address: {}",
                    address
                )));
            }
            word[12..].copy_from_slice(&bytes);
        }
        AbiValue::Uint(n) => {
            word[16..].copy_from_slice(&n.to_be_bytes());
        }
    }
    Ok(word)
}

/// Encode calldata (`0x` + selector + words)
pub fn encode_call(signature: &str, args: &[AbiValue<'_>]) -> TerminalResult<String> {
    let mut data = Vec::with_capacity(4 + WORD * args.len());
    data.extend_from_slice(&selector(signature));
    for arg in args {
        data.extend_from_slice(&encode_value(arg)?);
    }
    Ok(format!("0x{}", hex::encode(data)))
}

/// Split `0x`-prefixed return data into words
pub fn decode_words(data: &str) -> TerminalResult<Vec<Word>> {
    let bytes = hex::decode(strip_0x(data))?;
    if bytes.len() % WORD != 0 {
        return Err(TerminalError::external(format!(
            "Return data length {} is not a multiple of {}",
            bytes.len(),
            WORD
        )));
    }
    Ok(bytes
        .chunks_exact(WORD)
        .map(|chunk| {
            let mut word = [0u8; WORD];
            word.copy_from_slice(chunk);
            word
        })
        .collect())
}

/// Word at `index`, or an error naming what was expected
pub fn word_at(words: &[Word], index: usize) -> TerminalResult<&Word> {
    words.get(index).ok_or_else(|| {
        TerminalError::external(format!(
            "Return data too short: expected word {}, got {}",
            index,
            words.len()
        ))
    })
}

/// uint256 that must fit in u128
pub fn word_to_u128(word: &Word) -> TerminalResult<u128> {
    if word[..16].iter().any(|b| *b != 0) {
        return Err(TerminalError::external("uint256 value overflows u128"));
    }
    let mut low = [0u8; 16];
    low.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(low))
}

pub fn word_to_bool(word: &Word) -> TerminalResult<bool> {
    match word_to_u128(word)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(TerminalError::external(format!(
            "Invalid bool value {}",
            other
        ))),
    }
}

/// Lower-case `0x` address from the last 20 bytes
pub fn word_to_address(word: &Word) -> String {
    format!("0x{}", hex::encode(&word[12..]))
}

/// Decode a `uint256[]` return value whose offset sits in word `head`
pub fn decode_uint_array(words: &[Word], head: usize) -> TerminalResult<Vec<u128>> {
    let offset = word_to_u128(word_at(words, head)?)?;
    if offset % WORD as u128 != 0 {
        return Err(TerminalError::external("Unaligned dynamic array offset"));
    }
    let start = (offset / WORD as u128) as usize;
    let len = word_to_u128(word_at(words, start)?)? as usize;
    (0..len)
        .map(|i| word_to_u128(word_at(words, start + 1 + i)?))
        .collect()
}

/// Parse a JSON-RPC hex quantity (`"0x1a"`)
pub fn parse_quantity(value: &str) -> TerminalResult<u128> {
    let digits = strip_0x(value);
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| TerminalError::external(format!("Invalid quantity '{}': {}", value, e)))
}

/// Format a JSON-RPC hex quantity
pub fn to_quantity(value: u128) -> String {
    format!("0x{:x}", value)
}
