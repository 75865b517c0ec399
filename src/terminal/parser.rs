//! Splits a raw input line into a command word and its argument string.

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInput {
    /// First word, trimmed and lower-cased
    pub command: String,
    /// Everything after the first whitespace character, verbatim
    pub argument: String,
}

impl ParsedInput {
    /// False when nothing but whitespace follows the command word
    pub fn has_argument(&self) -> bool {
        !self.argument.trim().is_empty()
    }
}

/// Parse a raw line.
///
/// Only the single whitespace character separating the command from its
/// argument is removed, so `mint gton  7d 1` keeps its inner double space.
pub fn parse_input(raw: &str) -> ParsedInput {
    let line = raw.trim_start();
    match line.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((pos, separator)) => ParsedInput {
            command: line[..pos].trim().to_lowercase(),
            argument: line[pos + separator.len_utf8()..].to_string(),
        },
        None => ParsedInput {
            command: line.trim().to_lowercase(),
            argument: String::new(),
        },
    }
}
