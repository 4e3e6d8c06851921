//! Command Line Parser
//!
//! The parser operates on a single logical command line: the bytes up to a
//! newline, with the trailing CR/LF already trimmed. It scans tokens with a
//! cursor and decodes the numeric fields of each command.
//!
//! ## Tokenizer Discipline
//!
//! The cursor starts at the end of the command token. Advancing skips
//! exactly one separator byte and reads until the next space or the end of
//! the line; an empty token is a failure. Because tokens are
//! single-space-delimited and CR/LF is trimmed before parsing, the trailing
//! space some clients emit before the newline is tolerated for free.
//!
//! ## Failure Reporting
//!
//! A failed parse names the semantic token that could not be read
//! (`key`, `priority`, `flags`, `exptime`, `size`, `casid`). The connection
//! handler turns that into a `CLIENT_ERROR Cannot parse <token>` reply and
//! keeps the connection open.
//!
//! One parser instance belongs to one connection; it is never shared.

use crate::protocol::types::{Command, VALUE};
use bytes::Bytes;
use thiserror::Error;

/// A structured parse failure naming the token that could not be read.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Cannot parse {token}")]
pub struct ParseError {
    /// Semantic name of the failed token.
    pub token: &'static str,
}

impl ParseError {
    const fn new(token: &'static str) -> Self {
        Self { token }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parsed header of a store command.
///
/// `size` announces how many payload bytes follow on the wire; reading them
/// is the connection handler's job, not the parser's. `casid` is present
/// only for `cas`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreHeader {
    pub key: Bytes,
    pub priority: u64,
    pub flags: u64,
    pub exptime: u64,
    pub size: u64,
    pub casid: Option<u64>,
}

/// Parsed header of a `VALUE` response line (client side).
///
/// `casid` is zero unless the response answers a `gets`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueHeader {
    pub flags: u64,
    pub size: u64,
    pub casid: u64,
}

/// A cursor-based parser for single command lines.
#[derive(Debug, Default)]
pub struct CommandParser {
    /// Byte position of the end of the last consumed token.
    position: usize,
}

impl CommandParser {
    /// Creates a new parser instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the argument fields of a store command line:
    /// `<key> <priority> <flags> <exptime> <size>`, plus `<casid>` for
    /// `cas`.
    pub fn parse_store(&mut self, line: &[u8], cmd: Command) -> ParseResult<StoreHeader> {
        self.position = cmd.token().len();

        let key = self.next_token(line).ok_or(ParseError::new("key"))?;
        let key = Bytes::copy_from_slice(key);

        let priority = self.parse_u64(line).ok_or(ParseError::new("priority"))?;
        let flags = self.parse_u64(line).ok_or(ParseError::new("flags"))?;
        let exptime = self.parse_u64(line).ok_or(ParseError::new("exptime"))?;
        let size = self.parse_u64(line).ok_or(ParseError::new("size"))?;

        let casid = if cmd == Command::Cas {
            Some(self.parse_u64(line).ok_or(ParseError::new("casid"))?)
        } else {
            None
        };

        Ok(StoreHeader {
            key,
            priority,
            flags,
            exptime,
            size,
            casid,
        })
    }

    /// Parses the single key argument of `get`, `gets` or `delete`.
    pub fn parse_key(&mut self, line: &[u8], cmd: Command) -> ParseResult<Bytes> {
        self.position = cmd.token().len();

        let key = self.next_token(line).ok_or(ParseError::new("key"))?;
        Ok(Bytes::copy_from_slice(key))
    }

    /// Parses a `VALUE` response header line (client side):
    /// `VALUE <key> <flags> <size>` for `get`,
    /// `VALUE <key> <flags> <size> <casid>` for `gets`.
    pub fn parse_value_header(&mut self, line: &[u8], cmd: Command) -> ParseResult<ValueHeader> {
        self.position = VALUE.len();

        self.next_token(line).ok_or(ParseError::new("key"))?;

        let flags = self.parse_u64(line).ok_or(ParseError::new("flags"))?;
        let size = self.parse_u64(line).ok_or(ParseError::new("size"))?;

        let casid = if cmd == Command::Gets {
            self.parse_u64(line).ok_or(ParseError::new("casid"))?
        } else {
            0
        };

        Ok(ValueHeader { flags, size, casid })
    }

    /// Skips exactly one separator byte, then reads until the next space or
    /// the end of the line. Empty tokens yield `None`.
    fn next_token<'a>(&mut self, line: &'a [u8]) -> Option<&'a [u8]> {
        let first = self.position + 1;
        if first > line.len() {
            return None;
        }

        let last = line[first..]
            .iter()
            .position(|&b| b == b' ')
            .map(|i| first + i)
            .unwrap_or(line.len());

        if first == last {
            return None;
        }

        self.position = last;
        Some(&line[first..last])
    }

    /// Takes the next token and decodes it as a base-10 unsigned 64-bit
    /// integer. Missing token, non-digit bytes and overflow all fail.
    fn parse_u64(&mut self, line: &[u8]) -> Option<u64> {
        let token = self.next_token(line)?;
        std::str::from_utf8(token).ok()?.parse::<u64>().ok()
    }
}
