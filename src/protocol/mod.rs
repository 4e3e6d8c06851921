//! Text Protocol Implementation
//!
//! This module implements the line-oriented, memcached-style text protocol
//! spoken between clients and the cache server.
//!
//! ## Overview
//!
//! Requests are CRLF-framed ASCII lines; store commands are followed by a
//! raw payload whose length is announced in the command header. Replies are
//! status lines or a `VALUE ... END` stream.
//!
//! ## Modules
//!
//! - `types`: command/reply vocabulary, serialization, size limits
//! - `parser`: cursor-based tokenizer and per-command parses
//!
//! ## Example
//!
//! ```
//! use priocache::protocol::{Command, CommandParser, Reply};
//!
//! let line = b"set greeting 5 0 0 5";
//! let cmd = Command::from_line(line).unwrap();
//! assert_eq!(cmd, Command::Set);
//!
//! let mut parser = CommandParser::new();
//! let header = parser.parse_store(line, cmd).unwrap();
//! assert_eq!(header.size, 5);
//!
//! let reply = Reply::Stored;
//! assert_eq!(reply.serialize(), b"STORED\r\n");
//! ```

pub mod parser;
pub mod types;

pub use parser::{CommandParser, ParseError, ParseResult, StoreHeader, ValueHeader};
pub use types::{Command, Reply, CRLF, END, MAX_KEY_LENGTH, MAX_VALUE_LENGTH};
