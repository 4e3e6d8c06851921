//! Wire Vocabulary for the Text Protocol
//!
//! This module defines the canonical byte strings of the protocol: the
//! command tokens a client may send, the reply tokens the server answers
//! with, and the size limits both sides agree on.
//!
//! ## Protocol Format
//!
//! Commands are ASCII lines terminated by CRLF. Store commands announce a
//! payload size in-band and are followed by exactly that many raw bytes:
//!
//! ```text
//! set <key> <priority> <flags> <exptime> <size>\r\n
//! <size bytes of value>
//! ```
//!
//! Replies are single status lines (`STORED\r\n`, `NOT_FOUND\r\n`, ...) or
//! a value stream:
//!
//! ```text
//! VALUE <key> <flags> <size> \r\n
//! <value>\r\n
//! END\r\n
//! ```
//!
//! Note the space before the CRLF on the `VALUE` header line; clients emit
//! a matching trailing space on store headers and the parser tolerates it.

use bytes::Bytes;

/// The CRLF line terminator.
pub const CRLF: &[u8] = b"\r\n";

/// Maximum key length in bytes accepted by the client library.
pub const MAX_KEY_LENGTH: usize = 1024;

/// Maximum value length in bytes accepted by the client library.
pub const MAX_VALUE_LENGTH: usize = 1024 * 1024;

/// Opening token of a value stream reply.
pub const VALUE: &[u8] = b"VALUE";

/// Terminator of a value stream reply.
pub const END: &[u8] = b"END\r\n";

/// Strips the trailing CR/LF from a wire line before parsing.
pub fn trim_crlf(line: &[u8]) -> &[u8] {
    let mut end = line.len();
    while end > 0 && (line[end - 1] == b'\n' || line[end - 1] == b'\r') {
        end -= 1;
    }
    &line[..end]
}

/// A command of the wire protocol.
///
/// Store commands (`set`, `add`, `replace`, `append`, `prepend`, `cas`)
/// carry a payload of announced length; retrieval commands (`get`, `gets`)
/// and `delete` carry only a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Set,
    Add,
    Replace,
    Append,
    Prepend,
    Cas,
    Gets,
    Get,
    Delete,
}

/// Dispatch order for prefix matching. `gets` must precede `get`.
const DISPATCH_ORDER: [Command; 9] = [
    Command::Set,
    Command::Add,
    Command::Replace,
    Command::Append,
    Command::Prepend,
    Command::Cas,
    Command::Gets,
    Command::Get,
    Command::Delete,
];

impl Command {
    /// The ASCII token of this command.
    pub const fn token(self) -> &'static [u8] {
        match self {
            Command::Set => b"set",
            Command::Add => b"add",
            Command::Replace => b"replace",
            Command::Append => b"append",
            Command::Prepend => b"prepend",
            Command::Cas => b"cas",
            Command::Gets => b"gets",
            Command::Get => b"get",
            Command::Delete => b"delete",
        }
    }

    /// Matches a command line against the vocabulary by longest-matching
    /// prefix. Returns `None` for unknown commands.
    pub fn from_line(line: &[u8]) -> Option<Command> {
        DISPATCH_ORDER
            .iter()
            .copied()
            .find(|cmd| line.starts_with(cmd.token()))
    }

    /// Whether a payload of announced length follows the command line.
    pub const fn is_store(self) -> bool {
        matches!(
            self,
            Command::Set
                | Command::Add
                | Command::Replace
                | Command::Append
                | Command::Prepend
                | Command::Cas
        )
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Tokens are ASCII by construction.
        f.write_str(std::str::from_utf8(self.token()).unwrap_or("?"))
    }
}

/// A reply staged by the server for one command.
///
/// `serialize_into` renders the exact wire bytes. `Nothing` renders zero
/// bytes; it is the reply to a `gets` miss, which the protocol leaves
/// unanswered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Stored,
    NotStored,
    Deleted,
    NotFound,
    Exists,
    Error,
    ClientError(String),
    /// `get` hit: `VALUE <key> <flags> <size> \r\n<value>\r\nEND\r\n`.
    Value {
        key: Bytes,
        flags: u64,
        value: Bytes,
    },
    /// `gets` hit: `VALUE <key> <flags> <size> <casid> \r\n<value>\r\nEND\r\n`.
    ValueCas {
        key: Bytes,
        flags: u64,
        casid: u64,
        value: Bytes,
    },
    End,
    Nothing,
}

impl Reply {
    /// Serializes the reply into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Reply::Stored => buf.extend_from_slice(b"STORED\r\n"),
            Reply::NotStored => buf.extend_from_slice(b"NOT_STORED\r\n"),
            Reply::Deleted => buf.extend_from_slice(b"DELETED\r\n"),
            Reply::NotFound => buf.extend_from_slice(b"NOT_FOUND\r\n"),
            Reply::Exists => buf.extend_from_slice(b"EXISTS\r\n"),
            Reply::Error => buf.extend_from_slice(b"ERROR\r\n"),
            Reply::ClientError(msg) => {
                buf.extend_from_slice(b"CLIENT_ERROR ");
                buf.extend_from_slice(msg.as_bytes());
                buf.extend_from_slice(CRLF);
            }
            Reply::Value { key, flags, value } => {
                buf.extend_from_slice(VALUE);
                buf.push(b' ');
                buf.extend_from_slice(key);
                buf.extend_from_slice(format!(" {} {} ", flags, value.len()).as_bytes());
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(value);
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(END);
            }
            Reply::ValueCas {
                key,
                flags,
                casid,
                value,
            } => {
                buf.extend_from_slice(VALUE);
                buf.push(b' ');
                buf.extend_from_slice(key);
                buf.extend_from_slice(format!(" {} {} {} ", flags, value.len(), casid).as_bytes());
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(value);
                buf.extend_from_slice(CRLF);
                buf.extend_from_slice(END);
            }
            Reply::End => buf.extend_from_slice(END),
            Reply::Nothing => {}
        }
    }

    /// Serializes the reply to a fresh byte vector.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_dispatch() {
        assert_eq!(Command::from_line(b"set k 1 0 0 3"), Some(Command::Set));
        assert_eq!(Command::from_line(b"gets k"), Some(Command::Gets));
        assert_eq!(Command::from_line(b"get k"), Some(Command::Get));
        assert_eq!(Command::from_line(b"delete k "), Some(Command::Delete));
        assert_eq!(Command::from_line(b"foo k"), None);
        assert_eq!(Command::from_line(b""), None);
    }

    #[test]
    fn test_gets_wins_over_get() {
        // "gets" starts with "get"; dispatch order must pick the longer token.
        assert_eq!(Command::from_line(b"gets key"), Some(Command::Gets));
    }

    #[test]
    fn test_store_classification() {
        assert!(Command::Set.is_store());
        assert!(Command::Cas.is_store());
        assert!(!Command::Get.is_store());
        assert!(!Command::Gets.is_store());
        assert!(!Command::Delete.is_store());
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(Reply::Stored.serialize(), b"STORED\r\n");
        assert_eq!(Reply::NotStored.serialize(), b"NOT_STORED\r\n");
        assert_eq!(Reply::Deleted.serialize(), b"DELETED\r\n");
        assert_eq!(Reply::NotFound.serialize(), b"NOT_FOUND\r\n");
        assert_eq!(Reply::Exists.serialize(), b"EXISTS\r\n");
        assert_eq!(Reply::Error.serialize(), b"ERROR\r\n");
        assert_eq!(
            Reply::ClientError("Cannot parse size".to_string()).serialize(),
            b"CLIENT_ERROR Cannot parse size\r\n"
        );
    }

    #[test]
    fn test_value_serialization() {
        let reply = Reply::Value {
            key: Bytes::from_static(b"a"),
            flags: 7,
            value: Bytes::from_static(b"xxxxx"),
        };
        assert_eq!(reply.serialize(), b"VALUE a 7 5 \r\nxxxxx\r\nEND\r\n");
    }

    #[test]
    fn test_value_cas_serialization() {
        let reply = Reply::ValueCas {
            key: Bytes::from_static(b"a"),
            flags: 0,
            casid: 42,
            value: Bytes::from_static(b"v"),
        };
        assert_eq!(reply.serialize(), b"VALUE a 0 1 42 \r\nv\r\nEND\r\n");
    }

    #[test]
    fn test_nothing_emits_no_bytes() {
        assert!(Reply::Nothing.serialize().is_empty());
    }

    #[test]
    fn test_trim_crlf() {
        assert_eq!(trim_crlf(b"get k\r\n"), b"get k");
        assert_eq!(trim_crlf(b"get k\n"), b"get k");
        // A trailing space survives trimming; the tokenizer tolerates it.
        assert_eq!(trim_crlf(b"set k 1 0 0 3 \r\n"), b"set k 1 0 0 3 ");
        assert_eq!(trim_crlf(b"\r\n"), b"");
        assert_eq!(trim_crlf(b""), b"");
    }
}
