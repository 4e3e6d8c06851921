//! Per-Connection Protocol Loop
//!
//! Each accepted TCP connection gets its own handler task running a
//! read-dispatch-reply loop until the client hangs up.
//!
//! ## Connection Lifecycle
//!
//! ```text
//! READ_COMMAND_LINE ──store cmd──► READ_PAYLOAD(size) ──► EXECUTE ──► WRITE_REPLY ─┐
//! READ_COMMAND_LINE ──retrieval──► EXECUTE ──► WRITE_REPLY ─┤                      │
//! READ_COMMAND_LINE ──parse fail──► WRITE_REPLY(CLIENT_ERROR) ─┤                   │
//!        ▲──────────────────────────────────────────────────────┴──────────────────┘
//!        │
//!   EOF, empty line or write error ──► TERMINATED
//! ```
//!
//! ## Framing
//!
//! Commands are read line by line. Store commands announce their payload
//! size in the header; the handler then reads exactly that many bytes from
//! the buffered reader, with no terminator of its own. A payload read that
//! comes up short desynchronizes the stream, so the handler gives up on the
//! connection rather than guess where the next command starts.

use crate::cache::{Cache, CasOutcome};
use crate::protocol::types::trim_crlf;
use crate::protocol::{Command, CommandParser, Reply};
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

/// Statistics for connection handling, shared across all handler tasks.
#[derive(Debug, Default)]
pub struct ConnectionStats {
    /// Total number of connections accepted
    pub connections_accepted: AtomicU64,
    /// Currently active connections
    pub active_connections: AtomicU64,
    /// Total commands processed
    pub commands_processed: AtomicU64,
}

impl ConnectionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connection_opened(&self) {
        self.connections_accepted.fetch_add(1, Ordering::Relaxed);
        self.active_connections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn connection_closed(&self) {
        self.active_connections.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn command_processed(&self) {
        self.commands_processed.fetch_add(1, Ordering::Relaxed);
    }
}

/// Errors that terminate a connection.
///
/// Semantic misses (`NOT_FOUND`, `NOT_STORED`, `EXISTS`) and parse failures
/// are ordinary replies, not errors; only stream-level problems end the
/// loop.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// I/O error on the socket
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The client announced more payload bytes than it sent
    #[error("payload shorter than announced")]
    TruncatedPayload,
}

/// Handles a single client connection.
///
/// Owns the buffered halves of the stream, one parser, and the staged
/// reply for the command in flight. The cache itself is shared.
pub struct ConnectionHandler {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
    addr: SocketAddr,
    cache: Arc<Cache>,
    parser: CommandParser,
    /// Scratch buffer for the current command line.
    line: Vec<u8>,
    /// Reply staged for the current command; written and cleared per loop.
    response: Vec<u8>,
    stats: Arc<ConnectionStats>,
}

impl ConnectionHandler {
    pub fn new(
        stream: TcpStream,
        addr: SocketAddr,
        cache: Arc<Cache>,
        stats: Arc<ConnectionStats>,
    ) -> Self {
        stats.connection_opened();

        let (read_half, write_half) = stream.into_split();
        Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
            addr,
            cache,
            parser: CommandParser::new(),
            line: Vec::new(),
            response: Vec::new(),
            stats,
        }
    }

    /// Runs the connection to completion.
    pub async fn run(mut self) -> Result<(), ConnectionError> {
        info!(client = %self.addr, "Client connected");

        let result = self.main_loop().await;

        match &result {
            Ok(()) => debug!(client = %self.addr, "Client disconnected"),
            Err(ConnectionError::Io(e))
                if e.kind() == std::io::ErrorKind::ConnectionReset =>
            {
                debug!(client = %self.addr, "Connection reset by client")
            }
            Err(e) => warn!(client = %self.addr, error = %e, "Connection error"),
        }

        self.stats.connection_closed();
        result
    }

    /// The read-dispatch-reply loop.
    async fn main_loop(&mut self) -> Result<(), ConnectionError> {
        loop {
            self.line.clear();
            let n = self.reader.read_until(b'\n', &mut self.line).await?;
            if n == 0 {
                // EOF: a polite disconnect, indistinguishable from one.
                return Ok(());
            }
            if self.line.len() == 1 {
                // A bare newline asks the server to close the connection.
                return Ok(());
            }

            match Command::from_line(&self.line) {
                Some(cmd) => match cmd {
                    Command::Set
                    | Command::Add
                    | Command::Replace
                    | Command::Append
                    | Command::Prepend
                    | Command::Cas => self.run_store(cmd).await?,
                    Command::Get => self.run_get(),
                    Command::Gets => self.run_gets(),
                    Command::Delete => self.run_delete(),
                },
                None => {
                    debug!(
                        client = %self.addr,
                        line = %String::from_utf8_lossy(trim_crlf(&self.line)),
                        "Received nonexistent command"
                    );
                    Reply::Error.serialize_into(&mut self.response);
                }
            }

            self.writer.write_all(&self.response).await?;
            self.writer.flush().await?;
            self.response.clear();
            self.stats.command_processed();
        }
    }

    /// Executes a store command: parse the header, read exactly the
    /// announced payload, apply the cache operation.
    async fn run_store(&mut self, cmd: Command) -> Result<(), ConnectionError> {
        let header = match self.parser.parse_store(trim_crlf(&self.line), cmd) {
            Ok(header) => header,
            Err(e) => {
                debug!(client = %self.addr, command = %cmd, error = %e, "Rejected command");
                Reply::ClientError(e.to_string()).serialize_into(&mut self.response);
                return Ok(());
            }
        };

        let mut payload = vec![0u8; header.size as usize];
        self.reader
            .read_exact(&mut payload)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::UnexpectedEof => ConnectionError::TruncatedPayload,
                _ => ConnectionError::Io(e),
            })?;
        let value = Bytes::from(payload);

        debug!(
            client = %self.addr,
            command = %cmd,
            key = %String::from_utf8_lossy(&header.key),
            priority = header.priority,
            size = header.size,
            "Executing store command"
        );

        let reply = match cmd {
            Command::Set => {
                self.cache.set(
                    header.key,
                    value,
                    header.priority,
                    header.flags,
                    header.exptime,
                );
                Reply::Stored
            }
            Command::Add => stored_reply(self.cache.add(
                header.key,
                value,
                header.priority,
                header.flags,
                header.exptime,
            )),
            Command::Replace => stored_reply(self.cache.replace(
                &header.key,
                value,
                header.priority,
                header.flags,
                header.exptime,
            )),
            Command::Append => stored_reply(self.cache.append(
                &header.key,
                value,
                header.priority,
                header.flags,
                header.exptime,
            )),
            Command::Prepend => stored_reply(self.cache.prepend(
                &header.key,
                value,
                header.priority,
                header.flags,
                header.exptime,
            )),
            Command::Cas => match self.cache.check_and_store(
                &header.key,
                value,
                header.priority,
                header.flags,
                header.exptime,
                header.casid.unwrap_or(0),
            ) {
                CasOutcome::Stored => Reply::Stored,
                CasOutcome::Exists => Reply::Exists,
                CasOutcome::NotFound => Reply::NotFound,
            },
            // Dispatch only routes store commands here.
            _ => Reply::Error,
        };

        reply.serialize_into(&mut self.response);
        Ok(())
    }

    fn run_get(&mut self) {
        let key = match self.parser.parse_key(trim_crlf(&self.line), Command::Get) {
            Ok(key) => key,
            Err(e) => {
                debug!(client = %self.addr, command = "get", error = %e, "Rejected command");
                Reply::ClientError(e.to_string()).serialize_into(&mut self.response);
                return;
            }
        };

        let reply = match self.cache.get(&key) {
            Some((value, flags)) => {
                debug!(client = %self.addr, key = %String::from_utf8_lossy(&key), "Cache hit");
                Reply::Value { key, flags, value }
            }
            None => {
                debug!(client = %self.addr, key = %String::from_utf8_lossy(&key), "Cache miss");
                Reply::End
            }
        };
        reply.serialize_into(&mut self.response);
    }

    fn run_gets(&mut self) {
        let key = match self.parser.parse_key(trim_crlf(&self.line), Command::Gets) {
            Ok(key) => key,
            Err(e) => {
                debug!(client = %self.addr, command = "gets", error = %e, "Rejected command");
                Reply::ClientError(e.to_string()).serialize_into(&mut self.response);
                return;
            }
        };

        let reply = match self.cache.gets(&key) {
            Some((value, flags, casid)) => {
                debug!(client = %self.addr, key = %String::from_utf8_lossy(&key), "Cache hit");
                Reply::ValueCas {
                    key,
                    flags,
                    casid,
                    value,
                }
            }
            None => {
                debug!(client = %self.addr, key = %String::from_utf8_lossy(&key), "Cache miss");
                // A gets miss draws no reply at all.
                Reply::Nothing
            }
        };
        reply.serialize_into(&mut self.response);
    }

    fn run_delete(&mut self) {
        let key = match self.parser.parse_key(trim_crlf(&self.line), Command::Delete) {
            Ok(key) => key,
            Err(e) => {
                debug!(client = %self.addr, command = "delete", error = %e, "Rejected command");
                Reply::ClientError(e.to_string()).serialize_into(&mut self.response);
                return;
            }
        };

        let reply = if self.cache.delete(&key) {
            Reply::Deleted
        } else {
            Reply::NotFound
        };
        reply.serialize_into(&mut self.response);
    }
}

fn stored_reply(stored: bool) -> Reply {
    if stored {
        Reply::Stored
    } else {
        Reply::NotStored
    }
}

/// Handles a client connection to completion.
///
/// Convenience wrapper that builds a [`ConnectionHandler`] and swallows the
/// terminal error after logging; one connection's failure never concerns
/// the others.
pub async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    cache: Arc<Cache>,
    stats: Arc<ConnectionStats>,
) {
    let handler = ConnectionHandler::new(stream, addr, cache, stats);
    if let Err(e) = handler.run().await {
        match &e {
            ConnectionError::Io(io_err)
                if io_err.kind() == std::io::ErrorKind::ConnectionReset => {}
            _ => debug!(client = %addr, error = %e, "Connection ended with error"),
        }
    }
}
