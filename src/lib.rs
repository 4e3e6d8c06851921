//! # priocache - A Priority-Evicting In-Memory Cache
//!
//! priocache is an in-memory key/value cache server written in Rust. It
//! speaks a line-oriented text protocol modeled on memcached, with one
//! twist: eviction is driven by a caller-supplied **priority** rather than
//! recency. When the cache outgrows its byte budget, the lowest-priority
//! entries are dropped first, however recently they were used.
//!
//! ## Features
//!
//! - **Priority eviction**: every entry carries a 64-bit priority; higher
//!   means less likely to be evicted
//! - **CAS**: `gets`/`cas` optimistic updates backed by a cache-wide
//!   monotonic write counter
//! - **Async I/O**: built on Tokio, one task per connection
//! - **Companion client**: consistent hashing across servers with
//!   per-server connection pooling
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                          priocache                            │
//! │                                                               │
//! │  ┌─────────────┐    ┌──────────────┐    ┌─────────────────┐   │
//! │  │ TCP Server  │───►│ Connection   │───►│ CommandParser   │   │
//! │  │ (listener)  │    │ Handler      │    │ (per connection)│   │
//! │  └─────────────┘    └──────┬───────┘    └─────────────────┘   │
//! │                            │                                  │
//! │                            ▼                                  │
//! │  ┌─────────────────────────────────────────────────────────┐  │
//! │  │                     Cache (one Mutex)                   │  │
//! │  │                                                         │  │
//! │  │  HashMap<key, node> ──► doubly linked list, front to    │  │
//! │  │                         back by non-decreasing priority │  │
//! │  └─────────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use priocache::cache::Cache;
//! use priocache::connection::{handle_connection, ConnectionStats};
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = Arc::new(Cache::new(priocache::DEFAULT_MAX_BYTES));
//!     let stats = Arc::new(ConnectionStats::new());
//!
//!     let listener = TcpListener::bind(priocache::DEFAULT_ADDR).await.unwrap();
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         let cache = Arc::clone(&cache);
//!         let stats = Arc::clone(&stats);
//!
//!         tokio::spawn(handle_connection(stream, addr, cache, stats));
//!     }
//! }
//! ```
//!
//! ## Wire Protocol
//!
//! Store commands carry a payload of announced length:
//!
//! ```text
//! set <key> <priority> <flags> <exptime> <size>\r\n
//! <size bytes of value>
//! ```
//!
//! `add`, `replace`, `append` and `prepend` share that shape; `cas` adds a
//! `<casid>` field. Retrievals are `get <key>` / `gets <key>`; deletion is
//! `delete <key>`. `exptime` is accepted for memcached compatibility and
//! ignored. `flags` is stored when a key is first inserted and echoed on
//! retrieval; later writes to the same key do not change it.
//!
//! ## Module Overview
//!
//! - [`protocol`]: command/reply vocabulary and the line parser
//! - [`cache`]: the priority-ordered store with CAS and eviction
//! - [`connection`]: per-connection protocol loop
//! - [`client`]: consistent-hashing, pooling client library

pub mod cache;
pub mod client;
pub mod connection;
pub mod protocol;

// Re-export commonly used types for convenience
pub use cache::{Cache, CasOutcome};
pub use client::{Client, ClientError};
pub use connection::{handle_connection, ConnectionError, ConnectionStats};
pub use protocol::{Command, CommandParser, ParseError, Reply};

/// The default address the server binds to.
pub const DEFAULT_ADDR: &str = "0.0.0.0:9336";

/// The default cache byte budget (4 MiB).
pub const DEFAULT_MAX_BYTES: usize = 4 * 1024 * 1024;

/// Version of priocache
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
