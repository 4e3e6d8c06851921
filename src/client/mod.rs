//! Client Library
//!
//! A client that multiplexes requests across several cache servers.
//! Each request hashes its key onto a consistent-hash ring to pick the
//! server, takes a pooled TCP connection to it (dialing if the pool is
//! empty), performs one request/reply round trip, and returns the
//! connection to the pool.
//!
//! ## Consistent Hashing
//!
//! Every server contributes [`POINTS_PER_SERVER`] points to the ring. A key
//! is owned by the first point strictly above its hash, wrapping around to
//! the smallest point. Adding a server moves only the keys that fall into
//! its new points.
//!
//! ## Validation
//!
//! Keys and values are validated locally before any network traffic: keys
//! must be 1..=1024 bytes, values 1..=1_048_576 bytes.

use crate::protocol::types::trim_crlf;
use crate::protocol::{Command, CommandParser, ParseError, END, MAX_KEY_LENGTH, MAX_VALUE_LENGTH};
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::hash::{DefaultHasher, Hash, Hasher};
use std::net::SocketAddr;
use std::ops::Bound;
use std::sync::Mutex;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

/// Hash points each server contributes to the ring.
pub const POINTS_PER_SERVER: usize = 5;

/// Pooled connections kept per server; surplus releases are dropped.
pub const MAX_CONNECTIONS_PER_SERVER: usize = 10;

/// Errors surfaced by the client library.
///
/// `NotStored`, `NotFound` and `Exists` mirror the server's semantic reply
/// codes; validation failures never reach the network.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Key is empty or longer than [`MAX_KEY_LENGTH`]
    #[error("invalid key")]
    InvalidKey,

    /// Value is empty or longer than [`MAX_VALUE_LENGTH`]
    #[error("invalid value")]
    InvalidValue,

    /// Server address did not parse
    #[error("invalid server address: {0}")]
    InvalidAddress(String),

    /// No servers have been added to the ring
    #[error("no servers added")]
    NoServers,

    /// The server answered `NOT_STORED`
    #[error("not stored")]
    NotStored,

    /// The server answered `NOT_FOUND`
    #[error("not found")]
    NotFound,

    /// The server answered `EXISTS` (cas id mismatch)
    #[error("exists")]
    Exists,

    /// The server sent a reply outside the protocol vocabulary
    #[error("unexpected response")]
    UnexpectedResponse,

    /// A `VALUE` header line did not parse
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Network failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// A pooling, consistent-hashing cache client.
///
/// # Example
///
/// ```no_run
/// use priocache::client::Client;
///
/// # async fn run() -> Result<(), priocache::client::ClientError> {
/// let mut client = Client::new();
/// client.add_server("127.0.0.1:9336")?;
///
/// client.set(b"greeting", 5, 0, 0, b"hello").await?;
/// let hit = client.get(b"greeting").await?;
/// assert!(hit.is_some());
/// # Ok(())
/// # }
/// ```
pub struct Client {
    /// Hash point -> server address; sorted by point.
    ring: BTreeMap<u64, SocketAddr>,
    /// Idle connections per server; most recently released on top.
    pool: Mutex<HashMap<SocketAddr, Vec<TcpStream>>>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    /// Creates a client with an empty ring.
    pub fn new() -> Self {
        Self {
            ring: BTreeMap::new(),
            pool: Mutex::new(HashMap::new()),
        }
    }

    /// Adds a server to the ring under [`POINTS_PER_SERVER`] hash points.
    pub fn add_server(&mut self, addr: &str) -> ClientResult<()> {
        let address: SocketAddr = addr
            .parse()
            .map_err(|_| ClientError::InvalidAddress(addr.to_string()))?;

        for point in 0..POINTS_PER_SERVER {
            let mut hasher = DefaultHasher::new();
            addr.hash(&mut hasher);
            point.hash(&mut hasher);
            self.ring.insert(hasher.finish(), address);
        }

        debug!(server = %address, points = POINTS_PER_SERVER, "Added server to ring");
        Ok(())
    }

    /// Stores `value` under `key`, overwriting any existing entry.
    pub async fn set(
        &self,
        key: &[u8],
        priority: u64,
        flags: u64,
        exptime: u64,
        value: &[u8],
    ) -> ClientResult<()> {
        self.store(Command::Set, key, priority, flags, exptime, 0, value)
            .await
    }

    /// Stores `value` under `key`; fails with [`ClientError::NotStored`] if
    /// the key already exists.
    pub async fn add(
        &self,
        key: &[u8],
        priority: u64,
        flags: u64,
        exptime: u64,
        value: &[u8],
    ) -> ClientResult<()> {
        self.store(Command::Add, key, priority, flags, exptime, 0, value)
            .await
    }

    /// Replaces the value of an existing key; fails with
    /// [`ClientError::NotStored`] if the key is absent.
    pub async fn replace(
        &self,
        key: &[u8],
        priority: u64,
        flags: u64,
        exptime: u64,
        value: &[u8],
    ) -> ClientResult<()> {
        self.store(Command::Replace, key, priority, flags, exptime, 0, value)
            .await
    }

    /// Appends `value` to an existing key's value.
    pub async fn append(
        &self,
        key: &[u8],
        priority: u64,
        flags: u64,
        exptime: u64,
        value: &[u8],
    ) -> ClientResult<()> {
        self.store(Command::Append, key, priority, flags, exptime, 0, value)
            .await
    }

    /// Prepends `value` to an existing key's value.
    pub async fn prepend(
        &self,
        key: &[u8],
        priority: u64,
        flags: u64,
        exptime: u64,
        value: &[u8],
    ) -> ClientResult<()> {
        self.store(Command::Prepend, key, priority, flags, exptime, 0, value)
            .await
    }

    /// Stores `value` only if the entry's cas id still equals `casid`
    /// (obtained from [`Client::gets`]); fails with [`ClientError::Exists`]
    /// when another write intervened.
    pub async fn cas(
        &self,
        key: &[u8],
        priority: u64,
        flags: u64,
        exptime: u64,
        casid: u64,
        value: &[u8],
    ) -> ClientResult<()> {
        self.store(Command::Cas, key, priority, flags, exptime, casid, value)
            .await
    }

    /// Retrieves `key`, returning the value and its insert-time flags, or
    /// `None` on a miss.
    pub async fn get(&self, key: &[u8]) -> ClientResult<Option<(Bytes, u64)>> {
        Ok(self
            .retrieve(Command::Get, key)
            .await?
            .map(|(value, flags, _)| (value, flags)))
    }

    /// Retrieves `key` with its cas id for a later [`Client::cas`].
    ///
    /// The server answers a `gets` miss with no bytes at all, so this call
    /// only returns once the key exists on the wire; prefer [`Client::get`]
    /// unless the cas id is needed.
    pub async fn gets(&self, key: &[u8]) -> ClientResult<Option<(Bytes, u64, u64)>> {
        self.retrieve(Command::Gets, key).await
    }

    /// Deletes `key`; fails with [`ClientError::NotFound`] if it is absent.
    pub async fn delete(&self, key: &[u8]) -> ClientResult<()> {
        self.validate(key, None)?;
        let addr = self.server_for(key).ok_or(ClientError::NoServers)?;
        let mut conn = self.get_connection(addr).await?;

        let result = delete_on(&mut conn, key).await;
        if stream_is_healthy(&result) {
            self.release_connection(addr, conn);
        }
        result
    }

    async fn store(
        &self,
        cmd: Command,
        key: &[u8],
        priority: u64,
        flags: u64,
        exptime: u64,
        casid: u64,
        value: &[u8],
    ) -> ClientResult<()> {
        self.validate(key, Some(value))?;
        let addr = self.server_for(key).ok_or(ClientError::NoServers)?;
        let mut conn = self.get_connection(addr).await?;

        let result = store_on(&mut conn, cmd, key, priority, flags, exptime, casid, value).await;
        if stream_is_healthy(&result) {
            self.release_connection(addr, conn);
        }
        result
    }

    async fn retrieve(&self, cmd: Command, key: &[u8]) -> ClientResult<Option<(Bytes, u64, u64)>> {
        self.validate(key, None)?;
        let addr = self.server_for(key).ok_or(ClientError::NoServers)?;
        let mut conn = self.get_connection(addr).await?;

        let result = retrieve_on(&mut conn, cmd, key).await;
        if stream_is_healthy(&result) {
            self.release_connection(addr, conn);
        }
        result
    }

    fn validate(&self, key: &[u8], value: Option<&[u8]>) -> ClientResult<()> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(ClientError::InvalidKey);
        }
        if let Some(value) = value {
            if value.is_empty() || value.len() > MAX_VALUE_LENGTH {
                return Err(ClientError::InvalidValue);
            }
        }
        Ok(())
    }

    /// Picks the server owning `key`: the first ring point strictly above
    /// the key's hash, wrapping to the smallest point.
    fn server_for(&self, key: &[u8]) -> Option<SocketAddr> {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        let hash = hasher.finish();

        self.ring
            .range((Bound::Excluded(hash), Bound::Unbounded))
            .next()
            .or_else(|| self.ring.iter().next())
            .map(|(_, &addr)| addr)
    }

    /// Takes an idle connection to `addr` from the pool, or dials one.
    async fn get_connection(&self, addr: SocketAddr) -> ClientResult<TcpStream> {
        let pooled = {
            let mut pool = self.pool.lock().unwrap();
            pool.get_mut(&addr).and_then(|conns| conns.pop())
        };

        match pooled {
            Some(conn) => Ok(conn),
            None => Ok(TcpStream::connect(addr).await?),
        }
    }

    /// Returns a healthy connection to the pool; surplus beyond
    /// [`MAX_CONNECTIONS_PER_SERVER`] is dropped.
    fn release_connection(&self, addr: SocketAddr, conn: TcpStream) {
        let mut pool = self.pool.lock().unwrap();
        let conns = pool.entry(addr).or_default();
        if conns.len() < MAX_CONNECTIONS_PER_SERVER {
            conns.push(conn);
        }
    }
}

/// A semantic reply (`NOT_STORED`, `NOT_FOUND`, `EXISTS`) leaves the
/// connection in sync and safe to pool; anything else may have left
/// half-read bytes behind, so the connection is dropped instead.
fn stream_is_healthy<T>(result: &ClientResult<T>) -> bool {
    !matches!(
        result,
        Err(ClientError::Io(_))
            | Err(ClientError::Parse(_))
            | Err(ClientError::UnexpectedResponse)
    )
}

async fn store_on(
    conn: &mut TcpStream,
    cmd: Command,
    key: &[u8],
    priority: u64,
    flags: u64,
    exptime: u64,
    casid: u64,
    value: &[u8],
) -> ClientResult<()> {
    let mut request = Vec::with_capacity(key.len() + value.len() + 64);
    request.extend_from_slice(cmd.token());
    request.push(b' ');
    request.extend_from_slice(key);
    if cmd == Command::Cas {
        request.extend_from_slice(
            format!(
                " {} {} {} {} {} \r\n",
                priority,
                flags,
                exptime,
                value.len(),
                casid
            )
            .as_bytes(),
        );
    } else {
        request.extend_from_slice(
            format!(" {} {} {} {} \r\n", priority, flags, exptime, value.len()).as_bytes(),
        );
    }
    request.extend_from_slice(value);

    let (read_half, mut write_half) = conn.split();
    let mut reader = BufReader::new(read_half);

    write_half.write_all(&request).await?;
    write_half.flush().await?;

    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).await?;

    match line.as_slice() {
        b"STORED\r\n" => Ok(()),
        b"NOT_STORED\r\n" => Err(ClientError::NotStored),
        b"NOT_FOUND\r\n" => Err(ClientError::NotFound),
        b"EXISTS\r\n" => Err(ClientError::Exists),
        _ => Err(ClientError::UnexpectedResponse),
    }
}

async fn retrieve_on(
    conn: &mut TcpStream,
    cmd: Command,
    key: &[u8],
) -> ClientResult<Option<(Bytes, u64, u64)>> {
    let mut request = Vec::with_capacity(key.len() + 8);
    request.extend_from_slice(cmd.token());
    request.push(b' ');
    request.extend_from_slice(key);
    request.extend_from_slice(b"\r\n");

    let (read_half, mut write_half) = conn.split();
    let mut reader = BufReader::new(read_half);

    write_half.write_all(&request).await?;
    write_half.flush().await?;

    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).await?;

    if line == END {
        return Ok(None);
    }

    let header = CommandParser::new().parse_value_header(trim_crlf(&line), cmd)?;

    let mut value = vec![0u8; header.size as usize];
    reader.read_exact(&mut value).await?;

    // Consume the CRLF after the value and the closing END line.
    let mut tail = Vec::new();
    reader.read_until(b'\n', &mut tail).await?;
    reader.read_until(b'\n', &mut tail).await?;

    Ok(Some((Bytes::from(value), header.flags, header.casid)))
}

async fn delete_on(conn: &mut TcpStream, key: &[u8]) -> ClientResult<()> {
    let mut request = Vec::with_capacity(key.len() + 16);
    request.extend_from_slice(Command::Delete.token());
    request.push(b' ');
    request.extend_from_slice(key);
    request.extend_from_slice(b" \r\n");

    let (read_half, mut write_half) = conn.split();
    let mut reader = BufReader::new(read_half);

    write_half.write_all(&request).await?;
    write_half.flush().await?;

    let mut line = Vec::new();
    reader.read_until(b'\n', &mut line).await?;

    match line.as_slice() {
        b"DELETED\r\n" => Ok(()),
        b"NOT_FOUND\r\n" => Err(ClientError::NotFound),
        _ => Err(ClientError::UnexpectedResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::connection::{handle_connection, ConnectionStats};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use tokio::net::TcpListener;

    async fn create_test_server() -> (SocketAddr, Arc<Cache>, Arc<ConnectionStats>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let cache = Arc::new(Cache::new(1024 * 1024));
        let stats = Arc::new(ConnectionStats::new());

        let cache_clone = Arc::clone(&cache);
        let stats_clone = Arc::clone(&stats);

        tokio::spawn(async move {
            while let Ok((stream, client_addr)) = listener.accept().await {
                let cache = Arc::clone(&cache_clone);
                let stats = Arc::clone(&stats_clone);
                tokio::spawn(handle_connection(stream, client_addr, cache, stats));
            }
        });

        (addr, cache, stats)
    }

    async fn create_test_client() -> (Client, Arc<Cache>, Arc<ConnectionStats>) {
        let (addr, cache, stats) = create_test_server().await;
        let mut client = Client::new();
        client.add_server(&addr.to_string()).unwrap();
        (client, cache, stats)
    }

    #[tokio::test]
    async fn test_validation_fails_locally() {
        let client = Client::new();

        // No servers are configured, so these must fail before routing.
        assert!(matches!(
            client.get(b"").await,
            Err(ClientError::InvalidKey)
        ));
        let long_key = vec![b'k'; MAX_KEY_LENGTH + 1];
        assert!(matches!(
            client.get(&long_key).await,
            Err(ClientError::InvalidKey)
        ));
        assert!(matches!(
            client.set(b"k", 0, 0, 0, b"").await,
            Err(ClientError::InvalidValue)
        ));
        let long_value = vec![b'v'; MAX_VALUE_LENGTH + 1];
        assert!(matches!(
            client.set(b"k", 0, 0, 0, &long_value).await,
            Err(ClientError::InvalidValue)
        ));
    }

    #[tokio::test]
    async fn test_no_servers() {
        let client = Client::new();
        assert!(matches!(
            client.get(b"key").await,
            Err(ClientError::NoServers)
        ));
        assert!(matches!(
            client.set(b"key", 0, 0, 0, b"v").await,
            Err(ClientError::NoServers)
        ));
    }

    #[tokio::test]
    async fn test_invalid_address() {
        let mut client = Client::new();
        assert!(matches!(
            client.add_server("not an address"),
            Err(ClientError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_ring_is_deterministic_and_spreads_keys() {
        let mut client = Client::new();
        client.add_server("10.0.0.1:9336").unwrap();
        client.add_server("10.0.0.2:9336").unwrap();

        assert_eq!(client.ring.len(), 2 * POINTS_PER_SERVER);

        let mut seen = std::collections::HashSet::new();
        for i in 0..100 {
            let key = format!("key-{}", i);
            let first = client.server_for(key.as_bytes()).unwrap();
            let second = client.server_for(key.as_bytes()).unwrap();
            assert_eq!(first, second);
            seen.insert(first);
        }
        // 100 keys across 10 points should land on both servers.
        assert_eq!(seen.len(), 2);
    }

    #[tokio::test]
    async fn test_round_trip() {
        let (client, _, _) = create_test_client().await;

        client.set(b"foo", 0, 7, 0, b"bar").await.unwrap();

        let (value, flags) = client.get(b"foo").await.unwrap().unwrap();
        assert_eq!(value, Bytes::from_static(b"bar"));
        assert_eq!(flags, 7);
    }

    #[tokio::test]
    async fn test_get_miss() {
        let (client, _, _) = create_test_client().await;
        assert!(client.get(b"missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cas_flow() {
        let (client, _, _) = create_test_client().await;

        client.set(b"foo", 0, 0, 0, b"bar").await.unwrap();

        let (_, _, casid) = client.gets(b"foo").await.unwrap().unwrap();
        client.cas(b"foo", 0, 0, 0, casid, b"baz").await.unwrap();

        // The same cas id is now stale.
        assert!(matches!(
            client.cas(b"foo", 0, 0, 0, casid, b"qux").await,
            Err(ClientError::Exists)
        ));

        let (value, _) = client.get(b"foo").await.unwrap().unwrap();
        assert_eq!(value, Bytes::from_static(b"baz"));
    }

    #[tokio::test]
    async fn test_add_and_delete() {
        let (client, _, _) = create_test_client().await;

        client.add(b"foo", 0, 0, 0, b"bar").await.unwrap();
        assert!(matches!(
            client.add(b"foo", 0, 0, 0, b"bar").await,
            Err(ClientError::NotStored)
        ));

        client.delete(b"foo").await.unwrap();
        assert!(matches!(
            client.delete(b"foo").await,
            Err(ClientError::NotFound)
        ));
        assert!(client.get(b"foo").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_append_prepend() {
        let (client, _, _) = create_test_client().await;

        client.set(b"k", 0, 0, 0, b"abc").await.unwrap();
        client.append(b"k", 0, 0, 0, b"de").await.unwrap();
        client.prepend(b"k", 0, 0, 0, b"xy").await.unwrap();

        let (value, _) = client.get(b"k").await.unwrap().unwrap();
        assert_eq!(value, Bytes::from_static(b"xyabcde"));
    }

    #[tokio::test]
    async fn test_connections_are_pooled() {
        let (client, _, stats) = create_test_client().await;

        client.set(b"a", 0, 0, 0, b"1").await.unwrap();
        client.set(b"b", 0, 0, 0, b"2").await.unwrap();
        client.get(b"a").await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(50)).await;

        // All three operations rode the same pooled connection.
        assert_eq!(stats.connections_accepted.load(Ordering::Relaxed), 1);
        let pool = client.pool.lock().unwrap();
        assert_eq!(pool.values().map(|v| v.len()).sum::<usize>(), 1);
    }
}
