//! Priority-Ordered Cache Engine
//!
//! This module implements the core store: a size-bounded, priority-ordered
//! key/value cache with CAS semantics. Unlike an LRU, eviction is driven by
//! a caller-supplied priority: the lowest-priority entries go first,
//! regardless of how recently they were touched.
//!
//! ## Data Structure
//!
//! Two structures cooperate under a single lock:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                         Cache                            │
//! │                                                          │
//! │  HashMap<key, node>          front (lowest priority)     │
//! │  ┌─────────────────┐            │                        │
//! │  │ "b" ──────────────────►  [b p=3]                      │
//! │  │ "c" ──────────────────►  [c p=5]   priorities         │
//! │  │ "a" ──────────────────►  [a p=5]   non-decreasing     │
//! │  └─────────────────┘            │                        │
//! │                              back (highest priority)     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The doubly linked list owns the entries; the map holds raw node handles
//! so lookups can mutate or unlink a node without walking the list. New
//! entries are inserted after the last node with a strictly lower priority,
//! which keeps the list sorted and places equal-priority newcomers toward
//! the front — so within a priority band the oldest entry survives longest.
//!
//! ## Concurrency Model
//!
//! One cache-wide `Mutex` guards the map, the list, the CAS counter and the
//! byte-length accounting together. Every mutation touches at least two of
//! them, so finer-grained locking would buy nothing but a multi-lock
//! protocol. Readers take the same lock; they do not evict.
//!
//! ## Eviction
//!
//! Every write ends with an eviction pass: while the cache holds more value
//! bytes than its budget, the front (lowest-priority) entry is unlinked and
//! dropped. The list head is advanced before the node is freed, so removal
//! never touches a dangling handle.

use bytes::{Bytes, BytesMut};
use std::collections::HashMap;
use std::ptr::NonNull;
use std::sync::Mutex;

/// The unit stored in the cache.
///
/// `flags` is recorded by the inserting write only; later writes to the
/// same key leave it untouched. `casid` is reassigned from the cache-wide
/// counter by every write that changes the value.
#[derive(Debug)]
struct Entry {
    key: Bytes,
    value: Bytes,
    priority: u64,
    flags: u64,
    casid: u64,
}

/// A list node owning one entry.
struct Node {
    prev: Option<NonNull<Node>>,
    next: Option<NonNull<Node>>,
    entry: Entry,
}

/// Outcome of a [`Cache::check_and_store`] operation.
///
/// Distinguishes "key absent" from "key present but the cas id did not
/// match" from "stored"; the wire protocol maps these to `NOT_FOUND`,
/// `EXISTS` and `STORED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    Stored,
    Exists,
    NotFound,
}

/// Everything the cache lock guards.
struct Inner {
    map: HashMap<Bytes, NonNull<Node>>,
    /// Front of the list: lowest priority, first to be evicted.
    head: Option<NonNull<Node>>,
    tail: Option<NonNull<Node>>,
    /// Monotonic write counter; the source of cas ids.
    counter: u64,
    /// Sum of value lengths across all entries.
    length: usize,
    max_length: usize,
}

/// A priority-ordered, size-bounded key/value cache.
///
/// Designed to be wrapped in an `Arc` and shared across connection tasks.
/// All operations are thread-safe and linearizable: a single exclusive lock
/// admits one operation at a time.
///
/// # Example
///
/// ```
/// use priocache::cache::Cache;
/// use bytes::Bytes;
///
/// let cache = Cache::new(100);
///
/// cache.set(Bytes::from("name"), Bytes::from("prio"), 5, 0, 0);
///
/// let (value, flags) = cache.get(b"name").unwrap();
/// assert_eq!(value, Bytes::from("prio"));
/// assert_eq!(flags, 0);
/// ```
pub struct Cache {
    inner: Mutex<Inner>,
}

// SAFETY: the raw node pointers inside `Inner` are only ever created from
// `Box` allocations owned by the list and only dereferenced while the
// mutex is held, so moving or sharing the cache between threads is sound.
unsafe impl Send for Cache {}
unsafe impl Sync for Cache {}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock().unwrap();
        f.debug_struct("Cache")
            .field("entries", &inner.map.len())
            .field("length", &inner.length)
            .field("max_length", &inner.max_length)
            .finish()
    }
}

impl Cache {
    /// Creates an empty cache bounded to `max_length` value bytes.
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                map: HashMap::new(),
                head: None,
                tail: None,
                counter: 0,
                length: 0,
                max_length,
            }),
        }
    }

    /// Stores `value` under `key`, creating or overwriting.
    ///
    /// An existing entry is updated in place: its position and its
    /// insert-time `flags` are kept, only value, priority and cas id
    /// change. A new entry is placed after the last entry with a strictly
    /// lower priority. `exptime` is accepted for wire compatibility and
    /// ignored.
    pub fn set(&self, key: Bytes, value: Bytes, priority: u64, flags: u64, _exptime: u64) {
        let mut inner = self.inner.lock().unwrap();

        if let Some(&ptr) = inner.map.get(key.as_ref()) {
            let node = unsafe { &mut *ptr.as_ptr() };
            inner.length -= node.entry.value.len();
            inner.length += value.len();
            node.entry.value = value;
            node.entry.priority = priority;
            node.entry.casid = inner.counter;
        } else {
            let casid = inner.counter;
            inner.insert(Entry {
                key,
                value,
                priority,
                flags,
                casid,
            });
        }

        inner.counter += 1;
        inner.evict();
    }

    /// Stores `value` under `key` only if the key is absent.
    ///
    /// Returns `true` if the entry was inserted. The counter advances only
    /// on insertion.
    pub fn add(&self, key: Bytes, value: Bytes, priority: u64, flags: u64, _exptime: u64) -> bool {
        let mut inner = self.inner.lock().unwrap();

        let inserted = if inner.map.contains_key(key.as_ref()) {
            false
        } else {
            let casid = inner.counter;
            inner.insert(Entry {
                key,
                value,
                priority,
                flags,
                casid,
            });
            inner.counter += 1;
            true
        };

        inner.evict();
        inserted
    }

    /// Replaces the value of an existing entry in place.
    ///
    /// The entry keeps its list position and its insert-time `flags`;
    /// `_flags` is accepted for wire compatibility and ignored. Returns
    /// `false` if the key is absent.
    pub fn replace(
        &self,
        key: &[u8],
        value: Bytes,
        priority: u64,
        _flags: u64,
        _exptime: u64,
    ) -> bool {
        let mut inner = self.inner.lock().unwrap();

        let replaced = match inner.map.get(key) {
            Some(&ptr) => {
                let node = unsafe { &mut *ptr.as_ptr() };
                inner.length -= node.entry.value.len();
                inner.length += value.len();
                node.entry.value = value;
                node.entry.priority = priority;
                node.entry.casid = inner.counter;
                inner.counter += 1;
                true
            }
            None => false,
        };

        inner.evict();
        replaced
    }

    /// Appends `value` to an existing entry's value, in place.
    ///
    /// Returns `false` if the key is absent.
    pub fn append(
        &self,
        key: &[u8],
        value: Bytes,
        priority: u64,
        _flags: u64,
        _exptime: u64,
    ) -> bool {
        let mut inner = self.inner.lock().unwrap();

        let appended = match inner.map.get(key) {
            Some(&ptr) => {
                let node = unsafe { &mut *ptr.as_ptr() };
                let mut joined = BytesMut::with_capacity(node.entry.value.len() + value.len());
                joined.extend_from_slice(&node.entry.value);
                joined.extend_from_slice(&value);
                node.entry.value = joined.freeze();
                inner.length += value.len();
                node.entry.priority = priority;
                node.entry.casid = inner.counter;
                inner.counter += 1;
                true
            }
            None => false,
        };

        inner.evict();
        appended
    }

    /// Prepends `value` to an existing entry's value, in place.
    ///
    /// Returns `false` if the key is absent.
    pub fn prepend(
        &self,
        key: &[u8],
        value: Bytes,
        priority: u64,
        _flags: u64,
        _exptime: u64,
    ) -> bool {
        let mut inner = self.inner.lock().unwrap();

        let prepended = match inner.map.get(key) {
            Some(&ptr) => {
                let node = unsafe { &mut *ptr.as_ptr() };
                let mut joined = BytesMut::with_capacity(value.len() + node.entry.value.len());
                joined.extend_from_slice(&value);
                joined.extend_from_slice(&node.entry.value);
                node.entry.value = joined.freeze();
                inner.length += value.len();
                node.entry.priority = priority;
                node.entry.casid = inner.counter;
                inner.counter += 1;
                true
            }
            None => false,
        };

        inner.evict();
        prepended
    }

    /// Replaces the value of an existing entry only if `casid` matches the
    /// entry's current cas id, proving no write intervened since the
    /// caller's `gets`.
    pub fn check_and_store(
        &self,
        key: &[u8],
        value: Bytes,
        priority: u64,
        _flags: u64,
        _exptime: u64,
        casid: u64,
    ) -> CasOutcome {
        let mut inner = self.inner.lock().unwrap();

        let outcome = match inner.map.get(key) {
            Some(&ptr) => {
                let node = unsafe { &mut *ptr.as_ptr() };
                if node.entry.casid == casid {
                    inner.length -= node.entry.value.len();
                    inner.length += value.len();
                    node.entry.value = value;
                    node.entry.priority = priority;
                    node.entry.casid = inner.counter;
                    inner.counter += 1;
                    CasOutcome::Stored
                } else {
                    CasOutcome::Exists
                }
            }
            None => CasOutcome::NotFound,
        };

        inner.evict();
        outcome
    }

    /// Looks up `key` and returns its value and insert-time flags.
    ///
    /// Reads never evict. The returned `Bytes` shares the stored buffer.
    pub fn get(&self, key: &[u8]) -> Option<(Bytes, u64)> {
        let inner = self.inner.lock().unwrap();

        inner.map.get(key).map(|&ptr| {
            let entry = unsafe { &ptr.as_ref().entry };
            (entry.value.clone(), entry.flags)
        })
    }

    /// Looks up `key` and returns its value, insert-time flags and current
    /// cas id.
    pub fn gets(&self, key: &[u8]) -> Option<(Bytes, u64, u64)> {
        let inner = self.inner.lock().unwrap();

        inner.map.get(key).map(|&ptr| {
            let entry = unsafe { &ptr.as_ref().entry };
            (entry.value.clone(), entry.flags, entry.casid)
        })
    }

    /// Removes `key` from the cache.
    ///
    /// Returns `true` if the key existed. Neither the counter nor any other
    /// entry is affected.
    pub fn delete(&self, key: &[u8]) -> bool {
        let mut inner = self.inner.lock().unwrap();

        match inner.map.remove(key) {
            Some(ptr) => {
                let node = inner.unlink(ptr);
                inner.length -= node.entry.value.len();
                true
            }
            None => false,
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().map.len()
    }

    /// Returns `true` if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of value lengths across all entries, in bytes.
    pub fn byte_length(&self) -> usize {
        self.inner.lock().unwrap().length
    }

    /// The byte budget configured at construction.
    pub fn max_length(&self) -> usize {
        self.inner.lock().unwrap().max_length
    }

    /// All keys in eviction order: front (lowest priority, evicted first)
    /// to back (highest priority).
    pub fn keys(&self) -> Vec<Bytes> {
        let inner = self.inner.lock().unwrap();

        let mut keys = Vec::with_capacity(inner.map.len());
        let mut cursor = inner.head;
        while let Some(ptr) = cursor {
            let node = unsafe { ptr.as_ref() };
            keys.push(node.entry.key.clone());
            cursor = node.next;
        }
        keys
    }
}

impl Inner {
    /// Inserts a fresh entry after the last node whose priority is strictly
    /// below the entry's, keeping the list non-decreasing and placing
    /// equal-priority newcomers toward the front.
    fn insert(&mut self, entry: Entry) {
        let key = entry.key.clone();
        let priority = entry.priority;
        let value_len = entry.value.len();

        let ptr = NonNull::from(Box::leak(Box::new(Node {
            prev: None,
            next: None,
            entry,
        })));

        let mut position: Option<NonNull<Node>> = None;
        let mut cursor = self.head;
        while let Some(current) = cursor {
            let current_ref = unsafe { current.as_ref() };
            if current_ref.entry.priority >= priority {
                break;
            }
            position = Some(current);
            cursor = current_ref.next;
        }

        match position {
            Some(after) => self.link_after(after, ptr),
            None => self.link_at_head(ptr),
        }

        self.length += value_len;
        self.map.insert(key, ptr);
    }

    fn link_at_head(&mut self, mut ptr: NonNull<Node>) {
        unsafe {
            ptr.as_mut().prev = None;
            ptr.as_mut().next = self.head;
            match self.head {
                Some(mut head) => head.as_mut().prev = Some(ptr),
                None => self.tail = Some(ptr),
            }
            self.head = Some(ptr);
        }
    }

    fn link_after(&mut self, mut after: NonNull<Node>, mut ptr: NonNull<Node>) {
        unsafe {
            let next = after.as_ref().next;
            ptr.as_mut().prev = Some(after);
            ptr.as_mut().next = next;
            after.as_mut().next = Some(ptr);
            match next {
                Some(mut next) => next.as_mut().prev = Some(ptr),
                None => self.tail = Some(ptr),
            }
        }
    }

    /// Unlinks a node and reclaims its allocation. Neighbor links (and the
    /// list head) are rewired from the node's own links before the caller
    /// can drop the returned box, so no freed handle is ever followed.
    fn unlink(&mut self, ptr: NonNull<Node>) -> Box<Node> {
        unsafe {
            let node = Box::from_raw(ptr.as_ptr());
            match node.prev {
                Some(mut prev) => prev.as_mut().next = node.next,
                None => self.head = node.next,
            }
            match node.next {
                Some(mut next) => next.as_mut().prev = node.prev,
                None => self.tail = node.prev,
            }
            node
        }
    }

    /// Removes front (lowest-priority) entries until the cache fits its
    /// byte budget or nothing is left. Invoked at the tail of every write,
    /// while the lock is still held.
    fn evict(&mut self) {
        while self.length > self.max_length {
            let Some(front) = self.head else { break };
            let node = self.unlink(front);
            self.length -= node.entry.value.len();
            self.map.remove(&node.entry.key);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        let mut cursor = self.head;
        while let Some(ptr) = cursor {
            let node = unsafe { Box::from_raw(ptr.as_ptr()) };
            cursor = node.next;
        }
        self.head = None;
        self.tail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    #[test]
    fn test_set_and_get() {
        let cache = Cache::new(100);

        cache.set(b("a"), b("xxxxx"), 5, 0, 0);

        let (value, flags) = cache.get(b"a").unwrap();
        assert_eq!(value, b("xxxxx"));
        assert_eq!(flags, 0);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.byte_length(), 5);
        assert_eq!(cache.max_length(), 100);
    }

    #[test]
    fn test_get_nonexistent() {
        let cache = Cache::new(100);
        assert_eq!(cache.get(b"nonexistent"), None);
        assert_eq!(cache.gets(b"nonexistent"), None);
    }

    #[test]
    fn test_priority_placement() {
        let cache = Cache::new(100);

        cache.set(b("a"), b("xxxxx"), 5, 0, 0);
        cache.set(b("b"), b("yyyyy"), 3, 0, 0);
        assert_eq!(cache.keys(), vec![b("b"), b("a")]);

        // Equal priority inserts before older entries of the same priority.
        cache.set(b("c"), b("zzzzz"), 5, 0, 0);
        assert_eq!(cache.keys(), vec![b("b"), b("c"), b("a")]);
    }

    #[test]
    fn test_eviction_lowest_priority_first() {
        let cache = Cache::new(10);

        cache.set(b("lo"), b("1111111111"), 1, 0, 0);
        cache.set(b("hi"), b("2222222222"), 9, 0, 0);

        assert_eq!(cache.get(b"lo"), None);
        assert_eq!(cache.keys(), vec![b("hi")]);
        assert_eq!(cache.byte_length(), 10);
    }

    #[test]
    fn test_eviction_removes_several() {
        let cache = Cache::new(10);

        cache.set(b("a"), b("1111"), 1, 0, 0);
        cache.set(b("b"), b("2222"), 2, 0, 0);
        cache.set(b("c"), b("3333"), 3, 0, 0);
        // 12 bytes > 10: evicting only "a" leaves 8, so one pass must be
        // able to stop there; adding 8 more forces two removals at once.
        assert_eq!(cache.keys(), vec![b("b"), b("c")]);

        cache.set(b("d"), b("88888888"), 9, 0, 0);
        assert_eq!(cache.keys(), vec![b("d")]);
        assert_eq!(cache.byte_length(), 8);
    }

    #[test]
    fn test_oversized_write_empties_cache() {
        let cache = Cache::new(10);

        cache.set(b("small"), b("11111"), 5, 0, 0);
        cache.set(b("big"), b("xxxxxxxxxxxx"), 9, 0, 0);

        // The pass walks from the front until the budget is met or nothing
        // is left; a value larger than the whole budget evicts everything,
        // itself included.
        assert!(cache.is_empty());
        assert_eq!(cache.byte_length(), 0);
    }

    #[test]
    fn test_cas_roundtrip() {
        let cache = Cache::new(100);

        cache.set(b("k"), b("v1"), 1, 0, 0);
        let (_, _, casid) = cache.gets(b"k").unwrap();

        cache.set(b("k"), b("v2"), 1, 0, 0);

        // The intervening write invalidated the cas id.
        assert_eq!(
            cache.check_and_store(b"k", b("v3"), 1, 0, 0, casid),
            CasOutcome::Exists
        );
        assert_eq!(cache.get(b"k").unwrap().0, b("v2"));

        // A fresh cas id succeeds.
        let (_, _, casid) = cache.gets(b"k").unwrap();
        assert_eq!(
            cache.check_and_store(b"k", b("v3"), 1, 0, 0, casid),
            CasOutcome::Stored
        );
        assert_eq!(cache.get(b"k").unwrap().0, b("v3"));
    }

    #[test]
    fn test_cas_absent_key() {
        let cache = Cache::new(100);
        assert_eq!(
            cache.check_and_store(b"absent", b("v"), 1, 0, 0, 0),
            CasOutcome::NotFound
        );
    }

    #[test]
    fn test_cas_ids_strictly_increase() {
        let cache = Cache::new(100);

        cache.set(b("a"), b("1"), 1, 0, 0);
        cache.set(b("b"), b("2"), 1, 0, 0);
        let (_, _, cas_a) = cache.gets(b"a").unwrap();
        let (_, _, cas_b) = cache.gets(b"b").unwrap();
        assert!(cas_b > cas_a);

        cache.set(b("a"), b("3"), 1, 0, 0);
        let (_, _, cas_a2) = cache.gets(b"a").unwrap();
        assert!(cas_a2 > cas_b);
    }

    #[test]
    fn test_add_only_when_absent() {
        let cache = Cache::new(100);

        assert!(cache.add(b("k"), b("v"), 1, 0, 0));
        assert!(!cache.add(b("k"), b("v2"), 1, 0, 0));
        assert_eq!(cache.get(b"k").unwrap().0, b("v"));
    }

    #[test]
    fn test_replace_requires_presence() {
        let cache = Cache::new(100);

        assert!(!cache.replace(b"k", b("v"), 1, 0, 0));
        cache.set(b("k"), b("v"), 1, 0, 0);
        assert!(cache.replace(b"k", b("w"), 1, 0, 0));
        assert_eq!(cache.get(b"k").unwrap().0, b("w"));
    }

    #[test]
    fn test_replace_does_not_reposition() {
        let cache = Cache::new(100);

        cache.set(b("a"), b("xxxxx"), 5, 0, 0);
        cache.set(b("b"), b("yyyyy"), 3, 0, 0);
        assert_eq!(cache.keys(), vec![b("b"), b("a")]);

        // In-place writes update priority without moving the node.
        assert!(cache.replace(b"b", b("yyyyy"), 9, 0, 0));
        assert_eq!(cache.keys(), vec![b("b"), b("a")]);
    }

    #[test]
    fn test_append_and_prepend() {
        let cache = Cache::new(100);

        cache.set(b("k"), b("abc"), 1, 0, 0);
        let before = cache.byte_length();

        assert!(cache.append(b"k", b("de"), 1, 0, 0));
        assert_eq!(cache.get(b"k").unwrap().0, b("abcde"));
        assert_eq!(cache.byte_length(), before + 2);

        assert!(cache.prepend(b"k", b("xy"), 1, 0, 0));
        assert_eq!(cache.get(b"k").unwrap().0, b("xyabcde"));

        assert!(!cache.append(b"absent", b("z"), 1, 0, 0));
        assert!(!cache.prepend(b"absent", b("z"), 1, 0, 0));
    }

    #[test]
    fn test_append_invalidates_cas() {
        let cache = Cache::new(100);

        cache.set(b("k"), b("abc"), 1, 0, 0);
        let (_, _, casid) = cache.gets(b"k").unwrap();

        assert!(cache.append(b"k", b("de"), 1, 0, 0));
        assert_eq!(
            cache.check_and_store(b"k", b("v"), 1, 0, 0, casid),
            CasOutcome::Exists
        );
    }

    #[test]
    fn test_flags_fixed_at_insert() {
        let cache = Cache::new(100);

        cache.set(b("k"), b("abc"), 1, 7, 0);
        cache.set(b("k"), b("de"), 1, 99, 0);

        let (value, flags) = cache.get(b"k").unwrap();
        assert_eq!(value, b("de"));
        assert_eq!(flags, 7);

        // A delete-then-set is a fresh insert and records new flags.
        cache.delete(b"k");
        cache.set(b("k"), b("de"), 1, 99, 0);
        assert_eq!(cache.get(b"k").unwrap().1, 99);
    }

    #[test]
    fn test_delete() {
        let cache = Cache::new(100);

        cache.set(b("k"), b("v"), 1, 0, 0);
        assert!(cache.delete(b"k"));
        assert_eq!(cache.get(b"k"), None);
        assert!(!cache.delete(b"k"));
        assert_eq!(cache.byte_length(), 0);
    }

    #[test]
    fn test_delete_absent_leaves_counter_untouched() {
        let cache = Cache::new(100);

        cache.set(b("k"), b("v"), 1, 0, 0);
        let (_, _, before) = cache.gets(b"k").unwrap();

        assert!(!cache.delete(b"absent"));

        cache.set(b("other"), b("w"), 1, 0, 0);
        let (_, _, after) = cache.gets(b"other").unwrap();
        // Exactly one successful write happened in between.
        assert_eq!(after, before + 1);
        assert_eq!(cache.byte_length(), 2);
    }

    #[test]
    fn test_middle_delete_relinks_neighbors() {
        let cache = Cache::new(100);

        cache.set(b("a"), b("1"), 1, 0, 0);
        cache.set(b("b"), b("2"), 2, 0, 0);
        cache.set(b("c"), b("3"), 3, 0, 0);

        assert!(cache.delete(b"b"));
        assert_eq!(cache.keys(), vec![b("a"), b("c")]);

        // Eviction still walks the relinked list correctly.
        cache.set(b("d"), b("4"), 0, 0, 0);
        assert_eq!(cache.keys(), vec![b("d"), b("a"), b("c")]);
    }

    #[test]
    fn test_concurrent_writers() {
        use std::sync::Arc;
        use std::thread;

        let cache = Arc::new(Cache::new(1024 * 1024));
        let mut handles = vec![];

        for i in 0..8u64 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for j in 0..200u64 {
                    let key = Bytes::from(format!("key-{}-{}", i, j));
                    cache.set(key.clone(), Bytes::from("value"), j % 10, 0, 0);
                    cache.get(&key);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 8 * 200);
        assert_eq!(cache.byte_length(), 8 * 200 * 5);
    }
}
