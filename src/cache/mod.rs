//! Cache Engine Module
//!
//! The core store of the server: a priority-ordered, size-bounded key/value
//! cache with compare-and-swap support.
//!
//! ## Eviction Policy
//!
//! Entries carry a caller-supplied priority. The ordered sequence keeps the
//! lowest priorities at the front, and whenever a write pushes the total
//! value bytes over the configured budget, entries are dropped from the
//! front until the cache fits again. Recency plays no part; within an
//! equal-priority band the oldest entry is the last to go, because new
//! insertions land at the front of their band.
//!
//! ## Features
//!
//! - **Single coarse lock**: map, ordered list, CAS counter and byte
//!   accounting change together, under one mutex
//! - **CAS**: every value-changing write takes a fresh id from a monotonic
//!   counter, so an intervening write invalidates outstanding ids
//! - **Insert-time flags**: `flags` is fixed when a key is inserted and
//!   ignored by every later write to that key

mod engine;


pub use engine::{Cache, CasOutcome};
