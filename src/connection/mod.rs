//! Connection Handling Module
//!
//! Each client connection is served by its own async task, so thousands of
//! clients can be in flight while the shared cache stays behind one lock.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    TCP Listener                         │
//! │                     (main.rs)                           │
//! └──────────────────────┬──────────────────────────────────┘
//!                        │ accept()
//!                        ▼
//!            ┌───────────────────────┐
//!            │  spawn per connection │
//!            └───────────┬───────────┘
//!                        ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                  ConnectionHandler                      │
//! │                                                         │
//! │  ┌────────────┐   ┌─────────────┐   ┌───────────────┐   │
//! │  │ Read line  │──►│ Parse +     │──►│ Cache op +    │   │
//! │  │ (+payload) │   │ dispatch    │   │ staged reply  │   │
//! │  └────────────┘   └─────────────┘   └───────┬───────┘   │
//! │                                             ▼           │
//! │                                     write + flush       │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod handler;

pub use handler::{handle_connection, ConnectionError, ConnectionHandler, ConnectionStats};
