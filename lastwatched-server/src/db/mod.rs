//! Persistence layer - connection pool, schema bootstrap, and repositories.
//!
//! # Design Principles
//!
//! - One connection pool created at startup and injected where needed
//! - Transactions for multi-step writes, rollback on every early return
//! - Typed errors: callers branch on `NotFound`, not on message text

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
