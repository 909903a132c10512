//! SQLite-backed cache storage for offline resource snapshots.
//!
//! This module provides a persistent realization of the browser-style cache
//! storage API using SQLite with async access via tokio-rusqlite. It supports:
//!
//! - Named, versioned stores (`open` / `keys` / `delete`)
//! - Keyed response snapshots per store (`put` / `match`)
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod connection;
pub mod entries;
pub mod key;
pub mod migrations;
pub mod snapshot;
pub mod stores;

pub use crate::Error;

pub use connection::CacheDb;
pub use key::compute_request_key;
pub use snapshot::{ResponseKind, ResponseSnapshot};
