//! Core types and shared functionality for offcache.
//!
//! This crate provides:
//! - The SQLite-backed cache storage layer (named stores + response snapshots)
//! - Unified error types
//! - Layered application configuration

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheDb, ResponseKind, ResponseSnapshot};
pub use config::AppConfig;
pub use error::Error;
