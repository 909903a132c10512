//! Client code for offcache.
//!
//! This crate provides the network primitive the cache controller fetches
//! through: URL canonicalization, the async `Network` seam, and the
//! reqwest-backed `HttpFetcher`.

pub mod fetch;

pub use fetch::{FetchConfig, FetchedResponse, HttpFetcher, Network, ResourceRequest, canonicalize, same_origin};
