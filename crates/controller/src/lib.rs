//! The offline cache controller.
//!
//! Owns one versioned cache store and implements the three-phase lifecycle:
//! install (pre-warm the store from the asset manifest), activate (evict
//! stale stores), and request resolution (cache-first with opportunistic
//! write-back).

pub mod controller;
pub mod intercept;
pub mod lifecycle;
pub mod manifest;

pub use controller::{OfflineController, StoreStatus};
pub use intercept::{Resolved, ResolveSource};
pub use lifecycle::ActivationReport;
pub use manifest::AssetManifest;
