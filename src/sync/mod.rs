//! # Sync Module
//!
//! The fetch layer and the reactive shell around the pure pipeline. The
//! fetchers read the chain; the watcher owns the snapshots and re-runs the
//! derivation whenever one of them changes.

/// Liquidity-token balance fetching
pub mod balances;
/// Reserve fetching for the candidate set
pub mod reserves;
/// WebSocket Sync-event subscription
pub mod subscriber;
/// The evaluation loop
pub mod watcher;

pub use watcher::{evaluate_once, watch};
