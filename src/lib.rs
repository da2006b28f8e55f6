/*!
 * # Perch - Uniswap V2 Liquidity Position Watcher
 *
 * Perch is a Rust-based tool for watching a wallet's liquidity positions
 * across tracked Uniswap V2 pairs on Ethereum.
 *
 * ## Core Features
 *
 * - **Position Aggregation**: Derives the account's active positions from
 *   liquidity-token balances and live pool reserves
 * - **Single View State**: Folds every input combination into exactly one of
 *   four presentation states
 * - **Real-time Monitoring**: Polls balances and reserves, with Sync-event
 *   nudges over WebSocket for early refreshes
 * - **Watchlist**: A default base-token pair grid extended by user imports
 *
 * ## Module Structure
 *
 * - `config`: Configuration management for the watcher
 * - `positions`: Core position aggregation and view-state selection
 * - `render`: Terminal presentation of the view state
 * - `sync`: Chain fetchers and the evaluation loop
 * - `utils`: Utility functions and helpers
 * - `watchlist`: The tracked pair provider
 */

/// Configuration management for the watcher
pub mod config;
/// Core position aggregation and view-state selection
pub mod positions;
/// Terminal presentation of the view state
pub mod render;
/// Chain fetchers and the evaluation loop
pub mod sync;
/// Utility functions and helpers
pub mod utils;
/// The tracked pair provider
pub mod watchlist;
