use std::collections::HashSet;
use std::str::FromStr;

use alloy::primitives::{Address, U256};
use eyre::Result;
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::Message;

use crate::utils::providers::send_ws_request;

/// Event topic of Uniswap V2 `Sync(uint112,uint112)`
const SYNC_TOPIC: &str = "0x1c411e9a96e071241c2f21f7726b17ae89e3cab4c78be50e062b03a9fffbbad1";

/// A Sync event observed on a watched pool.
///
/// Carries the pool's post-event reserves for logging; the watcher treats
/// the event as a refresh trigger, not as authoritative state (the event
/// has no liquidity-token supply, so a full fetch follows anyway).
#[derive(Debug, Clone, Copy)]
pub struct SyncNudge {
    /// The pair contract that emitted the event
    pub pool: Address,
    /// Reserve of token0 after the event
    pub reserve0: U256,
    /// Reserve of token1 after the event
    pub reserve1: U256,
}

/// Subscribes to Sync events from the network
///
/// Listens for Sync events from Uniswap V2 pairs, filters them to the
/// watched pool addresses, and nudges the watcher over the channel.
/// Returns when the stream or the receiving side closes.
///
/// # Arguments
/// * `ws_url` - The WebSocket endpoint
/// * `watched` - Pair contract addresses worth a nudge
/// * `nudges` - Channel into the watcher
///
/// # Errors
/// * If the WebSocket connection cannot be established
/// * If the subscription request fails
pub async fn subscribe_to_sync(
    ws_url: &str,
    watched: HashSet<Address>,
    nudges: mpsc::Sender<SyncNudge>,
) -> Result<()> {
    let subscribe_request = json!({
        "jsonrpc": "2.0",
        "method": "eth_subscribe",
        "params": ["logs"],
        "id": 1
    });

    let mut ws_stream = send_ws_request(ws_url, subscribe_request.to_string()).await?;

    while let Some(msg) = ws_stream.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Err(e) => {
                log::error!("sync::subscriber: error receiving message: {e:?}");
                break;
            }
            _ => continue,
        };

        let json: Value = match serde_json::from_str(&text) {
            Ok(json) => json,
            Err(_) => continue,
        };

        // Get the log payload or continue
        let Some(result) = json.get("params").and_then(|params| params.get("result")) else {
            continue;
        };

        // Get first topic or continue
        let first_topic = match result
            .get("topics")
            .and_then(|topics| topics.as_array())
            .and_then(|topics| topics.first())
        {
            Some(topic) => topic,
            None => continue,
        };

        // Check if it matches our sync topic
        if first_topic.as_str() != Some(SYNC_TOPIC) {
            continue;
        }

        // Only pools we watch are worth a nudge
        let Some(pool) = result
            .get("address")
            .and_then(|address| address.as_str())
            .and_then(|address| Address::from_str(address).ok())
        else {
            continue;
        };
        if !watched.contains(&pool) {
            continue;
        }

        // Decode the reserve data
        let Some(nudge) = result
            .get("data")
            .and_then(|data| data.as_str())
            .and_then(|data| decode_reserves(pool, data))
        else {
            continue;
        };

        log::debug!(
            "sync::subscriber: Sync on {} (reserve0 {}, reserve1 {})",
            nudge.pool,
            nudge.reserve0,
            nudge.reserve1
        );

        if nudges.send(nudge).await.is_err() {
            // Watcher is gone, nothing left to nudge
            break;
        }
    }

    Ok(())
}

/// Decodes the two reserve words of a Sync event payload
fn decode_reserves(pool: Address, data: &str) -> Option<SyncNudge> {
    let bytes = hex::decode(data.trim_start_matches("0x")).ok()?;
    if bytes.len() < 64 {
        return None;
    }
    Some(SyncNudge {
        pool,
        reserve0: U256::from_be_slice(&bytes[0..32]),
        reserve1: U256::from_be_slice(&bytes[32..64]),
    })
}
