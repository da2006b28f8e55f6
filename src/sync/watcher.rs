//! The evaluation loop.
//!
//! A single task owns every input snapshot and re-runs the pure pipeline on
//! each change: once per poll interval (with jitter, so a fleet of watchers
//! does not phase-lock on an RPC endpoint) and early whenever the Sync
//! subscription nudges it. Within one cycle the pipeline always runs
//! start-to-finish before a state is published; there is no partial view.

use std::collections::HashSet;
use std::time::Duration;

use alloy::primitives::Address;
use eyre::Result;
use tokio::sync::mpsc;

use crate::positions::aggregator::{
    candidates, derive_view, with_liquidity_tokens, DerivedView, TrackedPair,
};
use crate::positions::balances::BalanceSnapshot;
use crate::positions::pair::TokenPair;
use crate::positions::reserves::ReserveBook;
use crate::positions::token::TokenId;
use crate::render::Screen;
use crate::sync::balances::fetch_balances;
use crate::sync::reserves::fetch_reserves;
use crate::sync::subscriber::{subscribe_to_sync, SyncNudge};
use crate::utils::app_context::AppContext;
use crate::watchlist::WatchList;

/// Capacity of the nudge channel; a burst beyond this is just dropped into
/// the next cycle anyway
const NUDGE_CHANNEL_SIZE: usize = 64;

/// Upper bound of the random addition to the poll interval
const POLL_JITTER_MS: u64 = 500;

/// Watches the account's positions until the process is stopped.
///
/// # Arguments
/// * `ctx` - Application context
/// * `watchlist` - The tracked pair provider
///
/// # Errors
/// * If a balance refresh fails at the transport level
pub async fn watch(ctx: &AppContext, watchlist: &WatchList) -> Result<()> {
    let tracked = with_liquidity_tokens(watchlist.pairs());
    // The original sender stays alive for the whole loop: with no subscriber
    // (or a dead one) the channel must stay open so the select branch parks
    // instead of resolving to None on every iteration.
    let (nudge_tx, mut nudge_rx) = mpsc::channel::<SyncNudge>(NUDGE_CHANNEL_SIZE);

    if let Some(ws_url) = ctx.config.ws_url.clone() {
        let watched: HashSet<Address> = tracked
            .iter()
            .map(|tracked| tracked.liquidity_token.address())
            .collect();
        let nudge_tx = nudge_tx.clone();
        tokio::spawn(async move {
            log::info!("sync::watcher: starting Sync subscription");
            if let Err(e) = subscribe_to_sync(&ws_url, watched, nudge_tx).await {
                log::error!("sync::watcher: subscription ended: {e}");
            }
        });
    }

    let mut screen = Screen::new(ctx.config.warn_unavailable);
    let mut balances = BalanceSnapshot::default();
    let mut reserves = ReserveBook::default();

    loop {
        run_cycle(ctx, &tracked, &mut balances, &mut reserves, &mut screen).await?;

        tokio::select! {
            () = tokio::time::sleep(poll_delay(ctx.config.poll_interval)) => {}
            nudge = nudge_rx.recv() => {
                if let Some(nudge) = nudge {
                    log::debug!("sync::watcher: refresh nudge for pool {}", nudge.pool);
                    // Coalesce a burst of events into one early cycle
                    while nudge_rx.try_recv().is_ok() {}
                }
            }
        }
    }
}

/// Runs one evaluation cycle: refresh balances, narrow the reserve book to
/// the new candidate set, fetch reserves for it, publishing the derived
/// view between the steps so loading states are visible.
async fn run_cycle(
    ctx: &AppContext,
    tracked: &[TrackedPair],
    balances: &mut BalanceSnapshot,
    reserves: &mut ReserveBook,
    screen: &mut Screen,
) -> Result<()> {
    let account = ctx.config.account;
    let pairs: Vec<TokenPair> = tracked.iter().map(|tracked| tracked.pair).collect();

    if account.is_some() && !tracked.is_empty() {
        balances.fetching = true;
        screen.publish(&derive_view(account, &pairs, balances, reserves));

        let tokens: Vec<TokenId> = tracked
            .iter()
            .map(|tracked| tracked.liquidity_token)
            .collect();
        match fetch_balances(ctx, account, &tokens).await {
            Ok(fetched) => *balances = BalanceSnapshot::settled(fetched),
            Err(e) => {
                log::error!("sync::watcher: balance refresh failed: {e}");
                balances.fetching = false;
            }
        }
    } else {
        // Disconnected or nothing tracked: nothing to fetch
        *balances = BalanceSnapshot::default();
    }

    let current = candidates(tracked, balances);
    let candidate_pairs: Vec<TokenPair> = current
        .iter()
        .map(|candidate| candidate.tracked.pair)
        .collect();

    // Requests for pairs that dropped out of the candidate set are stale
    reserves.narrow_to(&candidate_pairs);
    screen.publish(&derive_view(account, &pairs, balances, reserves));

    if !current.is_empty() {
        let fetched = fetch_reserves(ctx, &current).await;
        reserves.apply(fetched, &candidate_pairs);
    }
    screen.publish(&derive_view(account, &pairs, balances, reserves));

    Ok(())
}

/// Evaluates the view once, issuing at most one balance fetch and one
/// reserve fetch, and returns the derived view.
///
/// # Arguments
/// * `ctx` - Application context
/// * `watchlist` - The tracked pair provider
///
/// # Errors
/// * If the balance fetch fails at the transport level
pub async fn evaluate_once(ctx: &AppContext, watchlist: &WatchList) -> Result<DerivedView> {
    let account = ctx.config.account;
    let tracked = with_liquidity_tokens(watchlist.pairs());

    let mut balances = BalanceSnapshot::default();
    if account.is_some() && !tracked.is_empty() {
        let tokens: Vec<TokenId> = tracked
            .iter()
            .map(|tracked| tracked.liquidity_token)
            .collect();
        balances = BalanceSnapshot::settled(fetch_balances(ctx, account, &tokens).await?);
    }

    let current = candidates(&tracked, &balances);
    let mut reserves = ReserveBook::default();
    if !current.is_empty() {
        let candidate_pairs: Vec<TokenPair> = current
            .iter()
            .map(|candidate| candidate.tracked.pair)
            .collect();
        reserves.apply(fetch_reserves(ctx, &current).await, &candidate_pairs);
    }

    Ok(derive_view(account, watchlist.pairs(), &balances, &reserves))
}

/// The delay before the next scheduled cycle
fn poll_delay(base: Duration) -> Duration {
    base + Duration::from_millis(fastrand::u64(0..=POLL_JITTER_MS))
}
