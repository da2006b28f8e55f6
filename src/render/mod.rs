//! # Render Module
//!
//! Terminal presentation of the view state. The renderer matches the view
//! state exhaustively and prints one of four fixed layouts; the [`Screen`]
//! wrapper deduplicates publishes so the layout is only reprinted when the
//! state actually changes.

use alloy::primitives::U256;
use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;

use crate::positions::aggregator::DerivedView;
use crate::positions::pair::TokenPair;
use crate::positions::view::{PositionView, ViewState};
use crate::utils::constants::LP_TOKEN_DECIMALS;

/// Formats a raw token amount as decimal units
#[must_use]
pub fn format_units(amount: U256, decimals: u32) -> BigDecimal {
    let digits = BigInt::parse_bytes(amount.to_string().as_bytes(), 10).unwrap_or_default();
    BigDecimal::new(digits, i64::from(decimals)).normalized()
}

/// Prints the layout for a view state
pub fn print_view(state: &ViewState) {
    match state {
        ViewState::Disconnected => {
            println!("Connect a wallet to view your liquidity positions.");
        }
        ViewState::Loading => {
            println!("Loading positions...");
        }
        ViewState::HasPositions(positions) => {
            println!("Active liquidity positions:");
            for position in positions {
                print_position(position);
            }
        }
        ViewState::Empty => {
            println!("No active liquidity positions. Pools you join will appear here.");
        }
    }
}

/// Prints one position line
fn print_position(position: &PositionView) {
    println!(
        "  {}  lp {}  reserves {} / {}  supply {}",
        position.pair,
        format_units(position.balance, LP_TOKEN_DECIMALS),
        position.reserves.reserve0,
        position.reserves.reserve1,
        format_units(position.reserves.total_supply, LP_TOKEN_DECIMALS),
    );
}

/// Publishes derived views, printing only on change.
pub struct Screen {
    /// The last published state
    last: Option<ViewState>,
    /// Pairs that were unavailable at the last publish
    last_unavailable: Vec<TokenPair>,
    /// Whether newly unavailable pairs get a warning
    warn_unavailable: bool,
}

impl Screen {
    /// Creates a screen.
    #[must_use]
    pub const fn new(warn_unavailable: bool) -> Self {
        Self {
            last: None,
            last_unavailable: Vec::new(),
            warn_unavailable,
        }
    }

    /// Publishes a derived view: reprints the layout when the state changed
    /// and, when configured, warns once per newly unavailable pair.
    pub fn publish(&mut self, view: &DerivedView) {
        if self.warn_unavailable {
            for pair in &view.unavailable {
                if !self.last_unavailable.contains(pair) {
                    log::warn!("render: reserves unavailable for {pair}, position hidden");
                }
            }
        }
        self.last_unavailable.clone_from(&view.unavailable);

        if self.last.as_ref() != Some(&view.state) {
            if let Some(previous) = &self.last {
                log::info!("render: view {previous} -> {}", view.state);
            }
            print_view(&view.state);
            self.last = Some(view.state.clone());
        }
    }
}
