#![allow(dead_code)]
//! Shorthand builders for position tests. Token tags like `"A"` are padded
//! into addresses so tests stay legible.

use std::collections::HashMap;

use alloy::primitives::{Address, U256};

use super::balances::BalanceSnapshot;
use super::liquidity::liquidity_token;
use super::pair::TokenPair;
use super::reserves::{PairReserves, ReserveBook, ReserveEntry};
use super::token::TokenId;

/// An address with the tag's bytes in its leading positions
pub fn addr(tag: &str) -> Address {
    let mut bytes = [0u8; 20];
    bytes[..tag.len()].copy_from_slice(tag.as_bytes());
    Address::from(bytes)
}

/// A token identified by a short tag
pub fn token(tag: &str) -> TokenId {
    TokenId::new(addr(tag))
}

/// A pair of two tagged tokens
#[allow(clippy::unwrap_used)]
pub fn pair(a: &str, b: &str) -> TokenPair {
    TokenPair::new(token(a), token(b)).unwrap()
}

/// A connected test wallet
pub fn account() -> Option<Address> {
    Some(addr("wallet"))
}

/// A settled balance snapshot keyed by each pair's liquidity token
pub fn funded(entries: &[(TokenPair, u64)]) -> BalanceSnapshot {
    let balances: HashMap<_, _> = entries
        .iter()
        .map(|(pair, balance)| (liquidity_token(pair), U256::from(*balance)))
        .collect();
    BalanceSnapshot::settled(balances)
}

/// A ready reserve entry
pub fn ready(reserve0: u64, reserve1: u64, total_supply: u64) -> ReserveEntry {
    ReserveEntry::Ready(PairReserves {
        reserve0: U256::from(reserve0),
        reserve1: U256::from(reserve1),
        total_supply: U256::from(total_supply),
    })
}

/// A reserve book pre-populated with the given entries
pub fn book(entries: &[(TokenPair, ReserveEntry)]) -> ReserveBook {
    let mut book = ReserveBook::default();
    for (pair, entry) in entries {
        book.record(*pair, *entry);
    }
    book
}
