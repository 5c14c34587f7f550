use crate::models::Token;
use dashmap::DashMap;
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};
use tracing::debug;

/// Per-wallet-session state: the contract cache, the unknown-contract
/// discovery set and the attribution anchor. The three share one lifetime
/// and are cleared together by `reset`.
#[derive(Default)]
pub struct SessionState {
    // Concurrent additions race with lookups from other in-flight flows.
    contracts: DashMap<String, Token>,
    // Insertion-ordered; membership is an exact string check, so
    // case-mismatched duplicates are kept distinct.
    unknown_contracts: Mutex<Vec<String>>,
    wallet_addr: RwLock<Option<String>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_wallet_addr(&self, addr: &str) {
        let mut wallet = self
            .wallet_addr
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *wallet = Some(addr.to_string());
    }

    pub fn wallet_addr(&self) -> Option<String> {
        self.wallet_addr
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn insert_contract(&self, token: Token) {
        self.contracts.insert(token.key(), token);
    }

    pub fn token_for(&self, address: &str) -> Option<Token> {
        self.contracts
            .get(&address.to_lowercase())
            .map(|entry| entry.value().clone())
    }

    /// Record an address as an unknown contract. Returns false if it was
    /// already present.
    pub fn note_unknown(&self, address: &str) -> bool {
        let mut unknown = self.lock_unknown();
        if unknown.iter().any(|known| known == address) {
            return false;
        }
        unknown.push(address.to_string());
        debug!(address, total = unknown.len(), "noted unknown contract");
        true
    }

    /// Atomically reseed the unknown set, dropping exact duplicates while
    /// keeping first-seen order.
    pub fn replace_unknown(&self, addresses: Vec<String>) {
        let mut seeded: Vec<String> = Vec::with_capacity(addresses.len());
        for address in addresses {
            if !seeded.contains(&address) {
                seeded.push(address);
            }
        }
        *self.lock_unknown() = seeded;
    }

    pub fn unknown_contracts(&self) -> Vec<String> {
        self.lock_unknown().clone()
    }

    /// Clear the whole session. Both guards are held across the clear so no
    /// observer sees a fresh anchor next to stale discoveries.
    pub fn reset(&self) {
        let mut unknown = self.lock_unknown();
        let mut wallet = self
            .wallet_addr
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        self.contracts.clear();
        unknown.clear();
        *wallet = None;
    }

    fn lock_unknown(&self) -> MutexGuard<'_, Vec<String>> {
        self.unknown_contracts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
