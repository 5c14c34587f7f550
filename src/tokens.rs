use crate::models::{Asset, Token};
use crate::registry::TokensService;
use dashmap::DashMap;
use tracing::debug;

/// In-memory token registry keyed by lower-cased contract address. Suitable
/// for embedders that keep the tracked-token set resident; the sync cursor
/// on each token only ever advances.
#[derive(Default)]
pub struct TokenStore {
    tokens: DashMap<String, Token>,
    assets: DashMap<(String, String), Asset>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, token: Token) {
        self.tokens.insert(token.key(), token);
    }

    pub fn remove(&self, address: &str) -> Option<Token> {
        self.tokens
            .remove(&address.to_lowercase())
            .map(|(_, token)| token)
    }

    pub fn last_block(&self, address: &str) -> Option<u64> {
        self.tokens
            .get(&address.to_lowercase())
            .map(|entry| entry.last_block)
    }

    pub fn asset(&self, token_address: &str, token_id: &str) -> Option<Asset> {
        self.assets
            .get(&(token_address.to_lowercase(), token_id.to_string()))
            .map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl TokensService for TokenStore {
    fn get_token(&self, address: &str) -> Option<Token> {
        self.tokens
            .get(&address.to_lowercase())
            .map(|entry| entry.value().clone())
    }

    fn token_contract_updated(&self, token: &Token, block_number: u64) {
        if let Some(mut entry) = self.tokens.get_mut(&token.key()) {
            // The cursor never regresses, even if a late batch only carried
            // older transactions.
            if block_number > entry.last_block {
                debug!(
                    address = %entry.address(),
                    block_number,
                    "advanced sync cursor"
                );
                entry.last_block = block_number;
            }
        }
    }

    fn store_asset(&self, token: &Token, token_id: &str, asset: Asset) {
        self.assets
            .insert((token.key(), token_id.to_string()), asset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TokenInfo;

    fn token(address: &str) -> Token {
        Token {
            info: TokenInfo {
                address: address.to_string(),
                name: "Test Token".to_string(),
                symbol: "TST".to_string(),
                decimals: 18,
            },
            chain_id: 1,
            last_block: 0,
        }
    }

    const ADDR: &str = "0xAbCd000000000000000000000000000000000001";

    #[test]
    fn lookup_is_case_insensitive() {
        let store = TokenStore::new();
        store.add(token(ADDR));
        assert!(store.get_token(&ADDR.to_uppercase().replace("0X", "0x")).is_some());
        assert!(store.get_token(&ADDR.to_lowercase()).is_some());
    }

    #[test]
    fn sync_cursor_only_advances() {
        let store = TokenStore::new();
        let t = token(ADDR);
        store.add(t.clone());

        store.token_contract_updated(&t, 1500);
        assert_eq!(store.last_block(ADDR), Some(1500));

        // A later batch of older transactions must not move it back.
        store.token_contract_updated(&t, 1200);
        assert_eq!(store.last_block(ADDR), Some(1500));

        store.token_contract_updated(&t, 1501);
        assert_eq!(store.last_block(ADDR), Some(1501));
    }

    #[test]
    fn cursor_report_for_untracked_token_is_ignored() {
        let store = TokenStore::new();
        let t = token(ADDR);
        store.token_contract_updated(&t, 1500);
        assert_eq!(store.last_block(ADDR), None);
    }

    #[test]
    fn remove_drops_tracking() {
        let store = TokenStore::new();
        store.add(token(ADDR));
        assert_eq!(store.len(), 1);

        let removed = store.remove(&ADDR.to_uppercase().replace("0X", "0x")).unwrap();
        assert_eq!(removed.address(), ADDR);
        assert!(store.is_empty());
        assert!(store.get_token(ADDR).is_none());
    }

    #[test]
    fn assets_round_trip() {
        let store = TokenStore::new();
        let t = token(ADDR);
        store.add(t.clone());
        store.store_asset(
            &t,
            "42",
            Asset {
                token_id: "42".to_string(),
                name: Some("Kitty".to_string()),
                image_url: None,
            },
        );

        let asset = store.asset(ADDR, "42").unwrap();
        assert_eq!(asset.name.as_deref(), Some("Kitty"));
        assert!(store.asset(ADDR, "43").is_none());
    }
}
