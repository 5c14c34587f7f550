use crate::models::{Asset, NetworkInfo, Token, TokenInfo, Wallet};
use anyhow::Result;
use async_trait::async_trait;

/// The token registry: the set of contracts already tracked for the user.
/// A lookup miss is a normal outcome and drives unknown-contract discovery.
pub trait TokensService: Send + Sync {
    fn get_token(&self, address: &str) -> Option<Token>;

    /// A reconciliation batch observed `block_number` for `token`.
    /// Implementations keep the sync cursor monotonic; a stale report must
    /// not move it backwards.
    fn token_contract_updated(&self, token: &Token, block_number: u64);

    fn store_asset(&self, token: &Token, token_id: &str, asset: Asset);
}

/// Remote chain-data source supplying raw contract metadata.
#[async_trait]
pub trait ChainDataSource: Send + Sync {
    async fn fetch_token_info(&self, address: &str) -> Result<TokenInfo>;

    async fn fetch_token_info_batch(&self, addresses: &[String]) -> Result<Vec<TokenInfo>>;
}

/// Token persistence collaborator. Retry and deadline policy live behind
/// this interface, not in the core.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    async fn update(&self, address: &str) -> Result<TokenInfo>;

    async fn update_batch(&self, addresses: &[String]) -> Result<Vec<TokenInfo>>;

    async fn terminate_token(
        &self,
        token: &Token,
        wallet: &Wallet,
        network: &NetworkInfo,
    ) -> Result<()>;
}
