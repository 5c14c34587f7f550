use crate::attribution::wallet_involved;
use crate::decoder::decode_input;
use crate::models::{NetworkInfo, Token, TokenInfo, TokenTransaction, Transaction, Wallet};
use crate::registry::{TokenRepository, TokensService};
use crate::session::SessionState;
use anyhow::Result;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

// Batches run on spawned tasks; yielding this often keeps them promptly
// abortable mid-run.
const YIELD_STRIDE: usize = 64;

/// Transaction ingestion front-end: attribution of token-transaction
/// batches, unknown-contract discovery and sync-cursor reporting, all on
/// background tasks. One instance per wallet session.
pub struct TokenReconciler {
    repository: Arc<dyn TokenRepository>,
    session: Arc<SessionState>,
}

impl TokenReconciler {
    pub fn new(repository: Arc<dyn TokenRepository>) -> Self {
        TokenReconciler {
            repository,
            session: Arc::new(SessionState::new()),
        }
    }

    pub fn set_wallet_addr(&self, addr: &str) {
        self.session.set_wallet_addr(addr);
    }

    /// Drop the contract cache, the unknown-contract set and the wallet
    /// anchor together. Call when the wallet session ends.
    pub fn clear_all(&self) {
        self.session.reset();
    }

    /// Seed the local contract cache.
    pub fn add_token_to_map(&self, token: Token) {
        self.session.insert_contract(token);
    }

    pub fn token_for(&self, address: &str) -> Option<Token> {
        self.session.token_for(address)
    }

    /// Filter a token's transaction batch down to those the wallet is a
    /// party to, and report the highest parsed block number to the registry
    /// so incremental sync resumes past it.
    ///
    /// Runs on a spawned task; await the handle from the consuming context.
    /// `abort()` cancels a run that should no longer report. Malformed
    /// block numbers are skipped and never fail the batch.
    pub fn reconcile(
        &self,
        wallet: Wallet,
        batch: Vec<TokenTransaction>,
        tokens: Arc<dyn TokensService>,
    ) -> JoinHandle<Vec<Transaction>> {
        let session = Arc::clone(&self.session);
        tokio::spawn(async move {
            let total = batch.len();
            let anchor = session.wallet_addr();
            let mut relevant: Vec<Transaction> = Vec::new();
            let mut token: Option<Token> = None;
            let mut highest_block = 0u64;

            for (i, pair) in batch.into_iter().enumerate() {
                if i % YIELD_STRIDE == 0 {
                    tokio::task::yield_now().await;
                }

                let tx = pair.transaction;
                token = Some(pair.token);

                match tx.block_number.trim().parse::<u64>() {
                    Ok(block) if block > highest_block => highest_block = block,
                    Ok(_) => {}
                    Err(_) => {
                        debug!(
                            hash = %tx.hash,
                            block_number = %tx.block_number,
                            "skipping unparsable block number"
                        );
                    }
                }

                let decoded = decode_input(&tx.input);
                if wallet_involved(&tx, &decoded, &wallet, anchor.as_deref()) {
                    relevant.push(tx);
                }
            }

            if highest_block > 0 {
                if let Some(token) = token {
                    info!(
                        address = %token.address(),
                        highest_block,
                        "reporting batch high-water mark"
                    );
                    tokens.token_contract_updated(&token, highest_block);
                }
            }

            info!("Batch processed: {} relevant of {} transactions", relevant.len(), total);
            relevant
        })
    }

    /// Second pass over transactions not tied to a known token: collect
    /// destination contracts absent from both the local cache and the
    /// registry into the unknown set. Every transaction passes through
    /// unchanged; this stage is not a filter.
    pub fn classify_remaining(
        &self,
        transactions: Vec<Transaction>,
        tokens: Arc<dyn TokensService>,
    ) -> JoinHandle<Vec<Transaction>> {
        let session = Arc::clone(&self.session);
        tokio::spawn(async move {
            for (i, tx) in transactions.iter().enumerate() {
                if i % YIELD_STRIDE == 0 {
                    tokio::task::yield_now().await;
                }
                if tx.input.is_empty() {
                    continue;
                }
                let decoded = decode_input(&tx.input);
                if !tx.is_constructor && !decoded.has_function_data() {
                    continue;
                }
                let Some(to) = tx.to.as_deref() else {
                    continue;
                };
                let known = session.token_for(to).is_some() || tokens.get_token(to).is_some();
                if !known {
                    session.note_unknown(to);
                }
            }
            transactions
        })
    }

    /// Reseed the unknown-contract set from a candidate manifest, keeping
    /// only addresses the registry does not track, in original order.
    pub fn setup_unknown_list(&self, tokens: &dyn TokensService, candidates: &[String]) {
        let fresh: Vec<String> = candidates
            .iter()
            .filter(|address| tokens.get_token(address).is_none())
            .cloned()
            .collect();
        info!("Seeded unknown contract list with {} candidates", fresh.len());
        self.session.replace_unknown(fresh);
    }

    pub fn unknown_contracts(&self) -> Vec<String> {
        self.session.unknown_contracts()
    }

    /// Fetch fresh metadata for a contract through the repository.
    pub async fn add_token(&self, address: &str) -> Result<TokenInfo> {
        self.repository.update(address).await
    }

    pub async fn add_tokens(&self, addresses: &[String]) -> Result<Vec<TokenInfo>> {
        self.repository.update_batch(addresses).await
    }

    /// Remove a token from tracking; returns it for downstream chaining.
    pub async fn terminate_token(
        &self,
        token: Token,
        wallet: &Wallet,
        network: &NetworkInfo,
    ) -> Result<Token> {
        self.repository
            .terminate_token(&token, wallet, network)
            .await?;
        Ok(token)
    }
}
