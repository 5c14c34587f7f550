//! Transaction ingestion and contract-attribution pipeline for a token
//! wallet: decodes ABI-encoded call input, decides whether the wallet is a
//! party to each transaction, grows the unknown-contract discovery set and
//! tracks per-token high-water-mark blocks for incremental sync.

pub mod attribution;
pub mod calls;
pub mod decoder;
pub mod models;
pub mod reconciler;
pub mod registry;
pub mod session;
pub mod tokens;

pub use decoder::{DecodedArgs, DecodedInput, FunctionCall, decode_input};
pub use models::{
    Asset, NetworkInfo, Operation, Token, TokenInfo, TokenTransaction, Transaction, Wallet,
};
pub use reconciler::TokenReconciler;
pub use registry::{ChainDataSource, TokenRepository, TokensService};
pub use session::SessionState;
pub use tokens::TokenStore;
