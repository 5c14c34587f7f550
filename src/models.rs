use serde::{Deserialize, Serialize};

/// Case-insensitive address comparison, tolerant of a missing `0x` prefix.
pub fn addr_eq(a: &str, b: &str) -> bool {
    let a = a.trim().trim_start_matches("0x").trim_start_matches("0X");
    let b = b.trim().trim_start_matches("0x").trim_start_matches("0X");
    !a.is_empty() && a.eq_ignore_ascii_case(b)
}

/// A mined chain transaction as delivered by the chain-data collaborator.
/// Read-only once constructed; `block_number` keeps the upstream string
/// encoding because it is not guaranteed to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub input: String,
    pub block_number: String,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

/// A sub-event within a transaction, e.g. one token transfer leg.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default)]
    pub kind: String,
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub value: String,
}

impl Operation {
    pub fn involves(&self, address: &str) -> bool {
        addr_eq(&self.from, address) || addr_eq(&self.to, address)
    }
}

/// Raw contract metadata supplied by the chain-data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// A contract the registry already tracks. `last_block` is the incremental
/// sync cursor and only ever advances.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub info: TokenInfo,
    pub chain_id: u64,
    #[serde(default)]
    pub last_block: u64,
}

impl Token {
    pub fn address(&self) -> &str {
        &self.info.address
    }

    /// Normalized map key: lower-cased address.
    pub fn key(&self) -> String {
        self.info.address.to_lowercase()
    }
}

/// An ERC-721/1155 asset captured for a tracked token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub token_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The user's identity; the attribution anchor for one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub name: String,
    pub chain_id: u64,
}

/// One batch pair: a transaction fetched against a known token.
#[derive(Debug, Clone)]
pub struct TokenTransaction {
    pub token: Token,
    pub transaction: Transaction,
}
