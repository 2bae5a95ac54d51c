//! Domain types for uxtx's transaction classification model.
//!
//! Contains the wallet-annotated input types (`RawTransaction`, `Coin`,
//! `CoinPath`), the category enum `UxType`, and the `DisplayRecord`
//! produced for UI consumption.

use serde::{Deserialize, Serialize};

// ==============================================================================
// Wallet Coins
// ==============================================================================

/// Wallet path metadata attached to a coin the local wallet controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinPath {
    /// Account name.
    pub name: String,
    #[serde(default)]
    pub change: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derivation: Option<String>,
}

/// A transaction input or output as reported by the wallet.
///
/// `path` is only present when the wallet controls the coin; that presence
/// is the sole definition of a "known" coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    #[serde(default)]
    pub address: Option<String>,
    /// Value in the chain's smallest unit.
    #[serde(default)]
    pub value: u64,
    #[serde(default)]
    pub path: Option<CoinPath>,
}

impl Coin {
    pub fn is_known(&self) -> bool {
        self.path.is_some()
    }

    pub fn is_change(&self) -> bool {
        self.path.as_ref().is_some_and(|path| path.change)
    }

    /// Account name of a known coin, `None` for foreign coins.
    pub fn account_name(&self) -> Option<&str> {
        self.path.as_ref().map(|path| path.name.as_str())
    }
}

// ==============================================================================
// Raw Transaction
// ==============================================================================

/// A wallet history entry, shaped like the JSON a bcoin-family wallet
/// returns. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub hash: String,
    /// RFC 3339 timestamp.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub confirmations: i64,
    #[serde(default)]
    pub fee: u64,
    #[serde(default)]
    pub rate: u64,
    #[serde(default)]
    pub size: u64,
    /// Block height, `-1` while unconfirmed.
    #[serde(default = "unconfirmed_height")]
    pub height: i64,
    #[serde(default)]
    pub block: Option<String>,
    /// Raw serialized transaction, hex encoded.
    #[serde(default)]
    pub tx: Option<String>,
    #[serde(default)]
    pub inputs: Vec<Coin>,
    #[serde(default)]
    pub outputs: Vec<Coin>,
}

fn unconfirmed_height() -> i64 {
    -1
}

// ==============================================================================
// Classification
// ==============================================================================

/// The user-facing category of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UxType {
    Coinbase,
    Deposit,
    Withdraw,
    Unknown,
}

impl UxType {
    /// Whether funds flow into the wallet.
    pub fn is_incoming(self) -> bool {
        matches!(self, Self::Deposit | Self::Coinbase)
    }

    /// Sign prefix used when rendering the amount.
    pub fn sign(self) -> &'static str {
        match self {
            Self::Unknown => "",
            _ if self.is_incoming() => "+",
            _ => "-",
        }
    }
}

// ==============================================================================
// Display Record
// ==============================================================================

/// The presentation-ready view of one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub hash: String,
    /// Formatted date; `None` when the wallet reported no date.
    pub date: Option<String>,
    /// Signed decimal amount, e.g. `+0.005`.
    pub amount: String,
    pub wallet: Option<String>,
    pub accounts: Vec<Option<String>>,
    pub account: String,
    pub account_label: String,
    pub confirmations: i64,
    pub recipients: Vec<String>,
    pub address_label: String,
    pub is_segwit: bool,
    pub is_coinbase: bool,
    /// Display label of the category.
    pub uxtype: String,
    /// Transaction weight; `None` when the raw transaction was unavailable.
    pub weight: Option<u64>,
    pub input_amount: String,
    pub output_amount: String,
    pub fee: u64,
    pub rate: u64,
    pub size: u64,
    pub block: Option<String>,
    pub height: i64,
    pub tx: Option<String>,
    pub inputs: Vec<Coin>,
    pub outputs: Vec<Coin>,
}
