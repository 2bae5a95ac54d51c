//! Human-readable labels used when rendering classified transactions.
//!
//! Labels are keyed by the upper-case names a host UI already uses
//! (`WITHDRAW`, `MULTIPLE_ADDRESS`, ...). Several defaults share the same
//! text but are kept as separate keys so a host can tune each one.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::types::UxType;

/// Keys every labels object must provide.
pub const REQUIRED_LABEL_KEYS: [&str; 8] = [
    "WITHDRAW",
    "DEPOSIT",
    "COINBASE",
    "MULTIPLE_OUTPUT",
    "MULTIPLE_ADDRESS",
    "MULTIPLE_ACCOUNT",
    "UNKNOWN_ADDRESS",
    "UNKNOWN_ACCOUNT",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ClassificationLabels {
    pub withdraw: String,
    pub deposit: String,
    pub coinbase: String,
    pub multiple_output: String,
    pub multiple_address: String,
    pub multiple_account: String,
    pub unknown_address: String,
    pub unknown_account: String,
    /// Label for transactions no heuristic could classify.
    #[serde(default = "default_unknown_label")]
    pub unknown: String,
}

fn default_unknown_label() -> String {
    "Unknown".into()
}

impl Default for ClassificationLabels {
    fn default() -> Self {
        Self {
            withdraw: "Sent".into(),
            deposit: "Received".into(),
            coinbase: "Coinbase".into(),
            multiple_output: "Multiple".into(),
            multiple_address: "Multiple".into(),
            multiple_account: "Multiple".into(),
            unknown_address: "Unknown".into(),
            unknown_account: "Unknown".into(),
            unknown: default_unknown_label(),
        }
    }
}

impl ClassificationLabels {
    /// Build labels from a host-supplied JSON object.
    ///
    /// Every value must be a string, including keys this crate does not
    /// use, and every key in [`REQUIRED_LABEL_KEYS`] must be present.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        let map = value.as_object().ok_or(CoreError::InvalidLabels)?;

        if let Some((key, _)) = map.iter().find(|(_, v)| !v.is_string()) {
            return Err(CoreError::InvalidLabel { key: key.clone() });
        }
        if let Some(key) = REQUIRED_LABEL_KEYS
            .iter()
            .find(|key| !map.contains_key(**key))
        {
            return Err(CoreError::MissingLabel {
                key: (*key).to_string(),
            });
        }

        Ok(serde_json::from_value(value.clone())?)
    }

    /// Display label for a transaction category.
    pub fn for_type(&self, ux_type: UxType) -> &str {
        match ux_type {
            UxType::Coinbase => &self.coinbase,
            UxType::Deposit => &self.deposit,
            UxType::Withdraw => &self.withdraw,
            UxType::Unknown => &self.unknown,
        }
    }
}
