//! Base-unit to display-unit formatting for the supported chains.
//!
//! Only encoding is provided: wallet values arrive as integers in the
//! chain's smallest unit and leave as decimal strings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ==============================================================================
// Chains and Units
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    #[default]
    Bitcoin,
    BitcoinCash,
    Handshake,
}

impl Chain {
    /// Decimal places between the smallest unit and one coin.
    pub fn exponent(self) -> u32 {
        match self {
            Self::Bitcoin | Self::BitcoinCash => 8,
            Self::Handshake => 6,
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bitcoin => write!(f, "bitcoin"),
            Self::BitcoinCash => write!(f, "bitcoincash"),
            Self::Handshake => write!(f, "handshake"),
        }
    }
}

impl FromStr for Chain {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bitcoin" => Ok(Self::Bitcoin),
            "bitcoincash" => Ok(Self::BitcoinCash),
            "handshake" => Ok(Self::Handshake),
            other => Err(CoreError::UnsupportedChain(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Smallest indivisible unit (satoshi, dollarydoo).
    Base,
    #[serde(alias = "bits")]
    Micro,
    Milli,
    #[default]
    #[serde(alias = "unit", alias = "currency")]
    Coin,
}

impl FromStr for Unit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "base" => Ok(Self::Base),
            "micro" | "bits" => Ok(Self::Micro),
            "milli" => Ok(Self::Milli),
            "coin" | "unit" | "currency" => Ok(Self::Coin),
            other => Err(CoreError::UnknownUnit(other.to_string())),
        }
    }
}

// ==============================================================================
// Formatting
// ==============================================================================

/// Chain/unit pair used to render amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AmountFormat {
    #[serde(default)]
    pub chain: Chain,
    #[serde(default)]
    pub unit: Unit,
}

impl AmountFormat {
    pub fn new(chain: Chain, unit: Unit) -> Self {
        Self { chain, unit }
    }

    pub fn exponent(&self) -> u32 {
        let exp = self.chain.exponent();
        match self.unit {
            Unit::Coin => exp,
            Unit::Milli => exp.saturating_sub(3),
            Unit::Micro => exp.saturating_sub(6),
            Unit::Base => 0,
        }
    }

    /// Render a smallest-unit value, e.g. `500000` sats as `0.005`.
    #[must_use]
    pub fn format(&self, value: u64) -> String {
        encode(value, self.exponent())
    }
}

/// Fixed-point encode with trailing fractional zeros trimmed, keeping at
/// least one fractional digit when `exp > 0`.
fn encode(value: u64, exp: u32) -> String {
    if exp == 0 {
        return value.to_string();
    }

    let mult = 10u64.pow(exp);
    let hi = value / mult;
    let lo = format!("{:0width$}", value % mult, width = exp as usize);
    let lo = lo.trim_end_matches('0');
    let lo = if lo.is_empty() { "0" } else { lo };

    format!("{hi}.{lo}")
}
