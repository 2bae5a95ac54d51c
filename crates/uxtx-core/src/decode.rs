//! Raw transaction decoding.
//!
//! The wallet JSON carries the serialized transaction as hex. Witness
//! presence and weight are only visible in that encoding, so the classifier
//! asks a [`TxDecoder`] for them instead of re-deriving them from the JSON.

use bitcoin::consensus::encode::deserialize_hex;
use bitcoin::Transaction;

/// Facts read from the serialized transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedTx {
    pub weight: u64,
    pub has_witness: bool,
}

impl From<&Transaction> for DecodedTx {
    fn from(tx: &Transaction) -> Self {
        Self {
            weight: tx.weight().to_wu(),
            has_witness: tx.input.iter().any(|input| !input.witness.is_empty()),
        }
    }
}

/// Decodes raw transaction hex. Returns `None` when the bytes are not a
/// transaction this decoder understands.
pub trait TxDecoder: Send + Sync {
    fn decode(&self, raw_hex: &str) -> Option<DecodedTx>;
}

/// Decoder for Bitcoin (and Bitcoin Cash, which shares the legacy
/// serialization) transactions. Delegates to the `bitcoin` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitcoinDecoder;

impl TxDecoder for BitcoinDecoder {
    fn decode(&self, raw_hex: &str) -> Option<DecodedTx> {
        deserialize_hex::<Transaction>(raw_hex)
            .ok()
            .map(|tx| DecodedTx::from(&tx))
    }
}
