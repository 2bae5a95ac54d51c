//! Shared test helpers for `uxtx-core` unit tests.
//!
//! Builders for wallet coins and transactions (`known_coin`, `foreign_coin`,
//! `make_tx`), serialized transaction fixtures, and a decoder that counts
//! how often it is asked to decode.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bitcoin::absolute::LockTime;
use bitcoin::consensus::encode::serialize_hex;
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};

use crate::decode::{DecodedTx, TxDecoder};
use crate::types::{Coin, CoinPath, RawTransaction};

// ==============================================================================
// Coin Builders
// ==============================================================================

/// A coin the wallet controls.
pub fn known_coin(address: &str, value: u64, account: &str, change: bool) -> Coin {
    Coin {
        address: Some(address.to_string()),
        value,
        path: Some(CoinPath {
            name: account.to_string(),
            change,
            account: Some(0),
            derivation: None,
        }),
    }
}

/// A coin belonging to someone else.
pub fn foreign_coin(address: &str, value: u64) -> Coin {
    Coin {
        address: Some(address.to_string()),
        value,
        path: None,
    }
}

/// The lone input of a coinbase transaction: no address, no path.
pub fn coinbase_input() -> Coin {
    Coin {
        address: None,
        value: 0,
        path: None,
    }
}

// ==============================================================================
// Transaction Builders
// ==============================================================================

/// Build a confirmed `RawTransaction` with sane defaults. Override
/// individual fields after construction when needed.
pub fn make_tx(hash: &str, inputs: Vec<Coin>, outputs: Vec<Coin>) -> RawTransaction {
    RawTransaction {
        hash: hash.to_string(),
        date: None,
        confirmations: 1,
        fee: 0,
        rate: 0,
        size: 250,
        height: 100,
        block: None,
        tx: None,
        inputs,
        outputs,
    }
}

fn sample_transaction(witness: Witness) -> Transaction {
    // Minimal valid P2WPKH scriptPubKey: OP_0 PUSH20 <20-byte-hash>.
    let script_bytes = [
        0x00, 0x14, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
        0x0e, 0x0f, 0x10, 0x11, 0x12, 0x13, 0x14,
    ];
    Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness,
        }],
        output: vec![TxOut {
            value: Amount::from_sat(5_000),
            script_pubkey: ScriptBuf::from_bytes(script_bytes.to_vec()),
        }],
    }
}

/// Hex of a transaction without witness data.
pub fn legacy_tx_hex() -> String {
    serialize_hex(&sample_transaction(Witness::new()))
}

/// Hex of a transaction whose only input carries a witness.
pub fn segwit_tx_hex() -> String {
    serialize_hex(&sample_transaction(Witness::from_slice(&[
        vec![0x30; 71],
        vec![0x02; 33],
    ])))
}

// ==============================================================================
// Decoders
// ==============================================================================

/// Decoder that records every call and reports a fixed result, used to
/// observe whether a transaction was classified again.
#[derive(Debug, Clone, Default)]
pub struct CountingDecoder {
    calls: Arc<AtomicUsize>,
}

impl CountingDecoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TxDecoder for CountingDecoder {
    fn decode(&self, _raw_hex: &str) -> Option<DecodedTx> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Some(DecodedTx {
            weight: 560,
            has_witness: false,
        })
    }
}
