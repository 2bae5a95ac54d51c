//! Batch classification with a hash-keyed cache.
//!
//! [`TxManager`] turns wallet history into display records. By default
//! each transaction goes through a [`Uxtx`] classifier and the result is
//! cached by hash until [`TxManager::refresh`]. A [`CustomParser`] can be
//! configured instead, in which case the manager hands the whole batch to
//! it and neither classifies nor caches anything itself.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::ParsedCache;
use crate::error::CoreError;
use crate::labels::ClassificationLabels;
use crate::options::{DateFormat, TxManagerOptions};
use crate::types::{DisplayRecord, RawTransaction};
use crate::uxtx::Uxtx;

// ==============================================================================
// Custom Parsing Strategy
// ==============================================================================

/// Replacement for the built-in classification.
///
/// Must return exactly one record per input transaction; the manager
/// reports any other length as [`CoreError::CustomParserLength`].
pub trait CustomParser: Send + Sync {
    fn parse(
        &self,
        transactions: &[RawTransaction],
        wallet: Option<&str>,
        bust: bool,
    ) -> Vec<DisplayRecord>;
}

impl<F> CustomParser for F
where
    F: Fn(&[RawTransaction], Option<&str>, bool) -> Vec<DisplayRecord> + Send + Sync,
{
    fn parse(
        &self,
        transactions: &[RawTransaction],
        wallet: Option<&str>,
        bust: bool,
    ) -> Vec<DisplayRecord> {
        self(transactions, wallet, bust)
    }
}

// ==============================================================================
// Manager
// ==============================================================================

/// Classifies batches of wallet transactions and caches the results.
///
/// A manager has one logical owner; `parse` takes `&mut self` and callers
/// sharing one across threads must wrap it in a lock.
#[derive(Debug)]
pub struct TxManager {
    options: TxManagerOptions,
    cache: ParsedCache,
}

impl Default for TxManager {
    fn default() -> Self {
        Self::new(TxManagerOptions::default())
    }
}

impl TxManager {
    pub fn new(options: TxManagerOptions) -> Self {
        Self {
            options,
            cache: ParsedCache::new(),
        }
    }

    /// Build a manager from host JSON options.
    /// See [`TxManagerOptions::from_value`].
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        TxManagerOptions::from_value(value).map(Self::new)
    }

    pub fn labels(&self) -> &ClassificationLabels {
        &self.options.labels
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.options.date_format
    }

    pub fn has_custom_parser(&self) -> bool {
        self.options.custom.is_some()
    }

    /// Drop every cached record.
    pub fn refresh(&mut self) {
        tracing::debug!(entries = self.cache.len(), "clearing parsed transaction cache");
        self.cache.clear();
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_cached(&self, hash: &str) -> bool {
        self.cache.contains(hash)
    }

    /// Classify `transactions` into display records, in input order.
    ///
    /// Cached records are reused unless `bust` is set. `wallet` is echoed
    /// into freshly built records; a cache hit keeps the wallet it was
    /// parsed with.
    pub fn parse(
        &mut self,
        transactions: &[RawTransaction],
        wallet: Option<&str>,
        bust: bool,
    ) -> Result<Vec<DisplayRecord>, CoreError> {
        if let Some(custom) = &self.options.custom {
            let records = custom.parse(transactions, wallet, bust);
            if records.len() != transactions.len() {
                return Err(CoreError::CustomParserLength {
                    expected: transactions.len(),
                    actual: records.len(),
                });
            }
            return Ok(records);
        }

        let Self { options, cache } = self;
        let ctx = options.context(wallet);
        let mut hits = 0usize;

        let records = transactions
            .iter()
            .map(|tx| {
                if !bust {
                    if let Some(cached) = cache.get(&tx.hash) {
                        hits += 1;
                        return cached.clone();
                    }
                }

                let record = Uxtx::new(tx, ctx).to_record();
                cache.insert(tx.hash.clone(), record.clone());
                record
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            total = records.len(),
            cache_hits = hits,
            bust,
            "parsed wallet transactions"
        );
        Ok(records)
    }

    /// Classify a JSON list of wallet transactions.
    ///
    /// Anything other than an array is rejected before any work is done.
    pub fn parse_value(
        &mut self,
        value: &Value,
        wallet: Option<&str>,
        bust: bool,
    ) -> Result<Vec<DisplayRecord>, CoreError> {
        let items = value.as_array().ok_or(CoreError::NotAnArray)?;
        let transactions = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                RawTransaction::deserialize(item).map_err(|err| CoreError::InvalidTransaction {
                    index,
                    message: err.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.parse(&transactions, wallet, bust)
    }
}
