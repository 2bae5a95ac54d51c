//! Per-transaction classification.
//!
//! A [`Uxtx`] wraps one wallet transaction and derives what a user wants
//! to see about it: whether it was sent, received, or mined, how much
//! moved, and who the other side was. Derived fields are computed on first
//! access and memoized for the life of the instance.

use std::borrow::Cow;
use std::cell::OnceCell;

use serde_json::Value;

use crate::decode::DecodedTx;
use crate::error::CoreError;
use crate::labels::ClassificationLabels;
use crate::options::ClassifierContext;
use crate::types::{Coin, DisplayRecord, RawTransaction, UxType};

pub struct Uxtx<'a> {
    tx: Cow<'a, RawTransaction>,
    ctx: ClassifierContext<'a>,
    ux_type: OnceCell<UxType>,
    counterparty: OnceCell<String>,
    recipients: OnceCell<Vec<String>>,
    accounts: OnceCell<Vec<Option<String>>>,
    account: OnceCell<String>,
    decoded: OnceCell<Option<DecodedTx>>,
}

impl<'a> Uxtx<'a> {
    pub fn new(tx: &'a RawTransaction, ctx: ClassifierContext<'a>) -> Self {
        Self::from_cow(Cow::Borrowed(tx), ctx)
    }

    /// Build from wallet JSON. A `null` value means the caller had no
    /// transaction to give, which is reported rather than defaulted.
    pub fn from_value(value: Value, ctx: ClassifierContext<'a>) -> Result<Self, CoreError> {
        if value.is_null() {
            return Err(CoreError::MissingTransaction);
        }
        let tx: RawTransaction = serde_json::from_value(value)?;
        Ok(Self::from_cow(Cow::Owned(tx), ctx))
    }

    fn from_cow(tx: Cow<'a, RawTransaction>, ctx: ClassifierContext<'a>) -> Self {
        Self {
            tx,
            ctx,
            ux_type: OnceCell::new(),
            counterparty: OnceCell::new(),
            recipients: OnceCell::new(),
            accounts: OnceCell::new(),
            account: OnceCell::new(),
            decoded: OnceCell::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn transaction(&self) -> &RawTransaction {
        &self.tx
    }

    pub fn labels(&self) -> &ClassificationLabels {
        self.ctx.labels
    }

    pub fn wallet(&self) -> Option<&str> {
        self.ctx.wallet
    }

    pub fn known_inputs(&self) -> impl Iterator<Item = &Coin> {
        known_coins(&self.tx.inputs)
    }

    pub fn known_outputs(&self) -> impl Iterator<Item = &Coin> {
        known_coins(&self.tx.outputs)
    }

    pub fn change_outputs(&self) -> impl Iterator<Item = &Coin> {
        self.tx.outputs.iter().filter(is_change)
    }

    /// Outputs paying someone other than the wallet's own change: foreign
    /// outputs plus known outputs that are not change.
    fn non_change_outputs(&self) -> impl Iterator<Item = &Coin> {
        self.tx.outputs.iter().filter(is_not_change)
    }

    // ========================================================================
    // Classification
    // ========================================================================

    /// A single input without an address can only be a block reward.
    pub fn is_coinbase(&self) -> bool {
        self.tx.inputs.len() == 1 && self.tx.inputs[0].address.is_none()
    }

    /// Nothing spent by the wallet and no change returned to it.
    fn is_deposit(&self) -> bool {
        self.known_inputs().next().is_none() && self.change_outputs().next().is_none()
    }

    /// Wallet coins spent with change coming back.
    fn is_withdraw(&self) -> bool {
        self.known_inputs().next().is_some() && self.change_outputs().next().is_some()
    }

    pub fn ux_type(&self) -> UxType {
        *self.ux_type.get_or_init(|| {
            if self.is_coinbase() {
                UxType::Coinbase
            } else if self.is_deposit() {
                UxType::Deposit
            } else if self.is_withdraw() {
                UxType::Withdraw
            } else {
                tracing::warn!(
                    hash = %self.tx.hash,
                    "transaction matched no classification heuristic"
                );
                UxType::Unknown
            }
        })
    }

    // ========================================================================
    // Amounts
    // ========================================================================

    /// Smallest-unit value moved from the wallet's point of view.
    pub fn amount_value(&self) -> u64 {
        match self.ux_type() {
            UxType::Deposit => sum_values(self.known_outputs()),
            UxType::Withdraw => sum_values(self.known_inputs()),
            UxType::Coinbase => sum_values(self.tx.outputs.iter()),
            UxType::Unknown => 0,
        }
    }

    /// Signed display amount, e.g. `+0.005` or `-0.001`.
    pub fn amount(&self) -> String {
        let ux_type = self.ux_type();
        format!(
            "{}{}",
            ux_type.sign(),
            self.ctx.amount_format.format(self.amount_value())
        )
    }

    // ========================================================================
    // Counterparty, Recipients, Accounts
    // ========================================================================

    /// The other side of the transaction, or a label when there is no
    /// single address to show.
    pub fn counterparty(&self) -> &str {
        self.counterparty.get_or_init(|| {
            let labels = self.ctx.labels;
            match self.ux_type() {
                UxType::Deposit => match self.recipients() {
                    [single] => single.clone(),
                    [] => labels.unknown_address.clone(),
                    _ => labels.multiple_address.clone(),
                },
                UxType::Withdraw => {
                    let mut candidates = self.non_change_outputs();
                    match (candidates.next(), candidates.next()) {
                        (Some(only), None) => only
                            .address
                            .clone()
                            .unwrap_or_else(|| labels.unknown_address.clone()),
                        (Some(_), Some(_)) => labels.multiple_address.clone(),
                        (None, _) => labels.unknown_address.clone(),
                    }
                }
                UxType::Coinbase => self
                    .tx
                    .outputs
                    .first()
                    .and_then(|output| output.address.clone())
                    .unwrap_or_else(|| labels.unknown_address.clone()),
                UxType::Unknown => labels.unknown_address.clone(),
            }
        })
    }

    /// Addresses on the far side of the transaction.
    pub fn recipients(&self) -> &[String] {
        self.recipients.get_or_init(|| match self.ux_type() {
            UxType::Deposit => collect_addresses(self.tx.inputs.iter()),
            UxType::Withdraw => collect_addresses(self.non_change_outputs()),
            UxType::Coinbase => collect_addresses(self.tx.outputs.iter().take(1)),
            UxType::Unknown => Vec::new(),
        })
    }

    /// Wallet accounts touched by the transaction. For withdrawals there is
    /// one entry per recipient output, `None` where the output is foreign.
    pub fn accounts(&self) -> &[Option<String>] {
        self.accounts.get_or_init(|| match self.ux_type() {
            UxType::Deposit => self
                .known_outputs()
                .map(|coin| coin.account_name().map(str::to_string))
                .collect(),
            UxType::Withdraw => self
                .non_change_outputs()
                .map(|coin| coin.account_name().map(str::to_string))
                .collect(),
            UxType::Coinbase => self
                .tx
                .outputs
                .first()
                .and_then(Coin::account_name)
                .map(|name| vec![Some(name.to_string())])
                .unwrap_or_default(),
            UxType::Unknown => Vec::new(),
        })
    }

    /// The single account display string for the transaction.
    pub fn account(&self) -> &str {
        self.account.get_or_init(|| {
            let labels = self.ctx.labels;
            match self.ux_type() {
                UxType::Deposit => account_label(self.known_outputs(), labels),
                UxType::Withdraw => account_label(self.known_inputs(), labels),
                UxType::Coinbase => match self.tx.outputs.as_slice() {
                    [only] => only
                        .account_name()
                        .map(str::to_string)
                        .unwrap_or_else(|| labels.unknown_account.clone()),
                    _ => labels.unknown_account.clone(),
                },
                UxType::Unknown => labels.unknown_account.clone(),
            }
        })
    }

    // ========================================================================
    // Raw Transaction Facts
    // ========================================================================

    /// Weight and witness facts from the raw hex, when available.
    pub fn decoded(&self) -> Option<DecodedTx> {
        *self.decoded.get_or_init(|| {
            let raw = self.tx.tx.as_deref()?;
            let decoded = self.ctx.decoder.decode(raw);
            if decoded.is_none() {
                tracing::debug!(hash = %self.tx.hash, "raw transaction did not decode");
            }
            decoded
        })
    }

    // ========================================================================
    // Display Record
    // ========================================================================

    #[must_use]
    pub fn to_record(&self) -> DisplayRecord {
        let tx = self.tx.as_ref();
        let format = self.ctx.amount_format;
        let decoded = self.decoded();
        let account = self.account().to_string();

        DisplayRecord {
            hash: tx.hash.clone(),
            date: tx
                .date
                .as_deref()
                .map(|date| self.ctx.date_format.render(date)),
            amount: self.amount(),
            wallet: self.wallet().map(str::to_string),
            accounts: self.accounts().to_vec(),
            account_label: account.clone(),
            account,
            confirmations: tx.confirmations,
            recipients: self.recipients().to_vec(),
            address_label: self.counterparty().to_string(),
            is_segwit: decoded.is_some_and(|d| d.has_witness),
            is_coinbase: self.is_coinbase(),
            uxtype: self.labels().for_type(self.ux_type()).to_string(),
            weight: decoded.map(|d| d.weight),
            input_amount: format.format(sum_values(tx.inputs.iter())),
            output_amount: format.format(sum_values(tx.outputs.iter())),
            fee: tx.fee,
            rate: tx.rate,
            size: tx.size,
            block: tx.block.clone(),
            height: tx.height,
            tx: tx.tx.clone(),
            inputs: tx.inputs.clone(),
            outputs: tx.outputs.clone(),
        }
    }
}

fn known_coins(coins: &[Coin]) -> impl Iterator<Item = &Coin> {
    coins.iter().filter(is_known)
}

fn is_known(coin: &&Coin) -> bool {
    coin.is_known()
}

fn is_change(coin: &&Coin) -> bool {
    coin.is_change()
}

fn is_not_change(coin: &&Coin) -> bool {
    !coin.is_change()
}

fn sum_values<'c>(coins: impl Iterator<Item = &'c Coin>) -> u64 {
    coins.fold(0u64, |acc, coin| acc.saturating_add(coin.value))
}

fn collect_addresses<'c>(coins: impl Iterator<Item = &'c Coin>) -> Vec<String> {
    coins.filter_map(|coin| coin.address.clone()).collect()
}

/// 0 known coins → unknown, 1 → its account, more → multiple.
fn account_label<'c>(
    mut coins: impl Iterator<Item = &'c Coin>,
    labels: &ClassificationLabels,
) -> String {
    match (coins.next(), coins.next()) {
        (None, _) => labels.unknown_account.clone(),
        (Some(only), None) => only
            .account_name()
            .map(str::to_string)
            .unwrap_or_else(|| labels.unknown_account.clone()),
        (Some(_), Some(_)) => labels.multiple_account.clone(),
    }
}
