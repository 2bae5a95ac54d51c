//! Configuration shared by the manager and the classifiers it builds.

use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::format_description::OwnedFormatItem;
use time::OffsetDateTime;

use crate::amount::{AmountFormat, Chain, Unit};
use crate::decode::{BitcoinDecoder, TxDecoder};
use crate::error::CoreError;
use crate::labels::ClassificationLabels;
use crate::manager::CustomParser;

/// `MM/DD/YY hh:mm a`, e.g. `05/02/18 07:21 pm`.
pub const DEFAULT_DATE_FORMAT: &str =
    "[month]/[day]/[year repr:last_two] [hour repr:12]:[minute] [period case:lower]";

// ==============================================================================
// Date Format
// ==============================================================================

/// A compiled `time` format description, kept alongside its source text.
#[derive(Debug, Clone)]
pub struct DateFormat {
    source: String,
    items: OwnedFormatItem,
}

impl DateFormat {
    pub fn parse(source: &str) -> Result<Self, CoreError> {
        let items = time::format_description::parse_owned::<1>(source).map_err(|err| {
            CoreError::InvalidDateFormat {
                format: source.to_string(),
                message: err.to_string(),
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            items,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Render an RFC 3339 timestamp. Timestamps that do not parse are
    /// returned unchanged.
    pub fn render(&self, date: &str) -> String {
        let formatted = OffsetDateTime::parse(date, &Rfc3339)
            .map_err(|err| err.to_string())
            .and_then(|dt| dt.format(&self.items).map_err(|err| err.to_string()));

        match formatted {
            Ok(rendered) => rendered,
            Err(error) => {
                tracing::warn!(date, %error, "could not format transaction date");
                date.to_string()
            }
        }
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::parse(DEFAULT_DATE_FORMAT).expect("default date format is valid")
    }
}

// ==============================================================================
// Manager Options
// ==============================================================================

/// Everything a [`crate::manager::TxManager`] needs to classify transactions.
pub struct TxManagerOptions {
    pub labels: ClassificationLabels,
    pub date_format: DateFormat,
    pub amount_format: AmountFormat,
    /// Replaces the built-in classification entirely when set.
    pub custom: Option<Box<dyn CustomParser>>,
    pub decoder: Box<dyn TxDecoder>,
}

impl Default for TxManagerOptions {
    fn default() -> Self {
        Self {
            labels: ClassificationLabels::default(),
            date_format: DateFormat::default(),
            amount_format: AmountFormat::default(),
            custom: None,
            decoder: Box::new(BitcoinDecoder),
        }
    }
}

impl std::fmt::Debug for TxManagerOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxManagerOptions")
            .field("labels", &self.labels)
            .field("date_format", &self.date_format.as_str())
            .field("amount_format", &self.amount_format)
            .field("custom", &self.custom.is_some())
            .finish_non_exhaustive()
    }
}

impl TxManagerOptions {
    /// Build options from a host JSON object of the form
    /// `{ "labels": {..}, "constants": { "DATE_FORMAT": ".." }, "chain": "..", "unit": ".." }`.
    ///
    /// `labels` and `constants.DATE_FORMAT` are required; `chain` and
    /// `unit` fall back to bitcoin/coin.
    pub fn from_value(value: &Value) -> Result<Self, CoreError> {
        let map = value.as_object().ok_or(CoreError::InvalidOptions)?;

        let labels = map
            .get("labels")
            .ok_or(CoreError::MissingOption("labels"))?;
        let labels = ClassificationLabels::from_value(labels)?;

        let constants = map
            .get("constants")
            .ok_or(CoreError::MissingOption("constants"))?;
        let date_format = match constants.get("DATE_FORMAT") {
            None | Some(Value::Null) => {
                return Err(CoreError::MissingOption("constants.DATE_FORMAT"))
            }
            Some(Value::String(format)) => DateFormat::parse(format)?,
            Some(other) => {
                return Err(CoreError::InvalidDateFormat {
                    format: other.to_string(),
                    message: "date format must be a string".into(),
                })
            }
        };

        let chain = match map.get("chain") {
            None | Some(Value::Null) => Chain::default(),
            Some(Value::String(name)) => name.parse::<Chain>()?,
            Some(other) => return Err(CoreError::UnsupportedChain(other.to_string())),
        };
        let unit = match map.get("unit") {
            None | Some(Value::Null) => Unit::default(),
            Some(Value::String(name)) => name.parse::<Unit>()?,
            Some(other) => return Err(CoreError::UnknownUnit(other.to_string())),
        };

        Ok(Self {
            labels,
            date_format,
            amount_format: AmountFormat::new(chain, unit),
            ..Self::default()
        })
    }

    pub fn with_labels(mut self, labels: ClassificationLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_date_format(mut self, date_format: DateFormat) -> Self {
        self.date_format = date_format;
        self
    }

    pub fn with_amount_format(mut self, amount_format: AmountFormat) -> Self {
        self.amount_format = amount_format;
        self
    }

    pub fn with_custom(mut self, custom: impl CustomParser + 'static) -> Self {
        self.custom = Some(Box::new(custom));
        self
    }

    pub fn with_decoder(mut self, decoder: impl TxDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    /// Borrow the pieces a single classifier needs.
    pub fn context<'a>(&'a self, wallet: Option<&'a str>) -> ClassifierContext<'a> {
        ClassifierContext {
            labels: &self.labels,
            date_format: &self.date_format,
            amount_format: self.amount_format,
            decoder: self.decoder.as_ref(),
            wallet,
        }
    }
}

// ==============================================================================
// Classifier Context
// ==============================================================================

/// Borrowed configuration for one [`crate::uxtx::Uxtx`].
#[derive(Clone, Copy)]
pub struct ClassifierContext<'a> {
    pub labels: &'a ClassificationLabels,
    pub date_format: &'a DateFormat,
    pub amount_format: AmountFormat,
    pub decoder: &'a dyn TxDecoder,
    /// Wallet the transactions were fetched from; echoed into records.
    pub wallet: Option<&'a str>,
}
