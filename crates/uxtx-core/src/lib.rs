pub mod amount;
pub mod cache;
pub mod decode;
pub mod error;
pub mod labels;
pub mod manager;
pub mod options;
#[cfg(test)]
pub mod test_util;
pub mod types;
pub mod uxtx;

pub use error::CoreError;
pub use labels::ClassificationLabels;
pub use manager::{CustomParser, TxManager};
pub use options::{DateFormat, TxManagerOptions};
pub use types::{Coin, CoinPath, DisplayRecord, RawTransaction, UxType};
pub use uxtx::Uxtx;
