#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("transaction JSON is missing")]
    MissingTransaction,

    #[error("invalid transaction at index {index}: {message}")]
    InvalidTransaction { index: usize, message: String },

    #[error("labels must be a JSON object")]
    InvalidLabels,

    #[error("label `{key}` must be a string")]
    InvalidLabel { key: String },

    #[error("missing label `{key}`")]
    MissingLabel { key: String },

    #[error("options must be a JSON object")]
    InvalidOptions,

    #[error("missing required option `{0}`")]
    MissingOption(&'static str),

    #[error("invalid date format `{format}`: {message}")]
    InvalidDateFormat { format: String, message: String },

    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),

    #[error("unknown unit: {0}")]
    UnknownUnit(String),

    #[error("transactions must be a list")]
    NotAnArray,

    #[error("custom parser returned {actual} records for {expected} transactions")]
    CustomParserLength { expected: usize, actual: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
