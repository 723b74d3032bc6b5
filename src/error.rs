use thiserror::Error;

/// Problems with the configuration file or environment. Fatal at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while talking to the market data API.
///
/// Any of these aborts the current scan cycle only.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request rejected with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("rate limited (remaining: {remaining})")]
    RateLimited { remaining: String },

    #[error("unexpected response shape: {0}")]
    Decode(String),

    #[error("activity feed unavailable: {0}")]
    FeedUnavailable(String),
}

/// A single record, event, or operator input failed validation.
///
/// Recovered by skipping only the offending item.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listing record is malformed: {0}")]
    MalformedListing(String),

    #[error("activity event is malformed: {0}")]
    MalformedEvent(String),

    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount { amount: rust_decimal::Decimal },

    #[error("amount {amount} exceeds available {available}")]
    AmountExceedsAvailable {
        amount: rust_decimal::Decimal,
        available: rust_decimal::Decimal,
    },

    #[error("no {direction} opportunity #{rank} (choose 1-{count})")]
    UnknownSelection {
        direction: String,
        rank: usize,
        count: usize,
    },

    #[error("invalid deposit id '{0}'")]
    InvalidDepositId(String),

    #[error("invalid address '{0}'")]
    InvalidAddress(String),

    #[error("quote for listing {listing} is outside the representable range")]
    OutOfRange { listing: String },
}

/// Errors that terminate a single trade request.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("preflight failed: {0}")]
    Preflight(String),

    #[error("gas estimation failed: {0}")]
    GasEstimation(String),

    #[error("failed to submit transaction: {0}")]
    Submission(String),

    #[error("failed to fetch receipt: {0}")]
    Receipt(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::DataSource(DataSourceError::Transport(err))
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
