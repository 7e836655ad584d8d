use diesel::result::Error as DieselError;
use thiserror::Error;

use crate::fx::FxError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the finance core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Currency operation failed: {0}")]
    Currency(#[from] CurrencyError),

    #[error("Balance recompute failed for account {account_id}: {source}")]
    RecomputeFailure {
        account_id: String,
        #[source]
        source: Box<Error>,
    },
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(#[from] diesel::result::ConnectionError),

    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(#[from] r2d2::Error),

    #[error("Database query failed: {0}")]
    QueryFailed(#[from] DieselError),

    #[error("Database migration failed: {0}")]
    MigrationFailed(String),
}

#[derive(Error, Debug)]
pub enum CurrencyError {
    #[error("Failed to convert between currencies: {0}")]
    ConversionFailed(String),

    #[error("Currency '{0}' is not supported")]
    Unsupported(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("cross_currency_fields_required: exchange rate and converted amount are required for cross-currency transfers")]
    CrossCurrencyFieldsRequired,
}

// Implement From for DieselError to Error directly
impl From<DieselError> for Error {
    fn from(err: DieselError) -> Self {
        Error::Database(DatabaseError::QueryFailed(err))
    }
}

// Add From implementation for rust_decimal::Error
impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

// Add From implementation for std::io::Error
impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

// Add From implementation for serde_json::Error
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<r2d2::Error> for Error {
    fn from(e: r2d2::Error) -> Self {
        Error::Database(DatabaseError::PoolCreationFailed(e))
    }
}

// Add From implementation for FxError
impl From<FxError> for Error {
    fn from(err: FxError) -> Self {
        match err {
            FxError::RateNotFound(msg) => Error::Currency(CurrencyError::RateNotFound(msg)),
            FxError::InvalidCurrencyCode(msg) => {
                Error::Currency(CurrencyError::Unsupported(msg))
            }
            other => Error::Currency(CurrencyError::ConversionFailed(other.to_string())),
        }
    }
}

impl Error {
    /// Wraps a recompute failure with the account it concerns.
    pub fn recompute_failure(account_id: impl Into<String>, source: Error) -> Self {
        Error::RecomputeFailure {
            account_id: account_id.into(),
            source: Box::new(source),
        }
    }
}
