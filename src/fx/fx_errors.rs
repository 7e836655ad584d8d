use crate::errors::DatabaseError;
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum FxError {
    DatabaseError(String),
    RateNotFound(String),
    InvalidCurrencyCode(String),
    ConversionError(String),
}

impl fmt::Display for FxError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FxError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            FxError::RateNotFound(msg) => write!(f, "Exchange rate not found: {}", msg),
            FxError::InvalidCurrencyCode(msg) => write!(f, "Invalid currency code: {}", msg),
            FxError::ConversionError(msg) => write!(f, "Currency conversion error: {}", msg),
        }
    }
}

impl Error for FxError {}

impl From<diesel::result::Error> for FxError {
    fn from(err: diesel::result::Error) -> Self {
        FxError::DatabaseError(err.to_string())
    }
}

impl From<DatabaseError> for FxError {
    fn from(err: DatabaseError) -> Self {
        FxError::DatabaseError(err.to_string())
    }
}
