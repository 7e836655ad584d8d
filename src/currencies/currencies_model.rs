use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_CURRENCY_DECIMAL_PLACES;
use crate::db::parse_decimal_tolerant;
use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a currency in the registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub decimal_places: i32,
    pub is_active: bool,
    pub exchange_rate: Option<Decimal>,
    pub rate_source: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for registering a new currency
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCurrency {
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub decimal_places: i32,
    pub is_active: bool,
    pub exchange_rate: Option<Decimal>,
    pub rate_source: Option<String>,
    pub notes: Option<String>,
}

impl NewCurrency {
    /// Validates the new currency data
    pub fn validate(&self) -> Result<()> {
        validate_currency_code(&self.code)?;
        validate_decimal_places(self.decimal_places)?;
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency name cannot be empty".to_string(),
            )));
        }
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency symbol cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating an existing currency. The code itself is
/// immutable once assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyUpdate {
    pub name: String,
    pub symbol: String,
    pub decimal_places: i32,
    pub is_active: bool,
    pub exchange_rate: Option<Decimal>,
    pub rate_source: Option<String>,
    pub notes: Option<String>,
}

impl CurrencyUpdate {
    /// Validates the currency update data
    pub fn validate(&self) -> Result<()> {
        validate_decimal_places(self.decimal_places)?;
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Currency name cannot be empty".to_string(),
            )));
        }
        Ok(())
    }
}

/// Checks that a currency code is exactly three ASCII letters.
pub fn validate_currency_code(code: &str) -> Result<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Currency code '{}' must be exactly 3 letters",
            code
        ))));
    }
    Ok(())
}

fn validate_decimal_places(decimal_places: i32) -> Result<()> {
    if !(0..=MAX_CURRENCY_DECIMAL_PLACES).contains(&decimal_places) {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Decimal places must be between 0 and {}",
            MAX_CURRENCY_DECIMAL_PLACES
        ))));
    }
    Ok(())
}

/// Database model for currencies
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::currencies)]
#[diesel(primary_key(code))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct CurrencyDB {
    pub code: String,
    pub name: String,
    pub symbol: String,
    pub decimal_places: i32,
    pub is_active: bool,
    pub exchange_rate: Option<String>,
    pub rate_source: Option<String>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<CurrencyDB> for Currency {
    fn from(db: CurrencyDB) -> Self {
        Self {
            code: db.code,
            name: db.name,
            symbol: db.symbol,
            decimal_places: db.decimal_places,
            is_active: db.is_active,
            exchange_rate: db
                .exchange_rate
                .as_deref()
                .map(|s| parse_decimal_tolerant(s, "exchange_rate")),
            rate_source: db.rate_source,
            notes: db.notes,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewCurrency> for CurrencyDB {
    fn from(domain: NewCurrency) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            code: domain.code.to_ascii_uppercase(),
            name: domain.name,
            symbol: domain.symbol,
            decimal_places: domain.decimal_places,
            is_active: domain.is_active,
            exchange_rate: domain.exchange_rate.map(|r| r.to_string()),
            rate_source: domain.rate_source,
            notes: domain.notes,
            created_at: now,
            updated_at: now,
        }
    }
}
