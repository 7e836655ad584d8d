use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::MIN_TRANSACTION_AMOUNT;
use crate::db::parse_decimal_tolerant;
use crate::errors::{Error, Result, ValidationError};

use super::transactions_constants::*;

/// Domain model representing a transaction in the ledger.
///
/// `converted_amount` and `exchange_rate` are historical facts captured when a
/// cross-currency transfer was recorded; they are never recomputed from later
/// rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub owner_id: String,
    pub account_id: String,
    pub transaction_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub category: Option<String>,
    pub reference_number: Option<String>,
    pub transaction_date: NaiveDateTime,
    pub transfer_to_account_id: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub converted_amount: Option<Decimal>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// An incoming transfer credit together with the source account's currency.
#[derive(Debug, Clone)]
pub struct TransferCredit {
    pub transaction: Transaction,
    pub source_currency: String,
}

/// Input model for creating a new transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub account_id: String,
    pub transaction_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub category: Option<String>,
    pub reference_number: Option<String>,
    pub transaction_date: NaiveDateTime,
    pub transfer_to_account_id: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub converted_amount: Option<Decimal>,
}

impl NewTransaction {
    /// Validates the new transaction data
    pub fn validate(&self) -> Result<()> {
        validate_transaction_fields(
            &self.account_id,
            &self.transaction_type,
            self.amount,
            self.transfer_to_account_id.as_deref(),
            self.exchange_rate,
            self.converted_amount,
        )
    }
}

/// Input model for updating an existing transaction.
///
/// Carries every editable field; the stored row is replaced wholesale. The
/// source account and transfer destination may both be reassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    pub account_id: String,
    pub transaction_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub category: Option<String>,
    pub reference_number: Option<String>,
    pub transaction_date: NaiveDateTime,
    pub transfer_to_account_id: Option<String>,
    pub exchange_rate: Option<Decimal>,
    pub converted_amount: Option<Decimal>,
}

impl TransactionUpdate {
    /// Validates the transaction update data
    pub fn validate(&self) -> Result<()> {
        validate_transaction_fields(
            &self.account_id,
            &self.transaction_type,
            self.amount,
            self.transfer_to_account_id.as_deref(),
            self.exchange_rate,
            self.converted_amount,
        )
    }
}

fn validate_transaction_fields(
    account_id: &str,
    transaction_type: &str,
    amount: Decimal,
    transfer_to_account_id: Option<&str>,
    exchange_rate: Option<Decimal>,
    converted_amount: Option<Decimal>,
) -> Result<()> {
    if account_id.trim().is_empty() {
        return Err(Error::Validation(ValidationError::MissingField(
            "account_id".to_string(),
        )));
    }

    let transaction_type = TransactionType::from_str(transaction_type)
        .map_err(|e| Error::Validation(ValidationError::InvalidInput(e)))?;

    if amount < MIN_TRANSACTION_AMOUNT {
        return Err(Error::Validation(ValidationError::InvalidInput(format!(
            "Transaction amount must be at least {}",
            MIN_TRANSACTION_AMOUNT
        ))));
    }

    match transaction_type {
        TransactionType::Transfer => match transfer_to_account_id {
            None => {
                return Err(Error::Validation(ValidationError::MissingField(
                    "transfer_to_account_id".to_string(),
                )));
            }
            Some(destination) if destination == account_id => {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "A transfer cannot target its own source account".to_string(),
                )));
            }
            Some(destination) if destination.trim().is_empty() => {
                return Err(Error::Validation(ValidationError::MissingField(
                    "transfer_to_account_id".to_string(),
                )));
            }
            Some(_) => {}
        },
        _ => {
            if transfer_to_account_id.is_some() {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "A destination account is only valid for {} transactions",
                    TRANSACTION_TYPE_TRANSFER
                ))));
            }
        }
    }

    if let Some(rate) = exchange_rate {
        if rate <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Exchange rate must be positive".to_string(),
            )));
        }
    }

    if let Some(converted) = converted_amount {
        if converted <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Converted amount must be positive".to_string(),
            )));
        }
    }

    Ok(())
}

/// Filter criteria for listing an owner's transactions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    /// Matches the source account or the transfer destination.
    pub account_id: Option<String>,
    pub transaction_type: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

/// Enum representing the supported transaction types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => TRANSACTION_TYPE_INCOME,
            TransactionType::Expense => TRANSACTION_TYPE_EXPENSE,
            TransactionType::Transfer => TRANSACTION_TYPE_TRANSFER,
        }
    }

    pub fn all() -> [TransactionType; 3] {
        [
            TransactionType::Income,
            TransactionType::Expense,
            TransactionType::Transfer,
        ]
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            s if s == TRANSACTION_TYPE_INCOME => Ok(TransactionType::Income),
            s if s == TRANSACTION_TYPE_EXPENSE => Ok(TransactionType::Expense),
            s if s == TRANSACTION_TYPE_TRANSFER => Ok(TransactionType::Transfer),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

/// Database model for transactions
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
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct TransactionDB {
    pub id: String,
    pub owner_id: String,
    pub account_id: String,
    pub transaction_type: String,
    pub amount: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub category: Option<String>,
    pub reference_number: Option<String>,
    pub transaction_date: NaiveDateTime,
    pub transfer_to_account_id: Option<String>,
    pub exchange_rate: Option<String>,
    pub converted_amount: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            account_id: db.account_id,
            transaction_type: db.transaction_type,
            amount: parse_decimal_tolerant(&db.amount, "amount"),
            description: db.description,
            notes: db.notes,
            category: db.category,
            reference_number: db.reference_number,
            transaction_date: db.transaction_date,
            transfer_to_account_id: db.transfer_to_account_id,
            exchange_rate: db
                .exchange_rate
                .map(|raw| parse_decimal_tolerant(&raw, "exchange_rate")),
            converted_amount: db
                .converted_amount
                .map(|raw| parse_decimal_tolerant(&raw, "converted_amount")),
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewTransaction> for TransactionDB {
    fn from(domain: NewTransaction) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(),       // This will be filled by the repository
            owner_id: String::new(), // This will be filled by the repository
            account_id: domain.account_id,
            transaction_type: domain.transaction_type,
            amount: domain.amount.to_string(),
            description: domain.description,
            notes: domain.notes,
            category: domain.category,
            reference_number: domain.reference_number,
            transaction_date: domain.transaction_date,
            transfer_to_account_id: domain.transfer_to_account_id,
            exchange_rate: domain.exchange_rate.map(|rate| rate.to_string()),
            converted_amount: domain.converted_amount.map(|amount| amount.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}
