use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::currencies::validate_currency_code;
use crate::db::parse_decimal_tolerant;
use crate::errors::{Error, Result, ValidationError};

use super::accounts_constants::*;

/// Domain model representing an account in the system.
///
/// `balance` is derived state: it is overwritten by balance recomputation and
/// never accepted from callers. `initial_balance` is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub account_type: String,
    pub currency_code: String,
    pub initial_balance: Decimal,
    pub balance: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub description: Option<String>,
    pub account_type: String,
    pub currency_code: String,
    pub initial_balance: Decimal,
    pub is_active: bool,
}

impl NewAccount {
    /// Validates the new account data
    pub fn validate(&self) -> Result<()> {
        validate_account_name(&self.name)?;
        AccountType::from_str(&self.account_type)
            .map_err(|e| Error::Validation(ValidationError::InvalidInput(e)))?;
        validate_currency_code(&self.currency_code)?;
        Ok(())
    }
}

/// Input model for updating an existing account.
///
/// Balance, initial balance, and currency are deliberately absent: the first
/// two are derived/immutable and the denomination cannot change once
/// transactions may reference it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub name: String,
    pub description: Option<String>,
    pub account_type: String,
    pub is_active: bool,
}

impl AccountUpdate {
    /// Validates the account update data
    pub fn validate(&self) -> Result<()> {
        validate_account_name(&self.name)?;
        AccountType::from_str(&self.account_type)
            .map_err(|e| Error::Validation(ValidationError::InvalidInput(e)))?;
        Ok(())
    }
}

fn validate_account_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Account name cannot be empty".to_string(),
        )));
    }
    if name.len() > 255 {
        return Err(Error::Validation(ValidationError::InvalidInput(
            "Account name cannot exceed 255 characters".to_string(),
        )));
    }
    Ok(())
}

/// Enum representing the supported account categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Checking,
    Savings,
    Credit,
    Investment,
    Cash,
    Other,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => ACCOUNT_TYPE_CHECKING,
            AccountType::Savings => ACCOUNT_TYPE_SAVINGS,
            AccountType::Credit => ACCOUNT_TYPE_CREDIT,
            AccountType::Investment => ACCOUNT_TYPE_INVESTMENT,
            AccountType::Cash => ACCOUNT_TYPE_CASH,
            AccountType::Other => ACCOUNT_TYPE_OTHER,
        }
    }

    /// Human-readable label for display surfaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            AccountType::Checking => "Checking Account",
            AccountType::Savings => "Savings Account",
            AccountType::Credit => "Credit Account",
            AccountType::Investment => "Investment Account",
            AccountType::Cash => "Cash Account",
            AccountType::Other => "Other Account",
        }
    }

    pub fn all() -> [AccountType; 6] {
        [
            AccountType::Checking,
            AccountType::Savings,
            AccountType::Credit,
            AccountType::Investment,
            AccountType::Cash,
            AccountType::Other,
        ]
    }
}

impl FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            s if s == ACCOUNT_TYPE_CHECKING => Ok(AccountType::Checking),
            s if s == ACCOUNT_TYPE_SAVINGS => Ok(AccountType::Savings),
            s if s == ACCOUNT_TYPE_CREDIT => Ok(AccountType::Credit),
            s if s == ACCOUNT_TYPE_INVESTMENT => Ok(AccountType::Investment),
            s if s == ACCOUNT_TYPE_CASH => Ok(AccountType::Cash),
            s if s == ACCOUNT_TYPE_OTHER => Ok(AccountType::Other),
            _ => Err(format!("Unknown account type: {}", s)),
        }
    }
}

/// Database model for accounts
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
#[diesel(table_name = crate::schema::accounts)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct AccountDB {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub account_type: String,
    pub currency_code: String,
    pub initial_balance: String,
    pub balance: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

// Conversion implementations
impl From<AccountDB> for Account {
    fn from(db: AccountDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            name: db.name,
            description: db.description,
            account_type: db.account_type,
            currency_code: db.currency_code,
            initial_balance: parse_decimal_tolerant(&db.initial_balance, "initial_balance"),
            balance: parse_decimal_tolerant(&db.balance, "balance"),
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<NewAccount> for AccountDB {
    fn from(domain: NewAccount) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: String::new(),       // This will be filled by the repository
            owner_id: String::new(), // This will be filled by the repository
            name: domain.name,
            description: domain.description,
            account_type: domain.account_type,
            currency_code: domain.currency_code.to_ascii_uppercase(),
            // A new account starts with its balance equal to its initial balance.
            balance: domain.initial_balance.to_string(),
            initial_balance: domain.initial_balance.to_string(),
            is_active: domain.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}
