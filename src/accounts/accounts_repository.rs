use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::db::{get_connection, DbTransactionExecutor};
use crate::errors::{Error, Result};
use crate::schema::{accounts, transactions};

use super::accounts_model::{Account, AccountDB, AccountUpdate, NewAccount};
use super::accounts_traits::AccountRepositoryTrait;

/// Repository for managing account data in the database
pub struct AccountRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl AccountRepository {
    /// Creates a new AccountRepository instance
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl AccountRepositoryTrait for AccountRepository {
    fn create(&self, owner_id: &str, new_account: NewAccount) -> Result<Account> {
        let mut account_db: AccountDB = new_account.into();
        account_db.id = uuid::Uuid::new_v4().to_string();
        account_db.owner_id = owner_id.to_string();

        // Uniqueness check and insert share one transaction so a concurrent
        // create of the same name cannot slip between them.
        self.pool.execute(move |conn| {
            let duplicates: i64 = accounts::table
                .filter(accounts::owner_id.eq(&account_db.owner_id))
                .filter(accounts::name.eq(&account_db.name))
                .count()
                .get_result(conn)
                .map_err(Error::from)?;

            if duplicates > 0 {
                return Err(Error::Conflict(format!(
                    "Account name '{}' is already in use",
                    account_db.name
                )));
            }

            diesel::insert_into(accounts::table)
                .values(&account_db)
                .execute(conn)
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _,
                    ) => Error::Conflict(format!(
                        "Account name '{}' is already in use",
                        account_db.name
                    )),
                    _ => e.into(),
                })?;

            Ok(account_db.into())
        })
    }

    fn update(&self, account_id: &str, update: AccountUpdate) -> Result<Account> {
        let account_id = account_id.to_string();

        self.pool.execute(move |conn| {
            let existing = accounts::table
                .find(&account_id)
                .first::<AccountDB>(conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        Error::NotFound(format!("Account {} not found", account_id))
                    }
                    _ => e.into(),
                })?;

            if update.name != existing.name {
                let duplicates: i64 = accounts::table
                    .filter(accounts::owner_id.eq(&existing.owner_id))
                    .filter(accounts::name.eq(&update.name))
                    .filter(accounts::id.ne(&account_id))
                    .count()
                    .get_result(conn)
                    .map_err(Error::from)?;

                if duplicates > 0 {
                    return Err(Error::Conflict(format!(
                        "Account name '{}' is already in use",
                        update.name
                    )));
                }
            }

            // Owner, currency, and both balance columns come from the stored
            // row; the update payload cannot touch them.
            let account_db = AccountDB {
                id: existing.id.clone(),
                owner_id: existing.owner_id,
                name: update.name,
                description: update.description,
                account_type: update.account_type,
                currency_code: existing.currency_code,
                initial_balance: existing.initial_balance,
                balance: existing.balance,
                is_active: update.is_active,
                created_at: existing.created_at,
                updated_at: chrono::Utc::now().naive_utc(),
            };

            diesel::update(accounts::table.find(&account_id))
                .set(&account_db)
                .execute(conn)
                .map_err(Error::from)?;

            Ok(account_db.into())
        })
    }

    fn set_active(&self, account_id: &str, active: bool) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::update(accounts::table.find(account_id))
            .set((
                accounts::is_active.eq(active),
                accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::NotFound(format!("Account {} not found", account_id)));
        }

        let account = accounts::table
            .find(account_id)
            .first::<AccountDB>(&mut conn)?;

        Ok(account.into())
    }

    fn delete(&self, account_id: &str) -> Result<()> {
        let account_id = account_id.to_string();

        self.pool.execute(move |conn| {
            let references: i64 = transactions::table
                .filter(
                    transactions::account_id
                        .eq(&account_id)
                        .or(transactions::transfer_to_account_id.eq(&account_id)),
                )
                .count()
                .get_result(conn)
                .map_err(Error::from)?;

            if references > 0 {
                return Err(Error::Conflict(format!(
                    "Account {} has {} transaction(s) and cannot be deleted",
                    account_id, references
                )));
            }

            let affected = diesel::delete(accounts::table.find(&account_id))
                .execute(conn)
                .map_err(Error::from)?;

            if affected == 0 {
                return Err(Error::NotFound(format!("Account {} not found", account_id)));
            }

            Ok(())
        })
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        let mut conn = get_connection(&self.pool)?;

        let account = accounts::table
            .find(account_id)
            .first::<AccountDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Account {} not found", account_id))
                }
                _ => e.into(),
            })?;

        Ok(account.into())
    }

    fn list_for_owner(
        &self,
        owner_id: &str,
        is_active_filter: Option<bool>,
    ) -> Result<Vec<Account>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = accounts::table
            .filter(accounts::owner_id.eq(owner_id))
            .into_boxed();

        if let Some(active) = is_active_filter {
            query = query.filter(accounts::is_active.eq(active));
        }

        query
            .order(accounts::name.asc())
            .load::<AccountDB>(&mut conn)
            .map_err(Error::from)
            .map(|results| results.into_iter().map(Account::from).collect())
    }

    fn save_balance(&self, account_id: &str, balance: Decimal) -> Result<()> {
        let mut conn = get_connection(&self.pool)?;

        let affected = diesel::update(accounts::table.find(account_id))
            .set((
                accounts::balance.eq(balance.to_string()),
                accounts::updated_at.eq(chrono::Utc::now().naive_utc()),
            ))
            .execute(&mut conn)?;

        if affected == 0 {
            return Err(Error::NotFound(format!("Account {} not found", account_id)));
        }

        Ok(())
    }
}
