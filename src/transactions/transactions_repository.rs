use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbTransactionExecutor};
use crate::errors::{Error, Result};
use crate::schema::{accounts, transactions};

use super::transactions_constants::TRANSACTION_TYPE_TRANSFER;
use super::transactions_model::{
    NewTransaction, Transaction, TransactionDB, TransactionFilter, TransactionUpdate,
    TransferCredit,
};
use super::transactions_traits::TransactionRepositoryTrait;

/// Repository for managing transaction data in the database
pub struct TransactionRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository instance
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn create(&self, owner_id: &str, new_transaction: NewTransaction) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        let mut transaction_db: TransactionDB = new_transaction.into();
        transaction_db.id = uuid::Uuid::new_v4().to_string();
        transaction_db.owner_id = owner_id.to_string();

        diesel::insert_into(transactions::table)
            .values(&transaction_db)
            .execute(&mut conn)?;

        Ok(transaction_db.into())
    }

    fn update(&self, transaction_id: &str, update: TransactionUpdate) -> Result<Transaction> {
        let transaction_id = transaction_id.to_string();

        self.pool.execute(move |conn| {
            let existing = transactions::table
                .find(&transaction_id)
                .first::<TransactionDB>(conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        Error::NotFound(format!("Transaction {} not found", transaction_id))
                    }
                    _ => e.into(),
                })?;

            let transaction_db = TransactionDB {
                id: existing.id.clone(),
                owner_id: existing.owner_id,
                account_id: update.account_id,
                transaction_type: update.transaction_type,
                amount: update.amount.to_string(),
                description: update.description,
                notes: update.notes,
                category: update.category,
                reference_number: update.reference_number,
                transaction_date: update.transaction_date,
                transfer_to_account_id: update.transfer_to_account_id,
                exchange_rate: update.exchange_rate.map(|rate| rate.to_string()),
                converted_amount: update.converted_amount.map(|amount| amount.to_string()),
                created_at: existing.created_at,
                updated_at: chrono::Utc::now().naive_utc(),
            };

            diesel::update(transactions::table.find(&transaction_id))
                .set(&transaction_db)
                .execute(conn)
                .map_err(Error::from)?;

            Ok::<_, Error>(transaction_db.into())
        })
    }

    fn delete(&self, transaction_id: &str) -> Result<Transaction> {
        let transaction_id = transaction_id.to_string();

        self.pool.execute(move |conn| {
            let existing = transactions::table
                .find(&transaction_id)
                .first::<TransactionDB>(conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        Error::NotFound(format!("Transaction {} not found", transaction_id))
                    }
                    _ => e.into(),
                })?;

            diesel::delete(transactions::table.find(&transaction_id))
                .execute(conn)
                .map_err(Error::from)?;

            Ok::<_, Error>(existing.into())
        })
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        let mut conn = get_connection(&self.pool)?;

        let transaction = transactions::table
            .find(transaction_id)
            .first::<TransactionDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Transaction {} not found", transaction_id))
                }
                _ => e.into(),
            })?;

        Ok(transaction.into())
    }

    fn list_for_owner(
        &self,
        owner_id: &str,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = transactions::table
            .filter(transactions::owner_id.eq(owner_id))
            .into_boxed();

        if let Some(account_id) = filter.account_id {
            query = query.filter(
                transactions::account_id
                    .eq(account_id.clone())
                    .or(transactions::transfer_to_account_id.eq(account_id)),
            );
        }
        if let Some(transaction_type) = filter.transaction_type {
            query = query.filter(transactions::transaction_type.eq(transaction_type));
        }
        if let Some(start_date) = filter.start_date {
            query = query.filter(transactions::transaction_date.ge(start_date));
        }
        if let Some(end_date) = filter.end_date {
            query = query.filter(transactions::transaction_date.le(end_date));
        }

        query
            .order((
                transactions::transaction_date.desc(),
                transactions::created_at.desc(),
            ))
            .load::<TransactionDB>(&mut conn)
            .map_err(Error::from)
            .map(|results| results.into_iter().map(Transaction::from).collect())
    }

    fn list_for_account(&self, account_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        transactions::table
            .filter(transactions::account_id.eq(account_id))
            .order(transactions::transaction_date.asc())
            .load::<TransactionDB>(&mut conn)
            .map_err(Error::from)
            .map(|results| results.into_iter().map(Transaction::from).collect())
    }

    fn list_transfers_into(&self, account_id: &str) -> Result<Vec<TransferCredit>> {
        let mut conn = get_connection(&self.pool)?;

        let rows: Vec<(TransactionDB, String)> = transactions::table
            .inner_join(accounts::table.on(accounts::id.eq(transactions::account_id)))
            .filter(transactions::transfer_to_account_id.eq(account_id))
            .filter(transactions::transaction_type.eq(TRANSACTION_TYPE_TRANSFER))
            .select((transactions::all_columns, accounts::currency_code))
            .order(transactions::transaction_date.asc())
            .load::<(TransactionDB, String)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(transaction, source_currency)| TransferCredit {
                transaction: transaction.into(),
                source_currency,
            })
            .collect())
    }
}
