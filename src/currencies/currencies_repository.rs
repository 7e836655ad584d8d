use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, DbTransactionExecutor};
use crate::errors::{Error, Result};
use crate::schema::currencies;

use super::currencies_model::{Currency, CurrencyDB, CurrencyUpdate, NewCurrency};
use super::currencies_traits::CurrencyRepositoryTrait;

/// Repository for managing currency reference data
pub struct CurrencyRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl CurrencyRepository {
    /// Creates a new CurrencyRepository instance
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl CurrencyRepositoryTrait for CurrencyRepository {
    fn get_by_code(&self, code: &str) -> Result<Currency> {
        let mut conn = get_connection(&self.pool)?;

        let currency = currencies::table
            .find(code)
            .first::<CurrencyDB>(&mut conn)
            .map_err(|e| match e {
                diesel::result::Error::NotFound => {
                    Error::NotFound(format!("Currency {} not found", code))
                }
                _ => e.into(),
            })?;

        Ok(currency.into())
    }

    fn list(&self) -> Result<Vec<Currency>> {
        let mut conn = get_connection(&self.pool)?;

        let results = currencies::table
            .order(currencies::code.asc())
            .load::<CurrencyDB>(&mut conn)?;

        Ok(results.into_iter().map(Currency::from).collect())
    }

    fn list_active(&self) -> Result<Vec<Currency>> {
        let mut conn = get_connection(&self.pool)?;

        let results = currencies::table
            .filter(currencies::is_active.eq(true))
            .order(currencies::code.asc())
            .load::<CurrencyDB>(&mut conn)?;

        Ok(results.into_iter().map(Currency::from).collect())
    }

    fn create(&self, new_currency: NewCurrency) -> Result<Currency> {
        let currency_db: CurrencyDB = new_currency.into();

        self.pool.execute(|conn| {
            let existing: i64 = currencies::table
                .filter(currencies::code.eq(&currency_db.code))
                .count()
                .get_result(conn)
                .map_err(Error::from)?;

            if existing > 0 {
                return Err(Error::Conflict(format!(
                    "Currency {} already exists",
                    currency_db.code
                )));
            }

            diesel::insert_into(currencies::table)
                .values(&currency_db)
                .execute(conn)
                .map_err(|e| match e {
                    diesel::result::Error::DatabaseError(
                        diesel::result::DatabaseErrorKind::UniqueViolation,
                        _,
                    ) => Error::Conflict(format!("Currency {} already exists", currency_db.code)),
                    _ => e.into(),
                })?;

            Ok(currency_db.into())
        })
    }

    fn update(&self, code: &str, update: CurrencyUpdate) -> Result<Currency> {
        self.pool.execute(|conn| {
            let existing = currencies::table
                .find(code)
                .first::<CurrencyDB>(conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        Error::NotFound(format!("Currency {} not found", code))
                    }
                    _ => e.into(),
                })?;

            let currency_db = CurrencyDB {
                code: existing.code.clone(),
                name: update.name,
                symbol: update.symbol,
                decimal_places: update.decimal_places,
                is_active: update.is_active,
                exchange_rate: update.exchange_rate.map(|r| r.to_string()),
                rate_source: update.rate_source,
                notes: update.notes,
                created_at: existing.created_at,
                updated_at: chrono::Utc::now().naive_utc(),
            };

            diesel::update(currencies::table.find(code))
                .set(&currency_db)
                .execute(conn)
                .map_err(Error::from)?;

            Ok::<_, Error>(currency_db.into())
        })
    }
}
