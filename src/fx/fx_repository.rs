use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::get_connection;
use crate::errors::Result;

use super::fx_model::{ImpliedTransferRate, ImpliedTransferRateDB};
use super::fx_traits::FxRepositoryTrait;

/// Repository for exchange rates implied by recorded transfers
pub struct FxRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl FxRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl FxRepositoryTrait for FxRepository {
    fn latest_transfer_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Option<ImpliedTransferRate>> {
        let mut conn = get_connection(&self.pool)?;

        let row: Option<ImpliedTransferRateDB> = sql_query(
            r#"
            SELECT t.exchange_rate AS exchange_rate,
                   src.currency_code AS from_currency,
                   dst.currency_code AS to_currency
            FROM transactions t
            INNER JOIN accounts src ON src.id = t.account_id
            INNER JOIN accounts dst ON dst.id = t.transfer_to_account_id
            WHERE t.transaction_type = 'transfer'
              AND t.exchange_rate IS NOT NULL
              AND t.converted_amount IS NOT NULL
              AND ((src.currency_code = ?1 AND dst.currency_code = ?2)
                OR (src.currency_code = ?2 AND dst.currency_code = ?1))
            ORDER BY t.transaction_date DESC, t.created_at DESC
            LIMIT 1
            "#,
        )
        .bind::<diesel::sql_types::Text, _>(from_currency)
        .bind::<diesel::sql_types::Text, _>(to_currency)
        .get_result(&mut conn)
        .optional()?;

        Ok(row.map(ImpliedTransferRate::from))
    }
}
