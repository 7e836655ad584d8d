use diesel::prelude::*;
use diesel::sql_types::Text;
use rust_decimal::Decimal;

use crate::db::parse_decimal_tolerant;

/// Exchange rate implied by a recorded cross-currency transfer.
///
/// `from_currency`/`to_currency` reflect the stored transfer direction, which
/// may be the reverse of the direction a caller asked about.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpliedTransferRate {
    pub rate: Decimal,
    pub from_currency: String,
    pub to_currency: String,
}

/// Raw row shape for the implied-rate lookup query.
#[derive(QueryableByName, Debug)]
pub struct ImpliedTransferRateDB {
    #[diesel(sql_type = Text)]
    pub exchange_rate: String,
    #[diesel(sql_type = Text)]
    pub from_currency: String,
    #[diesel(sql_type = Text)]
    pub to_currency: String,
}

impl From<ImpliedTransferRateDB> for ImpliedTransferRate {
    fn from(row: ImpliedTransferRateDB) -> Self {
        ImpliedTransferRate {
            rate: parse_decimal_tolerant(&row.exchange_rate, "exchange_rate"),
            from_currency: row.from_currency,
            to_currency: row.to_currency,
        }
    }
}
