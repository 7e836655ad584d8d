use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Base currency for composed fallback rates
pub const BASE_CURRENCY: &str = "USD";

/// Fallback decimal precision for converted amounts when the destination
/// currency is not in the registry
pub const DECIMAL_PRECISION: u32 = 4;

/// Decimal precision for exchange rates
pub const RATE_DECIMAL_PRECISION: u32 = 6;

/// Smallest accepted transaction amount, in the account's currency units
pub const MIN_TRANSACTION_AMOUNT: Decimal = dec!(0.01);

/// Upper bound for a currency's fractional digits
pub const MAX_CURRENCY_DECIMAL_PLACES: i32 = 8;
