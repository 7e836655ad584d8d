use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::sync::Arc;

use super::fx_errors::FxError;
use super::fx_traits::{FxRepositoryTrait, FxServiceTrait};
use crate::constants::{DECIMAL_PRECISION, RATE_DECIMAL_PRECISION};
use crate::currencies::CurrencyRepositoryTrait;
use crate::errors::{CurrencyError, Error, Result};
use crate::transactions::Transaction;

/// Amount actually credited to a transfer's destination account.
///
/// Equal currencies pass `amount` through untouched. Cross-currency transfers
/// use the `converted_amount` captured when the transfer was recorded; a
/// missing `converted_amount` degenerates to the raw amount.
pub fn effective_amount(
    transaction: &Transaction,
    source_currency: &str,
    destination_currency: &str,
) -> Decimal {
    if source_currency == destination_currency {
        transaction.amount
    } else {
        transaction.converted_amount.unwrap_or(transaction.amount)
    }
}

/// Reference rates expressed as units of currency per one US dollar.
fn default_base_rate(code: &str) -> Option<Decimal> {
    match code {
        "USD" => Some(Decimal::ONE),
        "EUR" => Some(dec!(0.85)),
        "GBP" => Some(dec!(0.73)),
        "JPY" => Some(dec!(110.0)),
        "CAD" => Some(dec!(1.25)),
        "AUD" => Some(dec!(1.35)),
        "SAR" => Some(dec!(3.75)),
        _ => None,
    }
}

fn normalize_code(code: &str) -> Result<String> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(
            FxError::InvalidCurrencyCode(format!("Invalid currency code: {}", code)).into(),
        );
    }
    Ok(code.to_ascii_uppercase())
}

/// Advisory exchange rate resolver.
///
/// Rates produced here are hints for entry forms and summary views. They are
/// never applied to a stored `converted_amount`, which records what actually
/// happened at transfer time.
pub struct FxService {
    repository: Arc<dyn FxRepositoryTrait>,
    currency_repository: Arc<dyn CurrencyRepositoryTrait>,
}

impl FxService {
    /// Creates a new FxService instance
    pub fn new(
        repository: Arc<dyn FxRepositoryTrait>,
        currency_repository: Arc<dyn CurrencyRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            currency_repository,
        }
    }

    /// Resolves a currency's rate to the base currency, preferring the manual
    /// rate on the registry row over the built-in default table.
    fn base_rate(&self, code: &str) -> Result<Decimal> {
        match self.currency_repository.get_by_code(code) {
            Ok(currency) => {
                if let Some(rate) = currency.exchange_rate {
                    if rate > Decimal::ZERO {
                        return Ok(rate);
                    }
                }
            }
            Err(Error::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        default_base_rate(code).ok_or_else(|| {
            FxError::RateNotFound(format!("No exchange rate available for {}", code)).into()
        })
    }
}

impl FxServiceTrait for FxService {
    fn get_exchange_rate(&self, from_currency: &str, to_currency: &str) -> Result<Decimal> {
        let from = normalize_code(from_currency)?;
        let to = normalize_code(to_currency)?;

        if from == to {
            return Ok(Decimal::ONE);
        }

        if let Some(implied) = self.repository.latest_transfer_rate(&from, &to)? {
            if !implied.rate.is_zero() {
                let rate = if implied.from_currency == from {
                    implied.rate
                } else {
                    (Decimal::ONE / implied.rate).round_dp(RATE_DECIMAL_PRECISION)
                };
                debug!("Using implied transfer rate {} for {}/{}", rate, from, to);
                return Ok(rate);
            }
        }

        let from_rate = self.base_rate(&from)?;
        let to_rate = self.base_rate(&to)?;

        Ok((to_rate / from_rate).round_dp(RATE_DECIMAL_PRECISION))
    }

    fn convert_amount(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal> {
        let from = normalize_code(from_currency)?;
        let to = normalize_code(to_currency)?;

        if from == to {
            return Ok(amount);
        }

        let rate = match self.get_exchange_rate(&from, &to) {
            Ok(rate) => rate,
            Err(Error::Currency(CurrencyError::RateNotFound(_))) => {
                debug!("No rate available for {}/{}, amount left unconverted", from, to);
                return Ok(amount);
            }
            Err(e) => return Err(e),
        };

        let decimal_places = match self.currency_repository.get_by_code(&to) {
            Ok(currency) => currency.decimal_places as u32,
            Err(Error::NotFound(_)) => DECIMAL_PRECISION,
            Err(e) => return Err(e),
        };

        Ok((amount * rate)
            .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero))
    }
}
