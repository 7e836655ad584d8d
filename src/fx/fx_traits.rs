use rust_decimal::Decimal;

use super::fx_model::ImpliedTransferRate;
use crate::errors::Result;

/// Trait defining the contract for FX repository operations.
pub trait FxRepositoryTrait: Send + Sync {
    /// Finds the newest transfer between the two currencies (either direction)
    /// that recorded both an exchange rate and a converted amount.
    fn latest_transfer_rate(
        &self,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Option<ImpliedTransferRate>>;
}

/// Trait defining the contract for FX service operations.
pub trait FxServiceTrait: Send + Sync {
    fn get_exchange_rate(&self, from_currency: &str, to_currency: &str) -> Result<Decimal>;
    fn convert_amount(&self, amount: Decimal, from_currency: &str, to_currency: &str)
        -> Result<Decimal>;
}
