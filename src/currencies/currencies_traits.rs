use async_trait::async_trait;

use super::currencies_model::{Currency, CurrencyUpdate, NewCurrency};
use crate::errors::Result;

/// Trait defining the contract for Currency repository operations.
pub trait CurrencyRepositoryTrait: Send + Sync {
    fn get_by_code(&self, code: &str) -> Result<Currency>;
    fn list(&self) -> Result<Vec<Currency>>;
    fn list_active(&self) -> Result<Vec<Currency>>;
    fn create(&self, new_currency: NewCurrency) -> Result<Currency>;
    fn update(&self, code: &str, update: CurrencyUpdate) -> Result<Currency>;
}

/// Trait defining the contract for Currency service operations.
#[async_trait]
pub trait CurrencyServiceTrait: Send + Sync {
    fn get_currency(&self, code: &str) -> Result<Currency>;
    fn list_currencies(&self) -> Result<Vec<Currency>>;
    fn list_active_currencies(&self) -> Result<Vec<Currency>>;
    async fn create_currency(&self, actor_id: &str, new_currency: NewCurrency) -> Result<Currency>;
    async fn update_currency(
        &self,
        actor_id: &str,
        code: &str,
        update: CurrencyUpdate,
    ) -> Result<Currency>;
}
