use async_trait::async_trait;
use rust_decimal::Decimal;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use crate::errors::Result;

/// Trait defining the contract for Account repository operations.
pub trait AccountRepositoryTrait: Send + Sync {
    fn create(&self, owner_id: &str, new_account: NewAccount) -> Result<Account>;
    fn update(&self, account_id: &str, update: AccountUpdate) -> Result<Account>;
    fn set_active(&self, account_id: &str, active: bool) -> Result<Account>;
    fn delete(&self, account_id: &str) -> Result<()>;
    fn get_by_id(&self, account_id: &str) -> Result<Account>;
    fn list_for_owner(
        &self,
        owner_id: &str,
        is_active_filter: Option<bool>,
    ) -> Result<Vec<Account>>;
    fn save_balance(&self, account_id: &str, balance: Decimal) -> Result<()>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn create_account(&self, owner_id: &str, new_account: NewAccount) -> Result<Account>;
    async fn update_account(
        &self,
        account_id: &str,
        owner_id: &str,
        update: AccountUpdate,
    ) -> Result<Account>;
    async fn delete_account(&self, account_id: &str, owner_id: &str) -> Result<()>;
    async fn set_account_active(
        &self,
        account_id: &str,
        owner_id: &str,
        active: bool,
    ) -> Result<Account>;
    fn get_account(&self, account_id: &str, owner_id: &str) -> Result<Account>;
    fn list_accounts(
        &self,
        owner_id: &str,
        is_active_filter: Option<bool>,
    ) -> Result<Vec<Account>>;
    fn get_active_accounts(&self, owner_id: &str) -> Result<Vec<Account>>;
}
