use async_trait::async_trait;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionUpdate, TransferCredit,
};
use crate::errors::Result;

/// Trait defining the contract for Transaction repository operations.
pub trait TransactionRepositoryTrait: Send + Sync {
    fn create(&self, owner_id: &str, new_transaction: NewTransaction) -> Result<Transaction>;
    fn update(&self, transaction_id: &str, update: TransactionUpdate) -> Result<Transaction>;
    /// Deletes the row and returns it as it was stored.
    fn delete(&self, transaction_id: &str) -> Result<Transaction>;
    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;
    fn list_for_owner(
        &self,
        owner_id: &str,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>>;
    /// Every transaction originating from the account, regardless of owner.
    fn list_for_account(&self, account_id: &str) -> Result<Vec<Transaction>>;
    /// Every transfer into the account, regardless of owner, with the source
    /// account's currency attached.
    fn list_transfers_into(&self, account_id: &str) -> Result<Vec<TransferCredit>>;
}

/// Trait defining the contract for Transaction service operations.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    async fn create_transaction(
        &self,
        owner_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;
    async fn update_transaction(
        &self,
        transaction_id: &str,
        owner_id: &str,
        update: TransactionUpdate,
    ) -> Result<Transaction>;
    async fn delete_transaction(&self, transaction_id: &str, owner_id: &str) -> Result<()>;
    fn get_transaction(&self, transaction_id: &str, owner_id: &str) -> Result<Transaction>;
    fn list_transactions(
        &self,
        owner_id: &str,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>>;
}
