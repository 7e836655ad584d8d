use async_trait::async_trait;
use log::{debug, error, warn};
use rust_decimal::Decimal;
use std::sync::Arc;

use super::transactions_model::{
    NewTransaction, Transaction, TransactionFilter, TransactionUpdate,
};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::accounts::{Account, AccountRepositoryTrait};
use crate::audit::{snapshot, AuditAction, AuditLogRepositoryTrait, NewAuditLog};
use crate::balance::{acquire, BalanceService};
use crate::errors::{Error, Result, ValidationError};

/// Service orchestrating the transaction ledger.
///
/// Every mutation follows the same shape: validate and authorize, take the
/// affected accounts' locks in ascending id order, write the row, then
/// recompute each affected account's balance while still holding the locks.
/// Recompute failures are logged and never undo the committed row write.
pub struct TransactionService {
    repository: Arc<dyn TransactionRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    balance_service: Arc<BalanceService>,
    audit_repository: Arc<dyn AuditLogRepositoryTrait>,
}

impl TransactionService {
    /// Creates a new TransactionService instance
    pub fn new(
        repository: Arc<dyn TransactionRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        balance_service: Arc<BalanceService>,
        audit_repository: Arc<dyn AuditLogRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            account_repository,
            balance_service,
            audit_repository,
        }
    }

    fn record_audit(&self, entry: NewAuditLog) {
        if let Err(e) = self.audit_repository.record(entry) {
            warn!("Failed to record audit entry: {}", e);
        }
    }

    fn get_owned_account(&self, account_id: &str, owner_id: &str) -> Result<Account> {
        let account = self.account_repository.get_by_id(account_id)?;
        if account.owner_id != owner_id {
            return Err(Error::Forbidden(
                "Unauthorized access to account".to_string(),
            ));
        }
        Ok(account)
    }

    fn get_owned_transaction(&self, transaction_id: &str, owner_id: &str) -> Result<Transaction> {
        let transaction = self.repository.get_by_id(transaction_id)?;
        if transaction.owner_id != owner_id {
            return Err(Error::Forbidden(
                "Unauthorized access to transaction".to_string(),
            ));
        }
        Ok(transaction)
    }

    /// Verifies the transfer destination and resolves the conversion fields
    /// the stored row should carry. Same-currency transfers and non-transfers
    /// never store conversion data; cross-currency transfers must supply both
    /// the rate and the converted amount.
    fn resolve_transfer(
        &self,
        owner_id: &str,
        source: &Account,
        transfer_to_account_id: Option<&str>,
        exchange_rate: Option<Decimal>,
        converted_amount: Option<Decimal>,
    ) -> Result<(Option<Decimal>, Option<Decimal>)> {
        let destination_id = match transfer_to_account_id {
            Some(id) => id,
            None => return Ok((None, None)),
        };

        // Transfers stay within one tenant; the destination is checked the
        // same way on create and on update.
        let destination = self.account_repository.get_by_id(destination_id)?;
        if destination.owner_id != owner_id {
            return Err(Error::Forbidden(
                "Transfer destination belongs to another owner".to_string(),
            ));
        }

        if destination.currency_code != source.currency_code {
            if exchange_rate.is_none() || converted_amount.is_none() {
                return Err(Error::Validation(
                    ValidationError::CrossCurrencyFieldsRequired,
                ));
            }
            Ok((exchange_rate, converted_amount))
        } else {
            Ok((None, None))
        }
    }

    /// Recomputes every affected account, logging failures without undoing
    /// the committed row write. The caller holds all the accounts' locks.
    fn recompute_affected(&self, account_ids: &[String], transaction_id: &str) {
        for account_id in account_ids {
            if let Err(e) = self.balance_service.recompute_unlocked(account_id) {
                error!(
                    "Failed to recompute balance for account {} after transaction {}: {}",
                    account_id, transaction_id, e
                );
            }
        }
    }
}

fn audit_label(transaction: &Transaction) -> String {
    transaction
        .description
        .clone()
        .unwrap_or_else(|| transaction.transaction_type.clone())
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn create_transaction(
        &self,
        owner_id: &str,
        mut new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;

        let source = self.get_owned_account(&new_transaction.account_id, owner_id)?;
        let (exchange_rate, converted_amount) = self.resolve_transfer(
            owner_id,
            &source,
            new_transaction.transfer_to_account_id.as_deref(),
            new_transaction.exchange_rate,
            new_transaction.converted_amount,
        )?;
        new_transaction.exchange_rate = exchange_rate;
        new_transaction.converted_amount = converted_amount;

        debug!(
            "Creating {} transaction on account {}",
            new_transaction.transaction_type, new_transaction.account_id
        );

        let mut affected: Vec<String> = vec![new_transaction.account_id.clone()];
        if let Some(destination_id) = &new_transaction.transfer_to_account_id {
            affected.push(destination_id.clone());
        }

        let handles = self
            .balance_service
            .lock_registry()
            .handles_in_order(&mut affected);
        let _guards: Vec<_> = handles.iter().map(|handle| acquire(handle)).collect();

        let created = self.repository.create(owner_id, new_transaction)?;
        self.recompute_affected(&affected, &created.id);

        self.record_audit(
            NewAuditLog::event(
                owner_id,
                AuditAction::Created,
                "Transaction",
                &created.id,
                &audit_label(&created),
            )
            .with_new_values(snapshot(&created)),
        );

        Ok(created)
    }

    async fn update_transaction(
        &self,
        transaction_id: &str,
        owner_id: &str,
        mut update: TransactionUpdate,
    ) -> Result<Transaction> {
        update.validate()?;

        let previous = self.get_owned_transaction(transaction_id, owner_id)?;
        let source = self.get_owned_account(&update.account_id, owner_id)?;
        let (exchange_rate, converted_amount) = self.resolve_transfer(
            owner_id,
            &source,
            update.transfer_to_account_id.as_deref(),
            update.exchange_rate,
            update.converted_amount,
        )?;
        update.exchange_rate = exchange_rate;
        update.converted_amount = converted_amount;

        // The previous source and destination are recomputed alongside the
        // new ones so a reassigned transaction releases its old effect.
        let mut affected: Vec<String> =
            vec![previous.account_id.clone(), update.account_id.clone()];
        if let Some(destination_id) = &previous.transfer_to_account_id {
            affected.push(destination_id.clone());
        }
        if let Some(destination_id) = &update.transfer_to_account_id {
            affected.push(destination_id.clone());
        }

        let handles = self
            .balance_service
            .lock_registry()
            .handles_in_order(&mut affected);
        let _guards: Vec<_> = handles.iter().map(|handle| acquire(handle)).collect();

        let updated = self.repository.update(transaction_id, update)?;
        self.recompute_affected(&affected, &updated.id);

        self.record_audit(
            NewAuditLog::event(
                owner_id,
                AuditAction::Updated,
                "Transaction",
                &updated.id,
                &audit_label(&updated),
            )
            .with_old_values(snapshot(&previous))
            .with_new_values(snapshot(&updated)),
        );

        Ok(updated)
    }

    async fn delete_transaction(&self, transaction_id: &str, owner_id: &str) -> Result<()> {
        let previous = self.get_owned_transaction(transaction_id, owner_id)?;

        let mut affected: Vec<String> = vec![previous.account_id.clone()];
        if let Some(destination_id) = &previous.transfer_to_account_id {
            affected.push(destination_id.clone());
        }

        let handles = self
            .balance_service
            .lock_registry()
            .handles_in_order(&mut affected);
        let _guards: Vec<_> = handles.iter().map(|handle| acquire(handle)).collect();

        let deleted = self.repository.delete(transaction_id)?;
        self.recompute_affected(&affected, &deleted.id);

        self.record_audit(
            NewAuditLog::event(
                owner_id,
                AuditAction::Deleted,
                "Transaction",
                &deleted.id,
                &audit_label(&deleted),
            )
            .with_old_values(snapshot(&deleted)),
        );

        Ok(())
    }

    fn get_transaction(&self, transaction_id: &str, owner_id: &str) -> Result<Transaction> {
        self.get_owned_transaction(transaction_id, owner_id)
    }

    fn list_transactions(
        &self,
        owner_id: &str,
        filter: TransactionFilter,
    ) -> Result<Vec<Transaction>> {
        self.repository.list_for_owner(owner_id, filter)
    }
}
