use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::account_locks::{acquire, AccountLockRegistry};
use super::balance_calculator::calculate_balance;
use crate::accounts::AccountRepositoryTrait;
use crate::currencies::CurrencyRepositoryTrait;
use crate::errors::{Error, Result};
use crate::transactions::TransactionRepositoryTrait;

/// Recomputes account balances from the full ledger and persists the result.
///
/// Balances are always derived by a full rescan of the account's
/// transactions. There is no incremental path; this keeps the stored balance
/// immune to drift at the cost of an O(transaction count) scan per affected
/// account per mutation, a known scaling limit for very large accounts.
pub struct BalanceService {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    currency_repository: Arc<dyn CurrencyRepositoryTrait>,
    locks: Arc<AccountLockRegistry>,
}

impl BalanceService {
    /// Creates a new BalanceService instance
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        currency_repository: Arc<dyn CurrencyRepositoryTrait>,
        locks: Arc<AccountLockRegistry>,
    ) -> Self {
        Self {
            account_repository,
            transaction_repository,
            currency_repository,
            locks,
        }
    }

    /// Registry serializing writes that touch an account. Ledger writers hold
    /// the affected accounts' locks around the row write and recomputation.
    pub fn lock_registry(&self) -> &Arc<AccountLockRegistry> {
        &self.locks
    }

    /// Recomputes one account under its own lock.
    ///
    /// Entry point for reconciliation callers outside a ledger write.
    pub fn recompute_account(&self, account_id: &str) -> Result<Decimal> {
        let handle = self.locks.handle(account_id);
        let _guard = acquire(&handle);
        self.recompute_unlocked(account_id)
    }

    /// Recomputes one account. The caller must already hold the account's
    /// lock.
    pub(crate) fn recompute_unlocked(&self, account_id: &str) -> Result<Decimal> {
        self.recompute_inner(account_id)
            .map_err(|e| Error::recompute_failure(account_id, e))
    }

    fn recompute_inner(&self, account_id: &str) -> Result<Decimal> {
        let account = self.account_repository.get_by_id(account_id)?;
        let currency = self
            .currency_repository
            .get_by_code(&account.currency_code)?;

        // Tenant-agnostic reads: every row referencing the account counts,
        // whoever owns it.
        let outgoing = self.transaction_repository.list_for_account(account_id)?;
        let incoming = self
            .transaction_repository
            .list_transfers_into(account_id)?;

        let balance = calculate_balance(
            account.initial_balance,
            &outgoing,
            &incoming,
            &account.currency_code,
            currency.decimal_places as u32,
        );

        self.account_repository.save_balance(account_id, balance)?;
        debug!("Recomputed balance for account {}: {}", account_id, balance);

        Ok(balance)
    }
}
