use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::accounts_model::{Account, AccountUpdate, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::audit::{snapshot, AuditAction, AuditLogRepositoryTrait, NewAuditLog};
use crate::currencies::CurrencyRepositoryTrait;
use crate::errors::{Error, Result, ValidationError};

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    currency_repository: Arc<dyn CurrencyRepositoryTrait>,
    audit_repository: Arc<dyn AuditLogRepositoryTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(
        repository: Arc<dyn AccountRepositoryTrait>,
        currency_repository: Arc<dyn CurrencyRepositoryTrait>,
        audit_repository: Arc<dyn AuditLogRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            currency_repository,
            audit_repository,
        }
    }

    fn record_audit(&self, entry: NewAuditLog) {
        if let Err(e) = self.audit_repository.record(entry) {
            warn!("Failed to record audit entry: {}", e);
        }
    }

    /// Loads an account and verifies it belongs to the given owner.
    fn get_owned(&self, account_id: &str, owner_id: &str) -> Result<Account> {
        let account = self.repository.get_by_id(account_id)?;
        if account.owner_id != owner_id {
            return Err(Error::Forbidden(
                "Unauthorized access to account".to_string(),
            ));
        }
        Ok(account)
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, owner_id: &str, new_account: NewAccount) -> Result<Account> {
        new_account.validate()?;
        debug!(
            "Creating account '{}' for owner {}",
            new_account.name, owner_id
        );

        let currency = self
            .currency_repository
            .get_by_code(&new_account.currency_code.to_ascii_uppercase())?;
        if !currency.is_active {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Currency {} is not active",
                currency.code
            ))));
        }

        let created = self.repository.create(owner_id, new_account)?;

        self.record_audit(
            NewAuditLog::event(
                owner_id,
                AuditAction::Created,
                "Account",
                &created.id,
                &created.name,
            )
            .with_new_values(snapshot(&created)),
        );

        Ok(created)
    }

    async fn update_account(
        &self,
        account_id: &str,
        owner_id: &str,
        update: AccountUpdate,
    ) -> Result<Account> {
        update.validate()?;

        let previous = self.get_owned(account_id, owner_id)?;
        let updated = self.repository.update(&previous.id, update)?;

        self.record_audit(
            NewAuditLog::event(
                owner_id,
                AuditAction::Updated,
                "Account",
                &updated.id,
                &updated.name,
            )
            .with_old_values(snapshot(&previous))
            .with_new_values(snapshot(&updated)),
        );

        Ok(updated)
    }

    async fn delete_account(&self, account_id: &str, owner_id: &str) -> Result<()> {
        let previous = self.get_owned(account_id, owner_id)?;
        self.repository.delete(&previous.id)?;

        self.record_audit(
            NewAuditLog::event(
                owner_id,
                AuditAction::Deleted,
                "Account",
                &previous.id,
                &previous.name,
            )
            .with_old_values(snapshot(&previous)),
        );

        Ok(())
    }

    async fn set_account_active(
        &self,
        account_id: &str,
        owner_id: &str,
        active: bool,
    ) -> Result<Account> {
        let previous = self.get_owned(account_id, owner_id)?;
        let updated = self.repository.set_active(&previous.id, active)?;

        self.record_audit(
            NewAuditLog::event(
                owner_id,
                AuditAction::Updated,
                "Account",
                &updated.id,
                &updated.name,
            )
            .with_old_values(snapshot(&previous))
            .with_new_values(snapshot(&updated)),
        );

        Ok(updated)
    }

    fn get_account(&self, account_id: &str, owner_id: &str) -> Result<Account> {
        self.get_owned(account_id, owner_id)
    }

    fn list_accounts(
        &self,
        owner_id: &str,
        is_active_filter: Option<bool>,
    ) -> Result<Vec<Account>> {
        self.repository.list_for_owner(owner_id, is_active_filter)
    }

    fn get_active_accounts(&self, owner_id: &str) -> Result<Vec<Account>> {
        self.repository.list_for_owner(owner_id, Some(true))
    }
}
