use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::currencies_model::{Currency, CurrencyUpdate, NewCurrency};
use super::currencies_traits::{CurrencyRepositoryTrait, CurrencyServiceTrait};
use crate::audit::{snapshot, AuditAction, AuditLogRepositoryTrait, NewAuditLog};
use crate::errors::Result;

/// Service for managing the currency registry
pub struct CurrencyService {
    repository: Arc<dyn CurrencyRepositoryTrait>,
    audit_repository: Arc<dyn AuditLogRepositoryTrait>,
}

impl CurrencyService {
    /// Creates a new CurrencyService instance
    pub fn new(
        repository: Arc<dyn CurrencyRepositoryTrait>,
        audit_repository: Arc<dyn AuditLogRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            audit_repository,
        }
    }

    fn record_audit(&self, entry: NewAuditLog) {
        if let Err(e) = self.audit_repository.record(entry) {
            warn!("Failed to record audit entry: {}", e);
        }
    }
}

#[async_trait]
impl CurrencyServiceTrait for CurrencyService {
    fn get_currency(&self, code: &str) -> Result<Currency> {
        self.repository.get_by_code(&code.to_ascii_uppercase())
    }

    fn list_currencies(&self) -> Result<Vec<Currency>> {
        self.repository.list()
    }

    fn list_active_currencies(&self) -> Result<Vec<Currency>> {
        self.repository.list_active()
    }

    async fn create_currency(&self, actor_id: &str, new_currency: NewCurrency) -> Result<Currency> {
        new_currency.validate()?;
        debug!("Creating currency {}", new_currency.code);

        let created = self.repository.create(new_currency)?;

        self.record_audit(
            NewAuditLog::event(
                actor_id,
                AuditAction::Created,
                "Currency",
                &created.code,
                &created.code,
            )
            .with_new_values(snapshot(&created)),
        );

        Ok(created)
    }

    async fn update_currency(
        &self,
        actor_id: &str,
        code: &str,
        update: CurrencyUpdate,
    ) -> Result<Currency> {
        update.validate()?;

        let previous = self.repository.get_by_code(&code.to_ascii_uppercase())?;
        let updated = self.repository.update(&previous.code, update)?;

        self.record_audit(
            NewAuditLog::event(
                actor_id,
                AuditAction::Updated,
                "Currency",
                &updated.code,
                &updated.code,
            )
            .with_old_values(snapshot(&previous))
            .with_new_values(snapshot(&updated)),
        );

        Ok(updated)
    }
}
