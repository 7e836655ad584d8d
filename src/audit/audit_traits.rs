use super::audit_model::{AuditLog, NewAuditLog};
use crate::errors::Result;

/// Trait defining the contract for audit log repository operations.
pub trait AuditLogRepositoryTrait: Send + Sync {
    fn record(&self, entry: NewAuditLog) -> Result<AuditLog>;
    fn list_for_model(&self, model_type: &str, model_id: &str) -> Result<Vec<AuditLog>>;
    fn list_for_owner(&self, owner_id: &str) -> Result<Vec<AuditLog>>;
}
