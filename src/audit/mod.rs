//! Audit trail module - append-only change records for watched models.

mod audit_model;
mod audit_repository;
mod audit_traits;

// Re-export the public interface
pub use audit_model::{snapshot, AuditAction, AuditLog, AuditLogDB, NewAuditLog};
pub use audit_repository::AuditLogRepository;
pub use audit_traits::AuditLogRepositoryTrait;
