use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::get_connection;
use crate::errors::Result;
use crate::schema::audit_logs;

use super::audit_model::{AuditLog, AuditLogDB, NewAuditLog};
use super::audit_traits::AuditLogRepositoryTrait;

/// Repository for the append-only audit trail
pub struct AuditLogRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
}

impl AuditLogRepository {
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>) -> Self {
        Self { pool }
    }
}

impl AuditLogRepositoryTrait for AuditLogRepository {
    fn record(&self, entry: NewAuditLog) -> Result<AuditLog> {
        let mut entry_db: AuditLogDB = entry.into();
        entry_db.id = uuid::Uuid::new_v4().to_string();

        let mut conn = get_connection(&self.pool)?;

        diesel::insert_into(audit_logs::table)
            .values(&entry_db)
            .execute(&mut conn)?;

        Ok(entry_db.into())
    }

    fn list_for_model(&self, model_type: &str, model_id: &str) -> Result<Vec<AuditLog>> {
        let mut conn = get_connection(&self.pool)?;

        let entries = audit_logs::table
            .filter(audit_logs::model_type.eq(model_type))
            .filter(audit_logs::model_id.eq(model_id))
            .order(audit_logs::created_at.desc())
            .load::<AuditLogDB>(&mut conn)?;

        Ok(entries.into_iter().map(AuditLog::from).collect())
    }

    fn list_for_owner(&self, owner_id: &str) -> Result<Vec<AuditLog>> {
        let mut conn = get_connection(&self.pool)?;

        let entries = audit_logs::table
            .filter(audit_logs::owner_id.eq(owner_id))
            .order(audit_logs::created_at.desc())
            .load::<AuditLogDB>(&mut conn)?;

        Ok(entries.into_iter().map(AuditLog::from).collect())
    }
}
