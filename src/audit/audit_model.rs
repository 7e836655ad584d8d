use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A recorded change to a watched model. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: String,
    pub owner_id: String,
    pub action: String,
    pub model_type: String,
    pub model_id: String,
    pub old_values: Option<Value>,
    pub new_values: Option<Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

/// Input model for appending an audit entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAuditLog {
    pub owner_id: String,
    pub action: String,
    pub model_type: String,
    pub model_id: String,
    pub old_values: Option<Value>,
    pub new_values: Option<Value>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub description: Option<String>,
}

impl NewAuditLog {
    /// Builds an entry describing `action` applied to one model instance,
    /// with a human-readable description like "Created Account: Checking".
    pub fn event(
        owner_id: &str,
        action: AuditAction,
        model_type: &str,
        model_id: &str,
        label: &str,
    ) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            action: action.as_str().to_string(),
            model_type: model_type.to_string(),
            model_id: model_id.to_string(),
            old_values: None,
            new_values: None,
            ip_address: None,
            user_agent: None,
            description: Some(format!("{} {}: {}", action.label(), model_type, label)),
        }
    }

    pub fn with_old_values(mut self, values: Option<Value>) -> Self {
        self.old_values = values;
        self
    }

    pub fn with_new_values(mut self, values: Option<Value>) -> Self {
        self.new_values = values;
        self
    }
}

/// Serializes a model into a JSON snapshot for before/after recording.
pub fn snapshot<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

/// Enum representing the recorded audit actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Created => "created",
            AuditAction::Updated => "updated",
            AuditAction::Deleted => "deleted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuditAction::Created => "Created",
            AuditAction::Updated => "Updated",
            AuditAction::Deleted => "Deleted",
        }
    }
}

/// Database model for audit log entries
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::audit_logs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AuditLogDB {
    pub id: String,
    pub owner_id: String,
    pub action: String,
    pub model_type: String,
    pub model_id: String,
    pub old_values: Option<String>,
    pub new_values: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

// Conversion implementations
impl From<AuditLogDB> for AuditLog {
    fn from(db: AuditLogDB) -> Self {
        Self {
            id: db.id,
            owner_id: db.owner_id,
            action: db.action,
            model_type: db.model_type,
            model_id: db.model_id,
            old_values: db.old_values.and_then(|s| serde_json::from_str(&s).ok()),
            new_values: db.new_values.and_then(|s| serde_json::from_str(&s).ok()),
            ip_address: db.ip_address,
            user_agent: db.user_agent,
            description: db.description,
            created_at: db.created_at,
        }
    }
}

impl From<NewAuditLog> for AuditLogDB {
    fn from(domain: NewAuditLog) -> Self {
        Self {
            id: String::new(),
            owner_id: domain.owner_id,
            action: domain.action,
            model_type: domain.model_type,
            model_id: domain.model_id,
            old_values: domain.old_values.map(|v| v.to_string()),
            new_values: domain.new_values.map(|v| v.to_string()),
            ip_address: domain.ip_address,
            user_agent: domain.user_agent,
            description: domain.description,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
