//! Audit log models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 审计日志条目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    /// 触发操作的主体（用户邮箱或审核人名称）
    pub actor: String,
    /// 点分操作名，例如 "application.approve"
    pub action: String,
    pub resource_id: Option<Uuid>,
    pub summary: Option<String>,
    pub occurred_at: DateTime<Utc>,
}
