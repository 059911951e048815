//! 审计日志服务

use crate::{
    error::AppError, models::audit::AuditRecord, repository::audit_repo::AuditRepository,
    store::Store,
};
use std::sync::Arc;
use uuid::Uuid;

/// 审计操作类型
#[derive(Debug, Clone, Copy)]
pub enum AuditAction {
    // 用户相关
    UserSignup,
    UserLogin,
    UserLogout,
    UserUpdate,
    UserRoleChange,

    // 入驻申请相关
    ApplicationSubmit,
    ApplicationApprove,
    ApplicationReject,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::UserSignup => "user.signup",
            AuditAction::UserLogin => "user.login",
            AuditAction::UserLogout => "user.logout",
            AuditAction::UserUpdate => "user.update",
            AuditAction::UserRoleChange => "user.role_change",

            AuditAction::ApplicationSubmit => "application.submit",
            AuditAction::ApplicationApprove => "application.approve",
            AuditAction::ApplicationReject => "application.reject",
        }
    }
}

pub struct AuditService {
    store: Arc<Store>,
}

impl AuditService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 记录审计日志条目
    pub fn record(
        &self,
        actor: &str,
        action: AuditAction,
        resource_id: Option<Uuid>,
        summary: Option<&str>,
    ) -> Result<(), AppError> {
        let record = AuditRecord {
            id: Uuid::new_v4(),
            actor: actor.to_string(),
            action: action.as_str().to_string(),
            resource_id,
            summary: summary.map(|s| s.to_string()),
            occurred_at: chrono::Utc::now(),
        };

        let repo = AuditRepository::new(self.store.clone());
        repo.append(&record)?;

        Ok(())
    }

    /// 查询最近的审计日志
    pub fn recent(&self, limit: usize) -> Vec<AuditRecord> {
        let repo = AuditRepository::new(self.store.clone());
        repo.recent(limit)
    }
}
