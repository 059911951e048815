//! 审核决策服务
//! 申请状态的唯一修改方；通过时同步升级申请人角色

use crate::{
    error::AppError,
    models::application::{ApplicationStatus, Decision, ProviderApplication, ReviewStamp},
    services::audit_service::{AuditAction, AuditService},
    store::Store,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// 状态机：pending --approve--> approved / pending --reject--> rejected。
/// approved 与 rejected 都是终态。
pub struct ReviewService {
    store: Arc<Store>,
    audit_service: Arc<AuditService>,
}

impl ReviewService {
    pub fn new(store: Arc<Store>, audit_service: Arc<AuditService>) -> Self {
        Self {
            store,
            audit_service,
        }
    }

    /// 审核申请（批准或拒绝）
    ///
    /// 批准时角色升级与状态盖章在同一事务内：申请人账户不存在
    /// 或落盘失败都会让整个决定回滚，申请保持 pending。
    #[instrument(skip(self, notes))]
    pub fn decide(
        &self,
        application_id: Uuid,
        decision: Decision,
        reviewer: &str,
        notes: &str,
    ) -> Result<ProviderApplication, AppError> {
        info!(
            application_id = %application_id,
            decision = ?decision,
            "Processing review decision"
        );

        let decided = self.store.with_tx(|state| {
            let idx = state
                .applications
                .iter()
                .position(|a| a.id == application_id)
                .ok_or_else(|| AppError::not_found("application"))?;

            // 只允许从 pending 出发，阻止二次决定
            let status = state.applications[idx].status;
            if status != ApplicationStatus::Pending {
                return Err(AppError::InvalidTransition(format!(
                    "application is already {}",
                    status
                )));
            }

            let (applicant_id, kind) = {
                let application = &state.applications[idx];
                (application.applicant_id, application.kind)
            };

            if decision == Decision::Approve {
                // 申请人账户已不存在时整个批准失败
                state.set_user_role(applicant_id, kind.granted_role())?;
            }

            let application = &mut state.applications[idx];
            application.status = match decision {
                Decision::Approve => ApplicationStatus::Approved,
                Decision::Reject => ApplicationStatus::Rejected,
            };
            application.review = Some(ReviewStamp {
                reviewed_by: reviewer.to_string(),
                reviewed_at: Utc::now(),
                notes: notes.to_string(),
            });

            Ok(application.clone())
        })?;

        let action = match decision {
            Decision::Approve => AuditAction::ApplicationApprove,
            Decision::Reject => AuditAction::ApplicationReject,
        };

        // 忽略审计日志错误，不要破坏请求流程
        let _ = self.audit_service.record(
            reviewer,
            action,
            Some(application_id),
            Some(decided.kind.as_str()),
        );

        info!(
            application_id = %application_id,
            new_status = decided.status.as_str(),
            "Review decision recorded"
        );
        Ok(decided)
    }
}
