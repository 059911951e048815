//! 入驻申请登记服务

use crate::{
    error::AppError,
    models::application::{
        ApplicationStatus, ProviderApplication, SubmitApplicationRequest,
    },
    repository::application_repo::ApplicationRepository,
    services::audit_service::{AuditAction, AuditService},
    store::Store,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

pub struct ApplicationService {
    store: Arc<Store>,
}

impl ApplicationService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 提交入驻申请
    ///
    /// 表单层已经做过预校验，这里仍然防御性地再校验一次。
    /// 同一账户同时只允许一份待审核申请。
    #[instrument(skip(self, req))]
    pub fn submit(
        &self,
        applicant_id: Uuid,
        req: SubmitApplicationRequest,
    ) -> Result<ProviderApplication, AppError> {
        req.validate()?;

        let application = self.store.with_tx(|state| {
            if state.find_user(applicant_id).is_none() {
                return Err(AppError::not_found("applicant account"));
            }

            if state.applications.iter().any(|a| {
                a.applicant_id == applicant_id && a.status == ApplicationStatus::Pending
            }) {
                return Err(AppError::validation(
                    "a provider application is already pending for this account",
                ));
            }

            let application = ProviderApplication {
                id: Uuid::new_v4(),
                applicant_id,
                kind: req.kind,
                personal_info: req.personal_info.clone(),
                business_info: req.business_info.clone(),
                documents: req.documents.clone(),
                status: ApplicationStatus::Pending,
                submitted_at: Utc::now(),
                review: None,
            };

            state.applications.push(application.clone());
            Ok(application)
        })?;

        // 忽略审计日志错误，不要破坏请求流程
        let _ = AuditService::new(self.store.clone()).record(
            &application.personal_info.email,
            AuditAction::ApplicationSubmit,
            Some(application.id),
            Some(application.kind.as_str()),
        );

        info!(
            application_id = %application.id,
            kind = application.kind.as_str(),
            "Provider application submitted"
        );
        Ok(application)
    }

    /// 按状态过滤列出申请，最近提交的在前
    pub fn list(&self, status: Option<ApplicationStatus>) -> Vec<ProviderApplication> {
        let repo = ApplicationRepository::new(self.store.clone());
        repo.list(status)
    }

    /// 获取单个申请
    pub fn get(&self, id: &Uuid) -> Result<ProviderApplication, AppError> {
        let repo = ApplicationRepository::new(self.store.clone());
        repo.get(id)
    }
}
