//! Application repository (入驻申请文档访问)

use crate::{
    error::AppError,
    models::application::{ApplicationStatus, ProviderApplication},
    store::Store,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct ApplicationRepository {
    store: Arc<Store>,
}

impl ApplicationRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 根据 ID 查找申请
    pub fn find_by_id(&self, id: &Uuid) -> Option<ProviderApplication> {
        self.store
            .read(|state| state.applications.iter().find(|a| a.id == *id).cloned())
    }

    /// 根据 ID 获取申请，不存在时返回 NotFound
    pub fn get(&self, id: &Uuid) -> Result<ProviderApplication, AppError> {
        self.find_by_id(id)
            .ok_or_else(|| AppError::not_found("application"))
    }

    /// 按状态过滤并以提交时间倒序列出申请
    pub fn list(&self, status: Option<ApplicationStatus>) -> Vec<ProviderApplication> {
        let mut applications = self.store.read(|state| {
            state
                .applications
                .iter()
                .filter(|a| status.map_or(true, |s| a.status == s))
                .cloned()
                .collect::<Vec<_>>()
        });
        applications.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        applications
    }

    /// 该账户是否已有待审核申请
    pub fn has_pending_for(&self, applicant_id: Uuid) -> bool {
        self.store.read(|state| {
            state
                .applications
                .iter()
                .any(|a| a.applicant_id == applicant_id && a.status == ApplicationStatus::Pending)
        })
    }
}
