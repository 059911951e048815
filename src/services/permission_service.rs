//! 权限查询与编辑服务

use crate::{
    catalog,
    error::AppError,
    models::permission::PermissionRow,
    models::user::Role,
    repository::permission_repo::PermissionRepository,
    store::Store,
};
use std::sync::Arc;
use tracing::info;

pub struct PermissionService {
    store: Arc<Store>,
}

impl PermissionService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 角色当前生效的权限行
    ///
    /// 矩阵中没有该角色条目时返回空行，即不授予任何权限。
    pub fn effective_permissions(&self, role: Role) -> PermissionRow {
        let repo = PermissionRepository::new(self.store.clone());
        repo.row(role)
    }

    /// 开关单个权限
    ///
    /// 目录中未为该角色声明的键会被拒绝，而不是悄悄写入。
    pub fn set_permission(
        &self,
        role: Role,
        key: &str,
        value: bool,
    ) -> Result<PermissionRow, AppError> {
        if !catalog::declares(role, key) {
            return Err(AppError::Validation(format!(
                "permission '{}' is not defined for role {}",
                key, role
            )));
        }

        let repo = PermissionRepository::new(self.store.clone());
        let row = repo.set_key(role, key, value)?;

        info!(role = %role, key = key, value = value, "Permission updated");
        Ok(row)
    }

    /// 批量开关角色当前定义的所有权限（不增删键）
    pub fn set_all_permissions(&self, role: Role, value: bool) -> Result<PermissionRow, AppError> {
        let repo = PermissionRepository::new(self.store.clone());
        let row = repo.set_all(role, value)?;

        info!(role = %role, value = value, count = row.len(), "Permissions bulk updated");
        Ok(row)
    }

    /// 已启用/总数统计（展示与断言用，纯派生）
    pub fn count_enabled(&self, role: Role) -> (usize, usize) {
        let row = self.effective_permissions(role);
        let enabled = row.values().filter(|v| **v).count();
        (enabled, row.len())
    }
}
