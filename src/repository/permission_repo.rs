//! Permission matrix repository (权限矩阵文档访问)
//! 每次修改都会整体重写矩阵文档

use crate::{
    error::AppError,
    models::permission::{PermissionMatrix, PermissionRow},
    models::user::Role,
    store::Store,
};
use std::sync::Arc;

pub struct PermissionRepository {
    store: Arc<Store>,
}

impl PermissionRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// 完整矩阵快照
    pub fn matrix(&self) -> PermissionMatrix {
        self.store.read(|state| state.permission_matrix.clone())
    }

    /// 角色的权限行；没有显式条目时返回空行（fail-closed）
    pub fn row(&self, role: Role) -> PermissionRow {
        self.store.read(|state| {
            state
                .permission_matrix
                .get(&role)
                .cloned()
                .unwrap_or_default()
        })
    }

    /// 写入单个权限键
    pub fn set_key(&self, role: Role, key: &str, value: bool) -> Result<PermissionRow, AppError> {
        self.store.with_tx(|state| {
            let row = state.permission_matrix.entry(role).or_default();
            row.insert(key.to_string(), value);
            Ok(row.clone())
        })
    }

    /// 批量写入角色当前已定义的所有权限键（不增删键）
    pub fn set_all(&self, role: Role, value: bool) -> Result<PermissionRow, AppError> {
        self.store.with_tx(|state| {
            let row = state.permission_matrix.entry(role).or_default();
            for enabled in row.values_mut() {
                *enabled = value;
            }
            Ok(row.clone())
        })
    }
}
