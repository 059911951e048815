//! 文档存储
//! 每个逻辑文档整体读写（JSON 文件）；支持纯内存模式与事务回滚

use crate::catalog;
use crate::config::AppConfig;
use crate::error::Result;
use crate::models::application::ProviderApplication;
use crate::models::audit::AuditRecord;
use crate::models::permission::PermissionMatrix;
use crate::models::user::{ActiveSession, Role, User};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const USERS_DOC: &str = "users.json";
const CURRENT_USER_DOC: &str = "current_user.json";
const APPLICATIONS_DOC: &str = "service_provider_applications.json";
const MATRIX_DOC: &str = "permission_matrix.json";
const AUDIT_DOC: &str = "audit_log.json";

/// 存储的全部逻辑文档
#[derive(Debug, Clone)]
pub struct StoreState {
    pub users: Vec<User>,
    pub current_user: Option<ActiveSession>,
    pub applications: Vec<ProviderApplication>,
    pub permission_matrix: PermissionMatrix,
    pub audit_log: Vec<AuditRecord>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            current_user: None,
            applications: Vec::new(),
            permission_matrix: catalog::default_matrix(),
            audit_log: Vec::new(),
        }
    }
}

impl StoreState {
    pub fn find_user(&self, id: uuid::Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn find_user_mut(&mut self, id: uuid::Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// 将用户的最新状态同步到活动会话副本
    pub fn sync_session_user(&mut self, user: &User) {
        if let Some(session) = &mut self.current_user {
            if session.user.id == user.id {
                session.user = user.clone().into();
            }
        }
    }

    /// 修改用户角色并同步会话副本
    pub fn set_user_role(&mut self, user_id: uuid::Uuid, role: Role) -> Result<User> {
        let user = self
            .find_user_mut(user_id)
            .ok_or_else(|| crate::error::AppError::not_found("user"))?;
        user.role = role;
        let updated = user.clone();
        self.sync_session_user(&updated);
        Ok(updated)
    }
}

/// 文档存储句柄
///
/// 所有文档在一把锁之下；跨文档的修改通过 `with_tx` 执行，
/// 闭包或落盘失败时回滚内存状态。
pub struct Store {
    state: RwLock<StoreState>,
    data_dir: Option<PathBuf>,
}

impl Store {
    /// 纯内存存储（测试与嵌入场景）
    pub fn ephemeral() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            data_dir: None,
        }
    }

    /// 打开目录存储；缺失的文档以默认值初始化
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let state = StoreState {
            users: load_doc(dir, USERS_DOC)?.unwrap_or_default(),
            current_user: load_doc::<Option<ActiveSession>>(dir, CURRENT_USER_DOC)?.flatten(),
            applications: load_doc(dir, APPLICATIONS_DOC)?.unwrap_or_default(),
            permission_matrix: load_doc(dir, MATRIX_DOC)?.unwrap_or_else(catalog::default_matrix),
            audit_log: load_doc(dir, AUDIT_DOC)?.unwrap_or_default(),
        };

        tracing::info!(
            data_dir = %dir.display(),
            users = state.users.len(),
            applications = state.applications.len(),
            "Store opened"
        );

        Ok(Self {
            state: RwLock::new(state),
            data_dir: Some(dir.to_path_buf()),
        })
    }

    /// 根据配置选择存储介质
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match &config.storage.data_dir {
            Some(dir) => Self::open(dir),
            None => Ok(Self::ephemeral()),
        }
    }

    /// 只读访问
    pub fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        f(&self.read_guard())
    }

    /// 事务：应用闭包修改并整体落盘；任何失败都回滚内存状态
    pub fn with_tx<T>(&self, f: impl FnOnce(&mut StoreState) -> Result<T>) -> Result<T> {
        let mut guard = self.write_guard();
        let snapshot = guard.clone();

        match f(&mut guard) {
            Ok(value) => match self.flush(&guard) {
                Ok(()) => Ok(value),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to flush documents, rolling back");
                    *guard = snapshot;
                    Err(e)
                }
            },
            Err(e) => {
                *guard = snapshot;
                Err(e)
            }
        }
    }

    /// 存储健康检查
    pub fn health_check(&self) -> HealthStatus {
        match &self.data_dir {
            None => HealthStatus::Healthy,
            Some(dir) => {
                if dir.is_dir() {
                    HealthStatus::Healthy
                } else {
                    HealthStatus::Unhealthy(format!("data dir missing: {}", dir.display()))
                }
            }
        }
    }

    /// 整体重写所有文档
    fn flush(&self, state: &StoreState) -> Result<()> {
        if let Some(dir) = &self.data_dir {
            write_doc(dir, USERS_DOC, &state.users)?;
            write_doc(dir, CURRENT_USER_DOC, &state.current_user)?;
            write_doc(dir, APPLICATIONS_DOC, &state.applications)?;
            write_doc(dir, MATRIX_DOC, &state.permission_matrix)?;
            write_doc(dir, AUDIT_DOC, &state.audit_log)?;
        }
        Ok(())
    }

    // 事务失败总是先回滚再返回，锁即使毒化，其中也只有一致状态
    fn read_guard(&self) -> RwLockReadGuard<'_, StoreState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, StoreState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// 健康状态
#[derive(Debug, Clone)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

fn load_doc<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<T>> {
    let path = dir.join(name);
    if !path.exists() {
        return Ok(None);
    }
    let raw = fs::read_to_string(&path)?;
    let value = serde_json::from_str(&raw)?;
    Ok(Some(value))
}

fn write_doc<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(dir.join(name), json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_ephemeral_store_seeds_default_matrix() {
        let store = Store::ephemeral();
        let total: usize = store.read(|state| {
            state
                .permission_matrix
                .values()
                .map(|row| row.len())
                .sum()
        });
        assert!(total > 0);
    }

    #[test]
    fn test_tx_rolls_back_on_error() {
        let store = Store::ephemeral();

        let result: Result<()> = store.with_tx(|state| {
            state.permission_matrix.clear();
            Err(AppError::validation("boom"))
        });

        assert!(result.is_err());
        // 失败的事务不留痕迹
        store.read(|state| assert!(!state.permission_matrix.is_empty()));
    }

    #[test]
    fn test_tx_commits_on_success() {
        let store = Store::ephemeral();

        store
            .with_tx(|state| {
                state.permission_matrix.clear();
                Ok(())
            })
            .unwrap();

        store.read(|state| assert!(state.permission_matrix.is_empty()));
    }

    #[test]
    fn test_health_check_ephemeral() {
        let store = Store::ephemeral();
        assert!(matches!(store.health_check(), HealthStatus::Healthy));
    }
}
