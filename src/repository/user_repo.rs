//! User repository (用户文档访问)

use crate::{
    error::AppError,
    models::user::{Role, UpdateUserRequest, User},
    store::Store,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct UserRepository {
    store: Arc<Store>,
}

impl UserRepository {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    // ==================== Lookups ====================

    /// 根据邮箱查找用户（区分大小写的精确匹配）
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.store
            .read(|state| state.users.iter().find(|u| u.email == email).cloned())
    }

    /// 根据 ID 查找用户
    pub fn find_by_id(&self, id: &Uuid) -> Option<User> {
        self.store.read(|state| state.find_user(*id).cloned())
    }

    /// 邮箱是否已注册
    pub fn email_exists(&self, email: &str) -> bool {
        self.store
            .read(|state| state.users.iter().any(|u| u.email == email))
    }

    /// 列出所有用户
    pub fn list(&self) -> Vec<User> {
        self.store.read(|state| state.users.clone())
    }

    /// 统计用户数量
    pub fn count(&self) -> usize {
        self.store.read(|state| state.users.len())
    }

    // ==================== Mutations ====================

    /// 创建用户；邮箱冲突时不写入
    pub fn create(&self, user: &User) -> Result<(), AppError> {
        self.store.with_tx(|state| {
            if state.users.iter().any(|u| u.email == user.email) {
                return Err(AppError::DuplicateEmail);
            }
            state.users.push(user.clone());
            Ok(())
        })
    }

    /// 更新用户资料（仅合并给出的字段，last-write-wins）
    pub fn update(&self, id: Uuid, req: &UpdateUserRequest) -> Result<User, AppError> {
        self.store.with_tx(|state| {
            let user = state
                .find_user_mut(id)
                .ok_or_else(|| AppError::not_found("user"))?;

            if let Some(name) = &req.name {
                user.name = name.clone();
            }
            if let Some(phone) = &req.phone {
                user.phone = phone.clone();
            }
            if let Some(location) = &req.location {
                user.location = location.clone();
            }
            if let Some(bio) = &req.bio {
                user.bio = bio.clone();
            }
            if let Some(sports) = &req.sports {
                user.sports = sports.clone();
            }
            if let Some(avatar) = &req.avatar {
                user.avatar = avatar.clone();
            }

            let updated = user.clone();
            // 活动会话持有用户副本，一并更新
            state.sync_session_user(&updated);
            Ok(updated)
        })
    }

    /// 修改用户角色
    pub fn set_role(&self, id: Uuid, role: Role) -> Result<User, AppError> {
        self.store.with_tx(|state| state.set_user_role(id, role))
    }
}
