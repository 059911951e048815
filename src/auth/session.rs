//! Session tokens
//! 不透明令牌；存储侧仅保存 SHA-256 摘要

use crate::models::user::UserResponse;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// 会话令牌（仅在返回给调用方时以明文存在）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// 重新包装调用方保存的令牌
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 令牌摘要（存储与比较都用摘要，不落明文）
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// 登录/注册返回的活动会话
#[derive(Debug, Clone)]
pub struct Session {
    pub token: SessionToken,
    pub user: UserResponse,
}
