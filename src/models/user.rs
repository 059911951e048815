//! User and role domain models

use chrono::{DateTime, NaiveDate, Utc};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// 新用户的默认头像
pub const DEFAULT_AVATAR: &str = "👤";

/// Role
///
/// Fixed set of identity classes. Roles are not ordered; each carries an
/// independent permission set (see `catalog`).
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Player,
    Coach,
    ShopOwner,
    ComplexOwner,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Player,
        Role::Coach,
        Role::ShopOwner,
        Role::ComplexOwner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Player => "player",
            Role::Coach => "coach",
            Role::ShopOwner => "shop_owner",
            Role::ComplexOwner => "complex_owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User account (backing record, includes the credential hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,

    // Profile
    pub phone: String,
    pub location: String,
    pub bio: String,
    pub sports: BTreeSet<String>,
    pub avatar: String,

    // Access
    pub role: Role,
    pub join_date: NaiveDate,
}

/// Sign-up request
#[derive(Debug, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be well-formed"))]
    pub email: String,
    pub password: Secret<String>,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub location: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: Secret<String>,
}

/// Update user request（仅更新给出的字段）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub sports: Option<BTreeSet<String>>,
    pub avatar: Option<String>,
}

/// User response (without sensitive data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub bio: String,
    pub sports: BTreeSet<String>,
    pub avatar: String,
    pub role: Role,
    pub join_date: NaiveDate,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            location: user.location,
            bio: user.bio,
            sports: user.sports,
            avatar: user.avatar,
            role: user.role,
            join_date: user.join_date,
        }
    }
}

/// 当前会话文档（持久化为 current_user，不含凭据）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveSession {
    pub token_hash: String,
    pub user: UserResponse,
    pub logged_in_at: DateTime<Utc>,
}
