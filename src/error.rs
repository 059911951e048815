//! 统一错误模型
//! 定义所有错误类型和对外的错误消息格式

use thiserror::Error;

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not signed in")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            // 固定文案：不泄露邮箱是否已注册之外的任何细节
            AppError::DuplicateEmail => "Email is already registered".to_string(),
            // 固定文案：登录失败不泄露邮箱是否存在
            AppError::InvalidCredentials => "Invalid email or password".to_string(),
            AppError::Unauthorized => "Not signed in".to_string(),
            AppError::NotFound(msg) => format!("Resource not found: {}", msg),
            AppError::InvalidTransition(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Storage(_) => "Storage error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal(_) => "Internal error".to_string(),
        }
    }

    /// 错误是否可由调用方恢复（重试或修正输入）
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            AppError::Storage(_) | AppError::Config(_) | AppError::Internal(_)
        )
    }

    // 便捷方法
    pub fn not_found(msg: &str) -> Self {
        AppError::NotFound(msg.to_string())
    }

    pub fn invalid_transition(msg: &str) -> Self {
        AppError::InvalidTransition(msg.to_string())
    }

    pub fn validation(msg: &str) -> Self {
        AppError::Validation(msg.to_string())
    }

    pub fn storage(msg: &str) -> Self {
        AppError::Storage(msg.to_string())
    }

    pub fn internal_error(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}

/// 从 IO 错误转换（文档读写）
impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

/// 从 JSON 序列化错误转换
impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Storage(e.to_string())
    }
}

/// 从 config::ConfigError 转换
impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

/// 从字段校验错误转换
impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}
