//! 配置系统
//! 从环境变量加载所有配置

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 文档存储目录；为空时仅在内存中运行
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// 日志级别: trace, debug, info, warn, error
    pub level: String,
    /// 日志格式: json, pretty
    pub format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// 密码最小长度
    pub password_min_length: usize,
    /// 密码必须包含大写字母
    pub password_require_uppercase: bool,
    /// 密码必须包含数字
    pub password_require_digit: bool,
    /// 密码必须包含特殊字符
    pub password_require_special: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Config::builder();

        // 添加默认配置
        settings = settings
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            .set_default("security.password_min_length", 8)?
            .set_default("security.password_require_uppercase", true)?
            .set_default("security.password_require_digit", true)?
            .set_default("security.password_require_special", false)?;

        // 从环境变量加载配置（前缀为 SPORTHUB_）
        settings = settings.add_source(
            Environment::with_prefix("SPORTHUB")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;

        // 验证配置
        config.validate()?;

        Ok(config)
    }

    /// 验证配置合法性
    fn validate(&self) -> Result<(), ConfigError> {
        // 验证日志级别
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                    self.logging.level
                )))
            }
        }

        // 验证日志格式
        match self.logging.format.to_lowercase().as_str() {
            "json" | "pretty" => {}
            _ => {
                return Err(ConfigError::Message(format!(
                    "Invalid log format: {}. Must be one of: json, pretty",
                    self.logging.format
                )))
            }
        }

        // 验证密码策略
        if self.security.password_min_length < 6 || self.security.password_min_length > 128 {
            return Err(ConfigError::Message(
                "password_min_length must be between 6 and 128".to_string(),
            ));
        }

        // 验证存储目录非空字符串
        if let Some(dir) = &self.storage.data_dir {
            if dir.trim().is_empty() {
                return Err(ConfigError::Message(
                    "storage.data_dir must not be empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_defaults() {
        // 清理所有可能的环境变量
        std::env::remove_var("SPORTHUB_STORAGE__DATA_DIR");
        std::env::remove_var("SPORTHUB_LOGGING__LEVEL");
        std::env::remove_var("SPORTHUB_LOGGING__FORMAT");
        std::env::remove_var("SPORTHUB_SECURITY__PASSWORD_MIN_LENGTH");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.security.password_min_length, 8);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    #[serial]
    fn test_config_reads_env() {
        std::env::remove_var("SPORTHUB_LOGGING__LEVEL");
        std::env::set_var("SPORTHUB_STORAGE__DATA_DIR", "/tmp/sporthub-test");
        std::env::set_var("SPORTHUB_LOGGING__LEVEL", "debug");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.storage.data_dir.as_deref(), Some("/tmp/sporthub-test"));
        assert_eq!(config.logging.level, "debug");

        std::env::remove_var("SPORTHUB_STORAGE__DATA_DIR");
        std::env::remove_var("SPORTHUB_LOGGING__LEVEL");
    }

    #[test]
    #[serial]
    fn test_config_validation_invalid_log_level() {
        std::env::remove_var("SPORTHUB_STORAGE__DATA_DIR");
        std::env::set_var("SPORTHUB_LOGGING__LEVEL", "invalid");

        let result = AppConfig::from_env();
        assert!(result.is_err());

        std::env::remove_var("SPORTHUB_LOGGING__LEVEL");
    }

    #[test]
    #[serial]
    fn test_config_validation_password_length() {
        std::env::remove_var("SPORTHUB_STORAGE__DATA_DIR");
        std::env::set_var("SPORTHUB_SECURITY__PASSWORD_MIN_LENGTH", "3");

        let result = AppConfig::from_env();
        assert!(result.is_err());

        std::env::remove_var("SPORTHUB_SECURITY__PASSWORD_MIN_LENGTH");
    }
}
