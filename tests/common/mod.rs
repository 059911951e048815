//! 测试公共模块
//! 提供测试辅助函数和测试工具

use secrecy::Secret;
use sporthub::{
    auth::session::Session,
    config::{AppConfig, LoggingConfig, SecurityConfig, StorageConfig},
    models::application::{
        ApplicationDocuments, ApplicationKind, BusinessInfo, DocumentMeta, PersonalInfo,
        SubmitApplicationRequest,
    },
    models::user::SignUpRequest,
    services::{ApplicationService, AuditService, IdentityService, PermissionService, ReviewService},
    store::Store,
};
use std::sync::Arc;

/// 测试用统一密码（满足默认密码策略）
pub const TEST_PASSWORD: &str = "TestPass123";

/// 创建测试配置
pub fn create_test_config() -> AppConfig {
    AppConfig {
        storage: StorageConfig { data_dir: None },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            password_min_length: 8,
            password_require_uppercase: true,
            password_require_digit: true,
            password_require_special: false,
        },
    }
}

/// 创建内存存储
pub fn setup_store() -> Arc<Store> {
    Arc::new(Store::ephemeral())
}

pub fn identity_service(store: &Arc<Store>) -> IdentityService {
    IdentityService::new(store.clone(), Arc::new(create_test_config()))
}

pub fn application_service(store: &Arc<Store>) -> ApplicationService {
    ApplicationService::new(store.clone())
}

pub fn review_service(store: &Arc<Store>) -> ReviewService {
    ReviewService::new(store.clone(), Arc::new(AuditService::new(store.clone())))
}

pub fn permission_service(store: &Arc<Store>) -> PermissionService {
    PermissionService::new(store.clone())
}

/// 注册测试用户并返回会话
pub fn sign_up(identity: &IdentityService, name: &str, email: &str) -> Session {
    identity
        .sign_up(SignUpRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: Secret::new(TEST_PASSWORD.to_string()),
            phone: "+86-1380000000".to_string(),
            location: "Hangzhou".to_string(),
        })
        .expect("Failed to sign up test user")
}

/// 构造一份文件元数据
pub fn sample_document(file_name: &str) -> DocumentMeta {
    DocumentMeta {
        file_name: file_name.to_string(),
        content_type: "image/jpeg".to_string(),
        size_bytes: 204_800,
    }
}

/// 构造一份字段齐全的入驻申请
pub fn sample_application(kind: ApplicationKind) -> SubmitApplicationRequest {
    SubmitApplicationRequest {
        kind,
        personal_info: PersonalInfo {
            name: "Wang Lei".to_string(),
            email: "wang.lei@example.com".to_string(),
            phone: "+86-1390000000".to_string(),
            location: "Hangzhou".to_string(),
        },
        business_info: BusinessInfo {
            business_name: "Lakeside Sports".to_string(),
            description: "Courts, coaching and gear by the west lake".to_string(),
            experience: "8 years".to_string(),
            specialties: ["badminton".to_string(), "tennis".to_string()]
                .into_iter()
                .collect(),
        },
        documents: ApplicationDocuments {
            photos: vec![sample_document("front.jpg"), sample_document("court.jpg")],
            certificates: vec![sample_document("license.pdf")],
            id_card: Some(sample_document("id.jpg")),
        },
    }
}
