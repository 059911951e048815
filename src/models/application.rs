//! Provider application domain models
//! 服务商入驻申请与审核记录

use crate::models::user::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;
use validator::Validate;

/// 申请类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationKind {
    /// 场地（球场/场馆）
    Ground,
    /// 教练
    Coach,
    /// 商铺
    Shop,
}

impl ApplicationKind {
    /// 审核通过后授予的角色（显式枚举映射，不从字符串推断）
    pub fn granted_role(&self) -> Role {
        match self {
            ApplicationKind::Ground => Role::ComplexOwner,
            ApplicationKind::Coach => Role::Coach,
            ApplicationKind::Shop => Role::ShopOwner,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationKind::Ground => "ground",
            ApplicationKind::Coach => "coach",
            ApplicationKind::Shop => "shop",
        }
    }
}

/// 申请状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// 待审核
    Pending,
    /// 已通过
    Approved,
    /// 已拒绝
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 上传文件的元数据（不含文件内容）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMeta {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

/// Applicant contact details
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PersonalInfo {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be well-formed"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    pub location: String,
}

/// Business details
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BusinessInfo {
    #[validate(length(min = 1, message = "business name is required"))]
    pub business_name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    pub experience: String,
    pub specialties: BTreeSet<String>,
}

/// Submitted documents (metadata only)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplicationDocuments {
    #[validate(length(min = 1, message = "at least one photo is required"))]
    pub photos: Vec<DocumentMeta>,
    pub certificates: Vec<DocumentMeta>,
    #[validate(required(message = "an identity document is required"))]
    pub id_card: Option<DocumentMeta>,
}

/// 审核记录；仅在申请离开 pending 后存在
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewStamp {
    pub reviewed_by: String,
    pub reviewed_at: DateTime<Utc>,
    pub notes: String,
}

/// 服务商入驻申请
///
/// 申请从不物理删除，决定后保留作为审计记录。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderApplication {
    pub id: Uuid,
    /// 提交申请的账户；审核通过时据此升级角色
    pub applicant_id: Uuid,
    pub kind: ApplicationKind,
    pub personal_info: PersonalInfo,
    pub business_info: BusinessInfo,
    pub documents: ApplicationDocuments,

    // 状态
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
    /// None 当且仅当 status == Pending
    pub review: Option<ReviewStamp>,
}

/// 提交申请请求
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SubmitApplicationRequest {
    pub kind: ApplicationKind,
    #[validate(nested)]
    pub personal_info: PersonalInfo,
    #[validate(nested)]
    pub business_info: BusinessInfo,
    #[validate(nested)]
    pub documents: ApplicationDocuments,
}

/// 审核结论
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}
