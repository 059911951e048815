//! Permission matrix types
//!
//! The matrix maps each role to its own key set. A key missing from a
//! role's row means "not applicable" for that role, which is different
//! from `false` ("applicable but disabled").

use crate::models::user::Role;
use std::collections::BTreeMap;

/// 单个角色的权限行：权限键 -> 是否启用
pub type PermissionRow = BTreeMap<String, bool>;

/// 全量权限矩阵：角色 -> 权限行
pub type PermissionMatrix = BTreeMap<Role, PermissionRow>;
