//! 权限目录
//! 声明每个角色合法的权限键、显示标签、分类与默认值。
//! 矩阵的运行时编辑见 services::permission_service。

use crate::models::permission::{PermissionMatrix, PermissionRow};
use crate::models::user::Role;
use once_cell::sync::Lazy;

/// Permission category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionCategory {
    BasicAccess,
    BookingShopping,
    Community,
    Business,
    Coach,
    Shop,
    Complex,
    Administrative,
}

impl PermissionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionCategory::BasicAccess => "Basic Access",
            PermissionCategory::BookingShopping => "Booking & Shopping",
            PermissionCategory::Community => "Community",
            PermissionCategory::Business => "Business",
            PermissionCategory::Coach => "Coach",
            PermissionCategory::Shop => "Shop",
            PermissionCategory::Complex => "Complex",
            PermissionCategory::Administrative => "Administrative",
        }
    }
}

/// 展示顺序：通用分类在前，专属分类其次，管理分类最后
pub const CATEGORY_ORDER: [PermissionCategory; 8] = [
    PermissionCategory::BasicAccess,
    PermissionCategory::BookingShopping,
    PermissionCategory::Community,
    PermissionCategory::Business,
    PermissionCategory::Coach,
    PermissionCategory::Shop,
    PermissionCategory::Complex,
    PermissionCategory::Administrative,
];

/// 单个权限的目录定义
#[derive(Debug, Clone, Copy)]
pub struct PermissionDef {
    pub key: &'static str,
    pub label: &'static str,
    pub category: PermissionCategory,
    pub default_enabled: bool,
}

const fn perm(
    key: &'static str,
    label: &'static str,
    category: PermissionCategory,
    default_enabled: bool,
) -> PermissionDef {
    PermissionDef {
        key,
        label,
        category,
        default_enabled,
    }
}

use PermissionCategory as C;

/// 普通会员：浏览、预订、社区
const PLAYER: &[PermissionDef] = &[
    perm("view_grounds", "Browse grounds", C::BasicAccess, true),
    perm("view_coaches", "Browse coaches", C::BasicAccess, true),
    perm("view_shop", "Browse the shop", C::BasicAccess, true),
    perm("view_news", "Read news & announcements", C::BasicAccess, true),
    perm("book_grounds", "Book grounds", C::BookingShopping, true),
    perm("book_coaching", "Book coaching sessions", C::BookingShopping, true),
    perm("purchase_products", "Purchase products", C::BookingShopping, true),
    perm("view_order_history", "View order history", C::BookingShopping, true),
    perm("post_reviews", "Post ratings & reviews", C::Community, true),
    perm("join_events", "Join community events", C::Community, true),
    perm("send_messages", "Message other members", C::Community, true),
];

/// 教练：通用权限之外的排课与客户管理
const COACH: &[PermissionDef] = &[
    perm("view_grounds", "Browse grounds", C::BasicAccess, true),
    perm("view_coaches", "Browse coaches", C::BasicAccess, true),
    perm("view_shop", "Browse the shop", C::BasicAccess, true),
    perm("view_news", "Read news & announcements", C::BasicAccess, true),
    perm("book_grounds", "Book grounds", C::BookingShopping, true),
    perm("book_coaching", "Book coaching sessions", C::BookingShopping, true),
    perm("purchase_products", "Purchase products", C::BookingShopping, true),
    perm("view_order_history", "View order history", C::BookingShopping, true),
    perm("post_reviews", "Post ratings & reviews", C::Community, true),
    perm("join_events", "Join community events", C::Community, true),
    perm("send_messages", "Message other members", C::Community, true),
    perm("access_analytics", "View business analytics", C::Business, true),
    perm("manage_bookings", "Manage incoming bookings", C::Business, true),
    perm("respond_to_reviews", "Respond to reviews", C::Business, true),
    perm("manage_schedule", "Manage coaching schedule", C::Coach, true),
    perm("set_session_rates", "Set session rates", C::Coach, true),
    perm("manage_clients", "Manage client roster", C::Coach, true),
    perm("publish_training_plans", "Publish training plans", C::Coach, false),
];

/// 商铺店主：商品、库存与订单
const SHOP_OWNER: &[PermissionDef] = &[
    perm("view_grounds", "Browse grounds", C::BasicAccess, true),
    perm("view_coaches", "Browse coaches", C::BasicAccess, true),
    perm("view_shop", "Browse the shop", C::BasicAccess, true),
    perm("view_news", "Read news & announcements", C::BasicAccess, true),
    perm("book_grounds", "Book grounds", C::BookingShopping, true),
    perm("book_coaching", "Book coaching sessions", C::BookingShopping, true),
    perm("purchase_products", "Purchase products", C::BookingShopping, true),
    perm("view_order_history", "View order history", C::BookingShopping, true),
    perm("post_reviews", "Post ratings & reviews", C::Community, true),
    perm("join_events", "Join community events", C::Community, true),
    perm("send_messages", "Message other members", C::Community, true),
    perm("access_analytics", "View business analytics", C::Business, true),
    perm("respond_to_reviews", "Respond to reviews", C::Business, true),
    perm("manage_inventory", "Manage inventory", C::Shop, true),
    perm("manage_products", "Manage product listings", C::Shop, true),
    perm("process_orders", "Process customer orders", C::Shop, true),
    perm("manage_discounts", "Run discounts & promotions", C::Shop, false),
    perm("manage_staff", "Manage staff accounts", C::Administrative, false),
];

/// 场馆业主：场地、时段与设施报表
const COMPLEX_OWNER: &[PermissionDef] = &[
    perm("view_grounds", "Browse grounds", C::BasicAccess, true),
    perm("view_coaches", "Browse coaches", C::BasicAccess, true),
    perm("view_shop", "Browse the shop", C::BasicAccess, true),
    perm("view_news", "Read news & announcements", C::BasicAccess, true),
    perm("book_grounds", "Book grounds", C::BookingShopping, true),
    perm("book_coaching", "Book coaching sessions", C::BookingShopping, true),
    perm("purchase_products", "Purchase products", C::BookingShopping, true),
    perm("view_order_history", "View order history", C::BookingShopping, true),
    perm("post_reviews", "Post ratings & reviews", C::Community, true),
    perm("join_events", "Join community events", C::Community, true),
    perm("send_messages", "Message other members", C::Community, true),
    perm("access_analytics", "View business analytics", C::Business, true),
    perm("manage_bookings", "Manage incoming bookings", C::Business, true),
    perm("respond_to_reviews", "Respond to reviews", C::Business, true),
    perm("manage_grounds", "Manage grounds & facilities", C::Complex, true),
    perm("manage_time_slots", "Manage booking time slots", C::Complex, true),
    perm("set_ground_pricing", "Set ground pricing", C::Complex, true),
    perm("view_facility_reports", "View facility reports", C::Complex, true),
    perm("manage_staff", "Manage staff accounts", C::Administrative, false),
    perm("moderate_reviews", "Moderate member reviews", C::Administrative, false),
];

/// 角色声明的全部权限定义
pub fn declared(role: Role) -> &'static [PermissionDef] {
    match role {
        Role::Player => PLAYER,
        Role::Coach => COACH,
        Role::ShopOwner => SHOP_OWNER,
        Role::ComplexOwner => COMPLEX_OWNER,
    }
}

/// 角色是否声明了该权限键
pub fn declares(role: Role, key: &str) -> bool {
    declared(role).iter().any(|def| def.key == key)
}

/// 根据键查找目录定义
pub fn find(role: Role, key: &str) -> Option<&'static PermissionDef> {
    declared(role).iter().find(|def| def.key == key)
}

static DEFAULT_MATRIX: Lazy<PermissionMatrix> = Lazy::new(|| {
    let mut matrix = PermissionMatrix::new();
    for role in Role::ALL {
        let row: PermissionRow = declared(role)
            .iter()
            .map(|def| (def.key.to_string(), def.default_enabled))
            .collect();
        matrix.insert(role, row);
    }
    matrix
});

/// 硬编码的默认矩阵（纯函数，无副作用）
pub fn default_matrix() -> PermissionMatrix {
    DEFAULT_MATRIX.clone()
}

/// 按展示顺序列出角色的分类及各分类下的权限键
///
/// 只包含该角色实际声明的分类。
pub fn categories_for(role: Role) -> Vec<(PermissionCategory, Vec<&'static str>)> {
    CATEGORY_ORDER
        .iter()
        .filter_map(|category| {
            let keys: Vec<&'static str> = declared(role)
                .iter()
                .filter(|def| def.category == *category)
                .map(|def| def.key)
                .collect();
            if keys.is_empty() {
                None
            } else {
                Some((*category, keys))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_keys_are_unique_per_role() {
        for role in Role::ALL {
            let keys: BTreeSet<&str> = declared(role).iter().map(|d| d.key).collect();
            assert_eq!(keys.len(), declared(role).len(), "duplicate key for {role}");
        }
    }

    #[test]
    fn test_default_matrix_covers_all_roles() {
        let matrix = default_matrix();
        for role in Role::ALL {
            let row = matrix.get(&role).expect("role missing from default matrix");
            assert_eq!(row.len(), declared(role).len());
        }
    }

    #[test]
    fn test_key_sets_are_heterogeneous() {
        // 教练排课键不属于商铺店主；库存键不属于教练
        assert!(declares(Role::Coach, "manage_schedule"));
        assert!(!declares(Role::ShopOwner, "manage_schedule"));
        assert!(declares(Role::ShopOwner, "manage_inventory"));
        assert!(!declares(Role::Coach, "manage_inventory"));
    }

    #[test]
    fn test_provider_role_defaults() {
        let matrix = default_matrix();
        assert_eq!(
            matrix[&Role::ShopOwner].get("manage_inventory"),
            Some(&true)
        );
        assert_eq!(matrix[&Role::Coach].get("access_analytics"), Some(&true));
    }

    #[test]
    fn test_categories_follow_display_order() {
        let categories = categories_for(Role::ComplexOwner);
        let names: Vec<&str> = categories.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(names.first(), Some(&"Basic Access"));
        assert_eq!(names.last(), Some(&"Administrative"));

        // 普通会员没有专属或管理分类
        let player_categories = categories_for(Role::Player);
        assert!(player_categories
            .iter()
            .all(|(c, _)| !matches!(c, PermissionCategory::Administrative)));
        assert_eq!(player_categories.len(), 3);
    }
}
