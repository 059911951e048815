//! 权限矩阵服务集成测试

mod common;

use common::{permission_service, setup_store};
use sporthub::{
    catalog,
    error::AppError,
    models::user::Role,
};
use std::collections::BTreeSet;

#[test]
fn test_effective_permissions_match_catalog_defaults() {
    let store = setup_store();
    let permissions = permission_service(&store);

    for role in Role::ALL {
        let row = permissions.effective_permissions(role);
        for def in catalog::declared(role) {
            assert_eq!(
                row.get(def.key),
                Some(&def.default_enabled),
                "role {} key {}",
                role,
                def.key
            );
        }
    }
}

#[test]
fn test_key_set_stable_under_any_toggle_sequence() {
    let store = setup_store();
    let permissions = permission_service(&store);

    // 任意开关序列之后，键集合与目录声明完全一致
    permissions
        .set_permission(Role::Coach, "access_analytics", false)
        .unwrap();
    permissions.set_all_permissions(Role::Coach, true).unwrap();
    permissions
        .set_permission(Role::Coach, "manage_schedule", false)
        .unwrap();
    permissions.set_all_permissions(Role::Coach, false).unwrap();
    permissions
        .set_permission(Role::Coach, "manage_clients", true)
        .unwrap();

    let row = permissions.effective_permissions(Role::Coach);
    let stored_keys: BTreeSet<&str> = row.keys().map(|k| k.as_str()).collect();
    let declared_keys: BTreeSet<&str> =
        catalog::declared(Role::Coach).iter().map(|d| d.key).collect();
    assert_eq!(stored_keys, declared_keys);
}

#[test]
fn test_set_all_permissions_bulk_counts() {
    let store = setup_store();
    let permissions = permission_service(&store);

    for role in Role::ALL {
        let (_, total) = permissions.count_enabled(role);

        permissions.set_all_permissions(role, true).unwrap();
        assert_eq!(permissions.count_enabled(role), (total, total));

        permissions.set_all_permissions(role, false).unwrap();
        assert_eq!(permissions.count_enabled(role), (0, total));
    }
}

#[test]
fn test_set_permission_changes_only_target_key() {
    let store = setup_store();
    let permissions = permission_service(&store);

    let before = permissions.effective_permissions(Role::Coach);

    let after = permissions
        .set_permission(Role::Coach, "access_analytics", false)
        .unwrap();

    assert_eq!(after.get("access_analytics"), Some(&false));
    for (key, value) in &before {
        if key != "access_analytics" {
            assert_eq!(after.get(key), Some(value), "key {} changed", key);
        }
    }
}

#[test]
fn test_set_permission_rejects_undeclared_key() {
    let store = setup_store();
    let permissions = permission_service(&store);

    // 商铺店主没有排课权限，写入应被拒绝
    let result = permissions.set_permission(Role::ShopOwner, "manage_schedule", true);
    assert!(matches!(result, Err(AppError::Validation(_))));

    // 矩阵不被污染
    let row = permissions.effective_permissions(Role::ShopOwner);
    assert!(!row.contains_key("manage_schedule"));
}

#[test]
fn test_missing_role_row_grants_nothing() {
    let store = setup_store();
    let permissions = permission_service(&store);

    // 模拟矩阵文档中缺失角色条目
    store
        .with_tx(|state| {
            state.permission_matrix.remove(&Role::Coach);
            Ok(())
        })
        .unwrap();

    // fail-closed：没有条目就没有权限
    assert!(permissions.effective_permissions(Role::Coach).is_empty());
    assert_eq!(permissions.count_enabled(Role::Coach), (0, 0));
}

#[test]
fn test_end_to_end_disable_coach_analytics() {
    let store = setup_store();
    let permissions = permission_service(&store);

    let before = permissions.effective_permissions(Role::Coach);
    assert_eq!(before.get("access_analytics"), Some(&true));

    permissions
        .set_permission(Role::Coach, "access_analytics", false)
        .unwrap();

    let after = permissions.effective_permissions(Role::Coach);
    assert_eq!(after.get("access_analytics"), Some(&false));

    // 其余教练权限保持不变
    for (key, value) in &before {
        if key != "access_analytics" {
            assert_eq!(after.get(key), Some(value));
        }
    }
}
