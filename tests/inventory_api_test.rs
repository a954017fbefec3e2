// ==========================================
// InventoryApi 集成测试
// ==========================================
// 测试范围: 设备台账 CRUD 与 404 行为
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use lab_equipment_ems::api::{ApiError, UpsertItemRequest};
use lab_equipment_ems::domain::types::ItemStatus;

fn item_request(name: Option<&str>) -> UpsertItemRequest {
    UpsertItemRequest {
        name: name.map(|s| s.to_string()),
        category: Some("显微镜".to_string()),
        location: Some("A栋 302".to_string()),
        status: None,
        description: None,
    }
}

#[test]
fn test_create_item_成功() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let item = env
        .inventory_api
        .create_item(item_request(Some("倒置显微镜")))
        .expect("创建失败");

    assert!(!item.id.is_empty(), "id 应该由服务端生成");
    assert_eq!(item.name, "倒置显微镜");
    assert_eq!(item.status, ItemStatus::Available, "默认状态应该是可借用");
    assert!(!item.created_at.is_empty());
}

#[test]
fn test_create_item_缺少名称() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    assert!(matches!(
        env.inventory_api.create_item(item_request(None)),
        Err(ApiError::MissingFields)
    ));
    assert!(matches!(
        env.inventory_api.create_item(item_request(Some("  "))),
        Err(ApiError::MissingFields)
    ));
}

#[test]
fn test_get_item_不存在() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    match env.inventory_api.get_item("nonexistent") {
        Err(ApiError::NotFound(msg)) => assert!(msg.contains("nonexistent")),
        _ => panic!("Expected NotFound"),
    }
}

#[test]
fn test_list_items_按名称排序() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-002", "离心机");
    env.seed_item("EQ-001", "倒置显微镜");

    let items = env.inventory_api.list_items().expect("查询失败");
    assert_eq!(items.len(), 2);
    assert!(items[0].name <= items[1].name);
}

#[test]
fn test_update_item_成功() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-001", "倒置显微镜");

    let updated = env
        .inventory_api
        .update_item(
            "EQ-001",
            UpsertItemRequest {
                name: None, // 不改名
                category: None,
                location: Some("B栋 101".to_string()),
                status: Some(ItemStatus::Maintenance),
                description: Some("光源老化送修".to_string()),
            },
        )
        .expect("更新失败");

    assert_eq!(updated.name, "倒置显微镜", "未提供的字段应该保留原值");
    assert_eq!(updated.location.as_deref(), Some("B栋 101"));
    assert_eq!(updated.status, ItemStatus::Maintenance);
    assert!(!updated.is_loanable());
}

#[test]
fn test_update_item_不存在() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    assert!(matches!(
        env.inventory_api.update_item("nonexistent", item_request(Some("x"))),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn test_delete_item_成功与重复删除() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-001", "倒置显微镜");

    env.inventory_api.delete_item("EQ-001").expect("删除失败");

    // 第二次删除应该 404
    assert!(matches!(
        env.inventory_api.delete_item("EQ-001"),
        Err(ApiError::NotFound(_))
    ));
}
