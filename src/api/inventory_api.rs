// ==========================================
// 实验室设备管理系统 - 设备台账 API
// ==========================================
// 职责: 设备浏览与台账维护
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::inventory::InventoryItem;
use crate::domain::types::ItemStatus;
use crate::repository::inventory_repo::InventoryItemRepository;

// ==========================================
// UpsertItemRequest - 创建/更新设备请求
// ==========================================
/// POST /api/items 与 PUT /api/items/{id} 请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertItemRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: Option<ItemStatus>,
    pub description: Option<String>,
}

// ==========================================
// InventoryApi - 设备台账 API
// ==========================================
pub struct InventoryApi {
    inventory_repo: Arc<InventoryItemRepository>,
}

impl InventoryApi {
    /// 创建新的InventoryApi实例
    pub fn new(inventory_repo: Arc<InventoryItemRepository>) -> Self {
        Self { inventory_repo }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询设备列表
    pub fn list_items(&self) -> ApiResult<Vec<InventoryItem>> {
        Ok(self.inventory_repo.list_all()?)
    }

    /// 查询单台设备
    ///
    /// # 返回
    /// - Ok(InventoryItem): 找到设备
    /// - Err(ApiError::NotFound): 设备不存在
    pub fn get_item(&self, id: &str) -> ApiResult<InventoryItem> {
        self.inventory_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("InventoryItem(id={})不存在", id)))
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 创建设备（id 由服务端生成）
    ///
    /// # 返回
    /// - Ok(InventoryItem): 已落库的完整记录
    /// - Err(ApiError::MissingFields): 名称缺失
    pub fn create_item(&self, request: UpsertItemRequest) -> ApiResult<InventoryItem> {
        let name = request
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(ApiError::MissingFields)?;

        let id = Uuid::new_v4().to_string();
        let item = InventoryItem {
            id: id.clone(),
            name,
            category: request.category,
            location: request.location,
            status: request.status.unwrap_or_default(),
            description: request.description,
            // 落库后由 datetime('now') 覆盖，此处仅占位
            created_at: String::new(),
            updated_at: String::new(),
        };
        self.inventory_repo.create(&item)?;

        debug!("设备创建成功: id={}, name={}", item.id, item.name);
        self.get_item(&id)
    }

    /// 更新设备
    ///
    /// # 返回
    /// - Ok(InventoryItem): 更新后的完整记录
    /// - Err(ApiError::NotFound): 设备不存在
    pub fn update_item(&self, id: &str, request: UpsertItemRequest) -> ApiResult<InventoryItem> {
        let existing = self.get_item(id)?;

        let updated = InventoryItem {
            id: existing.id.clone(),
            name: request
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(existing.name),
            category: request.category.or(existing.category),
            location: request.location.or(existing.location),
            status: request.status.unwrap_or(existing.status),
            description: request.description.or(existing.description),
            created_at: existing.created_at,
            updated_at: existing.updated_at,
        };

        if !self.inventory_repo.update(&updated)? {
            return Err(ApiError::NotFound(format!("InventoryItem(id={})不存在", id)));
        }
        self.get_item(id)
    }

    /// 删除设备
    ///
    /// # 返回
    /// - Ok(()): 已删除
    /// - Err(ApiError::NotFound): 设备不存在
    pub fn delete_item(&self, id: &str) -> ApiResult<()> {
        if self.inventory_repo.delete(id)? {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("InventoryItem(id={})不存在", id)))
        }
    }
}
