// ==========================================
// 实验室设备管理系统 - 设备领域模型
// ==========================================
// 对齐: inventory_items 表
// ==========================================

use crate::domain::types::ItemStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// InventoryItem - 设备台账记录
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    // ===== 主键 =====
    pub id: String, // uuid v4

    // ===== 基本信息 =====
    pub name: String,
    pub category: Option<String>, // 设备类别（显微镜/离心机/...）
    pub location: Option<String>, // 存放位置（房间/柜位）

    // ===== 状态 =====
    pub status: ItemStatus,

    // ===== 描述 =====
    pub description: Option<String>,

    // ===== 审计字段 =====
    pub created_at: String,
    pub updated_at: String,
}

impl InventoryItem {
    /// 是否可供借用
    pub fn is_loanable(&self) -> bool {
        self.status == ItemStatus::Available
    }
}
