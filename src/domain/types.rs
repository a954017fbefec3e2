// ==========================================
// 实验室设备管理系统 - 领域类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 设备状态 (Item Status)
// ==========================================
// 对齐: inventory_items 表 status 列（TEXT 存储）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemStatus {
    Available,   // 可借用
    Maintenance, // 维护中
    Retired,     // 已退役
}

impl ItemStatus {
    /// 从数据库字符串解析（未知值按 Available 处理）
    pub fn from_db_str(s: &str) -> Self {
        match s {
            "Maintenance" => ItemStatus::Maintenance,
            "Retired" => ItemStatus::Retired,
            _ => ItemStatus::Available,
        }
    }

    /// 数据库存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "Available",
            ItemStatus::Maintenance => "Maintenance",
            ItemStatus::Retired => "Retired",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl Default for ItemStatus {
    fn default() -> Self {
        ItemStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_status_round_trip() {
        for status in [ItemStatus::Available, ItemStatus::Maintenance, ItemStatus::Retired] {
            assert_eq!(ItemStatus::from_db_str(status.to_db_str()), status);
        }
    }

    #[test]
    fn test_item_status_未知值回退() {
        assert_eq!(ItemStatus::from_db_str("Broken"), ItemStatus::Available);
    }
}
