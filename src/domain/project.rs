// ==========================================
// 实验室设备管理系统 - 课题组领域模型
// ==========================================
// 对齐: projects 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Project - 课题/项目
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String, // uuid v4
    pub name: String,
    pub description: Option<String>,
    pub lead_user_id: Option<String>, // 负责人（软引用 user_profiles）
    pub created_at: String,
}
