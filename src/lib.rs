// ==========================================
// 实验室设备管理系统 - 核心库
// ==========================================
// 技术栈: axum + Rust + SQLite
// 系统定位: 设备台账与借用服务（含传感器遥测透传）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// API 层 - 业务接口
pub mod api;

// 传感器代理层 - 上游透传
pub mod proxy;

// 应用层 - HTTP 集成
pub mod app;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 配置层 - 运行时配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::ItemStatus;

// 领域实体
pub use domain::{EnrichedLoan, InventoryItem, Loan, LoanTerm, NewLoan, Project, UserProfile};

// API
pub use api::{ApiError, ApiResult, InventoryApi, LoanApi, ProjectApi, UserApi};

// 应用层
pub use app::{build_router, AppState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "实验室设备管理系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
