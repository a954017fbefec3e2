// ==========================================
// 实验室设备管理系统 - 应用层
// ==========================================
// 职责: 应用状态装配与 HTTP 路由
// ==========================================

pub mod state;
pub mod routes;

// 重导出核心类型
pub use state::AppState;
pub use routes::build_router;
