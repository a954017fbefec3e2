// ==========================================
// 实验室设备管理系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供 HTTP 路由层调用
// ==========================================

pub mod error;
pub mod loan_api;
pub mod inventory_api;
pub mod user_api;
pub mod project_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use loan_api::{CreateLoanRequest, LoanApi};
pub use inventory_api::{InventoryApi, UpsertItemRequest};
pub use user_api::UserApi;
pub use project_api::ProjectApi;
