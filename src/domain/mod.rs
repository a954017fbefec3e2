// ==========================================
// 实验室设备管理系统 - 领域层
// ==========================================
// 职责: 实体定义与借用日期区间语义
// ==========================================

pub mod types;
pub mod loan;
pub mod inventory;
pub mod user_profile;
pub mod project;

// 重导出核心类型
pub use types::ItemStatus;
pub use loan::{EnrichedLoan, Loan, LoanTerm, NewLoan};
pub use inventory::InventoryItem;
pub use user_profile::UserProfile;
pub use project::Project;
