// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用环境与种子数据函数
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::error::Error;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tempfile::NamedTempFile;

use lab_equipment_ems::api::{
    CreateLoanRequest, InventoryApi, LoanApi, ProjectApi, UserApi,
};
use lab_equipment_ems::domain::inventory::InventoryItem;
use lab_equipment_ems::domain::project::Project;
use lab_equipment_ems::domain::types::ItemStatus;
use lab_equipment_ems::domain::user_profile::UserProfile;
use lab_equipment_ems::repository::{
    inventory_repo::InventoryItemRepository, loan_repo::LoanRepository,
    project_repo::ProjectRepository, user_profile_repo::UserProfileRepository,
};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和必要的依赖
pub struct ApiTestEnv {
    pub db_path: String,
    pub loan_api: Arc<LoanApi>,
    pub inventory_api: Arc<InventoryApi>,
    pub user_api: Arc<UserApi>,
    pub project_api: Arc<ProjectApi>,

    // Repository层（用于测试数据准备）
    pub loan_repo: Arc<LoanRepository>,
    pub inventory_repo: Arc<InventoryItemRepository>,
    pub user_profile_repo: Arc<UserProfileRepository>,
    pub project_repo: Arc<ProjectRepository>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建测试环境（临时库 + 全套API）
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let (temp_file, db_path) = test_helpers::create_test_db()?;

        let conn = lab_equipment_ems::db::open_sqlite_connection(&db_path)?;
        let conn = Arc::new(Mutex::new(conn));

        let loan_repo = Arc::new(LoanRepository::new(conn.clone()));
        let inventory_repo = Arc::new(InventoryItemRepository::new(conn.clone()));
        let user_profile_repo = Arc::new(UserProfileRepository::new(conn.clone()));
        let project_repo = Arc::new(ProjectRepository::new(conn.clone()));

        let loan_api = Arc::new(LoanApi::new(
            loan_repo.clone(),
            inventory_repo.clone(),
            user_profile_repo.clone(),
        ));
        let inventory_api = Arc::new(InventoryApi::new(inventory_repo.clone()));
        let user_api = Arc::new(UserApi::new(user_profile_repo.clone()));
        let project_api = Arc::new(ProjectApi::new(project_repo.clone()));

        Ok(Self {
            db_path,
            loan_api,
            inventory_api,
            user_api,
            project_api,
            loan_repo,
            inventory_repo,
            user_profile_repo,
            project_repo,
            _temp_file: temp_file,
        })
    }

    // ==========================================
    // 种子数据
    // ==========================================

    /// 写入一台设备（指定 id，便于断言）
    pub fn seed_item(&self, id: &str, name: &str) {
        let item = InventoryItem {
            id: id.to_string(),
            name: name.to_string(),
            category: None,
            location: None,
            status: ItemStatus::Available,
            description: None,
            created_at: String::new(),
            updated_at: String::new(),
        };
        self.inventory_repo.create(&item).expect("种子设备写入失败");
    }

    /// 写入一条人员档案
    pub fn seed_user(&self, id: &str, username: &str, full_name: Option<&str>) {
        let profile = UserProfile {
            id: id.to_string(),
            username: username.to_string(),
            full_name: full_name.map(|s| s.to_string()),
            email: None,
            role: None,
        };
        self.user_profile_repo
            .upsert(&profile)
            .expect("种子档案写入失败");
    }

    /// 写入一条课题
    pub fn seed_project(&self, id: &str, name: &str) {
        let project = Project {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            lead_user_id: None,
            created_at: String::new(),
        };
        self.project_repo.create(&project).expect("种子课题写入失败");
    }
}

// ==========================================
// 请求构造
// ==========================================

/// 解析测试日期
pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("测试日期格式错误")
}

/// 构造创建借用请求
pub fn loan_request(
    item_id: &str,
    borrower_id: Option<&str>,
    start: &str,
    end: &str,
) -> CreateLoanRequest {
    CreateLoanRequest {
        item_id: Some(item_id.to_string()),
        borrower_id: borrower_id.map(|s| s.to_string()),
        loan_date: Some(d(start)),
        expected_return_date: Some(d(end)),
        user_name: None,
    }
}
