// ==========================================
// 实验室设备管理系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 说明: 每个请求无进程内可变共享状态，仅共享串行化的数据库连接与只读 API 实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{InventoryApi, LoanApi, ProjectApi, UserApi};
use crate::db;
use crate::proxy::sensor_gateway::SensorGateway;
use crate::repository::{
    inventory_repo::InventoryItemRepository, loan_repo::LoanRepository,
    project_repo::ProjectRepository, user_profile_repo::UserProfileRepository,
};

/// 应用状态
///
/// 包含所有API实例和共享资源，作为 axum 路由层的全局状态
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 借用API
    pub loan_api: Arc<LoanApi>,

    /// 设备台账API
    pub inventory_api: Arc<InventoryApi>,

    /// 人员目录API
    pub user_api: Arc<UserApi>,

    /// 课题目录API
    pub project_api: Arc<ProjectApi>,

    /// 传感器上游网关
    pub sensor_gateway: Arc<dyn SensorGateway>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    /// - sensor_gateway: 传感器上游网关实现
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库连接并应用统一 PRAGMA
    /// 2. 幂等建表
    /// 3. 初始化所有Repository与API实例
    pub fn new(db_path: String, sensor_gateway: Arc<dyn SensorGateway>) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        // 创建数据库连接（共享连接）
        let conn = db::open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        db::init_schema(&conn).map_err(|e| format!("建表失败: {}", e))?;

        // schema_version 仅做提示，不做自动迁移
        match db::read_schema_version(&conn) {
            Ok(Some(v)) if v != db::CURRENT_SCHEMA_VERSION => {
                tracing::warn!(
                    "schema_version 不一致: 库为 {}, 代码期望 {}",
                    v,
                    db::CURRENT_SCHEMA_VERSION
                );
            }
            Err(e) => tracing::warn!("schema_version 读取失败(将继续启动): {}", e),
            _ => {}
        }

        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let loan_repo = Arc::new(LoanRepository::new(conn.clone()));
        let inventory_repo = Arc::new(InventoryItemRepository::new(conn.clone()));
        let user_profile_repo = Arc::new(UserProfileRepository::new(conn.clone()));
        let project_repo = Arc::new(ProjectRepository::new(conn.clone()));

        // ==========================================
        // 初始化API层
        // ==========================================

        let loan_api = Arc::new(LoanApi::new(
            loan_repo,
            inventory_repo.clone(),
            user_profile_repo.clone(),
        ));
        let inventory_api = Arc::new(InventoryApi::new(inventory_repo));
        let user_api = Arc::new(UserApi::new(user_profile_repo));
        let project_api = Arc::new(ProjectApi::new(project_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            loan_api,
            inventory_api,
            user_api,
            project_api,
            sensor_gateway,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}
