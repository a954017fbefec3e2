// ==========================================
// 实验室设备管理系统 - 课题目录 API
// ==========================================
// 职责: 课题目录只读查询
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::project::Project;
use crate::repository::project_repo::ProjectRepository;

// ==========================================
// ProjectApi - 课题目录 API
// ==========================================
pub struct ProjectApi {
    project_repo: Arc<ProjectRepository>,
}

impl ProjectApi {
    /// 创建新的ProjectApi实例
    pub fn new(project_repo: Arc<ProjectRepository>) -> Self {
        Self { project_repo }
    }

    /// 查询课题目录
    pub fn list_projects(&self) -> ApiResult<Vec<Project>> {
        Ok(self.project_repo.list_all()?)
    }

    /// 查询单个课题
    ///
    /// # 返回
    /// - Ok(Project): 找到课题
    /// - Err(ApiError::NotFound): 课题不存在
    pub fn get_project(&self, id: &str) -> ApiResult<Project> {
        self.project_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Project(id={})不存在", id)))
    }
}
