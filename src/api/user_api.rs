// ==========================================
// 实验室设备管理系统 - 人员目录 API
// ==========================================
// 职责: 研究人员目录只读查询
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::user_profile::UserProfile;
use crate::repository::user_profile_repo::UserProfileRepository;

// ==========================================
// UserApi - 人员目录 API
// ==========================================
pub struct UserApi {
    user_profile_repo: Arc<UserProfileRepository>,
}

impl UserApi {
    /// 创建新的UserApi实例
    pub fn new(user_profile_repo: Arc<UserProfileRepository>) -> Self {
        Self { user_profile_repo }
    }

    /// 查询人员目录
    pub fn list_users(&self) -> ApiResult<Vec<UserProfile>> {
        Ok(self.user_profile_repo.list_all()?)
    }

    /// 查询单个人员档案
    ///
    /// # 返回
    /// - Ok(UserProfile): 找到档案
    /// - Err(ApiError::NotFound): 档案不存在
    pub fn get_user(&self, id: &str) -> ApiResult<UserProfile> {
        self.user_profile_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("UserProfile(id={})不存在", id)))
    }
}
