// ==========================================
// 实验室设备管理系统 - 人员档案领域模型
// ==========================================
// 对齐: user_profiles 表
// 说明: 档案由外部身份系统维护，本系统只读显示名字段
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// UserProfile - 人员档案
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>, // 研究员/学生/管理员
}

impl UserProfile {
    /// 解析显示名: full_name 优先，空串视为缺失，回退 username
    pub fn display_name(&self) -> Option<String> {
        self.full_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(Some(self.username.as_str()))
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(username: &str, full_name: Option<&str>) -> UserProfile {
        UserProfile {
            id: "U001".to_string(),
            username: username.to_string(),
            full_name: full_name.map(|s| s.to_string()),
            email: None,
            role: None,
        }
    }

    #[test]
    fn test_display_name_优先全名() {
        assert_eq!(
            profile("zhangw", Some("张伟")).display_name(),
            Some("张伟".to_string())
        );
    }

    #[test]
    fn test_display_name_空全名回退用户名() {
        assert_eq!(profile("zhangw", Some("")).display_name(), Some("zhangw".to_string()));
        assert_eq!(profile("zhangw", None).display_name(), Some("zhangw".to_string()));
    }

    #[test]
    fn test_display_name_全空() {
        assert_eq!(profile("", None).display_name(), None);
    }
}
