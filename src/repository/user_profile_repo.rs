// ==========================================
// 实验室设备管理系统 - 人员档案仓储
// ==========================================
// 职责: 管理 user_profiles 表的数据访问（本系统内只读 + 测试种子写入）
// ==========================================

use crate::domain::user_profile::UserProfile;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, params_from_iter, Connection, Result as SqliteResult, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// UserProfileRepository - 人员档案仓储
// ==========================================
pub struct UserProfileRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UserProfileRepository {
    /// 从共享连接创建仓储实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询全部人员档案
    ///
    /// # 返回
    /// - Ok(Vec<UserProfile>): 按 username 升序
    pub fn list_all(&self) -> RepositoryResult<Vec<UserProfile>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, username, full_name, email, role
            FROM user_profiles
            ORDER BY username ASC, id ASC
            "#,
        )?;

        let profiles = stmt
            .query_map([], row_to_profile)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(profiles)
    }

    /// 按主键查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<UserProfile>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, username, full_name, email, role
            FROM user_profiles
            WHERE id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![id], row_to_profile);

        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 批量查询人员档案（id 集合 → id→档案 映射）
    ///
    /// 借用富化路径使用: 一次 IN 查询取回全部所需档案。
    /// 不存在的 id 不出现在映射里（由调用方解析为 null）。
    ///
    /// # 参数
    /// - `ids`: 去重后的人员ID集合（空集合直接返回空映射，不发起查询）
    pub fn find_by_ids(&self, ids: &[String]) -> RepositoryResult<HashMap<String, UserProfile>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let conn = self.get_conn()?;
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, username, full_name, email, role FROM user_profiles WHERE id IN ({})",
            placeholders
        );
        let mut stmt = conn.prepare(&sql)?;

        let mut map = HashMap::with_capacity(ids.len());
        let rows = stmt.query_map(params_from_iter(ids.iter()), row_to_profile)?;
        for row in rows {
            let profile = row?;
            // 重复 id 后写覆盖（主键约束下不应出现）
            map.insert(profile.id.clone(), profile);
        }

        Ok(map)
    }

    /// 写入人员档案（INSERT OR REPLACE，档案由外部身份系统同步）
    pub fn upsert(&self, profile: &UserProfile) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT OR REPLACE INTO user_profiles (id, username, full_name, email, role)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                profile.id,
                profile.username,
                profile.full_name,
                profile.email,
                profile.role,
            ],
        )?;
        Ok(())
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 行映射: user_profiles 表 → UserProfile
fn row_to_profile(row: &Row) -> SqliteResult<UserProfile> {
    Ok(UserProfile {
        id: row.get(0)?,
        username: row.get(1)?,
        full_name: row.get(2)?,
        email: row.get(3)?,
        role: row.get(4)?,
    })
}
