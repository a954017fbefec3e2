// ==========================================
// 实验室设备管理系统 - 课题仓储
// ==========================================
// 职责: 管理 projects 表的数据访问
// ==========================================

use crate::domain::project::Project;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// ProjectRepository - 课题仓储
// ==========================================
pub struct ProjectRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProjectRepository {
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

    /// 查询全部课题
    ///
    /// # 返回
    /// - Ok(Vec<Project>): 按名称升序
    pub fn list_all(&self) -> RepositoryResult<Vec<Project>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, description, lead_user_id, created_at
            FROM projects
            ORDER BY name ASC, id ASC
            "#,
        )?;

        let projects = stmt
            .query_map([], row_to_project)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(projects)
    }

    /// 按主键查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<Project>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, description, lead_user_id, created_at
            FROM projects
            WHERE id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![id], row_to_project);

        match result {
            Ok(project) => Ok(Some(project)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 创建课题
    pub fn create(&self, project: &Project) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO projects (id, name, description, lead_user_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                project.id,
                project.name,
                project.description,
                project.lead_user_id,
            ],
        )?;
        Ok(())
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 行映射: projects 表 → Project
fn row_to_project(row: &Row) -> SqliteResult<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        lead_user_id: row.get(3)?,
        created_at: row.get(4)?,
    })
}
