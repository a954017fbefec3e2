// ==========================================
// 实验室设备管理系统 - 设备台账仓储
// ==========================================
// 职责: 管理 inventory_items 表的 CRUD 操作
// 红线: 不含业务逻辑，只负责数据访问
// ==========================================

use crate::domain::inventory::InventoryItem;
use crate::domain::types::ItemStatus;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, params_from_iter, Connection, Result as SqliteResult, Row};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ==========================================
// InventoryItemRepository - 设备台账仓储
// ==========================================
pub struct InventoryItemRepository {
    conn: Arc<Mutex<Connection>>,
}

impl InventoryItemRepository {
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

    /// 查询全部设备
    ///
    /// # 返回
    /// - Ok(Vec<InventoryItem>): 按名称升序
    pub fn list_all(&self) -> RepositoryResult<Vec<InventoryItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, category, location, status, description, created_at, updated_at
            FROM inventory_items
            ORDER BY name ASC, id ASC
            "#,
        )?;

        let items = stmt
            .query_map([], row_to_item)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(items)
    }

    /// 按主键查询
    pub fn find_by_id(&self, id: &str) -> RepositoryResult<Option<InventoryItem>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, category, location, status, description, created_at, updated_at
            FROM inventory_items
            WHERE id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![id], row_to_item);

        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 批量解析设备名称（id 集合 → id→name 映射）
    ///
    /// 借用富化路径使用: 一次 IN 查询取回全部所需名称。
    /// 不存在的 id 不出现在映射里（由调用方解析为 null）。
    ///
    /// # 参数
    /// - `ids`: 去重后的设备ID集合（空集合直接返回空映射，不发起查询）
    pub fn find_names_by_ids(&self, ids: &[String]) -> RepositoryResult<HashMap<String, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let conn = self.get_conn()?;
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, name FROM inventory_items WHERE id IN ({})",
            placeholders
        );
        let mut stmt = conn.prepare(&sql)?;

        let mut map = HashMap::with_capacity(ids.len());
        let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (id, name) = row?;
            // 重复 id 后写覆盖（主键约束下不应出现）
            map.insert(id, name);
        }

        Ok(map)
    }

    /// 创建设备
    pub fn create(&self, item: &InventoryItem) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO inventory_items (id, name, category, location, status, description)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                item.id,
                item.name,
                item.category,
                item.location,
                item.status.to_db_str(),
                item.description,
            ],
        )?;
        Ok(())
    }

    /// 更新设备（全字段覆盖，刷新 updated_at）
    ///
    /// # 返回
    /// - Ok(true): 已更新
    /// - Ok(false): 记录不存在
    pub fn update(&self, item: &InventoryItem) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE inventory_items
            SET name = ?2,
                category = ?3,
                location = ?4,
                status = ?5,
                description = ?6,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                item.id,
                item.name,
                item.category,
                item.location,
                item.status.to_db_str(),
                item.description,
            ],
        )?;
        Ok(affected > 0)
    }

    /// 删除设备
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): 记录不存在
    pub fn delete(&self, id: &str) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM inventory_items WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 行映射: inventory_items 表 → InventoryItem
fn row_to_item(row: &Row) -> SqliteResult<InventoryItem> {
    Ok(InventoryItem {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        location: row.get(3)?,
        status: ItemStatus::from_db_str(&row.get::<_, String>(4)?),
        description: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}
