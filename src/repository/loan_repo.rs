// ==========================================
// 实验室设备管理系统 - 借用记录仓储
// ==========================================
// 职责: 管理 loans 表的数据访问
// 说明: create_if_free 将冲突检查与插入放入同一事务，
//       依赖 SQLite 单写者语义保证检查-插入对外原子
// ==========================================

use crate::domain::loan::{Loan, NewLoan};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

// ==========================================
// LoanCreateOutcome - 门控插入结果
// ==========================================
/// 冲突门控插入的两种出口
#[derive(Debug)]
pub enum LoanCreateOutcome {
    /// 无冲突，已落库（含数据库生成的 id）
    Created(Loan),
    /// 与既有借用区间重叠，未插入任何行
    Conflict(Vec<Loan>),
}

// ==========================================
// LoanRepository - 借用记录仓储
// ==========================================
pub struct LoanRepository {
    conn: Arc<Mutex<Connection>>,
}

impl LoanRepository {
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

    /// 查询全部借用记录
    ///
    /// # 返回
    /// - Ok(Vec<Loan>): 按 loan_date 升序（同日按 id 升序，保证顺序稳定）
    /// - Err: 数据库错误
    pub fn list_all(&self) -> RepositoryResult<Vec<Loan>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, item_id, borrower_id, loan_date, expected_return_date, user_name, created_at
            FROM loans
            ORDER BY loan_date ASC, id ASC
            "#,
        )?;

        let loans = stmt
            .query_map([], row_to_loan)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(loans)
    }

    /// 按主键查询
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Loan>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, item_id, borrower_id, loan_date, expected_return_date, user_name, created_at
            FROM loans
            WHERE id = ?1
            "#,
        )?;

        let result = stmt.query_row(params![id], row_to_loan);

        match result {
            Ok(loan) => Ok(Some(loan)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 查询与给定闭区间重叠的同设备借用记录
    ///
    /// 重叠判定: loan_date <= ?end AND expected_return_date >= ?start
    /// （闭区间，共享端点视为重叠）
    ///
    /// # 参数
    /// - `item_id`: 设备ID
    /// - `start`: 区间起始日期
    /// - `end`: 区间结束日期
    pub fn find_overlapping(
        &self,
        item_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepositoryResult<Vec<Loan>> {
        let conn = self.get_conn()?;
        find_overlapping_on(&conn, item_id, start, end)
    }

    /// 冲突门控插入: 检查与插入在同一事务内执行
    ///
    /// # 参数
    /// - `loan`: 待插入的借用记录
    ///
    /// # 返回
    /// - Ok(LoanCreateOutcome::Created): 无重叠，已插入，携带完整行
    /// - Ok(LoanCreateOutcome::Conflict): 存在重叠，未插入，携带全部冲突行
    /// - Err: 数据库错误（事务回滚，不产生部分写入）
    pub fn create_if_free(&self, loan: &NewLoan) -> RepositoryResult<LoanCreateOutcome> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        // 1) 同事务内做重叠检查
        let conflicts = find_overlapping_on(
            &tx,
            &loan.item_id,
            loan.loan_date,
            loan.expected_return_date,
        )?;
        if !conflicts.is_empty() {
            // 只读事务，直接丢弃
            return Ok(LoanCreateOutcome::Conflict(conflicts));
        }

        // 2) 插入并回读（取得生成的 id 与 created_at）
        tx.execute(
            r#"
            INSERT INTO loans (item_id, borrower_id, loan_date, expected_return_date, user_name)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                loan.item_id,
                loan.borrower_id,
                loan.loan_date.to_string(),
                loan.expected_return_date.to_string(),
                loan.user_name,
            ],
        )?;
        let new_id = tx.last_insert_rowid();

        let created = tx.query_row(
            r#"
            SELECT id, item_id, borrower_id, loan_date, expected_return_date, user_name, created_at
            FROM loans
            WHERE id = ?1
            "#,
            params![new_id],
            row_to_loan,
        )?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(LoanCreateOutcome::Created(created))
    }

    /// 删除借用记录
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): 记录不存在
    pub fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM loans WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 在给定连接/事务上执行重叠查询
fn find_overlapping_on(
    conn: &Connection,
    item_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> RepositoryResult<Vec<Loan>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, item_id, borrower_id, loan_date, expected_return_date, user_name, created_at
        FROM loans
        WHERE item_id = ?1
          AND loan_date <= ?2
          AND expected_return_date >= ?3
        ORDER BY loan_date ASC, id ASC
        "#,
    )?;

    let loans = stmt
        .query_map(params![item_id, end.to_string(), start.to_string()], row_to_loan)?
        .collect::<SqliteResult<Vec<_>>>()?;

    Ok(loans)
}

/// 行映射: loans 表 → Loan
fn row_to_loan(row: &Row) -> SqliteResult<Loan> {
    Ok(Loan {
        id: row.get(0)?,
        item_id: row.get(1)?,
        borrower_id: row.get(2)?,
        loan_date: parse_date(&row.get::<_, String>(3)?),
        expected_return_date: parse_date(&row.get::<_, String>(4)?),
        user_name: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// 解析日期字符串（非法值回退 1970-01-01）
fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .unwrap_or_else(|_| NaiveDate::from_ymd_opt(1970, 1, 1).unwrap())
}
