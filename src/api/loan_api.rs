// ==========================================
// 实验室设备管理系统 - 借用 API
// ==========================================
// 职责: 借用记录查询（批量富化）与创建（冲突门控）
// 语义:
// - 富化名称优先级: user_name > 档案 full_name > 档案 username > null
// - 冲突判定: 同设备闭区间重叠（共享端点视为冲突）
// - 富化查询失败降级为 null 名称并记录告警；主查询失败直接上抛
// ==========================================

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::loan::{EnrichedLoan, Loan, NewLoan};
use crate::repository::loan_repo::{LoanCreateOutcome, LoanRepository};
use crate::repository::inventory_repo::InventoryItemRepository;
use crate::repository::user_profile_repo::UserProfileRepository;

// ==========================================
// CreateLoanRequest - 创建借用请求
// ==========================================
/// POST /api/loans 请求体
///
/// item_id / loan_date / expected_return_date 必填，borrower_id 可选；
/// 字段用 Option 接收以便在 API 层统一报 "Missing fields" 而非反序列化失败
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoanRequest {
    pub item_id: Option<String>,
    pub borrower_id: Option<String>,
    pub loan_date: Option<NaiveDate>,
    pub expected_return_date: Option<NaiveDate>,
    pub user_name: Option<String>,
}

// ==========================================
// LoanApi - 借用 API
// ==========================================

/// 借用API
///
/// 职责：
/// 1. 借用记录列表查询 + 显示名批量富化
/// 2. 借用创建（必填校验 → 同事务冲突检查 + 插入）
/// 3. 借用删除
pub struct LoanApi {
    loan_repo: Arc<LoanRepository>,
    inventory_repo: Arc<InventoryItemRepository>,
    user_profile_repo: Arc<UserProfileRepository>,
}

impl LoanApi {
    /// 创建新的LoanApi实例
    pub fn new(
        loan_repo: Arc<LoanRepository>,
        inventory_repo: Arc<InventoryItemRepository>,
        user_profile_repo: Arc<UserProfileRepository>,
    ) -> Self {
        Self {
            loan_repo,
            inventory_repo,
            user_profile_repo,
        }
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 查询全部借用记录并富化显示名
    ///
    /// 流程:
    /// 1. 取全部借用记录（loan_date 升序）
    /// 2. 收集去重后的非空 borrower_id / item_id 集合
    /// 3. 至多两次批量查询（空集合跳过）
    /// 4. 逐条组装 EnrichedLoan，映射缺失项解析为 null 名称
    ///
    /// # 返回
    /// - Ok(Vec<EnrichedLoan>): 富化后的借用列表
    /// - Err(ApiError): 主查询失败（富化查询失败不在此列，见下）
    pub fn list_loans(&self) -> ApiResult<Vec<EnrichedLoan>> {
        // 主查询失败直接上抛，不做部分富化
        let loans = self.loan_repo.list_all()?;

        // 收集去重后的非空外键集合（顺序无关，BTreeSet 仅为遍历稳定）
        let borrower_ids: Vec<String> = loans
            .iter()
            .filter_map(|l| l.borrower_id.as_deref())
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let item_ids: Vec<String> = loans
            .iter()
            .map(|l| l.item_id.as_str())
            .filter(|id| !id.is_empty())
            .map(|id| id.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        // 富化查询失败降级为空映射（名称解析为 null），记录告警
        let profiles = self
            .user_profile_repo
            .find_by_ids(&borrower_ids)
            .unwrap_or_else(|e| {
                warn!("借用富化: 人员档案批量查询失败，显示名降级为 null: {}", e);
                Default::default()
            });
        let item_names = self
            .inventory_repo
            .find_names_by_ids(&item_ids)
            .unwrap_or_else(|e| {
                warn!("借用富化: 设备名称批量查询失败，显示名降级为 null: {}", e);
                Default::default()
            });

        debug!(
            "借用富化: loans={}, borrowers={}, items={}",
            loans.len(),
            borrower_ids.len(),
            item_ids.len()
        );

        let enriched = loans
            .into_iter()
            .map(|loan| {
                // 名称优先级: 冗余 user_name > 档案 full_name > 档案 username > null
                let borrower_name = non_empty(loan.user_name.clone()).or_else(|| {
                    loan.borrower_id
                        .as_deref()
                        .and_then(|id| profiles.get(id))
                        .and_then(|p| p.display_name())
                });
                let item_name = item_names.get(&loan.item_id).cloned();

                EnrichedLoan {
                    id: loan.id,
                    item_id: loan.item_id,
                    borrower_id: loan.borrower_id,
                    loan_date: loan.loan_date,
                    expected_return_date: loan.expected_return_date,
                    borrower_name,
                    item_name,
                }
            })
            .collect();

        Ok(enriched)
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 创建借用记录（冲突门控）
    ///
    /// # 参数
    /// - `request`: 创建请求（必填: item_id / loan_date / expected_return_date）
    ///
    /// # 返回
    /// - Ok(Loan): 无冲突，已落库（含数据库生成的 id）
    /// - Err(ApiError::MissingFields): 必填字段缺失，未发起任何查询
    /// - Err(ApiError::InvalidInput): 归还日期早于借出日期
    /// - Err(ApiError::LoanConflict): 同设备日期区间重叠，携带全部冲突行
    /// - Err(ApiError): 数据库错误
    pub fn create_loan(&self, request: CreateLoanRequest) -> ApiResult<Loan> {
        // 必填校验先行，未通过不触达存储层
        let (item_id, loan_date, expected_return_date) = match (
            non_empty(request.item_id),
            request.loan_date,
            request.expected_return_date,
        ) {
            (Some(item_id), Some(loan_date), Some(expected_return_date)) => {
                (item_id, loan_date, expected_return_date)
            }
            _ => return Err(ApiError::MissingFields),
        };

        let new_loan = NewLoan {
            item_id,
            borrower_id: non_empty(request.borrower_id),
            loan_date,
            expected_return_date,
            user_name: non_empty(request.user_name),
        };

        if !new_loan.has_valid_term() {
            return Err(ApiError::InvalidInput(format!(
                "归还日期早于借出日期: loan_date={}, expected_return_date={}",
                new_loan.loan_date, new_loan.expected_return_date
            )));
        }

        // 检查与插入在同一事务内执行，冲突时不产生任何写入
        match self.loan_repo.create_if_free(&new_loan)? {
            LoanCreateOutcome::Created(loan) => {
                debug!(
                    "借用创建成功: id={}, item_id={}, {}..{}",
                    loan.id, loan.item_id, loan.loan_date, loan.expected_return_date
                );
                Ok(loan)
            }
            LoanCreateOutcome::Conflict(conflicts) => {
                Err(ApiError::LoanConflict { conflicts })
            }
        }
    }

    /// 删除借用记录
    ///
    /// # 返回
    /// - Ok(()): 已删除
    /// - Err(ApiError::NotFound): 记录不存在
    pub fn delete_loan(&self, id: i64) -> ApiResult<()> {
        if self.loan_repo.delete(id)? {
            Ok(())
        } else {
            Err(ApiError::NotFound(format!("Loan(id={})不存在", id)))
        }
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 空串归一为 None
fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}
