// ==========================================
// 实验室设备管理系统 - 借用领域模型
// ==========================================
// 对齐: loans 表
// 约束: loan_date <= expected_return_date（创建时校验）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Loan - 借用记录
// ==========================================
// 说明: item_id / borrower_id 为软引用，不保证引用完整性；
//       悬空引用在富化时解析为 null 名称而非错误
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    pub id: i64,                        // 数据库生成主键
    pub item_id: String,                // 设备ID（软引用 inventory_items）
    pub borrower_id: Option<String>,    // 借用人ID（软引用 user_profiles，可空）
    pub loan_date: NaiveDate,           // 借出日期
    pub expected_return_date: NaiveDate, // 预计归还日期
    pub user_name: Option<String>,      // 冗余借用人显示名（优先于档案解析）
    pub created_at: String,             // 创建时间（datetime('now')）
}

// ==========================================
// NewLoan - 待插入的借用记录
// ==========================================
/// 尚未落库的借用记录（id 由数据库生成）
#[derive(Debug, Clone)]
pub struct NewLoan {
    pub item_id: String,
    pub borrower_id: Option<String>,
    pub loan_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub user_name: Option<String>,
}

// ==========================================
// EnrichedLoan - 富化后的借用记录
// ==========================================
/// 借用记录 + 解析出的显示名（派生值，不落库）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedLoan {
    pub id: i64,
    pub item_id: String,
    pub borrower_id: Option<String>,
    pub loan_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub borrower_name: Option<String>, // user_name > full_name > username > null
    pub item_name: Option<String>,     // 设备名称或 null
}

// ==========================================
// Trait: LoanTerm
// ==========================================
// 用途: 借用日期区间语义（闭区间）
pub trait LoanTerm {
    /// 借用起始日期
    fn term_start(&self) -> NaiveDate;

    /// 借用结束日期
    fn term_end(&self) -> NaiveDate;

    /// 闭区间重叠判定
    ///
    /// 两个闭区间 [a_start, a_end] 与 [b_start, b_end] 重叠当且仅当
    /// `a_start <= b_end && a_end >= b_start`。
    /// 共享端点（同日归还/借出同一台设备）视为冲突。
    fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.term_start() <= end && self.term_end() >= start
    }

    /// 借用天数（闭区间，含首尾）
    fn term_days(&self) -> i64 {
        (self.term_end() - self.term_start()).num_days() + 1
    }
}

impl LoanTerm for Loan {
    fn term_start(&self) -> NaiveDate {
        self.loan_date
    }

    fn term_end(&self) -> NaiveDate {
        self.expected_return_date
    }
}

impl LoanTerm for NewLoan {
    fn term_start(&self) -> NaiveDate {
        self.loan_date
    }

    fn term_end(&self) -> NaiveDate {
        self.expected_return_date
    }
}

impl NewLoan {
    /// 日期区间是否合法（loan_date <= expected_return_date）
    pub fn has_valid_term(&self) -> bool {
        self.loan_date <= self.expected_return_date
    }
}
