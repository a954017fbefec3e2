// ==========================================
// LoanApi 集成测试 - 查询与富化
// ==========================================
// 测试范围:
// 1. 列表顺序与幂等
// 2. 显示名富化优先级: user_name > full_name > username > null
// 3. 悬空引用容忍
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use lab_equipment_ems::api::{ApiError, CreateLoanRequest};

// ==========================================
// 列表查询测试
// ==========================================

#[test]
fn test_list_loans_空结果() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let loans = env.loan_api.list_loans().expect("查询失败");
    assert_eq!(loans.len(), 0, "空库应该返回空列表");
}

#[test]
fn test_list_loans_按借出日期升序() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-001", "倒置显微镜");

    // 乱序插入
    env.loan_api
        .create_loan(loan_request("EQ-001", None, "2024-03-01", "2024-03-05"))
        .expect("创建失败");
    env.loan_api
        .create_loan(loan_request("EQ-001", None, "2024-01-01", "2024-01-05"))
        .expect("创建失败");
    env.loan_api
        .create_loan(loan_request("EQ-001", None, "2024-02-01", "2024-02-05"))
        .expect("创建失败");

    let loans = env.loan_api.list_loans().expect("查询失败");
    let dates: Vec<String> = loans.iter().map(|l| l.loan_date.to_string()).collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-02-01", "2024-03-01"]);
}

#[test]
fn test_list_loans_幂等() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-001", "倒置显微镜");
    env.seed_user("U001", "zhangw", Some("张伟"));

    env.loan_api
        .create_loan(loan_request("EQ-001", Some("U001"), "2024-01-01", "2024-01-05"))
        .expect("创建失败");
    env.loan_api
        .create_loan(loan_request("EQ-001", Some("U001"), "2024-02-01", "2024-02-05"))
        .expect("创建失败");

    let first = env.loan_api.list_loans().expect("查询失败");
    let second = env.loan_api.list_loans().expect("查询失败");
    assert_eq!(first, second, "无写入间隔的两次查询结果应该一致");
}

// ==========================================
// 富化测试
// ==========================================

#[test]
fn test_list_loans_富化_设备与借用人名称() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-001", "倒置显微镜");
    env.seed_user("U001", "zhangw", Some("张伟"));

    env.loan_api
        .create_loan(loan_request("EQ-001", Some("U001"), "2024-01-01", "2024-01-05"))
        .expect("创建失败");

    let loans = env.loan_api.list_loans().expect("查询失败");
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].item_name.as_deref(), Some("倒置显微镜"));
    assert_eq!(loans[0].borrower_name.as_deref(), Some("张伟"));
}

#[test]
fn test_list_loans_富化_优先冗余user_name() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-001", "倒置显微镜");
    env.seed_user("U001", "zhangw", Some("张伟"));

    let request = CreateLoanRequest {
        user_name: Some("访问学者-李雷".to_string()),
        ..loan_request("EQ-001", Some("U001"), "2024-01-01", "2024-01-05")
    };
    env.loan_api.create_loan(request).expect("创建失败");

    let loans = env.loan_api.list_loans().expect("查询失败");
    assert_eq!(
        loans[0].borrower_name.as_deref(),
        Some("访问学者-李雷"),
        "冗余 user_name 应该优先于档案全名"
    );
}

#[test]
fn test_list_loans_富化_档案无全名回退username() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-001", "倒置显微镜");
    env.seed_user("U002", "lihua", None);

    env.loan_api
        .create_loan(loan_request("EQ-001", Some("U002"), "2024-01-01", "2024-01-05"))
        .expect("创建失败");

    let loans = env.loan_api.list_loans().expect("查询失败");
    assert_eq!(loans[0].borrower_name.as_deref(), Some("lihua"));
}

#[test]
fn test_list_loans_富化_空串全名回退username() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-001", "倒置显微镜");
    env.seed_user("U003", "wangf", Some(""));

    env.loan_api
        .create_loan(loan_request("EQ-001", Some("U003"), "2024-01-01", "2024-01-05"))
        .expect("创建失败");

    let loans = env.loan_api.list_loans().expect("查询失败");
    assert_eq!(
        loans[0].borrower_name.as_deref(),
        Some("wangf"),
        "空串全名应该视为缺失并回退 username"
    );
}

#[test]
fn test_list_loans_悬空引用解析为null() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    // 设备与借用人都不存在
    env.loan_api
        .create_loan(loan_request("EQ-GONE", Some("U-GONE"), "2024-01-01", "2024-01-05"))
        .expect("悬空引用不应该阻止创建");

    let loans = env.loan_api.list_loans().expect("悬空引用不应该导致查询失败");
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].item_name, None);
    assert_eq!(loans[0].borrower_name, None);
}

#[test]
fn test_list_loans_无借用人() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-001", "倒置显微镜");

    env.loan_api
        .create_loan(loan_request("EQ-001", None, "2024-01-01", "2024-01-05"))
        .expect("创建失败");

    let loans = env.loan_api.list_loans().expect("查询失败");
    assert_eq!(loans[0].borrower_id, None);
    assert_eq!(loans[0].borrower_name, None);
}

// ==========================================
// 删除测试
// ==========================================

#[test]
fn test_delete_loan_成功() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");
    env.seed_item("EQ-001", "倒置显微镜");

    let loan = env
        .loan_api
        .create_loan(loan_request("EQ-001", None, "2024-01-01", "2024-01-05"))
        .expect("创建失败");

    env.loan_api.delete_loan(loan.id).expect("删除失败");

    let loans = env.loan_api.list_loans().expect("查询失败");
    assert_eq!(loans.len(), 0);
}

#[test]
fn test_delete_loan_不存在() {
    let env = ApiTestEnv::new().expect("无法创建测试环境");

    let result = env.loan_api.delete_loan(9999);
    match result {
        Err(ApiError::NotFound(msg)) => assert!(msg.contains("9999")),
        _ => panic!("Expected NotFound"),
    }
}
