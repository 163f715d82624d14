// ==========================================
// 管理操作 API 测试
// ==========================================
// 测试目标: 授权校验、清空目录、单条编辑/删除
// ==========================================


use erp_catalog::api::{AdminAction, ApiError, Operator};
use erp_catalog::domain::product::ProductEdit;
use erp_catalog::domain::types::{SortColumn, SortDirection};
use erp_catalog::repository::CatalogStore;
use test_helpers::{create_test_state, fixture_path};

async fn seeded_state() -> (tempfile::NamedTempFile, erp_catalog::app::AppState) {
    let (db, state) = create_test_state();
    let token = state.guard.issue_token(AdminAction::ImportProducts).unwrap();
    state
        .import_api
        .import_products(&Operator::admin("seed"), Some(&token), fixture_path("sample_products.csv"))
        .await
        .unwrap();
    (db, state)
}

#[tokio::test]
async fn test_import_requires_valid_token() {
    let (_db, state) = create_test_state();
    let admin = Operator::admin("alice");

    let err = state
        .import_api
        .import_products(&admin, None, fixture_path("sample_products.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));

    // 令牌绑定操作
    let token = state.guard.issue_token(AdminAction::DeleteProduct).unwrap();
    let err = state
        .import_api
        .import_products(&admin, Some(&token), fixture_path("sample_products.csv"))
        .await
        .unwrap_err();
    assert!(err.is_auth_error());

    assert_eq!(state.store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_import_requires_capability() {
    let (_db, state) = create_test_state();
    let token = state.guard.issue_token(AdminAction::ImportProducts).unwrap();
    let err = state
        .import_api
        .import_products(&Operator::viewer("bob"), Some(&token), fixture_path("sample_products.csv"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::InsufficientPrivilege(_)));
    assert_eq!(state.store.count().unwrap(), 0);
}

#[tokio::test]
async fn test_import_rejects_non_csv_after_auth() {
    let (_db, state) = create_test_state();
    let token = state.guard.issue_token(AdminAction::ImportProducts).unwrap();
    let err = state
        .import_api
        .import_upload(&Operator::admin("alice"), Some(&token), "products.xlsx", b"x".to_vec())
        .await
        .unwrap_err();
    assert!(err.is_input_error());
    assert!(err.user_message().contains("xlsx"));
}

#[tokio::test]
async fn test_delete_all_twice() {
    let (_db, state) = seeded_state().await;
    let admin = Operator::admin("alice");

    let token = state.guard.issue_token(AdminAction::DeleteAllProducts).unwrap();
    let err = state
        .import_api
        .delete_all_products(&admin, Some(&token), false)
        .unwrap_err();
    assert!(matches!(err, ApiError::ConfirmationRequired(_)));
    assert_eq!(state.store.count().unwrap(), 5);

    let response = state
        .import_api
        .delete_all_products(&admin, Some(&token), true)
        .unwrap();
    assert!(response.deleted);
    assert_eq!(state.store.count().unwrap(), 0);

    // 令牌已被消费
    let err = state
        .import_api
        .delete_all_products(&admin, Some(&token), true)
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));

    let token = state.guard.issue_token(AdminAction::DeleteAllProducts).unwrap();
    let response = state
        .import_api
        .delete_all_products(&admin, Some(&token), true)
        .unwrap();
    assert!(!response.deleted);
    assert_ne!(response.message, "");
}

#[tokio::test]
async fn test_edit_product_enforces_unique_part_number() {
    let (_db, state) = seeded_state().await;
    let admin = Operator::admin("alice");
    let target = state.store.find_by_part_number("PN-001").unwrap().unwrap();

    let token = state.guard.issue_token(AdminAction::EditProduct).unwrap();
    let err = state
        .catalog_api
        .edit_product(
            &admin,
            Some(&token),
            target.id,
            ProductEdit {
                part_number: Some("PN-002".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::BusinessRuleViolation(_)));

    let token = state.guard.issue_token(AdminAction::EditProduct).unwrap();
    let updated = state
        .catalog_api
        .edit_product(
            &admin,
            Some(&token),
            target.id,
            ProductEdit {
                part_number: Some("PN-001A".to_string()),
                quantity: Some("99".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(updated.title, "PN-001A");
    assert_eq!(updated.record.quantity, "99");
    assert_eq!(updated.record.description, "Hex bolt M8");
}

#[tokio::test]
async fn test_delete_single_product() {
    let (_db, state) = seeded_state().await;
    let admin = Operator::admin("alice");
    let target = state.store.find_by_part_number("PN-003").unwrap().unwrap();

    let token = state.guard.issue_token(AdminAction::DeleteProduct).unwrap();
    assert!(state
        .catalog_api
        .delete_product(&admin, Some(&token), target.id)
        .unwrap());

    let token = state.guard.issue_token(AdminAction::DeleteProduct).unwrap();
    assert!(!state
        .catalog_api
        .delete_product(&admin, Some(&token), target.id)
        .unwrap());
    assert_eq!(state.store.count().unwrap(), 4);
}

#[tokio::test]
async fn test_admin_list_sorted_desc_with_currency() {
    let (_db, state) = seeded_state().await;
    let rows = state
        .catalog_api
        .list_admin_rows(Some((SortColumn::PartNumber, SortDirection::Desc)))
        .await
        .unwrap();
    let parts: Vec<&str> = rows.iter().map(|r| r.part_number.as_str()).collect();
    assert_eq!(parts, vec!["PN-005", "PN-004", "PN-003", "PN-002", "PN-001"]);
    assert_eq!(rows[0].price_display, "$call for price");
    assert_eq!(rows[4].price_display, "$0.45");
}
