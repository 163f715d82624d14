// ==========================================
// 目录浏览集成测试
// ==========================================
// 测试目标: 导入 → 打开视图 → 过滤 / 搜索 / 分页 / 重置
// ==========================================


use erp_catalog::api::{AdminAction, Operator};
use erp_catalog::config::config_keys;
use erp_catalog::domain::types::PageSize;
use erp_catalog::engine::{FilterState, PageItem};
use tempfile::TempDir;
use test_helpers::{create_test_state, csv_row, csv_with_rows, fixture_path, write_file};

#[tokio::test]
async fn test_location_filter_and_search_over_imported_data() {
    let (_db, state) = create_test_state();
    let admin = Operator::admin("alice");
    let token = state.guard.issue_token(AdminAction::ImportProducts).unwrap();
    state
        .import_api
        .import_products(&admin, Some(&token), fixture_path("sample_products.csv"))
        .await
        .unwrap();

    let mut view = state.catalog_api.open_catalog_view().await.unwrap();
    assert_eq!(view.filtered_count(), 5);
    // 最新导入的在前，选项按首次出现顺序
    assert_eq!(view.options().locations, vec!["L3", "L2", "L1"]);
    assert_eq!(view.options().product_lines, vec!["PL2", "PL3", "PL1"]);

    view.set_location_filter("L2");
    let parts: Vec<&str> = view
        .visible_rows()
        .iter()
        .map(|p| p.record.part_number.as_str())
        .collect();
    assert_eq!(parts, vec!["PN-004", "PN-003"]);

    // 搜索与下拉按 AND 组合
    view.set_search_text("BEARING");
    let parts: Vec<&str> = view
        .visible_rows()
        .iter()
        .map(|p| p.record.part_number.as_str())
        .collect();
    assert_eq!(parts, vec!["PN-004"]);

    view.set_search_text("bolt");
    assert!(!view.has_results());
    assert!(view.no_results_message().is_some());

    view.reset_filters();
    assert_eq!(view.filtered_count(), 5);
    assert!(!view.state().has_active_filters());
}

#[tokio::test]
async fn test_pagination_across_101_products() {
    let dir = TempDir::new().unwrap();
    let (_db, state) = create_test_state();

    let rows: Vec<String> = (1..=101)
        .map(|i| csv_row("L1", "PL1", &format!("PN-{:03}", i), "Item", "1", "EA", "1.00"))
        .collect();
    let path = write_file(&dir, "many.csv", &csv_with_rows(&rows));

    let admin = Operator::admin("alice");
    let token = state.guard.issue_token(AdminAction::ImportProducts).unwrap();
    let response = state
        .import_api
        .import_products(&admin, Some(&token), &path)
        .await
        .unwrap();
    assert_eq!(response.summary.created, 101);

    let mut view = state.catalog_api.open_catalog_view().await.unwrap();
    let page = view.current_page();
    assert_eq!(page.rows.len(), 100);
    assert_eq!(page.rows[0].record.part_number, "PN-101");
    assert_eq!(page.rows[99].record.part_number, "PN-002");
    assert_eq!(page.total_pages, 2);
    assert!(page.pagination_visible);
    assert!(!page.has_prev);
    assert!(page.has_next);
    assert_eq!(
        page.page_items,
        vec![
            PageItem::Page { number: 1, current: true },
            PageItem::Page { number: 2, current: false },
        ]
    );
    assert_eq!((page.showing_start, page.showing_end, page.total_entries), (1, 100, 101));

    view.next_page();
    let page = view.current_page();
    assert_eq!(page.rows.len(), 1);
    assert_eq!(page.rows[0].record.part_number, "PN-001");
    assert_eq!((page.showing_start, page.showing_end, page.total_entries), (101, 101, 101));

    // 末页再翻无效果
    view.next_page();
    assert_eq!(view.state().current_page, 2);

    view.set_page_size(PageSize::FiveHundred);
    let page = view.current_page();
    assert_eq!(page.current_page, 1);
    assert!(!page.pagination_visible);
    assert!(page.page_items.is_empty());
}

#[tokio::test]
async fn test_configured_default_page_size() {
    let (_db, state) = create_test_state();
    state
        .config_manager
        .set_config_value(config_keys::DEFAULT_PAGE_SIZE, "20")
        .unwrap();

    let view = state.catalog_api.open_catalog_view().await.unwrap();
    assert_eq!(view.state().page_size, PageSize::Twenty);
}

#[tokio::test]
async fn test_open_view_with_state_clamps_page() {
    let (_db, state) = create_test_state();
    let view = state
        .catalog_api
        .open_catalog_view_with(FilterState {
            current_page: 9,
            ..FilterState::default()
        })
        .unwrap();
    assert_eq!(view.state().current_page, 1);
    assert_eq!(view.current_page().total_entries, 0);
}
