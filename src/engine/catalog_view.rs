// ==========================================
// ERP 产品目录 - 目录视图控制器
// ==========================================
// 职责: 持有一次视图会话的完整行集、下拉选项与 FilterState
// 规则: 任一过滤条件变化 → 重新过滤并回到第 1 页
//       修改每页条数 → 回到第 1 页（不重新过滤）
// ==========================================

use crate::domain::product::StoredProduct;
use crate::domain::types::PageSize;
use crate::engine::catalog_filter::{apply_filters, FilterOptions, FilterState};
use crate::engine::pagination::{clamp_page, PageItem, Pagination};
use serde::{Deserialize, Serialize};
use tracing::debug;

// ==========================================
// CatalogPage - 当前页渲染快照
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPage {
    pub rows: Vec<StoredProduct>,
    pub page_items: Vec<PageItem>,
    pub pagination_visible: bool,
    pub has_prev: bool,
    pub has_next: bool,
    pub current_page: usize,
    pub total_pages: usize,
    pub showing_start: usize,
    pub showing_end: usize,
    pub total_entries: usize,
    pub status_line: String,
    pub no_results: bool,
}

// ==========================================
// CatalogView - 视图控制器
// ==========================================
pub struct CatalogView {
    products: Vec<StoredProduct>,
    options: FilterOptions,
    state: FilterState,
    filtered: Vec<usize>,
}

impl CatalogView {
    /// 以默认状态打开视图（第 1 页、无过滤）
    ///
    /// # 参数
    /// - products: 完整行集（创建顺序）
    /// - page_size: 初始每页条数
    pub fn new(products: Vec<StoredProduct>, page_size: PageSize) -> Self {
        Self::with_state(products, FilterState::with_page_size(page_size))
    }

    /// 以给定状态打开视图（页码按过滤结果夹紧）
    pub fn with_state(products: Vec<StoredProduct>, state: FilterState) -> Self {
        let options = FilterOptions::from_products(&products);
        let filtered = apply_filters(&products, &state);
        let mut view = Self {
            products,
            options,
            state,
            filtered,
        };
        view.state.current_page = clamp_page(view.state.current_page, view.pagination().total_pages());
        view
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn products(&self) -> &[StoredProduct] {
        &self.products
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    fn refilter(&mut self) {
        self.filtered = apply_filters(&self.products, &self.state);
        self.state.current_page = 1;
        debug!(matched = self.filtered.len(), total = self.products.len(), "目录过滤完成");
    }

    // ===== 过滤条件 =====

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.state.search_text = text.into();
        self.refilter();
    }

    pub fn set_location_filter(&mut self, value: impl Into<String>) {
        self.state.location_filter = value.into();
        self.refilter();
    }

    pub fn set_product_line_filter(&mut self, value: impl Into<String>) {
        self.state.product_line_filter = value.into();
        self.refilter();
    }

    pub fn set_part_number_filter(&mut self, value: impl Into<String>) {
        self.state.part_number_filter = value.into();
        self.refilter();
    }

    /// 清空搜索与三个下拉，保留每页条数，重新过滤
    pub fn reset_filters(&mut self) {
        self.state.clear_filters();
        self.refilter();
    }

    // ===== 分页 =====

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.state.page_size = page_size;
        self.state.current_page = 1;
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.filtered.len(), self.state.page_size, self.state.current_page)
    }

    pub fn next_page(&mut self) {
        self.state.current_page = self.pagination().next_page();
    }

    pub fn prev_page(&mut self) {
        self.state.current_page = self.pagination().prev_page();
    }

    /// 跳转到指定页（越界时夹紧）
    pub fn goto_page(&mut self, page: usize) {
        self.state.current_page = clamp_page(page, self.pagination().total_pages());
    }

    // ===== 渲染 =====

    /// 当前页可见行（保持原顺序）
    pub fn visible_rows(&self) -> Vec<&StoredProduct> {
        let range = self.pagination().slice_range();
        self.filtered[range]
            .iter()
            .map(|&idx| &self.products[idx])
            .collect()
    }

    pub fn has_results(&self) -> bool {
        !self.filtered.is_empty()
    }

    /// "Showing X to Y of Z entries"
    pub fn status_line(&self) -> String {
        let (start, end, total) = self.pagination().showing();
        let (start, end, total) = (start.to_string(), end.to_string(), total.to_string());
        crate::i18n::t_with_args(
            "catalog.showing_entries",
            &[
                ("start", start.as_str()),
                ("end", end.as_str()),
                ("total", total.as_str()),
            ],
        )
    }

    /// 无结果提示（有结果时为 None）
    pub fn no_results_message(&self) -> Option<String> {
        if self.has_results() {
            None
        } else {
            Some(crate::i18n::t("catalog.no_results"))
        }
    }

    pub fn current_page(&self) -> CatalogPage {
        let pagination = self.pagination();
        let (showing_start, showing_end, total_entries) = pagination.showing();
        CatalogPage {
            rows: self.visible_rows().into_iter().cloned().collect(),
            page_items: pagination.window(),
            pagination_visible: pagination.is_visible(),
            has_prev: pagination.has_prev(),
            has_next: pagination.has_next(),
            current_page: pagination.current_page,
            total_pages: pagination.total_pages(),
            showing_start,
            showing_end,
            total_entries,
            status_line: self.status_line(),
            no_results: !self.has_results(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog_filter::tests::product;

    fn numbered(n: usize) -> Vec<StoredProduct> {
        (1..=n)
            .map(|i| {
                let location = if i % 2 == 0 { "L2" } else { "L1" };
                product(i as i64, location, "PL1", &format!("PN-{}", i), "Widget")
            })
            .collect()
    }

    #[test]
    fn test_filter_change_resets_page() {
        let mut view = CatalogView::new(numbered(101), PageSize::Twenty);
        view.goto_page(4);
        assert_eq!(view.state().current_page, 4);

        view.set_location_filter("L1");
        assert_eq!(view.state().current_page, 1);
        assert_eq!(view.filtered_count(), 51);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut view = CatalogView::new(numbered(101), PageSize::Twenty);
        view.next_page();
        view.set_page_size(PageSize::Fifty);
        assert_eq!(view.state().current_page, 1);
        assert_eq!(view.pagination().total_pages(), 3);
    }

    #[test]
    fn test_goto_page_clamps() {
        let mut view = CatalogView::new(numbered(45), PageSize::Twenty);
        view.goto_page(99);
        assert_eq!(view.state().current_page, 3);
        assert_eq!(view.visible_rows().len(), 5);
        view.goto_page(0);
        assert_eq!(view.state().current_page, 1);
    }

    #[test]
    fn test_prev_is_noop_on_first_page() {
        let mut view = CatalogView::new(numbered(45), PageSize::Twenty);
        view.prev_page();
        assert_eq!(view.state().current_page, 1);
    }

    #[test]
    fn test_no_results() {
        let mut view = CatalogView::new(numbered(10), PageSize::Twenty);
        view.set_search_text("nothing-matches");
        assert!(!view.has_results());
        assert!(view.no_results_message().is_some());
        let page = view.current_page();
        assert!(page.no_results);
        assert_eq!((page.showing_start, page.showing_end, page.total_entries), (0, 0, 0));
        assert!(!page.pagination_visible);
    }

    #[test]
    fn test_with_state_clamps_page() {
        let state = FilterState {
            current_page: 7,
            page_size: PageSize::Twenty,
            ..FilterState::default()
        };
        let view = CatalogView::with_state(numbered(30), state);
        assert_eq!(view.state().current_page, 2);
    }

    #[test]
    fn test_status_line_english() {
        let _guard = crate::i18n::tests::LOCALE_TEST_LOCK.lock().unwrap();
        crate::i18n::set_locale("en");

        let mut view = CatalogView::new(numbered(101), PageSize::OneHundred);
        view.next_page();
        assert_eq!(view.status_line(), "Showing 101 to 101 of 101 entries");

        crate::i18n::set_locale("zh-CN");
    }
}
