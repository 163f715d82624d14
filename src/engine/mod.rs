// ==========================================
// ERP 产品目录 - 引擎层
// ==========================================
// 职责: 目录读路径（过滤、分页、视图控制、排序、防抖）
// 红线: Engine 不拼 SQL，全部为纯计算
// ==========================================

pub mod catalog_filter;
pub mod catalog_sort;
pub mod catalog_view;
pub mod pagination;
pub mod search_debounce;

// 重导出核心引擎
pub use catalog_filter::{apply_filters, FilterOptions, FilterState};
pub use catalog_sort::{format_net_price, sort_products};
pub use catalog_view::{CatalogPage, CatalogView};
pub use pagination::{PageItem, Pagination};
pub use search_debounce::SearchDebouncer;
