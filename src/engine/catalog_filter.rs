// ==========================================
// ERP 产品目录 - 目录过滤引擎
// ==========================================
// 职责: (全部记录, FilterState) → 过滤后记录（保持原顺序）
// 红线: 纯函数，不访问存储
// 规则: 全文搜索（大小写不敏感子串）AND 三个精确匹配下拉
// ==========================================

use crate::domain::product::{ProductRecord, StoredProduct};
use crate::domain::types::PageSize;
use serde::{Deserialize, Serialize};

// ==========================================
// FilterState - 视图过滤状态
// ==========================================
// 生命周期: 每次加载视图重置，不持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_text: String,
    pub location_filter: String,     // 空串 = 不过滤
    pub product_line_filter: String, // 空串 = 不过滤
    pub part_number_filter: String,  // 空串 = 不过滤
    pub current_page: usize,         // >= 1
    pub page_size: PageSize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_page_size(PageSize::default())
    }
}

impl FilterState {
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            search_text: String::new(),
            location_filter: String::new(),
            product_line_filter: String::new(),
            part_number_filter: String::new(),
            current_page: 1,
            page_size,
        }
    }

    /// 是否有任一过滤条件生效
    pub fn has_active_filters(&self) -> bool {
        !self.search_text.is_empty()
            || !self.location_filter.is_empty()
            || !self.product_line_filter.is_empty()
            || !self.part_number_filter.is_empty()
    }

    /// 清空所有过滤条件并回到第 1 页（保留 page_size）
    pub fn clear_filters(&mut self) {
        *self = Self::with_page_size(self.page_size);
    }
}

// ==========================================
// FilterOptions - 下拉选项
// ==========================================
// 从完整未过滤集合计算一次，按首次出现顺序去重，不含空值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub product_lines: Vec<String>,
    pub part_numbers: Vec<String>,
}

impl FilterOptions {
    pub fn from_products(products: &[StoredProduct]) -> Self {
        let mut options = Self::default();
        for product in products {
            let record = &product.record;
            push_distinct(&mut options.locations, &record.location_id);
            push_distinct(&mut options.product_lines, &record.product_line_id);
            push_distinct(&mut options.part_numbers, &record.part_number);
        }
        options
    }
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}

/// 全文搜索文本：7 个显示值按字段顺序以单个空格拼接后转小写
pub fn search_haystack(record: &ProductRecord) -> String {
    record.display_values().join(" ").to_lowercase()
}

/// 单条记录是否满足过滤条件
///
/// # 参数
/// - needle: 已转小写的搜索词
pub fn matches(record: &ProductRecord, state: &FilterState, needle: &str) -> bool {
    let search_ok = needle.is_empty() || search_haystack(record).contains(needle);
    let location_ok =
        state.location_filter.is_empty() || state.location_filter == record.location_id;
    let product_line_ok =
        state.product_line_filter.is_empty() || state.product_line_filter == record.product_line_id;
    let part_number_ok =
        state.part_number_filter.is_empty() || state.part_number_filter == record.part_number;

    search_ok && location_ok && product_line_ok && part_number_ok
}

/// 应用过滤，返回命中记录在 products 中的下标（升序）
pub fn apply_filters(products: &[StoredProduct], state: &FilterState) -> Vec<usize> {
    let needle = state.search_text.to_lowercase();
    products
        .iter()
        .enumerate()
        .filter(|(_, p)| matches(&p.record, state, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::types::ProductId;
    use chrono::Utc;

    pub(crate) fn product(id: i64, location: &str, line: &str, part: &str, desc: &str) -> StoredProduct {
        let now = Utc::now();
        StoredProduct {
            id: ProductId(id),
            title: part.to_string(),
            record: ProductRecord {
                location_id: location.to_string(),
                product_line_id: line.to_string(),
                part_number: part.to_string(),
                description: desc.to_string(),
                quantity: "5".to_string(),
                unit_of_measure: "EA".to_string(),
                net_price: "12.50".to_string(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    fn sample() -> Vec<StoredProduct> {
        vec![
            product(1, "L1", "PL1", "PN-1", "Blue Widget"),
            product(2, "L2", "PL1", "PN-2", "Red Gadget"),
            product(3, "L1", "PL2", "PN-3", "Green widget"),
            product(4, "", "PL2", "PN-4", "Spare"),
        ]
    }

    #[test]
    fn test_empty_state_matches_all_in_order() {
        let products = sample();
        assert_eq!(apply_filters(&products, &FilterState::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_location_filter_exact() {
        let products = sample();
        let state = FilterState {
            location_filter: "L1".to_string(),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&products, &state), vec![0, 2]);

        let state = FilterState {
            location_filter: "l1".to_string(),
            ..FilterState::default()
        };
        assert!(apply_filters(&products, &state).is_empty());
    }

    #[test]
    fn test_search_case_insensitive_any_field() {
        let products = sample();
        let state = FilterState {
            search_text: "WIDGET".to_string(),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&products, &state), vec![0, 2]);

        // 数量 / 单位 / 价格同样参与搜索
        let state = FilterState {
            search_text: "12.5".to_string(),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&products, &state).len(), 4);
    }

    #[test]
    fn test_search_spans_joined_fields() {
        let products = sample();
        // "PL1 PN-2" 只在按空格拼接后出现
        let state = FilterState {
            search_text: "pl1 pn-2".to_string(),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&products, &state), vec![1]);
    }

    #[test]
    fn test_filters_combine_with_and() {
        let products = sample();
        let state = FilterState {
            search_text: "widget".to_string(),
            product_line_filter: "PL2".to_string(),
            ..FilterState::default()
        };
        assert_eq!(apply_filters(&products, &state), vec![2]);
    }

    #[test]
    fn test_filter_options_first_seen_distinct_non_empty() {
        let options = FilterOptions::from_products(&sample());
        assert_eq!(options.locations, vec!["L1", "L2"]);
        assert_eq!(options.product_lines, vec!["PL1", "PL2"]);
        assert_eq!(options.part_numbers, vec!["PN-1", "PN-2", "PN-3", "PN-4"]);
    }

    #[test]
    fn test_clear_filters_keeps_page_size() {
        let mut state = FilterState {
            search_text: "x".to_string(),
            current_page: 3,
            page_size: PageSize::Fifty,
            ..FilterState::default()
        };
        assert!(state.has_active_filters());
        state.clear_filters();
        assert!(!state.has_active_filters());
        assert_eq!(state.current_page, 1);
        assert_eq!(state.page_size, PageSize::Fifty);
    }

    #[test]
    fn test_filter_state_serde() {
        let state = FilterState::default();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["page_size"], 100);
        assert_eq!(json["current_page"], 1);
    }
}
