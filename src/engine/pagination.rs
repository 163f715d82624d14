// ==========================================
// ERP 产品目录 - 分页控制器
// ==========================================
// 职责: 页数计算、可见切片、页码窗口（含省略号）、翻页边界
// 红线: 纯计算，不持有数据
// ==========================================

use crate::domain::types::PageSize;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// 页码窗口宽度（含起止，共 5 个页码）
const WINDOW_SPAN: usize = 4;
/// 当前页之前保留的页码数
const WINDOW_LEAD: usize = 2;

// ==========================================
// PageItem - 页码条目
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageItem {
    Page { number: usize, current: bool },
    Ellipsis,
}

// ==========================================
// Pagination - 分页快照
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total_items: usize,
    pub page_size: usize,
    pub current_page: usize,
}

/// 将页码限制在 [1, total_pages]（total_pages 为 0 时返回 1）
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// ceil(N / page_size)；N = 0 时为 0
pub fn total_pages(total_items: usize, page_size: PageSize) -> usize {
    total_items.div_ceil(page_size.as_usize())
}

impl Pagination {
    pub fn new(total_items: usize, page_size: PageSize, current_page: usize) -> Self {
        let pages = total_pages(total_items, page_size);
        Self {
            total_items,
            page_size: page_size.as_usize(),
            current_page: clamp_page(current_page, pages),
        }
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// 分页控件是否显示（total_pages <= 1 时隐藏）
    pub fn is_visible(&self) -> bool {
        self.total_pages() > 1
    }

    /// 当前页切片 [(cur-1)*size, min(cur*size, N))
    pub fn slice_range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (self.current_page * self.page_size).min(self.total_items);
        start..end
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// 上一页（边界处不变）
    pub fn prev_page(&self) -> usize {
        if self.has_prev() {
            self.current_page - 1
        } else {
            self.current_page
        }
    }

    /// 下一页（边界处不变）
    pub fn next_page(&self) -> usize {
        if self.has_next() {
            self.current_page + 1
        } else {
            self.current_page
        }
    }

    /// 页码窗口
    ///
    /// # 规则
    /// - 窗口 [max(1, cur-2), min(total, start+4)]
    /// - start > 1 时前置第 1 页，start > 2 时再加省略号
    /// - end < total 时追加末页，end < total-1 时先加省略号
    /// - 控件隐藏时返回空
    pub fn window(&self) -> Vec<PageItem> {
        let total = self.total_pages();
        if total <= 1 {
            return Vec::new();
        }

        let cur = self.current_page;
        let start = cur.saturating_sub(WINDOW_LEAD).max(1);
        let end = (start + WINDOW_SPAN).min(total);
        let page = |number: usize| PageItem::Page {
            number,
            current: number == cur,
        };

        let mut items = Vec::with_capacity(WINDOW_SPAN + 5);
        if start > 1 {
            items.push(page(1));
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }

        items.extend((start..=end).map(page));

        if end < total {
            if end < total - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(page(total));
        }

        items
    }

    /// 状态行数值 (X, Y, Z)：X = offset+1（N = 0 时为 0），Y = 切片末尾，Z = N
    pub fn showing(&self) -> (usize, usize, usize) {
        let range = self.slice_range();
        let start = if self.total_items == 0 { 0 } else { range.start + 1 };
        (start, range.end, self.total_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(items: &[PageItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                PageItem::Page { number, current: true } => format!("[{}]", number),
                PageItem::Page { number, .. } => number.to_string(),
                PageItem::Ellipsis => "...".to_string(),
            })
            .collect()
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, PageSize::OneHundred), 0);
        assert_eq!(total_pages(1, PageSize::OneHundred), 1);
        assert_eq!(total_pages(100, PageSize::OneHundred), 1);
        assert_eq!(total_pages(101, PageSize::OneHundred), 2);
        assert_eq!(total_pages(500, PageSize::Twenty), 25);
    }

    #[test]
    fn test_boundary_101_items() {
        let p1 = Pagination::new(101, PageSize::OneHundred, 1);
        assert!(p1.is_visible());
        assert_eq!(p1.slice_range(), 0..100);
        assert_eq!(p1.next_page(), 2);

        let p2 = Pagination::new(101, PageSize::OneHundred, 2);
        assert_eq!(p2.slice_range(), 100..101);
        assert!(!p2.has_next());
        assert_eq!(p2.next_page(), 2);
        assert_eq!(p2.showing(), (101, 101, 101));
    }

    #[test]
    fn test_hidden_when_single_page() {
        let p = Pagination::new(100, PageSize::OneHundred, 1);
        assert!(!p.is_visible());
        assert!(p.window().is_empty());
        assert!(!p.has_prev());
        assert!(!p.has_next());
    }

    #[test]
    fn test_empty_set() {
        let p = Pagination::new(0, PageSize::Twenty, 1);
        assert_eq!(p.total_pages(), 0);
        assert_eq!(p.current_page, 1);
        assert_eq!(p.slice_range(), 0..0);
        assert_eq!(p.showing(), (0, 0, 0));
        assert_eq!(p.prev_page(), 1);
        assert_eq!(p.next_page(), 1);
    }

    #[test]
    fn test_window_at_start() {
        let p = Pagination::new(200, PageSize::Twenty, 1);
        assert_eq!(numbers(&p.window()), vec!["[1]", "2", "3", "4", "5", "...", "10"]);
    }

    #[test]
    fn test_window_in_middle() {
        let p = Pagination::new(200, PageSize::Twenty, 5);
        assert_eq!(
            numbers(&p.window()),
            vec!["1", "...", "3", "4", "[5]", "6", "7", "...", "10"]
        );
    }

    #[test]
    fn test_window_no_ellipsis_when_adjacent() {
        // start = 2：只前置第 1 页，不加省略号
        let p = Pagination::new(200, PageSize::Twenty, 4);
        assert_eq!(
            numbers(&p.window()),
            vec!["1", "2", "3", "[4]", "5", "6", "...", "10"]
        );

        // end = total-1：只追加末页，不加省略号
        let p = Pagination::new(140, PageSize::Twenty, 4);
        assert_eq!(numbers(&p.window()), vec!["1", "2", "3", "[4]", "5", "6", "7"]);
    }

    #[test]
    fn test_window_at_end() {
        let p = Pagination::new(200, PageSize::Twenty, 10);
        assert_eq!(numbers(&p.window()), vec!["1", "...", "8", "9", "[10]"]);
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(0, 5), 1);
        assert_eq!(clamp_page(9, 5), 5);
        assert_eq!(clamp_page(3, 0), 1);
        assert_eq!(Pagination::new(50, PageSize::Twenty, 99).current_page, 3);
    }
}
