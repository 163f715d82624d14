// ==========================================
// ERP 产品目录 - 领域类型定义
// ==========================================
// 职责: 目录视图与存储共用的基础类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 产品 ID (Product Id)
// ==========================================
// 由存储分配,单调递增
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ==========================================
// 每页条数 (Page Size)
// ==========================================
// 仅允许 20/50/100/250/500
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PageSize {
    Twenty,
    Fifty,
    OneHundred,
    TwoHundredFifty,
    FiveHundred,
}

impl PageSize {
    /// 选择器中的全部选项（按显示顺序）
    pub const ALL: [PageSize; 5] = [
        PageSize::Twenty,
        PageSize::Fifty,
        PageSize::OneHundred,
        PageSize::TwoHundredFifty,
        PageSize::FiveHundred,
    ];

    pub fn as_usize(self) -> usize {
        match self {
            PageSize::Twenty => 20,
            PageSize::Fifty => 50,
            PageSize::OneHundred => 100,
            PageSize::TwoHundredFifty => 250,
            PageSize::FiveHundred => 500,
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::OneHundred
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            20 => Ok(PageSize::Twenty),
            50 => Ok(PageSize::Fifty),
            100 => Ok(PageSize::OneHundred),
            250 => Ok(PageSize::TwoHundredFifty),
            500 => Ok(PageSize::FiveHundred),
            other => Err(format!("无效的每页条数: {}（仅支持 20/50/100/250/500）", other)),
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> usize {
        size.as_usize()
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_usize())
    }
}

// ==========================================
// 管理列表排序列 (Sort Column)
// ==========================================
// 与后台列表的可排序列一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Location,
    ProductLine,
    PartNumber,
    Quantity,
    Price,
}

impl std::str::FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "location" | "location_id" => Ok(SortColumn::Location),
            "product_line" | "productline" => Ok(SortColumn::ProductLine),
            "part_number" | "partnumber" => Ok(SortColumn::PartNumber),
            "quantity" => Ok(SortColumn::Quantity),
            "price" | "net_price" => Ok(SortColumn::Price),
            other => Err(format!("无效的排序列: {}", other)),
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortColumn::Location => write!(f, "location"),
            SortColumn::ProductLine => write!(f, "product_line"),
            SortColumn::PartNumber => write!(f, "part_number"),
            SortColumn::Quantity => write!(f, "quantity"),
            SortColumn::Price => write!(f, "price"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}
