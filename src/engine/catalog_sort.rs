// ==========================================
// ERP 产品目录 - 管理列表排序与价格显示
// ==========================================
// 排序: 按存储文本做字符串比较（与后台 meta 值排序一致），稳定排序
// 显示: 价格 = 货币符号 + 值；可解析为数字时保留两位小数
// ==========================================

use crate::domain::product::{ProductField, StoredProduct};
use crate::domain::types::{SortColumn, SortDirection};

/// 排序列对应的产品字段
pub fn sort_field(column: SortColumn) -> ProductField {
    match column {
        SortColumn::Location => ProductField::Location,
        SortColumn::ProductLine => ProductField::ProductLine,
        SortColumn::PartNumber => ProductField::PartNumber,
        SortColumn::Quantity => ProductField::Quantity,
        SortColumn::Price => ProductField::NetPrice,
    }
}

/// 原地排序（相同值保持原有相对顺序）
pub fn sort_products(products: &mut [StoredProduct], column: SortColumn, direction: SortDirection) {
    let field = sort_field(column);
    products.sort_by(|a, b| {
        let ord = a.record.get(field).cmp(b.record.get(field));
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// 价格显示
///
/// # 示例
/// - ("12.5", "$") → "$12.50"
/// - ("call us", "$") → "$call us"
pub fn format_net_price(raw: &str, currency_symbol: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => format!("{}{:.2}", currency_symbol, value),
        _ => format!("{}{}", currency_symbol, raw),
    }
}
