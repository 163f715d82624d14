// ==========================================
// ERP 产品目录 - 产品领域模型
// ==========================================
// 职责: 产品记录、字段定义、导入中间结构
// 红线: part_number 唯一，同时作为显示标题
// ==========================================

use crate::domain::types::ProductId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// ProductField - 产品字段（显示顺序）
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductField {
    Location,
    ProductLine,
    PartNumber,
    Description,
    Quantity,
    Uom,
    NetPrice,
}

impl ProductField {
    /// 全部字段，顺序即表格列顺序，也是全文搜索拼接顺序
    pub const ALL: [ProductField; 7] = [
        ProductField::Location,
        ProductField::ProductLine,
        ProductField::PartNumber,
        ProductField::Description,
        ProductField::Quantity,
        ProductField::Uom,
        ProductField::NetPrice,
    ];

    /// CSV 表头名（大小写敏感）
    pub fn header(self) -> &'static str {
        match self {
            ProductField::Location => "Product_Location_Id",
            ProductField::ProductLine => "Product_ProductLine_Id",
            ProductField::PartNumber => "Product_PartNumber",
            ProductField::Description => "Product_Description",
            ProductField::Quantity => "Product_Quantity",
            ProductField::Uom => "Product_UOM",
            ProductField::NetPrice => "Product_NetPrice",
        }
    }

    /// 表格列标题
    pub fn label(self) -> &'static str {
        match self {
            ProductField::Location => "Location ID",
            ProductField::ProductLine => "Product Line ID",
            ProductField::PartNumber => "Part Number",
            ProductField::Description => "Description",
            ProductField::Quantity => "Quantity",
            ProductField::Uom => "UOM",
            ProductField::NetPrice => "Net Price",
        }
    }

    pub fn from_header(header: &str) -> Option<ProductField> {
        Self::ALL.iter().copied().find(|f| f.header() == header)
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

// ==========================================
// ProductRecord - 产品记录
// ==========================================
// 所有字段均以文本保存；quantity / net_price 不做数值校验
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub location_id: String,
    pub product_line_id: String,
    pub part_number: String, // 唯一键
    pub description: String,
    pub quantity: String,
    pub unit_of_measure: String,
    pub net_price: String,
}

impl ProductRecord {
    pub fn get(&self, field: ProductField) -> &str {
        match field {
            ProductField::Location => &self.location_id,
            ProductField::ProductLine => &self.product_line_id,
            ProductField::PartNumber => &self.part_number,
            ProductField::Description => &self.description,
            ProductField::Quantity => &self.quantity,
            ProductField::Uom => &self.unit_of_measure,
            ProductField::NetPrice => &self.net_price,
        }
    }

    pub fn set(&mut self, field: ProductField, value: String) {
        match field {
            ProductField::Location => self.location_id = value,
            ProductField::ProductLine => self.product_line_id = value,
            ProductField::PartNumber => self.part_number = value,
            ProductField::Description => self.description = value,
            ProductField::Quantity => self.quantity = value,
            ProductField::Uom => self.unit_of_measure = value,
            ProductField::NetPrice => self.net_price = value,
        }
    }

    /// 按显示顺序返回 7 个字段值
    pub fn display_values(&self) -> [&str; 7] {
        ProductField::ALL.map(|f| self.get(f))
    }

    /// 显示标题（即 part_number）
    pub fn title(&self) -> &str {
        &self.part_number
    }
}

// ==========================================
// StoredProduct - 已持久化的产品
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProduct {
    pub id: ProductId,
    pub title: String,
    pub record: ProductRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==========================================
// ProductEdit - 直接编辑（部分字段）
// ==========================================
// 只写入提交了的字段，未提交字段保持原值
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductEdit {
    pub location_id: Option<String>,
    pub product_line_id: Option<String>,
    pub part_number: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<String>,
    pub unit_of_measure: Option<String>,
    pub net_price: Option<String>,
}

impl ProductEdit {
    pub fn is_empty(&self) -> bool {
        ProductField::ALL.iter().all(|f| self.value(*f).is_none())
    }

    fn value(&self, field: ProductField) -> Option<&String> {
        match field {
            ProductField::Location => self.location_id.as_ref(),
            ProductField::ProductLine => self.product_line_id.as_ref(),
            ProductField::PartNumber => self.part_number.as_ref(),
            ProductField::Description => self.description.as_ref(),
            ProductField::Quantity => self.quantity.as_ref(),
            ProductField::Uom => self.unit_of_measure.as_ref(),
            ProductField::NetPrice => self.net_price.as_ref(),
        }
    }

    /// 应用到已有记录，返回新记录
    pub fn apply_to(&self, record: &ProductRecord) -> ProductRecord {
        let mut updated = record.clone();
        for field in ProductField::ALL {
            if let Some(value) = self.value(field) {
                updated.set(field, value.clone());
            }
        }
        updated
    }
}

// ==========================================
// RawProductRow - 导入中间结构（字段映射）
// ==========================================
// 生命周期: 仅在一次导入请求内
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProductRow {
    pub row_number: usize, // 原始文件行号（表头为第 1 行）
    pub fields: HashMap<String, String>,
}

impl RawProductRow {
    pub fn get(&self, field: ProductField) -> Option<&str> {
        self.fields.get(field.header()).map(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProductRecord {
        ProductRecord {
            location_id: "L1".to_string(),
            product_line_id: "PL2".to_string(),
            part_number: "PN-100".to_string(),
            description: "Widget".to_string(),
            quantity: "5".to_string(),
            unit_of_measure: "EA".to_string(),
            net_price: "12.50".to_string(),
        }
    }

    #[test]
    fn test_display_values_order() {
        let record = sample();
        assert_eq!(
            record.display_values(),
            ["L1", "PL2", "PN-100", "Widget", "5", "EA", "12.50"]
        );
        assert_eq!(record.title(), "PN-100");
    }

    #[test]
    fn test_header_lookup() {
        assert_eq!(
            ProductField::from_header("Product_UOM"),
            Some(ProductField::Uom)
        );
        // 大小写敏感
        assert_eq!(ProductField::from_header("product_uom"), None);
    }

    #[test]
    fn test_edit_only_touches_submitted_fields() {
        let edit = ProductEdit {
            quantity: Some("9".to_string()),
            net_price: Some(String::new()),
            ..Default::default()
        };
        let updated = edit.apply_to(&sample());
        assert_eq!(updated.quantity, "9");
        assert_eq!(updated.net_price, "");
        assert_eq!(updated.description, "Widget");
        assert!(!edit.is_empty());
        assert!(ProductEdit::default().is_empty());
    }
}
