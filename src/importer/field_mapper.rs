// ==========================================
// ERP 产品目录 - 字段映射器实现
// ==========================================
// 职责: 表头名 → ProductRecord 字段（显式、按名映射）
// 说明: 缺失列按空串处理；列数校验在解析阶段完成
// ==========================================

use crate::domain::product::{ProductField, ProductRecord, RawProductRow};
use crate::importer::product_importer_trait::FieldMapper as FieldMapperTrait;

#[derive(Debug, Default, Clone, Copy)]
pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_to_record(&self, row: &RawProductRow) -> ProductRecord {
        let mut record = ProductRecord::default();
        for field in ProductField::ALL {
            if let Some(value) = row.get(field) {
                record.set(field, value.to_string());
            }
        }
        record
    }
}
