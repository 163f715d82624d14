// ==========================================
// ERP 产品目录 - 冲突处理器实现
// ==========================================
// 职责: 检测同一文件内重复的 part_number
// 策略: 后行覆盖前行（仍逐行 upsert），重复仅作提示
// ==========================================

use crate::domain::import::{RowIssue, RowIssueKind};
use crate::importer::product_importer_trait::ConflictHandler as ConflictHandlerTrait;
use std::collections::HashMap;

#[derive(Debug, Default, Clone, Copy)]
pub struct ConflictHandler;

impl ConflictHandlerTrait for ConflictHandler {
    fn check_in_file_duplicate(
        &self,
        seen: &mut HashMap<String, usize>,
        row_number: usize,
        part_number: &str,
    ) -> Option<RowIssue> {
        match seen.get(part_number) {
            Some(first_row) => Some(
                RowIssue::new(
                    row_number,
                    RowIssueKind::DuplicateInFile,
                    format!("与第 {} 行重复，以本行为准", first_row),
                )
                .with_part_number(part_number),
            ),
            None => {
                seen.insert(part_number.to_string(), row_number);
                None
            }
        }
    }
}
