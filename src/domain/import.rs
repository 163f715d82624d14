// ==========================================
// ERP 产品目录 - 导入领域模型
// ==========================================
// 职责: 行级诊断、导入汇总、导入结果
// 说明: ImportBatch 不落库，仅以 batch_id 体现在日志与结果中
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// RowIssueKind - 行级问题类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RowIssueKind {
    /// 列数与表头不一致（整行拒绝，不做错位映射）
    ColumnCountMismatch { expected: usize, actual: usize },
    /// 主键 Product_PartNumber 为空
    MissingPartNumber,
    /// 行无法解析（编码错误等）
    MalformedRow,
    /// 存储写入失败（不重试）
    StoreWriteFailed,
    /// 同一文件内重复的 part_number（后行覆盖前行，仅提示）
    DuplicateInFile,
}

impl RowIssueKind {
    /// 是否导致该行被跳过
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            RowIssueKind::ColumnCountMismatch { .. }
                | RowIssueKind::MissingPartNumber
                | RowIssueKind::MalformedRow
        )
    }
}

impl fmt::Display for RowIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIssueKind::ColumnCountMismatch { expected, actual } => {
                write!(f, "COLUMN_COUNT_MISMATCH({}/{})", actual, expected)
            }
            RowIssueKind::MissingPartNumber => write!(f, "MISSING_PART_NUMBER"),
            RowIssueKind::MalformedRow => write!(f, "MALFORMED_ROW"),
            RowIssueKind::StoreWriteFailed => write!(f, "STORE_WRITE_FAILED"),
            RowIssueKind::DuplicateInFile => write!(f, "DUPLICATE_IN_FILE"),
        }
    }
}

// ==========================================
// RowIssue - 行级诊断
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowIssue {
    pub row_number: usize,
    pub part_number: Option<String>,
    pub kind: RowIssueKind,
    pub message: String,
}

impl RowIssue {
    pub fn new(row_number: usize, kind: RowIssueKind, message: impl Into<String>) -> Self {
        Self {
            row_number,
            part_number: None,
            kind,
            message: message.into(),
        }
    }

    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = Some(part_number.into());
        self
    }
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.part_number {
            Some(pn) => write!(f, "行 {} [{}] {}: {}", self.row_number, pn, self.kind, self.message),
            None => write!(f, "行 {} {}: {}", self.row_number, self.kind, self.message),
        }
    }
}

// ==========================================
// ImportSummary - 导入汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize,         // 非空数据行数
    pub processed: usize,          // created + updated
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,            // 行级输入错误
    pub failed: usize,             // 存储写入失败
    pub duplicates_in_file: usize, // 文件内重复键（已按后行覆盖）
}

impl ImportSummary {
    /// 是否全部成功（无跳过、无失败）
    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && self.failed == 0
    }
}

// ==========================================
// ImportOutcome - 单个文件的导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub batch_id: String,
    pub file_name: String,
    pub summary: ImportSummary,
    pub issues: Vec<RowIssue>,
    pub elapsed_ms: u64,
}

impl ImportOutcome {
    /// 用户可见的汇总消息（已本地化）
    pub fn message(&self) -> String {
        if self.summary.is_clean() {
            crate::i18n::t("import.completed")
        } else {
            let processed = self.summary.processed.to_string();
            let skipped = self.summary.skipped.to_string();
            let failed = self.summary.failed.to_string();
            crate::i18n::t_with_args(
                "import.completed_with_failures",
                &[
                    ("processed", processed.as_str()),
                    ("skipped", skipped.as_str()),
                    ("failed", failed.as_str()),
                ],
            )
        }
    }
}
