// ==========================================
// ERP 产品目录 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod import;
pub mod product;
pub mod types;

// 重导出核心类型
pub use import::{ImportOutcome, ImportSummary, RowIssue, RowIssueKind};
pub use product::{ProductEdit, ProductField, ProductRecord, RawProductRow, StoredProduct};
pub use types::{PageSize, ProductId, SortColumn, SortDirection};
