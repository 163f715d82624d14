// ==========================================
// ERP 产品目录 - 应用层
// ==========================================
// 职责: 组装存储、配置、导入器与 API 实例
// ==========================================

pub mod state;

// 重导出
pub use state::{get_default_db_path, AppState};
