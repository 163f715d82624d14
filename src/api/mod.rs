// ==========================================
// ERP 产品目录 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供命令行与上层集成调用
// 约束: 管理操作一律先经 AdminGuard 校验
// ==========================================

pub mod catalog_api;
pub mod error;
pub mod import_api;
pub mod validator;

// 重导出核心类型
pub use catalog_api::{AdminListRow, CatalogApi};
pub use error::{ApiError, ApiResult};
pub use import_api::{DeleteAllResponse, DynProductImporter, ImportApi, ImportApiResponse};
pub use validator::{AdminAction, AdminGuard, Operator};
