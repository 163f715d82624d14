// ==========================================
// ERP 产品目录 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供目录存储接口，屏蔽数据库细节
// 约束: 所有查询使用参数化，防止 SQL 注入
// ==========================================

pub mod catalog_repo;
pub mod catalog_store;
pub mod error;
pub mod memory_store;

// 重导出核心仓储
pub use catalog_repo::SqliteCatalogRepository;
pub use catalog_store::CatalogStore;
pub use error::{RepositoryError, RepositoryResult};
pub use memory_store::MemoryCatalogStore;
