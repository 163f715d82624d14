// ==========================================
// ERP 产品目录 - 配置层
// ==========================================
// 职责: 系统配置读取与写入
// 存储: config_kv 表
// ==========================================

pub mod catalog_config_trait;
pub mod config_manager;

// 重导出核心配置管理器
pub use catalog_config_trait::CatalogConfigReader;
pub use config_manager::{config_keys, ConfigManager};
