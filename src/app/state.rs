// ==========================================
// ERP 产品目录 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约束: 存储与配置共用同一条 SQLite 连接
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{AdminGuard, CatalogApi, DynProductImporter, ImportApi};
use crate::config::{CatalogConfigReader, ConfigManager};
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::importer::ProductImporterImpl;
use crate::repository::{CatalogStore, SqliteCatalogRepository};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "ERP_CATALOG_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 目录存储
    pub store: Arc<SqliteCatalogRepository>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 管理操作校验器（令牌签发与校验）
    pub guard: Arc<AdminGuard>,

    /// 导入API
    pub import_api: Arc<ImportApi>,

    /// 目录API
    pub catalog_api: Arc<CatalogApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（":memory:" 为内存库）
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("建表失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository / Config
        // ==========================================
        let store = Arc::new(
            SqliteCatalogRepository::from_connection(conn.clone())
                .map_err(|e| format!("无法初始化目录存储: {}", e))?,
        );
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法初始化配置管理器: {}", e))?,
        );

        let store_dyn: Arc<dyn CatalogStore> = store.clone();
        let config_dyn: Arc<dyn CatalogConfigReader> = config_manager.clone();

        // ==========================================
        // 初始化导入器与API
        // ==========================================
        let importer: Arc<DynProductImporter> = Arc::new(
            ProductImporterImpl::with_default_components(store_dyn.clone(), config_dyn.clone()),
        );
        let guard = Arc::new(AdminGuard::new());

        let import_api = Arc::new(ImportApi::new(importer, store_dyn.clone(), guard.clone()));
        let catalog_api = Arc::new(CatalogApi::new(store_dyn, config_dyn, guard.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            store,
            config_manager,
            guard,
            import_api,
            catalog_api,
        })
    }
}

/// 获取默认数据库路径
///
/// 顺序: 环境变量 ERP_CATALOG_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./erp_catalog.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("erp-catalog");
        // 目录创建失败时退回当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("erp_catalog.db");
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_wires_shared_connection() {
        let state = AppState::new(":memory:".to_string()).unwrap();
        state
            .config_manager
            .set_config_value(crate::config::config_keys::CURRENCY_SYMBOL, "€")
            .unwrap();
        // 配置与存储共享同一连接
        assert_eq!(
            state
                .config_manager
                .get_global_config_value(crate::config::config_keys::CURRENCY_SYMBOL)
                .unwrap()
                .as_deref(),
            Some("€")
        );
        assert_eq!(state.store.count().unwrap(), 0);
    }
}
