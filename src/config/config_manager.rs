// ==========================================
// ERP 产品目录 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、写入
// 存储: config_kv 表 (scope_id = 'global')
// ==========================================

use crate::config::catalog_config_trait::CatalogConfigReader;
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::types::PageSize;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 配置（存在则覆盖）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![GLOBAL_SCOPE, key, value, Utc::now()],
        )?;
        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON，按 key 排序）
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        serde_json::to_string(&json!(config_map))
            .map_err(|e| RepositoryError::InternalError(e.to_string()))
    }
}

// ==========================================
// CatalogConfigReader Trait 实现
// ==========================================
#[async_trait]
impl CatalogConfigReader for ConfigManager {
    async fn get_default_page_size(&self) -> RepositoryResult<PageSize> {
        let value = self.get_config_or_default(config_keys::DEFAULT_PAGE_SIZE, "100")?;
        let page_size = value
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| PageSize::try_from(n).ok());
        Ok(page_size.unwrap_or_else(|| {
            tracing::warn!(
                config_key = config_keys::DEFAULT_PAGE_SIZE,
                raw_value = %value,
                "每页条数配置非法，使用默认值"
            );
            PageSize::default()
        }))
    }

    async fn get_search_debounce_ms(&self) -> RepositoryResult<u64> {
        let value = self.get_config_or_default(config_keys::SEARCH_DEBOUNCE_MS, "300")?;
        Ok(value.trim().parse::<u64>().unwrap_or(300))
    }

    async fn get_currency_symbol(&self) -> RepositoryResult<String> {
        self.get_config_or_default(config_keys::CURRENCY_SYMBOL, "$")
    }

    async fn get_max_reported_issues(&self) -> RepositoryResult<usize> {
        let value = self.get_config_or_default(config_keys::MAX_REPORTED_ISSUES, "500")?;
        Ok(value.trim().parse::<usize>().unwrap_or(500))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 目录视图
    pub const DEFAULT_PAGE_SIZE: &str = "catalog/default_page_size";
    pub const SEARCH_DEBOUNCE_MS: &str = "catalog/search_debounce_ms";
    pub const CURRENCY_SYMBOL: &str = "catalog/currency_symbol";

    // 导入
    pub const MAX_REPORTED_ISSUES: &str = "import/max_reported_issues";
}
