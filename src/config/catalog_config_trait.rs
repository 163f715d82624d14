// ==========================================
// ERP 产品目录 - 目录配置读取 Trait
// ==========================================
// 职责: 定义导入与目录视图所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::domain::types::PageSize;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// CatalogConfigReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait CatalogConfigReader: Send + Sync {
    /// 获取目录视图默认每页条数
    ///
    /// # 默认值
    /// - 100（非法值回退为默认）
    async fn get_default_page_size(&self) -> RepositoryResult<PageSize>;

    /// 获取搜索输入防抖时长（毫秒）
    ///
    /// # 默认值
    /// - 300
    async fn get_search_debounce_ms(&self) -> RepositoryResult<u64>;

    /// 获取价格显示的货币符号
    ///
    /// # 默认值
    /// - "$"
    async fn get_currency_symbol(&self) -> RepositoryResult<String>;

    /// 导入结果中最多返回的行级问题条数（计数不受影响）
    ///
    /// # 默认值
    /// - 500
    async fn get_max_reported_issues(&self) -> RepositoryResult<usize>;
}
