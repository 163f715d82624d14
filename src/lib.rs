// ==========================================
// ERP 产品目录 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: ERP 产品 CSV 导入 + 目录浏览（过滤 / 分页）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 过滤 / 分页 / 排序
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 性能埋点
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// 命令行参数
pub mod cli;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{PageSize, ProductId, SortColumn, SortDirection};

// 领域实体
pub use domain::{ImportOutcome, ImportSummary, ProductEdit, ProductRecord, RowIssue, StoredProduct};

// 引擎
pub use engine::{CatalogView, FilterState, Pagination};

// API
pub use api::{CatalogApi, ImportApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "ERP 产品目录";
