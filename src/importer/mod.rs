// ==========================================
// ERP 产品目录 - 导入层
// ==========================================
// 职责: 外部 CSV 数据导入，按 part_number 对账写入目录
// 支持: CSV（单一逗号分隔格式，固定表头）
// ==========================================

// 模块声明
pub mod conflict_handler;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod product_importer_impl;
pub mod product_importer_trait;

// 重导出核心类型
pub use conflict_handler::ConflictHandler as ConflictHandlerImpl;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{check_csv_extension, CsvParser};
pub use product_importer_impl::ProductImporterImpl;

// 重导出 Trait 接口
pub use product_importer_trait::{
    ConflictHandler, DataCleaner, FieldMapper, FileParser, ProductImporter, RowStream,
};
