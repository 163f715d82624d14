// ==========================================
// ERP 产品目录 - 产品导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 解析 → 映射 → 清洗 → 文件内重复检测 → 逐行 upsert
// ==========================================

use crate::domain::import::{ImportOutcome, RowIssue};
use crate::domain::product::{ProductRecord, RawProductRow};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// 惰性、有限、不可重启的行流
pub type RowStream = Box<dyn Iterator<Item = Result<RawProductRow, RowIssue>> + Send>;

// ==========================================
// ProductImporter Trait
// ==========================================
// 用途: 产品导入主接口
// 实现者: ProductImporterImpl
#[async_trait]
pub trait ProductImporter: Send + Sync {
    /// 从 CSV 文件导入产品
    ///
    /// # 参数
    /// - file_path: CSV 文件路径（扩展名 .csv，大小写不敏感）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 导入结果（行级问题在 issues 中）
    /// - Err: 输入错误（扩展名、文件不存在、缺少主键表头）
    async fn import_from_csv<P: AsRef<Path> + Send>(&self, file_path: P)
        -> ImportResult<ImportOutcome>;

    /// 导入内存中的上传文件
    ///
    /// # 参数
    /// - file_name: 上传时的原始文件名（用于扩展名校验）
    /// - bytes: 文件内容
    async fn import_upload(&self, file_name: &str, bytes: Vec<u8>) -> ImportResult<ImportOutcome>;

    /// 批量导入多个文件（并发执行）
    ///
    /// # 说明
    /// - 每个文件的导入是独立的，互不影响
    /// - 单个文件的致命错误不影响其他文件
    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Vec<Result<ImportOutcome, String>>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 打开文件并返回行流
    ///
    /// # 返回
    /// - Ok(RowStream): 表头已校验
    /// - Err: 扩展名不支持、文件不存在、缺少主键表头
    fn open_rows(&self, file_path: &Path) -> ImportResult<RowStream>;

    /// 从任意字节流读取（上传内容）
    fn parse_reader(&self, reader: Box<dyn Read + Send>) -> ImportResult<RowStream>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（表头名 → ProductRecord 字段）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行映射为 ProductRecord
    ///
    /// # 说明
    /// - 缺失的列按空串处理
    fn map_to_record(&self, row: &RawProductRow) -> ProductRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 文本清洗接口
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 清洗单个文本值
    fn sanitize_text(&self, value: &str) -> String;

    /// 清洗整条记录的 7 个字段
    fn clean_record(&self, record: ProductRecord) -> ProductRecord {
        ProductRecord {
            location_id: self.sanitize_text(&record.location_id),
            product_line_id: self.sanitize_text(&record.product_line_id),
            part_number: self.sanitize_text(&record.part_number),
            description: self.sanitize_text(&record.description),
            quantity: self.sanitize_text(&record.quantity),
            unit_of_measure: self.sanitize_text(&record.unit_of_measure),
            net_price: self.sanitize_text(&record.net_price),
        }
    }
}

// ==========================================
// ConflictHandler Trait
// ==========================================
// 用途: 同一文件内重复 part_number 检测
// 实现者: ConflictHandler
pub trait ConflictHandler: Send + Sync {
    /// 登记一次出现
    ///
    /// # 参数
    /// - seen: 本批次已出现的 part_number → 首次出现行号
    ///
    /// # 返回
    /// - Some(RowIssue): 重复出现（DuplicateInFile，仅提示，不跳过）
    /// - None: 首次出现
    fn check_in_file_duplicate(
        &self,
        seen: &mut HashMap<String, usize>,
        row_number: usize,
        part_number: &str,
    ) -> Option<RowIssue>;
}
