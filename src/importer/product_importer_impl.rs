// ==========================================
// ERP 产品目录 - 产品导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到目录存储
// 流程: 解析 → 映射 → 清洗 → 主键校验 → 文件内重复检测 → 逐行 upsert
// 约束: 每行一次存储写入，不包整体事务；行级失败不中断导入
// ==========================================

use crate::config::CatalogConfigReader;
use crate::domain::import::{ImportOutcome, ImportSummary, RowIssue, RowIssueKind};
use crate::domain::product::RawProductRow;
use crate::importer::conflict_handler::ConflictHandler as ConflictHandlerImpl;
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::{check_csv_extension, CsvParser};
use crate::importer::product_importer_trait::{
    ConflictHandler, DataCleaner, FieldMapper, FileParser, ProductImporter, RowStream,
};
use crate::perf::PerfGuard;
use crate::repository::CatalogStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ProductImporterImpl - 产品导入器实现
// ==========================================
pub struct ProductImporterImpl<S, C>
where
    S: CatalogStore + ?Sized,
    C: CatalogConfigReader + ?Sized,
{
    // 目录存储
    store: Arc<S>,

    // 配置读取器
    config: Arc<C>,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    conflict_handler: Box<dyn ConflictHandler>,
}

impl<S, C> ProductImporterImpl<S, C>
where
    S: CatalogStore + ?Sized,
    C: CatalogConfigReader + ?Sized,
{
    /// 创建新的 ProductImporter 实例
    ///
    /// # 参数
    /// - store: 目录存储
    /// - config: 配置读取器
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    /// - data_cleaner: 数据清洗器
    /// - conflict_handler: 文件内重复检测
    pub fn new(
        store: Arc<S>,
        config: Arc<C>,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
        conflict_handler: Box<dyn ConflictHandler>,
    ) -> Self {
        Self {
            store,
            config,
            file_parser,
            field_mapper,
            data_cleaner,
            conflict_handler,
        }
    }

    /// 使用默认组件（CsvParser / FieldMapper / DataCleaner / ConflictHandler）
    pub fn with_default_components(store: Arc<S>, config: Arc<C>) -> Self {
        Self::new(
            store,
            config,
            Box::new(CsvParser::new()),
            Box::new(FieldMapperImpl),
            Box::new(DataCleanerImpl),
            Box::new(ConflictHandlerImpl),
        )
    }

    /// 逐行对账写入
    ///
    /// # 说明
    /// - total_rows 统计所有非空数据行（含被跳过的行）
    /// - issues 最多保留 max_issues 条，计数始终精确
    fn reconcile(
        &self,
        batch_id: String,
        file_name: String,
        rows: RowStream,
        max_issues: usize,
        started: Instant,
    ) -> ImportOutcome {
        let _perf = PerfGuard::new("import_reconcile");

        let mut summary = ImportSummary::default();
        let mut issues: Vec<RowIssue> = Vec::new();
        let mut dropped_issues = 0usize;
        let mut seen: HashMap<String, usize> = HashMap::new();

        let mut report = |issue: RowIssue| {
            if issues.len() < max_issues {
                issues.push(issue);
            } else {
                dropped_issues += 1;
            }
        };

        for item in rows {
            summary.total_rows += 1;

            let row: RawProductRow = match item {
                Ok(row) => row,
                Err(issue) => {
                    warn!(row_number = issue.row_number, kind = %issue.kind, "行被跳过");
                    summary.skipped += 1;
                    report(issue);
                    continue;
                }
            };

            let record = self
                .data_cleaner
                .clean_record(self.field_mapper.map_to_record(&row));

            if record.part_number.is_empty() {
                warn!(row_number = row.row_number, "主键为空，行被跳过");
                summary.skipped += 1;
                report(RowIssue::new(
                    row.row_number,
                    RowIssueKind::MissingPartNumber,
                    "Product_PartNumber 为空",
                ));
                continue;
            }

            if let Some(issue) = self.conflict_handler.check_in_file_duplicate(
                &mut seen,
                row.row_number,
                &record.part_number,
            ) {
                debug!(row_number = row.row_number, part_number = %record.part_number, "文件内重复");
                summary.duplicates_in_file += 1;
                report(issue);
            }

            let existed = match self.store.find_by_part_number(&record.part_number) {
                Ok(found) => found.is_some(),
                Err(e) => {
                    error!(row_number = row.row_number, part_number = %record.part_number, error = %e, "查询失败");
                    summary.failed += 1;
                    report(
                        RowIssue::new(row.row_number, RowIssueKind::StoreWriteFailed, e.to_string())
                            .with_part_number(record.part_number.as_str()),
                    );
                    continue;
                }
            };

            match self.store.upsert(&record) {
                Ok(id) => {
                    if existed {
                        summary.updated += 1;
                    } else {
                        summary.created += 1;
                    }
                    debug!(row_number = row.row_number, product_id = %id, updated = existed, "写入完成");
                }
                Err(e) => {
                    error!(row_number = row.row_number, part_number = %record.part_number, error = %e, "写入失败");
                    summary.failed += 1;
                    report(
                        RowIssue::new(row.row_number, RowIssueKind::StoreWriteFailed, e.to_string())
                            .with_part_number(record.part_number.as_str()),
                    );
                }
            }
        }

        summary.processed = summary.created + summary.updated;

        if dropped_issues > 0 {
            warn!(dropped = dropped_issues, limit = max_issues, "行级问题过多，已截断");
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            total = summary.total_rows,
            created = summary.created,
            updated = summary.updated,
            skipped = summary.skipped,
            failed = summary.failed,
            duplicates = summary.duplicates_in_file,
            elapsed_ms,
            "产品导入完成"
        );

        ImportOutcome {
            batch_id,
            file_name,
            summary,
            issues,
            elapsed_ms,
        }
    }
}

#[async_trait]
impl<S, C> ProductImporter for ProductImporterImpl<S, C>
where
    S: CatalogStore + ?Sized,
    C: CatalogConfigReader + ?Sized,
{
    #[instrument(skip(self, file_path), fields(batch_id))]
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportOutcome> {
        let started = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let max_issues = self.config.get_max_reported_issues().await?;

        let path = file_path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        info!(batch_id = %batch_id, file_path = %path.display(), "开始导入产品数据");

        let rows = self.file_parser.open_rows(path).map_err(|e| {
            error!(batch_id = %batch_id, error = %e, "文件打开失败");
            e
        })?;

        Ok(self.reconcile(batch_id, file_name, rows, max_issues, started))
    }

    #[instrument(skip(self, bytes), fields(batch_id, size = bytes.len()))]
    async fn import_upload(&self, file_name: &str, bytes: Vec<u8>) -> ImportResult<ImportOutcome> {
        let started = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        check_csv_extension(file_name)?;
        let max_issues = self.config.get_max_reported_issues().await?;

        info!(batch_id = %batch_id, file_name = file_name, "开始导入上传文件");
        let rows = self.file_parser.parse_reader(Box::new(Cursor::new(bytes)))?;

        Ok(self.reconcile(batch_id, file_name.to_string(), rows, max_issues, started))
    }

    async fn batch_import<P: AsRef<Path> + Send + Sync>(
        &self,
        file_paths: Vec<P>,
    ) -> Vec<Result<ImportOutcome, String>> {
        use futures::future::join_all;

        info!(count = file_paths.len(), "开始批量导入文件");

        let import_tasks = file_paths.into_iter().map(|path| {
            let path_str = path.as_ref().display().to_string();
            async move {
                match self.import_from_csv(path).await {
                    Ok(outcome) => {
                        info!(file = %path_str, processed = outcome.summary.processed, "文件导入成功");
                        Ok(outcome)
                    }
                    Err(e) => {
                        error!(file = %path_str, error = %e, "文件导入失败");
                        Err(format!("文件 {} 导入失败: {}", path_str, e))
                    }
                }
            }
        });

        let results = join_all(import_tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量导入完成"
        );

        results
    }
}
