// ==========================================
// ERP 产品目录 - 导入 API
// ==========================================
// 职责: 管理员导入入口（文件路径 / 上传字节）与清空目录
// 约束: 授权校验通过后才读取文件；文件级错误时不写入任何行
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{AdminAction, AdminGuard, Operator};
use crate::config::CatalogConfigReader;
use crate::domain::import::{ImportOutcome, ImportSummary, RowIssue};
use crate::importer::{ProductImporter, ProductImporterImpl};
use crate::repository::CatalogStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 对象安全形式的导入器（ProductImporter 含泛型方法，无法作为 trait 对象）
pub type DynProductImporter = ProductImporterImpl<dyn CatalogStore, dyn CatalogConfigReader>;

/// 导入 API 响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 导入批次ID
    pub batch_id: String,
    pub file_name: String,
    /// 汇总统计
    pub summary: ImportSummary,
    /// 行级诊断（可能被截断，计数以 summary 为准）
    pub issues: Vec<RowIssue>,
    /// 用户可见消息（已本地化）
    pub message: String,
    pub elapsed_ms: u64,
}

impl From<ImportOutcome> for ImportApiResponse {
    fn from(outcome: ImportOutcome) -> Self {
        let message = outcome.message();
        Self {
            batch_id: outcome.batch_id,
            file_name: outcome.file_name,
            summary: outcome.summary,
            issues: outcome.issues,
            message,
            elapsed_ms: outcome.elapsed_ms,
        }
    }
}

/// 清空目录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAllResponse {
    /// 是否确实删除了记录
    pub deleted: bool,
    pub message: String,
}

/// 导入 API
pub struct ImportApi {
    importer: Arc<DynProductImporter>,
    store: Arc<dyn CatalogStore>,
    guard: Arc<AdminGuard>,
}

impl ImportApi {
    pub fn new(
        importer: Arc<DynProductImporter>,
        store: Arc<dyn CatalogStore>,
        guard: Arc<AdminGuard>,
    ) -> Self {
        Self {
            importer,
            store,
            guard,
        }
    }

    /// 从本地文件导入产品
    ///
    /// # 参数
    /// - operator: 操作员
    /// - token: ImportProducts 操作令牌
    /// - file_path: CSV 文件路径
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入结果（可能含行级跳过/失败）
    /// - Err(ApiError): 授权失败或文件级错误
    pub async fn import_products(
        &self,
        operator: &Operator,
        token: Option<&str>,
        file_path: impl AsRef<Path>,
    ) -> ApiResult<ImportApiResponse> {
        self.guard
            .verify_and_consume(operator, AdminAction::ImportProducts, token, false)?;

        let outcome = self
            .importer
            .import_from_csv(file_path.as_ref())
            .await
            .map_err(|e| {
                warn!(operator = %operator.name, error = %e, "导入被拒绝");
                ApiError::from(e)
            })?;

        info!(
            operator = %operator.name,
            batch_id = %outcome.batch_id,
            processed = outcome.summary.processed,
            "导入请求完成"
        );
        Ok(outcome.into())
    }

    /// 导入上传的文件内容
    pub async fn import_upload(
        &self,
        operator: &Operator,
        token: Option<&str>,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<ImportApiResponse> {
        self.guard
            .verify_and_consume(operator, AdminAction::ImportProducts, token, false)?;

        let outcome = self.importer.import_upload(file_name, bytes).await?;
        info!(
            operator = %operator.name,
            batch_id = %outcome.batch_id,
            processed = outcome.summary.processed,
            "上传导入完成"
        );
        Ok(outcome.into())
    }

    /// 删除全部产品（需确认）
    ///
    /// # 返回
    /// - deleted = false: 目录本为空
    pub fn delete_all_products(
        &self,
        operator: &Operator,
        token: Option<&str>,
        confirmed: bool,
    ) -> ApiResult<DeleteAllResponse> {
        self.guard
            .verify_and_consume(operator, AdminAction::DeleteAllProducts, token, confirmed)?;

        let deleted = self.store.delete_all()?;
        let message = if deleted {
            crate::i18n::t("catalog.all_deleted")
        } else {
            crate::i18n::t("catalog.nothing_to_delete")
        };
        info!(operator = %operator.name, deleted, "清空目录");
        Ok(DeleteAllResponse { deleted, message })
    }
}
