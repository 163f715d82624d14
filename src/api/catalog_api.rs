// ==========================================
// ERP 产品目录 - 目录 API
// ==========================================
// 职责: 目录浏览（视图会话）、管理列表、单条编辑/删除
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{AdminAction, AdminGuard, Operator};
use crate::config::CatalogConfigReader;
use crate::domain::product::{ProductEdit, StoredProduct};
use crate::domain::types::{ProductId, SortColumn, SortDirection};
use crate::engine::{format_net_price, sort_products, CatalogView, FilterState, SearchDebouncer};
use crate::importer::{DataCleaner, DataCleanerImpl};
use crate::repository::CatalogStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

// ==========================================
// AdminListRow - 管理列表行
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminListRow {
    pub id: ProductId,
    pub title: String,
    pub location_id: String,
    pub product_line_id: String,
    pub part_number: String,
    pub quantity: String,
    pub price_display: String,
}

/// 目录 API
pub struct CatalogApi {
    store: Arc<dyn CatalogStore>,
    config: Arc<dyn CatalogConfigReader>,
    guard: Arc<AdminGuard>,
}

impl CatalogApi {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        config: Arc<dyn CatalogConfigReader>,
        guard: Arc<AdminGuard>,
    ) -> Self {
        Self {
            store,
            config,
            guard,
        }
    }

    // ==========================================
    // 浏览
    // ==========================================

    /// 打开目录视图（默认每页条数来自配置）
    pub async fn open_catalog_view(&self) -> ApiResult<CatalogView> {
        let page_size = self.config.get_default_page_size().await?;
        let products = self.store.list_all()?;
        Ok(CatalogView::new(products, page_size))
    }

    /// 以给定过滤状态打开目录视图
    pub fn open_catalog_view_with(&self, state: FilterState) -> ApiResult<CatalogView> {
        let products = self.store.list_all()?;
        Ok(CatalogView::with_state(products, state))
    }

    /// 搜索输入去抖器（延迟来自配置）
    pub async fn new_search_debouncer(&self) -> ApiResult<SearchDebouncer> {
        let ms = self.config.get_search_debounce_ms().await?;
        Ok(SearchDebouncer::new(Duration::from_millis(ms)))
    }

    pub fn get_product(&self, id: ProductId) -> ApiResult<StoredProduct> {
        self.store
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("产品(id={})不存在", id)))
    }

    /// 管理列表（可选排序列，价格带货币符号）
    pub async fn list_admin_rows(
        &self,
        sort: Option<(SortColumn, SortDirection)>,
    ) -> ApiResult<Vec<AdminListRow>> {
        let symbol = self.config.get_currency_symbol().await?;
        let mut products = self.store.list_all()?;
        if let Some((column, direction)) = sort {
            sort_products(&mut products, column, direction);
        }

        Ok(products
            .into_iter()
            .map(|p| AdminListRow {
                id: p.id,
                price_display: format_net_price(&p.record.net_price, &symbol),
                title: p.title,
                location_id: p.record.location_id,
                product_line_id: p.record.product_line_id,
                part_number: p.record.part_number,
                quantity: p.record.quantity,
            })
            .collect())
    }

    // ==========================================
    // 管理操作
    // ==========================================

    /// 直接编辑单个产品（仅写入提交的字段）
    ///
    /// # 参数
    /// - operator: 操作员
    /// - token: EditProduct 操作令牌
    /// - id: 产品ID
    /// - edit: 提交的字段
    ///
    /// # 返回
    /// - Ok(StoredProduct): 更新后的产品
    /// - Err(InvalidInput): part_number 被清空
    /// - Err(BusinessRuleViolation): part_number 与其他产品冲突
    pub fn edit_product(
        &self,
        operator: &Operator,
        token: Option<&str>,
        id: ProductId,
        edit: ProductEdit,
    ) -> ApiResult<StoredProduct> {
        self.guard
            .verify_and_consume(operator, AdminAction::EditProduct, token, false)?;

        let existing = self.get_product(id)?;
        if edit.is_empty() {
            return Ok(existing);
        }

        let record = DataCleanerImpl.clean_record(edit.apply_to(&existing.record));
        if record.part_number.is_empty() {
            return Err(ApiError::InvalidInput("Part Number 不能为空".to_string()));
        }

        self.store.update(id, &record)?;
        info!(operator = %operator.name, product_id = %id, part_number = %record.part_number, "产品已编辑");
        self.get_product(id)
    }

    /// 删除单个产品
    ///
    /// # 返回
    /// - Ok(false): 产品不存在
    pub fn delete_product(
        &self,
        operator: &Operator,
        token: Option<&str>,
        id: ProductId,
    ) -> ApiResult<bool> {
        self.guard
            .verify_and_consume(operator, AdminAction::DeleteProduct, token, false)?;

        let deleted = self.store.delete(id)?;
        info!(operator = %operator.name, product_id = %id, deleted, "删除产品");
        Ok(deleted)
    }
}
