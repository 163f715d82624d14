// ==========================================
// ERP 产品目录 - 内存目录存储
// ==========================================
// 职责: CatalogStore 的进程内实现（测试与离线预览使用）
// 索引: part_number -> ProductId 唯一索引，与 SQLite UNIQUE 约束语义一致
// ==========================================

use crate::domain::product::{ProductRecord, StoredProduct};
use crate::domain::types::ProductId;
use crate::repository::catalog_store::{validate_record, CatalogStore};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MemoryInner {
    next_id: i64,
    products: BTreeMap<ProductId, StoredProduct>,
    by_part_number: HashMap<String, ProductId>,
}

#[derive(Default)]
pub struct MemoryCatalogStore {
    inner: Mutex<MemoryInner>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn find_by_part_number(&self, part_number: &str) -> RepositoryResult<Option<StoredProduct>> {
        let inner = self.lock()?;
        Ok(inner
            .by_part_number
            .get(part_number)
            .and_then(|id| inner.products.get(id))
            .cloned())
    }

    fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<StoredProduct>> {
        Ok(self.lock()?.products.get(&id).cloned())
    }

    fn upsert(&self, record: &ProductRecord) -> RepositoryResult<ProductId> {
        validate_record(record)?;
        let mut inner = self.lock()?;
        let now = Utc::now();

        if let Some(id) = inner.by_part_number.get(&record.part_number).copied() {
            if let Some(existing) = inner.products.get_mut(&id) {
                existing.title = record.title().to_string();
                existing.record = record.clone();
                existing.updated_at = now;
                return Ok(id);
            }
        }

        inner.next_id += 1;
        let id = ProductId(inner.next_id);
        inner.products.insert(
            id,
            StoredProduct {
                id,
                title: record.title().to_string(),
                record: record.clone(),
                created_at: now,
                updated_at: now,
            },
        );
        inner.by_part_number.insert(record.part_number.clone(), id);
        Ok(id)
    }

    fn update(&self, id: ProductId, record: &ProductRecord) -> RepositoryResult<()> {
        validate_record(record)?;
        let mut inner = self.lock()?;

        let old_part_number = match inner.products.get(&id) {
            Some(existing) => existing.record.part_number.clone(),
            None => {
                return Err(RepositoryError::NotFound {
                    entity: "ErpProduct".to_string(),
                    id: id.to_string(),
                })
            }
        };

        if let Some(owner) = inner.by_part_number.get(&record.part_number) {
            if *owner != id {
                return Err(RepositoryError::UniqueConstraintViolation(format!(
                    "erp_product.part_number = {}",
                    record.part_number
                )));
            }
        }

        inner.by_part_number.remove(&old_part_number);
        inner.by_part_number.insert(record.part_number.clone(), id);
        if let Some(existing) = inner.products.get_mut(&id) {
            existing.title = record.title().to_string();
            existing.record = record.clone();
            existing.updated_at = Utc::now();
        }
        Ok(())
    }

    fn list_all(&self) -> RepositoryResult<Vec<StoredProduct>> {
        Ok(self.lock()?.products.values().rev().cloned().collect())
    }

    fn delete(&self, id: ProductId) -> RepositoryResult<bool> {
        let mut inner = self.lock()?;
        match inner.products.remove(&id) {
            Some(removed) => {
                inner.by_part_number.remove(&removed.record.part_number);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_all(&self) -> RepositoryResult<bool> {
        let mut inner = self.lock()?;
        let had_any = !inner.products.is_empty();
        inner.products.clear();
        inner.by_part_number.clear();
        Ok(had_any)
    }

    fn count(&self) -> RepositoryResult<usize> {
        Ok(self.lock()?.products.len())
    }
}
