// ==========================================
// ERP 产品目录 - Catalog Store Trait
// ==========================================
// 职责: 定义目录存储的外部协作接口（不包含实现）
// 红线: Repository 不含业务规则，只做按 part_number 的 CRUD
// 一致性: 同一请求内读己之写（read-your-writes）
// ==========================================

use crate::domain::product::{ProductRecord, StoredProduct};
use crate::domain::types::ProductId;
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// CatalogStore Trait
// ==========================================
// 实现者: SqliteCatalogRepository, MemoryCatalogStore
pub trait CatalogStore: Send + Sync {
    /// 按 part_number 查找
    fn find_by_part_number(&self, part_number: &str) -> RepositoryResult<Option<StoredProduct>>;

    /// 按 id 查找
    fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<StoredProduct>>;

    /// 按 part_number 插入或整行覆盖
    ///
    /// # 返回
    /// - Ok(ProductId): 新建或被更新记录的 id
    ///
    /// # 说明
    /// - title 始终等于 part_number
    /// - 已存在时 7 个字段全部覆盖（空值也覆盖），created_at 保持不变
    fn upsert(&self, record: &ProductRecord) -> RepositoryResult<ProductId>;

    /// 按 id 覆盖记录（直接编辑）
    ///
    /// # 错误
    /// - NotFound: id 不存在
    /// - UniqueConstraintViolation: 新 part_number 已被其他记录占用
    fn update(&self, id: ProductId, record: &ProductRecord) -> RepositoryResult<()>;

    /// 列出全部记录（按 id 降序，最新创建的在前）
    fn list_all(&self) -> RepositoryResult<Vec<StoredProduct>>;

    /// 删除单条记录（强制删除，无回收站）
    ///
    /// # 返回
    /// - Ok(true): 已删除
    /// - Ok(false): 记录不存在
    fn delete(&self, id: ProductId) -> RepositoryResult<bool>;

    /// 删除全部记录
    ///
    /// # 返回
    /// - Ok(true): 至少删除了一条
    /// - Ok(false): 本来就为空
    fn delete_all(&self) -> RepositoryResult<bool>;

    /// 记录总数
    fn count(&self) -> RepositoryResult<usize>;
}

/// 写入前校验：part_number 不能为空
pub fn validate_record(record: &ProductRecord) -> RepositoryResult<()> {
    if record.part_number.trim().is_empty() {
        return Err(RepositoryError::ValidationError(
            "part_number 不能为空".to_string(),
        ));
    }
    Ok(())
}

// ==========================================
// 存储契约测试（各实现共用）
// ==========================================
#[cfg(test)]
pub(crate) mod contract_tests {
    use super::*;

    pub fn record(part_number: &str, location: &str) -> ProductRecord {
        ProductRecord {
            location_id: location.to_string(),
            product_line_id: "PL2".to_string(),
            part_number: part_number.to_string(),
            description: "Widget".to_string(),
            quantity: "5".to_string(),
            unit_of_measure: "EA".to_string(),
            net_price: "12.50".to_string(),
        }
    }

    pub fn upsert_creates_then_overwrites(store: &dyn CatalogStore) {
        let id = store.upsert(&record("PN-100", "L1")).unwrap();
        let found = store.find_by_part_number("PN-100").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.title, "PN-100");
        assert_eq!(found.record, record("PN-100", "L1"));

        // 覆盖：空值也要写入
        let mut changed = record("PN-100", "L9");
        changed.description = String::new();
        let id2 = store.upsert(&changed).unwrap();
        assert_eq!(id, id2);

        let found = store.find_by_id(id).unwrap().unwrap();
        assert_eq!(found.record.location_id, "L9");
        assert_eq!(found.record.description, "");
        assert_eq!(store.count().unwrap(), 1);
    }

    pub fn list_all_newest_first(store: &dyn CatalogStore) {
        store.upsert(&record("B", "L1")).unwrap();
        store.upsert(&record("A", "L1")).unwrap();
        store.upsert(&record("C", "L1")).unwrap();
        // 更新不改变位置
        store.upsert(&record("B", "L2")).unwrap();

        let parts: Vec<String> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|p| p.record.part_number)
            .collect();
        assert_eq!(parts, vec!["C", "A", "B"]);
    }

    pub fn delete_all_reports_whether_anything_removed(store: &dyn CatalogStore) {
        assert!(!store.delete_all().unwrap());
        store.upsert(&record("PN-1", "L1")).unwrap();
        store.upsert(&record("PN-2", "L1")).unwrap();
        assert!(store.delete_all().unwrap());
        assert!(store.list_all().unwrap().is_empty());
        assert!(!store.delete_all().unwrap());
    }

    pub fn delete_single(store: &dyn CatalogStore) {
        let id = store.upsert(&record("PN-1", "L1")).unwrap();
        store.upsert(&record("PN-2", "L1")).unwrap();
        assert!(store.delete(id).unwrap());
        assert!(!store.delete(id).unwrap());
        assert!(store.find_by_part_number("PN-1").unwrap().is_none());
        assert_eq!(store.count().unwrap(), 1);
    }

    pub fn update_enforces_unique_part_number(store: &dyn CatalogStore) {
        let a = store.upsert(&record("PN-A", "L1")).unwrap();
        store.upsert(&record("PN-B", "L1")).unwrap();

        // 改名后 title 跟随
        store.update(a, &record("PN-A2", "L3")).unwrap();
        let found = store.find_by_id(a).unwrap().unwrap();
        assert_eq!(found.title, "PN-A2");
        assert!(store.find_by_part_number("PN-A").unwrap().is_none());

        let err = store.update(a, &record("PN-B", "L1")).unwrap_err();
        assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));

        let err = store.update(ProductId(9_999), &record("PN-Z", "L1")).unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    pub fn rejects_blank_part_number(store: &dyn CatalogStore) {
        let err = store.upsert(&record("  ", "L1")).unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError(_)));

        let id = store.upsert(&record("PN-1", "L1")).unwrap();
        let err = store.update(id, &record("", "L1")).unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError(_)));
        assert_eq!(store.count().unwrap(), 1);
    }
}
