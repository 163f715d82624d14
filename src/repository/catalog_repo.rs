// ==========================================
// ERP 产品目录 - SQLite 目录仓储
// ==========================================
// 职责: 基于 rusqlite 实现 CatalogStore
// 红线: Repository 不含业务规则，只做数据 CRUD
// 并发: 单连接 + Mutex，写入逐条执行，不包整体事务
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::product::{ProductRecord, StoredProduct};
use crate::domain::types::ProductId;
use crate::repository::catalog_store::{validate_record, CatalogStore};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    product_id, title, location_id, product_line_id, part_number,
    description, quantity, unit_of_measure, net_price, created_at, updated_at
"#;

fn map_row(row: &Row<'_>) -> rusqlite::Result<StoredProduct> {
    Ok(StoredProduct {
        id: ProductId(row.get(0)?),
        title: row.get(1)?,
        record: ProductRecord {
            location_id: row.get(2)?,
            product_line_id: row.get(3)?,
            part_number: row.get(4)?,
            description: row.get(5)?,
            quantity: row.get(6)?,
            unit_of_measure: row.get(7)?,
            net_price: row.get(8)?,
        },
        created_at: row.get::<_, DateTime<Utc>>(9)?,
        updated_at: row.get::<_, DateTime<Utc>>(10)?,
    })
}

// ==========================================
// SqliteCatalogRepository
// ==========================================
pub struct SqliteCatalogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogRepository {
    /// 创建新的 Repository 实例（自动建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从共享连接创建
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        let repo = Self { conn };
        {
            let conn = repo.get_conn()?;
            ensure_schema(&conn)?;
        }
        Ok(repo)
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl CatalogStore for SqliteCatalogRepository {
    fn find_by_part_number(&self, part_number: &str) -> RepositoryResult<Option<StoredProduct>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM erp_product WHERE part_number = ?1 LIMIT 1",
            SELECT_COLUMNS
        );
        let found = conn.query_row(&sql, params![part_number], map_row).optional()?;
        Ok(found)
    }

    fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<StoredProduct>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM erp_product WHERE product_id = ?1", SELECT_COLUMNS);
        let found = conn.query_row(&sql, params![id.0], map_row).optional()?;
        Ok(found)
    }

    fn upsert(&self, record: &ProductRecord) -> RepositoryResult<ProductId> {
        validate_record(record)?;
        let conn = self.get_conn()?;
        let now = Utc::now();
        conn.execute(
            r#"
            INSERT INTO erp_product (
                title, location_id, product_line_id, part_number,
                description, quantity, unit_of_measure, net_price,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            ON CONFLICT(part_number) DO UPDATE SET
                title = excluded.title,
                location_id = excluded.location_id,
                product_line_id = excluded.product_line_id,
                description = excluded.description,
                quantity = excluded.quantity,
                unit_of_measure = excluded.unit_of_measure,
                net_price = excluded.net_price,
                updated_at = excluded.updated_at
            "#,
            params![
                record.part_number,
                record.location_id,
                record.product_line_id,
                record.part_number,
                record.description,
                record.quantity,
                record.unit_of_measure,
                record.net_price,
                now,
            ],
        )?;

        let id: i64 = conn.query_row(
            "SELECT product_id FROM erp_product WHERE part_number = ?1",
            params![record.part_number],
            |row| row.get(0),
        )?;
        Ok(ProductId(id))
    }

    fn update(&self, id: ProductId, record: &ProductRecord) -> RepositoryResult<()> {
        validate_record(record)?;
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE erp_product SET
                title = ?2,
                location_id = ?3,
                product_line_id = ?4,
                part_number = ?2,
                description = ?5,
                quantity = ?6,
                unit_of_measure = ?7,
                net_price = ?8,
                updated_at = ?9
            WHERE product_id = ?1
            "#,
            params![
                id.0,
                record.part_number,
                record.location_id,
                record.product_line_id,
                record.description,
                record.quantity,
                record.unit_of_measure,
                record.net_price,
                Utc::now(),
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ErpProduct".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn list_all(&self) -> RepositoryResult<Vec<StoredProduct>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM erp_product ORDER BY product_id DESC", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let products = stmt
            .query_map([], map_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(products)
    }

    fn delete(&self, id: ProductId) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM erp_product WHERE product_id = ?1", params![id.0])?;
        Ok(affected > 0)
    }

    fn delete_all(&self) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM erp_product", [])?;
        Ok(affected > 0)
    }

    fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM erp_product", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
