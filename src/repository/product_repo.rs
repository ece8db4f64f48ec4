// ==========================================
// 商品仓储
// ==========================================
// 红线: Repository 不含业务逻辑（选品排序、跳过判定在引擎层）
// 约束: 所有查询使用参数化
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::product::meta_keys;
use crate::domain::{Product, ProductStatus, ProductUpdate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ProductQuery - 仓储查询条件
// ==========================================
// 空集合 = 不按该维度过滤
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub category_ids: Vec<i64>,
    pub product_ids: Vec<i64>,
    pub statuses: Vec<ProductStatus>,
}

// ==========================================
// ProductRepository Trait
// ==========================================
// 用途: 导出/导入共用的商品目录接口
// 实现者: ProductRepositoryImpl（SQLite）
pub trait ProductRepository: Send + Sync {
    /// 按条件查询商品（顺序由调用方决定，仓储不保证）
    fn query_products(&self, query: &ProductQuery) -> RepositoryResult<Vec<Product>>;

    /// 按 ID 读取商品（含图片、分类、元数据）
    fn find_by_id(&self, product_id: i64) -> RepositoryResult<Option<Product>>;

    /// 按 SKU 查找商品 ID
    fn find_id_by_sku(&self, sku: &str) -> RepositoryResult<Option<i64>>;

    /// 读取单个元数据
    fn get_meta(&self, product_id: i64, key: &str) -> RepositoryResult<Option<String>>;

    /// 在一个事务内写入标量字段与元数据
    fn apply_update(&self, update: &ProductUpdate) -> RepositoryResult<()>;
}

// ==========================================
// ProductRepositoryImpl - SQLite 实现
// ==========================================
pub struct ProductRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ProductRepositoryImpl {
    /// 创建新的仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入/覆盖完整商品（种子数据、测试夹具）
    ///
    /// 引擎本身从不创建商品，这里只服务于目录初始化。
    pub fn upsert_product(&self, product: &Product) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            r#"
            INSERT OR REPLACE INTO product (
                product_id, sku, name, description, status,
                regular_price, sale_price, stock_quantity,
                weight, length, width, height, image_url,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            params![
                product.id,
                product.sku,
                product.name,
                product.description,
                product.status.as_str(),
                product.regular_price,
                product.sale_price,
                product.stock_quantity,
                product.weight,
                product.length,
                product.width,
                product.height,
                product.image_url,
                product.created_at.to_rfc3339(),
                Utc::now().to_rfc3339(),
            ],
        )?;

        tx.execute(
            "DELETE FROM product_gallery WHERE product_id = ?1",
            params![product.id],
        )?;
        for (position, url) in product.gallery_urls.iter().enumerate() {
            tx.execute(
                "INSERT INTO product_gallery (product_id, position, image_url) VALUES (?1, ?2, ?3)",
                params![product.id, position as i64, url],
            )?;
        }

        tx.execute(
            "DELETE FROM product_category WHERE product_id = ?1",
            params![product.id],
        )?;
        for category_id in &product.category_ids {
            tx.execute(
                "INSERT OR IGNORE INTO product_category (product_id, category_id) VALUES (?1, ?2)",
                params![product.id, category_id],
            )?;
        }

        let meta = [
            (meta_keys::BRAND, &product.brand),
            (meta_keys::SALE_PRICE_DATES_FROM, &product.sale_from),
            (meta_keys::SALE_PRICE_DATES_TO, &product.sale_to),
            (meta_keys::TOKOPEDIA_MARKER, &product.tokopedia_marker),
            (meta_keys::BLIBLI_MARKER, &product.blibli_marker),
            (meta_keys::TOKOPEDIA_PRICE, &product.tokopedia_price),
            (meta_keys::BLIBLI_PRICE, &product.blibli_price),
        ];
        for (key, value) in meta {
            match value {
                Some(v) => upsert_meta(&tx, product.id, key, v)?,
                None => {
                    tx.execute(
                        "DELETE FROM product_meta WHERE product_id = ?1 AND meta_key = ?2",
                        params![product.id, key],
                    )?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }

    fn load_product(&self, conn: &Connection, product_id: i64) -> RepositoryResult<Option<Product>> {
        let base = conn
            .query_row(
                r#"
                SELECT
                    product_id, sku, name, description, status,
                    regular_price, sale_price, stock_quantity,
                    weight, length, width, height, image_url, created_at
                FROM product
                WHERE product_id = ?1
                "#,
                params![product_id],
                map_product_row,
            )
            .optional()?;

        let Some(mut product) = base else {
            return Ok(None);
        };

        let mut stmt = conn.prepare(
            "SELECT image_url FROM product_gallery WHERE product_id = ?1 ORDER BY position",
        )?;
        product.gallery_urls = stmt
            .query_map(params![product_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            "SELECT category_id FROM product_category WHERE product_id = ?1 ORDER BY category_id",
        )?;
        product.category_ids = stmt
            .query_map(params![product_id], |row| row.get::<_, i64>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt =
            conn.prepare("SELECT meta_key, meta_value FROM product_meta WHERE product_id = ?1")?;
        let meta: HashMap<String, String> = stmt
            .query_map(params![product_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<Result<HashMap<_, _>, _>>()?;

        let take = |key: &str| meta.get(key).cloned();
        product.brand = take(meta_keys::BRAND);
        product.sale_from = take(meta_keys::SALE_PRICE_DATES_FROM);
        product.sale_to = take(meta_keys::SALE_PRICE_DATES_TO);
        product.tokopedia_marker = take(meta_keys::TOKOPEDIA_MARKER);
        product.blibli_marker = take(meta_keys::BLIBLI_MARKER);
        product.tokopedia_price = take(meta_keys::TOKOPEDIA_PRICE);
        product.blibli_price = take(meta_keys::BLIBLI_PRICE);

        Ok(Some(product))
    }
}

impl ProductRepository for ProductRepositoryImpl {
    fn query_products(&self, query: &ProductQuery) -> RepositoryResult<Vec<Product>> {
        let conn = self.get_conn()?;

        let mut sql = String::from("SELECT p.product_id FROM product p WHERE 1 = 1");
        let mut values: Vec<Value> = Vec::new();

        if !query.statuses.is_empty() {
            sql.push_str(&format!(
                " AND p.status IN ({})",
                placeholders(values.len(), query.statuses.len())
            ));
            values.extend(
                query
                    .statuses
                    .iter()
                    .map(|s| Value::Text(s.as_str().to_string())),
            );
        }

        if !query.category_ids.is_empty() {
            sql.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM product_category pc \
                 WHERE pc.product_id = p.product_id AND pc.category_id IN ({}))",
                placeholders(values.len(), query.category_ids.len())
            ));
            values.extend(query.category_ids.iter().map(|id| Value::Integer(*id)));
        }

        if !query.product_ids.is_empty() {
            sql.push_str(&format!(
                " AND p.product_id IN ({})",
                placeholders(values.len(), query.product_ids.len())
            ));
            values.extend(query.product_ids.iter().map(|id| Value::Integer(*id)));
        }

        sql.push_str(" ORDER BY p.created_at DESC, p.product_id DESC");

        let ids: Vec<i64> = {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(values.iter()), |row| row.get(0))?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        let mut products = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(product) = self.load_product(&conn, id)? {
                products.push(product);
            }
        }
        Ok(products)
    }

    fn find_by_id(&self, product_id: i64) -> RepositoryResult<Option<Product>> {
        let conn = self.get_conn()?;
        self.load_product(&conn, product_id)
    }

    fn find_id_by_sku(&self, sku: &str) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        let id = conn
            .query_row(
                "SELECT product_id FROM product WHERE sku = ?1",
                params![sku],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    fn get_meta(&self, product_id: i64, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT meta_value FROM product_meta WHERE product_id = ?1 AND meta_key = ?2",
                params![product_id, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn apply_update(&self, update: &ProductUpdate) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;
        let id = update.product_id;
        let changes = &update.changes;

        let touched = tx.execute(
            "UPDATE product SET updated_at = ?2 WHERE product_id = ?1",
            params![id, Utc::now().to_rfc3339()],
        )?;
        if touched == 0 {
            return Err(RepositoryError::NotFound {
                entity: "product".to_string(),
                id: id.to_string(),
            });
        }

        if let Some(stock) = changes.stock_quantity {
            if stock < 0 {
                return Err(RepositoryError::FieldValueError {
                    field: "stock_quantity".to_string(),
                    message: format!("库存不能为负数: {}", stock),
                });
            }
            tx.execute(
                "UPDATE product SET stock_quantity = ?2 WHERE product_id = ?1",
                params![id, stock],
            )?;
        }

        if let Some(weight) = changes.weight {
            tx.execute(
                "UPDATE product SET weight = ?2 WHERE product_id = ?1",
                params![id, weight],
            )?;
        }

        if let Some(sku) = &changes.sku {
            tx.execute(
                "UPDATE product SET sku = ?2 WHERE product_id = ?1",
                params![id, sku],
            )?;
        }

        for (key, value) in &changes.meta {
            upsert_meta(&tx, id, key, value)?;
        }

        tx.commit()?;
        Ok(())
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 生成 `?N, ?N+1, ...` 占位符（offset 为已占用参数个数）
fn placeholders(offset: usize, count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", offset + i))
        .collect::<Vec<_>>()
        .join(", ")
}

fn upsert_meta(conn: &Connection, product_id: i64, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        r#"
        INSERT INTO product_meta (product_id, meta_key, meta_value)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(product_id, meta_key) DO UPDATE SET meta_value = excluded.meta_value
        "#,
        params![product_id, key, value],
    )?;
    Ok(())
}

fn map_product_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    let status = row
        .get::<_, String>(4)?
        .parse::<ProductStatus>()
        .map_err(|e| conversion_error(4, e))?;
    let created_at = row
        .get::<_, String>(13)?
        .parse::<DateTime<Utc>>()
        .map_err(|e| conversion_error(13, e.to_string()))?;

    let mut product = Product::new(row.get(0)?, row.get::<_, String>(2)?, created_at);
    product.sku = row.get(1)?;
    product.description = row.get(3)?;
    product.status = status;
    product.regular_price = row.get(5)?;
    product.sale_price = row.get(6)?;
    product.stock_quantity = row.get(7)?;
    product.weight = row.get(8)?;
    product.length = row.get(9)?;
    product.width = row.get(10)?;
    product.height = row.get(11)?;
    product.image_url = row.get(12)?;
    Ok(product)
}

/// 存量数据无法解析（状态/时间格式）时拒绝读取，不静默替换
fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, message.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    fn repo_with_row(status: &str, created_at: &str) -> ProductRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn.execute(
            r#"
            INSERT INTO product (product_id, sku, name, description, status, created_at, updated_at)
            VALUES (1, 'S1', 'Bag', '', ?1, ?2, ?2)
            "#,
            params![status, created_at],
        )
        .unwrap();
        ProductRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_valid_row_loads() {
        let repo = repo_with_row("publish", "2026-01-01T08:00:00+00:00");
        let product = repo.find_by_id(1).unwrap().unwrap();
        assert_eq!(product.status, ProductStatus::Publish);
        assert_eq!(product.created_at.to_rfc3339(), "2026-01-01T08:00:00+00:00");
    }

    #[test]
    fn test_bad_created_at_is_rejected() {
        let repo = repo_with_row("publish", "yesterday");
        assert!(repo.find_by_id(1).is_err());
        assert!(repo.query_products(&ProductQuery::default()).is_err());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let repo = repo_with_row("archived", "2026-01-01T08:00:00+00:00");
        assert!(repo.find_by_id(1).is_err());
    }

    #[test]
    fn test_placeholders_offset() {
        assert_eq!(placeholders(0, 3), "?1, ?2, ?3");
        assert_eq!(placeholders(2, 2), "?3, ?4");
    }
}
