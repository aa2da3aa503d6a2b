use std::collections::BTreeMap;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::products::repo_types::{NewProduct, Product};

/// Persistence seam for the products table.
///
/// `update` and `delete` report whether a row with that id existed.
#[async_trait]
pub trait ProductRepo: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<Product>>;
    async fn get(&self, id: i64) -> anyhow::Result<Option<Product>>;
    async fn create(&self, product: &NewProduct) -> anyhow::Result<i64>;
    async fn update(&self, id: i64, product: &NewProduct) -> anyhow::Result<bool>;
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgProductRepo {
    db: PgPool,
}

impl PgProductRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductRepo for PgProductRepo {
    async fn list(&self) -> anyhow::Result<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, price::float8 AS price, stock
              FROM products
             ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list products")?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Product>> {
        let row = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, category, price::float8 AS price, stock
              FROM products
             WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("get product")?;
        Ok(row)
    }

    async fn create(&self, product: &NewProduct) -> anyhow::Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO products (name, category, price, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.db)
        .await
        .context("insert product")?;
        Ok(id)
    }

    async fn update(&self, id: i64, product: &NewProduct) -> anyhow::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products
               SET name = $1, category = $2, price = $3, stock = $4
             WHERE id = $5
            "#,
        )
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.price)
        .bind(product.stock)
        .bind(id)
        .execute(&self.db)
        .await
        .context("update product")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM products WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete product")?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Default)]
struct MemoryTable {
    rows: BTreeMap<i64, Product>,
    last_id: i64,
}

/// In-process products table. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryProductRepo {
    table: RwLock<MemoryTable>,
}

impl MemoryProductRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepo for MemoryProductRepo {
    async fn list(&self) -> anyhow::Result<Vec<Product>> {
        let table = self.table.read().await;
        Ok(table.rows.values().rev().cloned().collect())
    }

    async fn get(&self, id: i64) -> anyhow::Result<Option<Product>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, product: &NewProduct) -> anyhow::Result<i64> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(id, product.clone().with_id(id));
        Ok(id)
    }

    async fn update(&self, id: i64, product: &NewProduct) -> anyhow::Result<bool> {
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = product.clone().with_id(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}


#[cfg(test)]
mod pg_repo_tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db;

    async fn repo() -> Option<PgProductRepo> {
        let config = AppConfig::from_env().ok()?;
        config.database_url.as_ref()?;
        let pool = db::connect(&config).await.expect("connect to DATABASE_URL");
        db::migrate(&pool).await;
        Some(PgProductRepo::new(pool))
    }

    #[tokio::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn round_trips_through_postgres() {
        let Some(repo) = repo().await else {
            eprintln!("DATABASE_URL not set; skipping");
            return;
        };

        let pen = NewProduct {
            name: "Pen".into(),
            category: "Office".into(),
            price: 1.5,
            stock: 100,
        };
        let id = repo.create(&pen).await.expect("insert");
        assert_eq!(repo.get(id).await.expect("get"), Some(pen.clone().with_id(id)));

        let listed = repo.list().await.expect("list");
        assert_eq!(listed.first().map(|p| p.id), Some(id));

        let repriced = NewProduct {
            price: 0.25,
            stock: 0,
            ..pen
        };
        assert!(repo.update(id, &repriced).await.expect("update"));
        let got = repo.get(id).await.expect("get").expect("row");
        assert_eq!(got.price, 0.25);
        assert_eq!(got.stock, 0);

        assert!(repo.delete(id).await.expect("delete"));
        assert!(!repo.delete(id).await.expect("second delete"));
        assert!(!repo.update(id, &repriced).await.expect("update after delete"));
        assert_eq!(repo.get(id).await.expect("get"), None);
    }
}
