use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::{
    error::Result,
    models::{NewProduct, Product},
    queries::ProductRepository,
};

pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn sync_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                price REAL NOT NULL,
                weight REAL NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, weight, created_at, updated_at FROM products",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, weight, created_at, updated_at FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn create(&self, product: &NewProduct) -> Result<Product> {
        let now = Utc::now();

        let created = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, weight, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id, name, price, weight, created_at, updated_at
            "#,
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.weight)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::DatabaseConfig, database};

    async fn repository() -> SqliteProductRepository {
        let pool = database::create_sqlite_pool(&DatabaseConfig::sqlite(":memory:", 5))
            .await
            .unwrap();
        let repo = SqliteProductRepository::new(pool);
        repo.sync_schema().await.unwrap();
        repo
    }

    fn new_product(name: &str, price: f64, weight: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            weight,
        }
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let repo = repository().await;
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_assigns_distinct_ids() {
        let repo = repository().await;
        let first = repo.create(&new_product("mug", 8.0, 0.3)).await.unwrap();
        let second = repo.create(&new_product("mug", 8.0, 0.3)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.name, "mug");
        assert_eq!(first.price, 8.0);
        assert_eq!(first.weight, 0.3);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn find_by_id_round_trips_and_reports_absence() {
        let repo = repository().await;
        let created = repo.create(&new_product("bottle", 15.0, 0.2)).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Some(created.clone()));
        assert_eq!(repo.find_by_id(created.id + 100).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_all_is_idempotent() {
        let repo = repository().await;
        repo.create(&new_product("a", 1.0, 1.0)).await.unwrap();
        repo.create(&new_product("b", 2.0, 2.0)).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert_eq!(repo.delete_all().await.unwrap(), 0);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sync_schema_twice_is_harmless() {
        let repo = repository().await;
        repo.sync_schema().await.unwrap();
        repo.ping().await.unwrap();
    }
}
