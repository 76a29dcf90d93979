use async_trait::async_trait;

use crate::{
    error::Result,
    models::{NewProduct, Product},
};

/// Persistence gateway over the `products` table.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn sync_schema(&self) -> Result<()>;

    /// All products in storage order. An empty table yields an empty vec.
    async fn find_all(&self) -> Result<Vec<Product>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>>;

    /// Inserts `product` and returns the stored row with its assigned id and
    /// timestamps.
    async fn create(&self, product: &NewProduct) -> Result<Product>;

    /// Removes every product. Returns the number of rows deleted.
    async fn delete_all(&self) -> Result<u64>;

    async fn ping(&self) -> Result<()>;
}
