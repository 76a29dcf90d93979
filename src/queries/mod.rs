mod postgres_products;
mod product_repository;
mod sqlite_products;

pub use postgres_products::PgProductRepository;
pub use product_repository::ProductRepository;
pub use sqlite_products::SqliteProductRepository;
