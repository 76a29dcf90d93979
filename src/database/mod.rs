mod connection;

pub use connection::{check_health, connect, create_pg_pool, create_sqlite_pool};
