//! Database connection pool management

mod postgres;

pub use postgres::create_pool;
pub use sqlx::PgPool;
