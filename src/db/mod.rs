pub mod memory;
pub mod sqlite;

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{Course, CourseDraft};

pub use memory::InMemoryCourseStore;
pub use sqlite::SqliteCourseStore;

/// Storage capability behind [`crate::repository::CourseRepository`].
///
/// Implementations map rows to [`Course`] and nothing more; timestamps and
/// not-found handling belong to the repository.
#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn ping(&self) -> Result<(), AppError>;
    async fn fetch_all(&self) -> Result<Vec<Course>, AppError>;
    async fn fetch_by_id(&self, id: i64) -> Result<Option<Course>, AppError>;
    async fn insert(&self, draft: CourseDraft) -> Result<Course, AppError>;
    /// Writes the mutable columns of `course`. Returns `false` when the row
    /// no longer exists.
    async fn save(&self, course: &Course) -> Result<bool, AppError>;
    async fn remove(&self, id: i64) -> Result<Option<Course>, AppError>;
}

/// Opens the pool described by `config` and applies the embedded migrations.
///
/// An in-memory database lives only as long as its connection, so such URLs
/// get a single connection that is never recycled.
pub async fn connect(config: &AppConfig) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(max_connections(config));
    if is_in_memory(&config.database_url) {
        pool_options = pool_options
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>);
    }
    let pool = pool_options.connect_with(options).await?;

    migrate(&pool).await?;
    info!("connected to {}", config.database_url);
    Ok(pool)
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn max_connections(config: &AppConfig) -> u32 {
    if is_in_memory(&config.database_url) {
        1
    } else {
        config.max_connections
    }
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
