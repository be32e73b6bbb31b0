pub mod queries;

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

pub async fn establish_connection(path: &Path) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePool::connect_with(options).await
}

/// A private database living as long as the returned pool. Every connection to
/// `sqlite::memory:` opens a fresh database, so the pool is pinned to a single
/// connection that is never recycled.
pub async fn establish_in_memory() -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_names_are_taken_literally() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia?mode=ro#1.db");

        let pool = establish_connection(&path).await.unwrap();
        run_migrations(&pool).await.unwrap();
        queries::categories::create_category(&pool, "Science")
            .await
            .unwrap();
        pool.close().await;

        assert!(path.is_file());
        let reopened = establish_connection(&path).await.unwrap();
        let categories = queries::categories::get_all_categories(&reopened)
            .await
            .unwrap();
        assert_eq!(categories.len(), 1);
    }
}
