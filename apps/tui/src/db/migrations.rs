use color_eyre::eyre::eyre;
use color_eyre::Result;
use log::{debug, error, info};
use sqlx::{
    migrate::MigrateDatabase, query, query_scalar, sqlite::SqlitePoolOptions, Sqlite, SqlitePool,
};

use crate::db::fields::{create_table_sql, TABLE_NAME};

/// Creates the bodegas table if it doesn't exist
pub async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    query(&create_table_sql()).execute(pool).await?;
    Ok(())
}

/// Whether the bodegas table is present
pub async fn table_exists(pool: &SqlitePool) -> Result<bool, sqlx::Error> {
    let count: i64 =
        query_scalar("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(TABLE_NAME)
            .fetch_one(pool)
            .await?;
    Ok(count > 0)
}

/// Creates a connection pool for `database_url`, creating the database file
/// and the schema when missing.
pub async fn create_database_pool(database_url: &str) -> Result<SqlitePool> {
    info!("Initializing database with URL: {database_url}");

    let db_path = extract_db_path_from_url(database_url)?;
    debug!("Extracted database path: {db_path}");

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {}", parent.display());
            std::fs::create_dir_all(parent)
                .map_err(|e| eyre!("Failed to create database directory: {e}"))?;
        }
    }

    let db_exists = Sqlite::database_exists(database_url)
        .await
        .map_err(|e| eyre!("Error checking database: {e}"))?;

    if !db_exists {
        info!("Database does not exist, creating it now");
        Sqlite::create_database(database_url).await.map_err(|e| {
            error!("Failed to create database: {e}");
            eyre!("Failed to create SQLite database: {e}")
        })?;
    }

    // A single connection keeps every statement on the same session
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .after_connect(|conn, _| {
            Box::pin(async move {
                use sqlx::Executor as _;
                conn.execute("PRAGMA foreign_keys = ON;").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {e}");
            eyre!("Failed to connect to SQLite database: {e}")
        })?;

    setup_database(&pool)
        .await
        .map_err(|e| eyre!("Failed to set up database schema: {e}"))?;

    info!("Database initialization completed successfully");
    Ok(pool)
}

/// Creates a private in-memory database with the schema applied.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    setup_database(&pool).await?;
    Ok(pool)
}

/// Helper function to extract the database path from a SQLite URL
fn extract_db_path_from_url(url: &str) -> Result<String> {
    if !url.starts_with("sqlite://") {
        return Err(eyre!("Not a valid SQLite URL: {url}"));
    }

    let path_part = url.trim_start_matches("sqlite://");

    if cfg!(windows) {
        // Windows: sqlite:///C:/path or sqlite://C:/path
        if let Some(drive_idx) = path_part.find(':') {
            if drive_idx > 0 {
                let path = path_part
                    .strip_prefix('/')
                    .map_or_else(|| path_part.to_string(), std::string::ToString::to_string);

                return Ok(path);
            }
        }
    }

    // Unix-like absolute path: sqlite:///path
    if path_part.starts_with('/') {
        return Ok(format!("/{}", path_part.trim_start_matches('/')));
    }

    Ok(path_part.to_string())
}
