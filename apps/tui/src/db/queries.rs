use log::info;
use sqlx::{query, query_as, query_scalar, SqlitePool};

use crate::db::fields::{column_list, FIELDS, TABLE_NAME};
use crate::db::migrations::{create_database_pool, create_memory_pool};
use crate::db::models::{BodegaError, BodegaRecord, FieldMap, NewBodega};

/// CRUD access to the bodegas table.
#[derive(Debug, Clone)]
pub struct BodegaManager {
    pool: SqlitePool,
}

impl BodegaManager {
    /// Opens (and if needed creates) the database at `database_url`.
    pub async fn connect(database_url: &str) -> color_eyre::Result<Self> {
        let pool = create_database_pool(database_url).await?;
        Ok(Self { pool })
    }

    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let pool = create_memory_pool().await?;
        Ok(Self { pool })
    }

    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Coerces `data` to the declared column types and inserts it.
    ///
    /// Returns the generated id.
    pub async fn add(&self, data: &FieldMap) -> Result<i64, BodegaError> {
        let bodega = NewBodega::try_from(data)?;
        self.add_record(&bodega).await
    }

    pub async fn add_record(&self, bodega: &NewBodega) -> Result<i64, BodegaError> {
        let placeholders = vec!["?"; FIELDS.len()].join(", ");
        let sql = format!(
            "INSERT INTO {TABLE_NAME} ({}) VALUES ({placeholders})",
            column_list()
        );

        let result = query(&sql)
            .bind(&bodega.name)
            .bind(bodega.cp)
            .bind(&bodega.town)
            .bind(&bodega.street)
            .bind(bodega.number)
            .bind(&bodega.comp)
            .bind(bodega.lat)
            .bind(bodega.lon)
            .bind(&bodega.website)
            .bind(&bodega.do_name)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        info!("Inserted bodega {:?} with id {id}", bodega.name);
        Ok(id)
    }

    /// Retrieves a single bodega, `None` when no row has this id
    pub async fn get(&self, id: i64) -> Result<Option<BodegaRecord>, sqlx::Error> {
        query_as::<_, BodegaRecord>(&format!(
            "SELECT id, {} FROM {TABLE_NAME} WHERE id = ?",
            column_list()
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Retrieves every bodega in storage order
    pub async fn get_all(&self) -> Result<Vec<BodegaRecord>, sqlx::Error> {
        query_as::<_, BodegaRecord>(&format!(
            "SELECT id, {} FROM {TABLE_NAME} ORDER BY id",
            column_list()
        ))
        .fetch_all(&self.pool)
        .await
    }

    /// Deletes a bodega; returns whether a row was removed.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = query(&format!("DELETE FROM {TABLE_NAME} WHERE id = ?"))
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!("Deleted bodega {id}");
        }
        Ok(removed)
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        query_scalar(&format!("SELECT COUNT(*) FROM {TABLE_NAME}"))
            .fetch_one(&self.pool)
            .await
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
