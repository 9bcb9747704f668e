//! Repository layer for database operations.

use std::str::FromStr;

use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::QueryBuilder;

use crate::domain::{Incident, NewIncident};
use crate::error::IncidentResult;
use crate::storage::models::IncidentRow;

/// Repository for all incident database operations.
///
/// Cloning is cheap: clones share the same connection pool.
#[derive(Clone)]
pub struct IncidentRepository {
    pool: SqlitePool,
}

impl IncidentRepository {
    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl IncidentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a pool for `url`, creating the database file if it is missing.
    ///
    /// In-memory databases live only as long as their connection, so they get
    /// a single connection that is never recycled.
    pub async fn connect(url: &str) -> IncidentResult<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await?;
        Ok(Self::new(pool))
    }

    /// Create the schema and seed the sample incidents into an empty table.
    ///
    /// Safe to call repeatedly: the seed only runs when the table has no rows.
    pub async fn initialize(&self) -> IncidentResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS incidents (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL CHECK (length(title) > 0),
                description TEXT NOT NULL CHECK (length(description) > 0),
                severity TEXT NOT NULL CHECK (severity IN ('Low', 'Medium', 'High'))
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        let mut tx = self.pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM incidents")
            .fetch_one(&mut *tx)
            .await?;

        if existing == 0 {
            let samples = NewIncident::samples();
            let mut insert = QueryBuilder::<Sqlite>::new(
                "INSERT INTO incidents (title, description, severity) ",
            );
            insert.push_values(&samples, |mut row, sample| {
                row.push_bind(sample.title.as_str())
                    .push_bind(sample.description.as_str())
                    .push_bind(sample.severity.as_str());
            });
            insert.build().execute(&mut *tx).await?;

            tracing::info!(count = samples.len(), "Seeded empty incident store");
        }

        tx.commit().await?;

        Ok(())
    }

    /// Check that the database answers queries.
    pub async fn ping(&self) -> IncidentResult<()> {
        sqlx::query("SELECT 1").execute(self.pool()).await?;
        Ok(())
    }

    // ==================== Incidents ====================

    /// Insert an incident and return it with its assigned id.
    pub async fn create(&self, incident: &NewIncident) -> IncidentResult<Incident> {
        let row: IncidentRow = sqlx::query_as(
            r#"
            INSERT INTO incidents (title, description, severity)
            VALUES (?, ?, ?)
            RETURNING id, title, description, severity
            "#,
        )
        .bind(&incident.title)
        .bind(&incident.description)
        .bind(incident.severity.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    /// List every incident in insertion order.
    pub async fn list_all(&self) -> IncidentResult<Vec<Incident>> {
        let rows: Vec<IncidentRow> =
            sqlx::query_as("SELECT id, title, description, severity FROM incidents ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(Incident::try_from).collect()
    }

    /// Get an incident by ID, or `None` if no such incident exists.
    pub async fn get_by_id(&self, id: i64) -> IncidentResult<Option<Incident>> {
        let row: Option<IncidentRow> =
            sqlx::query_as("SELECT id, title, description, severity FROM incidents WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(Incident::try_from).transpose()
    }

    /// Delete an incident. Returns `false` if there was nothing to delete.
    pub async fn delete_by_id(&self, id: i64) -> IncidentResult<bool> {
        let result = sqlx::query("DELETE FROM incidents WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
