//! Repository for the `occurrences` table.

use sqlx::PgPool;
use steamshark_core::types::DbId;

use crate::models::occurrence::{NewOccurrence, Occurrence};

const COLUMNS: &str = "\
    id, website_id, description, url_reported, country_code, severity, status, \
    created_at, updated_at";

/// Provides insert and query operations for occurrences.
pub struct OccurrenceRepo;

impl OccurrenceRepo {
    /// Insert a new occurrence, returning the created row.
    ///
    /// Fails with a foreign key violation if the website does not exist.
    pub async fn create(pool: &PgPool, input: &NewOccurrence) -> Result<Occurrence, sqlx::Error> {
        let query = format!(
            "INSERT INTO occurrences
                (id, website_id, description, url_reported, country_code, severity, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Occurrence>(&query)
            .bind(input.id)
            .bind(input.website_id)
            .bind(&input.description)
            .bind(&input.url_reported)
            .bind(&input.country_code)
            .bind(&input.severity)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// List occurrences of a website, newest first.
    pub async fn list_by_website(
        pool: &PgPool,
        website_id: DbId,
    ) -> Result<Vec<Occurrence>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM occurrences WHERE website_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Occurrence>(&query)
            .bind(website_id)
            .fetch_all(pool)
            .await
    }

    /// Count occurrences referencing a website.
    pub async fn count_by_website(pool: &PgPool, website_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*)::BIGINT FROM occurrences WHERE website_id = $1",
        )
        .bind(website_id)
        .fetch_one(pool)
        .await
    }
}
