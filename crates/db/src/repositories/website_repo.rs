//! Repository for the `websites` table.

use sqlx::PgPool;
use steamshark_core::pagination::{Pagination, TrustFilter};
use steamshark_core::types::DbId;

use crate::models::website::{NewWebsite, Website, WebsiteFilter, WebsitePatch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, url, domain, ssl_certificate, display_name, tld, description, type, \
    is_not_trusted, is_official, steam_login_present, verified, risk_score, \
    risk_level, status, notes, created_at, updated_at";

/// Column list for INSERT (excludes `verified` and the timestamps).
const INSERT_COLUMNS: &str = "\
    id, url, domain, ssl_certificate, display_name, tld, description, type, \
    is_not_trusted, is_official, steam_login_present, risk_score, risk_level, \
    status, notes";

/// Provides CRUD operations for websites.
pub struct WebsiteRepo;

impl WebsiteRepo {
    /// Insert a website unless one with the same domain already exists.
    ///
    /// Returns `(was_existing, row)`. An existing row is returned untouched.
    /// Two concurrent calls for the same domain both resolve to the single
    /// row that won the unique constraint.
    pub async fn create_or_get(
        pool: &PgPool,
        input: &NewWebsite,
    ) -> Result<(bool, Website), sqlx::Error> {
        if let Some(existing) = Self::find_by_domain(pool, &input.domain).await? {
            return Ok((true, existing));
        }

        let query = format!(
            "INSERT INTO websites ({INSERT_COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
             ON CONFLICT (domain) DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Website>(&query)
            .bind(input.id)
            .bind(&input.url)
            .bind(&input.domain)
            .bind(input.ssl_certificate)
            .bind(&input.display_name)
            .bind(&input.tld)
            .bind(&input.description)
            .bind(&input.website_type)
            .bind(input.is_not_trusted)
            .bind(input.is_official)
            .bind(input.steam_login_present)
            .bind(input.risk_score)
            .bind(&input.risk_level)
            .bind(&input.status)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(row) => Ok((false, row)),
            None => {
                tracing::debug!(domain = %input.domain, "Lost insert race, returning existing website");
                Self::find_by_domain(pool, &input.domain)
                    .await?
                    .map(|row| (true, row))
                    .ok_or(sqlx::Error::RowNotFound)
            }
        }
    }

    /// Find a website by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Website>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM websites WHERE id = $1");
        sqlx::query_as::<_, Website>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a website by its exact domain.
    pub async fn find_by_domain(
        pool: &PgPool,
        domain: &str,
    ) -> Result<Option<Website>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM websites WHERE domain = $1");
        sqlx::query_as::<_, Website>(&query)
            .bind(domain)
            .fetch_optional(pool)
            .await
    }

    /// List one page of websites, most recently updated first.
    pub async fn list(
        pool: &PgPool,
        filter: &WebsiteFilter,
        page: Pagination,
    ) -> Result<Vec<Website>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_website_filter(filter);

        let query = format!(
            "SELECT {COLUMNS} FROM websites {where_clause} \
             ORDER BY updated_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let q = bind_website_values(sqlx::query_as::<_, Website>(&query), &bind_values);
        q.bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await
    }

    /// Count websites matching the filter across all pages.
    pub async fn count(pool: &PgPool, filter: &WebsiteFilter) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_website_filter(filter);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM websites {where_clause}");

        let q = bind_website_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }

    /// All websites matching the trust filter, unpaginated.
    pub async fn list_for_extension(
        pool: &PgPool,
        trust: TrustFilter,
    ) -> Result<Vec<Website>, sqlx::Error> {
        let filter = WebsiteFilter {
            trust,
            ..Default::default()
        };
        let (where_clause, bind_values, _) = build_website_filter(&filter);

        let query = format!(
            "SELECT {COLUMNS} FROM websites {where_clause} ORDER BY updated_at DESC, id DESC"
        );

        let q = bind_website_values(sqlx::query_as::<_, Website>(&query), &bind_values);
        q.fetch_all(pool).await
    }

    /// Update a website. Only non-`None` fields in `patch` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &WebsitePatch,
    ) -> Result<Option<Website>, sqlx::Error> {
        let query = format!(
            "UPDATE websites SET
                display_name = COALESCE($2, display_name),
                description = COALESCE($3, description),
                type = COALESCE($4, type),
                ssl_certificate = COALESCE($5, ssl_certificate),
                is_official = COALESCE($6, is_official),
                steam_login_present = COALESCE($7, steam_login_present),
                status = COALESCE($8, status),
                notes = COALESCE($9, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Website>(&query)
            .bind(id)
            .bind(&patch.display_name)
            .bind(&patch.description)
            .bind(&patch.website_type)
            .bind(patch.ssl_certificate)
            .bind(patch.is_official)
            .bind(patch.steam_login_present)
            .bind(&patch.status)
            .bind(&patch.notes)
            .fetch_optional(pool)
            .await
    }

    /// Mark a website as verified. Idempotent.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn verify(pool: &PgPool, id: DbId) -> Result<Option<Website>, sqlx::Error> {
        let query = format!("UPDATE websites SET verified = TRUE WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Website>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a website and, by cascade, its occurrences.
    ///
    /// Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM websites WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Dynamic filter helpers
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built website queries.
enum BindValue {
    Bool(bool),
    Text(String),
}

/// Build a WHERE clause and bind values from a `WebsiteFilter`.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
/// The `where_clause` is empty if no filters are active, or starts with `WHERE `.
fn build_website_filter(filter: &WebsiteFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let TrustFilter::Only(value) = filter.trust {
        conditions.push(format!("is_not_trusted = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Bool(value));
    }

    if let Some(domain) = non_empty(&filter.domain) {
        // strpos keeps `%` and `_` literal.
        conditions.push(format!("strpos(domain, ${bind_idx}) > 0"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(domain.to_string()));
    }

    if let Some(status) = non_empty(&filter.status) {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.to_string()));
    }

    if let Some(risk_level) = non_empty(&filter.risk_level) {
        conditions.push(format!("risk_level = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(risk_level.to_string()));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_website_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_website_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Bool(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
        }
    }
    q
}
