//! Occurrence entity model and create DTO.
//!
//! Occurrences are append-only. They are removed only by the cascade when the
//! owning website is deleted.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use steamshark_core::error::CoreError;
use steamshark_core::occurrence::{validate_occurrence, OccurrenceFields};
use steamshark_core::types::{DbId, Timestamp};

/// A row from the `occurrences` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Occurrence {
    pub id: DbId,
    pub website_id: DbId,
    pub description: Option<String>,
    pub url_reported: String,
    pub country_code: Option<String>,
    pub severity: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Report input as received on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOccurrence {
    pub description: Option<String>,
    pub url_reported: Option<String>,
    pub country_code: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
}

/// Validated insert row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOccurrence {
    pub id: DbId,
    pub website_id: DbId,
    pub description: Option<String>,
    pub url_reported: String,
    pub country_code: Option<String>,
    pub severity: String,
    pub status: String,
}

impl CreateOccurrence {
    pub fn normalize(&self, website_id: DbId) -> Result<NewOccurrence, CoreError> {
        let checked = validate_occurrence(OccurrenceFields {
            description: self.description.as_deref(),
            url_reported: self.url_reported.as_deref(),
            country_code: self.country_code.as_deref(),
            severity: self.severity.as_deref(),
            status: self.status.as_deref(),
        })?;

        Ok(NewOccurrence {
            id: DbId::new_v4(),
            website_id,
            description: checked.description,
            url_reported: checked.url_reported,
            country_code: checked.country_code,
            severity: checked.severity.as_str().to_string(),
            status: checked.status.as_str().to_string(),
        })
    }
}
