//! Website entity model, input DTOs and outbound shapes.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use steamshark_core::error::CoreError;
use steamshark_core::pagination::TrustFilter;
use steamshark_core::risk::classify;
use steamshark_core::types::{DbId, Timestamp};
use steamshark_core::website::{non_blank, validate_creation, validate_update, CreationFields};

use crate::models::occurrence::Occurrence;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `websites` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Website {
    pub id: DbId,
    pub url: Option<String>,
    pub domain: String,
    pub ssl_certificate: bool,
    pub display_name: Option<String>,
    pub tld: Option<String>,
    pub description: Option<String>,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub website_type: String,
    pub is_not_trusted: bool,
    pub is_official: bool,
    pub steam_login_present: bool,
    pub verified: bool,
    pub risk_score: f64,
    pub risk_level: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Creation input as received on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWebsite {
    /// Assigned on insert when absent.
    pub id: Option<DbId>,
    pub url: Option<String>,
    #[serde(default)]
    pub domain: String,
    /// Accepted for compatibility but always recomputed from `url`.
    pub ssl_certificate: Option<bool>,
    pub display_name: Option<String>,
    pub tld: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub website_type: Option<String>,
    pub is_official: Option<bool>,
    pub steam_login_present: Option<bool>,
    pub risk_score: Option<f64>,
    /// Checked against the vocabulary, then superseded by the classifier.
    pub risk_level: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Validated and classified insert row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWebsite {
    pub id: DbId,
    pub url: Option<String>,
    pub domain: String,
    pub ssl_certificate: bool,
    pub display_name: Option<String>,
    pub tld: Option<String>,
    pub description: Option<String>,
    pub website_type: String,
    pub is_not_trusted: bool,
    pub is_official: bool,
    pub steam_login_present: bool,
    pub risk_score: f64,
    pub risk_level: String,
    pub status: String,
    pub notes: Option<String>,
}

impl CreateWebsite {
    /// Validate, normalize and classify the input into an insertable row.
    pub fn normalize(&self) -> Result<NewWebsite, CoreError> {
        let checked = validate_creation(CreationFields {
            domain: &self.domain,
            url: self.url.as_deref(),
            tld: self.tld.as_deref(),
            website_type: self.website_type.as_deref(),
            status: self.status.as_deref(),
            risk_level: self.risk_level.as_deref(),
        })?;

        let is_official = self.is_official.unwrap_or(false);
        let risk_score = self.risk_score.unwrap_or(0.0);
        let classification = classify(risk_score, is_official);

        Ok(NewWebsite {
            id: self.id.unwrap_or_else(DbId::new_v4),
            url: checked.url,
            domain: checked.domain,
            ssl_certificate: checked.ssl_certificate,
            display_name: owned_non_blank(&self.display_name),
            tld: checked.tld,
            description: owned_non_blank(&self.description),
            website_type: checked.website_type.as_str().to_string(),
            is_not_trusted: classification.is_not_trusted,
            is_official,
            steam_login_present: self.steam_login_present.unwrap_or(false),
            risk_score,
            risk_level: classification.risk_level.as_str().to_string(),
            status: checked.status.as_str().to_string(),
            notes: owned_non_blank(&self.notes),
        })
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// Partial update input. Only these fields are mutable after creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWebsite {
    pub display_name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub website_type: Option<String>,
    pub ssl_certificate: Option<bool>,
    pub is_official: Option<bool>,
    pub steam_login_present: Option<bool>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Normalized partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebsitePatch {
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub website_type: Option<String>,
    pub ssl_certificate: Option<bool>,
    pub is_official: Option<bool>,
    pub steam_login_present: Option<bool>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl UpdateWebsite {
    /// Validate enum fields and drop blank strings.
    pub fn normalize(&self) -> Result<WebsitePatch, CoreError> {
        let checked = validate_update(self.website_type.as_deref(), self.status.as_deref())?;

        Ok(WebsitePatch {
            display_name: owned_non_blank(&self.display_name),
            description: owned_non_blank(&self.description),
            website_type: checked.website_type.map(|t| t.as_str().to_string()),
            ssl_certificate: self.ssl_certificate,
            is_official: self.is_official,
            steam_login_present: self.steam_login_present,
            status: checked.status.map(|s| s.as_str().to_string()),
            notes: owned_non_blank(&self.notes),
        })
    }
}

fn owned_non_blank(s: &Option<String>) -> Option<String> {
    non_blank(s.as_deref()).map(str::to_string)
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// AND-combined list filters. Blank strings are treated as absent.
#[derive(Debug, Clone, Default)]
pub struct WebsiteFilter {
    pub trust: TrustFilter,
    /// Case-sensitive substring of `domain`.
    pub domain: Option<String>,
    pub status: Option<String>,
    pub risk_level: Option<String>,
}

// ---------------------------------------------------------------------------
// Outbound shapes
// ---------------------------------------------------------------------------

/// Admin verification indicator in the return shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    NotVerified,
}

impl From<bool> for VerificationStatus {
    fn from(verified: bool) -> Self {
        if verified {
            Self::Verified
        } else {
            Self::NotVerified
        }
    }
}

/// Public representation of a website. Internal notes are omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebsiteReturn {
    pub id: Option<DbId>,
    pub url: Option<String>,
    pub domain: Option<String>,
    pub display_name: Option<String>,
    pub tld: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub website_type: Option<String>,
    pub ssl_certificate: Option<bool>,
    pub is_not_trusted: Option<bool>,
    pub is_official: Option<bool>,
    pub steam_login_present: Option<bool>,
    pub verified: VerificationStatus,
    pub risk_score: Option<f64>,
    pub risk_level: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}

impl From<Website> for WebsiteReturn {
    fn from(w: Website) -> Self {
        Self {
            id: Some(w.id),
            url: w.url,
            domain: Some(w.domain),
            display_name: w.display_name,
            tld: w.tld,
            description: w.description,
            website_type: Some(w.website_type),
            ssl_certificate: Some(w.ssl_certificate),
            is_not_trusted: Some(w.is_not_trusted),
            is_official: Some(w.is_official),
            steam_login_present: Some(w.steam_login_present),
            verified: w.verified.into(),
            risk_score: Some(w.risk_score),
            risk_level: Some(w.risk_level),
            status: Some(w.status),
            created_at: Some(w.created_at),
            updated_at: Some(w.updated_at),
        }
    }
}

/// A website together with its occurrences, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct WebsiteDetail {
    #[serde(flatten)]
    pub website: WebsiteReturn,
    pub occurrences: Vec<Occurrence>,
}

/// Minimal shape consumed by the browser extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionEntry {
    pub url: Option<String>,
    pub description: Option<String>,
}

impl From<Website> for ExtensionEntry {
    fn from(w: Website) -> Self {
        Self {
            url: w.url,
            description: w.description,
        }
    }
}

/// Project websites to extension entries. Always yields a list, possibly empty.
pub fn to_extension_entries<I>(websites: I) -> Vec<ExtensionEntry>
where
    I: IntoIterator<Item = Website>,
{
    websites.into_iter().map(ExtensionEntry::from).collect()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn sample_website() -> Website {
        let now = Utc::now();
        Website {
            id: DbId::new_v4(),
            url: Some("https://steamcommunity.com".to_string()),
            domain: "steamcommunity.com".to_string(),
            ssl_certificate: true,
            display_name: Some("Steam Community".to_string()),
            tld: Some("com".to_string()),
            description: Some("Official community hub".to_string()),
            website_type: "website".to_string(),
            is_not_trusted: false,
            is_official: true,
            steam_login_present: true,
            verified: false,
            risk_score: 0.0,
            risk_level: "none".to_string(),
            status: "active".to_string(),
            notes: Some("seeded".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    // -- create normalization ---------------------------------------------------

    #[test]
    fn normalize_classifies_and_derives_ssl() {
        let input = CreateWebsite {
            url: Some("https://steamcommunity.com".to_string()),
            domain: "steamcommunity.com".to_string(),
            ssl_certificate: Some(false),
            is_official: Some(true),
            risk_score: Some(0.0),
            risk_level: Some("critical".to_string()),
            ..Default::default()
        };
        let row = input.normalize().unwrap();
        assert!(row.ssl_certificate);
        assert_eq!(row.risk_level, "none");
        assert!(!row.is_not_trusted);
        assert_eq!(row.website_type, "website");
        assert_eq!(row.status, "active");
    }

    #[test]
    fn normalize_high_score_is_untrusted() {
        let input = CreateWebsite {
            url: Some("http://scam-site.biz".to_string()),
            domain: "scam-site.biz".to_string(),
            risk_score: Some(95.0),
            ..Default::default()
        };
        let row = input.normalize().unwrap();
        assert!(!row.ssl_certificate);
        assert_eq!(row.risk_level, "critical");
        assert!(row.is_not_trusted);
    }

    #[test]
    fn normalize_keeps_supplied_id() {
        let id = DbId::new_v4();
        let input = CreateWebsite {
            id: Some(id),
            domain: "example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(input.normalize().unwrap().id, id);
    }

    #[test]
    fn normalize_missing_score_defaults_to_zero() {
        let row = CreateWebsite {
            domain: "example.com".to_string(),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        assert_eq!(row.risk_score, 0.0);
        assert_eq!(row.risk_level, "unknown");
        assert!(!row.is_not_trusted);
    }

    #[test]
    fn normalize_rejects_missing_domain() {
        assert_matches!(
            CreateWebsite::default().normalize(),
            Err(CoreError::Validation(msg)) if msg == "domain is required"
        );
    }

    // -- update normalization -------------------------------------------------

    #[test]
    fn update_drops_blank_strings() {
        let patch = UpdateWebsite {
            display_name: Some("  ".to_string()),
            notes: Some("reviewed".to_string()),
            is_official: Some(false),
            ..Default::default()
        }
        .normalize()
        .unwrap();
        assert_eq!(patch.display_name, None);
        assert_eq!(patch.notes.as_deref(), Some("reviewed"));
        assert_eq!(patch.is_official, Some(false));
    }

    #[test]
    fn update_rejects_unknown_type() {
        assert_matches!(
            UpdateWebsite {
                website_type: Some("forum".to_string()),
                ..Default::default()
            }
            .normalize(),
            Err(CoreError::Validation(_))
        );
    }

    // -- outbound shapes --------------------------------------------------------

    #[test]
    fn return_shape_carries_every_public_field() {
        let w = sample_website();
        let r = WebsiteReturn::from(w.clone());
        assert_eq!(r.id, Some(w.id));
        assert_eq!(r.url, w.url);
        assert_eq!(r.domain.as_deref(), Some(w.domain.as_str()));
        assert_eq!(r.display_name, w.display_name);
        assert_eq!(r.tld, w.tld);
        assert_eq!(r.description, w.description);
        assert_eq!(r.website_type.as_deref(), Some("website"));
        assert_eq!(r.ssl_certificate, Some(true));
        assert_eq!(r.is_not_trusted, Some(false));
        assert_eq!(r.is_official, Some(true));
        assert_eq!(r.steam_login_present, Some(true));
        assert_eq!(r.verified, VerificationStatus::NotVerified);
        assert_eq!(r.risk_score, Some(0.0));
        assert_eq!(r.risk_level.as_deref(), Some("none"));
        assert_eq!(r.status.as_deref(), Some("active"));
        assert_eq!(r.created_at, Some(w.created_at));
    }

    #[test]
    fn return_shape_serializes_verified_indicator() {
        let mut w = sample_website();
        w.verified = true;
        let json = serde_json::to_value(WebsiteReturn::from(w)).unwrap();
        assert_eq!(json["verified"], "verified");
        assert_eq!(json["type"], "website");
        assert!(json.get("notes").is_none());
    }

    #[test]
    fn extension_projection_strips_fields() {
        let entries = to_extension_entries(vec![sample_website()]);
        assert_eq!(
            entries,
            vec![ExtensionEntry {
                url: Some("https://steamcommunity.com".to_string()),
                description: Some("Official community hub".to_string()),
            }]
        );
    }

    #[test]
    fn extension_projection_of_nothing_is_empty_list() {
        let entries = to_extension_entries(Vec::new());
        assert_eq!(serde_json::to_string(&entries).unwrap(), "[]");
    }
}
