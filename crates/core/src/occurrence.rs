//! Occurrence vocabularies and input validation.
//!
//! An occurrence is a single report of a website being seen in the wild.
//! Reports are append-only; they disappear only when their parent website
//! is deleted.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::website::non_blank;

pub const SEVERITY_INFO: &str = "info";
pub const SEVERITY_LOW: &str = "low";
pub const SEVERITY_MEDIUM: &str = "medium";
pub const SEVERITY_HIGH: &str = "high";
pub const SEVERITY_CRITICAL: &str = "critical";

/// All valid severity strings.
pub const VALID_SEVERITIES: &[&str] = &[
    SEVERITY_INFO,
    SEVERITY_LOW,
    SEVERITY_MEDIUM,
    SEVERITY_HIGH,
    SEVERITY_CRITICAL,
];

pub const OCCURRENCE_PENDING: &str = "pending";
pub const OCCURRENCE_VERIFIED: &str = "verified";
pub const OCCURRENCE_REJECTED: &str = "rejected";

/// All valid occurrence status strings.
pub const VALID_OCCURRENCE_STATUSES: &[&str] =
    &[OCCURRENCE_PENDING, OCCURRENCE_VERIFIED, OCCURRENCE_REJECTED];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            SEVERITY_INFO => Ok(Self::Info),
            SEVERITY_LOW => Ok(Self::Low),
            SEVERITY_MEDIUM => Ok(Self::Medium),
            SEVERITY_HIGH => Ok(Self::High),
            SEVERITY_CRITICAL => Ok(Self::Critical),
            _ => Err(format!(
                "invalid severity '{s}'. Must be one of: {}",
                VALID_SEVERITIES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => SEVERITY_INFO,
            Self::Low => SEVERITY_LOW,
            Self::Medium => SEVERITY_MEDIUM,
            Self::High => SEVERITY_HIGH,
            Self::Critical => SEVERITY_CRITICAL,
        }
    }
}

/// Review state of a single report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
}

impl OccurrenceStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            OCCURRENCE_PENDING => Ok(Self::Pending),
            OCCURRENCE_VERIFIED => Ok(Self::Verified),
            OCCURRENCE_REJECTED => Ok(Self::Rejected),
            _ => Err(format!(
                "invalid occurrence status '{s}'. Must be one of: {}",
                VALID_OCCURRENCE_STATUSES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => OCCURRENCE_PENDING,
            Self::Verified => OCCURRENCE_VERIFIED,
            Self::Rejected => OCCURRENCE_REJECTED,
        }
    }
}

/// Raw occurrence fields as received from a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct OccurrenceFields<'a> {
    pub description: Option<&'a str>,
    pub url_reported: Option<&'a str>,
    pub country_code: Option<&'a str>,
    pub severity: Option<&'a str>,
    pub status: Option<&'a str>,
}

/// Normalized occurrence fields ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOccurrence {
    pub description: Option<String>,
    pub url_reported: String,
    /// Upper-case ISO 3166-1 alpha-2 code.
    pub country_code: Option<String>,
    pub severity: Severity,
    pub status: OccurrenceStatus,
}

pub fn validate_occurrence(fields: OccurrenceFields<'_>) -> Result<ValidatedOccurrence, CoreError> {
    let url_reported = non_blank(fields.url_reported)
        .ok_or_else(|| CoreError::validation("url_reported is required"))?;

    let country_code = non_blank(fields.country_code)
        .map(normalize_country_code)
        .transpose()?;

    let severity = match non_blank(fields.severity) {
        Some(s) => Severity::from_str_value(s).map_err(CoreError::Validation)?,
        None => Severity::default(),
    };

    let status = match non_blank(fields.status) {
        Some(s) => OccurrenceStatus::from_str_value(s).map_err(CoreError::Validation)?,
        None => OccurrenceStatus::default(),
    };

    Ok(ValidatedOccurrence {
        description: non_blank(fields.description).map(str::to_string),
        url_reported: url_reported.to_string(),
        country_code,
        severity,
        status,
    })
}

/// Require exactly two ASCII letters and upper-case them.
pub fn normalize_country_code(code: &str) -> Result<String, CoreError> {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(CoreError::validation(format!(
            "invalid country_code '{code}'. Must be two letters"
        )));
    }
    Ok(code.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn url_reported_is_required() {
        let err = validate_occurrence(OccurrenceFields {
            url_reported: Some("  "),
            ..Default::default()
        })
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg == "url_reported is required");
    }

    #[test]
    fn defaults_are_medium_and_pending() {
        let v = validate_occurrence(OccurrenceFields {
            url_reported: Some("https://discord.com/channels/1/2"),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(v.severity, Severity::Medium);
        assert_eq!(v.status, OccurrenceStatus::Pending);
        assert_eq!(v.country_code, None);
        assert_eq!(v.description, None);
    }

    #[test]
    fn country_code_is_uppercased() {
        assert_eq!(normalize_country_code("pt").unwrap(), "PT");
        assert_eq!(normalize_country_code("Us").unwrap(), "US");
    }

    #[test]
    fn country_code_rejects_bad_shapes() {
        for bad in ["P", "PRT", "1A", "é"] {
            assert_matches!(normalize_country_code(bad), Err(CoreError::Validation(_)));
        }
    }

    #[test]
    fn explicit_enums_are_parsed() {
        let v = validate_occurrence(OccurrenceFields {
            url_reported: Some("https://t.me/scam"),
            severity: Some("critical"),
            status: Some("verified"),
            country_code: Some("br"),
            description: Some("phishing DM"),
        })
        .unwrap();
        assert_eq!(v.severity, Severity::Critical);
        assert_eq!(v.status, OccurrenceStatus::Verified);
        assert_eq!(v.country_code.as_deref(), Some("BR"));
        assert_eq!(v.description.as_deref(), Some("phishing DM"));
    }

    #[test]
    fn unknown_severity_is_rejected() {
        assert_matches!(
            validate_occurrence(OccurrenceFields {
                url_reported: Some("https://t.me/scam"),
                severity: Some("extreme"),
                ..Default::default()
            }),
            Err(CoreError::Validation(_))
        );
    }
}
