//! Website vocabularies and input validation.
//!
//! Checks the raw creation input for required fields and URL / domain / TLD
//! consistency, derives the SSL flag from the URL scheme and resolves the
//! enum-like string fields to their defaults. Update input only shares the
//! enum constraints.

use serde::{Deserialize, Serialize};
use url::{Host, Url};

use crate::error::CoreError;
use crate::risk::RiskLevel;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const TYPE_WEBSITE: &str = "website";
pub const TYPE_TOOL: &str = "tool";
pub const TYPE_EXTENSION: &str = "extension";

/// All valid website type strings.
pub const VALID_WEBSITE_TYPES: &[&str] = &[TYPE_WEBSITE, TYPE_TOOL, TYPE_EXTENSION];

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_BLOCKED: &str = "blocked";
pub const STATUS_ARCHIVED: &str = "archived";

/// All valid website status strings.
pub const VALID_WEBSITE_STATUSES: &[&str] = &[STATUS_ACTIVE, STATUS_BLOCKED, STATUS_ARCHIVED];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Kind of resource a website record describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteType {
    #[default]
    Website,
    Tool,
    Extension,
}

impl WebsiteType {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            TYPE_WEBSITE => Ok(Self::Website),
            TYPE_TOOL => Ok(Self::Tool),
            TYPE_EXTENSION => Ok(Self::Extension),
            _ => Err(format!(
                "invalid type '{s}'. Must be one of: {}",
                VALID_WEBSITE_TYPES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => TYPE_WEBSITE,
            Self::Tool => TYPE_TOOL,
            Self::Extension => TYPE_EXTENSION,
        }
    }
}

/// Moderation status of a website record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebsiteStatus {
    #[default]
    Active,
    Blocked,
    Archived,
}

impl WebsiteStatus {
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_ACTIVE => Ok(Self::Active),
            STATUS_BLOCKED => Ok(Self::Blocked),
            STATUS_ARCHIVED => Ok(Self::Archived),
            _ => Err(format!(
                "invalid status '{s}'. Must be one of: {}",
                VALID_WEBSITE_STATUSES.join(", ")
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => STATUS_ACTIVE,
            Self::Blocked => STATUS_BLOCKED,
            Self::Archived => STATUS_ARCHIVED,
        }
    }
}

// ---------------------------------------------------------------------------
// Validated creation input
// ---------------------------------------------------------------------------

/// Raw creation fields that take part in validation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreationFields<'a> {
    pub domain: &'a str,
    pub url: Option<&'a str>,
    pub tld: Option<&'a str>,
    pub website_type: Option<&'a str>,
    pub status: Option<&'a str>,
    pub risk_level: Option<&'a str>,
}

/// Normalized, internally consistent creation fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCreation {
    /// Trimmed domain, guaranteed non-empty.
    pub domain: String,
    /// Trimmed URL, `None` when absent or blank.
    pub url: Option<String>,
    /// Trimmed TLD, `None` when absent or blank.
    pub tld: Option<String>,
    /// Derived from the URL scheme; any caller-supplied value is ignored.
    pub ssl_certificate: bool,
    pub website_type: WebsiteType,
    pub status: WebsiteStatus,
}

/// Validate and normalize the creation fields of a website.
///
/// The caller-supplied `risk_level` only has to be a recognized label; the
/// stored level always comes from the classifier.
pub fn validate_creation(fields: CreationFields<'_>) -> Result<ValidatedCreation, CoreError> {
    let domain = fields.domain.trim();
    if domain.is_empty() {
        return Err(CoreError::validation("domain is required"));
    }

    let url = non_blank(fields.url);
    let tld = non_blank(fields.tld);

    let ssl_certificate = match url {
        Some(raw) => {
            let parsed = check_url_consistency(raw, domain, tld)?;
            parsed.scheme().starts_with("https")
        }
        None => false,
    };

    let website_type = match non_blank(fields.website_type) {
        Some(s) => WebsiteType::from_str_value(s).map_err(CoreError::Validation)?,
        None => WebsiteType::default(),
    };

    let status = parse_status_or_default(fields.status)?;

    if let Some(level) = non_blank(fields.risk_level) {
        RiskLevel::from_str_value(level).map_err(CoreError::Validation)?;
    }

    Ok(ValidatedCreation {
        domain: domain.to_string(),
        url: url.map(str::to_string),
        tld: tld.map(str::to_string),
        ssl_certificate,
        website_type,
        status,
    })
}

/// Parse `raw` as an absolute URL and check that its host contains both the
/// domain and the TLD.
///
/// The parsed host is lowercased and punycode-encoded, so `domain` and `tld`
/// go through the same host normalization before the substring checks.
pub fn check_url_consistency(raw: &str, domain: &str, tld: Option<&str>) -> Result<Url, CoreError> {
    let parsed = Url::parse(raw).map_err(|_| CoreError::validation("invalid URL"))?;

    let host = match parsed.host_str() {
        Some(h) if !parsed.scheme().is_empty() && !h.is_empty() => h.to_string(),
        _ => return Err(CoreError::validation("invalid URL")),
    };

    if !host.contains(&normalize_host_fragment(domain)) {
        return Err(CoreError::validation("domain does not match URL"));
    }

    if let Some(tld) = tld {
        if !host.contains(&normalize_host_fragment(tld)) {
            return Err(CoreError::validation("TLD does not match URL"));
        }
    }

    Ok(parsed)
}

/// Normalize a host or host fragment the way URL parsing normalizes hosts.
/// Fragments that do not parse as a domain name are only lowercased.
fn normalize_host_fragment(fragment: &str) -> String {
    match Host::parse(fragment) {
        Ok(Host::Domain(domain)) => domain,
        _ => fragment.to_lowercase(),
    }
}

/// Resolve an optional status string, defaulting blank input to `active`.
pub fn parse_status_or_default(raw: Option<&str>) -> Result<WebsiteStatus, CoreError> {
    match non_blank(raw) {
        Some(s) => WebsiteStatus::from_str_value(s).map_err(CoreError::Validation),
        None => Ok(WebsiteStatus::default()),
    }
}

// ---------------------------------------------------------------------------
// Update input
// ---------------------------------------------------------------------------

/// Validated enum fields of a partial update. `None` leaves the column as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatedUpdate {
    pub website_type: Option<WebsiteType>,
    pub status: Option<WebsiteStatus>,
}

/// Validate the enum-constrained fields of a partial update.
///
/// Blank strings count as absent.
pub fn validate_update(
    website_type: Option<&str>,
    status: Option<&str>,
) -> Result<ValidatedUpdate, CoreError> {
    let website_type = non_blank(website_type)
        .map(WebsiteType::from_str_value)
        .transpose()
        .map_err(CoreError::Validation)?;
    let status = non_blank(status)
        .map(WebsiteStatus::from_str_value)
        .transpose()
        .map_err(CoreError::Validation)?;

    Ok(ValidatedUpdate {
        website_type,
        status,
    })
}

/// Trim an optional string, mapping blank input to `None`.
pub fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn fields<'a>(domain: &'a str, url: Option<&'a str>, tld: Option<&'a str>) -> CreationFields<'a> {
        CreationFields {
            domain,
            url,
            tld,
            ..Default::default()
        }
    }

    fn validation_message(result: Result<ValidatedCreation, CoreError>) -> String {
        match result {
            Err(CoreError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    // -- domain -------------------------------------------------------------------

    #[test]
    fn blank_domain_is_rejected() {
        let msg = validation_message(validate_creation(fields("   ", None, None)));
        assert_eq!(msg, "domain is required");
    }

    #[test]
    fn domain_is_trimmed() {
        let v = validate_creation(fields("  steamcommunity.com ", None, None)).unwrap();
        assert_eq!(v.domain, "steamcommunity.com");
    }

    // -- URL consistency ------------------------------------------------------------

    #[test]
    fn relative_url_is_invalid() {
        let msg = validation_message(validate_creation(fields(
            "steamcommunity.com",
            Some("steamcommunity.com/login"),
            None,
        )));
        assert_eq!(msg, "invalid URL");
    }

    #[test]
    fn url_without_host_is_invalid() {
        let msg = validation_message(validate_creation(fields(
            "example.com",
            Some("mailto:someone@example.com"),
            None,
        )));
        assert_eq!(msg, "invalid URL");
    }

    #[test]
    fn host_must_contain_domain() {
        let msg = validation_message(validate_creation(fields(
            "steamcommunity.com",
            Some("https://steamcommunlty.com"),
            Some("com"),
        )));
        assert_eq!(msg, "domain does not match URL");
    }

    #[test]
    fn host_must_contain_tld() {
        let msg = validation_message(validate_creation(fields(
            "steam-trade",
            Some("https://steam-trade.ru"),
            Some("biz"),
        )));
        assert_eq!(msg, "TLD does not match URL");
    }

    #[test]
    fn subdomain_host_matches_domain() {
        let v = validate_creation(fields(
            "steampowered.com",
            Some("https://store.steampowered.com/app/10"),
            Some("com"),
        ))
        .unwrap();
        assert_eq!(v.url.as_deref(), Some("https://store.steampowered.com/app/10"));
        assert_eq!(v.tld.as_deref(), Some("com"));
    }

    #[test]
    fn mixed_case_domain_matches_host() {
        let v = validate_creation(fields(
            "SteamCommunity.com",
            Some("https://SteamCommunity.com"),
            Some("COM"),
        ))
        .unwrap();
        assert_eq!(v.domain, "SteamCommunity.com");
    }

    #[test]
    fn unicode_domain_matches_punycode_host() {
        let v = validate_creation(fields("münchen.de", Some("https://münchen.de/"), Some("de")))
            .unwrap();
        assert_eq!(v.domain, "münchen.de");
        assert!(v.ssl_certificate);
    }

    #[test]
    fn unicode_domain_still_has_to_match() {
        let msg = validation_message(validate_creation(fields(
            "münchen.de",
            Some("https://berlin.de/"),
            None,
        )));
        assert_eq!(msg, "domain does not match URL");
    }

    // -- SSL derivation -------------------------------------------------------------

    #[test]
    fn https_scheme_sets_ssl() {
        let v = validate_creation(fields(
            "steamcommunity.com",
            Some("HTTPS://steamcommunity.com"),
            None,
        ))
        .unwrap();
        assert!(v.ssl_certificate);
    }

    #[test]
    fn http_scheme_clears_ssl() {
        let v = validate_creation(fields("scam-site.biz", Some("http://scam-site.biz"), Some("biz")))
            .unwrap();
        assert!(!v.ssl_certificate);
    }

    #[test]
    fn missing_url_clears_ssl() {
        let v = validate_creation(fields("scam-site.biz", None, None)).unwrap();
        assert!(!v.ssl_certificate);
        assert_eq!(v.url, None);
    }

    // -- enum fields ----------------------------------------------------------------

    #[test]
    fn defaults_apply_for_blank_enums() {
        let v = validate_creation(CreationFields {
            domain: "example.com",
            website_type: Some(""),
            status: Some("  "),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(v.website_type, WebsiteType::Website);
        assert_eq!(v.status, WebsiteStatus::Active);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let msg = validation_message(validate_creation(CreationFields {
            domain: "example.com",
            website_type: Some("app"),
            ..Default::default()
        }));
        assert!(msg.contains("invalid type 'app'"));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let msg = validation_message(validate_creation(CreationFields {
            domain: "example.com",
            status: Some("inactive"),
            ..Default::default()
        }));
        assert!(msg.contains("invalid status 'inactive'"));
    }

    #[test]
    fn unknown_risk_level_is_rejected() {
        let msg = validation_message(validate_creation(CreationFields {
            domain: "example.com",
            risk_level: Some("severe"),
            ..Default::default()
        }));
        assert!(msg.contains("invalid risk_level"));
    }

    #[test]
    fn recognized_risk_level_is_accepted() {
        assert!(validate_creation(CreationFields {
            domain: "example.com",
            risk_level: Some("none"),
            ..Default::default()
        })
        .is_ok());
    }

    // -- update ---------------------------------------------------------------------

    #[test]
    fn update_treats_blank_as_absent() {
        assert_eq!(
            validate_update(Some(""), None).unwrap(),
            ValidatedUpdate::default()
        );
    }

    #[test]
    fn update_parses_enums() {
        let v = validate_update(Some("tool"), Some("blocked")).unwrap();
        assert_eq!(v.website_type, Some(WebsiteType::Tool));
        assert_eq!(v.status, Some(WebsiteStatus::Blocked));
    }

    #[test]
    fn update_rejects_unknown_status() {
        assert_matches!(
            validate_update(None, Some("deleted")),
            Err(CoreError::Validation(_))
        );
    }
}
