//! Query parameter types for API handlers.

use serde::Deserialize;
use steamshark_core::pagination::{Pagination, TrustFilter};
use steamshark_core::website::non_blank;
use steamshark_db::models::website::WebsiteFilter;

/// Query parameters for `GET /websites`.
///
/// `is_not_trusted` stays a raw string so unrecognized values leave the
/// filter unset instead of failing the request. String values are trimmed
/// and blank ones are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ListWebsitesParams {
    pub domain: Option<String>,
    pub status: Option<String>,
    pub risk_level: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub is_not_trusted: Option<String>,
}

impl ListWebsitesParams {
    pub fn filter(&self) -> WebsiteFilter {
        WebsiteFilter {
            trust: TrustFilter::from_query(self.is_not_trusted.as_deref()),
            domain: trimmed(&self.domain),
            status: trimmed(&self.status),
            risk_level: trimmed(&self.risk_level),
        }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }
}

/// Query parameters for `GET /websites/extension`.
#[derive(Debug, Default, Deserialize)]
pub struct ExtensionParams {
    pub is_not_trusted: Option<String>,
}

impl ExtensionParams {
    pub fn trust(&self) -> TrustFilter {
        TrustFilter::from_query(self.is_not_trusted.as_deref())
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    non_blank(value.as_deref()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_values_are_trimmed() {
        let params = ListWebsitesParams {
            domain: Some(" steam ".to_string()),
            status: Some("active\t".to_string()),
            risk_level: Some("  ".to_string()),
            is_not_trusted: Some("true ".to_string()),
            ..Default::default()
        };

        let filter = params.filter();
        assert_eq!(filter.domain.as_deref(), Some("steam"));
        assert_eq!(filter.status.as_deref(), Some("active"));
        assert_eq!(filter.risk_level, None);
        assert_eq!(filter.trust, TrustFilter::Only(true));
    }

    #[test]
    fn extension_trust_is_trimmed() {
        let params = ExtensionParams {
            is_not_trusted: Some(" f".to_string()),
        };
        assert_eq!(params.trust(), TrustFilter::Only(false));
    }
}
