use serde::{Deserialize, Serialize};

use crate::domain::models::UrlRecord;

/// Input contract: the one field a shortening request must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlBase {
    pub target_url: String,
}

/// Output contract: the input field plus the server-computed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub target_url: String,
    pub is_active: bool,
    pub clicks: u64,
}

impl Url {
    /// Maps a persisted row onto the transfer shape. The click counter only
    /// ever grows from zero, so a negative stored value maps to zero.
    pub fn from_record(record: &UrlRecord) -> Self {
        Url {
            target_url: record.target_url.clone(),
            is_active: record.is_active,
            clicks: u64::try_from(record.clicks).unwrap_or(0),
        }
    }
}

/// Response contract: everything in [`Url`] plus the derived public strings.
/// The caller supplies `url` and `admin_url`; this type does not know the
/// configured base domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlInfo {
    pub target_url: String,
    pub is_active: bool,
    pub clicks: u64,
    /// Full public short URL (`base + key`).
    pub url: String,
    /// Full management URL (`base + /admin/ + secret key`).
    pub admin_url: String,
}

impl UrlInfo {
    pub fn new(base: Url, url: String, admin_url: String) -> Self {
        UrlInfo {
            target_url: base.target_url,
            is_active: base.is_active,
            clicks: base.clicks,
            url,
            admin_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record() -> UrlRecord {
        UrlRecord {
            id: 1,
            key: "ABC12".to_string(),
            secret_key: "ABC12_SECRET00".to_string(),
            target_url: "https://example.com".to_string(),
            is_active: true,
            clicks: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_url_base_round_trips_target() {
        let base: UrlBase = serde_json::from_str(r#"{"target_url":"https://example.com"}"#).unwrap();
        assert_eq!(base.target_url, "https://example.com");

        let json = serde_json::to_string(&base).unwrap();
        let back: UrlBase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, base);
    }

    #[test]
    fn test_url_base_requires_target_url() {
        assert!(serde_json::from_str::<UrlBase>(r#"{}"#).is_err());
        assert!(serde_json::from_str::<UrlBase>(r#"{"target_url":42}"#).is_err());
        assert!(serde_json::from_str::<UrlBase>(r#"{"target_url":null}"#).is_err());
    }

    #[test]
    fn test_url_from_record_matches_literal() {
        let from_record = Url::from_record(&record());
        let literal = Url {
            target_url: "https://example.com".to_string(),
            is_active: true,
            clicks: 0,
        };
        assert_eq!(from_record, literal);
    }

    #[test]
    fn test_url_rejects_negative_clicks() {
        let err = serde_json::from_str::<Url>(
            r#"{"target_url":"https://example.com","is_active":true,"clicks":-1}"#,
        );
        assert!(err.is_err());

        let mut rec = record();
        rec.clicks = -1;
        assert_eq!(Url::from_record(&rec).clicks, 0);
    }

    #[test]
    fn test_url_info_requires_derived_fields() {
        let full = r#"{
            "target_url": "https://example.com",
            "is_active": true,
            "clicks": 3,
            "url": "http://localhost:8080/ABC12",
            "admin_url": "http://localhost:8080/admin/ABC12_SECRET00"
        }"#;
        let info: UrlInfo = serde_json::from_str(full).unwrap();
        assert_eq!(info.clicks, 3);

        let missing_admin = r#"{
            "target_url": "https://example.com",
            "is_active": true,
            "clicks": 3,
            "url": "http://localhost:8080/ABC12"
        }"#;
        assert!(serde_json::from_str::<UrlInfo>(missing_admin).is_err());

        let missing_url = r#"{
            "target_url": "https://example.com",
            "is_active": true,
            "clicks": 3,
            "admin_url": "http://localhost:8080/admin/ABC12_SECRET00"
        }"#;
        assert!(serde_json::from_str::<UrlInfo>(missing_url).is_err());
    }

    #[test]
    fn test_url_info_composes_url_fields() {
        let info = UrlInfo::new(
            Url::from_record(&record()),
            "http://localhost:8080/ABC12".to_string(),
            "http://localhost:8080/admin/ABC12_SECRET00".to_string(),
        );
        assert_eq!(info.target_url, "https://example.com");
        assert!(info.is_active);
        assert_eq!(info.url, "http://localhost:8080/ABC12");
        assert_eq!(info.admin_url, "http://localhost:8080/admin/ABC12_SECRET00");
    }
}
