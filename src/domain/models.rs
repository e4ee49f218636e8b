use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted short-URL mapping, one row in the `urls` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlRecord {
    pub id: i64,
    /// Public path segment of the short URL.
    pub key: String,
    /// Grants management access (stats, deactivation).
    pub secret_key: String,
    pub target_url: String,
    pub is_active: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}
