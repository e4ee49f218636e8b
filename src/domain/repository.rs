use crate::domain::models::UrlRecord;
use anyhow::Result;

pub trait UrlRepository {
    /// Allocates a unique short key and persists the mapping.
    async fn create(&self, target_url: &str) -> Result<UrlRecord>;

    async fn find_active_by_key(&self, key: &str) -> Result<Option<UrlRecord>>;

    async fn find_active_by_secret_key(&self, secret_key: &str) -> Result<Option<UrlRecord>>;

    /// Counts one redirect against the key. The counter never decreases.
    async fn register_click(&self, key: &str) -> Result<()>;

    /// Soft delete: flips `is_active` off and returns the affected record,
    /// or `None` when no active record matches.
    async fn deactivate_by_secret_key(&self, secret_key: &str) -> Result<Option<UrlRecord>>;
}
