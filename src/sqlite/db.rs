use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

use crate::domain::{keygen, models::UrlRecord, repository::UrlRepository};
use crate::sqlite::config::Config;

const CREATE_URLS_TABLE_QUERY: &str = r#"
    CREATE TABLE IF NOT EXISTS urls (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        key TEXT NOT NULL UNIQUE,
        secret_key TEXT NOT NULL UNIQUE,
        target_url TEXT NOT NULL,
        is_active BOOLEAN NOT NULL DEFAULT TRUE,
        clicks INTEGER NOT NULL DEFAULT 0,
        created_at TIMESTAMP NOT NULL
    )
"#;

const INSERT_URL_QUERY: &str = r#"
    INSERT INTO urls (key, secret_key, target_url, is_active, clicks, created_at)
    VALUES (?, ?, ?, TRUE, 0, ?)
    RETURNING id
"#;
const FIND_ACTIVE_BY_KEY_QUERY: &str = r#"
    SELECT id, key, secret_key, target_url, is_active, clicks, created_at
    FROM urls WHERE key = ? AND is_active = TRUE
"#;
const FIND_ACTIVE_BY_SECRET_KEY_QUERY: &str = r#"
    SELECT id, key, secret_key, target_url, is_active, clicks, created_at
    FROM urls WHERE secret_key = ? AND is_active = TRUE
"#;
const REGISTER_CLICK_QUERY: &str = "UPDATE urls SET clicks = clicks + 1 WHERE key = ?";
const DEACTIVATE_QUERY: &str = "UPDATE urls SET is_active = FALSE WHERE secret_key = ?";

const MAX_KEY_ATTEMPTS: usize = 5;

type UrlRow = (i64, String, String, String, bool, i64, DateTime<Utc>);

fn record_from_row(row: UrlRow) -> UrlRecord {
    let (id, key, secret_key, target_url, is_active, clicks, created_at) = row;
    UrlRecord {
        id,
        key,
        secret_key,
        target_url,
        is_active,
        clicks,
        created_at,
    }
}

pub struct DB {
    pub pool: SqlitePool,
}

impl DB {
    /// Builds the process-wide pool and bootstraps the schema. Called once at
    /// startup; the pool is the only shared handle to the database.
    pub async fn new(config: Config) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)
            .with_context(|| format!("Invalid database URL '{}'", config.url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database '{}'", config.url))?;

        sqlx::query(CREATE_URLS_TABLE_QUERY)
            .execute(&pool)
            .await
            .context("Failed to create table 'urls'")?;

        Ok(DB { pool })
    }

    /// Opens a unit of work. Nothing autocommits: the caller commits
    /// explicitly, and a dropped session rolls back.
    pub async fn session(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }
}

impl UrlRepository for Arc<DB> {
    async fn create(&self, target_url: &str) -> Result<UrlRecord> {
        // The UNIQUE constraint arbitrates key collisions, including a
        // concurrent insert claiming the same key; losing the draw just
        // means rolling back and drawing again.
        for _ in 0..MAX_KEY_ATTEMPTS {
            let key = keygen::random_key(keygen::KEY_LENGTH);
            let secret_key = keygen::secret_key_for(&key);
            let created_at = Utc::now();

            let mut tx = self.session().await?;
            let inserted: Result<i64, sqlx::Error> = sqlx::query_scalar(INSERT_URL_QUERY)
                .bind(&key)
                .bind(&secret_key)
                .bind(target_url)
                .bind(created_at)
                .fetch_one(&mut *tx)
                .await;

            match inserted {
                Ok(id) => {
                    tx.commit().await?;
                    return Ok(UrlRecord {
                        id,
                        key,
                        secret_key,
                        target_url: target_url.to_string(),
                        is_active: true,
                        clicks: 0,
                        created_at,
                    });
                }
                Err(sqlx::Error::Database(e)) if e.is_unique_violation() => continue,
                Err(e) => return Err(e.into()),
            }
        }

        Err(anyhow!(
            "Failed to allocate a unique short key after {} attempts",
            MAX_KEY_ATTEMPTS
        ))
    }

    async fn find_active_by_key(&self, key: &str) -> Result<Option<UrlRecord>> {
        let row: Option<UrlRow> = sqlx::query_as(FIND_ACTIVE_BY_KEY_QUERY)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(record_from_row))
    }

    async fn find_active_by_secret_key(&self, secret_key: &str) -> Result<Option<UrlRecord>> {
        let row: Option<UrlRow> = sqlx::query_as(FIND_ACTIVE_BY_SECRET_KEY_QUERY)
            .bind(secret_key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(record_from_row))
    }

    async fn register_click(&self, key: &str) -> Result<()> {
        let mut tx = self.session().await?;
        sqlx::query(REGISTER_CLICK_QUERY)
            .bind(key)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn deactivate_by_secret_key(&self, secret_key: &str) -> Result<Option<UrlRecord>> {
        let mut tx = self.session().await?;

        let row: Option<UrlRow> = sqlx::query_as(FIND_ACTIVE_BY_SECRET_KEY_QUERY)
            .bind(secret_key)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };

        sqlx::query(DEACTIVATE_QUERY)
            .bind(secret_key)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let mut record = record_from_row(row);
        record.is_active = false;
        Ok(Some(record))
    }
}
