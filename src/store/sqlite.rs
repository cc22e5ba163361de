//! SQLite-backed client store.
//!
//! `SqliteClientStore` keeps the cookies of one client in a single table. Like
//! the JSON store it caches nothing: every `get` is a query, so writes made by
//! another connection to the same database are visible immediately.
//!
//! Expiry instants are stored as unix seconds; expired rows are filtered out on
//! read and purged on the next write.
//!
//! ## Example
//! ```ignore
//! let store = SqliteClientStore::new("cookies.sqlite".into())?;
//! store.set("theme", "\"dark\"", Some(&CookieAttributes::new().expires(Expires::Days(365))))?;
//! ```

use std::path::PathBuf;

use anyhow::Context;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::rusqlite::{params, OptionalExtension};
use r2d2_sqlite::SqliteConnectionManager;
use time::OffsetDateTime;

use super::{ClientStore, CookieAttributes};

/// A SQLite-based client store that persists cookies across sessions.
pub struct SqliteClientStore {
    /// Connection pool for the database file
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl SqliteClientStore {
    /// Opens (or creates) the database at `path` and ensures the schema exists.
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        let manager = SqliteConnectionManager::file(&path);
        let pool = Pool::new(manager).context("Failed to create SQLite pool")?;

        let store = Self { pool, path };
        store
            .conn()?
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS cookies (
                    name TEXT PRIMARY KEY NOT NULL,
                    value TEXT NOT NULL,
                    attributes TEXT,
                    expires_at INTEGER
                );",
            )
            .context("Failed to create cookies table")?;

        Ok(store)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn conn(&self) -> anyhow::Result<PooledConnection<SqliteConnectionManager>> {
        self.pool.get().context("Failed to get DB connection")
    }

    fn lookup(&self, key: &str) -> anyhow::Result<Option<String>> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        self.conn()?
            .query_row(
                "SELECT value FROM cookies WHERE name = ?1 AND (expires_at IS NULL OR expires_at > ?2)",
                params![key, now],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read cookie {key:?}"))
    }

    fn purge_expired(&self, now: i64) -> anyhow::Result<()> {
        self.conn()?
            .execute("DELETE FROM cookies WHERE expires_at IS NOT NULL AND expires_at <= ?1", [now])
            .context("Failed to purge expired cookies")?;
        Ok(())
    }
}

impl ClientStore for SqliteClientStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.lookup(key)
    }

    fn set(&self, key: &str, value: &str, attributes: Option<&CookieAttributes>) -> anyhow::Result<()> {
        let now = OffsetDateTime::now_utc();
        let expires_at = attributes
            .and_then(|a| a.expires.as_ref())
            .map(|e| e.instant_from(now).unix_timestamp());
        let attributes = attributes
            .map(serde_json::to_string)
            .transpose()
            .context("Failed to serialize cookie attributes")?;

        self.purge_expired(now.unix_timestamp())?;
        self.conn()?
            .execute(
                "INSERT OR REPLACE INTO cookies (name, value, attributes, expires_at) VALUES (?1, ?2, ?3, ?4)",
                params![key, value, attributes, expires_at],
            )
            .with_context(|| format!("Failed to write cookie {key:?}"))?;
        Ok(())
    }

    fn remove(&self, key: &str, _attributes: Option<&CookieAttributes>) -> anyhow::Result<()> {
        self.conn()?
            .execute("DELETE FROM cookies WHERE name = ?1", [key])
            .with_context(|| format!("Failed to delete cookie {key:?}"))?;
        Ok(())
    }
}

impl std::fmt::Debug for SqliteClientStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteClientStore").field("path", &self.path).finish()
    }
}
