//! JSON-backed client store.
//!
//! `JsonClientStore` keeps every cookie of one client in a single JSON file.
//! There is no in-memory cache: each `get` reads the file and each mutation
//! reads, updates and rewrites it. Hosts that share the file between processes
//! therefore always observe the latest write.
//!
//! Relative expiries ([`Expires::Days`]) are resolved to an absolute instant at
//! write time; expired entries are reported as absent and dropped on the next
//! write.
//!
//! ### Example
//! ```ignore
//! let store = JsonClientStore::new("cookies.json".into())?;
//! store.set("theme", "\"dark\"", None)?;
//! ```
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::{ClientStore, CookieAttributes, Expires};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    attributes: Option<CookieAttributes>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
    expires_at: Option<OffsetDateTime>,
}

impl StoredCookie {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// On-disk representation of the store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ClientStoreFile {
    cookies: HashMap<String, StoredCookie>,
}

/// A file-based client store that persists cookies across sessions.
#[derive(Debug)]
pub struct JsonClientStore {
    path: PathBuf,
}

impl JsonClientStore {
    /// Opens the store at `path`, writing an empty file if none exists yet.
    pub fn new(path: PathBuf) -> anyhow::Result<Self> {
        let store = Self { path };
        if !store.path.exists() {
            store.save_file(&ClientStoreFile::default())?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn load_file(&self) -> anyhow::Result<ClientStoreFile> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cookie store file: {:?}", self.path))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cookie store file: {:?}", self.path))
    }

    fn save_file(&self, file: &ClientStoreFile) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(file).context("Failed to serialize cookies")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write cookie store file: {:?}", self.path))
    }

    fn update(&self, f: impl FnOnce(&mut ClientStoreFile)) -> anyhow::Result<()> {
        let mut file = self.load_file()?;
        let now = OffsetDateTime::now_utc();
        file.cookies.retain(|_, cookie| !cookie.is_expired(now));
        f(&mut file);
        self.save_file(&file)
    }
}

impl ClientStore for JsonClientStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let file = self.load_file()?;

        let now = OffsetDateTime::now_utc();
        Ok(file
            .cookies
            .get(key)
            .filter(|cookie| !cookie.is_expired(now))
            .map(|cookie| cookie.value.clone()))
    }

    fn set(&self, key: &str, value: &str, attributes: Option<&CookieAttributes>) -> anyhow::Result<()> {
        let expires_at = attributes
            .and_then(|a| a.expires.as_ref())
            .map(|e: &Expires| e.instant_from(OffsetDateTime::now_utc()));

        self.update(|file| {
            file.cookies.insert(
                key.to_string(),
                StoredCookie {
                    value: value.to_string(),
                    attributes: attributes.cloned(),
                    expires_at,
                },
            );
        })
    }

    fn remove(&self, key: &str, _attributes: Option<&CookieAttributes>) -> anyhow::Result<()> {
        self.update(|file| {
            file.cookies.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn store_in(dir: &tempfile::TempDir) -> JsonClientStore {
        JsonClientStore::new(dir.path().join("cookies.json")).unwrap()
    }

    #[test]
    fn new_writes_an_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert!(store.path().exists());
        assert!(store.get("anything").unwrap().is_none());
    }

    #[test]
    fn values_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        store_in(&dir).set("greeting", "\"hi\"", None).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.get("greeting").unwrap().as_deref(), Some("\"hi\""));

        reopened.remove("greeting", None).unwrap();
        assert!(store_in(&dir).get("greeting").unwrap().is_none());
    }

    #[test]
    fn reads_are_never_cached() {
        let dir = tempfile::tempdir().unwrap();
        let a = store_in(&dir);
        let b = store_in(&dir);

        a.set("k", "1", None).unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("1"));
        a.set("k", "2", None).unwrap();
        assert_eq!(b.get("k").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn expired_cookies_are_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let past = CookieAttributes::new().expires(Expires::At(datetime!(2000-01-01 0:00 UTC)));
        let future = CookieAttributes::new().expires(Expires::Days(30));

        store.set("old", "1", Some(&past)).unwrap();
        store.set("fresh", "2", Some(&future)).unwrap();

        assert!(store.get("old").unwrap().is_none());
        assert_eq!(store.get("fresh").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn corrupt_file_fails_reads_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "{ nope").unwrap();

        let err = store.get("k").unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse cookie store file"));
        assert!(store.set("k", "1", None).is_err());
    }

    #[test]
    fn missing_file_fails_reads() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::remove_file(store.path()).unwrap();

        assert!(store.get("k").is_err());
    }
}
