use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::{ClientStore, CookieAttributes};

/// A mutation observed by an [`InMemoryClientStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Set {
        key: String,
        value: String,
        attributes: Option<CookieAttributes>,
    },
    Remove {
        key: String,
        attributes: Option<CookieAttributes>,
    },
}

/// In-memory client store (no persistence, no expiry).
///
/// Every `set` and `remove` is journaled in call order and every `get` is
/// counted, which makes the store usable as a test double for hosts.
#[derive(Debug, Default)]
pub struct InMemoryClientStore {
    entries: RefCell<HashMap<String, String>>,
    journal: RefCell<Vec<StoreCall>>,
    reads: Cell<usize>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `cookies` (raw text), without journaling them.
    pub fn with_cookies<I, K, V>(cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (k, v) in cookies {
            store.insert_raw(k, v);
        }
        store
    }

    /// Writes raw text behind the hooks' back, as another tab or a response would.
    pub fn insert_raw<K: Into<String>, V: Into<String>>(&self, key: K, value: V) {
        self.entries.borrow_mut().insert(key.into(), value.into());
    }

    /// Mutations seen so far, oldest first.
    pub fn journal(&self) -> Vec<StoreCall> {
        self.journal.borrow().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ClientStore for InMemoryClientStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str, attributes: Option<&CookieAttributes>) -> anyhow::Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        self.journal.borrow_mut().push(StoreCall::Set {
            key: key.to_string(),
            value: value.to_string(),
            attributes: attributes.cloned(),
        });
        Ok(())
    }

    fn remove(&self, key: &str, attributes: Option<&CookieAttributes>) -> anyhow::Result<()> {
        self.entries.borrow_mut().remove(key);
        self.journal.borrow_mut().push(StoreCall::Remove {
            key: key.to_string(),
            attributes: attributes.cloned(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_contract() {
        let store = InMemoryClientStore::new();
        assert!(store.is_empty());
        assert!(store.get("missing").unwrap().is_none());

        store.set("a", "1", None).unwrap();
        store.set("b", "2", None).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        // overwrite keeps len
        store.set("a", "ONE", None).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("a").unwrap().as_deref(), Some("ONE"));

        store.remove("b", None).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.get("b").unwrap().is_none());
        assert_eq!(store.reads(), 4);
    }

    #[test]
    fn journal_records_mutations_with_attributes() {
        let store = InMemoryClientStore::with_cookies([("seeded", "\"x\"")]);
        let attrs = CookieAttributes::new().path("/");

        store.set("k", "\"v\"", Some(&attrs)).unwrap();
        store.remove("k", None).unwrap();

        assert_eq!(
            store.journal(),
            vec![
                StoreCall::Set {
                    key: "k".into(),
                    value: "\"v\"".into(),
                    attributes: Some(attrs),
                },
                StoreCall::Remove { key: "k".into(), attributes: None },
            ]
        );
        assert_eq!(store.get("seeded").unwrap().as_deref(), Some("\"x\""));
    }
}
