//! Cookie jar abstraction and a simple in-memory implementation.
//!
//! A jar represents the cookies of the page's origin as far as the consent
//! core is concerned. The core only ever writes its two signal cookies and
//! reads them back for inspection; matching rules, domains and eviction are
//! the host cookie store's business behind this seam.

use crate::cookies::Cookie;
use std::collections::HashMap;

/// Write/read access to the page's cookies.
///
/// Implementations bridge to the real cookie store of the embedding
/// environment. The in-memory implementation below mimics browser expiry
/// semantics: setting an already-expired cookie removes it.
pub trait CookieJar: Send + Sync {
    /// Stores `cookie`, replacing any cookie of the same name. A cookie whose
    /// lifetime is already spent must be treated as a deletion.
    fn set_cookie(&mut self, cookie: Cookie);

    /// Returns the value of the cookie named `name`, if present.
    fn get(&self, name: &str) -> Option<String>;

    /// All live cookies, for diagnostics and tests.
    fn cookies(&self) -> Vec<Cookie>;

    /// Removes all cookies from the jar.
    fn clear(&mut self);
}

/// In-memory cookie jar keyed by cookie name.
#[derive(Debug, Default)]
pub struct InMemoryCookieJar {
    entries: HashMap<String, Cookie>,
}

impl InMemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieJar for InMemoryCookieJar {
    fn set_cookie(&mut self, cookie: Cookie) {
        if cookie.is_expired() {
            self.entries.remove(&cookie.name);
        } else {
            self.entries.insert(cookie.name.clone(), cookie);
        }
    }

    fn get(&self, name: &str) -> Option<String> {
        self.entries.get(name).map(|c| c.value.clone())
    }

    fn cookies(&self) -> Vec<Cookie> {
        let mut v: Vec<Cookie> = self.entries.values().cloned().collect();
        v.sort_by(|a, b| a.name.cmp(&b.name));
        v
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
