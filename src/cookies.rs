//! Signal cookie types.
//!
//! The tag-manager runtime on the host page reads cookies, not the
//! persistence layer, so the preference store mirrors each consent category
//! into its own cookie. This module defines the serializable [`Cookie`]
//! record, the [`CookieJar`](jar::CookieJar) seam the store writes through,
//! and an in-memory jar.
//!
//! # Concurrency model
//! [`CookieJarHandle`] is `Arc<RwLock<dyn CookieJar + Send + Sync>>`: callers
//! take a read lock for queries and a write lock for mutations.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use time::format_description::well_known::Rfc2822;
use time::{Duration, OffsetDateTime};

/// Cookie jar seam and in-memory implementation.
pub mod jar;

pub use jar::{CookieJar, InMemoryCookieJar};

/// A handle to a type-erased cookie jar.
pub type CookieJarHandle = Arc<RwLock<dyn CookieJar + Send + Sync>>;

/// A cookie as written by the consent core.
///
/// Only the attributes the consent mirrors actually use are modeled; the
/// host's real cookie store applies whatever further policy it enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name (case-sensitive).
    pub name: String,

    /// Raw cookie value.
    pub value: String,

    /// Path scoping; the consent mirrors always use `"/"`.
    pub path: Option<String>,

    /// If `true`, cookie is sent only over HTTPS.
    pub secure: bool,

    /// Expiration timestamp (RFC 2822), if any. Session cookies have `None`.
    pub expires: Option<String>,

    /// Remaining lifetime in seconds. Zero or negative means "delete now".
    pub max_age: Option<i64>,

    /// SameSite policy (`"Strict"`, `"Lax"`, or `"None"`).
    pub same_site: Option<String>,
}

impl Cookie {
    /// Builds a cookie that expires `days` from now.
    pub fn expiring(name: &str, value: &str, days: i64) -> Self {
        let expires_at = OffsetDateTime::now_utc() + Duration::days(days);
        Self {
            name: name.to_string(),
            value: value.to_string(),
            path: Some("/".to_string()),
            secure: true,
            expires: expires_at.format(&Rfc2822).ok(),
            max_age: Some(days * 24 * 60 * 60),
            same_site: Some("Lax".to_string()),
        }
    }

    /// Builds an already-expired cookie, which a conforming cookie store
    /// interprets as deletion of any cookie with the same name.
    pub fn expired(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            path: Some("/".to_string()),
            secure: true,
            expires: OffsetDateTime::UNIX_EPOCH.format(&Rfc2822).ok(),
            max_age: Some(0),
            same_site: Some("Lax".to_string()),
        }
    }

    /// True when this cookie's remaining lifetime is already spent.
    pub fn is_expired(&self) -> bool {
        matches!(self.max_age, Some(age) if age <= 0)
    }
}
