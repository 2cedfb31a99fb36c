//! Preference persistence service.
//!
//! [`PreferenceStore`] exclusively owns the persisted decision record: the
//! serialized decision blob plus a separate "decision exists" marker. The
//! marker is what distinguishes "never decided" from an explicit decline —
//! both look like "no preferences set" otherwise.
//!
//! On every save the decision is additionally mirrored into two signal
//! cookies, because the tag-manager runtime reads cookies rather than the
//! persistence layer; the two must never diverge.
//!
//! All writes are best-effort. Consent capture must never throw and block
//! the page, so storage and cookie failures are logged and swallowed.

use crate::config::ConsentConfig;
use crate::cookies::{Cookie, CookieJar, CookieJarHandle};
use crate::errors::ConsentError;
use crate::prefs::ConsentDecision;
use crate::signals::Signal;
use crate::storage::{StorageArea, StorageAreaHandle};
use std::sync::Arc;

pub struct PreferenceStore {
    area: StorageAreaHandle,
    jar: CookieJarHandle,
    config: Arc<ConsentConfig>,
}

impl PreferenceStore {
    pub fn new(area: StorageAreaHandle, jar: CookieJarHandle, config: Arc<ConsentConfig>) -> Self {
        Self { area, jar, config }
    }

    /// Reads the persisted decision. `None` means "not set": no marker, no
    /// readable storage, or an unparseable blob. Callers must treat `None`
    /// as deny-by-default, not as an explicit decline.
    pub fn load(&self) -> Option<ConsentDecision> {
        match self.load_decision() {
            Ok(decision) => Some(decision),
            Err(e) => {
                log::debug!("no usable consent decision: {e}");
                None
            }
        }
    }

    fn load_decision(&self) -> Result<ConsentDecision, ConsentError> {
        let marker = self
            .area
            .get_item(&self.config.set_marker_key)
            .ok_or_else(|| ConsentError::StorageUnavailable("decision marker absent".into()))?;
        if marker != self.config.set_marker_value {
            return Err(ConsentError::StorageUnavailable(format!(
                "unexpected marker value {marker:?}"
            )));
        }

        let blob = self
            .area
            .get_item(&self.config.prefs_key)
            .ok_or_else(|| ConsentError::StorageUnavailable("preference blob absent".into()))?;

        serde_json::from_str(&blob).map_err(|e| ConsentError::ParseFailure(e.to_string()))
    }

    /// Persists `decision` and mirrors both categories into signal cookies.
    /// Best-effort: failures are swallowed so capture never blocks the page.
    pub fn save(&self, decision: ConsentDecision) {
        match serde_json::to_string(&decision) {
            Ok(blob) => {
                if let Err(e) = self.area.set_item(&self.config.prefs_key, &blob) {
                    log::warn!("failed to persist consent preferences: {e}");
                }
                if let Err(e) = self
                    .area
                    .set_item(&self.config.set_marker_key, &self.config.set_marker_value)
                {
                    log::warn!("failed to persist consent marker: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize consent preferences: {e}"),
        }

        self.set_signal_cookie(&self.config.marketing_cookie, decision.marketing);
        self.set_signal_cookie(&self.config.statistics_cookie, decision.statistics);
    }

    /// Deletes both mirror cookies by writing already-expired replacements.
    /// Used when revoking consent outside the normal `save` path.
    pub fn clear_signal_cookies(&self) {
        self.write_cookie(Cookie::expired(&self.config.marketing_cookie));
        self.write_cookie(Cookie::expired(&self.config.statistics_cookie));
    }

    fn set_signal_cookie(&self, name: &str, granted: bool) {
        let signal = if granted { Signal::Granted } else { Signal::Denied };
        let cfg = &self.config.cookie;

        let mut cookie = Cookie::expiring(name, &signal.to_string(), cfg.max_age_days);
        cookie.path = Some(cfg.path.clone());
        cookie.same_site = Some(cfg.same_site.clone());
        cookie.secure = cfg.secure;

        self.write_cookie(cookie);
    }

    fn write_cookie(&self, cookie: Cookie) {
        match self.jar.write() {
            Ok(mut jar) => jar.set_cookie(cookie),
            Err(e) => log::warn!("failed to write signal cookie: {e}"),
        }
    }
}
