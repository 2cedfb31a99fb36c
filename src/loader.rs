//! Conditional external resource loading.
//!
//! Marketing-only resources (the reviews widget script, ES modules, font
//! links) are injected at most once per page lifetime, and only when the
//! decision grants the marketing category. Injection is double-guarded:
//! an atomic already-loaded flag stops re-entrancy, and every tag carries a
//! stable element id checked against the document before injection, so a
//! duplicate tag never appears even if the flag were somehow bypassed.
//!
//! After injecting the widget script the loader polls for the third-party
//! widget runtime with a bounded retry budget and initializes it as soon as
//! it appears. A runtime that never shows up is abandoned silently; a missing
//! third-party integration is not a fatal error.

use crate::config::ConsentConfig;
use crate::prefs::ConsentDecision;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// A handle to the document the loader injects into.
pub type DocumentHostHandle = Arc<dyn DocumentHost>;

/// An external resource to inject, addressed by a stable element id used as
/// the duplicate-injection guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceTag {
    /// A classic external `<script>` tag.
    Script { id: String, url: Url, defer: bool },
    /// An ES-module `<script type="module">` tag.
    Module { id: String, url: Url },
    /// A `<link rel="stylesheet">` tag.
    Stylesheet { id: String, url: Url },
    /// A `<link rel="preconnect">` tag.
    Preconnect { id: String, url: Url, crossorigin: bool },
}

impl ResourceTag {
    /// The stable element id guarding this tag against duplicate injection.
    pub fn id(&self) -> &str {
        match self {
            ResourceTag::Script { id, .. }
            | ResourceTag::Module { id, .. }
            | ResourceTag::Stylesheet { id, .. }
            | ResourceTag::Preconnect { id, .. } => id,
        }
    }

    pub fn url(&self) -> &Url {
        match self {
            ResourceTag::Script { url, .. }
            | ResourceTag::Module { url, .. }
            | ResourceTag::Stylesheet { url, .. }
            | ResourceTag::Preconnect { url, .. } => url,
        }
    }
}

/// The document surface the loader manipulates.
///
/// Implementations bridge to the real page. Every operation tolerates absent
/// elements and an absent widget runtime; nothing here may fail the caller.
pub trait DocumentHost: Send + Sync {
    /// True when an element with `id` is already present.
    fn element_exists(&self, id: &str) -> bool;

    /// Shows or hides the element with `id`; no-op when absent.
    fn set_visible(&self, id: &str, visible: bool);

    /// Appends the given tag to the document.
    fn inject(&self, tag: &ResourceTag);

    /// True when the third-party widget runtime is loaded and callable.
    fn widget_runtime_ready(&self) -> bool;

    /// Invokes the widget runtime's init entry point.
    fn init_widget_runtime(&self);
}

/// Gate deciding what external resources get loaded for a given decision.
pub struct ResourceLoader {
    host: DocumentHostHandle,
    config: Arc<ConsentConfig>,
    /// Page-lifetime "marketing resources already injected" flag. Reset only
    /// by navigation, i.e. by dropping the loader.
    marketing_loaded: AtomicBool,
}

impl ResourceLoader {
    pub fn new(host: DocumentHostHandle, config: Arc<ConsentConfig>) -> Self {
        Self {
            host,
            config,
            marketing_loaded: AtomicBool::new(false),
        }
    }

    /// Loads what `decision` permits. Idempotent per page lifetime: repeated
    /// calls (restore plus a button click in rapid succession) inject each
    /// resource at most once.
    pub async fn load_external_by_consent(&self, decision: ConsentDecision) {
        // the flag flips before any injection to stop re-entrancy
        if decision.marketing && !self.marketing_loaded.swap(true, Ordering::SeqCst) {
            self.inject_marketing_resources();

            tokio::spawn(poll_widget_runtime(
                self.host.clone(),
                self.config.widget_init_attempts,
                self.config.widget_init_delay,
            ));
        }

        if decision.statistics {
            // Extension point: no statistics-only resources are mandated
            // beyond the signal already dispatched by the application gate.
        }
    }

    /// True once marketing resources have been injected this page lifetime.
    pub fn marketing_loaded(&self) -> bool {
        self.marketing_loaded.load(Ordering::SeqCst)
    }

    fn inject_marketing_resources(&self) {
        let elements = &self.config.elements;
        self.host.set_visible(&elements.placeholder, false);
        self.host.set_visible(&elements.widget, true);

        for tag in &self.config.marketing_resources {
            if self.host.element_exists(tag.id()) {
                log::debug!("skipping already present resource tag {}", tag.id());
                continue;
            }
            self.host.inject(tag);
        }
    }
}

/// Polls for the widget runtime with a fixed retry budget, initializing it as
/// soon as it becomes available. Gives up silently when the budget runs out.
pub async fn poll_widget_runtime(host: DocumentHostHandle, attempts: u32, delay: Duration) {
    for attempt in 0..attempts {
        if host.widget_runtime_ready() {
            host.init_widget_runtime();
            return;
        }
        if attempt + 1 < attempts {
            tokio::time::sleep(delay).await;
        }
    }
    log::debug!("widget runtime not ready after {attempts} attempts; giving up");
}
