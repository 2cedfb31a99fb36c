use crate::loader::ResourceTag;
use std::time::Duration;
use url::Url;

/// Attributes stamped onto every signal cookie the store mirrors.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub max_age_days: i64,
    pub path: String,
    pub same_site: String,
    pub secure: bool,
}

/// DOM element identifiers the banner and loader interact with.
///
/// Every element is optional at runtime; a missing element is skipped, never
/// an error.
#[derive(Debug, Clone)]
pub struct ElementIds {
    pub banner: String,
    pub toggle_statistics: String,
    pub toggle_marketing: String,
    pub btn_accept_all: String,
    pub btn_accept_selection: String,
    pub btn_decline_all: String,
    pub placeholder: String,
    pub widget: String,
}

#[derive(Debug, Clone)]
pub struct ConsentConfig {
    /// Storage key holding the serialized decision blob.
    pub prefs_key: String,
    /// Storage key holding the "a decision exists" marker.
    pub set_marker_key: String,
    /// Literal value stored under `set_marker_key`.
    pub set_marker_value: String,

    /// Signal cookie mirroring the marketing category.
    pub marketing_cookie: String,
    /// Signal cookie mirroring the statistics category.
    pub statistics_cookie: String,
    pub cookie: CookieConfig,

    pub elements: ElementIds,

    /// External resources injected once marketing consent is granted.
    pub marketing_resources: Vec<ResourceTag>,

    /// Bounded-retry budget for the third-party widget runtime.
    pub widget_init_attempts: u32,
    pub widget_init_delay: Duration,
}

impl Default for ConsentConfig {
    fn default() -> Self {
        let u = |s: &str| Url::parse(s).expect("valid resource URL");

        Self {
            prefs_key: "gp_consent_prefs".to_string(),
            set_marker_key: "gp_consent_set".to_string(),
            set_marker_value: "true".to_string(),

            marketing_cookie: "consent_marketing".to_string(),
            statistics_cookie: "consent_statistics".to_string(),
            cookie: CookieConfig {
                max_age_days: 180,
                path: "/".to_string(),
                same_site: "Lax".to_string(),
                secure: true,
            },

            elements: ElementIds {
                banner: "consent-banner".to_string(),
                toggle_statistics: "toggle-statistics".to_string(),
                toggle_marketing: "toggle-marketing".to_string(),
                btn_accept_all: "btn-accept-all".to_string(),
                btn_accept_selection: "btn-accept-selection".to_string(),
                btn_decline_all: "btn-decline-all".to_string(),
                placeholder: "reviews-placeholder".to_string(),
                widget: "reviews-widget".to_string(),
            },

            marketing_resources: vec![
                ResourceTag::Script {
                    id: "elfsight-script".to_string(),
                    url: u("https://static.elfsight.com/platform/platform.js"),
                    defer: true,
                },
                ResourceTag::Module {
                    id: "material-filled-button".to_string(),
                    url: u("https://esm.run/@material/web/button/filled-button.js"),
                },
                ResourceTag::Module {
                    id: "material-icon".to_string(),
                    url: u("https://esm.run/@material/web/icon/icon.js"),
                },
                ResourceTag::Module {
                    id: "material-icon-button".to_string(),
                    url: u("https://esm.run/@material/web/iconbutton/icon-button.js"),
                },
                ResourceTag::Preconnect {
                    id: "fonts-preconnect".to_string(),
                    url: u("https://fonts.googleapis.com"),
                    crossorigin: false,
                },
                ResourceTag::Preconnect {
                    id: "gstatic-preconnect".to_string(),
                    url: u("https://fonts.gstatic.com"),
                    crossorigin: true,
                },
                ResourceTag::Stylesheet {
                    id: "google-fonts-dynamic".to_string(),
                    url: u("https://fonts.googleapis.com/css2?family=Inter:wght@300;400;600;700&family=Merriweather:wght@400;700&display=swap"),
                },
                ResourceTag::Stylesheet {
                    id: "google-icons-dynamic".to_string(),
                    url: u("https://fonts.googleapis.com/icon?family=Material+Icons"),
                },
            ],

            widget_init_attempts: 20,
            widget_init_delay: Duration::from_millis(150),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_site_conventions() {
        let cfg = ConsentConfig::default();
        assert_eq!(cfg.prefs_key, "gp_consent_prefs");
        assert_eq!(cfg.set_marker_key, "gp_consent_set");
        assert_eq!(cfg.marketing_cookie, "consent_marketing");
        assert_eq!(cfg.statistics_cookie, "consent_statistics");
        assert_eq!(cfg.cookie.max_age_days, 180);
        assert_eq!(cfg.cookie.path, "/");
        assert_eq!(cfg.cookie.same_site, "Lax");
        assert!(cfg.cookie.secure);
        assert_eq!(cfg.widget_init_attempts, 20);
    }

    #[test]
    fn default_manifest_ids_are_unique() {
        let cfg = ConsentConfig::default();
        let mut ids: Vec<&str> = cfg.marketing_resources.iter().map(|t| t.id()).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
