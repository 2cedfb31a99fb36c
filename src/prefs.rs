//! Consent decision types.
//!
//! A [`ConsentDecision`] is the only entity this crate persists. The essential
//! category is implicit and always granted, so it is never stored — it cannot
//! be refused.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A user's consent decision over the two refusable categories.
///
/// Defaults to both categories denied. When no prior decision exists or the
/// stored blob is corrupted, callers fall back to this default rather than
/// assuming any consent (deny-by-default).
///
/// A decision is immutable once applied to a page load; a new decision fully
/// replaces the old one, there is no partial merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentDecision {
    /// Consent for analytics/statistics collection.
    #[serde(default)]
    pub statistics: bool,

    /// Consent for marketing/advertising integrations.
    #[serde(default)]
    pub marketing: bool,
}

impl ConsentDecision {
    /// Everything granted. Constructed by the accept-all banner action.
    pub fn accept_all() -> Self {
        Self { statistics: true, marketing: true }
    }

    /// Everything denied. Constructed by the decline-all banner action, and
    /// also the fallback when storage yields nothing usable.
    pub fn decline_all() -> Self {
        Self::default()
    }
}

/// Where a decision came from when it was applied.
///
/// Carried into the `consent_update` event so downstream consumers can tell a
/// page-load restore apart from a fresh user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    /// Re-applied on page load from a previously persisted decision.
    Restore,
    /// User clicked "accept all".
    AcceptAll,
    /// User saved the current toggle selection.
    AcceptSelection,
    /// User declined everything.
    DeclineAll,
}

impl Display for DecisionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecisionSource::Restore => write!(f, "restore"),
            DecisionSource::AcceptAll => write!(f, "accept_all"),
            DecisionSource::AcceptSelection => write!(f, "accept_selection"),
            DecisionSource::DeclineAll => write!(f, "decline_all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_denies_both_categories() {
        let d = ConsentDecision::default();
        assert!(!d.statistics);
        assert!(!d.marketing);
        assert_eq!(d, ConsentDecision::decline_all());
    }

    #[test]
    fn accept_all_grants_both_categories() {
        let d = ConsentDecision::accept_all();
        assert!(d.statistics);
        assert!(d.marketing);
    }

    #[test]
    fn decision_json_round_trip() {
        let d = ConsentDecision { statistics: true, marketing: false };
        let blob = serde_json::to_string(&d).unwrap();
        let back: ConsentDecision = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn missing_fields_deserialize_as_denied() {
        // An empty object is what the original banner stores for "{}" — both
        // categories must come back denied, not error out.
        let d: ConsentDecision = serde_json::from_str("{}").unwrap();
        assert_eq!(d, ConsentDecision::default());

        let d: ConsentDecision = serde_json::from_str(r#"{"marketing":true}"#).unwrap();
        assert!(d.marketing);
        assert!(!d.statistics);
    }

    #[test]
    fn source_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&DecisionSource::AcceptSelection).unwrap(), "\"accept_selection\"");
        assert_eq!(DecisionSource::DeclineAll.to_string(), "decline_all");
        assert_eq!(DecisionSource::Restore.to_string(), "restore");
    }
}
