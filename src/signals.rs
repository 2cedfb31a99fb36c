//! Consent signal translation.
//!
//! Maps the two boolean consent categories onto the four fine-grained signal
//! channels a tag manager consumes. The whole algorithm is the table in
//! [`translate`]; there is no state and no side effect.

use crate::prefs::ConsentDecision;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A single consent signal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Granted,
    Denied,
}

impl Signal {
    fn from_bool(granted: bool) -> Self {
        if granted { Signal::Granted } else { Signal::Denied }
    }

    pub fn is_granted(self) -> bool {
        self == Signal::Granted
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Signal::Granted => write!(f, "granted"),
            Signal::Denied => write!(f, "denied"),
        }
    }
}

/// The four signal channels derived from a [`ConsentDecision`].
///
/// Derived, never persisted: recomputed on every apply so the channels can
/// never drift from the decision they were computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalChannels {
    pub ad_storage: Signal,
    pub ad_user_data: Signal,
    pub ad_personalization: Signal,
    pub analytics_storage: Signal,
}

/// Translates a decision into signal channels.
///
/// `marketing` grants the three ad channels, `statistics` grants
/// `analytics_storage`; every channel defaults to denied. Pure and total.
pub fn translate(decision: ConsentDecision) -> SignalChannels {
    SignalChannels {
        ad_storage: Signal::from_bool(decision.marketing),
        ad_user_data: Signal::from_bool(decision.marketing),
        ad_personalization: Signal::from_bool(decision.marketing),
        analytics_storage: Signal::from_bool(decision.statistics),
    }
}
