//! Consent notification events and the shared event queue.
//!
//! Every applied decision appends one structured `consent_update` event to a
//! process-wide queue (the tag-manager data layer on a real page). The core
//! only appends; consumers either poll a snapshot or subscribe for pushes.

use crate::prefs::{ConsentDecision, DecisionSource};
use crate::signals::SignalChannels;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Buffered events per subscriber before lagging kicks in.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// A handle for receiving consent event notifications.
pub type Subscription = broadcast::Receiver<ConsentEvent>;

/// A handle to the shared event queue.
pub type EventQueueHandle = Arc<EventQueue>;

/// Category flags as exposed to event consumers. `essential` is always true;
/// it exists in the schema because consumers expect the full category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentCategories {
    pub essential: bool,
    pub statistics: bool,
    pub marketing: bool,
}

/// The structured notification appended on every applied decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentEvent {
    /// Event discriminator, always `"consent_update"`.
    pub event: String,
    pub consent_categories: ConsentCategories,
    pub consent_mode: SignalChannels,
    pub consent_source: DecisionSource,
}

impl ConsentEvent {
    pub fn update(
        decision: ConsentDecision,
        channels: SignalChannels,
        source: DecisionSource,
    ) -> Self {
        Self {
            event: "consent_update".to_string(),
            consent_categories: ConsentCategories {
                essential: true,
                statistics: decision.statistics,
                marketing: decision.marketing,
            },
            consent_mode: channels,
            consent_source: source,
        }
    }
}

/// Append-only, process-wide event queue.
///
/// Single-writer from the page's event loop; appends are also published on a
/// broadcast channel for push consumers. Publishing to zero receivers is
/// fine and ignored.
pub struct EventQueue {
    events: Mutex<Vec<ConsentEvent>>,
    tx: broadcast::Sender<ConsentEvent>,
}

impl Default for EventQueue {
    fn default() -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_CHANNEL_CAPACITY);
        Self {
            events: Mutex::new(Vec::new()),
            tx,
        }
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event and notifies subscribers.
    pub fn push(&self, ev: ConsentEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(ev.clone());
        }
        // send() fails only when there are 0 receivers; nobody listening is fine.
        let _ = self.tx.send(ev);
    }

    /// A copy of all events appended so far, in order.
    pub fn snapshot(&self) -> Vec<ConsentEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn subscribe(&self) -> Subscription {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::translate;

    fn ev(statistics: bool, marketing: bool, source: DecisionSource) -> ConsentEvent {
        let d = ConsentDecision { statistics, marketing };
        ConsentEvent::update(d, translate(d), source)
    }

    #[test]
    fn queue_appends_in_order() {
        let queue = EventQueue::new();
        assert!(queue.is_empty());

        queue.push(ev(false, false, DecisionSource::DeclineAll));
        queue.push(ev(true, true, DecisionSource::AcceptAll));

        let events = queue.snapshot();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].consent_source, DecisionSource::DeclineAll);
        assert_eq!(events[1].consent_source, DecisionSource::AcceptAll);
    }

    #[test]
    fn push_without_subscribers_does_not_fail() {
        let queue = EventQueue::new();
        queue.push(ev(true, false, DecisionSource::Restore));
        assert_eq!(queue.len(), 1);
    }

    #[tokio::test]
    async fn subscribers_receive_pushed_events() {
        let queue = EventQueue::new();
        let mut sub = queue.subscribe();

        queue.push(ev(false, true, DecisionSource::AcceptSelection));

        let received = sub.recv().await.unwrap();
        assert_eq!(received.consent_source, DecisionSource::AcceptSelection);
        assert!(received.consent_categories.marketing);
    }

    #[test]
    fn event_json_matches_data_layer_schema() {
        let e = ev(true, false, DecisionSource::AcceptSelection);
        let json = serde_json::to_value(&e).unwrap();

        assert_eq!(json["event"], "consent_update");
        assert_eq!(json["consent_categories"]["essential"], true);
        assert_eq!(json["consent_categories"]["statistics"], true);
        assert_eq!(json["consent_categories"]["marketing"], false);
        assert_eq!(json["consent_mode"]["analytics_storage"], "granted");
        assert_eq!(json["consent_mode"]["ad_storage"], "denied");
        assert_eq!(json["consent_source"], "accept_selection");
    }

    #[test]
    fn essential_category_is_always_true() {
        let e = ev(false, false, DecisionSource::DeclineAll);
        assert!(e.consent_categories.essential);
    }
}
