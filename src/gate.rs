//! Consent application gate.
//!
//! [`ApplicationGate::apply`] turns a decision into its observable effects:
//! signal forwarding, event emission, and persistence — in that strict order,
//! so an observer reacting to the event always sees the signals already
//! dispatched. Persistence completion is not guaranteed by the time the event
//! fires; storage is best-effort per the preference store.

use crate::events::{ConsentEvent, EventQueueHandle};
use crate::prefs::{ConsentDecision, DecisionSource};
use crate::signals::{translate, SignalChannels};
use crate::store::PreferenceStore;
use std::sync::Arc;

/// Optional external collaborator receiving the translated signal channels
/// (the tag manager's consent API on a real page). Absence is tolerated.
pub trait ConsentSignalReceiver: Send + Sync {
    fn update(&self, channels: &SignalChannels);
}

pub struct ApplicationGate {
    store: Arc<PreferenceStore>,
    queue: EventQueueHandle,
    receiver: Option<Arc<dyn ConsentSignalReceiver>>,
}

impl ApplicationGate {
    pub fn new(
        store: Arc<PreferenceStore>,
        queue: EventQueueHandle,
        receiver: Option<Arc<dyn ConsentSignalReceiver>>,
    ) -> Self {
        Self { store, queue, receiver }
    }

    /// Applies `decision`: translate, forward signals, emit the
    /// `consent_update` event, persist.
    pub fn apply(&self, decision: ConsentDecision, source: DecisionSource) {
        let channels = translate(decision);

        // a missing receiver is not an error, the call is simply skipped
        if let Some(receiver) = &self.receiver {
            receiver.update(&channels);
        }

        self.queue.push(ConsentEvent::update(decision, channels, source));

        self.store.save(decision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConsentConfig;
    use crate::cookies::{CookieJar, CookieJarHandle, InMemoryCookieJar};
    use crate::events::EventQueue;
    use crate::signals::Signal;
    use crate::storage::{InMemoryStorageArea, StorageAreaHandle};
    use std::sync::{Mutex, RwLock};

    #[derive(Default)]
    struct RecordingReceiver {
        updates: Mutex<Vec<SignalChannels>>,
    }

    impl ConsentSignalReceiver for RecordingReceiver {
        fn update(&self, channels: &SignalChannels) {
            self.updates.lock().unwrap().push(*channels);
        }
    }

    struct Fixture {
        gate: ApplicationGate,
        store: Arc<PreferenceStore>,
        queue: EventQueueHandle,
        jar: CookieJarHandle,
        receiver: Arc<RecordingReceiver>,
    }

    fn fixture(with_receiver: bool) -> Fixture {
        let area: StorageAreaHandle = Arc::new(InMemoryStorageArea::new());
        let jar: CookieJarHandle = Arc::new(RwLock::new(InMemoryCookieJar::new()));
        let store = Arc::new(PreferenceStore::new(
            area,
            jar.clone(),
            Arc::new(ConsentConfig::default()),
        ));
        let queue: EventQueueHandle = Arc::new(EventQueue::new());
        let receiver = Arc::new(RecordingReceiver::default());

        let gate = ApplicationGate::new(
            store.clone(),
            queue.clone(),
            with_receiver.then(|| receiver.clone() as Arc<dyn ConsentSignalReceiver>),
        );

        Fixture { gate, store, queue, jar, receiver }
    }

    #[test]
    fn apply_forwards_emits_and_persists() {
        let f = fixture(true);
        let d = ConsentDecision { statistics: true, marketing: false };

        f.gate.apply(d, DecisionSource::AcceptSelection);

        // receiver got the translated channels
        let updates = f.receiver.updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].analytics_storage, Signal::Granted);
        assert_eq!(updates[0].ad_storage, Signal::Denied);

        // one event with the right schema fields
        let events = f.queue.snapshot();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].consent_source, DecisionSource::AcceptSelection);
        assert!(events[0].consent_categories.essential);
        assert!(events[0].consent_categories.statistics);
        assert!(!events[0].consent_categories.marketing);

        // persisted and mirrored
        assert_eq!(f.store.load(), Some(d));
        let jar = f.jar.read().unwrap();
        assert_eq!(jar.get("consent_statistics").as_deref(), Some("granted"));
        assert_eq!(jar.get("consent_marketing").as_deref(), Some("denied"));
    }

    #[test]
    fn apply_without_receiver_is_not_an_error() {
        let f = fixture(false);
        f.gate.apply(ConsentDecision::accept_all(), DecisionSource::AcceptAll);

        assert_eq!(f.queue.len(), 1);
        assert_eq!(f.store.load(), Some(ConsentDecision::accept_all()));
        assert!(f.receiver.updates.lock().unwrap().is_empty());
    }

    #[test]
    fn each_apply_appends_one_event() {
        let f = fixture(true);
        f.gate.apply(ConsentDecision::decline_all(), DecisionSource::DeclineAll);
        f.gate.apply(ConsentDecision::accept_all(), DecisionSource::AcceptAll);

        let events = f.queue.snapshot();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].consent_source, DecisionSource::DeclineAll);
        assert_eq!(events[1].consent_source, DecisionSource::AcceptAll);

        // last decision fully replaces the previous one
        assert_eq!(f.store.load(), Some(ConsentDecision::accept_all()));
    }
}
