//! Banner orchestration.
//!
//! [`BannerController`] wires the page together: on load it restores a
//! persisted decision through the application and loader gates (keeping the
//! banner hidden), or shows the banner and waits for one of the three user
//! actions. Restoring re-dispatches signals and re-creates the signal
//! cookies, so the system self-heals when the browser cleared cookies
//! independently of the persisted decision.

use crate::gate::ApplicationGate;
use crate::loader::ResourceLoader;
use crate::prefs::{ConsentDecision, DecisionSource};
use crate::store::PreferenceStore;
use std::sync::Arc;

/// Banner lifecycle. `Unknown` until [`BannerController::init`] has asked the
/// preference store for a decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BannerState {
    #[default]
    Unknown,
    /// A decision exists and has been applied; the banner stays closed.
    Hidden,
    /// No decision yet; the banner is interactive and awaiting one.
    Visible,
}

/// The banner's visual surface: visibility plus the two category toggles.
/// Implementations tolerate missing elements.
pub trait BannerUi: Send + Sync {
    fn show_banner(&self);
    fn hide_banner(&self);
    fn set_toggles(&self, decision: ConsentDecision);
    fn read_toggles(&self) -> ConsentDecision;
}

pub struct BannerController {
    state: BannerState,
    store: Arc<PreferenceStore>,
    gate: ApplicationGate,
    loader: ResourceLoader,
    ui: Arc<dyn BannerUi>,
}

impl BannerController {
    pub fn new(
        store: Arc<PreferenceStore>,
        gate: ApplicationGate,
        loader: ResourceLoader,
        ui: Arc<dyn BannerUi>,
    ) -> Self {
        Self {
            state: BannerState::Unknown,
            store,
            gate,
            loader,
            ui,
        }
    }

    pub fn state(&self) -> BannerState {
        self.state
    }

    /// Page-ready entry point: restore a stored decision or show the banner.
    pub async fn init(&mut self) {
        match self.store.load() {
            Some(decision) => {
                self.ui.set_toggles(decision);
                // re-applying restores signal cookies the browser may have
                // dropped since the decision was persisted
                self.gate.apply(decision, DecisionSource::Restore);
                self.loader.load_external_by_consent(decision).await;
                self.ui.hide_banner();
                self.state = BannerState::Hidden;
            }
            None => {
                self.ui.show_banner();
                self.state = BannerState::Visible;
            }
        }
    }

    /// User action: grant both categories.
    pub async fn accept_all(&mut self) {
        self.decide(ConsentDecision::accept_all(), DecisionSource::AcceptAll)
            .await;
    }

    /// User action: persist whatever the toggles currently say.
    pub async fn accept_selection(&mut self) {
        let decision = self.ui.read_toggles();
        self.decide(decision, DecisionSource::AcceptSelection).await;
    }

    /// User action: deny both categories.
    pub async fn decline_all(&mut self) {
        self.decide(ConsentDecision::decline_all(), DecisionSource::DeclineAll)
            .await;
    }

    /// Reopens the banner for changing preferences. Restores the toggles
    /// from the last persisted decision (defaults when none parses) and has
    /// no other side effect until a new decision action is taken.
    pub fn reopen(&mut self) {
        let decision = self.store.load().unwrap_or_default();
        self.ui.set_toggles(decision);
        self.ui.show_banner();
        self.state = BannerState::Visible;
    }

    async fn decide(&mut self, decision: ConsentDecision, source: DecisionSource) {
        self.gate.apply(decision, source);
        self.loader.load_external_by_consent(decision).await;
        self.ui.hide_banner();
        self.state = BannerState::Hidden;
    }
}
