pub mod banner;
pub mod config;
pub mod cookies;
pub mod errors;
pub mod events;
pub mod gate;
pub mod loader;
pub mod prefs;
pub mod signals;
pub mod storage;
pub mod store;

pub use banner::{BannerController, BannerState, BannerUi};
pub use config::ConsentConfig;
pub use errors::ConsentError;
pub use events::{ConsentEvent, EventQueue, EventQueueHandle};
pub use gate::{ApplicationGate, ConsentSignalReceiver};
pub use loader::{DocumentHost, ResourceLoader, ResourceTag};
pub use prefs::{ConsentDecision, DecisionSource};
pub use signals::{translate, Signal, SignalChannels};
pub use store::PreferenceStore;
