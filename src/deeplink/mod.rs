//! Deep-link resolution and pending-navigation state machine
//!
//! Raw URL -> extract -> access-gate check -> deliver now or park in the
//! pending store -> ready edge drains -> navigate with bounded retries.

mod dispatcher;
mod extract;
mod pending;
mod readiness;

pub use dispatcher::{DeepLinkDispatcher, RETRY_DELAYS};
pub use extract::{extract, LinkIntent};
pub use pending::PendingStore;
pub use readiness::{ReadinessHandle, ReadinessMonitor, ReadinessState};
