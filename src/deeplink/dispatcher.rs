//! Deep-link dispatcher
//!
//! Orchestrates link handling end to end: both the cold-start initial URL
//! and live link events funnel into [`DeepLinkDispatcher::handle_url`],
//! which extracts an intent, elevates a first-time viewer to guest, and
//! either delivers immediately or parks the intent until the navigation
//! surface reports ready.
//!
//! Delivery is duplicate-safe: the pending store's claim/sequence
//! machinery guarantees at most one navigation per observed intent even
//! when the immediate path and the ready-edge drain race, and a newer link
//! supersedes any retries still in flight for an older one.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::auth::AccessGate;
use crate::navigation::{NavigationSurface, Route};

use super::extract::{extract, LinkIntent};
use super::pending::PendingStore;
use super::readiness::ReadinessHandle;

/// Fixed backoff slept after each failed navigation attempt. Three entries,
/// three total attempts; the surface's readiness signal is empirically
/// flaky, so the schedule leans long rather than tight.
pub const RETRY_DELAYS: [Duration; 3] = [
    Duration::from_millis(500),
    Duration::from_millis(1500),
    Duration::from_millis(2000),
];

/// Sole writer to the pending store and sole invoker of navigation.
pub struct DeepLinkDispatcher<S> {
    gate: Arc<AccessGate>,
    surface: Arc<S>,
    readiness: ReadinessHandle,
    store: PendingStore,
}

impl<S: NavigationSurface + 'static> DeepLinkDispatcher<S> {
    pub fn new(gate: Arc<AccessGate>, surface: Arc<S>, readiness: ReadinessHandle) -> Arc<Self> {
        Arc::new(Self {
            gate,
            surface,
            readiness,
            store: PendingStore::new(),
        })
    }

    pub fn store(&self) -> &PendingStore {
        &self.store
    }

    /// Handle one raw URL from either link channel.
    ///
    /// Unrecognized URLs are dropped silently; the OS routes plenty of
    /// non-app traffic through the same observation channel.
    pub fn handle_url(self: &Arc<Self>, raw_url: &str) {
        let Some(intent) = extract(raw_url) else {
            debug!("[DeepLink] Ignoring unrecognized URL: {}", raw_url);
            return;
        };
        info!(
            "[DeepLink] Link received for user {}: {}",
            intent.target_user_id, raw_url
        );

        // A shared profile must open without hitting the login wall
        self.gate.auto_elevate_if_unseen();

        let seq = self.store.set(intent.clone());
        if self.readiness.is_ready() {
            let dispatcher = Arc::clone(self);
            tokio::spawn(dispatcher.deliver(intent, seq));
        } else {
            debug!(
                "[DeepLink] Surface not ready, holding intent for user {}",
                intent.target_user_id
            );
        }
    }

    /// Spawn the task that drains the pending store once the surface
    /// becomes ready. The edge fires at most once per session; a store
    /// write after the edge takes the immediate path instead.
    pub fn spawn_ready_drain(self: &Arc<Self>) -> JoinHandle<()> {
        let dispatcher = Arc::clone(self);
        let mut readiness = self.readiness.clone();
        tokio::spawn(async move {
            readiness.became_ready().await;
            if let Some((intent, seq)) = dispatcher.store.peek_with_seq() {
                Arc::clone(&dispatcher).deliver(intent, seq).await;
            }
        })
    }

    /// Run the dispatcher for the process lifetime: consume the cold-start
    /// URL (if any), then live link events until the channel closes.
    pub async fn run(
        self: Arc<Self>,
        initial_url: Option<String>,
        mut events: mpsc::UnboundedReceiver<String>,
    ) {
        // Drain task outlives this loop; it exits on its own once the edge
        // fires (or never, if the surface never mounts).
        let _drain = self.spawn_ready_drain();

        if let Some(url) = initial_url {
            self.handle_url(&url);
        }
        while let Some(url) = events.recv().await {
            self.handle_url(&url);
        }
        debug!("[DeepLink] Link event channel closed");
    }

    /// Navigate to the intent's target, retrying on the fixed schedule.
    ///
    /// Claims the sequence first so a second trigger for the same intent
    /// no-ops, and re-checks currency before every attempt so retries for
    /// a superseded intent drop out without acting.
    async fn deliver(self: Arc<Self>, intent: LinkIntent, seq: u64) {
        if !self.store.try_claim(seq) {
            return;
        }
        let route = Route::UserDetails {
            user_id: intent.target_user_id.clone(),
        };

        for (attempt, delay) in RETRY_DELAYS.iter().enumerate() {
            if !self.store.is_current(seq) {
                debug!(
                    "[DeepLink] Intent for user {} superseded, dropping",
                    intent.target_user_id
                );
                return;
            }
            match self.surface.navigate(&route) {
                Ok(()) => {
                    self.store.clear_if(seq);
                    info!("[DeepLink] Navigated to user {}", intent.target_user_id);
                    return;
                }
                Err(err) => {
                    warn!(
                        "[DeepLink] Navigation attempt {}/{} for user {} failed: {}",
                        attempt + 1,
                        RETRY_DELAYS.len(),
                        intent.target_user_id,
                        err
                    );
                    sleep(*delay).await;
                }
            }
        }

        if self.store.is_current(seq) {
            self.store.clear_if(seq);
            // Non-fatal by design: a dropped deep link must never crash
            error!(
                "[DeepLink] Dropping deep link to user {} after {} attempts",
                intent.target_user_id,
                RETRY_DELAYS.len()
            );
        }
    }
}
