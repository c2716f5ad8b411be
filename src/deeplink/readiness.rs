//! Navigation readiness monitor
//!
//! Tracks the navigation surface lifecycle as one forward-only state
//! (NotMounted -> MountedNotReady -> Ready) behind a watch channel.
//! Regressions are ignored, and the Ready edge is observable exactly once
//! per subscriber: listeners attaching after the edge resolve immediately
//! instead of waiting forever, which closes the race where an intent is
//! stored after readiness already fired.

use log::debug;
use tokio::sync::watch;

/// Lifecycle of the navigation surface. Strictly forward within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadinessState {
    NotMounted,
    MountedNotReady,
    Ready,
}

/// Owner side of the readiness state. The surface host reports lifecycle
/// transitions here; everyone else reads through a [`ReadinessHandle`].
pub struct ReadinessMonitor {
    tx: watch::Sender<ReadinessState>,
}

impl ReadinessMonitor {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ReadinessState::NotMounted);
        Self { tx }
    }

    /// The navigation tree has mounted but cannot accept routes yet.
    pub fn mark_mounted(&self) {
        self.advance(ReadinessState::MountedNotReady);
    }

    /// The navigation tree accepts routes. Fires the ready edge once.
    pub fn mark_ready(&self) {
        self.advance(ReadinessState::Ready);
    }

    fn advance(&self, next: ReadinessState) {
        self.tx.send_if_modified(|state| {
            if next > *state {
                debug!("[Readiness] {:?} -> {:?}", *state, next);
                *state = next;
                true
            } else {
                false
            }
        });
    }

    pub fn state(&self) -> ReadinessState {
        *self.tx.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ReadinessState::Ready
    }

    /// A read-only handle for consumers.
    pub fn handle(&self) -> ReadinessHandle {
        ReadinessHandle {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ReadinessMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// Read side of the readiness state.
#[derive(Clone)]
pub struct ReadinessHandle {
    rx: watch::Receiver<ReadinessState>,
}

impl ReadinessHandle {
    pub fn state(&self) -> ReadinessState {
        *self.rx.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == ReadinessState::Ready
    }

    /// Resolve when the surface becomes ready. Resolves immediately when
    /// the edge already happened.
    pub async fn became_ready(&mut self) {
        // The owner side lives for the whole session; if it is gone the
        // edge can never fire and there is nothing left to wait for.
        let _ = self
            .rx
            .wait_for(|state| *state == ReadinessState::Ready)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monotonic_forward_only() {
        let monitor = ReadinessMonitor::new();
        assert_eq!(monitor.state(), ReadinessState::NotMounted);
        monitor.mark_mounted();
        assert_eq!(monitor.state(), ReadinessState::MountedNotReady);
        monitor.mark_ready();
        assert!(monitor.is_ready());

        // Regressions are ignored
        monitor.mark_mounted();
        assert!(monitor.is_ready());
    }

    #[test]
    fn test_mark_ready_twice_is_idempotent() {
        let monitor = ReadinessMonitor::new();
        monitor.mark_ready();
        monitor.mark_ready();
        assert!(monitor.is_ready());
    }

    #[tokio::test]
    async fn test_edge_wakes_waiting_subscriber() {
        let monitor = ReadinessMonitor::new();
        let mut handle = monitor.handle();
        let waiter = tokio::spawn(async move {
            handle.became_ready().await;
        });
        monitor.mark_mounted();
        monitor.mark_ready();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_late_subscriber_resolves_immediately() {
        let monitor = ReadinessMonitor::new();
        monitor.mark_ready();
        let mut handle = monitor.handle();
        assert!(handle.is_ready());
        // Must not hang even though the edge fired before we subscribed
        handle.became_ready().await;
    }
}
