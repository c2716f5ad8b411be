//! Pending navigation store
//!
//! A single slot holding the most recent unresolved deep-link intent.
//! Last write wins: a stale deep link is not worth navigating to once a
//! newer one arrives, so `set` overwrites instead of queueing.
//!
//! The slot doubles as the mutual-exclusion point between the dispatcher's
//! immediate path and its ready-edge drain: every `set` mints a sequence
//! number, delivery claims it exactly once, and in-flight retries check
//! `is_current` before acting so a superseded intent quietly drops out.

use std::sync::Mutex;

use super::extract::LinkIntent;

#[derive(Debug, Default)]
struct Slot {
    intent: Option<LinkIntent>,
    seq: u64,
    claimed: bool,
}

/// Single-slot store for the outstanding deep-link intent.
pub struct PendingStore {
    slot: Mutex<Slot>,
}

impl PendingStore {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(Slot::default()),
        }
    }

    /// Store an intent, overwriting any previous one. Returns the sequence
    /// number identifying this write.
    pub fn set(&self, intent: LinkIntent) -> u64 {
        let mut slot = self.slot.lock().unwrap();
        slot.seq += 1;
        slot.intent = Some(intent);
        slot.claimed = false;
        slot.seq
    }

    /// The currently stored intent, if any.
    pub fn peek(&self) -> Option<LinkIntent> {
        self.slot.lock().unwrap().intent.clone()
    }

    /// The stored intent together with its sequence number.
    pub fn peek_with_seq(&self) -> Option<(LinkIntent, u64)> {
        let slot = self.slot.lock().unwrap();
        slot.intent.clone().map(|intent| (intent, slot.seq))
    }

    /// Drop the stored intent unconditionally.
    pub fn clear(&self) {
        self.slot.lock().unwrap().intent = None;
    }

    /// Claim delivery of the write identified by `seq`. Succeeds at most
    /// once per write, and never for a superseded one, so two delivery
    /// triggers cannot both navigate the same intent.
    pub fn try_claim(&self, seq: u64) -> bool {
        let mut slot = self.slot.lock().unwrap();
        if slot.seq == seq && slot.intent.is_some() && !slot.claimed {
            slot.claimed = true;
            true
        } else {
            false
        }
    }

    /// Whether the write identified by `seq` is still the live one.
    pub fn is_current(&self, seq: u64) -> bool {
        let slot = self.slot.lock().unwrap();
        slot.seq == seq && slot.intent.is_some()
    }

    /// Drop the stored intent only if `seq` is still the live write.
    pub fn clear_if(&self, seq: u64) {
        let mut slot = self.slot.lock().unwrap();
        if slot.seq == seq {
            slot.intent = None;
        }
    }
}

impl Default for PendingStore {
    fn default() -> Self {
        Self::new()
    }
}
