//! Request gate serializing user-triggered flows
//!
//! At most one flow (send, extract, compare) may be talking to the backend.
//! The gate is taken at flow start and held across the whole call; the
//! returned guard releases it on drop, so every exit path frees it.
//!
//! There is no timeout. A remote call that never returns keeps the gate held.

use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
pub struct RequestGate {
    busy: AtomicBool,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the gate, or `None` if another flow holds it.
    pub fn try_acquire(&self) -> Option<GateGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GateGuard { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    fn release(&self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Scoped hold on a [`RequestGate`]
#[derive(Debug)]
pub struct GateGuard<'a> {
    gate: &'a RequestGate,
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}
