// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Observer that records audit events.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::vec::Vec;

use crate::observer::{AuditEvent, AuditObserver};

/// Observer that keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<AuditEvent>>,
}

impl RecordingObserver {
    /// Create an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AuditEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.lock().clone()
    }

    /// Number of events matching `predicate`.
    #[must_use]
    pub fn count(&self, predicate: impl Fn(&AuditEvent) -> bool) -> usize {
        self.lock().iter().filter(|event| predicate(event)).count()
    }

    /// Forget all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl AuditObserver for RecordingObserver {
    fn record(&self, event: AuditEvent) {
        self.lock().push(event);
    }
}
