// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Audit trail for the access pipeline.
//!
//! The pipeline never logs directly. It reports [`AuditEvent`]s to an
//! injected [`AuditObserver`]; production uses [`TracingObserver`], tests
//! record the events and assert on them.
//!
//! What is audited:
//! - misaligned and out-of-window requests (a bad `size` is rejected silently)
//! - mapping failures
//! - every completed read, with the value read
//! - release failures during cleanup
//!
//! Completed writes are not audited.

use physmem_abi::{AccessWidth, Paddr};

use crate::mapper::MapError;

/// Something the pipeline wants on the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuditEvent {
    /// Address is not a multiple of the access width.
    Misaligned {
        /// Requested address.
        paddr: Paddr,
        /// Requested width in bytes.
        size: u32,
    },
    /// Address is outside the permitted window.
    OutOfRange {
        /// Requested address.
        paddr: Paddr,
        /// Requested width in bytes.
        size: u32,
    },
    /// The physical range could not be mapped.
    MapFailed {
        /// Requested address.
        paddr: Paddr,
        /// Why mapping failed.
        error: MapError,
    },
    /// A load completed.
    Read {
        /// Address read.
        paddr: Paddr,
        /// Width read.
        width: AccessWidth,
        /// Zero-extended value read.
        value: u64,
    },
    /// Releasing a mapping or descriptor failed. The call's status is unaffected.
    ReleaseFailed {
        /// Address whose resources were being released.
        paddr: Paddr,
        /// Error reported by the host.
        error: MapError,
    },
}

/// Sink for audit events.
///
/// Implementations must tolerate concurrent calls when the provider is
/// shared between callers.
pub trait AuditObserver {
    /// Record one event.
    fn record(&self, event: AuditEvent);
}

impl<F: Fn(AuditEvent)> AuditObserver for F {
    fn record(&self, event: AuditEvent) {
        self(event);
    }
}

/// Observer that discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl AuditObserver for NullObserver {
    fn record(&self, _event: AuditEvent) {}
}

/// Observer that forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl AuditObserver for TracingObserver {
    fn record(&self, event: AuditEvent) {
        match event {
            AuditEvent::Misaligned { paddr, size } => {
                tracing::warn!(%paddr, size, "unaligned access rejected");
            }
            AuditEvent::OutOfRange { paddr, size } => {
                tracing::warn!(%paddr, size, "address out of bounds");
            }
            AuditEvent::MapFailed { paddr, error } => {
                tracing::warn!(%paddr, %error, "failed to map physical range");
            }
            AuditEvent::Read {
                paddr,
                width,
                value,
            } => {
                tracing::info!(%paddr, size = width.as_u32(), value, "read");
            }
            AuditEvent::ReleaseFailed { paddr, error } => {
                tracing::error!(%paddr, %error, "failed to release mapping resources");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::vec::Vec;

    #[test]
    fn closures_are_observers() {
        let seen = Mutex::new(Vec::new());
        let observer = |event: AuditEvent| {
            if let Ok(mut seen) = seen.lock() {
                seen.push(event);
            }
        };

        let event = AuditEvent::Misaligned {
            paddr: Paddr::new(0x1001),
            size: 4,
        };
        observer.record(event);

        assert_eq!(seen.into_inner().ok(), Some(vec![event]));
    }

    #[test]
    fn tracing_observer_accepts_every_event() {
        let paddr = Paddr::new(0x1000);
        let events = [
            AuditEvent::Misaligned { paddr, size: 2 },
            AuditEvent::OutOfRange { paddr, size: 2 },
            AuditEvent::MapFailed {
                paddr,
                error: MapError::MapFailed,
            },
            AuditEvent::Read {
                paddr,
                width: AccessWidth::U8,
                value: 0xAB,
            },
            AuditEvent::ReleaseFailed {
                paddr,
                error: MapError::ReleaseFailed,
            },
        ];
        for event in events {
            TracingObserver.record(event);
            NullObserver.record(event);
        }
    }
}
