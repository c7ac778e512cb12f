// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! # physmem core
//!
//! Privileged side of the physmem protocol: reads or writes one sized value
//! at a physical address on behalf of an unprivileged caller.
//!
//! Every call runs the same linear pipeline:
//!
//! ```text
//! dispatch ─▶ validate ─▶ acquire mapping ─▶ access ─▶ release ─▶ status
//! ```
//!
//! - [`dispatch`]: protocol boundary, buffer checks, working copy
//! - [`validate`]: width, alignment and address-window checks
//! - [`mapper`]: cache-inhibited mapping with guaranteed release
//! - [`port`] and [`access`]: the single volatile load or store
//! - [`observer`]: audit trail, forwarded to `tracing` in production
//!
//! The host framework supplies a [`mapper::PhysicalMapper`]; everything
//! else is plain code that runs unchanged against the simulated hardware in
//! [`mock`].
//!
//! The core never serializes callers. Two callers touching the same
//! register concurrently race at the hardware, exactly as they would
//! without this component in between.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod access;
pub mod dispatch;
pub mod error;
pub mod mapper;
#[cfg(any(test, feature = "std"))]
pub mod mock;
pub mod observer;
pub mod policy;
pub mod port;
pub mod provider;
pub mod validate;

pub use dispatch::{DispatchOutcome, ProtocolClient, UserClient};
pub use error::MmioError;
pub use mapper::{CacheAttr, Direction, MapError, MappingGuard, PhysicalMapper};
pub use observer::{AuditEvent, AuditObserver, NullObserver, TracingObserver};
pub use policy::{AccessPolicy, PolicyError};
pub use port::{RawPort, VolatilePort};
pub use provider::{MmioProvider, PhysMemProvider};
pub use validate::ValidationError;

pub use physmem_abi::{AccessWidth, MmioRequest, Paddr, RECORD_SIZE, Selector, Status, Vaddr};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn version_is_package_version() {
        assert_eq!(super::VERSION, "0.1.0");
    }
}
