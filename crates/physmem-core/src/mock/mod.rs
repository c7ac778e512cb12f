// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Simulated hardware for testing.
//!
//! These types stand in for the host framework and the device behind it, so
//! the whole pipeline runs on the development host:
//!
//! - [`SimulatedMemory`]: sparse byte-addressed device memory, implements
//!   `VolatilePort`
//! - [`MockMapper`]: `PhysicalMapper` with failure injection and resource
//!   counters
//! - [`RecordingObserver`]: collects audit events
//!
//! `MockMapper` hands out mapped addresses offset by [`MAPPING_BIAS`] from
//! the physical address, and `SimulatedMemory` subtracts it again. A code
//! path that confused the two address spaces would miss the simulated
//! device entirely.

#![allow(clippy::panic)] // Test infrastructure - panicking on invalid input is correct

mod mapper;
mod memory;
mod observer;


pub use mapper::{MapperFault, MockDescriptor, MockMapper, MockMapping, Released};
pub use memory::SimulatedMemory;
pub use observer::RecordingObserver;

use crate::policy::AccessPolicy;
use crate::provider::PhysMemProvider;

/// Offset between a physical address and its simulated mapped address.
pub const MAPPING_BIAS: u64 = 0x7F00_0000_0000;

/// Provider wired to simulated hardware.
pub type SimulatedProvider = PhysMemProvider<MockMapper, SimulatedMemory, RecordingObserver>;

/// Build a provider over fresh simulated hardware.
#[must_use]
pub fn simulated_provider(policy: AccessPolicy) -> SimulatedProvider {
    PhysMemProvider::new(
        policy,
        MockMapper::new(),
        SimulatedMemory::new(),
        RecordingObserver::new(),
    )
}

/// Build a provider whose mapper fails as described by `fault`.
#[must_use]
pub fn faulty_provider(policy: AccessPolicy, fault: MapperFault) -> SimulatedProvider {
    PhysMemProvider::new(
        policy,
        MockMapper::with_fault(fault),
        SimulatedMemory::new(),
        RecordingObserver::new(),
    )
}
