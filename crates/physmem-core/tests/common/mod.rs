// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Shared test infrastructure for integration tests.
//!
//! This module is **not** a test file, so it must comply with full clippy rules.

#![allow(dead_code)] // Not every test file uses every helper

use physmem_core::mock::{SimulatedProvider, simulated_provider};
use physmem_core::{AccessPolicy, MmioRequest, ProtocolClient, RECORD_SIZE, Status, UserClient};

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Provider over fresh simulated hardware with the default window.
pub fn provider() -> SimulatedProvider {
    init_tracing();
    simulated_provider(AccessPolicy::DEFAULT)
}

/// Send `request` through the protocol boundary like an unprivileged caller.
///
/// Returns the status and the record read back from the output buffer.
pub fn call(provider: &SimulatedProvider, request: MmioRequest) -> (Status, Option<MmioRequest>) {
    let client = UserClient::new(provider);
    let input = request.encode();
    let mut output = [0u8; RECORD_SIZE];
    let outcome = client.dispatch(0, Some(&input), Some(&mut output));
    (outcome.status, MmioRequest::decode(&output))
}
