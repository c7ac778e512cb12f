// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Simulated device memory.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use physmem_abi::{AccessWidth, Paddr, Vaddr};

use super::MAPPING_BIAS;
use crate::port::VolatilePort;

/// Sparse, byte-addressed model of physical memory.
///
/// Every physical address exists; bytes never written read as zero. Values
/// are stored little-endian. Loads and stores through the port are counted
/// so tests can prove that a rejected request never reached the device.
#[derive(Debug, Default)]
pub struct SimulatedMemory {
    bytes: Mutex<BTreeMap<u64, u8>>,
    loads: AtomicUsize,
    stores: AtomicUsize,
}

impl SimulatedMemory {
    /// Create memory where every byte reads as zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<u64, u8>> {
        self.bytes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Preset raw bytes starting at `paddr`, bypassing the counters.
    pub fn preset(&self, paddr: Paddr, data: &[u8]) {
        let mut bytes = self.lock();
        let mut addr = paddr.as_u64();
        for byte in data {
            bytes.insert(addr, *byte);
            addr = addr.wrapping_add(1);
        }
    }

    /// Preset the low `width` bytes of `value` at `paddr`.
    pub fn preset_value(&self, paddr: Paddr, width: AccessWidth, value: u64) {
        self.preset(paddr, &value.to_le_bytes()[..width.bytes()]);
    }

    /// Read `width` bytes at `paddr`, bypassing the counters.
    #[must_use]
    pub fn peek(&self, paddr: Paddr, width: AccessWidth) -> u64 {
        self.read_bytes(paddr.as_u64(), width)
    }

    /// Number of loads performed through the port.
    #[must_use]
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    /// Number of stores performed through the port.
    #[must_use]
    pub fn stores(&self) -> usize {
        self.stores.load(Ordering::SeqCst)
    }

    /// Total accesses performed through the port.
    #[must_use]
    pub fn accesses(&self) -> usize {
        self.loads() + self.stores()
    }

    fn read_bytes(&self, addr: u64, width: AccessWidth) -> u64 {
        let bytes = self.lock();
        let mut raw = [0u8; 8];
        for (offset, slot) in raw.iter_mut().take(width.bytes()).enumerate() {
            *slot = bytes
                .get(&addr.wrapping_add(offset as u64))
                .copied()
                .unwrap_or(0);
        }
        u64::from_le_bytes(raw)
    }

    fn translate(vaddr: Vaddr) -> u64 {
        assert!(
            vaddr.as_u64() >= MAPPING_BIAS,
            "address {vaddr} was not produced by MockMapper"
        );
        vaddr.as_u64() - MAPPING_BIAS
    }
}

impl VolatilePort for SimulatedMemory {
    unsafe fn load(&self, vaddr: Vaddr, width: AccessWidth) -> u64 {
        let addr = Self::translate(vaddr);
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.read_bytes(addr, width)
    }

    unsafe fn store(&self, vaddr: Vaddr, width: AccessWidth, value: u64) {
        let addr = Self::translate(vaddr);
        self.stores.fetch_add(1, Ordering::SeqCst);
        let mut bytes = self.lock();
        for (offset, byte) in value.to_le_bytes().iter().take(width.bytes()).enumerate() {
            bytes.insert(addr.wrapping_add(offset as u64), *byte);
        }
    }
}
