// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mock mapper with failure injection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::vec::Vec;

use physmem_abi::{Paddr, Vaddr};

use super::MAPPING_BIAS;
use crate::mapper::{CacheAttr, Direction, MapError, PhysicalMapper};

/// Which step of mapping or releasing should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapperFault {
    /// `create_descriptor` fails.
    Descriptor,
    /// `map` fails after the descriptor was created.
    Map,
    /// `map` succeeds but the mapping resolves to null.
    NullAddress,
    /// Releasing the mapping reports failure.
    ReleaseMapping,
    /// Releasing the descriptor reports failure.
    ReleaseDescriptor,
}

/// Descriptor handed out by [`MockMapper`].
#[derive(Debug, PartialEq, Eq)]
pub struct MockDescriptor {
    /// Described physical address.
    pub paddr: Paddr,
    /// Described length in bytes.
    pub len: u64,
    /// Requested transfer direction.
    pub direction: Direction,
}

/// Mapping handed out by [`MockMapper`].
#[derive(Debug, PartialEq, Eq)]
pub struct MockMapping {
    vaddr: Vaddr,
}

/// Kind of handle released, in [`MockMapper::releases`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Released {
    /// A `MockMapping`.
    Mapping,
    /// A `MockDescriptor`.
    Descriptor,
}

/// `PhysicalMapper` that counts every acquire and release.
///
/// A release counts even when a `Release*` fault makes it report failure:
/// the handle was consumed, which is what leak checks care about.
#[derive(Debug, Default)]
pub struct MockMapper {
    fault: Option<MapperFault>,
    descriptor_attempts: AtomicUsize,
    descriptors_created: AtomicUsize,
    descriptors_released: AtomicUsize,
    mappings_created: AtomicUsize,
    mappings_released: AtomicUsize,
    cache_requests: Mutex<Vec<CacheAttr>>,
    releases: Mutex<Vec<Released>>,
}

impl MockMapper {
    /// Create a mapper that always succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mapper that fails at `fault`.
    #[must_use]
    pub fn with_fault(fault: MapperFault) -> Self {
        Self {
            fault: Some(fault),
            ..Self::default()
        }
    }

    fn fails_at(&self, fault: MapperFault) -> bool {
        self.fault == Some(fault)
    }

    /// Number of times `create_descriptor` was called.
    #[must_use]
    pub fn descriptor_attempts(&self) -> usize {
        self.descriptor_attempts.load(Ordering::SeqCst)
    }

    /// Number of descriptors successfully created.
    #[must_use]
    pub fn descriptors_created(&self) -> usize {
        self.descriptors_created.load(Ordering::SeqCst)
    }

    /// Number of descriptors released.
    #[must_use]
    pub fn descriptors_released(&self) -> usize {
        self.descriptors_released.load(Ordering::SeqCst)
    }

    /// Number of mappings successfully created.
    #[must_use]
    pub fn mappings_created(&self) -> usize {
        self.mappings_created.load(Ordering::SeqCst)
    }

    /// Number of mappings released.
    #[must_use]
    pub fn mappings_released(&self) -> usize {
        self.mappings_released.load(Ordering::SeqCst)
    }

    /// True if every created resource has been released.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.descriptors_created() == self.descriptors_released()
            && self.mappings_created() == self.mappings_released()
    }

    /// Cache attributes requested by every `map` call, in order.
    #[must_use]
    pub fn cache_requests(&self) -> Vec<CacheAttr> {
        self.cache_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Every release, in the order it happened.
    #[must_use]
    pub fn releases(&self) -> Vec<Released> {
        self.releases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn note_release(&self, kind: Released) {
        self.releases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(kind);
    }
}

impl PhysicalMapper for MockMapper {
    type Descriptor = MockDescriptor;
    type Mapping = MockMapping;

    fn create_descriptor(
        &self,
        paddr: Paddr,
        len: u64,
        direction: Direction,
    ) -> Result<MockDescriptor, MapError> {
        self.descriptor_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fails_at(MapperFault::Descriptor) {
            return Err(MapError::DescriptorFailed);
        }
        self.descriptors_created.fetch_add(1, Ordering::SeqCst);
        Ok(MockDescriptor {
            paddr,
            len,
            direction,
        })
    }

    fn map(&self, descriptor: &MockDescriptor, cache: CacheAttr) -> Result<MockMapping, MapError> {
        self.cache_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(cache);
        if self.fails_at(MapperFault::Map) {
            return Err(MapError::MapFailed);
        }
        self.mappings_created.fetch_add(1, Ordering::SeqCst);

        let vaddr = if self.fails_at(MapperFault::NullAddress) {
            Vaddr::null()
        } else {
            Vaddr::new(descriptor.paddr.as_u64().wrapping_add(MAPPING_BIAS))
        };
        Ok(MockMapping { vaddr })
    }

    fn address(&self, mapping: &MockMapping) -> Vaddr {
        mapping.vaddr
    }

    fn release_mapping(&self, _mapping: MockMapping) -> Result<(), MapError> {
        self.mappings_released.fetch_add(1, Ordering::SeqCst);
        self.note_release(Released::Mapping);
        if self.fails_at(MapperFault::ReleaseMapping) {
            return Err(MapError::ReleaseFailed);
        }
        Ok(())
    }

    fn release_descriptor(&self, _descriptor: MockDescriptor) -> Result<(), MapError> {
        self.descriptors_released.fetch_add(1, Ordering::SeqCst);
        self.note_release(Released::Descriptor);
        if self.fails_at(MapperFault::ReleaseDescriptor) {
            return Err(MapError::ReleaseFailed);
        }
        Ok(())
    }
}
