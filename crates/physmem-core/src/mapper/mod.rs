// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Mapping physical ranges into the component's address space.
//!
//! A mapping takes two host resources: a descriptor naming the physical
//! range, and the mapping of that descriptor. Both are owned by a
//! [`MappingGuard`], which releases them in `Drop` (mapping first, then
//! descriptor) on every path out of a call, including partial acquisition.
//!
//! ```text
//! create_descriptor ──▶ map(Inhibited) ──▶ address ──▶ [access] ──▶ drop
//!        │                    │                │                     │
//!        ▼                    ▼                ▼                     ▼
//!     DescriptorFailed     MapFailed      NullAddress    release mapping, descriptor
//! ```

use core::fmt;

use physmem_abi::{AccessWidth, Paddr, Vaddr};

use crate::observer::{AuditEvent, AuditObserver};

#[cfg(test)]
mod mapper_test;

/// Direction of data transfer a descriptor is created for.
///
/// One call may load or store through the same descriptor, so only the
/// bidirectional mode exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Both directions.
    InOut,
}

/// Cache attributes for a mapping.
///
/// Device registers must never be served from a cache, so this is the only
/// mode a host adapter is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAttr {
    /// Caching inhibited.
    Inhibited,
}

/// Errors that can occur while mapping or unmapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// The host could not describe the physical range.
    DescriptorFailed,
    /// The host could not map the descriptor.
    MapFailed,
    /// The mapping resolved to a null address.
    NullAddress,
    /// The host failed to release a mapping or descriptor.
    ReleaseFailed,
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DescriptorFailed => write!(f, "failed to create descriptor"),
            Self::MapFailed => write!(f, "failed to map memory"),
            Self::NullAddress => write!(f, "mapping resolved to null address"),
            Self::ReleaseFailed => write!(f, "failed to release mapping resources"),
        }
    }
}

impl core::error::Error for MapError {}

/// Host operations for mapping physical memory.
///
/// Implemented by the adapter for the host driver framework, or by a mock
/// in tests. All methods take `&self` so one mapper can serve concurrent
/// callers.
pub trait PhysicalMapper {
    /// Host handle describing a physical range.
    type Descriptor;
    /// Host handle for a live mapping of a descriptor.
    type Mapping;

    /// Describe `len` bytes of physical memory starting at `paddr`.
    ///
    /// # Errors
    ///
    /// Returns `MapError::DescriptorFailed` if the host refuses the range.
    fn create_descriptor(
        &self,
        paddr: Paddr,
        len: u64,
        direction: Direction,
    ) -> Result<Self::Descriptor, MapError>;

    /// Map a descriptor into the component's address space.
    ///
    /// # Errors
    ///
    /// Returns `MapError::MapFailed` if the mapping cannot be created.
    fn map(
        &self,
        descriptor: &Self::Descriptor,
        cache: CacheAttr,
    ) -> Result<Self::Mapping, MapError>;

    /// Address of the first mapped byte. May be null if the host failed
    /// silently.
    fn address(&self, mapping: &Self::Mapping) -> Vaddr;

    /// Release a mapping.
    ///
    /// # Errors
    ///
    /// Returns `MapError::ReleaseFailed` if the host reports a failure.
    fn release_mapping(&self, mapping: Self::Mapping) -> Result<(), MapError>;

    /// Release a descriptor.
    ///
    /// # Errors
    ///
    /// Returns `MapError::ReleaseFailed` if the host reports a failure.
    fn release_descriptor(&self, descriptor: Self::Descriptor) -> Result<(), MapError>;
}

/// Owner of one call's descriptor and mapping.
///
/// Dropping the guard releases whatever was acquired, exactly once.
pub struct MappingGuard<'a, M: PhysicalMapper, O: AuditObserver + ?Sized> {
    mapper: &'a M,
    observer: &'a O,
    paddr: Paddr,
    descriptor: Option<M::Descriptor>,
    mapping: Option<M::Mapping>,
    vaddr: Vaddr,
}

impl<'a, M: PhysicalMapper, O: AuditObserver + ?Sized> MappingGuard<'a, M, O> {
    /// Map `width` bytes at `paddr` with caching inhibited.
    ///
    /// # Errors
    ///
    /// Returns the first step that failed. Anything acquired before the
    /// failure has already been released when this returns.
    pub fn acquire(
        mapper: &'a M,
        observer: &'a O,
        paddr: Paddr,
        width: AccessWidth,
    ) -> Result<Self, MapError> {
        let mut guard = Self {
            mapper,
            observer,
            paddr,
            descriptor: None,
            mapping: None,
            vaddr: Vaddr::null(),
        };

        match guard.establish(width) {
            Ok(()) => Ok(guard),
            Err(error) => {
                observer.record(AuditEvent::MapFailed { paddr, error });
                Err(error)
            }
        }
    }

    fn establish(&mut self, width: AccessWidth) -> Result<(), MapError> {
        let descriptor = self.descriptor.insert(self.mapper.create_descriptor(
            self.paddr,
            width.bytes() as u64,
            Direction::InOut,
        )?);

        let mapping = self
            .mapping
            .insert(self.mapper.map(descriptor, CacheAttr::Inhibited)?);

        let vaddr = self.mapper.address(mapping);
        if vaddr.is_null() {
            return Err(MapError::NullAddress);
        }
        self.vaddr = vaddr;
        Ok(())
    }

    /// Physical address this guard maps.
    #[inline]
    #[must_use]
    pub const fn paddr(&self) -> Paddr {
        self.paddr
    }

    /// Mapped address of `paddr`. Never null.
    #[inline]
    #[must_use]
    pub const fn vaddr(&self) -> Vaddr {
        self.vaddr
    }
}

impl<M: PhysicalMapper, O: AuditObserver + ?Sized> Drop for MappingGuard<'_, M, O> {
    fn drop(&mut self) {
        if let Some(mapping) = self.mapping.take() {
            if let Err(error) = self.mapper.release_mapping(mapping) {
                self.observer.record(AuditEvent::ReleaseFailed {
                    paddr: self.paddr,
                    error,
                });
            }
        }
        if let Some(descriptor) = self.descriptor.take() {
            if let Err(error) = self.mapper.release_descriptor(descriptor) {
                self.observer.record(AuditEvent::ReleaseFailed {
                    paddr: self.paddr,
                    error,
                });
            }
        }
    }
}

impl<M: PhysicalMapper, O: AuditObserver + ?Sized> fmt::Debug for MappingGuard<'_, M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingGuard")
            .field("paddr", &self.paddr)
            .field("vaddr", &self.vaddr)
            .field("mapped", &self.mapping.is_some())
            .finish()
    }
}
