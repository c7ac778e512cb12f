// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the mapping guard's acquire/release discipline.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::mock::{MAPPING_BIAS, MapperFault, MockMapper, RecordingObserver, Released};

const PADDR: Paddr = Paddr::new(0x1000);

#[test]
fn success_maps_cache_inhibited() {
    let mapper = MockMapper::new();
    let observer = RecordingObserver::new();

    {
        let guard = MappingGuard::acquire(&mapper, &observer, PADDR, AccessWidth::U32).unwrap();
        assert_eq!(guard.paddr(), PADDR);
        assert_eq!(guard.vaddr(), Vaddr::new(0x1000 + MAPPING_BIAS));
        assert_eq!(mapper.mappings_created(), 1);
        assert_eq!(mapper.mappings_released(), 0);
    }

    assert_eq!(mapper.cache_requests(), vec![CacheAttr::Inhibited]);
    assert!(mapper.is_balanced());
    assert!(observer.events().is_empty());
}

#[test]
fn release_order_is_mapping_then_descriptor() {
    let mapper = MockMapper::new();
    let observer = RecordingObserver::new();

    drop(MappingGuard::acquire(&mapper, &observer, PADDR, AccessWidth::U8).unwrap());

    assert_eq!(
        mapper.releases(),
        vec![Released::Mapping, Released::Descriptor]
    );
}

#[test]
fn descriptor_failure_releases_nothing() {
    let mapper = MockMapper::with_fault(MapperFault::Descriptor);
    let observer = RecordingObserver::new();

    let err = MappingGuard::acquire(&mapper, &observer, PADDR, AccessWidth::U8).unwrap_err();

    assert_eq!(err, MapError::DescriptorFailed);
    assert_eq!(mapper.descriptor_attempts(), 1);
    assert!(mapper.releases().is_empty());
    assert!(mapper.is_balanced());
    assert_eq!(
        observer.events(),
        vec![AuditEvent::MapFailed {
            paddr: PADDR,
            error: MapError::DescriptorFailed,
        }]
    );
}

#[test]
fn map_failure_still_releases_descriptor() {
    let mapper = MockMapper::with_fault(MapperFault::Map);
    let observer = RecordingObserver::new();

    let err = MappingGuard::acquire(&mapper, &observer, PADDR, AccessWidth::U16).unwrap_err();

    assert_eq!(err, MapError::MapFailed);
    assert_eq!(mapper.descriptors_created(), 1);
    assert_eq!(mapper.descriptors_released(), 1);
    assert_eq!(mapper.mappings_created(), 0);
    assert_eq!(mapper.releases(), vec![Released::Descriptor]);
    assert!(mapper.is_balanced());
}

#[test]
fn null_address_releases_both() {
    let mapper = MockMapper::with_fault(MapperFault::NullAddress);
    let observer = RecordingObserver::new();

    let err = MappingGuard::acquire(&mapper, &observer, PADDR, AccessWidth::U64).unwrap_err();

    assert_eq!(err, MapError::NullAddress);
    assert_eq!(
        mapper.releases(),
        vec![Released::Mapping, Released::Descriptor]
    );
    assert!(mapper.is_balanced());
}

#[test]
fn release_failure_is_only_logged() {
    for (fault, releases) in [
        (MapperFault::ReleaseMapping, 2),
        (MapperFault::ReleaseDescriptor, 2),
    ] {
        let mapper = MockMapper::with_fault(fault);
        let observer = RecordingObserver::new();

        let guard = MappingGuard::acquire(&mapper, &observer, PADDR, AccessWidth::U8);
        assert!(guard.is_ok());
        drop(guard);

        assert_eq!(mapper.releases().len(), releases);
        assert!(mapper.is_balanced());
        assert_eq!(
            observer.events(),
            vec![AuditEvent::ReleaseFailed {
                paddr: PADDR,
                error: MapError::ReleaseFailed,
            }]
        );
    }
}

#[test]
fn descriptor_covers_exactly_the_access() {
    struct LenCheck;

    impl PhysicalMapper for LenCheck {
        type Descriptor = u64;
        type Mapping = u64;

        fn create_descriptor(
            &self,
            paddr: Paddr,
            len: u64,
            direction: Direction,
        ) -> Result<u64, MapError> {
            assert_eq!(paddr, PADDR);
            assert_eq!(len, 8);
            assert_eq!(direction, Direction::InOut);
            Ok(len)
        }

        fn map(&self, descriptor: &u64, _cache: CacheAttr) -> Result<u64, MapError> {
            Ok(*descriptor)
        }

        fn address(&self, _mapping: &u64) -> Vaddr {
            Vaddr::new(0xDEAD_0000)
        }

        fn release_mapping(&self, _mapping: u64) -> Result<(), MapError> {
            Ok(())
        }

        fn release_descriptor(&self, _descriptor: u64) -> Result<(), MapError> {
            Ok(())
        }
    }

    let observer = RecordingObserver::new();
    let guard = MappingGuard::acquire(&LenCheck, &observer, PADDR, AccessWidth::U64).unwrap();
    assert_eq!(guard.vaddr(), Vaddr::new(0xDEAD_0000));
}

#[test]
fn map_error_display() {
    assert_eq!(
        format!("{}", MapError::DescriptorFailed),
        "failed to create descriptor"
    );
    assert_eq!(format!("{}", MapError::MapFailed), "failed to map memory");
}
