// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The MMIO provider: validate, map, access, release.

use physmem_abi::MmioRequest;

use crate::access::access;
use crate::error::MmioError;
use crate::mapper::{MappingGuard, PhysicalMapper};
use crate::observer::AuditObserver;
use crate::policy::AccessPolicy;
use crate::port::VolatilePort;
use crate::validate::validate;


/// Something that can perform one MMIO request in place.
pub trait MmioProvider {
    /// Perform `request`, updating `request.value` on a successful read.
    ///
    /// # Errors
    ///
    /// Returns why the request was not performed. `request.value` is left
    /// unchanged on error.
    fn perform(&self, request: &mut MmioRequest) -> Result<(), MmioError>;
}

/// Provider built from a policy, a host mapper, a port and an observer.
///
/// Holds no per-call state. It is `Sync` whenever its parts are, so one
/// instance can serve any number of concurrent callers. It does not
/// serialize them: concurrent requests for the same register reach the
/// hardware in whatever order the callers' threads run.
#[derive(Debug)]
pub struct PhysMemProvider<M, P, O> {
    policy: AccessPolicy,
    mapper: M,
    port: P,
    observer: O,
}

impl<M, P, O> PhysMemProvider<M, P, O> {
    /// Create a provider.
    #[must_use]
    pub const fn new(policy: AccessPolicy, mapper: M, port: P, observer: O) -> Self {
        Self {
            policy,
            mapper,
            port,
            observer,
        }
    }

    /// The address window in force.
    #[must_use]
    pub const fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    /// The host mapper.
    #[must_use]
    pub const fn mapper(&self) -> &M {
        &self.mapper
    }

    /// The port used for accesses.
    #[must_use]
    pub const fn port(&self) -> &P {
        &self.port
    }

    /// The audit observer.
    #[must_use]
    pub const fn observer(&self) -> &O {
        &self.observer
    }
}

impl<M, P, O> MmioProvider for PhysMemProvider<M, P, O>
where
    M: PhysicalMapper,
    P: VolatilePort,
    O: AuditObserver,
{
    fn perform(&self, request: &mut MmioRequest) -> Result<(), MmioError> {
        let width = validate(request, &self.policy, &self.observer)?;
        let mapping =
            MappingGuard::acquire(&self.mapper, &self.observer, request.physical_address, width)?;
        access(&self.port, &mapping, width, request, &self.observer);
        Ok(())
    }
}
