// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The single sized access performed for a validated, mapped request.

use physmem_abi::{AccessWidth, MmioRequest};

use crate::mapper::{MappingGuard, PhysicalMapper};
use crate::observer::{AuditEvent, AuditObserver};
use crate::port::VolatilePort;


/// Perform `request` through `mapping`.
///
/// A store writes the low `width` bytes of `request.value`. A load
/// overwrites `request.value` with the zero-extended result and audits it.
/// There is no failure mode once the mapping exists.
pub fn access<P, M, O>(
    port: &P,
    mapping: &MappingGuard<'_, M, O>,
    width: AccessWidth,
    request: &mut MmioRequest,
    observer: &O,
) where
    P: VolatilePort + ?Sized,
    M: PhysicalMapper,
    O: AuditObserver + ?Sized,
{
    let vaddr = mapping.vaddr();

    if request.is_write() {
        // SAFETY: the guard keeps `width` bytes at `vaddr` mapped until it
        // drops, and the validator checked natural alignment.
        unsafe { port.store(vaddr, width, width.truncate(request.value)) };
    } else {
        // SAFETY: as above.
        let value = unsafe { port.load(vaddr, width) };
        request.value = width.truncate(value);
        observer.record(AuditEvent::Read {
            paddr: mapping.paddr(),
            width,
            value: request.value,
        });
    }
}
