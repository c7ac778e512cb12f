// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Sized volatile access to mapped device memory.
//!
//! This is the only place in the crate that dereferences a raw address.
//! [`RawPort`] does it for real with `read_volatile`/`write_volatile`; the
//! simulated hardware in `mock` implements the same trait in safe code.

use core::ptr::{read_volatile, write_volatile};

use physmem_abi::{AccessWidth, Vaddr};


/// Typed, sized loads and stores that the compiler may not elide, merge,
/// reorder against each other, or serve from a cache.
pub trait VolatilePort {
    /// Load `width` bytes at `vaddr`, zero-extended.
    ///
    /// # Safety
    ///
    /// `vaddr` must point to at least `width` bytes of live, readable
    /// mapping, aligned to `width`, for the duration of the call.
    unsafe fn load(&self, vaddr: Vaddr, width: AccessWidth) -> u64;

    /// Store the low `width` bytes of `value` at `vaddr`.
    ///
    /// # Safety
    ///
    /// `vaddr` must point to at least `width` bytes of live, writable
    /// mapping, aligned to `width`, for the duration of the call.
    unsafe fn store(&self, vaddr: Vaddr, width: AccessWidth, value: u64);
}

/// Port that dereferences mapped addresses directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawPort;

impl VolatilePort for RawPort {
    unsafe fn load(&self, vaddr: Vaddr, width: AccessWidth) -> u64 {
        // SAFETY: forwarded from the caller's contract.
        unsafe {
            match width {
                AccessWidth::U8 => u64::from(read_volatile(vaddr.as_ptr::<u8>())),
                AccessWidth::U16 => u64::from(read_volatile(vaddr.as_ptr::<u16>())),
                AccessWidth::U32 => u64::from(read_volatile(vaddr.as_ptr::<u32>())),
                AccessWidth::U64 => read_volatile(vaddr.as_ptr::<u64>()),
            }
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "only the low `width` bytes are significant"
    )]
    unsafe fn store(&self, vaddr: Vaddr, width: AccessWidth, value: u64) {
        // SAFETY: forwarded from the caller's contract.
        unsafe {
            match width {
                AccessWidth::U8 => write_volatile(vaddr.as_mut_ptr::<u8>(), value as u8),
                AccessWidth::U16 => write_volatile(vaddr.as_mut_ptr::<u16>(), value as u16),
                AccessWidth::U32 => write_volatile(vaddr.as_mut_ptr::<u32>(), value as u32),
                AccessWidth::U64 => write_volatile(vaddr.as_mut_ptr::<u64>(), value),
            }
        }
    }
}
