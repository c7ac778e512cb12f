// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! The request/response record exchanged across the privilege boundary.
//!
//! One record travels in both directions: the caller fills it in, the
//! privileged side copies it, performs the access, and writes the (possibly
//! updated) copy back. Only `value` ever changes: the flag byte and the
//! reserved bytes travel back exactly as the caller sent them.
//!
//! # Wire Layout
//!
//! 24 bytes, little-endian. This matches the natural C layout of the record
//! on 64-bit hosts, so a C caller can pass its struct unchanged.
//!
//! | Offset | Size | Content |
//! |--------|------|---------|
//! | 0 | 8 | `physical_address` (u64) |
//! | 8 | 4 | `size` (u32, valid: 1, 2, 4, 8) |
//! | 12 | 1 | `is_write` (0 = read, nonzero = write) |
//! | 13 | 3 | reserved (carried through unchanged, zero when built locally) |
//! | 16 | 8 | `value` (u64) |

use crate::types::{AccessWidth, Paddr};

#[cfg(test)]
mod request_test;

/// Size of the encoded record in bytes.
pub const RECORD_SIZE: usize = 24;

const ADDR_OFFSET: usize = 0;
const SIZE_OFFSET: usize = 8;
const IS_WRITE_OFFSET: usize = 12;
const RESERVED_OFFSET: usize = 13;
const VALUE_OFFSET: usize = 16;

/// One MMIO request, or its response.
///
/// `size` stays a raw `u32` because the record is untrusted until it has
/// been validated; use [`MmioRequest::width`] to interpret it. The write
/// flag is kept as the raw byte received; use [`MmioRequest::is_write`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C)]
pub struct MmioRequest {
    /// Target physical address.
    pub physical_address: Paddr,
    /// Access width in bytes, as received.
    pub size: u32,
    write_flag: u8,
    reserved: [u8; 3],
    /// Value to store, or the value read (low `size` bytes significant).
    pub value: u64,
}

// The in-memory struct mirrors the wire record exactly.
const _: () = assert!(core::mem::size_of::<MmioRequest>() == RECORD_SIZE);

impl MmioRequest {
    /// Build a request from raw, possibly invalid, field values.
    #[must_use]
    pub const fn raw(physical_address: Paddr, size: u32, is_write: bool, value: u64) -> Self {
        Self {
            physical_address,
            size,
            write_flag: is_write as u8,
            reserved: [0; 3],
            value,
        }
    }

    /// Build a load request.
    #[must_use]
    pub const fn read(physical_address: Paddr, width: AccessWidth) -> Self {
        Self::raw(physical_address, width.as_u32(), false, 0)
    }

    /// Build a store request.
    #[must_use]
    pub const fn write(physical_address: Paddr, width: AccessWidth, value: u64) -> Self {
        Self::raw(physical_address, width.as_u32(), true, value)
    }

    /// Interpret the raw `size` field.
    ///
    /// Returns `None` if it is not one of 1, 2, 4, 8.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> Option<AccessWidth> {
        AccessWidth::from_size(self.size)
    }

    /// True for a store, false for a load. Any nonzero flag byte is a store.
    #[inline]
    #[must_use]
    pub const fn is_write(&self) -> bool {
        self.write_flag != 0
    }

    /// Encode this record into its wire form.
    #[must_use]
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut out = [0u8; RECORD_SIZE];
        out[ADDR_OFFSET..SIZE_OFFSET].copy_from_slice(&self.physical_address.as_u64().to_le_bytes());
        out[SIZE_OFFSET..IS_WRITE_OFFSET].copy_from_slice(&self.size.to_le_bytes());
        out[IS_WRITE_OFFSET] = self.write_flag;
        out[RESERVED_OFFSET..VALUE_OFFSET].copy_from_slice(&self.reserved);
        out[VALUE_OFFSET..RECORD_SIZE].copy_from_slice(&self.value.to_le_bytes());
        out
    }

    /// Encode this record into the front of `buf`.
    ///
    /// Returns the number of bytes written (always `RECORD_SIZE`), or `None`
    /// if `buf` is too short. Bytes past the record are left untouched.
    #[must_use]
    pub fn encode_into(&self, buf: &mut [u8]) -> Option<usize> {
        let dst = buf.get_mut(..RECORD_SIZE)?;
        dst.copy_from_slice(&self.encode());
        Some(RECORD_SIZE)
    }

    /// Decode a record from the front of `buf`.
    ///
    /// Returns `None` if `buf` is shorter than `RECORD_SIZE`. Trailing bytes
    /// are ignored.
    #[must_use]
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let bytes: &[u8; RECORD_SIZE] = buf.get(..RECORD_SIZE)?.try_into().ok()?;

        let mut addr = [0u8; 8];
        addr.copy_from_slice(&bytes[ADDR_OFFSET..SIZE_OFFSET]);
        let mut size = [0u8; 4];
        size.copy_from_slice(&bytes[SIZE_OFFSET..IS_WRITE_OFFSET]);
        let mut reserved = [0u8; 3];
        reserved.copy_from_slice(&bytes[RESERVED_OFFSET..VALUE_OFFSET]);
        let mut value = [0u8; 8];
        value.copy_from_slice(&bytes[VALUE_OFFSET..RECORD_SIZE]);

        Some(Self {
            physical_address: Paddr::new(u64::from_le_bytes(addr)),
            size: u32::from_le_bytes(size),
            write_flag: bytes[IS_WRITE_OFFSET],
            reserved,
            value: u64::from_le_bytes(value),
        })
    }
}
