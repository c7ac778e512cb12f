// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Access width of a single MMIO operation.

use core::fmt;

/// Width of one load or store, in bytes.
///
/// The wire record carries the width as a raw `u32`; only these four values
/// are valid. Everything past validation works with `AccessWidth` so the
/// accessor can never see an unsupported size.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum AccessWidth {
    /// One byte.
    U8 = 1,
    /// Two bytes.
    U16 = 2,
    /// Four bytes.
    U32 = 4,
    /// Eight bytes.
    U64 = 8,
}

impl AccessWidth {
    /// All widths, narrowest first.
    pub const ALL: [Self; 4] = [Self::U8, Self::U16, Self::U32, Self::U64];

    /// Try to convert from the raw `size` field of a request.
    #[must_use]
    pub const fn from_size(size: u32) -> Option<Self> {
        match size {
            1 => Some(Self::U8),
            2 => Some(Self::U16),
            4 => Some(Self::U32),
            8 => Some(Self::U64),
            _ => None,
        }
    }

    /// Number of bytes touched.
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    /// Raw wire value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Mask selecting the low `bytes()` bytes of a `u64`.
    #[inline]
    #[must_use]
    pub const fn mask(self) -> u64 {
        match self {
            Self::U8 => 0xFF,
            Self::U16 => 0xFFFF,
            Self::U32 => 0xFFFF_FFFF,
            Self::U64 => u64::MAX,
        }
    }

    /// Keep only the significant low bytes of `value`.
    #[inline]
    #[must_use]
    pub const fn truncate(self, value: u64) -> u64 {
        value & self.mask()
    }
}

impl fmt::Debug for AccessWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessWidth({})", self.bytes())
    }
}

impl fmt::Display for AccessWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-byte", self.bytes())
    }
}
