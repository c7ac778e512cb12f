// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Operation selectors and status codes.
//!
//! Status codes reuse the host framework's 32-bit return codes so callers
//! built against the host SDK can compare them directly.
//!
//! | Status | Raw code |
//! |--------|----------|
//! | `Success` | `0x0000_0000` |
//! | `InvalidArgument` | `0xE000_02C2` |
//! | `MemoryFault` | `0xE000_02C8` |

use core::fmt;


// =============================================================================
// Selectors
// =============================================================================

/// Operation requested by the caller.
///
/// Only one operation exists. Every other selector value is rejected before
/// the request buffer is even inspected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum Selector {
    /// Perform one sized MMIO read or write.
    MmioAccess = 0,
}

impl Selector {
    /// Try to convert from a raw selector value.
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::MmioAccess),
            _ => None,
        }
    }

    /// Raw selector value.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

// =============================================================================
// Status
// =============================================================================

/// Base of the host framework's common error space.
const ERR_BASE: u32 = 0xE000_0000;

/// Outcome of one request, as reported across the boundary.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Status {
    /// The access was performed.
    Success = 0,
    /// Malformed input: bad size, misalignment, short buffer, unknown selector.
    InvalidArgument = ERR_BASE | 0x2C2,
    /// The physical range is forbidden by policy or could not be mapped.
    MemoryFault = ERR_BASE | 0x2C8,
}

impl Status {
    /// Try to convert from a raw status code.
    #[must_use]
    pub const fn from_u32(value: u32) -> Option<Self> {
        match value {
            0 => Some(Self::Success),
            0xE000_02C2 => Some(Self::InvalidArgument),
            0xE000_02C8 => Some(Self::MemoryFault),
            _ => None,
        }
    }

    /// Raw status code.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Returns true if this is `Success`.
    #[inline]
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Debug for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "Success"),
            Self::InvalidArgument => write!(f, "InvalidArgument({:#x})", self.as_u32()),
            Self::MemoryFault => write!(f, "MemoryFault({:#x})", self.as_u32()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::MemoryFault => write!(f, "memory fault"),
        }
    }
}
