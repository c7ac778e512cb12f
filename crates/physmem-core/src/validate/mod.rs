// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Request validation.
//!
//! Runs before any hardware is touched. Checks happen in a fixed order:
//!
//! 1. `size` must be 1, 2, 4 or 8 (rejected silently)
//! 2. the address must be a multiple of `size` (audited)
//! 3. the address must lie in the policy window (audited)
//!
//! The width check comes first so the alignment check never sees a zero or
//! non-power-of-two divisor.

use core::fmt;

use physmem_abi::{AccessWidth, MmioRequest, Paddr, Status};

use crate::observer::{AuditEvent, AuditObserver};
use crate::policy::AccessPolicy;


/// Why a request was rejected before mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// `size` is not one of 1, 2, 4, 8.
    InvalidWidth {
        /// Raw size from the request.
        size: u32,
    },
    /// Address is not naturally aligned for the width.
    Misaligned {
        /// Requested address.
        paddr: Paddr,
        /// Requested width.
        width: AccessWidth,
    },
    /// Address is outside the permitted window.
    OutOfRange {
        /// Requested address.
        paddr: Paddr,
        /// Requested width.
        width: AccessWidth,
    },
}

impl ValidationError {
    /// Status reported to the caller.
    #[must_use]
    pub const fn status(self) -> Status {
        match self {
            Self::InvalidWidth { .. } | Self::Misaligned { .. } => Status::InvalidArgument,
            Self::OutOfRange { .. } => Status::MemoryFault,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth { size } => write!(f, "unsupported access size {size}"),
            Self::Misaligned { paddr, width } => {
                write!(f, "unaligned {width} access at {paddr}")
            }
            Self::OutOfRange { paddr, width } => {
                write!(f, "{width} access at {paddr} outside permitted window")
            }
        }
    }
}

impl core::error::Error for ValidationError {}

/// Validate `request` against `policy`.
///
/// Returns the checked access width.
///
/// # Errors
///
/// Returns the first check that failed; see the module docs for the order.
pub fn validate<O: AuditObserver + ?Sized>(
    request: &MmioRequest,
    policy: &AccessPolicy,
    observer: &O,
) -> Result<AccessWidth, ValidationError> {
    let paddr = request.physical_address;

    let Some(width) = request.width() else {
        return Err(ValidationError::InvalidWidth { size: request.size });
    };

    if !paddr.is_aligned_to(width) {
        observer.record(AuditEvent::Misaligned {
            paddr,
            size: request.size,
        });
        return Err(ValidationError::Misaligned { paddr, width });
    }

    if !policy.permits(paddr) {
        observer.record(AuditEvent::OutOfRange {
            paddr,
            size: request.size,
        });
        return Err(ValidationError::OutOfRange { paddr, width });
    }

    Ok(width)
}
