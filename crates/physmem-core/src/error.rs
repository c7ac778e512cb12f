// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Pipeline error type.

use core::fmt;

use physmem_abi::Status;

use crate::mapper::MapError;
use crate::validate::ValidationError;

/// Why a request was not performed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MmioError {
    /// Rejected before any mapping was attempted.
    Invalid(ValidationError),
    /// The physical range could not be mapped.
    Map(MapError),
}

impl MmioError {
    /// Status reported to the caller.
    #[must_use]
    pub const fn status(self) -> Status {
        match self {
            Self::Invalid(err) => err.status(),
            Self::Map(_) => Status::MemoryFault,
        }
    }
}

impl From<ValidationError> for MmioError {
    fn from(err: ValidationError) -> Self {
        Self::Invalid(err)
    }
}

impl From<MapError> for MmioError {
    fn from(err: MapError) -> Self {
        Self::Map(err)
    }
}

impl fmt::Display for MmioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid(err) => write!(f, "invalid request: {err}"),
            Self::Map(err) => write!(f, "mapping failed: {err}"),
        }
    }
}

impl core::error::Error for MmioError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Invalid(err) => Some(err),
            Self::Map(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physmem_abi::{AccessWidth, Paddr};

    #[test]
    fn map_errors_are_memory_faults() {
        for err in [
            MapError::DescriptorFailed,
            MapError::MapFailed,
            MapError::NullAddress,
        ] {
            assert_eq!(MmioError::from(err).status(), Status::MemoryFault);
        }
    }

    #[test]
    fn validation_status_is_preserved() {
        let misaligned = ValidationError::Misaligned {
            paddr: Paddr::new(0x1001),
            width: AccessWidth::U32,
        };
        assert_eq!(
            MmioError::from(misaligned).status(),
            Status::InvalidArgument
        );
    }

    #[test]
    fn display_includes_cause() {
        let err = MmioError::Map(MapError::NullAddress);
        assert_eq!(
            format!("{err}"),
            "mapping failed: mapping resolved to null address"
        );
    }
}
