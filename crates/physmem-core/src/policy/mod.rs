// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Physical address window the component is allowed to touch.
//!
//! The bounds are policy, not physics: the defaults keep callers away from
//! the zero page and cap accesses at 64 GiB. Hosts that know their real
//! physical limit construct a tighter [`AccessPolicy`].

use core::fmt;

use physmem_abi::Paddr;


/// Lowest physical address permitted by default.
pub const DEFAULT_LOWEST_PADDR: Paddr = Paddr::new(0x100);

/// Highest physical address permitted by default (64 GiB).
pub const DEFAULT_HIGHEST_PADDR: Paddr = Paddr::new(0x10_0000_0000);

/// Inclusive window of permitted physical addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessPolicy {
    lowest: Paddr,
    highest: Paddr,
}

impl AccessPolicy {
    /// `[0x100, 0x10_0000_0000]`.
    pub const DEFAULT: Self = Self {
        lowest: DEFAULT_LOWEST_PADDR,
        highest: DEFAULT_HIGHEST_PADDR,
    };

    /// Create a window covering `lowest..=highest`.
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::InvertedWindow` if `lowest > highest`.
    pub const fn new(lowest: Paddr, highest: Paddr) -> Result<Self, PolicyError> {
        if lowest.as_u64() > highest.as_u64() {
            return Err(PolicyError::InvertedWindow { lowest, highest });
        }
        Ok(Self { lowest, highest })
    }

    /// Lowest permitted address.
    #[inline]
    #[must_use]
    pub const fn lowest(&self) -> Paddr {
        self.lowest
    }

    /// Highest permitted address.
    #[inline]
    #[must_use]
    pub const fn highest(&self) -> Paddr {
        self.highest
    }

    /// Check whether an access may start at `paddr`.
    #[inline]
    #[must_use]
    pub const fn permits(&self, paddr: Paddr) -> bool {
        paddr.as_u64() >= self.lowest.as_u64() && paddr.as_u64() <= self.highest.as_u64()
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Errors from building an [`AccessPolicy`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyError {
    /// The lower bound is above the upper bound.
    InvertedWindow {
        /// Requested lower bound.
        lowest: Paddr,
        /// Requested upper bound.
        highest: Paddr,
    },
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedWindow { lowest, highest } => {
                write!(f, "address window inverted: {lowest} > {highest}")
            }
        }
    }
}

impl core::error::Error for PolicyError {}
