// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Wire contract between unprivileged callers and the physmem component.
//!
//! This crate defines everything both sides of the privilege boundary must
//! agree on byte-for-byte:
//! - Address newtypes for physical and mapped addresses
//! - The access width of a single MMIO operation
//! - The fixed-layout request/response record
//! - Operation selectors and status codes
//!
//! # Design Principles
//!
//! - **No dependencies**: Pure data types, 100% host-testable
//! - **Stable layout**: The record is encoded explicitly, never transmuted
//! - **64-bit only**: Addresses and values are always 64 bits wide
//!
//! # Modules
//!
//! - [`types`]: `Paddr`, `Vaddr`, `AccessWidth`
//! - [`request`]: `MmioRequest` and its wire encoding
//! - [`status`]: `Selector` and `Status`

#![cfg_attr(not(test), no_std)]

pub mod request;
pub mod status;
pub mod types;

// Re-export commonly used types at crate root
pub use request::{MmioRequest, RECORD_SIZE};
pub use status::{Selector, Status};
pub use types::{AccessWidth, Paddr, Vaddr};
