// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Core type definitions for addresses and access widths.
//!
//! These newtypes prevent accidentally mixing physical and mapped addresses
//! at compile time.

mod addr;
mod width;


pub use addr::{Paddr, Vaddr};
pub use width::AccessWidth;
