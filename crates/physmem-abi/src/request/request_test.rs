// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Tests for the wire record.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

#[test]
fn read_builder_clears_value() {
    let request = MmioRequest::read(Paddr::new(0xFF00_D400), AccessWidth::U8);
    assert_eq!(request.size, 1);
    assert!(!request.is_write());
    assert_eq!(request.value, 0);
    assert_eq!(request.width(), Some(AccessWidth::U8));
}

#[test]
fn write_builder_keeps_value() {
    let request = MmioRequest::write(Paddr::new(0x2000), AccessWidth::U16, 0xBEEF);
    assert_eq!(request.size, 2);
    assert!(request.is_write());
    assert_eq!(request.value, 0xBEEF);
}

#[test]
fn raw_size_is_not_interpreted() {
    let request = MmioRequest::raw(Paddr::new(0x1000), 3, false, 0);
    assert!(request.width().is_none());
}

#[test]
fn encode_layout() {
    let request = MmioRequest::raw(
        Paddr::new(0x0102_0304_0506_0708),
        4,
        true,
        0x1122_3344_5566_7788,
    );
    let bytes = request.encode();

    assert_eq!(&bytes[0..8], &[0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
    assert_eq!(&bytes[8..12], &[4, 0, 0, 0]);
    assert_eq!(bytes[12], 1);
    assert_eq!(&bytes[13..16], &[0, 0, 0]);
    assert_eq!(&bytes[16..24], &[0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
}

#[test]
fn decode_restores_fields() {
    let request = MmioRequest::write(Paddr::new(0x2000), AccessWidth::U16, 0xBEEF);
    let decoded = MmioRequest::decode(&request.encode()).unwrap();
    assert_eq!(decoded, request);
}

#[test]
fn decode_any_nonzero_is_write() {
    let mut bytes = MmioRequest::read(Paddr::new(0x1000), AccessWidth::U32).encode();
    bytes[12] = 0x80;
    let decoded = MmioRequest::decode(&bytes).unwrap();
    assert!(decoded.is_write());
    assert_eq!(decoded.encode()[12], 0x80);
}

#[test]
fn decode_ignores_trailing_bytes() {
    let request = MmioRequest::read(Paddr::new(0x1000), AccessWidth::U32);
    let mut buf = [0xAAu8; RECORD_SIZE + 8];
    buf[..RECORD_SIZE].copy_from_slice(&request.encode());

    assert_eq!(MmioRequest::decode(&buf).unwrap(), request);
}

#[test]
fn flag_and_reserved_bytes_survive_reencoding() {
    let mut bytes = MmioRequest::read(Paddr::new(0x1000), AccessWidth::U32).encode();
    bytes[12] = 0x02;
    bytes[13] = 0x5A;
    bytes[15] = 0xFF;

    let mut decoded = MmioRequest::decode(&bytes).unwrap();
    assert!(decoded.is_write());
    decoded.value = 0x77;

    let reencoded = decoded.encode();
    assert_eq!(&reencoded[12..16], &[0x02, 0x5A, 0x00, 0xFF]);
    assert_eq!(reencoded[16], 0x77);
}

#[test]
fn decode_short_buffer() {
    let bytes = MmioRequest::read(Paddr::new(0x1000), AccessWidth::U8).encode();
    assert!(MmioRequest::decode(&bytes[..RECORD_SIZE - 1]).is_none());
    assert!(MmioRequest::decode(&[]).is_none());
}

#[test]
fn encode_into_leaves_tail_untouched() {
    let request = MmioRequest::read(Paddr::new(0x1000), AccessWidth::U8);
    let mut buf = [0xEEu8; RECORD_SIZE + 4];

    assert_eq!(request.encode_into(&mut buf), Some(RECORD_SIZE));
    assert_eq!(&buf[RECORD_SIZE..], &[0xEE; 4]);
}

#[test]
fn encode_into_short_buffer() {
    let request = MmioRequest::read(Paddr::new(0x1000), AccessWidth::U8);
    let mut buf = [0u8; RECORD_SIZE - 1];
    assert!(request.encode_into(&mut buf).is_none());
    assert_eq!(buf, [0u8; RECORD_SIZE - 1]);
}
