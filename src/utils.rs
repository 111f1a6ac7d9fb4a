//! Fixed-width encoding primitives
//!
//! All multi-byte integers in an ABIF file are big-endian. These helpers render a single
//! value into a fixed-size array so callers can concatenate them without intermediate
//! allocation.

use byteorder::{BigEndian, ByteOrder};

/// Encodes an unsigned 8-bit value
#[must_use]
pub fn mk_u8(v: u8) -> [u8; 1] {
    [v]
}

/// Encodes a signed 8-bit value
#[must_use]
pub fn mk_i8(v: i8) -> [u8; 1] {
    v.to_be_bytes()
}

/// Encodes an unsigned 16-bit value in big-endian order
#[must_use]
pub fn mk_u16(v: u16) -> [u8; 2] {
    let mut buf = [0u8; 2];
    BigEndian::write_u16(&mut buf, v);
    buf
}

/// Encodes a signed 16-bit value in big-endian order
#[must_use]
pub fn mk_i16(v: i16) -> [u8; 2] {
    let mut buf = [0u8; 2];
    BigEndian::write_i16(&mut buf, v);
    buf
}

/// Encodes an unsigned 32-bit value in big-endian order
#[must_use]
pub fn mk_u32(v: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    BigEndian::write_u32(&mut buf, v);
    buf
}

/// Encodes a signed 32-bit value in big-endian order
#[must_use]
pub fn mk_i32(v: i32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    BigEndian::write_i32(&mut buf, v);
    buf
}

/// Pads `s` with spaces or truncates it to exactly `len` bytes
///
/// Operates on the UTF-8 bytes of `s`, so a multi-byte character may be cut.
/// Tag names are ASCII in practice.
#[must_use]
pub fn str_of_len(s: &str, len: usize) -> Vec<u8> {
    let mut buf: Vec<u8> = s.bytes().take(len).collect();
    buf.resize(len, b' ');
    buf
}

/// Same as [`str_of_len`] for the common 4-byte tag name case
#[must_use]
pub fn tag_name(s: &str) -> [u8; 4] {
    let mut buf = [b' '; 4];
    for (dst, src) in buf.iter_mut().zip(s.bytes()) {
        *dst = src;
    }
    buf
}
