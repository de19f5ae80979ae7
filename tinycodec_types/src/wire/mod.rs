//! # Wire primitives
//!
//! Everything above this module is built from four kinds of item:
//!
//! ```text
//! uvarint {
//!     // Little-endian base-128 groups. The high bit of each byte is set
//!     // iff another byte follows. At most 10 bytes for a u64.
//!     groups:     [u8; 1..=10],
//! }
//!
//! ivarint {
//!     // Zig-zag mapped, so that small magnitudes stay short:
//!     // 0 => 0, -1 => 1, 1 => 2, -2 => 3, ...
//!     zigzag:     uvarint,
//! }
//!
//! fixed {
//!     // bool, u8, i8: one byte. f32, f64: little-endian IEEE-754 bits.
//!     body:       [u8; width],
//! }
//!
//! block {
//!     len:        uvarint,
//!     body:       [u8; len],
//! }
//! ```
//!
//! Writing appends to a `Vec<u8>`, which grows geometrically.
//! Reading goes through a [`Cursor`], which reports how far it got.

mod cursor;
mod write;


pub use cursor::*;
pub use write::*;

/// The longest encoding of a u64.
pub const MAX_VARINT_LEN: usize = 10;

pub fn zigzag(i: i64) -> u64 {
    ((i << 1) ^ (i >> 63)) as u64
}

pub fn unzigzag(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}
