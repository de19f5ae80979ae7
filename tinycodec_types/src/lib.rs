//! # Serialization format
//!
//! There are no field names, no type tags on static positions and no framing.
//! A reader must know the [`Shape`] of what it reads; position is the contract.
//!
//! Per value, recursively:
//!
//! ```text
//! struct Prim::{Bool, U8, I8} {
//!     body:           u8,
//! }
//! struct Prim::{U16, U32, U64} {
//!     body:           uvarint,
//! }
//! struct Prim::{I16, I32, I64} {
//!     body:           ivarint,
//! }
//! struct Prim::{F32, F64} {
//!     body:           [u8; 4 or 8],       // little-endian
//! }
//! struct Prim::{C64, C128} {
//!     real:           Prim::{F32, F64},
//!     imag:           Prim::{F32, F64},
//! }
//! struct Str {
//!     len:            uvarint,
//!     body:           [u8; len],          // UTF-8
//! }
//! struct Array(N, S) {
//!     elems:          [S; N],
//! }
//! struct Seq(S) {
//!     presence:       u8,                 // 0 = nil; nothing follows
//!     count:          uvarint,
//!     elems:          [S; count],
//! }
//! struct Map(K, V) {
//!     presence:       u8,
//!     count:          uvarint,
//!     entries:        [(K, V); count],
//! }
//! struct Ptr(S) {
//!     presence:       u8,
//!     marker:         u8,                 // 0 = first occurrence; 1 = back-reference
//!     body:           S or uvarint,       // the pointee, or the index of an earlier first occurrence
//! }
//! struct Dynamic {
//!     presence:       u8,
//!     tag:            uvarint,            // see the registry
//!     body:           registered shape,
//! }
//! struct Struct {
//!     field_0:        S_0,
//!     field_1:        S_1,
//!     ...
//! }
//! struct Custom {
//!     body:           whatever the type's hook wrote,
//! }
//! ```
//!
//! Named shapes are transparent: they encode as their body.

mod error;
pub mod shape;
mod tiny;
pub mod value;
pub mod wire;

pub use error::*;
pub use shape::{Field, Prim, Shape};
pub use tiny::*;
pub use value::{CustomValue, Ref, TinyHook, Typed, Value};
