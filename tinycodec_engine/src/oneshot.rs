//! Schema-free entry points. Each call builds a throwaway session; the engines
//! behind it are still cached.

use crate::session::{Decoder, Encoder};
use anyhow::Result;
use tinycodec_types::{Tiny, Typed};

pub fn encodes(values: &[Typed]) -> Result<Vec<u8>> {
    let mut enc = Encoder::new(values)?;
    enc.encode(values)?;
    Ok(enc.into_buffer())
}

/// Decodes into slots of the shapes they already hold, and returns the count of bytes consumed.
pub fn decodes(buf: &[u8], slots: &mut [Typed]) -> Result<usize> {
    let dec = Decoder::new(slots)?;
    dec.decode(buf, slots)
}

pub fn marshal<T: Tiny>(t: &T) -> Result<Vec<u8>> {
    encodes(&[Typed::of(t)])
}

pub fn unmarshal<T: Tiny>(buf: &[u8]) -> Result<T> {
    let mut slots = [Typed::zero(T::shape())?];
    decodes(buf, &mut slots)?;
    let [slot] = slots;
    slot.into_tiny()
}
