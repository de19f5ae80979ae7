//! Single-byte markers that precede nilable and shared values.

use anyhow::Result;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use tinycodec_types::wire::{Cursor, TinyWrite};
use tinycodec_types::TinyError;

/// Leads every seq, map, pointer and dynamic value.
#[repr(u8)]
#[derive(PartialEq, Eq, Clone, Copy, FromPrimitive, Debug)]
pub enum Presence {
    Nil = 0,
    Present = 1,
}

/// Follows the [`Presence`] of a non-nil pointer.
#[repr(u8)]
#[derive(PartialEq, Eq, Clone, Copy, FromPrimitive, Debug)]
pub enum RefMarker {
    /// The pointee follows inline.
    First = 0,
    /// An index into the pointers already decoded follows.
    Back = 1,
}

impl Presence {
    pub fn of<T>(opt: &Option<T>) -> Self {
        match opt {
            None => Presence::Nil,
            Some(_) => Presence::Present,
        }
    }
    pub fn put(self, buf: &mut Vec<u8>) {
        buf.put_u8(self as u8);
    }
    pub fn read(cur: &mut Cursor) -> Result<Self> {
        let offset = cur.pos();
        let byte = cur.read_u8()?;
        Presence::from_u8(byte).ok_or_else(|| {
            TinyError::Malformed {
                offset,
                reason: "presence flag is neither 0 nor 1",
            }
            .into()
        })
    }
}

impl RefMarker {
    pub fn put(self, buf: &mut Vec<u8>) {
        buf.put_u8(self as u8);
    }
    pub fn read(cur: &mut Cursor) -> Result<Self> {
        let offset = cur.pos();
        let byte = cur.read_u8()?;
        RefMarker::from_u8(byte).ok_or_else(|| {
            TinyError::Malformed {
                offset,
                reason: "reference marker is neither 0 nor 1",
            }
            .into()
        })
    }
}
