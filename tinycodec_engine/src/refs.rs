//! Per-call pointer bookkeeping.
//!
//! Within one top-level encode or decode call, each distinct pointer cell gets
//! an index, assigned in the order cells are first sighted. Later sightings of
//! the same cell are written as a back-reference to that index.

use anyhow::Result;
use derive_more::{Deref, Display, From};
use std::collections::HashMap;
use tinycodec_types::{Ref, TinyError};

#[derive(From, Deref, Display, PartialEq, Eq, Clone, Copy, Debug)]
pub struct RefIndex(u64);

#[derive(PartialEq, Eq, Debug)]
pub enum Sighting {
    First(RefIndex),
    Back(RefIndex),
}

#[derive(Default)]
pub struct EncodeRefs {
    seen: HashMap<usize, RefIndex>,
    /* Keeps every sighted cell alive, so that an address is never reused within the call. */
    held: Vec<Ref>,
}

impl EncodeRefs {
    pub fn sight(&mut self, cell: &Ref) -> Sighting {
        let next = RefIndex(self.seen.len() as u64);
        match self.seen.get(&cell.addr()) {
            Some(index) => Sighting::Back(*index),
            None => {
                self.seen.insert(cell.addr(), next);
                self.held.push(cell.clone());
                Sighting::First(next)
            }
        }
    }
}

#[derive(Default)]
pub struct DecodeRefs {
    slots: Vec<Ref>,
}

impl DecodeRefs {
    /// Registers a cell before its pointee is decoded, so that the pointee may refer back to it.
    pub fn preregister(&mut self, cell: Ref) -> RefIndex {
        let index = RefIndex(self.slots.len() as u64);
        self.slots.push(cell);
        index
    }

    pub fn resolve(&self, index: u64) -> Result<Ref> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.slots.get(i))
            .cloned()
            .ok_or_else(|| {
                TinyError::CorruptReference {
                    index,
                    assigned: self.slots.len(),
                }
                .into()
            })
    }
}
