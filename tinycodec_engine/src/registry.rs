//! Tags for the concrete shapes that may appear at dynamic positions.

use anyhow::{anyhow, Result};
use derive_more::{Deref, Display, From};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tinycodec_types::{Shape, TinyError};
use tracing::debug;

#[derive(From, Deref, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct Tag(u64);

#[derive(Default)]
struct Tables {
    tags: HashMap<Shape, Tag>,
    shapes: BTreeMap<Tag, Shape>,
}

/// A bidirectional mapping between concrete shapes and [`Tag`]s.
///
/// The writer and the reader of a stream must have made the same registrations.
#[derive(Default)]
pub struct Registry {
    tables: RwLock<Tables>,
}

static GLOBAL: Lazy<Arc<Registry>> = Lazy::new(|| Arc::new(Registry::new()));

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry, used unless a session is configured otherwise.
    pub fn global() -> &'static Arc<Registry> {
        &GLOBAL
    }

    /// Registers `shape` under the smallest unused tag.
    ///
    /// Registering a shape again returns the tag it already holds.
    pub fn register(&self, shape: Shape) -> Tag {
        let mut tables = self.tables.write();
        if let Some(tag) = tables.tags.get(&shape) {
            return *tag;
        }
        let mut next = 0u64;
        for tag in tables.shapes.keys() {
            if **tag != next {
                break;
            }
            next += 1;
        }
        let tag = Tag(next);
        debug!(%shape, %tag, "register");
        tables.tags.insert(shape.clone(), tag);
        tables.shapes.insert(tag, shape);
        tag
    }

    pub fn register_with_tag(&self, shape: Shape, tag: u64) -> Result<Tag> {
        let tag = Tag(tag);
        let mut tables = self.tables.write();
        match (tables.tags.get(&shape), tables.shapes.get(&tag)) {
            (Some(held), _) if *held == tag => return Ok(tag),
            (Some(held), _) => {
                return Err(anyhow!("shape {shape} is already registered under tag {held}"))
            }
            (None, Some(other)) => {
                return Err(anyhow!("tag {tag} is already taken by shape {other}"))
            }
            (None, None) => {}
        }
        debug!(%shape, %tag, "register");
        tables.tags.insert(shape.clone(), tag);
        tables.shapes.insert(tag, shape);
        Ok(tag)
    }

    pub fn tag_of(&self, shape: &Shape) -> Result<Tag> {
        let tables = self.tables.read();
        tables.tags.get(shape).copied().ok_or_else(|| {
            TinyError::UnregisteredShape {
                shape: shape.to_string(),
            }
            .into()
        })
    }

    pub fn resolve(&self, tag: u64) -> Result<Shape> {
        let tables = self.tables.read();
        tables
            .shapes
            .get(&Tag(tag))
            .cloned()
            .ok_or_else(|| {
                TinyError::UnregisteredShape {
                    shape: format!("tag {tag}"),
                }
                .into()
            })
    }

    pub fn len(&self) -> usize {
        self.tables.read().tags.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
