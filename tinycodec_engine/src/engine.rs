use crate::refs::{DecodeRefs, EncodeRefs};
use crate::registry::Registry;
use crate::session::SessionConfig;
use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use tinycodec_types::wire::Cursor;
use tinycodec_types::{Shape, TinyError, Value};

/// Count of seqs, maps, pointers and dynamic values enclosing the value at hand.
///
/// Only these can nest without bound; structs and arrays nest as deep as their shape.
pub(crate) struct Depth {
    current: usize,
    limit: usize,
}

impl Depth {
    fn new(limit: usize) -> Self {
        Self { current: 0, limit }
    }

    fn enter(&mut self) -> Result<()> {
        if self.current >= self.limit {
            return Err(TinyError::DepthExceeded { limit: self.limit }.into());
        }
        self.current += 1;
        Ok(())
    }

    fn leave(&mut self) {
        self.current -= 1;
    }
}

/// State scoped to one top-level encode call.
pub struct EncodeState {
    pub(crate) refs: EncodeRefs,
    pub(crate) registry: Arc<Registry>,
    depth: Depth,
}
impl EncodeState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            refs: EncodeRefs::default(),
            registry: config.registry.clone(),
            depth: Depth::new(config.max_depth),
        }
    }

    /// Runs `f` one nesting level deeper.
    pub(crate) fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        self.depth.enter()?;
        let res = f(self);
        self.depth.leave();
        res
    }
}

/// State scoped to one top-level decode call.
pub struct DecodeState {
    pub(crate) refs: DecodeRefs,
    pub(crate) registry: Arc<Registry>,
    pub(crate) max_elements: usize,
    depth: Depth,
}
impl DecodeState {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            refs: DecodeRefs::default(),
            registry: config.registry.clone(),
            max_elements: config.max_elements,
            depth: Depth::new(config.max_depth),
        }
    }

    pub(crate) fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> Result<R>) -> Result<R> {
        self.depth.enter()?;
        let res = f(self);
        self.depth.leave();
        res
    }
}

pub type EncodeFn = Box<dyn Fn(&Value, &mut Vec<u8>, &mut EncodeState) -> Result<()> + Send + Sync>;
pub type DecodeFn = Box<dyn Fn(&mut Cursor, &mut DecodeState) -> Result<Value> + Send + Sync>;

/// Whether the encoded size of a shape is known without looking at a value.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Width {
    Fixed(usize),
    Variable,
}

impl Width {
    pub fn times(self, count: usize) -> Width {
        match self {
            Width::Fixed(w) => w.checked_mul(count).map_or(Width::Variable, Width::Fixed),
            Width::Variable => Width::Variable,
        }
    }

    pub fn sum(widths: impl IntoIterator<Item = Width>) -> Width {
        let mut total = 0usize;
        for width in widths {
            match width {
                Width::Fixed(w) => match total.checked_add(w) {
                    Some(t) => total = t,
                    None => return Width::Variable,
                },
                Width::Variable => return Width::Variable,
            }
        }
        Width::Fixed(total)
    }
}

pub(crate) struct Procs {
    pub width: Width,
    pub encode: EncodeFn,
    pub decode: DecodeFn,
}

impl Procs {
    pub fn new<E, D>(width: Width, encode: E, decode: D) -> Self
    where
        E: Fn(&Value, &mut Vec<u8>, &mut EncodeState) -> Result<()> + Send + Sync + 'static,
        D: Fn(&mut Cursor, &mut DecodeState) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            width,
            encode: Box::new(encode),
            decode: Box::new(decode),
        }
    }
}

struct EngineInner {
    shape: Shape,
    procs: OnceCell<Procs>,
}

/// The compiled encode and decode procedures of one [`Shape`].
///
/// Clones share the procedures. An engine is created pending and filled once;
/// only engines of recursive shapes are ever observed while pending, and only
/// by engines compiled as their parts.
#[derive(Clone)]
pub struct Engine(Arc<EngineInner>);

impl Engine {
    pub(crate) fn pending(shape: Shape) -> Self {
        Self(Arc::new(EngineInner {
            shape,
            procs: OnceCell::new(),
        }))
    }

    pub(crate) fn fill(&self, procs: Procs) -> Result<()> {
        self.0
            .procs
            .set(procs)
            .map_err(|_| anyhow!("engine for {} is already compiled", self.0.shape))
    }

    fn procs(&self) -> Result<&Procs> {
        self.0.procs.get().ok_or_else(|| self.0.shape.unsupported())
    }

    pub fn shape(&self) -> &Shape {
        &self.0.shape
    }

    /// [`Width::Variable`] while pending.
    pub fn width(&self) -> Width {
        self.0
            .procs
            .get()
            .map_or(Width::Variable, |procs| procs.width)
    }

    pub fn same(&self, other: &Engine) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[cfg(test)]
    pub(crate) fn handles(&self) -> usize {
        Arc::strong_count(&self.0)
    }

    pub fn encode(&self, value: &Value, buf: &mut Vec<u8>, state: &mut EncodeState) -> Result<()> {
        (self.procs()?.encode)(value, buf, state)
    }

    pub fn decode(&self, cur: &mut Cursor, state: &mut DecodeState) -> Result<Value> {
        (self.procs()?.decode)(cur, state)
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("shape", &self.0.shape)
            .field("width", &self.width())
            .finish()
    }
}
