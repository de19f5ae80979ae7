//! Shape-directed compilation of [`Engine`]s, memoized for the life of the process.

mod containers;
mod indirect;
mod prims;


use crate::engine::{Engine, Procs};
use anyhow::Result;
use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tinycodec_types::{Shape, TinyError, Value};
use tracing::{debug, trace};

type Slot = Arc<OnceCell<Engine>>;

static ENGINES: Lazy<RwLock<HashMap<Shape, Slot>>> = Lazy::new(Default::default);

/// Returns the engine of `shape`, compiling it on first sight.
///
/// Every caller receives the same engine for the same shape. Callers racing on
/// an uncompiled shape wait for the first of them to finish.
pub fn compile(shape: &Shape) -> Result<Engine> {
    if let Some(engine) = published(shape) {
        return Ok(engine);
    }

    let slot = ENGINES.write().entry(shape.clone()).or_default().clone();
    let mut compilation = Compilation::default();
    let engine = slot
        .get_or_try_init(|| {
            let engine = compilation.engine(shape)?;
            debug!(%shape, width = ?engine.width(), "compiled");
            Ok::<_, anyhow::Error>(engine)
        })?
        .clone();

    compilation.built.remove(shape);
    compilation.publish();
    Ok(engine)
}

fn published(shape: &Shape) -> Option<Engine> {
    ENGINES.read().get(shape).and_then(|slot| slot.get()).cloned()
}

pub(crate) fn mismatch(shape: &Shape, found: &Value) -> anyhow::Error {
    TinyError::SchemaMismatch {
        expected: shape.to_string(),
        found: found.kind().to_string(),
    }
    .into()
}

/// A named shape encodes exactly as its body.
fn forward(body: Engine) -> Procs {
    let (encode, decode) = (body.clone(), body.clone());
    Procs::new(
        body.width(),
        move |value, buf, state| encode.encode(value, buf, state),
        move |cur, state| decode.decode(cur, state),
    )
}

/// A shape whose engine is being compiled.
struct Pending {
    shape: Shape,
    engine: Engine,
    indirections: usize,
}

/// The state of one root compilation.
///
/// Engines compiled as parts of the root are kept in `built` and published only
/// once the root is done, so that no slot is ever waited on by its own thread.
/// A shape met again while its own engine is pending gets that pending engine,
/// so each shape has one engine per compilation.
#[derive(Default)]
struct Compilation {
    built: HashMap<Shape, Engine>,
    pending: Vec<Pending>,
    /* Count of seqs, maps and pointers enclosing the shape being compiled. */
    indirections: usize,
}

impl Compilation {
    fn engine(&mut self, shape: &Shape) -> Result<Engine> {
        if let Some(pending) = self.pending.iter().find(|p| &p.shape == shape) {
            /* Without an indirection in between, the shape contains itself and has no finite value. */
            if pending.indirections == self.indirections {
                return Err(shape.unsupported());
            }
            return Ok(pending.engine.clone());
        }
        if let Some(engine) = self.built.get(shape) {
            return Ok(engine.clone());
        }
        if let Some(engine) = published(shape) {
            return Ok(engine);
        }

        let engine = Engine::pending(shape.clone());
        self.pending.push(Pending {
            shape: shape.clone(),
            engine: engine.clone(),
            indirections: self.indirections,
        });
        let res = match shape {
            Shape::Named(named) => match named.body() {
                Some(body) => self.engine(body).map(forward),
                None => Err(shape.unsupported()),
            },
            _ => self.procs(shape),
        };
        self.pending.pop();

        engine.fill(res?)?;
        self.built.insert(shape.clone(), engine.clone());
        Ok(engine)
    }

    /// Compiles `shape` one indirection deeper.
    fn indirect(&mut self, shape: &Shape) -> Result<Engine> {
        self.indirections += 1;
        let res = self.engine(shape);
        self.indirections -= 1;
        res
    }

    fn procs(&mut self, shape: &Shape) -> Result<Procs> {
        match shape {
            Shape::Prim(prim) => Ok(prims::prim(*prim)),
            Shape::Str => Ok(prims::string()),
            Shape::Array(len, elem) => {
                let elem = self.engine(elem)?;
                Ok(containers::array(shape.clone(), *len, elem))
            }
            Shape::Seq(elem) => {
                let elem = self.indirect(elem)?;
                Ok(containers::seq(shape.clone(), elem))
            }
            Shape::Map(key, val) => {
                let key = self.indirect(key)?;
                let val = self.indirect(val)?;
                Ok(containers::map(shape.clone(), key, val))
            }
            Shape::Struct(fields) => {
                let engines = fields
                    .iter()
                    .map(|field| self.engine(&field.shape))
                    .collect::<Result<Vec<_>>>()?;
                Ok(containers::structure(shape.clone(), engines))
            }
            Shape::Ptr(elem) => {
                let elem = self.indirect(elem)?;
                Ok(indirect::ptr(shape.clone(), elem))
            }
            Shape::Dynamic => Ok(indirect::dynamic()),
            Shape::Custom(custom) => Ok(indirect::custom(shape.clone(), custom.clone())),
            Shape::Named(_) | Shape::Opaque(_) => Err(shape.unsupported()),
        }
    }

    fn publish(self) {
        if self.built.is_empty() {
            return;
        }
        /* Slots are set outside the map lock: setting a slot waits out any thread initializing it. */
        let slots = {
            let mut engines = ENGINES.write();
            self.built
                .into_iter()
                .map(|(shape, engine)| {
                    let slot = engines.entry(shape.clone()).or_default().clone();
                    (shape, slot, engine)
                })
                .collect::<Vec<_>>()
        };
        for (shape, slot, engine) in slots {
            if slot.set(engine).is_err() {
                trace!(%shape, "already published");
            }
        }
    }
}
