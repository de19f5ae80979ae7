use crate::compiler::compile;
use crate::engine::Engine;
use anyhow::Result;
use tinycodec_types::{Shape, TinyError, Typed};
use tracing::trace;

/// The ordered shapes a session reads and writes, with their engines.
///
/// Positions, not names, tie values to shapes.
#[derive(Clone, Debug)]
pub struct Schema {
    engines: Vec<Engine>,
}

impl Schema {
    pub fn from_examples(examples: &[Typed]) -> Result<Self> {
        Self::from_shapes(examples.iter().map(|typed| typed.shape.clone()))
    }

    pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>) -> Result<Self> {
        let engines = shapes
            .into_iter()
            .map(|shape| compile(&shape))
            .collect::<Result<Vec<_>>>()?;
        trace!(len = engines.len(), "schema frozen");
        Ok(Self { engines })
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }
    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.engines.iter().map(Engine::shape)
    }

    pub(crate) fn engines(&self) -> &[Engine] {
        &self.engines
    }

    pub(crate) fn check_arity(&self, len: usize) -> Result<()> {
        if len != self.len() {
            return Err(TinyError::SchemaMismatch {
                expected: format!("{} value(s)", self.len()),
                found: format!("{len} value(s)"),
            }
            .into());
        }
        Ok(())
    }

    /// Each position must hold exactly the shape the schema was built with.
    pub(crate) fn check(&self, typed: &[Typed]) -> Result<()> {
        self.check_arity(typed.len())?;
        for (expected, typed) in self.shapes().zip(typed) {
            if expected != &typed.shape {
                return Err(TinyError::SchemaMismatch {
                    expected: expected.to_string(),
                    found: typed.shape.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}
