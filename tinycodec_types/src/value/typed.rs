use crate::shape::Shape;
use crate::tiny::Tiny;
use crate::value::Value;
use crate::TinyError;
use anyhow::Result;

/// A value together with the shape it conforms to.
///
/// This is what a dynamic position holds, and what sessions are built from.
#[derive(Clone, PartialEq, Debug)]
pub struct Typed {
    pub shape: Shape,
    pub value: Value,
}

impl Typed {
    pub fn new(shape: Shape, value: Value) -> Self {
        Self { shape, value }
    }

    /// A slot holding the zero value of `shape`, e.g. a decode destination.
    pub fn zero(shape: Shape) -> Result<Self> {
        let value = Value::zero(&shape)?;
        Ok(Self { shape, value })
    }

    pub fn of<T: Tiny>(t: &T) -> Self {
        Self {
            shape: T::shape(),
            value: t.to_value(),
        }
    }

    pub fn into_tiny<T: Tiny>(self) -> Result<T> {
        let expected = T::shape();
        if self.shape != expected {
            return Err(TinyError::SchemaMismatch {
                expected: expected.to_string(),
                found: self.shape.to_string(),
            }
            .into());
        }
        T::from_value(self.value)
    }
}
