//! # Shapes
//!
//! A [`Shape`] says how a value is laid out, independent of any instance.
//!
//! Anonymous shapes (`[]u8`, `map[str]i64`, `struct { a: i64 }`, ...) are equal
//! when their structure is equal. Declared shapes ([`Shape::named`] and
//! [`Shape::custom`]) are equal only to themselves, i.e. to clones of the same
//! declaration. Every recursive shape passes through a named shape, which is
//! what keeps equality, hashing and display finite.
//!
//! ```text
//! let node = Shape::named("Node");
//! node.define(Shape::structure([
//!     ("value", Shape::I64),
//!     ("next", Shape::ptr(node.clone())),
//! ]))?;
//! ```

mod display;
mod named;
mod prim;


pub use named::*;
pub use prim::*;

use crate::value::CustomValue;
use crate::TinyError;
use anyhow::{anyhow, Result};
use std::any::TypeId;
use std::hash::{Hash, Hasher};
use std::mem;
use std::sync::Arc;

#[derive(Clone)]
pub enum Shape {
    Prim(Prim),
    Str,
    Array(usize, Arc<Shape>),
    Seq(Arc<Shape>),
    Map(Arc<Shape>, Arc<Shape>),
    Ptr(Arc<Shape>),
    Dynamic,
    Struct(Arc<[Field]>),
    Named(Arc<NamedShape>),
    Custom(Arc<CustomShape>),
    /// A run-time construct with no wire representation, e.g. a function or a channel.
    Opaque(Arc<str>),
}

/* Shorthands for primitives. */
impl Shape {
    pub const BOOL: Shape = Shape::Prim(Prim::Bool);
    pub const I8: Shape = Shape::Prim(Prim::I8);
    pub const I16: Shape = Shape::Prim(Prim::I16);
    pub const I32: Shape = Shape::Prim(Prim::I32);
    pub const I64: Shape = Shape::Prim(Prim::I64);
    pub const U8: Shape = Shape::Prim(Prim::U8);
    pub const U16: Shape = Shape::Prim(Prim::U16);
    pub const U32: Shape = Shape::Prim(Prim::U32);
    pub const U64: Shape = Shape::Prim(Prim::U64);
    pub const F32: Shape = Shape::Prim(Prim::F32);
    pub const F64: Shape = Shape::Prim(Prim::F64);
    pub const C64: Shape = Shape::Prim(Prim::C64);
    pub const C128: Shape = Shape::Prim(Prim::C128);
}

/* Constructors. */
impl Shape {
    pub fn array(len: usize, elem: Shape) -> Self {
        Shape::Array(len, Arc::new(elem))
    }
    pub fn seq(elem: Shape) -> Self {
        Shape::Seq(Arc::new(elem))
    }
    pub fn map(key: Shape, value: Shape) -> Self {
        Shape::Map(Arc::new(key), Arc::new(value))
    }
    pub fn ptr(elem: Shape) -> Self {
        Shape::Ptr(Arc::new(elem))
    }

    /// An aggregate whose fields are encoded in the given order.
    pub fn structure<N, I>(fields: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Shape)>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, shape)| Field {
                name: name.into(),
                shape,
            })
            .collect::<Vec<_>>();
        Shape::Struct(fields.into())
    }

    /// Declares a shape whose body is supplied later through [`Shape::define`].
    pub fn named(name: impl Into<String>) -> Self {
        Shape::Named(Arc::new(NamedShape::new(name.into())))
    }

    /// Declares a shape whose values encode themselves through [`crate::TinyHook`].
    pub fn custom<T>(name: impl Into<String>) -> Self
    where
        T: CustomValue + Default + 'static,
    {
        Shape::Custom(Arc::new(CustomShape {
            name: name.into(),
            type_id: TypeId::of::<T>(),
            new: new_custom::<T>,
        }))
    }

    pub fn opaque(name: &str) -> Self {
        Shape::Opaque(Arc::from(name))
    }
}

fn new_custom<T: CustomValue + Default + 'static>() -> Box<dyn CustomValue> {
    Box::new(T::default())
}

/* Named shapes. */
impl Shape {
    pub fn define(&self, body: Shape) -> Result<()> {
        match self {
            Shape::Named(named) => named.define(body),
            _ => Err(anyhow!("{self} is not a named shape and cannot be defined")),
        }
    }

    /// Follows named shapes down to the first shape that is not named.
    pub fn resolve(&self) -> Result<&Shape> {
        let mut visited: Vec<*const NamedShape> = vec![];
        let mut shape = self;
        while let Shape::Named(named) = shape {
            if visited.contains(&Arc::as_ptr(named)) {
                return Err(self.unsupported());
            }
            visited.push(Arc::as_ptr(named));
            shape = named.body().ok_or_else(|| self.unsupported())?;
        }
        Ok(shape)
    }

    pub fn unsupported(&self) -> anyhow::Error {
        TinyError::UnsupportedShape {
            shape: self.to_string(),
        }
        .into()
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Shape::Prim(a), Shape::Prim(b)) => a == b,
            (Shape::Str, Shape::Str) => true,
            (Shape::Dynamic, Shape::Dynamic) => true,
            (Shape::Array(len_a, a), Shape::Array(len_b, b)) => len_a == len_b && a == b,
            (Shape::Seq(a), Shape::Seq(b)) => a == b,
            (Shape::Ptr(a), Shape::Ptr(b)) => a == b,
            (Shape::Map(key_a, val_a), Shape::Map(key_b, val_b)) => {
                key_a == key_b && val_a == val_b
            }
            (Shape::Struct(a), Shape::Struct(b)) => a == b,
            (Shape::Named(a), Shape::Named(b)) => Arc::ptr_eq(a, b),
            (Shape::Custom(a), Shape::Custom(b)) => Arc::ptr_eq(a, b),
            (Shape::Opaque(a), Shape::Opaque(b)) => a == b,
            _ => false,
        }
    }
}
impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match self {
            Shape::Prim(prim) => prim.hash(state),
            Shape::Str | Shape::Dynamic => {}
            Shape::Array(len, elem) => {
                len.hash(state);
                elem.hash(state);
            }
            Shape::Seq(elem) | Shape::Ptr(elem) => elem.hash(state),
            Shape::Map(key, val) => {
                key.hash(state);
                val.hash(state);
            }
            Shape::Struct(fields) => fields.hash(state),
            Shape::Named(named) => (Arc::as_ptr(named) as usize).hash(state),
            Shape::Custom(custom) => (Arc::as_ptr(custom) as usize).hash(state),
            Shape::Opaque(name) => name.hash(state),
        }
    }
}
