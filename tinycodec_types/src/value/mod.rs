//! # Values
//!
//! A [`Value`] is a dynamic tree that conforms to some [`Shape`]. The value does
//! not carry its shape; the pairing of the two is a [`Typed`].
//!
//! Pointers are [`Ref`]s. Cloning a `Ref` shares the cell, so graphs with shared
//! and cyclic references are ordinary values. Nothing else in a value is shared.

mod custom;
mod deep_eq;
mod reference;
mod typed;


pub use custom::*;
pub use reference::*;
pub use typed::*;

use crate::shape::Shape;
use anyhow::Result;

#[derive(Clone, Debug)]
pub enum Value {
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    /// Real part, imaginary part.
    C64(f32, f32),
    /// Real part, imaginary part.
    C128(f64, f64),
    Str(String),
    Array(Vec<Value>),
    /// `None` is nil, which is distinct from empty.
    Seq(Option<Vec<Value>>),
    /// Entries in insertion order. `None` is nil.
    Map(Option<Vec<(Value, Value)>>),
    Ptr(Option<Ref>),
    Dynamic(Option<Box<Typed>>),
    /// Field values in declaration order.
    Struct(Vec<Value>),
    Custom(Box<dyn CustomValue>),
}

/* Shorthands. */
impl Value {
    pub fn seq(items: Vec<Value>) -> Self {
        Value::Seq(Some(items))
    }
    pub fn bytes(bytes: &[u8]) -> Self {
        Value::Seq(Some(bytes.iter().map(|b| Value::U8(*b)).collect()))
    }
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Some(entries))
    }
    /// A pointer to a new, unshared cell.
    pub fn ptr(pointee: Value) -> Self {
        Value::Ptr(Some(Ref::new(pointee)))
    }
    pub fn dynamic(typed: Typed) -> Self {
        Value::Dynamic(Some(Box::new(typed)))
    }
    pub fn custom<T: CustomValue + 'static>(custom: T) -> Self {
        Value::Custom(Box::new(custom))
    }

    pub fn as_ref_cell(&self) -> Option<&Ref> {
        match self {
            Value::Ptr(Some(cell)) => Some(cell),
            _ => None,
        }
    }
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::C64(..) => "c64",
            Value::C128(..) => "c128",
            Value::Str(_) => "str",
            Value::Array(_) => "array",
            Value::Seq(_) => "seq",
            Value::Map(_) => "map",
            Value::Ptr(_) => "ptr",
            Value::Dynamic(_) => "dyn",
            Value::Struct(_) => "struct",
            Value::Custom(_) => "custom",
        }
    }

    /// The value a freshly allocated instance of `shape` holds.
    ///
    /// Containers, pointers and dynamic values are nil, so the recursion only
    /// follows arrays, structs and named shapes. A named shape met twice on
    /// that path contains itself and has no finite value.
    pub fn zero(shape: &Shape) -> Result<Value> {
        Self::zero_(shape, &mut vec![])
    }

    fn zero_(shape: &Shape, enclosing: &mut Vec<Shape>) -> Result<Value> {
        let value = match shape {
            Shape::Prim(prim) => {
                use crate::shape::Prim;
                match prim {
                    Prim::Bool => Value::Bool(false),
                    Prim::I8 => Value::I8(0),
                    Prim::I16 => Value::I16(0),
                    Prim::I32 => Value::I32(0),
                    Prim::I64 => Value::I64(0),
                    Prim::U8 => Value::U8(0),
                    Prim::U16 => Value::U16(0),
                    Prim::U32 => Value::U32(0),
                    Prim::U64 => Value::U64(0),
                    Prim::F32 => Value::F32(0.0),
                    Prim::F64 => Value::F64(0.0),
                    Prim::C64 => Value::C64(0.0, 0.0),
                    Prim::C128 => Value::C128(0.0, 0.0),
                }
            }
            Shape::Str => Value::Str(String::new()),
            Shape::Array(len, elem) => {
                let zero = Self::zero_(elem, enclosing)?;
                Value::Array(vec![zero; *len])
            }
            Shape::Seq(_) => Value::Seq(None),
            Shape::Map(..) => Value::Map(None),
            Shape::Ptr(_) => Value::Ptr(None),
            Shape::Dynamic => Value::Dynamic(None),
            Shape::Struct(fields) => {
                let fields = fields
                    .iter()
                    .map(|field| Self::zero_(&field.shape, enclosing))
                    .collect::<Result<Vec<_>>>()?;
                Value::Struct(fields)
            }
            Shape::Named(named) => {
                if enclosing.contains(shape) {
                    return Err(shape.unsupported());
                }
                let body = named.body().ok_or_else(|| shape.unsupported())?;
                enclosing.push(shape.clone());
                let zero = Self::zero_(body, enclosing)?;
                enclosing.pop();
                zero
            }
            Shape::Custom(custom) => Value::Custom(custom.new_value()),
            Shape::Opaque(_) => return Err(shape.unsupported()),
        };
        Ok(value)
    }
}
