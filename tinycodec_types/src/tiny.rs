//! Bridges native Rust types to [`Shape`]s and [`Value`]s.

use crate::shape::Shape;
use crate::value::{Ref, Value};
use crate::TinyError;
use anyhow::{anyhow, Result};
use std::any;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub trait Tiny: Sized {
    fn shape() -> Shape;
    fn to_value(&self) -> Value;
    fn from_value(value: Value) -> Result<Self>;
}

fn mismatch<T: Tiny>(found: &Value) -> anyhow::Error {
    TinyError::SchemaMismatch {
        expected: format!("{} ({})", T::shape(), any::type_name::<T>()),
        found: found.kind().to_string(),
    }
    .into()
}

macro_rules! tiny_prim {
    ($ty:ty, $variant:ident, $shape:expr) => {
        impl Tiny for $ty {
            fn shape() -> Shape {
                $shape
            }
            fn to_value(&self) -> Value {
                Value::$variant(*self)
            }
            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::$variant(x) => Ok(x),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}

tiny_prim!(bool, Bool, Shape::BOOL);
tiny_prim!(i8, I8, Shape::I8);
tiny_prim!(i16, I16, Shape::I16);
tiny_prim!(i32, I32, Shape::I32);
tiny_prim!(i64, I64, Shape::I64);
tiny_prim!(u8, U8, Shape::U8);
tiny_prim!(u16, U16, Shape::U16);
tiny_prim!(u32, U32, Shape::U32);
tiny_prim!(u64, U64, Shape::U64);
tiny_prim!(f32, F32, Shape::F32);
tiny_prim!(f64, F64, Shape::F64);

/* The platform-sized integers travel as their 64-bit counterparts. */
impl Tiny for usize {
    fn shape() -> Shape {
        Shape::U64
    }
    fn to_value(&self) -> Value {
        Value::U64(*self as u64)
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::U64(u) => Ok(usize::try_from(u)?),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}
impl Tiny for isize {
    fn shape() -> Shape {
        Shape::I64
    }
    fn to_value(&self) -> Value {
        Value::I64(*self as i64)
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I64(i) => Ok(isize::try_from(i)?),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl Tiny for String {
    fn shape() -> Shape {
        Shape::Str
    }
    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// A nil sequence converts to an empty `Vec`.
impl<T: Tiny> Tiny for Vec<T> {
    fn shape() -> Shape {
        Shape::seq(T::shape())
    }
    fn to_value(&self) -> Value {
        Value::seq(self.iter().map(T::to_value).collect())
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Seq(None) => Ok(vec![]),
            Value::Seq(Some(items)) => items.into_iter().map(T::from_value).collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl<T: Tiny, const N: usize> Tiny for [T; N] {
    fn shape() -> Shape {
        Shape::array(N, T::shape())
    }
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(T::to_value).collect())
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(items) if items.len() == N => {
                let items = items
                    .into_iter()
                    .map(T::from_value)
                    .collect::<Result<Vec<_>>>()?;
                items
                    .try_into()
                    .map_err(|_| mismatch::<Self>(&Value::Array(vec![])))
            }
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// A nil mapping converts to an empty `BTreeMap`. Entries are encoded in key order.
impl<K: Tiny + Ord, V: Tiny> Tiny for BTreeMap<K, V> {
    fn shape() -> Shape {
        Shape::map(K::shape(), V::shape())
    }
    fn to_value(&self) -> Value {
        Value::map(
            self.iter()
                .map(|(k, v)| (k.to_value(), v.to_value()))
                .collect(),
        )
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Map(None) => Ok(BTreeMap::new()),
            Value::Map(Some(entries)) => entries
                .into_iter()
                .map(|(k, v)| -> Result<(K, V)> { Ok((K::from_value(k)?, V::from_value(v)?)) })
                .collect(),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

/// `Option<T>` is a nilable pointer. Every `Some` gets a cell of its own.
impl<T: Tiny> Tiny for Option<T> {
    fn shape() -> Shape {
        Shape::ptr(T::shape())
    }
    fn to_value(&self) -> Value {
        match self {
            None => Value::Ptr(None),
            Some(t) => Value::Ptr(Some(Ref::new(t.to_value()))),
        }
    }
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Ptr(None) => Ok(None),
            Value::Ptr(Some(cell)) => {
                let pointee = cell.borrow().clone();
                Ok(Some(T::from_value(pointee)?))
            }
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Whole seconds, then the nanoseconds below them.
impl Tiny for Duration {
    fn shape() -> Shape {
        Shape::structure([("secs", Shape::U64), ("nanos", Shape::U32)])
    }
    fn to_value(&self) -> Value {
        Value::Struct(vec![
            Value::U64(self.as_secs()),
            Value::U32(self.subsec_nanos()),
        ])
    }
    fn from_value(value: Value) -> Result<Self> {
        match &value {
            Value::Struct(fields) => match fields.as_slice() {
                [Value::U64(secs), Value::U32(nanos)] if *nanos < NANOS_PER_SEC => {
                    Ok(Duration::new(*secs, *nanos))
                }
                _ => Err(mismatch::<Self>(&value)),
            },
            _ => Err(mismatch::<Self>(&value)),
        }
    }
}

/// Seconds since the Unix epoch, negative before it, then nanoseconds counted forward
/// from that second.
impl Tiny for SystemTime {
    fn shape() -> Shape {
        Shape::structure([("secs", Shape::I64), ("nanos", Shape::U32)])
    }
    fn to_value(&self) -> Value {
        let (secs, nanos) = match self.duration_since(UNIX_EPOCH) {
            Ok(after) => (after.as_secs() as i64, after.subsec_nanos()),
            Err(err) => {
                let before = err.duration();
                match before.subsec_nanos() {
                    0 => (-(before.as_secs() as i64), 0),
                    n => (-(before.as_secs() as i64) - 1, NANOS_PER_SEC - n),
                }
            }
        };
        Value::Struct(vec![Value::I64(secs), Value::U32(nanos)])
    }
    fn from_value(value: Value) -> Result<Self> {
        let (secs, nanos) = match &value {
            Value::Struct(fields) => match fields.as_slice() {
                [Value::I64(secs), Value::U32(nanos)] if *nanos < NANOS_PER_SEC => (*secs, *nanos),
                _ => return Err(mismatch::<Self>(&value)),
            },
            _ => return Err(mismatch::<Self>(&value)),
        };
        let whole = Duration::from_secs(secs.unsigned_abs());
        let second = if secs < 0 {
            UNIX_EPOCH.checked_sub(whole)
        } else {
            UNIX_EPOCH.checked_add(whole)
        };
        second
            .and_then(|t| t.checked_add(Duration::from_nanos(u64::from(nanos))))
            .ok_or_else(|| anyhow!("{secs}s {nanos}ns from the epoch is not representable"))
    }
}
