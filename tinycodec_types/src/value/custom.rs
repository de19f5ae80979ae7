use anyhow::Result;
use std::any::Any;
use std::fmt;

/// The escape hatch for types whose encoding cannot be derived from their layout.
///
/// Encodings must be self-delimiting: `tiny_decode` receives every remaining byte
/// of the input and reports how many of them it consumed.
pub trait TinyHook {
    fn tiny_encode(&self, buf: &mut Vec<u8>);
    fn tiny_decode(&mut self, buf: &[u8]) -> Result<usize>;
}

/// A [`TinyHook`] type, erased so that it can sit inside a [`crate::Value`].
pub trait CustomValue: TinyHook + fmt::Debug {
    fn as_any(&self) -> &dyn Any;
    fn clone_box(&self) -> Box<dyn CustomValue>;
    fn eq_dyn(&self, other: &dyn CustomValue) -> bool;
}

impl<T> CustomValue for T
where
    T: TinyHook + Clone + PartialEq + fmt::Debug + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_box(&self) -> Box<dyn CustomValue> {
        Box::new(self.clone())
    }
    fn eq_dyn(&self, other: &dyn CustomValue) -> bool {
        match other.as_any().downcast_ref::<T>() {
            None => false,
            Some(other) => self == other,
        }
    }
}

impl Clone for Box<dyn CustomValue> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
