use crate::shape::Shape;
use crate::value::CustomValue;
use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;
use std::any::TypeId;
use std::fmt;

#[derive(PartialEq, Eq, Hash, Clone, Debug)]
pub struct Field {
    pub name: String,
    pub shape: Shape,
}

/// A declared shape. Its body may refer back to the declaration itself.
pub struct NamedShape {
    name: String,
    body: OnceCell<Shape>,
}

impl NamedShape {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            body: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn body(&self) -> Option<&Shape> {
        self.body.get()
    }

    pub(crate) fn define(&self, body: Shape) -> Result<()> {
        self.body
            .set(body)
            .map_err(|_| anyhow!("named shape {} is already defined", self.name))
    }
}

impl fmt::Debug for NamedShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedShape")
            .field("name", &self.name)
            .field("defined", &self.body.get().is_some())
            .finish()
    }
}

/// A declared shape whose values bypass the structural rules.
pub struct CustomShape {
    pub(crate) name: String,
    pub(crate) type_id: TypeId,
    pub(crate) new: fn() -> Box<dyn CustomValue>,
}

impl CustomShape {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `value` is an instance of the type this shape was declared for.
    pub fn admits(&self, value: &dyn CustomValue) -> bool {
        value.as_any().type_id() == self.type_id
    }

    /// A freshly allocated default instance, ready to be filled by its decode hook.
    pub fn new_value(&self) -> Box<dyn CustomValue> {
        (self.new)()
    }
}

impl fmt::Debug for CustomShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomShape")
            .field("name", &self.name)
            .finish()
    }
}
