use crate::value::Value;
use std::cell::{self, RefCell};
use std::fmt;
use std::rc::Rc;

/// A pointer. Clones share the cell; the cell's address is its identity.
#[derive(Clone)]
pub struct Ref(Rc<RefCell<Value>>);

impl Ref {
    pub fn new(pointee: Value) -> Self {
        Self(Rc::new(RefCell::new(pointee)))
    }

    pub fn borrow(&self) -> cell::Ref<'_, Value> {
        self.0.borrow()
    }
    pub fn borrow_mut(&self) -> cell::RefMut<'_, Value> {
        self.0.borrow_mut()
    }
    /// Replaces the pointee, returning the previous one.
    pub fn set(&self, pointee: Value) -> Value {
        self.0.replace(pointee)
    }

    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
    pub fn same(&self, other: &Ref) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/* Only the address is printed; the pointee may lead back to this cell. */
impl fmt::Debug for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ref({:#x})", self.addr())
    }
}
