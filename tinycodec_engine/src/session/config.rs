use crate::registry::Registry;
use std::sync::Arc;

/// Nesting levels allowed to one call. Each level costs several stack frames.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Elements a decoded seq or map may claim beyond one per remaining input byte.
pub const DEFAULT_MAX_ELEMENTS: usize = 1 << 20;

#[derive(Clone)]
pub struct SessionConfig {
    /// Capacity reserved up front for an encoder's own buffer.
    pub initial_capacity: usize,
    /// Consulted at dynamic positions. Writer and reader must agree on its contents.
    pub registry: Arc<Registry>,
    /// Seqs, maps, pointers and dynamic values nested deeper than this fail with
    /// [`tinycodec_types::TinyError::DepthExceeded`] instead of exhausting the stack.
    pub max_depth: usize,
    /// Bounds the count of a decoded seq or map whose elements may occupy no bytes.
    /// Other counts are bounded by the input itself.
    pub max_elements: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            registry: Registry::global().clone(),
            max_depth: DEFAULT_MAX_DEPTH,
            max_elements: DEFAULT_MAX_ELEMENTS,
        }
    }
}

impl SessionConfig {
    pub fn with_registry(mut self, registry: Arc<Registry>) -> Self {
        self.registry = registry;
        self
    }
    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
    pub fn with_max_elements(mut self, max_elements: usize) -> Self {
        self.max_elements = max_elements;
        self
    }
}
