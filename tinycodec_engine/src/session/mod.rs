//! Schema-bound encoders and decoders.
//!
//! A session fixes its schema once, at construction, from example values or
//! shapes. Every later call supplies one value or slot per schema position.
//! Reference tracking is scoped to a single call.

mod config;
mod decoder;
mod encoder;
mod schema;


pub use config::*;
pub use decoder::*;
pub use encoder::*;
pub use schema::*;
