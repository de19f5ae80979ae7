//! Compiles [`Shape`](tinycodec_types::Shape)s into [`Engine`]s and drives them
//! through schema-bound sessions.
//!
//! ```text
//! let examples = [Typed::of(&String::new()), Typed::of(&Vec::<u8>::new())];
//! let mut enc = Encoder::new(&examples)?;
//! let buf = enc.encode(&[Typed::of(&hello), Typed::of(&world)])?;
//!
//! let dec = Decoder::new(&examples)?;
//! let mut slots = examples.clone();
//! let consumed = dec.decode(buf, &mut slots)?;
//! ```

mod compiler;
mod engine;
mod flags;
mod oneshot;
mod refs;
mod registry;
mod session;

pub use compiler::compile;
pub use engine::*;
pub use flags::*;
pub use oneshot::*;
pub use refs::*;
pub use registry::*;
pub use session::*;
