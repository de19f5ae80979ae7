use thiserror::Error;

/// The conditions a caller may want to branch on.
///
/// Operations return [`anyhow::Result`]; these variants travel inside the
/// [`anyhow::Error`] and are recovered with `err.downcast_ref::<TinyError>()`.
#[derive(Error, PartialEq, Eq, Clone, Debug)]
pub enum TinyError {
    /// The shape describes a construct that has no wire representation.
    #[error("shape {shape} cannot be encoded")]
    UnsupportedShape { shape: String },

    /// A dynamic position holds a value whose shape was never registered, or,
    /// when decoding, names a tag no shape is registered under. The latter reads `tag N`.
    #[error("shape {shape} is not registered for dynamic positions")]
    UnregisteredShape { shape: String },

    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },

    #[error("unexpected end of input at offset {offset}: {needed} more byte(s) needed")]
    UnexpectedEnd { offset: usize, needed: usize },

    /// A back-reference names an index with no earlier first occurrence.
    #[error("back-reference to index {index} but only {assigned} reference(s) were assigned")]
    CorruptReference { index: u64, assigned: usize },

    /// Seqs, maps, pointers and dynamic values nest deeper than the session allows.
    #[error("value nests deeper than the limit of {limit}")]
    DepthExceeded { limit: usize },

    #[error("malformed input at offset {offset}: {reason}")]
    Malformed { offset: usize, reason: &'static str },
}
