use crate::engine::EncodeState;
use crate::session::{Schema, SessionConfig};
use anyhow::Result;
use tinycodec_types::{Shape, Typed, Value};

/// Writes values of a fixed [`Schema`], reusing one buffer across calls.
pub struct Encoder {
    schema: Schema,
    config: SessionConfig,
    buf: Vec<u8>,
    /* Length of the caller-provided bytes that precede every encoding. */
    prefix: usize,
}

impl Encoder {
    /// The schema is the shapes of `examples`; their values are ignored.
    pub fn new(examples: &[Typed]) -> Result<Self> {
        Self::with_config(examples, SessionConfig::default())
    }

    pub fn with_config(examples: &[Typed], config: SessionConfig) -> Result<Self> {
        let schema = Schema::from_examples(examples)?;
        Ok(Self::from_schema(schema, config))
    }

    pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>, config: SessionConfig) -> Result<Self> {
        let schema = Schema::from_shapes(shapes)?;
        Ok(Self::from_schema(schema, config))
    }

    fn from_schema(schema: Schema, config: SessionConfig) -> Self {
        Self {
            schema,
            buf: Vec::with_capacity(config.initial_capacity),
            config,
            prefix: 0,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Makes `buf` the session buffer. Its current bytes are kept in front of every encoding.
    pub fn append_to(&mut self, buf: Vec<u8>) {
        self.prefix = buf.len();
        self.buf = buf;
    }

    /// Encodes one value per schema position, replacing the previous encoding.
    ///
    /// Returns the whole buffer, prefix included.
    pub fn encode(&mut self, values: &[Typed]) -> Result<&[u8]> {
        self.buf.truncate(self.prefix);
        self.schema.check(values)?;
        self.write(values.iter().map(|typed| &typed.value))
    }

    /// Like [`Self::encode`], with shapes vouched for by the caller.
    ///
    /// A value that does not conform to its position still fails, once its engine meets it.
    pub fn encode_values(&mut self, values: &[Value]) -> Result<&[u8]> {
        self.buf.truncate(self.prefix);
        self.schema.check_arity(values.len())?;
        self.write(values.iter())
    }

    /// Appends an encoding to a caller-owned buffer and returns the count of bytes appended.
    ///
    /// On failure `buf` is left as it was.
    pub fn encode_into(&self, values: &[Typed], buf: &mut Vec<u8>) -> Result<usize> {
        self.schema.check(values)?;
        let start = buf.len();
        let res = write_all(
            &self.schema,
            &self.config,
            values.iter().map(|typed| &typed.value),
            buf,
        );
        if let Err(e) = res {
            buf.truncate(start);
            return Err(e);
        }
        Ok(buf.len() - start)
    }

    pub fn into_buffer(self) -> Vec<u8> {
        self.buf
    }

    fn write<'v>(&mut self, values: impl Iterator<Item = &'v Value>) -> Result<&[u8]> {
        let res = write_all(&self.schema, &self.config, values, &mut self.buf);
        if let Err(e) = res {
            self.buf.truncate(self.prefix);
            return Err(e);
        }
        Ok(&self.buf)
    }
}

fn write_all<'v>(
    schema: &Schema,
    config: &SessionConfig,
    values: impl Iterator<Item = &'v Value>,
    buf: &mut Vec<u8>,
) -> Result<()> {
    let mut state = EncodeState::new(config);
    for (engine, value) in schema.engines().iter().zip(values) {
        engine.encode(value, buf, &mut state)?;
    }
    Ok(())
}
