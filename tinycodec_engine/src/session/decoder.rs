use crate::engine::DecodeState;
use crate::session::{Schema, SessionConfig};
use anyhow::Result;
use tinycodec_types::wire::Cursor;
use tinycodec_types::{Shape, Typed, Value};

/// Reads values of a fixed [`Schema`].
pub struct Decoder {
    schema: Schema,
    config: SessionConfig,
}

impl Decoder {
    pub fn new(examples: &[Typed]) -> Result<Self> {
        Self::with_config(examples, SessionConfig::default())
    }

    pub fn with_config(examples: &[Typed], config: SessionConfig) -> Result<Self> {
        Ok(Self {
            schema: Schema::from_examples(examples)?,
            config,
        })
    }

    pub fn from_shapes(shapes: impl IntoIterator<Item = Shape>, config: SessionConfig) -> Result<Self> {
        Ok(Self {
            schema: Schema::from_shapes(shapes)?,
            config,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Decodes one value per schema position from the front of `buf` into `slots`,
    /// and returns the count of bytes consumed.
    ///
    /// Slots are assigned only if every position decodes.
    pub fn decode(&self, buf: &[u8], slots: &mut [Typed]) -> Result<usize> {
        self.schema.check(slots)?;
        let (values, consumed) = self.read_all(buf)?;
        for (slot, value) in slots.iter_mut().zip(values) {
            slot.value = value;
        }
        Ok(consumed)
    }

    pub fn decode_values(&self, buf: &[u8], slots: &mut [Value]) -> Result<usize> {
        self.schema.check_arity(slots.len())?;
        let (values, consumed) = self.read_all(buf)?;
        for (slot, value) in slots.iter_mut().zip(values) {
            *slot = value;
        }
        Ok(consumed)
    }

    fn read_all(&self, buf: &[u8]) -> Result<(Vec<Value>, usize)> {
        let mut cur = Cursor::new(buf);
        let mut state = DecodeState::new(&self.config);
        let values = self
            .schema
            .engines()
            .iter()
            .map(|engine| engine.decode(&mut cur, &mut state))
            .collect::<Result<Vec<_>>>()?;
        Ok((values, cur.pos()))
    }
}
