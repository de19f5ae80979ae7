use crate::compiler::mismatch;
use crate::engine::{DecodeState, Engine, Procs, Width};
use crate::flags::Presence;
use anyhow::Result;
use std::sync::Arc;
use tinycodec_types::wire::{Cursor, TinyWrite};
use tinycodec_types::{Shape, TinyError, Value};

fn length_mismatch(shape: &Shape, what: &str, len: usize) -> anyhow::Error {
    TinyError::SchemaMismatch {
        expected: shape.to_string(),
        found: format!("{what} of {len} element(s)"),
    }
    .into()
}

/// The element count that follows a presence flag.
///
/// Capacity is bounded by the remaining input, so a corrupt count cannot force a huge allocation.
/// Elements that may occupy no bytes are not bounded by the input, so their count is checked
/// against the session's limit instead.
fn read_count(cur: &mut Cursor, width: Width, state: &DecodeState) -> Result<(usize, usize)> {
    let offset = cur.pos();
    let count = cur.read_len()?;
    match width {
        Width::Fixed(w) if w > 0 => cur.require(w.saturating_mul(count))?,
        _ if count > cur.remaining() && count > state.max_elements => {
            return Err(TinyError::Malformed {
                offset,
                reason: "element count exceeds the limit",
            }
            .into());
        }
        _ => {}
    }
    Ok((count, count.min(cur.remaining())))
}

pub(super) fn array(shape: Shape, len: usize, elem: Engine) -> Procs {
    let width = elem.width().times(len);
    let (encode, decode) = (elem.clone(), elem);
    Procs::new(
        width,
        move |value, buf, state| match value {
            Value::Array(items) if items.len() == len => {
                if let Width::Fixed(total) = width {
                    buf.reserve(total);
                }
                for item in items {
                    encode.encode(item, buf, state)?;
                }
                Ok(())
            }
            Value::Array(items) => Err(length_mismatch(&shape, "array", items.len())),
            other => Err(mismatch(&shape, other)),
        },
        move |cur, state| {
            if let Width::Fixed(total) = width {
                cur.require(total)?;
            }
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(decode.decode(cur, state)?);
            }
            Ok(Value::Array(items))
        },
    )
}

pub(super) fn seq(shape: Shape, elem: Engine) -> Procs {
    let width = elem.width();
    let (encode, decode) = (elem.clone(), elem);
    Procs::new(
        Width::Variable,
        move |value, buf, state| match value {
            Value::Seq(items) => {
                Presence::of(items).put(buf);
                if let Some(items) = items {
                    buf.put_uvarint(items.len() as u64);
                    if let Width::Fixed(w) = width {
                        buf.reserve(w.saturating_mul(items.len()));
                    }
                    state.nested(|state| {
                        for item in items {
                            encode.encode(item, buf, state)?;
                        }
                        Ok(())
                    })?;
                }
                Ok(())
            }
            other => Err(mismatch(&shape, other)),
        },
        move |cur, state| {
            if Presence::read(cur)? == Presence::Nil {
                return Ok(Value::Seq(None));
            }
            let (count, cap) = read_count(cur, width, state)?;
            let items = state.nested(|state| {
                let mut items = Vec::with_capacity(cap);
                for _ in 0..count {
                    items.push(decode.decode(cur, state)?);
                }
                Ok(items)
            })?;
            Ok(Value::Seq(Some(items)))
        },
    )
}

pub(super) fn map(shape: Shape, key: Engine, val: Engine) -> Procs {
    let width = Width::sum([key.width(), val.width()]);
    let (encode_key, encode_val) = (key.clone(), val.clone());
    let (decode_key, decode_val) = (key, val);
    Procs::new(
        Width::Variable,
        move |value, buf, state| match value {
            Value::Map(entries) => {
                Presence::of(entries).put(buf);
                if let Some(entries) = entries {
                    buf.put_uvarint(entries.len() as u64);
                    state.nested(|state| {
                        for (k, v) in entries {
                            encode_key.encode(k, buf, state)?;
                            encode_val.encode(v, buf, state)?;
                        }
                        Ok(())
                    })?;
                }
                Ok(())
            }
            other => Err(mismatch(&shape, other)),
        },
        move |cur, state| {
            if Presence::read(cur)? == Presence::Nil {
                return Ok(Value::Map(None));
            }
            let (count, cap) = read_count(cur, width, state)?;
            let entries = state.nested(|state| {
                let mut entries = Vec::with_capacity(cap);
                for _ in 0..count {
                    let k = decode_key.decode(cur, state)?;
                    let v = decode_val.decode(cur, state)?;
                    entries.push((k, v));
                }
                Ok(entries)
            })?;
            Ok(Value::Map(Some(entries)))
        },
    )
}

/// Fields in declaration order, with nothing in between. A struct with no fields occupies no bytes.
pub(super) fn structure(shape: Shape, fields: Vec<Engine>) -> Procs {
    let width = Width::sum(fields.iter().map(Engine::width));
    let fields: Arc<[Engine]> = fields.into();
    let (encode, decode) = (fields.clone(), fields);
    Procs::new(
        width,
        move |value, buf, state| match value {
            Value::Struct(values) if values.len() == encode.len() => {
                for (field, value) in encode.iter().zip(values) {
                    field.encode(value, buf, state)?;
                }
                Ok(())
            }
            Value::Struct(values) => Err(length_mismatch(&shape, "struct", values.len())),
            other => Err(mismatch(&shape, other)),
        },
        move |cur, state| {
            let values = decode
                .iter()
                .map(|field| field.decode(cur, state))
                .collect::<Result<Vec<_>>>()?;
            Ok(Value::Struct(values))
        },
    )
}
