use crate::compiler::{compile, mismatch};
use crate::engine::{Engine, Procs, Width};
use crate::flags::{Presence, RefMarker};
use crate::refs::Sighting;
use std::sync::Arc;
use tinycodec_types::shape::CustomShape;
use tinycodec_types::wire::TinyWrite;
use tinycodec_types::{Ref, Shape, Typed, Value};

/// A pointee is written in full at its first occurrence within a call, and as
/// a back-reference index at every later one.
///
/// On decode, the cell of a first occurrence is registered before its pointee
/// is decoded, so a pointee that leads back to its own cell resolves to it.
pub(super) fn ptr(shape: Shape, elem: Engine) -> Procs {
    let (encode, decode) = (elem.clone(), elem);
    Procs::new(
        Width::Variable,
        move |value, buf, state| match value {
            Value::Ptr(cell) => {
                Presence::of(cell).put(buf);
                if let Some(cell) = cell {
                    match state.refs.sight(cell) {
                        Sighting::First(_) => {
                            RefMarker::First.put(buf);
                            let pointee = cell.borrow();
                            state.nested(|state| encode.encode(&pointee, buf, state))?;
                        }
                        Sighting::Back(index) => {
                            RefMarker::Back.put(buf);
                            buf.put_uvarint(*index);
                        }
                    }
                }
                Ok(())
            }
            other => Err(mismatch(&shape, other)),
        },
        move |cur, state| {
            if Presence::read(cur)? == Presence::Nil {
                return Ok(Value::Ptr(None));
            }
            match RefMarker::read(cur)? {
                RefMarker::First => {
                    let cell = Ref::new(Value::zero(decode.shape())?);
                    state.refs.preregister(cell.clone());
                    let pointee = state.nested(|state| decode.decode(cur, state))?;
                    cell.set(pointee);
                    Ok(Value::Ptr(Some(cell)))
                }
                RefMarker::Back => {
                    let index = cur.read_uvarint()?;
                    let cell = state.refs.resolve(index)?;
                    Ok(Value::Ptr(Some(cell)))
                }
            }
        },
    )
}

/// The concrete shape is looked up in the registry at every value.
pub(super) fn dynamic() -> Procs {
    Procs::new(
        Width::Variable,
        |value, buf, state| match value {
            Value::Dynamic(typed) => {
                Presence::of(typed).put(buf);
                if let Some(typed) = typed {
                    let tag = state.registry.tag_of(&typed.shape)?;
                    let engine = compile(&typed.shape)?;
                    buf.put_uvarint(*tag);
                    state.nested(|state| engine.encode(&typed.value, buf, state))?;
                }
                Ok(())
            }
            other => Err(mismatch(&Shape::Dynamic, other)),
        },
        |cur, state| {
            if Presence::read(cur)? == Presence::Nil {
                return Ok(Value::Dynamic(None));
            }
            let tag = cur.read_uvarint()?;
            let shape = state.registry.resolve(tag)?;
            let engine = compile(&shape)?;
            let value = state.nested(|state| engine.decode(cur, state))?;
            Ok(Value::dynamic(Typed::new(shape, value)))
        },
    )
}

/// The value's own hooks do all the work.
pub(super) fn custom(shape: Shape, custom: Arc<CustomShape>) -> Procs {
    let decode_custom = custom.clone();
    Procs::new(
        Width::Variable,
        move |value, buf, _| match value {
            Value::Custom(value) if custom.admits(&**value) => {
                value.tiny_encode(buf);
                Ok(())
            }
            other => Err(mismatch(&shape, other)),
        },
        move |cur, _| {
            let mut value = decode_custom.new_value();
            let consumed = value.tiny_decode(cur.rest())?;
            cur.advance(consumed)?;
            Ok(Value::Custom(value))
        },
    )
}
