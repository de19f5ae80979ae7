use crate::compiler::mismatch;
use crate::engine::{Procs, Width};
use tinycodec_types::wire::TinyWrite;
use tinycodec_types::{Prim, Shape, TinyError, Value};

fn out_of_range(offset: usize) -> anyhow::Error {
    TinyError::Malformed {
        offset,
        reason: "integer is out of range for its width",
    }
    .into()
}

macro_rules! uvarint_prim {
    ($variant:ident, $ty:ty) => {
        Procs::new(
            Width::Variable,
            |value, buf, _| match value {
                Value::$variant(u) => {
                    buf.put_uvarint(u64::from(*u));
                    Ok(())
                }
                other => Err(mismatch(&Shape::Prim(Prim::$variant), other)),
            },
            |cur, _| {
                let offset = cur.pos();
                let u = cur.read_uvarint()?;
                <$ty>::try_from(u)
                    .map(Value::$variant)
                    .map_err(|_| out_of_range(offset))
            },
        )
    };
}

macro_rules! ivarint_prim {
    ($variant:ident, $ty:ty) => {
        Procs::new(
            Width::Variable,
            |value, buf, _| match value {
                Value::$variant(i) => {
                    buf.put_ivarint(i64::from(*i));
                    Ok(())
                }
                other => Err(mismatch(&Shape::Prim(Prim::$variant), other)),
            },
            |cur, _| {
                let offset = cur.pos();
                let i = cur.read_ivarint()?;
                <$ty>::try_from(i)
                    .map(Value::$variant)
                    .map_err(|_| out_of_range(offset))
            },
        )
    };
}

pub(super) fn prim(prim: Prim) -> Procs {
    let width = match prim.fixed_width() {
        Some(w) => Width::Fixed(w),
        None => Width::Variable,
    };
    match prim {
        Prim::Bool => Procs::new(
            width,
            |value, buf, _| match value {
                Value::Bool(b) => {
                    buf.put_bool(*b);
                    Ok(())
                }
                other => Err(mismatch(&Shape::BOOL, other)),
            },
            |cur, _| Ok(Value::Bool(cur.read_bool()?)),
        ),
        Prim::U8 => Procs::new(
            width,
            |value, buf, _| match value {
                Value::U8(u) => {
                    buf.put_u8(*u);
                    Ok(())
                }
                other => Err(mismatch(&Shape::U8, other)),
            },
            |cur, _| Ok(Value::U8(cur.read_u8()?)),
        ),
        Prim::I8 => Procs::new(
            width,
            |value, buf, _| match value {
                Value::I8(i) => {
                    buf.put_raw(&i.to_le_bytes());
                    Ok(())
                }
                other => Err(mismatch(&Shape::I8, other)),
            },
            |cur, _| Ok(Value::I8(i8::from_le_bytes([cur.read_u8()?]))),
        ),
        Prim::U16 => uvarint_prim!(U16, u16),
        Prim::U32 => uvarint_prim!(U32, u32),
        Prim::U64 => uvarint_prim!(U64, u64),
        Prim::I16 => ivarint_prim!(I16, i16),
        Prim::I32 => ivarint_prim!(I32, i32),
        Prim::I64 => ivarint_prim!(I64, i64),
        Prim::F32 => Procs::new(
            width,
            |value, buf, _| match value {
                Value::F32(f) => {
                    buf.put_f32(*f);
                    Ok(())
                }
                other => Err(mismatch(&Shape::F32, other)),
            },
            |cur, _| Ok(Value::F32(cur.read_f32()?)),
        ),
        Prim::F64 => Procs::new(
            width,
            |value, buf, _| match value {
                Value::F64(f) => {
                    buf.put_f64(*f);
                    Ok(())
                }
                other => Err(mismatch(&Shape::F64, other)),
            },
            |cur, _| Ok(Value::F64(cur.read_f64()?)),
        ),
        Prim::C64 => Procs::new(
            width,
            |value, buf, _| match value {
                Value::C64(re, im) => {
                    buf.put_f32(*re);
                    buf.put_f32(*im);
                    Ok(())
                }
                other => Err(mismatch(&Shape::C64, other)),
            },
            |cur, _| Ok(Value::C64(cur.read_f32()?, cur.read_f32()?)),
        ),
        Prim::C128 => Procs::new(
            width,
            |value, buf, _| match value {
                Value::C128(re, im) => {
                    buf.put_f64(*re);
                    buf.put_f64(*im);
                    Ok(())
                }
                other => Err(mismatch(&Shape::C128, other)),
            },
            |cur, _| Ok(Value::C128(cur.read_f64()?, cur.read_f64()?)),
        ),
    }
}

pub(super) fn string() -> Procs {
    Procs::new(
        Width::Variable,
        |value, buf, _| match value {
            Value::Str(s) => {
                buf.put_str(s);
                Ok(())
            }
            other => Err(mismatch(&Shape::Str, other)),
        },
        |cur, _| Ok(Value::Str(cur.read_str()?.to_string())),
    )
}
