use crate::codec::fixtures::{typed, Note, Shapes};
use anyhow::{anyhow, Result};
use tinycodec_engine::{decodes, encodes};
use tinycodec_types::{Ref, Shape, TinyError, TinyHook, Typed, Value};

/// A temperature kept in tenths of a degree, as two little-endian bytes.
#[derive(Clone, PartialEq, Default, Debug)]
struct Celsius(f32);

impl TinyHook for Celsius {
    fn tiny_encode(&self, buf: &mut Vec<u8>) {
        let tenths = (self.0 * 10.0).round() as i16;
        buf.extend_from_slice(&tenths.to_le_bytes());
    }
    fn tiny_decode(&mut self, buf: &[u8]) -> Result<usize> {
        let bytes = buf.get(..2).ok_or_else(|| anyhow!("Celsius needs 2 bytes"))?;
        let tenths = i16::from_le_bytes([bytes[0], bytes[1]]);
        self.0 = f32::from(tenths) / 10.0;
        Ok(2)
    }
}

/// Claims to have consumed more than it was given.
#[derive(Clone, PartialEq, Default, Debug)]
struct Greedy;

impl TinyHook for Greedy {
    fn tiny_encode(&self, buf: &mut Vec<u8>) {
        buf.push(0);
    }
    fn tiny_decode(&mut self, buf: &[u8]) -> Result<usize> {
        Ok(buf.len() + 1)
    }
}

fn tiny_error(err: anyhow::Error) -> Option<TinyError> {
    err.downcast_ref::<TinyError>().cloned()
}

/// A hook on one field governs that field alone. Its siblings follow the generic rules.
#[test]
fn hook_inside_an_aggregate() -> Result<()> {
    let shapes = Shapes::new()?;
    let celsius = Shape::custom::<Celsius>("Celsius");
    let reading = Shape::structure([
        ("station", Shape::U16),
        ("temp", celsius.clone()),
        ("note", shapes.note.clone()),
        ("history", Shape::seq(celsius)),
    ]);
    let src = [Typed::new(
        reading,
        Value::Struct(vec![
            Value::U16(300),
            Value::custom(Celsius(-1.5)),
            Value::custom(Note(String::from("ok"))),
            Value::seq(vec![Value::custom(Celsius(20.0)), Value::custom(Celsius(0.1))]),
        ]),
    )];

    let buf = encodes(&src)?;
    let mut expected = vec![0xac, 0x02];
    expected.extend_from_slice(&(-15i16).to_le_bytes());
    expected.extend_from_slice(&[2, b'o', b'k', 1, 2]);
    expected.extend_from_slice(&200i16.to_le_bytes());
    expected.extend_from_slice(&1i16.to_le_bytes());
    assert_eq!(expected, buf);

    let mut ret = [Typed::zero(src[0].shape.clone())?];
    assert_eq!(buf.len(), decodes(&buf, &mut ret)?);
    assert_eq!(src, ret);
    Ok(())
}

#[test]
fn value_of_another_custom_type() -> Result<()> {
    let shapes = Shapes::new()?;
    let src = [Typed::new(shapes.note.clone(), Value::custom(Celsius(1.0)))];
    let err = encodes(&src).unwrap_err();
    assert_eq!(
        Some(TinyError::SchemaMismatch {
            expected: String::from("Note"),
            found: String::from("custom"),
        }),
        tiny_error(err)
    );

    let src = [Typed::new(shapes.note, Value::Str(String::from("plain")))];
    assert!(encodes(&src).is_err());
    Ok(())
}

#[test]
fn hook_errors_reach_the_caller() -> Result<()> {
    let celsius = Shape::custom::<Celsius>("Celsius");
    let mut ret = [Typed::zero(celsius)?];
    let err = decodes(&[1], &mut ret).unwrap_err();
    assert_eq!("Celsius needs 2 bytes", err.to_string());

    let greedy = Shape::custom::<Greedy>("Greedy");
    let buf = encodes(&[Typed::new(greedy.clone(), Value::custom(Greedy))])?;
    let mut ret = [Typed::zero(greedy)?];
    let err = decodes(&buf, &mut ret).unwrap_err();
    assert_eq!(
        Some(TinyError::UnexpectedEnd {
            offset: 0,
            needed: 1
        }),
        tiny_error(err)
    );
    Ok(())
}

/// Nil and shared pointers to custom values still go through the tracker.
#[test]
fn pointers_to_custom_values() -> Result<()> {
    let shapes = Shapes::new()?;
    let note = Ref::new(Value::custom(Note(String::from("n"))));
    let ptr = Shape::ptr(shapes.note.clone());
    let src = [
        Typed::new(ptr.clone(), Value::Ptr(Some(note.clone()))),
        Typed::new(ptr.clone(), Value::Ptr(Some(note))),
        Typed::new(ptr, Value::Ptr(None)),
        typed(1u8),
    ];
    let buf = encodes(&src)?;
    assert_eq!(vec![1, 0, 1, b'n', 1, 1, 0, 0, 1], buf);

    let mut ret = src.clone();
    for slot in ret.iter_mut() {
        *slot = Typed::zero(slot.shape.clone())?;
    }
    decodes(&buf, &mut ret)?;
    assert_eq!(src, ret);
    Ok(())
}
