use crate::codec::fixtures::{gen_base, typed, zero_slots, Shapes};
use anyhow::Result;
use tinycodec_engine::{decodes, encodes, marshal, unmarshal, Decoder, Encoder};
use tinycodec_types::{Shape, Typed, Value};

#[test]
fn hello_world() -> Result<()> {
    let src = [typed(String::from("hello")), typed(b" world!".to_vec())];
    let mut ret = [typed(String::new()), typed(vec![3u8, 4, 5])];
    let buf = encodes(&src)?;
    assert_eq!(buf.len(), decodes(&buf, &mut ret)?);

    let [hello, world] = ret;
    let hello = hello.into_tiny::<String>()?;
    let world = String::from_utf8(world.into_tiny::<Vec<u8>>()?)?;
    assert_eq!("hello world!", hello + &world);
    Ok(())
}

#[test]
fn hello_world_through_sessions() -> Result<()> {
    let src = [typed(String::from("hello")), typed(b" world!".to_vec())];
    let mut enc = Encoder::new(&src)?;
    let mut ret = [
        typed(String::new()),
        typed(vec![3u8, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4, 5, 6, 7, 44, 7, 5, 6, 4, 7]),
    ];
    let dec = Decoder::new(&ret)?;

    let buf = enc.encode(&src)?;
    dec.decode(buf, &mut ret)?;
    assert_eq!(src, ret);
    Ok(())
}

#[test]
fn repeated_bytes() -> Result<()> {
    let bytes = vec![3u8, 3, 3, 3, 3, 3, 3, 3, 3, 3, 4, 5, 6, 7, 44, 7, 5, 6, 4, 7];
    let buf = marshal(&bytes)?;
    assert_eq!(2 + 20, buf.len());
    assert_eq!(&bytes[..], &buf[2..]);

    let mut ret = [typed(b" world!".to_vec())];
    decodes(&buf, &mut ret)?;
    let [ret] = ret;
    assert_eq!(bytes, ret.into_tiny::<Vec<u8>>()?);

    assert_eq!(bytes, unmarshal::<Vec<u8>>(&buf)?);
    Ok(())
}

#[test]
fn nil_pointer_field() -> Result<()> {
    let shape = Shape::structure([("id", Shape::U32), ("parent", Shape::ptr(Shape::I64))]);
    let src = [Typed::new(
        shape.clone(),
        Value::Struct(vec![Value::U32(9), Value::Ptr(None)]),
    )];
    let buf = encodes(&src)?;
    assert_eq!(vec![9, 0], buf);

    /* The destination starts out pointing at something. */
    let mut ret = [Typed::new(
        shape,
        Value::Struct(vec![Value::U32(1), Value::ptr(Value::I64(0))]),
    )];
    decodes(&buf, &mut ret)?;
    assert_eq!(src, ret);

    assert_eq!(None, unmarshal::<Option<i64>>(&marshal(&Option::<i64>::None)?)?);
    Ok(())
}

/// Many encodings appended to a buffer that starts with no capacity.
#[test]
fn buffer_growth() -> Result<()> {
    let shapes = Shapes::new()?;
    let mut rng = rand::thread_rng();
    let records = (0..200)
        .map(|i| {
            vec![
                typed(i as u64),
                Typed::new(shapes.base.clone(), gen_base(&mut rng)),
            ]
        })
        .collect::<Vec<_>>();

    let enc = Encoder::from_shapes(
        [Shape::U64, shapes.base.clone()],
        Default::default(),
    )?;
    let mut buf = Vec::with_capacity(0);
    let mut ends = vec![];
    for record in records.iter() {
        enc.encode_into(record, &mut buf)?;
        ends.push(buf.len());
    }

    let dec = Decoder::from_shapes([Shape::U64, shapes.base.clone()], Default::default())?;
    let mut start = 0;
    for (record, end) in records.iter().zip(ends) {
        let mut ret = zero_slots(record)?;
        start += dec.decode(&buf[start..], &mut ret)?;
        assert_eq!(end, start);
        assert_eq!(record, &ret);
    }
    assert_eq!(buf.len(), start);
    Ok(())
}
