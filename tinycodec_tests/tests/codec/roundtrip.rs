use crate::codec::fixtures::{
    gen_base, gen_person, person_shape, random_string, typed, zero_slots, Note, Shapes,
};
use anyhow::Result;
use itertools::Itertools;
use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};
use tinycodec_engine::{decodes, encodes, Decoder, Encoder, Registry};
use tinycodec_types::{Ref, Shape, Typed, Value};

/// Values of every supported kind, including zero values, nil containers and integer extremes.
fn catalog(shapes: &Shapes, rng: &mut ThreadRng) -> Vec<Typed> {
    let vint = Ref::new(Value::I64(123456));
    let vint1 = Ref::new(Value::I64(123456));
    let vint2 = Ref::new(Value::I64(1234567));
    let vnilptr = Ref::new(Value::Ptr(None));

    let base_arr_shape = Shape::array(3, shapes.base.clone());
    let base_arr = Value::Array(vec![gen_base(rng), gen_base(rng), gen_base(rng)]);
    Registry::global().register(base_arr_shape.clone());

    let note = Value::custom(Note(String::from("aaaaaaaaaaaaaaaaaaaaa")));
    let cir_map = Value::map(vec![(Value::I64(1), Value::Map(None))]);

    vec![
        typed(true),
        typed(false),
        typed(123i8),
        typed(-12345i16),
        typed(123456i32),
        typed(-1234567i64),
        typed(i64::MAX),
        typed(i64::MIN),
        typed(rng.gen::<i64>()),
        typed(123456isize),
        typed(123usize),
        typed(123u8),
        typed(12345u16),
        typed(123456u32),
        typed(1234567u64),
        typed(u64::MAX),
        typed(rng.gen::<u64>()),
        typed(0u64),
        typed(1.2345f32),
        typed(1.2345678f64),
        Typed::new(Shape::C64, Value::C64(1.2345, 2.3456)),
        Typed::new(Shape::C128, Value::C128(1.2345678, 2.3456789)),
        typed(String::from("hello,日本国")),
        typed(String::new()),
        Typed::new(shapes.base.clone(), gen_base(rng)),
        typed(b"aaaaaaaaaaaaaaaaaaa".to_vec()),
        typed(vec![
            b"aaaaaaaaaaaaaaaaaaa".to_vec(),
            b"bbbbbbbbbbbbbbb".to_vec(),
            b"ccccccccccccc".to_vec(),
        ]),
        typed(vec![1i64, 2, 3, 4, 5]),
        typed(Vec::<u8>::new()),
        Typed::new(Shape::seq(Shape::U8), Value::Seq(None)),
        Typed::new(base_arr_shape.clone(), base_arr.clone()),
        typed(BTreeMap::from([(1i64, 2i64), (2, 3), (3, 4), (4, 5), (5, 6)])),
        typed(BTreeMap::from([(1i64, BTreeMap::from([(2i64, 3i64), (3, 4)]))])),
        typed(BTreeMap::from([(1i64, vec![2u8, 3, 3, 4])])),
        Typed::new(
            Shape::map(Shape::I64, Shape::ptr(Shape::I64)),
            Value::map(vec![(Value::I64(1), Value::Ptr(Some(vint.clone())))]),
        ),
        Typed::new(
            Shape::map(Shape::I64, shapes.base.clone()),
            Value::map(vec![
                (Value::I64(1), gen_base(rng)),
                (Value::I64(2), gen_base(rng)),
            ]),
        ),
        Typed::new(
            Shape::map(Shape::ptr(Shape::I64), shapes.base.clone()),
            Value::map(vec![
                (Value::Ptr(Some(vint1)), gen_base(rng)),
                (Value::Ptr(Some(vint2)), gen_base(rng)),
            ]),
        ),
        Typed::new(
            Shape::map(Shape::I64, base_arr_shape.clone()),
            Value::map(vec![(Value::I64(1), base_arr.clone())]),
        ),
        Typed::new(Shape::map(Shape::I64, Shape::I64), Value::Map(None)),
        Typed::new(Shape::ptr(Shape::I64), Value::Ptr(Some(vint.clone()))),
        Typed::new(
            Shape::ptr(Shape::seq(Shape::U8)),
            Value::ptr(Value::bytes(b"aaaaaaaaaaaaaaaaaaa")),
        ),
        Typed::new(
            Shape::seq(Shape::ptr(Shape::I64)),
            Value::seq(vec![
                Value::Ptr(Some(vint.clone())),
                Value::Ptr(Some(vint.clone())),
                Value::Ptr(Some(vint)),
            ]),
        ),
        typed(Option::<i64>::None),
        Typed::new(
            Shape::ptr(Shape::ptr(Shape::I64)),
            Value::Ptr(Some(vnilptr)),
        ),
        Typed::new(Shape::ptr(base_arr_shape.clone()), Value::ptr(base_arr.clone())),
        Typed::new(
            Shape::seq(shapes.base.clone()),
            Value::seq(vec![gen_base(rng), gen_base(rng), gen_base(rng)]),
        ),
        typed(vec![
            String::from("aaaaaaaaa"),
            String::from("bbbbbbbbb"),
            String::from("ccccccccc"),
        ]),
        Typed::new(
            Shape::Dynamic,
            Value::dynamic(Typed::new(base_arr_shape, base_arr)),
        ),
        Typed::new(Shape::Dynamic, Value::Dynamic(None)),
        Typed::new(shapes.cir_typ.clone(), Value::Ptr(None)),
        Typed::new(
            shapes.cir_typ.clone(),
            Value::ptr(Value::Ptr(None)),
        ),
        Typed::new(
            shapes.cir_struct.clone(),
            Value::Struct(vec![Value::I64(1), Value::Ptr(None)]),
        ),
        Typed::new(
            shapes.cir_struct.clone(),
            Value::Struct(vec![
                Value::I64(1),
                Value::ptr(Value::Struct(vec![Value::I64(1), Value::Ptr(None)])),
            ]),
        ),
        Typed::new(shapes.cir_map.clone(), cir_map.clone()),
        Typed::new(
            shapes.cir_map.clone(),
            Value::map(vec![(Value::I64(2), cir_map)]),
        ),
        typed(SystemTime::now()),
        typed(Duration::from_millis(1500)),
        Typed::new(person_shape(), gen_person(rng)),
        Typed::new(shapes.note.clone(), note.clone()),
        Typed::new(Shape::ptr(shapes.note.clone()), Value::ptr(note)),
        Typed::new(Shape::structure::<&str, _>([]), Value::Struct(vec![])),
    ]
}

fn verify(src: &[Typed]) -> Result<()> {
    let mut enc = Encoder::new(src)?;
    enc.append_to(Vec::with_capacity(1 << 13));
    let buf = enc.encode(src)?.to_vec();

    let dec = Decoder::new(src)?;
    let mut ret = zero_slots(src)?;
    let consumed = dec.decode(&buf, &mut ret)?;
    assert_eq!(buf.len(), consumed);
    for (src, ret) in src.iter().zip(ret.iter()) {
        assert_eq!(src, ret, "\n{:?}\n", buf);
    }
    Ok(())
}

#[test]
fn session_round_trip() -> Result<()> {
    let shapes = Shapes::new()?;
    let src = catalog(&shapes, &mut rand::thread_rng());
    verify(&src)
}

#[test]
fn one_shot_round_trip() -> Result<()> {
    let shapes = Shapes::new()?;
    let src = catalog(&shapes, &mut rand::thread_rng());

    let buf = encodes(&src)?;
    let mut ret = zero_slots(&src)?;
    assert_eq!(buf.len(), decodes(&buf, &mut ret)?);
    assert_eq!(src, ret);
    Ok(())
}

#[test]
fn values_path_matches_typed_path() -> Result<()> {
    let shapes = Shapes::new()?;
    let src = catalog(&shapes, &mut rand::thread_rng());
    let values = src.iter().map(|typed| typed.value.clone()).collect::<Vec<_>>();

    let mut enc = Encoder::new(&src)?;
    let typed_buf = enc.encode(&src)?.to_vec();
    let values_buf = enc.encode_values(&values)?.to_vec();
    assert_eq!(typed_buf, values_buf);

    let dec = Decoder::new(&src)?;
    let mut ret = zero_slots(&src)?
        .into_iter()
        .map(|typed| typed.value)
        .collect::<Vec<_>>();
    dec.decode_values(&values_buf, &mut ret)?;
    assert_eq!(values, ret);
    Ok(())
}

/// Every subset of a few generators, in declaration and in shuffled order.
#[test]
fn subsets_in_any_order() -> Result<()> {
    let shapes = Shapes::new()?;
    let mut rng = rand::thread_rng();

    type Gen = fn(&Shapes, &mut ThreadRng) -> Typed;
    let gens: [Gen; 7] = [
        |_, rng| typed(rng.gen::<i32>()),
        |_, rng| typed(rng.gen::<u64>() >> rng.gen_range(0..64u32)),
        |shapes, rng| Typed::new(shapes.base.clone(), gen_base(rng)),
        |shapes, _| Typed::new(shapes.cir_typ.clone(), Value::ptr(Value::Ptr(None))),
        |shapes, rng| {
            let note = Note(random_string(rng, 12));
            Typed::new(shapes.note.clone(), Value::custom(note))
        },
        |_, rng| typed(vec![Some(rng.gen::<i16>()), None]),
        |_, rng| Typed::new(person_shape(), gen_person(rng)),
    ];

    for mut gens in gens.iter().powerset() {
        let src = gens.iter().map(|gen| gen(&shapes, &mut rng)).collect::<Vec<_>>();
        verify(&src)?;

        gens.shuffle(&mut rng);
        let src = gens.iter().map(|gen| gen(&shapes, &mut rng)).collect::<Vec<_>>();
        verify(&src)?;
    }
    Ok(())
}
