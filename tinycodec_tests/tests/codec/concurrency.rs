use crate::codec::fixtures::{gen_base, zero_slots, Shapes};
use anyhow::{anyhow, Result};
use std::sync::Barrier;
use std::thread;
use tinycodec_engine::{compile, Decoder, Encoder};
use tinycodec_types::{Shape, Typed, Value};

const THREADS: usize = 8;

#[test]
fn racing_compilations_agree() -> Result<()> {
    let shapes = Shapes::new()?;
    let shape = Shape::map(Shape::Str, Shape::seq(shapes.cir_struct.clone()));
    let barrier = Barrier::new(THREADS);

    let engines = thread::scope(|s| {
        let handles = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    compile(&shape)
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .map(|handle| handle.join().map_err(|_| anyhow!("compiling thread panicked"))?)
            .collect::<Result<Vec<_>>>()
    })?;

    for engine in engines.iter() {
        assert!(engines[0].same(engine));
    }
    assert!(engines[0].same(&compile(&shape)?));
    Ok(())
}

/// Engines are shared; buffers and reference tracking are per session.
#[test]
fn independent_sessions_in_parallel() -> Result<()> {
    let shapes = Shapes::new()?;
    let shape = Shape::structure([
        ("base", shapes.base.clone()),
        ("list", Shape::ptr(shapes.cir_struct.clone())),
    ]);
    let barrier = Barrier::new(THREADS);

    thread::scope(|s| {
        let handles = (0..THREADS)
            .map(|i| {
                let (shape, barrier) = (&shape, &barrier);
                s.spawn(move || -> Result<()> {
                    let mut rng = rand::thread_rng();
                    let list = Value::ptr(Value::Struct(vec![
                        Value::I64(i as i64),
                        Value::ptr(Value::Struct(vec![Value::I64(-1), Value::Ptr(None)])),
                    ]));
                    let src = [Typed::new(
                        shape.clone(),
                        Value::Struct(vec![gen_base(&mut rng), list]),
                    )];

                    barrier.wait();
                    let mut enc = Encoder::new(&src)?;
                    let dec = Decoder::new(&src)?;
                    for _ in 0..50 {
                        let buf = enc.encode(&src)?;
                        let mut ret = zero_slots(&src)?;
                        dec.decode(buf, &mut ret)?;
                        assert_eq!(src[..], ret[..]);
                    }
                    Ok(())
                })
            })
            .collect::<Vec<_>>();
        handles
            .into_iter()
            .try_for_each(|handle| handle.join().map_err(|_| anyhow!("session thread panicked"))?)
    })
}
