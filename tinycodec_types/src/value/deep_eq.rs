use crate::value::Value;
use std::collections::HashSet;

/// Deep equality. Pointers are followed; a pair of cells already under
/// comparison is taken to be equal, which is what lets cyclic values compare.
impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        deep_eq(self, other, &mut HashSet::new())
    }
}

fn deep_eq(a: &Value, b: &Value, visiting: &mut HashSet<(usize, usize)>) -> bool {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::I8(a), Value::I8(b)) => a == b,
        (Value::I16(a), Value::I16(b)) => a == b,
        (Value::I32(a), Value::I32(b)) => a == b,
        (Value::I64(a), Value::I64(b)) => a == b,
        (Value::U8(a), Value::U8(b)) => a == b,
        (Value::U16(a), Value::U16(b)) => a == b,
        (Value::U32(a), Value::U32(b)) => a == b,
        (Value::U64(a), Value::U64(b)) => a == b,
        (Value::F32(a), Value::F32(b)) => a == b,
        (Value::F64(a), Value::F64(b)) => a == b,
        (Value::C64(a_re, a_im), Value::C64(b_re, b_im)) => a_re == b_re && a_im == b_im,
        (Value::C128(a_re, a_im), Value::C128(b_re, b_im)) => a_re == b_re && a_im == b_im,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => all_eq(a, b, visiting),
        (Value::Struct(a), Value::Struct(b)) => all_eq(a, b, visiting),
        (Value::Seq(a), Value::Seq(b)) => match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => all_eq(a, b, visiting),
            _ => false,
        },
        (Value::Map(a), Value::Map(b)) => match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|((a_k, a_v), (b_k, b_v))| {
                        deep_eq(a_k, b_k, visiting) && deep_eq(a_v, b_v, visiting)
                    })
            }
            _ => false,
        },
        (Value::Ptr(a), Value::Ptr(b)) => match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                if a.same(b) || !visiting.insert((a.addr(), b.addr())) {
                    return true;
                }
                let (a, b) = (a.borrow(), b.borrow());
                deep_eq(&a, &b, visiting)
            }
            _ => false,
        },
        (Value::Dynamic(a), Value::Dynamic(b)) => match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => a.shape == b.shape && deep_eq(&a.value, &b.value, visiting),
            _ => false,
        },
        (Value::Custom(a), Value::Custom(b)) => a.eq_dyn(&**b),
        _ => false,
    }
}

fn all_eq(a: &[Value], b: &[Value], visiting: &mut HashSet<(usize, usize)>) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(a, b)| deep_eq(a, b, visiting))
}
