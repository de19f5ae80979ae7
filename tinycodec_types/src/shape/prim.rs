/// Primitive kinds. Complex numbers are a pair of floats, real part first.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum Prim {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    C64,
    C128,
}

impl Prim {
    /// `None` for the kinds that are varint-encoded.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Prim::Bool | Prim::I8 | Prim::U8 => Some(1),
            Prim::F32 => Some(4),
            Prim::F64 | Prim::C64 => Some(8),
            Prim::C128 => Some(16),
            Prim::I16 | Prim::I32 | Prim::I64 | Prim::U16 | Prim::U32 | Prim::U64 => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Prim::Bool => "bool",
            Prim::I8 => "i8",
            Prim::I16 => "i16",
            Prim::I32 => "i32",
            Prim::I64 => "i64",
            Prim::U8 => "u8",
            Prim::U16 => "u16",
            Prim::U32 => "u32",
            Prim::U64 => "u64",
            Prim::F32 => "f32",
            Prim::F64 => "f64",
            Prim::C64 => "c64",
            Prim::C128 => "c128",
        }
    }
}
