use crate::shape::Shape;
use itertools::Itertools;
use std::fmt;

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Prim(prim) => f.write_str(prim.name()),
            Shape::Str => f.write_str("str"),
            Shape::Array(len, elem) => write!(f, "[{len}]{elem}"),
            Shape::Seq(elem) => write!(f, "[]{elem}"),
            Shape::Map(key, val) => write!(f, "map[{key}]{val}"),
            Shape::Ptr(elem) => write!(f, "*{elem}"),
            Shape::Dynamic => f.write_str("dyn"),
            Shape::Struct(fields) if fields.is_empty() => f.write_str("struct {}"),
            Shape::Struct(fields) => {
                let fields = fields
                    .iter()
                    .map(|field| format!("{}: {}", field.name, field.shape))
                    .join(", ");
                write!(f, "struct {{ {fields} }}")
            }
            Shape::Named(named) => f.write_str(named.name()),
            Shape::Custom(custom) => f.write_str(custom.name()),
            Shape::Opaque(name) => f.write_str(name),
        }
    }
}

/* Debug output is the display form; a derived one would not terminate on recursive shapes. */
impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
