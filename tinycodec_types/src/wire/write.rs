use crate::wire::zigzag;

/// Append-side codec. Implemented for `Vec<u8>`, the only buffer the engines write to.
pub trait TinyWrite {
    fn put_u8(&mut self, byte: u8);
    fn put_raw(&mut self, bytes: &[u8]);

    fn put_uvarint(&mut self, mut u: u64) {
        while u >= 0x80 {
            self.put_u8((u as u8) | 0x80);
            u >>= 7;
        }
        self.put_u8(u as u8);
    }
    fn put_ivarint(&mut self, i: i64) {
        self.put_uvarint(zigzag(i));
    }

    fn put_bool(&mut self, b: bool) {
        self.put_u8(b as u8);
    }
    fn put_f32(&mut self, f: f32) {
        self.put_raw(&f.to_le_bytes());
    }
    fn put_f64(&mut self, f: f64) {
        self.put_raw(&f.to_le_bytes());
    }

    /// `len` followed by the bytes themselves.
    fn put_block(&mut self, bytes: &[u8]) {
        self.put_uvarint(bytes.len() as u64);
        self.put_raw(bytes);
    }
    fn put_str(&mut self, s: &str) {
        self.put_block(s.as_bytes());
    }
}

impl TinyWrite for Vec<u8> {
    fn put_u8(&mut self, byte: u8) {
        self.push(byte);
    }
    fn put_raw(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}
