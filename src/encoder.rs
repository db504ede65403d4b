//! Deterministic binary serializer for the Steem wire format.
//!
//! Everything a Steem node hashes or verifies is built from a small set of
//! primitives: fixed-width little-endian integers, unsigned LEB128 varints
//! used as length prefixes and operation codes, length-prefixed UTF-8
//! strings, and a one-byte present/absent flag for optional fields.
//! [`BinaryEncoder`] centralizes those primitives so endianness and length
//! prefixes have a single audit surface.
//!
//! The encoder is *sticky*: the first error is latched and every later
//! write becomes a no-op. Callers emit an entire structure without
//! per-field error plumbing and collect the verdict once via
//! [`BinaryEncoder::finish`].
//!
//! # Example
//!
//! ```
//! use steem_rs::encoder::BinaryEncoder;
//!
//! let mut enc = BinaryEncoder::new(Vec::new());
//! enc.uvarint(300);
//! enc.string("piston");
//! let bytes = enc.finish().unwrap();
//! assert_eq!(hex::encode(bytes), "ac0206706973746f6e");
//! ```

use std::io;

/// A value with a canonical Steem binary form.
///
/// Implementations append their encoding to the supplied encoder and never
/// return errors directly; failures latch inside the encoder.
pub trait BinarySerialize {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>);
}

/// Errors produced while emitting the binary form.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The underlying sink rejected a write. `field` names the value that
    /// was being encoded when the sink failed.
    #[error("failed to write {field}: {source}")]
    Io {
        /// Label of the field being written, set via [`BinaryEncoder::field`].
        field: &'static str,
        source: io::Error,
    },
    /// The value has no defined binary layout (e.g. a virtual operation or
    /// an operation decoded from a newer protocol version).
    #[error("operation `{0}` has no binary serialization")]
    UnsupportedOperation(String),
    /// A field only supports the empty form on the wire (currently
    /// transaction and comment-option extensions).
    #[error("non-empty {0} are not supported")]
    UnsupportedExtensions(&'static str),
}

/// Sink-backed emitter for the Steem wire format.
///
/// Write methods are infallible at the call site; the first failure is
/// latched and returned by [`finish`](Self::finish). [`field`](Self::field)
/// attaches a label to subsequent writes so a failing encode names the
/// offending field.
#[derive(Debug)]
pub struct BinaryEncoder<W> {
    sink: W,
    field: &'static str,
    err: Option<EncodeError>,
}

impl<W: io::Write> BinaryEncoder<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            field: "value",
            err: None,
        }
    }

    /// Labels subsequent writes for error reporting. Returns `self` so the
    /// label can be chained onto the write: `enc.field("voter").string(v)`.
    pub fn field(&mut self, name: &'static str) -> &mut Self {
        self.field = name;
        self
    }

    /// Latches `err` if no earlier error is held.
    pub fn fail(&mut self, err: EncodeError) {
        if self.err.is_none() {
            self.err = Some(err);
        }
    }

    /// The latched error, if any write has failed so far.
    pub fn error(&self) -> Option<&EncodeError> {
        self.err.as_ref()
    }

    /// Consumes the encoder, returning the sink or the first error.
    pub fn finish(self) -> Result<W, EncodeError> {
        match self.err {
            Some(err) => Err(err),
            None => Ok(self.sink),
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        if self.err.is_some() {
            return;
        }
        if let Err(source) = self.sink.write_all(bytes) {
            self.err = Some(EncodeError::Io {
                field: self.field,
                source,
            });
        }
    }

    pub fn u8(&mut self, v: u8) {
        self.write(&[v]);
    }

    pub fn u16(&mut self, v: u16) {
        self.write(&v.to_le_bytes());
    }

    pub fn u32(&mut self, v: u32) {
        self.write(&v.to_le_bytes());
    }

    pub fn u64(&mut self, v: u64) {
        self.write(&v.to_le_bytes());
    }

    pub fn i8(&mut self, v: i8) {
        self.write(&v.to_le_bytes());
    }

    pub fn i16(&mut self, v: i16) {
        self.write(&v.to_le_bytes());
    }

    pub fn i32(&mut self, v: i32) {
        self.write(&v.to_le_bytes());
    }

    pub fn i64(&mut self, v: i64) {
        self.write(&v.to_le_bytes());
    }

    /// Single byte `0x01` / `0x00`.
    pub fn boolean(&mut self, v: bool) {
        self.u8(v as u8);
    }

    /// Unsigned LEB128: seven data bits per byte, high bit set while more
    /// bytes follow.
    pub fn uvarint(&mut self, mut v: u64) {
        let mut buf = [0u8; 10];
        let mut n = 0;
        while v >= 0x80 {
            buf[n] = (v as u8) | 0x80;
            v >>= 7;
            n += 1;
        }
        buf[n] = v as u8;
        self.write(&buf[..=n]);
    }

    /// Signed varint. Non-negative values encode exactly like
    /// [`uvarint`](Self::uvarint) on the unsigned cast; negative values use
    /// the zig-zag mapping.
    pub fn varint(&mut self, v: i64) {
        if v >= 0 {
            self.uvarint(v as u64);
        } else {
            self.uvarint(!((v as u64) << 1));
        }
    }

    /// Raw bytes, no length prefix.
    pub fn bytes(&mut self, v: &[u8]) {
        self.write(v);
    }

    /// `uvarint(len)` followed by the raw UTF-8 bytes.
    pub fn string(&mut self, v: &str) {
        self.uvarint(v.len() as u64);
        self.write(v.as_bytes());
    }

    /// Present flag plus the value when present.
    pub fn option<T: BinarySerialize>(&mut self, v: Option<&T>) {
        match v {
            Some(inner) => {
                self.u8(1);
                inner.binary_serialize(self);
            }
            None => self.u8(0),
        }
    }

    /// `uvarint(len)` followed by each element in order.
    pub fn sequence<T: BinarySerialize>(&mut self, items: &[T]) {
        self.uvarint(items.len() as u64);
        for item in items {
            item.binary_serialize(self);
        }
    }

    /// `uvarint(len)` followed by each `(key, value)` pair, emitted by
    /// `each`. The caller is responsible for any required sort order.
    pub fn map<T>(&mut self, pairs: &[T], mut each: impl FnMut(&mut Self, &T)) {
        self.uvarint(pairs.len() as u64);
        for pair in pairs {
            each(self, pair);
        }
    }
}

impl BinarySerialize for String {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.string(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(f: impl FnOnce(&mut BinaryEncoder<Vec<u8>>)) -> String {
        let mut enc = BinaryEncoder::new(Vec::new());
        f(&mut enc);
        hex::encode(enc.finish().unwrap())
    }

    #[test]
    fn fixed_width_little_endian() {
        assert_eq!(encode(|e| e.u16(36029)), "bd8c");
        assert_eq!(encode(|e| e.u32(1164960351)), "5fe26f45");
        assert_eq!(encode(|e| e.i16(10000)), "1027");
        assert_eq!(encode(|e| e.i64(1000)), "e803000000000000");
    }

    #[test]
    fn uvarint_boundaries() {
        assert_eq!(encode(|e| e.uvarint(0)), "00");
        assert_eq!(encode(|e| e.uvarint(127)), "7f");
        assert_eq!(encode(|e| e.uvarint(128)), "8001");
        assert_eq!(encode(|e| e.uvarint(300)), "ac02");
        assert_eq!(encode(|e| e.uvarint(16384)), "808001");
    }

    #[test]
    fn varint_nonnegative_matches_uvarint() {
        assert_eq!(encode(|e| e.varint(300)), encode(|e| e.uvarint(300)));
        assert_eq!(encode(|e| e.varint(0)), "00");
    }

    #[test]
    fn varint_negative_zigzag() {
        // Matches Go's binary.PutVarint byte stream for -1 and -300.
        assert_eq!(encode(|e| e.varint(-1)), "01");
        assert_eq!(encode(|e| e.varint(-300)), "d704");
    }

    #[test]
    fn string_is_length_prefixed() {
        assert_eq!(encode(|e| e.string("xeroc")), "057865726f63");
        assert_eq!(encode(|e| e.string("")), "00");
    }

    #[test]
    fn option_flag() {
        assert_eq!(encode(|e| e.option::<String>(None)), "00");
        assert_eq!(
            encode(|e| e.option(Some(&"ab".to_string()))),
            "01026162"
        );
    }

    #[test]
    fn boolean_single_byte() {
        assert_eq!(encode(|e| e.boolean(true)), "01");
        assert_eq!(encode(|e| e.boolean(false)), "00");
    }

    #[test]
    fn error_is_sticky_and_names_the_field() {
        // A zero-capacity sink fails every write.
        #[derive(Debug)]
        struct Full;
        impl io::Write for Full {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::WriteZero, "full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut enc = BinaryEncoder::new(Full);
        enc.field("voter").string("xeroc");
        enc.field("weight").i16(1);
        let err = enc.finish().unwrap_err();
        assert!(err.to_string().contains("voter"), "first error wins: {err}");
    }
}
