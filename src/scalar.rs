//! Integer scalars with the JSON flexibility of Steem node output.
//!
//! Steem API nodes emit large integers both as JSON numbers and as quoted
//! strings (the quoting guards against JavaScript's 53-bit number limit).
//! The newtypes here accept either form on input, always emit the plain
//! number form on output, and carry their fixed-width little-endian wire
//! encoding.
//!
//! ```
//! use steem_rs::scalar::UInt32;
//!
//! let a: UInt32 = serde_json::from_str("1164960351").unwrap();
//! let b: UInt32 = serde_json::from_str("\"1164960351\"").unwrap();
//! assert_eq!(a, b);
//! assert_eq!(serde_json::to_string(&a).unwrap(), "1164960351");
//! ```

use std::fmt;
use std::io;

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::encoder::{BinaryEncoder, BinarySerialize};

macro_rules! scalar {
    ($(#[$doc:meta])* $name:ident, $prim:ty, $write:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub $prim);

        impl From<$prim> for $name {
            fn from(v: $prim) -> Self {
                Self(v)
            }
        }

        impl From<$name> for $prim {
            fn from(v: $name) -> $prim {
                v.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                self.0.serialize(serializer)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                #[derive(serde::Deserialize)]
                #[serde(untagged)]
                enum Raw {
                    Num($prim),
                    Quoted(String),
                }

                match Raw::deserialize(deserializer)? {
                    Raw::Num(v) => Ok(Self(v)),
                    Raw::Quoted(s) => s.parse::<$prim>().map(Self).map_err(|_| {
                        de::Error::custom(format_args!(
                            "`{s}` does not fit in {}",
                            stringify!($prim)
                        ))
                    }),
                }
            }
        }

        impl BinarySerialize for $name {
            fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
                enc.$write(self.0);
            }
        }
    };
}

scalar!(
    /// `u8` accepting both `7` and `"7"` in JSON.
    UInt8, u8, u8
);
scalar!(
    /// `u16` accepting both `123` and `"123"` in JSON.
    UInt16, u16, u16
);
scalar!(
    /// `u32` accepting both `123` and `"123"` in JSON.
    UInt32, u32, u32
);
scalar!(
    /// `u64` accepting both `123` and `"123"` in JSON.
    UInt64, u64, u64
);
scalar!(
    /// `i16` accepting both `-123` and `"-123"` in JSON.
    Int16, i16, i16
);
scalar!(
    /// `i32` accepting both `-123` and `"-123"` in JSON.
    Int32, i32, i32
);
scalar!(
    /// `i64` accepting both `-123` and `"-123"` in JSON.
    Int64, i64, i64
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_number_and_quoted_number() {
        let n: Int16 = serde_json::from_str("10000").unwrap();
        let q: Int16 = serde_json::from_str("\"10000\"").unwrap();
        assert_eq!(n, Int16(10000));
        assert_eq!(n, q);
    }

    #[test]
    fn emits_plain_number() {
        assert_eq!(serde_json::to_string(&UInt64(18446744073709551615)).unwrap(),
            "18446744073709551615");
        assert_eq!(serde_json::to_string(&Int16(-42)).unwrap(), "-42");
    }

    #[test]
    fn overflow_is_rejected_in_both_forms() {
        assert!(serde_json::from_str::<UInt16>("65536").is_err());
        assert!(serde_json::from_str::<UInt16>("\"65536\"").is_err());
        assert!(serde_json::from_str::<Int16>("\"-32769\"").is_err());
    }

    #[test]
    fn wire_form_is_little_endian() {
        let mut enc = crate::encoder::BinaryEncoder::new(Vec::new());
        UInt16(36029).binary_serialize(&mut enc);
        Int16(10000).binary_serialize(&mut enc);
        assert_eq!(hex::encode(enc.finish().unwrap()), "bd8c1027");
    }
}
