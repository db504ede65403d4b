//! Steem asset amounts: `"1.000 STEEM"` and the 16-byte wire form.
//!
//! An asset is an integer amount scaled by a decimal precision, tagged with
//! a short uppercase symbol. The textual form is what operations carry in
//! JSON; the binary form is `i64 amount ‖ u8 precision ‖ symbol[7]`
//! (null-padded, ASCII uppercase). Symbols unknown to the chain are
//! accepted here and rejected downstream by the node.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;
use std::str::FromStr;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoder::{BinaryEncoder, BinarySerialize};

/// Maximum symbol length representable on the wire.
pub const MAX_SYMBOL_LEN: usize = 7;

/// An asset amount, e.g. `1.000 STEEM`.
///
/// `amount` holds the value with the decimal point removed: `"1.000"` is
/// `amount = 1000`, `precision = 3`.
///
/// # Serialization
///
/// JSON uses the textual form (`"1.000 STEEM"`); the wire form is
/// `amount (i64 LE) ‖ precision (u8) ‖ symbol (7 bytes, null-padded)`.
///
/// # Example
///
/// ```
/// use steem_rs::asset::Asset;
///
/// let a: Asset = "1.000 STEEM".parse().unwrap();
/// assert_eq!(a.amount, 1000);
/// assert_eq!(a.precision, 3);
/// assert_eq!(a.symbol, "STEEM");
/// assert_eq!(a.to_string(), "1.000 STEEM");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Value with the decimal point removed.
    pub amount: i64,
    /// Number of decimal-fraction digits.
    pub precision: u8,
    /// Uppercase ASCII symbol, at most seven bytes.
    pub symbol: String,
}

/// Errors from parsing or constructing an asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetParseError {
    /// The input was not `"<amount> <SYMBOL>"`.
    #[error("invalid asset `{0}`: expected `<amount> <SYMBOL>`")]
    Malformed(String),
    /// The amount part was not a decimal number that fits in `i64`.
    #[error("invalid asset amount `{0}`")]
    BadAmount(String),
    /// The symbol was empty, too long, or not ASCII alphanumeric.
    #[error("invalid asset symbol `{0}`")]
    BadSymbol(String),
}

impl Asset {
    /// Builds an asset from raw parts, validating the symbol.
    pub fn new(amount: i64, precision: u8, symbol: &str) -> Result<Self, AssetParseError> {
        let symbol = symbol.to_ascii_uppercase();
        if symbol.is_empty()
            || symbol.len() > MAX_SYMBOL_LEN
            || !symbol.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(AssetParseError::BadSymbol(symbol));
        }
        Ok(Self {
            amount,
            precision,
            symbol,
        })
    }

    /// A STEEM amount at the chain's precision of 3.
    pub fn steem(amount: i64) -> Self {
        Self {
            amount,
            precision: 3,
            symbol: "STEEM".to_owned(),
        }
    }

    /// An SBD amount at the chain's precision of 3.
    pub fn sbd(amount: i64) -> Self {
        Self {
            amount,
            precision: 3,
            symbol: "SBD".to_owned(),
        }
    }

    /// A VESTS amount at the chain's precision of 6.
    pub fn vests(amount: i64) -> Self {
        Self {
            amount,
            precision: 6,
            symbol: "VESTS".to_owned(),
        }
    }
}

impl FromStr for Asset {
    type Err = AssetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (amount_str, symbol) = trimmed
            .split_once(' ')
            .ok_or_else(|| AssetParseError::Malformed(s.to_owned()))?;
        if symbol.contains(' ') || amount_str.is_empty() {
            return Err(AssetParseError::Malformed(s.to_owned()));
        }

        let (digits, precision) = match amount_str.split_once('.') {
            None => (amount_str.to_owned(), 0usize),
            Some((int, frac)) => {
                if frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(AssetParseError::BadAmount(amount_str.to_owned()));
                }
                (format!("{int}{frac}"), frac.len())
            }
        };
        let amount: i64 = digits
            .parse()
            .map_err(|_| AssetParseError::BadAmount(amount_str.to_owned()))?;

        let asset = Self::new(amount, precision as u8, symbol)?;
        Ok(asset)
    }
}

impl Display for Asset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let negative = self.amount < 0;
        let mut digits = self.amount.unsigned_abs().to_string();
        if self.precision > 0 {
            let precision = self.precision as usize;
            while digits.len() <= precision {
                digits.insert(0, '0');
            }
            digits.insert(digits.len() - precision, '.');
        }
        let sign = if negative { "-" } else { "" };
        write!(f, "{sign}{digits} {}", self.symbol)
    }
}

impl Serialize for Asset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Asset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl BinarySerialize for Asset {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.i64(self.amount);
        enc.u8(self.precision);
        let mut symbol = [0u8; MAX_SYMBOL_LEN];
        let len = self.symbol.len().min(MAX_SYMBOL_LEN);
        symbol[..len].copy_from_slice(&self.symbol.as_bytes()[..len]);
        enc.bytes(&symbol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(asset: &Asset) -> String {
        let mut enc = BinaryEncoder::new(Vec::new());
        asset.binary_serialize(&mut enc);
        hex::encode(enc.finish().unwrap())
    }

    #[test]
    fn parses_decimal_amount() {
        let a: Asset = "1.000 STEEM".parse().unwrap();
        assert_eq!(a, Asset::steem(1000));
    }

    #[test]
    fn parses_integral_amount() {
        let a: Asset = "1000 VESTS".parse().unwrap();
        assert_eq!(a.amount, 1000);
        assert_eq!(a.precision, 0);
        assert_eq!(a.symbol, "VESTS");
    }

    #[test]
    fn uppercases_symbol() {
        let a: Asset = "0.001 steem".parse().unwrap();
        assert_eq!(a.symbol, "STEEM");
    }

    #[test]
    fn rejects_malformed_inputs() {
        assert!("1.000".parse::<Asset>().is_err());
        assert!("1.000  STEEM".parse::<Asset>().is_err());
        assert!("1.000 TOOLONGSYM".parse::<Asset>().is_err());
        assert!("1.0e3 STEEM".parse::<Asset>().is_err());
        assert!("one STEEM".parse::<Asset>().is_err());
    }

    #[test]
    fn formats_with_zero_padding() {
        assert_eq!(Asset::steem(1).to_string(), "0.001 STEEM");
        assert_eq!(Asset::steem(10000).to_string(), "10.000 STEEM");
        assert_eq!(Asset::vests(123).to_string(), "0.000123 VESTS");
        assert_eq!(Asset::sbd(-2500).to_string(), "-2.500 SBD");
    }

    #[test]
    fn wire_form_matches_reference() {
        let a: Asset = "1.000 STEEM".parse().unwrap();
        assert_eq!(wire(&a), "e80300000000000003535445454d0000");
    }

    #[test]
    fn round_trips_through_text() {
        for s in ["1.000 STEEM", "0.000001 VESTS", "42 TOKEN", "-0.001 SBD"] {
            let a: Asset = s.parse().unwrap();
            assert_eq!(a.to_string(), s);
        }
    }
}
