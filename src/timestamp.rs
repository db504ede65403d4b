//! Second-precision UTC timestamps in the Steem textual and wire forms.
//!
//! Steem consensus timestamps are seconds-precision UTC. The canonical JSON
//! text form is `YYYY-MM-DDTHH:MM:SS` (no zone suffix); the wire form is a
//! `u32` count of seconds since the Unix epoch, little-endian. Parsing is
//! tolerant of the `Z` suffix and fractional seconds that some API nodes
//! emit.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::io;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::encoder::{BinaryEncoder, BinarySerialize};

/// Canonical text layout of a consensus timestamp.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A Steem consensus timestamp: seconds-precision UTC.
///
/// # Serialization
///
/// Serializes as `"2016-08-08T12:24:17"`; deserializes that form plus the
/// `…Z` and fractional-second variants. The binary form is a little-endian
/// `u32` of Unix seconds.
///
/// # Example
///
/// ```
/// use steem_rs::timestamp::TimePointSec;
///
/// let t: TimePointSec = "2016-08-08T12:24:17".parse().unwrap();
/// assert_eq!(t.unix_seconds(), 1470659057);
/// assert_eq!(t.to_string(), "2016-08-08T12:24:17");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimePointSec(DateTime<Utc>);

impl TimePointSec {
    /// Creates a timestamp from seconds since the Unix epoch.
    ///
    /// Returns `None` for values outside chrono's representable range.
    pub fn from_unix(secs: i64) -> Option<Self> {
        DateTime::from_timestamp(secs, 0).map(Self)
    }

    /// The current wall-clock time, truncated to whole seconds.
    pub fn now() -> Self {
        let now = Utc::now();
        Self::from_unix(now.timestamp()).expect("current time is representable")
    }

    /// Seconds since the Unix epoch.
    pub fn unix_seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// This timestamp shifted `secs` seconds into the future.
    pub fn plus_seconds(&self, secs: i64) -> Self {
        Self::from_unix(self.unix_seconds() + secs).expect("shifted time is representable")
    }
}

impl From<DateTime<Utc>> for TimePointSec {
    fn from(value: DateTime<Utc>) -> Self {
        Self::from_unix(value.timestamp()).expect("truncated time is representable")
    }
}

impl Display for TimePointSec {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIME_FORMAT))
    }
}

/// Error returned when a timestamp string matches none of the accepted
/// layouts.
#[derive(Debug, thiserror::Error)]
#[error("invalid timestamp `{0}`")]
pub struct TimestampParseError(String);

impl FromStr for TimePointSec {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Canonical form first, then the `Z`-suffixed and fractional
        // variants seen in API node output.
        let candidate = s.strip_suffix('Z').unwrap_or(s);
        for layout in [TIME_FORMAT, "%Y-%m-%dT%H:%M:%S%.f"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(candidate, layout) {
                return Ok(Self(naive.and_utc()));
            }
        }
        Err(TimestampParseError(s.to_owned()))
    }
}

impl Serialize for TimePointSec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TimePointSec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl BinarySerialize for TimePointSec {
    fn binary_serialize<W: io::Write>(&self, enc: &mut BinaryEncoder<W>) {
        enc.u32(self.unix_seconds() as u32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_form() {
        let t: TimePointSec = "2016-08-08T12:24:17".parse().unwrap();
        assert_eq!(t.unix_seconds(), 1470659057);
    }

    #[test]
    fn parses_tolerant_forms() {
        let plain: TimePointSec = "2016-08-08T12:24:17".parse().unwrap();
        let zulu: TimePointSec = "2016-08-08T12:24:17Z".parse().unwrap();
        let frac: TimePointSec = "2016-08-08T12:24:17.500".parse().unwrap();
        assert_eq!(plain, zulu);
        // Fractional seconds are truncated away by the wire form.
        assert_eq!(frac.unix_seconds(), plain.unix_seconds());
    }

    #[test]
    fn rejects_garbage() {
        assert!("2016-08-08".parse::<TimePointSec>().is_err());
        assert!("not a time".parse::<TimePointSec>().is_err());
    }

    #[test]
    fn json_round_trip() {
        let t: TimePointSec = serde_json::from_str("\"2016-08-08T12:24:17\"").unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"2016-08-08T12:24:17\"");
    }

    #[test]
    fn wire_form_is_u32_unix_seconds() {
        let t: TimePointSec = "2016-08-08T12:24:17".parse().unwrap();
        let mut enc = BinaryEncoder::new(Vec::new());
        t.binary_serialize(&mut enc);
        assert_eq!(hex::encode(enc.finish().unwrap()), "f179a857");
    }

    #[test]
    fn plus_seconds_shifts_forward() {
        let t: TimePointSec = "2016-08-08T12:24:17".parse().unwrap();
        assert_eq!(t.plus_seconds(600).to_string(), "2016-08-08T12:34:17");
    }
}
