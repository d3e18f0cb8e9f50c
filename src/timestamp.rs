//! Millisecond-epoch timestamp scalar.
//!
//! Most resource timestamps on the wire are integers of milliseconds since
//! the Unix epoch, not ISO-8601 strings. [`TimestampMilli`] wraps a
//! [`DateTime<Utc>`] and round-trips that representation exactly.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A timestamp encoded on the wire as milliseconds since the Unix epoch.
///
/// Encoding truncates sub-millisecond precision (`floor(nanos / 1e6)`);
/// decoding reconstructs `seconds = ms / 1000` and
/// `nanos = (ms % 1000) * 1e6`. For any value with millisecond precision,
/// `decode(encode(t)) == t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimestampMilli(DateTime<Utc>);

impl TimestampMilli {
    /// Wrap a `DateTime`, keeping its full precision in memory.
    ///
    /// Sub-millisecond precision is lost on serialization, so a value built
    /// from a non-millisecond-aligned `DateTime` does not round-trip.
    pub fn new(datetime: DateTime<Utc>) -> Self {
        Self(datetime)
    }

    /// Build from milliseconds since the Unix epoch.
    ///
    /// Returns `None` if `ms` is outside chrono's representable range.
    pub fn from_unix_millis(ms: i64) -> Option<Self> {
        let seconds = ms.div_euclid(1000);
        let nanos = (ms.rem_euclid(1000) as u32) * 1_000_000;
        Utc.timestamp_opt(seconds, nanos).single().map(Self)
    }

    /// Milliseconds since the Unix epoch.
    pub fn unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// The wrapped `DateTime`.
    pub fn datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for TimestampMilli {
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::new(datetime)
    }
}

impl fmt::Display for TimestampMilli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for TimestampMilli {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.unix_millis())
    }
}

impl<'de> Deserialize<'de> for TimestampMilli {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let ms = i64::deserialize(deserializer)?;
        Self::from_unix_millis(ms)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}ms")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_at_millisecond_precision() {
        for ms in [0i64, 1, 999, 1000, 1_442_037_464_000, 1_442_037_464_123] {
            let ts = TimestampMilli::from_unix_millis(ms).unwrap();
            let json = serde_json::to_string(&ts).unwrap();
            let back: TimestampMilli = serde_json::from_str(&json).unwrap();
            assert_eq!(back, ts);
            assert_eq!(back.unix_millis(), ms);
        }
    }

    #[test]
    fn serializes_as_bare_integer() {
        let ts = TimestampMilli::from_unix_millis(1_442_037_464_123).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1442037464123");
    }

    #[test]
    fn decodes_remainder_into_nanoseconds() {
        let ts = TimestampMilli::from_unix_millis(1_442_037_464_123).unwrap();
        assert_eq!(ts.datetime().timestamp(), 1_442_037_464);
        assert_eq!(ts.datetime().timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn negative_millis_round_trip() {
        let ts = TimestampMilli::from_unix_millis(-1500).unwrap();
        assert_eq!(ts.unix_millis(), -1500);
    }

    #[test]
    fn rejects_out_of_range_values() {
        let result: std::result::Result<TimestampMilli, _> =
            serde_json::from_str(&i64::MAX.to_string());
        assert!(result.is_err());
    }
}
