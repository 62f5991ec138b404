use jiff::{SignedDuration, Timestamp};
use serde::Serializer;
use snafu::{ResultExt, Snafu};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// RFC 3339 rendering of a timestamp
pub(crate) mod required {
    use super::*;

    pub fn serialize<S>(timestamp: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(timestamp)
    }
}

#[derive(Debug, Snafu)]
pub enum TimestampError {
    #[snafu(display("Failed to parse timestamp {timestamp}"))]
    /// Error while parsing a timestamp from an integer
    Parse { timestamp: i64, source: jiff::Error },
    #[snafu(display("Retention of {days} days from {from} is out of range"))]
    Retention {
        days: u32,
        from: Timestamp,
        source: jiff::Error,
    },
}

pub(crate) fn parse_timestamp(timestamp: i64) -> Result<Timestamp, TimestampError> {
    Timestamp::from_second(timestamp).context(ParseSnafu { timestamp })
}

/// Instant `days` whole days after `from`.
pub fn expires_after(from: Timestamp, days: u32) -> Result<Timestamp, TimestampError> {
    let retention = SignedDuration::from_secs(i64::from(days) * SECONDS_PER_DAY);
    from.checked_add(retention)
        .context(RetentionSnafu { days, from })
}

/// Whole Unix seconds, rounded towards the past.
pub(crate) fn epoch_seconds(timestamp: Timestamp) -> i64 {
    let seconds = timestamp.as_second();
    if timestamp.subsec_nanosecond() < 0 {
        seconds - 1
    } else {
        seconds
    }
}
