//! Host system time access.

use crate::datetime::{OffsetDateTime, UtcOffset};
use crate::{DateSpanError, DateSpanResult};
use web_time::{SystemTime, UNIX_EPOCH};

/// Returns the current system instant as an [`OffsetDateTime`] at UTC.
///
/// Instants before the Unix epoch resolve to negative millisecond
/// counts.
pub fn now_utc() -> DateSpanResult<OffsetDateTime> {
    let milliseconds = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_millis()).map_err(|_| DateSpanError::assert())?,
        Err(err) => i64::try_from(err.duration().as_millis())
            .map(|ms| -ms)
            .map_err(|_| DateSpanError::assert())?,
    };
    OffsetDateTime::from_epoch_milliseconds(milliseconds, UtcOffset::UTC)
}

#[cfg(test)]
mod tests {
    use super::now_utc;

    #[test]
    fn now_is_after_crate_authorship() {
        let now = now_utc().unwrap();
        // 2020-01-01T00:00:00Z
        assert!(now.epoch_milliseconds() > 1_577_836_800_000);
    }
}
