//! This module implements `Interval` along with its boundary checks and
//! sequence generators.

use crate::{
    datetime::{OffsetDateTime, UtcOffset},
    iso::IsoDateTime,
    units::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE},
    DateSpanError, DateSpanResult, Duration,
};

/// A closed interval between two [`OffsetDateTime`] boundaries.
///
/// Both boundaries are included in the interval: `start` and `end`
/// themselves are members, and two intervals that merely touch at a
/// boundary instant overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl Interval {
    /// Creates a new `Interval`, rejecting an end that precedes its
    /// start.
    pub fn try_new(start: OffsetDateTime, end: OffsetDateTime) -> DateSpanResult<Self> {
        if end < start {
            return Err(DateSpanError::invalid_date()
                .with_message("interval end must not precede its start."));
        }
        Ok(Self { start, end })
    }

    /// Returns the starting boundary.
    #[inline]
    #[must_use]
    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Returns the ending boundary.
    #[inline]
    #[must_use]
    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Returns whether two intervals share at least one instant.
    ///
    /// Boundaries are closed on both ends, so intervals that only touch
    /// at a boundary overlap.
    #[inline]
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Returns whether an instant falls within this interval, boundaries
    /// included.
    #[inline]
    #[must_use]
    pub fn contains(&self, instant: &OffsetDateTime) -> bool {
        self.start <= *instant && *instant <= self.end
    }

    /// Returns the canonical [`Duration`] spanned by this interval.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.start.until(&self.end)
    }

    /// Returns an iterator over instants stepping one day at a time from
    /// the start, while within the interval.
    #[must_use]
    pub fn each_day(&self) -> EachDay {
        EachDay(self.steps(MS_PER_DAY))
    }

    /// Returns an iterator over instants stepping one hour at a time from
    /// the start, while within the interval.
    #[must_use]
    pub fn each_hour(&self) -> EachHour {
        EachHour(self.steps(MS_PER_HOUR))
    }

    /// Returns an iterator over instants stepping one minute at a time
    /// from the start, while within the interval.
    #[must_use]
    pub fn each_minute(&self) -> EachMinute {
        EachMinute(self.steps(MS_PER_MINUTE))
    }

    fn steps(&self, step: i64) -> Steps {
        Steps {
            cursor: self.start.epoch_milliseconds(),
            end: self.end.epoch_milliseconds(),
            step,
            offset: self.start.offset(),
        }
    }
}

#[derive(Debug, Clone)]
struct Steps {
    cursor: i64,
    end: i64,
    step: i64,
    offset: UtcOffset,
}

impl Iterator for Steps {
    type Item = OffsetDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor > self.end {
            return None;
        }
        let local = self.cursor + self.offset.milliseconds();
        let result = OffsetDateTime::new_unchecked(
            IsoDateTime::from_epoch_milliseconds(local),
            self.offset,
        );
        self.cursor += self.step;
        Some(result)
    }
}

/// Iterator over an interval's instants in one-day steps.
#[derive(Debug, Clone)]
pub struct EachDay(Steps);

impl Iterator for EachDay {
    type Item = OffsetDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// Iterator over an interval's instants in one-hour steps.
#[derive(Debug, Clone)]
pub struct EachHour(Steps);

impl Iterator for EachHour {
    type Item = OffsetDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

/// Iterator over an interval's instants in one-minute steps.
#[derive(Debug, Clone)]
pub struct EachMinute(Steps);

impl Iterator for EachMinute {
    type Item = OffsetDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}
