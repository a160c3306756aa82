//! This module implements `Duration` along with its methods and
//! canonical decomposition.

use crate::{
    parsers::FormattableDuration,
    units::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_MONTH, MS_PER_SECOND, MS_PER_YEAR},
    DateSpanError, DateSpanResult, Sign,
};
use alloc::format;
use core::{cmp::Ordering, str::FromStr};
use ixdtf::parsers::{records::TimeDurationRecord, IsoDurationParser};
use num_traits::Euclid;
use writeable::Writeable;

#[cfg(test)]
mod tests;

/// A `Duration` is a span of time expressed in calendar and absolute
/// units: years, months, days, hours, minutes, seconds, and milliseconds.
///
/// Every field is independently optional. An absent field contributes
/// zero to the duration's magnitude but remains distinguishable from an
/// explicit zero through the public fields; the unit accessors resolve
/// absence to zero. No field combination is validated or normalized at
/// construction (`seconds: Some(90)` is legal); canonicalization happens
/// only on demand, through [`Duration::from_milliseconds`].
///
/// Years and months convert through the fixed mean-year ratios in
/// [`crate::units`], so a `Duration` always aggregates to a single flat
/// millisecond scalar. All comparison and arithmetic funnels through
/// that scalar.
///
/// ```rust
/// use datespan_rs::Duration;
///
/// let half_hour = Duration {
///     minutes: Some(30),
///     ..Default::default()
/// };
/// let hour = Duration {
///     hours: Some(1),
///     ..Default::default()
/// };
/// assert_eq!(hour.add(&half_hour).as_milliseconds(), 5_400_000);
/// assert!(hour > half_hour);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct Duration {
    /// A potentially existent `years` field.
    pub years: Option<i64>,
    /// A potentially existent `months` field.
    pub months: Option<i64>,
    /// A potentially existent `days` field.
    pub days: Option<i64>,
    /// A potentially existent `hours` field.
    pub hours: Option<i64>,
    /// A potentially existent `minutes` field.
    pub minutes: Option<i64>,
    /// A potentially existent `seconds` field.
    pub seconds: Option<i64>,
    /// A potentially existent `milliseconds` field.
    pub milliseconds: Option<i64>,
}

// ==== Creation methods ====

impl Duration {
    /// Creates a `Duration` with every field present.
    #[inline]
    #[must_use]
    pub const fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
    ) -> Self {
        Self {
            years: Some(years),
            months: Some(months),
            days: Some(days),
            hours: Some(hours),
            minutes: Some(minutes),
            seconds: Some(seconds),
            milliseconds: Some(milliseconds),
        }
    }

    /// Canonically decomposes a flat millisecond count into a `Duration`
    /// whose fields are all present.
    ///
    /// The breakdown is greedy largest-unit-first: years, months, days,
    /// hours, minutes, seconds, then the millisecond remainder. Every
    /// step uses floor division, so for a negative input the years field
    /// absorbs the sign and the lower-order remainders stay non-negative.
    ///
    /// ```rust
    /// use datespan_rs::Duration;
    ///
    /// let d = Duration::from_milliseconds(90_000);
    /// assert_eq!(d.minutes, Some(1));
    /// assert_eq!(d.seconds, Some(30));
    /// assert_eq!(d.years, Some(0));
    /// ```
    #[must_use]
    pub fn from_milliseconds(milliseconds: i64) -> Self {
        let (years, remainder) = milliseconds.div_rem_euclid(&MS_PER_YEAR);
        let (months, remainder) = remainder.div_rem_euclid(&MS_PER_MONTH);
        let (days, remainder) = remainder.div_rem_euclid(&MS_PER_DAY);
        let (hours, remainder) = remainder.div_rem_euclid(&MS_PER_HOUR);
        let (minutes, remainder) = remainder.div_rem_euclid(&MS_PER_MINUTE);
        let (seconds, remainder) = remainder.div_rem_euclid(&MS_PER_SECOND);
        Self::new(years, months, days, hours, minutes, seconds, remainder)
    }
}

// ==== Getters ====

impl Duration {
    /// Returns the `years` field, treating absence as zero.
    #[inline]
    #[must_use]
    pub fn years(&self) -> i64 {
        self.years.unwrap_or(0)
    }

    /// Returns the `months` field, treating absence as zero.
    #[inline]
    #[must_use]
    pub fn months(&self) -> i64 {
        self.months.unwrap_or(0)
    }

    /// Returns the `days` field, treating absence as zero.
    #[inline]
    #[must_use]
    pub fn days(&self) -> i64 {
        self.days.unwrap_or(0)
    }

    /// Returns the `hours` field, treating absence as zero.
    #[inline]
    #[must_use]
    pub fn hours(&self) -> i64 {
        self.hours.unwrap_or(0)
    }

    /// Returns the `minutes` field, treating absence as zero.
    #[inline]
    #[must_use]
    pub fn minutes(&self) -> i64 {
        self.minutes.unwrap_or(0)
    }

    /// Returns the `seconds` field, treating absence as zero.
    #[inline]
    #[must_use]
    pub fn seconds(&self) -> i64 {
        self.seconds.unwrap_or(0)
    }

    /// Returns the `milliseconds` field, treating absence as zero.
    #[inline]
    #[must_use]
    pub fn milliseconds(&self) -> i64 {
        self.milliseconds.unwrap_or(0)
    }

    /// Returns whether every field is absent.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_none()
            && self.months.is_none()
            && self.days.is_none()
            && self.hours.is_none()
            && self.minutes.is_none()
            && self.seconds.is_none()
            && self.milliseconds.is_none()
    }
}

// ==== Aggregation and comparison ====

impl Duration {
    /// Aggregates this `Duration` into its flat millisecond scalar.
    ///
    /// Absent fields contribute zero. The sum is computed exactly in a
    /// wide intermediate; aggregates beyond the `i64` millisecond range
    /// clamp to that range, three orders of magnitude past the
    /// representable instant bounds.
    ///
    /// For any value produced by [`Duration::from_milliseconds`] this is
    /// the exact inverse. Non-canonical durations aggregate to the same
    /// scalar as their canonical form without being normalized.
    #[must_use]
    pub fn as_milliseconds(&self) -> i64 {
        let total = i128::from(self.years()) * i128::from(MS_PER_YEAR)
            + i128::from(self.months()) * i128::from(MS_PER_MONTH)
            + i128::from(self.days()) * i128::from(MS_PER_DAY)
            + i128::from(self.hours()) * i128::from(MS_PER_HOUR)
            + i128::from(self.minutes()) * i128::from(MS_PER_MINUTE)
            + i128::from(self.seconds()) * i128::from(MS_PER_SECOND)
            + i128::from(self.milliseconds());
        num_traits::clamp(total, i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }

    /// Determines the sign of this `Duration`'s aggregate.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        Sign::from(self.as_milliseconds().cmp(&0) as i8)
    }

    /// Returns whether this `Duration` aggregates to zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.as_milliseconds() == 0
    }

    /// Compares this `Duration` against a comparison operand by
    /// aggregate.
    #[inline]
    #[must_use]
    pub fn compare(&self, comparison: &Self) -> Ordering {
        self.cmp(comparison)
    }
}

impl PartialEq for Duration {
    /// Durations are equal when their aggregates match; field-by-field
    /// layout does not participate.
    fn eq(&self, other: &Self) -> bool {
        self.as_milliseconds() == other.as_milliseconds()
    }
}

impl Eq for Duration {}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_milliseconds().cmp(&other.as_milliseconds())
    }
}

// ==== Arithmetic ====

impl Duration {
    /// Returns the canonicalized sum of this `Duration` and another.
    ///
    /// The result always has every field present, regardless of how
    /// either input was constructed.
    #[inline]
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        Self::from_milliseconds(self.as_milliseconds().saturating_add(other.as_milliseconds()))
    }

    /// Subtracts a `Duration` from this one, returning the canonical
    /// decomposition of the difference.
    ///
    /// Fails with a negative-duration error when the difference would be
    /// negative; durations subject to subtraction are non-negative by
    /// contract.
    #[inline]
    pub fn subtract(&self, other: &Self) -> DateSpanResult<Self> {
        let difference = self
            .as_milliseconds()
            .saturating_sub(other.as_milliseconds());
        if difference < 0 {
            return Err(DateSpanError::negative_duration());
        }
        Ok(Self::from_milliseconds(difference))
    }

    /// Returns a negated `Duration`, field by field.
    #[inline]
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            years: self.years.map(i64::saturating_neg),
            months: self.months.map(i64::saturating_neg),
            days: self.days.map(i64::saturating_neg),
            hours: self.hours.map(i64::saturating_neg),
            minutes: self.minutes.map(i64::saturating_neg),
            seconds: self.seconds.map(i64::saturating_neg),
            milliseconds: self.milliseconds.map(i64::saturating_neg),
        }
    }

    /// Returns the absolute value of this `Duration`, field by field.
    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            years: self.years.map(i64::saturating_abs),
            months: self.months.map(i64::saturating_abs),
            days: self.days.map(i64::saturating_abs),
            hours: self.hours.map(i64::saturating_abs),
            minutes: self.minutes.map(i64::saturating_abs),
            seconds: self.seconds.map(i64::saturating_abs),
            milliseconds: self.milliseconds.map(i64::saturating_abs),
        }
    }
}

// ==== Trait impls ====

impl core::fmt::Display for Duration {
    /// Formats the sign-magnitude canonical form of this `Duration` as an
    /// ISO 8601 duration string.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        FormattableDuration::from_duration(self).write_to(f)
    }
}

impl FromStr for Duration {
    type Err = DateSpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_record = IsoDurationParser::from_str(s)
            .parse()
            .map_err(|e| DateSpanError::syntax().with_message(format!("{e}")))?;

        let (hours, minutes, seconds, millis, time_present) = match parse_record.time {
            Some(TimeDurationRecord::Hours { hours, fraction }) => {
                let unadjusted_fraction =
                    fraction.and_then(|x| x.to_nanoseconds()).unwrap_or(0) as u64;
                let fractional_hours_ns = unadjusted_fraction * 3600;
                let minutes = fractional_hours_ns.div_euclid(60 * 1_000_000_000);
                let fractional_minutes_ns = fractional_hours_ns.rem_euclid(60 * 1_000_000_000);

                let seconds = fractional_minutes_ns.div_euclid(1_000_000_000);
                let fractional_seconds = fractional_minutes_ns.rem_euclid(1_000_000_000);

                // Sub-millisecond digits truncate; crate precision is 1 ms.
                let milliseconds = fractional_seconds.div_euclid(1_000_000);

                (u64::from(hours), minutes, seconds, milliseconds, true)
            }
            Some(TimeDurationRecord::Minutes {
                hours,
                minutes,
                fraction,
            }) => {
                let unadjusted_fraction =
                    fraction.and_then(|x| x.to_nanoseconds()).unwrap_or(0) as u64;
                let fractional_minutes_ns = unadjusted_fraction * 60;
                let seconds = fractional_minutes_ns.div_euclid(1_000_000_000);
                let fractional_seconds = fractional_minutes_ns.rem_euclid(1_000_000_000);

                let milliseconds = fractional_seconds.div_euclid(1_000_000);

                (u64::from(hours), u64::from(minutes), seconds, milliseconds, true)
            }
            Some(TimeDurationRecord::Seconds {
                hours,
                minutes,
                seconds,
                fraction,
            }) => {
                let ns = fraction.and_then(|x| x.to_nanoseconds()).unwrap_or(0) as u64;
                let milliseconds = ns.div_euclid(1_000_000);

                (
                    u64::from(hours),
                    u64::from(minutes),
                    u64::from(seconds),
                    milliseconds,
                    true,
                )
            }
            None => (0, 0, 0, 0, false),
        };

        let (years, months, weeks, days, date_present) = match parse_record.date {
            Some(date) => (
                u64::from(date.years),
                u64::from(date.months),
                u64::from(date.weeks),
                u64::from(date.days),
                true,
            ),
            None => (0, 0, 0, 0, false),
        };

        let sign = i64::from(parse_record.sign as i8);
        let signed = |value: u64| -> DateSpanResult<i64> {
            let magnitude = i64::try_from(value).map_err(|_| {
                DateSpanError::syntax().with_message("duration field exceeds the supported range")
            })?;
            Ok(magnitude * sign)
        };

        // ISO weeks have no dedicated field here and fold into days.
        let days = days
            .checked_add(weeks.checked_mul(7).unwrap_or(u64::MAX))
            .unwrap_or(u64::MAX);

        Ok(Self {
            years: date_present.then(|| signed(years)).transpose()?,
            months: date_present.then(|| signed(months)).transpose()?,
            days: date_present.then(|| signed(days)).transpose()?,
            hours: time_present.then(|| signed(hours)).transpose()?,
            minutes: time_present.then(|| signed(minutes)).transpose()?,
            seconds: time_present.then(|| signed(seconds)).transpose()?,
            milliseconds: time_present.then(|| signed(millis)).transpose()?,
        })
    }
}
