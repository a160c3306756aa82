//! This module implements `OffsetDateTime` and `UtcOffset`.

use crate::{
    datespan_assert,
    duration::Duration,
    iso::{self, IsoDate, IsoDateTime, IsoTime},
    parsers::{self, FormattableOffsetDateTime, FormattableUtcOffset},
    units::{MS_MAX_INSTANT, MS_MIN_INSTANT, MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND},
    DateSpanError, DateSpanResult, Sign,
};
use core::{cmp::Ordering, str::FromStr};
use writeable::Writeable;

/// A fixed offset from UTC in signed whole minutes.
///
/// Only numeric offsets are modeled; named time zones are out of scope.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UtcOffset(i16);

impl UtcOffset {
    /// The zero offset.
    pub const UTC: Self = Self(0);

    /// Creates a `UtcOffset` from signed whole minutes.
    ///
    /// The magnitude must be less than a full day (1440 minutes).
    pub fn from_minutes(minutes: i16) -> DateSpanResult<Self> {
        if minutes.unsigned_abs() >= 1440 {
            return Err(DateSpanError::invalid_date()
                .with_message("UTC offset magnitude must be less than one day."));
        }
        Ok(Self(minutes))
    }

    /// Creates a `UtcOffset` from signed whole hours.
    pub fn from_hours(hours: i16) -> DateSpanResult<Self> {
        hours
            .checked_mul(60)
            .map_or(
                Err(DateSpanError::invalid_date()
                    .with_message("UTC offset magnitude must be less than one day.")),
                Self::from_minutes,
            )
    }

    /// Returns the offset in signed whole minutes.
    #[inline]
    #[must_use]
    pub fn minutes(&self) -> i16 {
        self.0
    }

    /// Returns the offset in milliseconds.
    #[inline]
    pub(crate) fn milliseconds(&self) -> i64 {
        i64::from(self.0) * MS_PER_MINUTE
    }

    /// Returns the sign of the offset.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        Sign::from(self.0.cmp(&0) as i8)
    }
}

impl FromStr for UtcOffset {
    type Err = DateSpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_minutes(parsers::parse_utc_offset(s)?)
    }
}

impl core::fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        FormattableUtcOffset::from_minutes(self.0).write_to(f)
    }
}

/// A calendar instant: an ISO date and wall-clock time paired with an
/// explicit [`UtcOffset`].
///
/// The canonical scalar for an `OffsetDateTime` is its UTC epoch
/// millisecond count; comparison and equality operate on that instant,
/// so the same instant viewed at two different offsets compares equal.
///
/// Values are immutable; every operation returns a new value.
#[derive(Debug, Clone, Copy)]
pub struct OffsetDateTime {
    iso: IsoDateTime,
    offset: UtcOffset,
}

// ==== Creation methods ====

impl OffsetDateTime {
    #[inline]
    pub(crate) const fn new_unchecked(iso: IsoDateTime, offset: UtcOffset) -> Self {
        Self { iso, offset }
    }

    /// Creates a new validated `OffsetDateTime` from calendar fields and
    /// an offset.
    ///
    /// Fails with an invalid-date error when a field is out of range or
    /// the resulting instant falls outside the representable range of
    /// ±8,640,000,000,000,000 milliseconds from the epoch.
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        offset: UtcOffset,
    ) -> DateSpanResult<Self> {
        let date = IsoDate::new_unchecked(year, month, day);
        if !date.is_valid() {
            return Err(DateSpanError::invalid_date().with_message("not a valid ISO date."));
        }
        let time = IsoTime::new_unchecked(hour, minute, second, millisecond);
        if !time.is_valid() {
            return Err(DateSpanError::invalid_date().with_message("not a valid wall-clock time."));
        }
        let result = Self::new_unchecked(IsoDateTime::new_unchecked(date, time), offset);
        if !is_representable(result.epoch_milliseconds()) {
            return Err(DateSpanError::invalid_date()
                .with_message("instant is outside the representable range."));
        }
        Ok(result)
    }

    /// Creates an `OffsetDateTime` denoting the given UTC instant, with
    /// its calendar fields rendered at the provided offset.
    pub fn from_epoch_milliseconds(
        milliseconds: i64,
        offset: UtcOffset,
    ) -> DateSpanResult<Self> {
        if !is_representable(milliseconds) {
            return Err(DateSpanError::invalid_date()
                .with_message("instant is outside the representable range."));
        }
        let local = milliseconds + offset.milliseconds();
        Ok(Self::new_unchecked(
            IsoDateTime::from_epoch_milliseconds(local),
            offset,
        ))
    }
}

// ==== Getters ====

impl OffsetDateTime {
    /// Returns the calendar year.
    #[inline]
    #[must_use]
    pub fn year(&self) -> i32 {
        self.iso.date.year
    }

    /// Returns the calendar month, 1-based.
    #[inline]
    #[must_use]
    pub fn month(&self) -> u8 {
        self.iso.date.month
    }

    /// Returns the day of the month.
    #[inline]
    #[must_use]
    pub fn day(&self) -> u8 {
        self.iso.date.day
    }

    /// Returns the hour of the day.
    #[inline]
    #[must_use]
    pub fn hour(&self) -> u8 {
        self.iso.time.hour
    }

    /// Returns the minute of the hour.
    #[inline]
    #[must_use]
    pub fn minute(&self) -> u8 {
        self.iso.time.minute
    }

    /// Returns the second of the minute.
    #[inline]
    #[must_use]
    pub fn second(&self) -> u8 {
        self.iso.time.second
    }

    /// Returns the millisecond of the second.
    #[inline]
    #[must_use]
    pub fn millisecond(&self) -> u16 {
        self.iso.time.millisecond
    }

    /// Returns the UTC offset.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    /// Returns the UTC instant as milliseconds since the epoch.
    #[inline]
    #[must_use]
    pub fn epoch_milliseconds(&self) -> i64 {
        self.iso.epoch_milliseconds() - self.offset.milliseconds()
    }

    /// Returns the same instant with its calendar fields rendered at a
    /// different offset.
    pub fn with_offset(&self, offset: UtcOffset) -> DateSpanResult<Self> {
        Self::from_epoch_milliseconds(self.epoch_milliseconds(), offset)
    }
}

// ==== Duration arithmetic ====

impl OffsetDateTime {
    /// Returns the result of adding a [`Duration`] to this instant.
    ///
    /// Year and month magnitudes move the calendar fields, with the day
    /// constrained into the target month (adding one month to January 31
    /// lands on the last day of February). Day and time magnitudes are
    /// then applied as exact milliseconds.
    pub fn add(&self, duration: &Duration) -> DateSpanResult<Self> {
        let (balanced_year, balanced_month) = iso::balance_iso_year_month(
            i64::from(self.year()).saturating_add(duration.years()),
            i64::from(self.month()).saturating_add(duration.months()),
        );
        datespan_assert!(
            (1..=12).contains(&balanced_month),
            "balanced month out of range: {balanced_month}"
        );
        let year = i32::try_from(balanced_year).map_err(|_| {
            DateSpanError::invalid_date().with_message("year is outside the supported range.")
        })?;
        let day = iso::constrain_iso_day(year, balanced_month as i32, i32::from(self.day()));
        let date = IsoDate::new_unchecked(year, balanced_month as u8, day);

        let time_shift = i128::from(duration.days()) * i128::from(MS_PER_DAY)
            + i128::from(duration.hours()) * i128::from(MS_PER_HOUR)
            + i128::from(duration.minutes()) * i128::from(MS_PER_MINUTE)
            + i128::from(duration.seconds()) * i128::from(MS_PER_SECOND)
            + i128::from(duration.milliseconds());
        let local = i128::from(IsoDateTime::new_unchecked(date, self.iso.time).epoch_milliseconds())
            + time_shift;
        let instant = local - i128::from(self.offset.milliseconds());
        if !(i128::from(MS_MIN_INSTANT)..=i128::from(MS_MAX_INSTANT)).contains(&instant) {
            return Err(DateSpanError::invalid_date()
                .with_message("instant is outside the representable range."));
        }
        Ok(Self::new_unchecked(
            IsoDateTime::from_epoch_milliseconds(local as i64),
            self.offset,
        ))
    }

    /// Returns the result of subtracting a [`Duration`] from this
    /// instant. Equivalent to adding the duration's negation.
    #[inline]
    pub fn subtract(&self, duration: &Duration) -> DateSpanResult<Self> {
        self.add(&duration.negated())
    }

    /// Returns the canonical [`Duration`] from this instant to another.
    ///
    /// Negative when `other` precedes `self`; the decomposition follows
    /// floor-division semantics.
    #[inline]
    #[must_use]
    pub fn until(&self, other: &Self) -> Duration {
        Duration::from_milliseconds(other.epoch_milliseconds() - self.epoch_milliseconds())
    }

    /// Returns the canonical [`Duration`] from another instant to this
    /// one.
    #[inline]
    #[must_use]
    pub fn since(&self, other: &Self) -> Duration {
        other.until(self)
    }
}

// ==== Instant helpers ====

impl OffsetDateTime {
    /// Restricts this instant into the closed range `[min, max]`.
    ///
    /// Callers must pass `min <= max`.
    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }

    /// Returns the candidate closest to this instant, or `None` when the
    /// candidate slice is empty. Ties resolve to the earliest candidate
    /// in slice order.
    #[must_use]
    pub fn closest(&self, candidates: &[Self]) -> Option<Self> {
        candidates
            .iter()
            .copied()
            .min_by_key(|c| {
                c.epoch_milliseconds()
                    .saturating_sub(self.epoch_milliseconds())
                    .unsigned_abs()
            })
    }

    /// Returns whether this instant is after the current system time.
    #[cfg(feature = "sys")]
    pub fn is_future(&self) -> DateSpanResult<bool> {
        Ok(*self > crate::sys::now_utc()?)
    }

    /// Returns whether this instant is before the current system time.
    #[cfg(feature = "sys")]
    pub fn is_past(&self) -> DateSpanResult<bool> {
        Ok(*self < crate::sys::now_utc()?)
    }
}

// ==== Trait impls ====

impl PartialEq for OffsetDateTime {
    /// Instants are equal when they denote the same UTC millisecond,
    /// regardless of the offset their fields are rendered at.
    fn eq(&self, other: &Self) -> bool {
        self.epoch_milliseconds() == other.epoch_milliseconds()
    }
}

impl Eq for OffsetDateTime {}

impl PartialOrd for OffsetDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OffsetDateTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.epoch_milliseconds().cmp(&other.epoch_milliseconds())
    }
}

impl FromStr for OffsetDateTime {
    type Err = DateSpanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (iso, offset_minutes) = parsers::parse_offset_date_time(s)?;
        let offset = UtcOffset::from_minutes(offset_minutes)?;
        let result = Self::new_unchecked(iso, offset);
        if !is_representable(result.epoch_milliseconds()) {
            return Err(DateSpanError::invalid_date()
                .with_message("instant is outside the representable range."));
        }
        Ok(result)
    }
}

impl core::fmt::Display for OffsetDateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        FormattableOffsetDateTime::from_parts(self.iso, self.offset.minutes()).write_to(f)
    }
}

/// Utility for determining if an epoch millisecond count is within the
/// representable instant range.
#[inline]
#[must_use]
pub(crate) fn is_representable(milliseconds: i64) -> bool {
    (MS_MIN_INSTANT..=MS_MAX_INSTANT).contains(&milliseconds)
}
