//! This module implements ISO 8601 parsing and formatting.
//!
//! Parsing is handled by the `ixdtf` crate; the `Writeable` builders
//! below render dates, offsets, and durations without intermediate
//! allocation.

use crate::{
    duration::Duration,
    iso::{IsoDate, IsoDateTime, IsoTime},
    units::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_MONTH, MS_PER_SECOND, MS_PER_YEAR},
    DateSpanError, DateSpanResult, Sign,
};
use alloc::format;
use core::{iter::Peekable, str::Chars};
use ixdtf::parsers::{
    records::{TimeRecord, UtcOffsetRecord, UtcOffsetRecordOrZ},
    IxdtfParser,
};
use writeable::{impl_display_with_writeable, LengthHint, Writeable};

// ==== Parsing ====

/// Parses an ISO 8601 date-time string with a required offset or `Z`
/// designator, returning the local field slots and the offset in signed
/// minutes.
pub(crate) fn parse_offset_date_time(source: &str) -> DateSpanResult<(IsoDateTime, i16)> {
    let record = IxdtfParser::from_str(source)
        .parse()
        .map_err(|e| DateSpanError::syntax().with_message(format!("{e}")))?;

    let date = record
        .date
        .ok_or_else(|| DateSpanError::syntax().with_message("a date component is required."))?;
    let offset = record.offset.ok_or_else(|| {
        DateSpanError::syntax().with_message("an offset or Z designator is required.")
    })?;

    let offset_minutes = match offset {
        UtcOffsetRecordOrZ::Z => 0,
        UtcOffsetRecordOrZ::Offset(o) => offset_record_minutes(o),
    };

    let iso_date = IsoDate::new_unchecked(date.year, date.month, date.day);
    if !iso_date.is_valid() {
        return Err(DateSpanError::invalid_date().with_message("not a valid ISO date."));
    }
    let iso_time = record.time.map_or_else(IsoTime::default, time_record_to_iso);
    if !iso_time.is_valid() {
        return Err(DateSpanError::invalid_date().with_message("not a valid wall-clock time."));
    }

    Ok((IsoDateTime::new_unchecked(iso_date, iso_time), offset_minutes))
}

/// Folds a parsed offset record into signed whole minutes. Offset
/// seconds truncate; sub-minute offsets are not modeled.
fn offset_record_minutes(record: UtcOffsetRecord) -> i16 {
    let minutes =
        (record.hour as i16 * 60) + record.minute as i16 + (record.second as i16 / 60);
    minutes * record.sign as i16
}

fn time_record_to_iso(record: TimeRecord) -> IsoTime {
    // Sub-millisecond digits truncate; leap second 60 clamps to 59.
    let millisecond = record
        .fraction
        .and_then(|f| f.to_nanoseconds())
        .unwrap_or(0)
        / 1_000_000;
    IsoTime::new_unchecked(
        record.hour,
        record.minute,
        record.second.min(59),
        millisecond as u16,
    )
}

/// Parses a standalone UTC offset string: a sign, a two-digit hour, and
/// an optional two-digit minute with or without a `:` separator. The
/// single designator `Z` (or `z`) denotes the zero offset.
pub(crate) fn parse_utc_offset(source: &str) -> DateSpanResult<i16> {
    if source == "Z" || source == "z" {
        return Ok(0);
    }
    let mut chars = source.chars().peekable();
    if !chars.peek().is_some_and(|ch| *ch == '+' || *ch == '-') {
        return Err(DateSpanError::syntax().with_message("UTC offset must begin with a sign."));
    }
    let sign = chars.next().map_or(1, |c| if c == '+' { 1 } else { -1 });

    let hours = parse_digit_pair(&mut chars)?;

    if chars.peek().is_some_and(|ch| *ch == ':') {
        let _ = chars.next();
    }

    let minutes = match chars.peek().map(|ch| ch.is_ascii_digit()) {
        Some(true) => parse_digit_pair(&mut chars)?,
        Some(false) => return Err(non_ascii_digit()),
        None => 0,
    };

    if chars.next().is_some() {
        return Err(
            DateSpanError::syntax().with_message("unexpected trailing characters in UTC offset.")
        );
    }

    Ok((hours * 60 + minutes) * sign)
}

fn parse_digit_pair(chars: &mut Peekable<Chars<'_>>) -> DateSpanResult<i16> {
    let mut value = 0;
    for _ in 0..2 {
        let digit = chars
            .next()
            .ok_or_else(abrupt_end)?
            .to_digit(10)
            .ok_or_else(non_ascii_digit)?;
        value = value * 10 + digit as i16;
    }
    Ok(value)
}

fn abrupt_end() -> DateSpanError {
    DateSpanError::syntax().with_message("unexpected end of UTC offset string.")
}

fn non_ascii_digit() -> DateSpanError {
    DateSpanError::syntax().with_message("UTC offset must be composed of ASCII digits.")
}

// ==== Formatting ====

#[derive(Debug)]
pub(crate) struct FormattableDate(pub(crate) i32, pub(crate) u8, pub(crate) u8);

impl Writeable for FormattableDate {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_year(self.0, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.1, sink)?;
        sink.write_char('-')?;
        write_padded_u8(self.2, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        // 4-digit years, or sign + 6 digits outside 0000..=9999.
        LengthHint::between(10, 13)
    }
}

#[derive(Debug)]
pub(crate) struct FormattableTime {
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
    pub(crate) millisecond: u16,
}

impl Writeable for FormattableTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.second, sink)?;
        if self.millisecond != 0 {
            sink.write_char('.')?;
            write_subsecond(self.millisecond, sink)?;
        }
        Ok(())
    }

    fn writeable_length_hint(&self) -> LengthHint {
        if self.millisecond == 0 {
            LengthHint::exact(8)
        } else {
            LengthHint::between(10, 12)
        }
    }
}

#[derive(Debug)]
pub(crate) struct FormattableUtcOffset {
    sign: Sign,
    hour: u8,
    minute: u8,
}

impl FormattableUtcOffset {
    pub(crate) fn from_minutes(minutes: i16) -> Self {
        let magnitude = minutes.unsigned_abs();
        Self {
            sign: Sign::from(minutes.cmp(&0) as i8),
            hour: (magnitude / 60) as u8,
            minute: (magnitude % 60) as u8,
        }
    }
}

impl Writeable for FormattableUtcOffset {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        match self.sign {
            Sign::Negative => sink.write_char('-')?,
            _ => sink.write_char('+')?,
        }
        write_padded_u8(self.hour, sink)?;
        sink.write_char(':')?;
        write_padded_u8(self.minute, sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        LengthHint::exact(6)
    }
}

#[derive(Debug)]
pub(crate) struct FormattableOffsetDateTime {
    date: FormattableDate,
    time: FormattableTime,
    offset: FormattableUtcOffset,
}

impl FormattableOffsetDateTime {
    pub(crate) fn from_parts(iso: IsoDateTime, offset_minutes: i16) -> Self {
        Self {
            date: FormattableDate(iso.date.year, iso.date.month, iso.date.day),
            time: FormattableTime {
                hour: iso.time.hour,
                minute: iso.time.minute,
                second: iso.time.second,
                millisecond: iso.time.millisecond,
            },
            offset: FormattableUtcOffset::from_minutes(offset_minutes),
        }
    }
}

impl Writeable for FormattableOffsetDateTime {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        self.date.write_to(sink)?;
        sink.write_char('T')?;
        self.time.write_to(sink)?;
        self.offset.write_to(sink)
    }

    fn writeable_length_hint(&self) -> LengthHint {
        self.date.writeable_length_hint()
            + self.time.writeable_length_hint()
            + self.offset.writeable_length_hint()
            + 1
    }
}

/// An ISO 8601 rendering of a [`Duration`]'s sign-magnitude canonical
/// form.
#[derive(Debug)]
pub(crate) struct FormattableDuration {
    sign: Sign,
    years: u64,
    months: u64,
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
    milliseconds: u64,
}

impl FormattableDuration {
    pub(crate) fn from_duration(duration: &Duration) -> Self {
        let sign = duration.sign();
        let mut remainder = duration.as_milliseconds().unsigned_abs();
        let years = remainder / MS_PER_YEAR as u64;
        remainder %= MS_PER_YEAR as u64;
        let months = remainder / MS_PER_MONTH as u64;
        remainder %= MS_PER_MONTH as u64;
        let days = remainder / MS_PER_DAY as u64;
        remainder %= MS_PER_DAY as u64;
        let hours = remainder / MS_PER_HOUR as u64;
        remainder %= MS_PER_HOUR as u64;
        let minutes = remainder / MS_PER_MINUTE as u64;
        remainder %= MS_PER_MINUTE as u64;
        let seconds = remainder / MS_PER_SECOND as u64;
        let milliseconds = remainder % MS_PER_SECOND as u64;
        Self {
            sign,
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }
}

impl Writeable for FormattableDuration {
    fn write_to<W: core::fmt::Write + ?Sized>(&self, sink: &mut W) -> core::fmt::Result {
        if self.sign == Sign::Negative {
            sink.write_char('-')?;
        }
        sink.write_char('P')?;
        if self.years != 0 {
            self.years.write_to(sink)?;
            sink.write_char('Y')?;
        }
        if self.months != 0 {
            self.months.write_to(sink)?;
            sink.write_char('M')?;
        }
        if self.days != 0 {
            self.days.write_to(sink)?;
            sink.write_char('D')?;
        }

        let write_seconds = self.seconds != 0
            || self.milliseconds != 0
            || (self.years == 0
                && self.months == 0
                && self.days == 0
                && self.hours == 0
                && self.minutes == 0);
        if self.hours != 0 || self.minutes != 0 || write_seconds {
            sink.write_char('T')?;
        }
        if self.hours != 0 {
            self.hours.write_to(sink)?;
            sink.write_char('H')?;
        }
        if self.minutes != 0 {
            self.minutes.write_to(sink)?;
            sink.write_char('M')?;
        }
        if write_seconds {
            self.seconds.write_to(sink)?;
            if self.milliseconds != 0 {
                sink.write_char('.')?;
                write_subsecond(self.milliseconds as u16, sink)?;
            }
            sink.write_char('S')?;
        }
        Ok(())
    }
}

impl_display_with_writeable!(FormattableDate);
impl_display_with_writeable!(FormattableTime);
impl_display_with_writeable!(FormattableUtcOffset);
impl_display_with_writeable!(FormattableOffsetDateTime);
impl_display_with_writeable!(FormattableDuration);

// ==== Write helpers ====

fn write_padded_u8<W: core::fmt::Write + ?Sized>(num: u8, sink: &mut W) -> core::fmt::Result {
    if num < 10 {
        sink.write_char('0')?;
    }
    num.write_to(sink)
}

/// Years inside `0..=9999` print as four digits; anything else prints in
/// the extended form: a sign and six digits.
fn write_year<W: core::fmt::Write + ?Sized>(year: i32, sink: &mut W) -> core::fmt::Result {
    if (0..=9999).contains(&year) {
        write_zero_padded(year as u32, 4, sink)
    } else {
        sink.write_char(if year < 0 { '-' } else { '+' })?;
        write_zero_padded(year.unsigned_abs(), 6, sink)
    }
}

fn write_zero_padded<W: core::fmt::Write + ?Sized>(
    value: u32,
    width: u32,
    sink: &mut W,
) -> core::fmt::Result {
    let mut digits = 1;
    let mut cursor = value;
    while cursor >= 10 {
        cursor /= 10;
        digits += 1;
    }
    for _ in digits..width {
        sink.write_char('0')?;
    }
    value.write_to(sink)
}

/// Writes a millisecond field as fractional-second digits with trailing
/// zeros trimmed.
fn write_subsecond<W: core::fmt::Write + ?Sized>(
    millisecond: u16,
    sink: &mut W,
) -> core::fmt::Result {
    let digits = [
        (millisecond / 100) as u8,
        (millisecond / 10 % 10) as u8,
        (millisecond % 10) as u8,
    ];
    let precision = if digits[2] != 0 {
        3
    } else if digits[1] != 0 {
        2
    } else {
        1
    };
    for digit in digits.iter().take(precision) {
        sink.write_char(char::from(b'0' + digit))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::iso::{IsoDate, IsoTime};
    use alloc::string::ToString;

    #[test]
    fn parses_offset_date_time() {
        let (iso, offset) = parse_offset_date_time("2023-10-04T22:30:15.25+05:30").unwrap();
        assert_eq!(iso.date, IsoDate::new_unchecked(2023, 10, 4));
        // .25 seconds truncate to 250 ms.
        assert_eq!(iso.time, IsoTime::new_unchecked(22, 30, 15, 250));
        assert_eq!(offset, 330);

        let (iso, offset) = parse_offset_date_time("1969-12-31T23:59:59Z").unwrap();
        assert_eq!(iso.date, IsoDate::new_unchecked(1969, 12, 31));
        assert_eq!(offset, 0);
    }

    #[test]
    fn rejects_missing_offset_and_garbage() {
        assert!(parse_offset_date_time("2023-10-04T22:30:15").is_err());
        assert!(parse_offset_date_time("not a date").is_err());
        assert!(parse_offset_date_time("2023-13-04T00:00:00Z").is_err());
    }

    #[test]
    fn parses_standalone_offsets() {
        assert_eq!(parse_utc_offset("+05:30").unwrap(), 330);
        assert_eq!(parse_utc_offset("-0800").unwrap(), -480);
        assert_eq!(parse_utc_offset("+02").unwrap(), 120);
        assert_eq!(parse_utc_offset("Z").unwrap(), 0);
        assert!(parse_utc_offset("05:30").is_err());
        assert!(parse_utc_offset("+05:3").is_err());
        assert!(parse_utc_offset("+05:30x").is_err());
    }

    #[test]
    fn formats_date_time_and_offset() {
        let dt = FormattableOffsetDateTime::from_parts(
            crate::iso::IsoDateTime::new_unchecked(
                IsoDate::new_unchecked(2023, 10, 4),
                IsoTime::new_unchecked(8, 5, 0, 120),
            ),
            -330,
        );
        assert_eq!(dt.to_string(), "2023-10-04T08:05:00.12-05:30");

        let extended = FormattableDate(275_760, 9, 13);
        assert_eq!(extended.to_string(), "+275760-09-13");
        let negative_year = FormattableDate(-4, 2, 29);
        assert_eq!(negative_year.to_string(), "-000004-02-29");
    }

    #[test]
    fn formats_durations() {
        let zero = Duration::default();
        assert_eq!(FormattableDuration::from_duration(&zero).to_string(), "PT0S");

        let composite = Duration::from_milliseconds(90_000);
        assert_eq!(
            FormattableDuration::from_duration(&composite).to_string(),
            "PT1M30S"
        );

        let negative = Duration::from_milliseconds(-90_061_001);
        assert_eq!(
            FormattableDuration::from_duration(&negative).to_string(),
            "-P1DT1H1M1.001S"
        );

        let calendar = Duration {
            years: Some(1),
            months: Some(2),
            ..Default::default()
        };
        assert_eq!(
            FormattableDuration::from_duration(&calendar).to_string(),
            "P1Y2M"
        );
    }
}
