use core::cmp::Ordering;
use core::str::FromStr;

use alloc::string::ToString;

use crate::{
    error::ErrorKind,
    units::{MS_MAX_INSTANT, MS_MIN_INSTANT, MS_PER_YEAR},
    Sign,
};

use super::Duration;

#[test]
fn canonical_decomposition() {
    let d = Duration::from_milliseconds(90_000);
    assert_eq!(d.years, Some(0));
    assert_eq!(d.months, Some(0));
    assert_eq!(d.days, Some(0));
    assert_eq!(d.hours, Some(0));
    assert_eq!(d.minutes, Some(1));
    assert_eq!(d.seconds, Some(30));
    assert_eq!(d.milliseconds, Some(0));
    assert_eq!(d.as_milliseconds(), 90_000);
}

#[test]
fn decomposition_is_greedy_largest_unit_first() {
    let d = Duration::from_milliseconds(MS_PER_YEAR + 90_000);
    assert_eq!(d.years, Some(1));
    assert_eq!(d.months, Some(0));
    assert_eq!(d.minutes, Some(1));
    assert_eq!(d.seconds, Some(30));

    // 36 hours spill into one day and twelve hours.
    let d = Duration::from_milliseconds(36 * 3_600_000);
    assert_eq!(d.days, Some(1));
    assert_eq!(d.hours, Some(12));
}

#[test]
fn negative_decomposition_uses_floor_division() {
    // Floor division pushes the years field below zero and keeps every
    // lower-order remainder non-negative.
    let d = Duration::from_milliseconds(-1);
    assert_eq!(d.years, Some(-1));
    assert_eq!(d.months, Some(11));
    assert_eq!(d.days, Some(30));
    assert_eq!(d.hours, Some(10));
    assert_eq!(d.minutes, Some(29));
    assert_eq!(d.seconds, Some(5));
    assert_eq!(d.milliseconds, Some(999));
    assert_eq!(d.as_milliseconds(), -1);

    let d = Duration::from_milliseconds(-90_000);
    assert_eq!(d.years, Some(-1));
    assert_eq!(d.as_milliseconds(), -90_000);
}

#[test]
fn round_trip_law() {
    let samples = [
        0,
        1,
        -1,
        999,
        -999,
        90_000,
        -90_000,
        MS_PER_YEAR,
        MS_PER_YEAR - 1,
        -MS_PER_YEAR,
        MS_MAX_INSTANT,
        MS_MIN_INSTANT,
        i64::MAX,
        i64::MIN,
        1_696_459_917_000,
    ];
    for t in samples {
        assert_eq!(
            Duration::from_milliseconds(t).as_milliseconds(),
            t,
            "round trip for {t}"
        );
    }
}

#[test]
fn absence_is_distinct_from_explicit_zero() {
    let unspecified = Duration::default();
    assert!(unspecified.is_empty());
    assert_eq!(unspecified.years, None);
    assert_eq!(unspecified.years(), 0);

    let explicit = Duration {
        years: Some(0),
        ..Default::default()
    };
    assert!(!explicit.is_empty());
    assert_eq!(explicit.years, Some(0));
    assert_eq!(explicit.years(), 0);

    // Both still aggregate identically.
    assert_eq!(unspecified, explicit);
}

#[test]
fn non_canonical_fields_are_not_normalized() {
    let ninety = Duration {
        seconds: Some(90),
        ..Default::default()
    };
    assert_eq!(ninety.seconds, Some(90));
    assert_eq!(ninety.as_milliseconds(), 90_000);

    // Aggregation is the inverse of decomposition only on canonical
    // values; the non-canonical layout survives untouched but shares its
    // aggregate with the canonical form.
    let canonical = Duration::from_milliseconds(ninety.as_milliseconds());
    assert_eq!(canonical.minutes, Some(1));
    assert_eq!(canonical.seconds, Some(30));
    assert_eq!(ninety, canonical);
}

#[test]
fn comparison_is_by_aggregate() {
    let hour = Duration {
        hours: Some(1),
        ..Default::default()
    };
    let sixty_minutes = Duration {
        minutes: Some(60),
        ..Default::default()
    };
    let ninety_minutes = Duration {
        minutes: Some(90),
        ..Default::default()
    };

    assert_eq!(hour, sixty_minutes);
    assert!(ninety_minutes > hour);
    assert!(hour < ninety_minutes);
    assert!(hour >= sixty_minutes);
    assert!(hour <= sixty_minutes);
    assert_eq!(hour.compare(&ninety_minutes), Ordering::Less);
}

#[test]
fn comparison_trichotomy() {
    let samples = [
        Duration::default(),
        Duration::from_milliseconds(-1),
        Duration::from_milliseconds(1),
        Duration {
            minutes: Some(90),
            ..Default::default()
        },
        Duration {
            hours: Some(1),
            minutes: Some(30),
            ..Default::default()
        },
    ];
    for a in &samples {
        for b in &samples {
            let holds = [a > b, a == b, a < b];
            assert_eq!(
                holds.iter().filter(|p| **p).count(),
                1,
                "exactly one of gt/eq/lt must hold"
            );
        }
    }
}

#[test]
fn add_is_canonicalized() {
    let hour = Duration {
        hours: Some(1),
        ..Default::default()
    };
    let half_hour = Duration {
        minutes: Some(30),
        ..Default::default()
    };
    let sum = hour.add(&half_hour);
    assert_eq!(sum.as_milliseconds(), 5_400_000);
    // The result is always fully present, whatever the inputs looked
    // like.
    assert_eq!(sum.hours, Some(1));
    assert_eq!(sum.minutes, Some(30));
    assert_eq!(sum.years, Some(0));
}

#[test]
fn add_commutes_and_associates_under_aggregation() {
    let a = Duration::from_milliseconds(123_456_789);
    let b = Duration {
        days: Some(2),
        seconds: Some(-5),
        ..Default::default()
    };
    let c = Duration {
        months: Some(1),
        ..Default::default()
    };

    assert_eq!(
        a.add(&b).as_milliseconds(),
        a.as_milliseconds() + b.as_milliseconds()
    );
    assert_eq!(a.add(&b), b.add(&a));
    assert_eq!(a.add(&b).add(&c), a.add(&b.add(&c)));
}

#[test]
fn subtract_requires_non_negative_result() {
    let amount = Duration::from_milliseconds(1_000);
    let duration = Duration::from_milliseconds(5_000);

    let err = amount.subtract(&duration).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NegativeDuration);

    let difference = duration.subtract(&amount).unwrap();
    assert_eq!(difference.as_milliseconds(), 4_000);
    assert_eq!(difference.seconds, Some(4));

    // Equal aggregates subtract to zero rather than failing.
    let zero = duration.subtract(&duration).unwrap();
    assert!(zero.is_zero());
}

#[test]
fn sign_and_zero() {
    assert_eq!(Duration::default().sign(), Sign::Zero);
    assert_eq!(Duration::from_milliseconds(5).sign(), Sign::Positive);
    assert_eq!(Duration::from_milliseconds(-5).sign(), Sign::Negative);
    assert!(Duration::default().is_zero());
    // Mixed-sign fields cancel by aggregate.
    let cancelling = Duration {
        hours: Some(1),
        minutes: Some(-60),
        ..Default::default()
    };
    assert!(cancelling.is_zero());
    assert_eq!(cancelling.sign(), Sign::Zero);
}

#[test]
fn negated_and_abs_preserve_layout() {
    let d = Duration {
        hours: Some(2),
        seconds: Some(-30),
        ..Default::default()
    };
    let negated = d.negated();
    assert_eq!(negated.hours, Some(-2));
    assert_eq!(negated.seconds, Some(30));
    assert_eq!(negated.years, None);
    assert_eq!(
        negated.as_milliseconds(),
        -d.as_milliseconds()
    );

    let magnitudes = d.abs();
    assert_eq!(magnitudes.hours, Some(2));
    assert_eq!(magnitudes.seconds, Some(30));
}

#[test]
fn parses_iso_duration_strings() {
    let d = Duration::from_str("P1Y2M3DT4H5M6.5S").unwrap();
    assert_eq!(d.years, Some(1));
    assert_eq!(d.months, Some(2));
    assert_eq!(d.days, Some(3));
    assert_eq!(d.hours, Some(4));
    assert_eq!(d.minutes, Some(5));
    assert_eq!(d.seconds, Some(6));
    assert_eq!(d.milliseconds, Some(500));

    // Weeks fold into days.
    let d = Duration::from_str("P1W2D").unwrap();
    assert_eq!(d.days, Some(9));

    // A date-only string leaves the time fields unspecified.
    assert_eq!(d.hours, None);

    let d = Duration::from_str("-PT1H30M").unwrap();
    assert_eq!(d.hours, Some(-1));
    assert_eq!(d.minutes, Some(-30));
    assert_eq!(d.as_milliseconds(), -5_400_000);

    assert!(Duration::from_str("one hour").is_err());
}

#[test]
fn displays_canonical_iso_form() {
    assert_eq!(Duration::from_milliseconds(90_000).to_string(), "PT1M30S");
    assert_eq!(Duration::default().to_string(), "PT0S");

    let twenty_six_hours = Duration {
        hours: Some(26),
        ..Default::default()
    };
    assert_eq!(twenty_six_hours.to_string(), "P1DT2H");

    let negative_hour = Duration {
        hours: Some(-1),
        ..Default::default()
    };
    assert_eq!(negative_hour.to_string(), "-PT1H");
}
