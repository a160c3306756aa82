//! The `datespan_rs` crate implements date/time and duration arithmetic
//! over fixed-offset calendar instants.
//!
//! ```rust
//! use datespan_rs::{Duration, OffsetDateTime, UtcOffset};
//!
//! // Canonical decomposition of a flat millisecond count.
//! let span = Duration::from_milliseconds(90_000);
//! assert_eq!(span.minutes(), 1);
//! assert_eq!(span.seconds(), 30);
//! assert_eq!(span.as_milliseconds(), 90_000);
//!
//! // A calendar instant with an explicit UTC offset.
//! let utc = UtcOffset::from_minutes(0).unwrap();
//! let date = OffsetDateTime::try_new(2025, 3, 3, 12, 0, 0, 0, utc).unwrap();
//! let later = date.add(&span).unwrap();
//! assert_eq!(later.minute(), 1);
//! assert_eq!(later.second(), 30);
//! ```
//!
//! Calendar instants are modeled with explicit numeric UTC offsets only;
//! time-zone-database-aware conversion and locale-aware formatting are out
//! of scope, as is sub-millisecond precision.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::missing_errors_doc,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod units;

#[cfg(feature = "sys")]
pub(crate) mod sys;

pub(crate) mod parsers;

mod datetime;
mod duration;
mod interval;

#[doc(hidden)]
pub(crate) mod iso;

use core::cmp::Ordering;

#[doc(inline)]
pub use error::DateSpanError;

/// The `datespan_rs` result type.
pub type DateSpanResult<T> = Result<T, DateSpanError>;

pub use crate::{
    datetime::{OffsetDateTime, UtcOffset},
    duration::Duration,
    interval::{EachDay, EachHour, EachMinute, Interval},
};

#[cfg(feature = "sys")]
pub use crate::sys::now_utc;

#[doc(hidden)]
#[macro_export]
macro_rules! datespan_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err(DateSpanError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err(DateSpanError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i8> for Sign {
    fn from(value: i8) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}
