// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! UTC-normalized date primitives.
//!
//! Every before/after/equal decision in the engagement configuration core is
//! made at UTC-day granularity: the time of day is discarded so that a
//! timestamp recorded a few hours either side of midnight never lands in the
//! wrong configuration segment.
//!
//! ## Invariants
//!
//! - All comparisons truncate both operands to the start of their UTC day
//! - "End of day" is 23:59:59.999 UTC of the same calendar day
//! - Wire dates are RFC 3339 timestamps, with bare `YYYY-MM-DD` accepted as
//!   midnight UTC

use crate::error::DomainError;
use std::cmp::Ordering;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::{format_description, time};
use time::{Date, Month, OffsetDateTime, Time, UtcOffset};

const DATE_ONLY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

const END_OF_DAY: Time = time!(23:59:59.999);

/// Returns the UTC calendar day a timestamp falls on.
#[must_use]
pub fn utc_day(date: OffsetDateTime) -> Date {
    date.to_offset(UtcOffset::UTC).date()
}

/// Truncates a timestamp to 00:00:00.000 UTC of its UTC calendar day.
#[must_use]
pub fn start_of_utc_day(date: OffsetDateTime) -> OffsetDateTime {
    utc_day(date).midnight().assume_utc()
}

/// Returns 23:59:59.999 UTC of the timestamp's UTC calendar day.
#[must_use]
pub fn end_of_utc_day(date: OffsetDateTime) -> OffsetDateTime {
    utc_day(date).with_time(END_OF_DAY).assume_utc()
}

/// Returns the end of the UTC day immediately before the timestamp's day.
///
/// This is the building block for derived configuration-set end dates: a
/// segment ends one instant before its successor begins.
///
/// # Errors
///
/// Returns an error if the date precedes the calendar's minimum day.
pub fn end_of_previous_utc_day(date: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    let previous: Date =
        utc_day(date)
            .previous_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: "computing the end of the previous UTC day".to_string(),
            })?;
    Ok(previous.with_time(END_OF_DAY).assume_utc())
}

/// Day-truncated "strictly before" comparison.
#[must_use]
pub fn is_before_day(date: OffsetDateTime, date_to_compare: OffsetDateTime) -> bool {
    utc_day(date) < utc_day(date_to_compare)
}

/// Day-truncated "strictly after" comparison.
#[must_use]
pub fn is_after_day(date: OffsetDateTime, date_to_compare: OffsetDateTime) -> bool {
    utc_day(date) > utc_day(date_to_compare)
}

/// Day-truncated equality: both timestamps fall on the same UTC day.
#[must_use]
pub fn is_same_day(date: OffsetDateTime, date_to_compare: OffsetDateTime) -> bool {
    utc_day(date) == utc_day(date_to_compare)
}

/// Day-truncated ordering, used to keep configuration sets sorted ascending.
#[must_use]
pub fn compare_days(date: OffsetDateTime, date_to_compare: OffsetDateTime) -> Ordering {
    utc_day(date).cmp(&utc_day(date_to_compare))
}

/// Returns whether the timestamp falls on the first day of its UTC month.
#[must_use]
pub fn is_first_day_of_utc_month(date: OffsetDateTime) -> bool {
    utc_day(date).day() == 1
}

/// Truncates a timestamp to midnight UTC on the first day of its month.
///
/// # Errors
///
/// Returns an error if the first of the month cannot be represented.
pub fn start_of_utc_month(date: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    let day: Date = utc_day(date);
    let first: Date = Date::from_calendar_date(day.year(), day.month(), 1).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("truncating {day} to the start of its month"),
        }
    })?;
    Ok(first.midnight().assume_utc())
}

/// Returns the closest start of a UTC month on or after the given date.
///
/// A date already on the first of a month is returned unchanged (truncated to
/// midnight UTC); any other date rounds up to the first of the following
/// month. Used to propose the next natural segment boundary.
///
/// # Errors
///
/// Returns an error if rounding up overflows the calendar.
pub fn start_of_next_utc_month(date: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
    let day: Date = utc_day(date);
    if day.day() == 1 {
        return Ok(start_of_utc_day(date));
    }

    let (year, month): (i32, Month) = match day.month() {
        Month::December => (day.year() + 1, Month::January),
        other => (day.year(), other.next()),
    };
    let first: Date = Date::from_calendar_date(year, month, 1).map_err(|_| {
        DomainError::DateArithmeticOverflow {
            operation: format!("rounding {day} up to the start of the next month"),
        }
    })?;
    Ok(first.midnight().assume_utc())
}

/// Parses a wire date string into a UTC timestamp.
///
/// Accepts RFC 3339 timestamps (the shape the engagement proxy emits) and
/// bare `YYYY-MM-DD` dates, which are taken as midnight UTC.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string matches neither shape.
pub fn parse_utc(date_string: &str) -> Result<OffsetDateTime, DomainError> {
    if let Ok(parsed) = OffsetDateTime::parse(date_string, &Rfc3339) {
        return Ok(parsed.to_offset(UtcOffset::UTC));
    }

    Date::parse(date_string, DATE_ONLY_FORMAT)
        .map(|day| day.midnight().assume_utc())
        .map_err(|error| DomainError::DateParseError {
            date_string: date_string.to_string(),
            error: error.to_string(),
        })
}

/// Formats a UTC timestamp as an RFC 3339 wire string.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339
/// (a year outside 0-9999).
pub fn format_utc(date: OffsetDateTime) -> Result<String, DomainError> {
    date.to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|error| DomainError::DateFormatError {
            reason: error.to_string(),
        })
}
