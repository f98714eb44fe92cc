// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates;
use crate::error::DomainError;
use time::OffsetDateTime;

/// Validates that a country code is a two-letter ISO code.
///
/// This function is pure and does not normalize; normalization to uppercase
/// happens at construction time via `CustomerLimit::new`.
///
/// # Errors
///
/// Returns `DomainError::InvalidCountryCode` if the code is not exactly two
/// ASCII alphabetic characters.
pub fn validate_country_code(country_code: &str) -> Result<(), DomainError> {
    // Rule: country codes are ISO 3166-1 alpha-2
    if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::InvalidCountryCode(country_code.to_string()));
    }
    Ok(())
}

/// Validates that an engagement window's dates are ordered.
///
/// The end date may fall on the same UTC day as the start date (a one-day
/// engagement) but never on an earlier one.
///
/// # Errors
///
/// Returns `DomainError::InvalidEngagementWindow` if the end date's UTC day
/// is strictly before the start date's.
pub fn validate_window_dates(
    start_date: OffsetDateTime,
    end_date: OffsetDateTime,
) -> Result<(), DomainError> {
    if dates::is_before_day(end_date, start_date) {
        return Err(DomainError::InvalidEngagementWindow {
            start_date,
            end_date,
        });
    }
    Ok(())
}
