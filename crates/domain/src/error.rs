// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Failed to parse a date from a wire string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Failed to format a date for the wire.
    DateFormatError {
        /// Description of the value that could not be formatted.
        reason: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Engagement window end date precedes its start date.
    InvalidEngagementWindow {
        /// The window start date.
        start_date: OffsetDateTime,
        /// The window end date.
        end_date: OffsetDateTime,
    },
    /// Engagement status string is not recognized.
    InvalidEngagementStatus(String),
    /// Country code is not a two-letter ISO code.
    InvalidCountryCode(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateFormatError { reason } => {
                write!(f, "Failed to format date: {reason}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidEngagementWindow {
                start_date,
                end_date,
            } => {
                write!(
                    f,
                    "Engagement window end date {end_date} precedes start date {start_date}"
                )
            }
            Self::InvalidEngagementStatus(status) => {
                write!(f, "Unknown engagement status: {status}")
            }
            Self::InvalidCountryCode(code) => {
                write!(
                    f,
                    "Invalid country code '{code}': must be exactly 2 letters"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
