// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates;
use crate::error::DomainError;
use crate::validation::{validate_country_code, validate_window_dates};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::OffsetDateTime;

/// Represents the lifecycle state of an engagement, as reported by the
/// engagement proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EngagementStatus {
    /// State not reported or not recognized upstream.
    #[default]
    Unknown,
    /// Proxy sentinel for "no state change".
    SameAsItWasBeforeTheAction,
    /// Being authored. Full editing allowed.
    Draft,
    /// Submitted for approval.
    Submitted,
    /// Approved and locked.
    Approved,
    /// Rejected; returned to the author for rework.
    Rejected,
    /// Awaiting an internal action.
    MicrosoftActionRequired,
}

impl FromStr for EngagementStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unknown" => Ok(Self::Unknown),
            "SameAsItWasBeforeTheAction" => Ok(Self::SameAsItWasBeforeTheAction),
            "Draft" => Ok(Self::Draft),
            "Submitted" => Ok(Self::Submitted),
            "Approved" => Ok(Self::Approved),
            "Rejected" => Ok(Self::Rejected),
            "MicrosoftActionRequired" => Ok(Self::MicrosoftActionRequired),
            _ => Err(DomainError::InvalidEngagementStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EngagementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EngagementStatus {
    /// Converts this status to its wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::SameAsItWasBeforeTheAction => "SameAsItWasBeforeTheAction",
            Self::Draft => "Draft",
            Self::Submitted => "Submitted",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::MicrosoftActionRequired => "MicrosoftActionRequired",
        }
    }

    /// Returns whether the engagement's configuration may still be edited.
    ///
    /// `Draft` and `Rejected` are authoring states; everything else is in or
    /// past the approval pipeline and read-only.
    #[must_use]
    pub const fn allows_editing(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }
}

/// The bounded time interval an engagement's configuration partition must
/// exactly cover.
///
/// Supplied by the engagement proxy at load time; never mutated by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementWindow {
    /// The window start (inclusive).
    start_date: OffsetDateTime,
    /// The window end (inclusive at day granularity).
    end_date: OffsetDateTime,
}

impl EngagementWindow {
    /// Creates a new `EngagementWindow`.
    ///
    /// # Arguments
    ///
    /// * `start_date` - The window start (inclusive)
    /// * `end_date` - The window end
    ///
    /// # Errors
    ///
    /// Returns an error if the end date falls on a UTC day strictly before
    /// the start date.
    pub fn new(
        start_date: OffsetDateTime,
        end_date: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        validate_window_dates(start_date, end_date)?;
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Returns the window start date.
    #[must_use]
    pub const fn start_date(&self) -> OffsetDateTime {
        self.start_date
    }

    /// Returns the window end date.
    #[must_use]
    pub const fn end_date(&self) -> OffsetDateTime {
        self.end_date
    }

    /// Returns whether a date falls within the window, day-truncated.
    ///
    /// Both boundary days are inside the window.
    #[must_use]
    pub fn contains_day(&self, date: OffsetDateTime) -> bool {
        !dates::is_before_day(date, self.start_date) && !dates::is_after_day(date, self.end_date)
    }
}

/// A per-country cap on the number of customers an engagement may claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerLimit {
    /// Two-letter ISO country code, uppercase.
    country_code: String,
    /// Maximum number of customers for the country.
    max_customers: u32,
}

impl CustomerLimit {
    /// Creates a new `CustomerLimit`.
    ///
    /// Country codes are normalized to uppercase.
    ///
    /// # Errors
    ///
    /// Returns an error if the country code is not exactly two ASCII letters.
    pub fn new(country_code: &str, max_customers: u32) -> Result<Self, DomainError> {
        validate_country_code(country_code)?;
        Ok(Self {
            country_code: country_code.to_uppercase(),
            max_customers,
        })
    }

    /// Returns the country code.
    #[must_use]
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Returns the maximum number of customers.
    #[must_use]
    pub const fn max_customers(&self) -> u32 {
        self.max_customers
    }
}

/// Per-country customer limits as they appear on the wire.
///
/// The engagement proxy emits either a list of per-country entries or an
/// empty JSON object meaning "no limits configured". Opaque to the partition
/// logic; carried but never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerLimits {
    /// Explicit per-country caps.
    PerCountry(Vec<CustomerLimit>),
    /// The `{}` wire shape: no limits configured.
    Unrestricted(BTreeMap<String, u32>),
}

impl Default for CustomerLimits {
    fn default() -> Self {
        Self::Unrestricted(BTreeMap::new())
    }
}

impl CustomerLimits {
    /// Returns the per-country entries, empty when unrestricted.
    #[must_use]
    pub fn entries(&self) -> &[CustomerLimit] {
        match self {
            Self::PerCountry(entries) => entries,
            Self::Unrestricted(_) => &[],
        }
    }

    /// Returns whether no per-country cap is configured.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.entries().is_empty()
    }
}
