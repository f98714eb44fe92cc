// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Engagement duration-change detection.
//!
//! The engagement window can legitimately change server-side while an
//! editing session holds an older copy. Comparing a freshly fetched record's
//! last configuration-set end date against the held aggregate's window end
//! tells the caller whether (and in which direction) the end date moved, so
//! it can surface a warning before the user saves over stale assumptions.

use crate::association::CustomerAssociation;
use engagement_config_domain::{AssociationRecord, AssociationResponse, ConfigSetRecord, dates};
use time::OffsetDateTime;

/// The direction an engagement's end date moved relative to a held copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementDurationChange {
    /// The fetched record still ends where the held copy expects.
    Unchanged,
    /// The end date moved earlier: saved configuration now extends past it.
    EndDateMovedBack,
    /// The end date moved later: saved configuration no longer reaches it.
    EndDateMovedForward,
}

impl EngagementDurationChange {
    /// Returns whether the engagement window changed at all.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Compares a freshly fetched response against a held association.
///
/// The fetched component's configuration sets are ordered by start date and
/// the chronologically last one's stored end date is compared, UTC-day
/// truncated, against the held aggregate's engagement end date. A response
/// without component data, or with dates that fail to parse, is reported as
/// `Unchanged` (there is nothing trustworthy to warn about).
#[must_use]
pub fn detect_engagement_duration_change(
    response: &AssociationResponse,
    held: &CustomerAssociation,
) -> EngagementDurationChange {
    let Some(last_end_date) = response.component.as_ref().and_then(last_record_end_date) else {
        return EngagementDurationChange::Unchanged;
    };

    let held_end_date: OffsetDateTime = held.window().end_date();
    if dates::is_after_day(last_end_date, held_end_date) {
        EngagementDurationChange::EndDateMovedBack
    } else if dates::is_before_day(last_end_date, held_end_date) {
        EngagementDurationChange::EndDateMovedForward
    } else {
        EngagementDurationChange::Unchanged
    }
}

/// Finds the end date of the chronologically last configuration set record.
///
/// Returns `None` when the record list is empty or any date is unparseable.
fn last_record_end_date(component: &AssociationRecord) -> Option<OffsetDateTime> {
    let mut last: Option<(OffsetDateTime, &ConfigSetRecord)> = None;
    for record in &component.config_sets {
        let start: OffsetDateTime = dates::parse_utc(&record.start_date).ok()?;
        match last {
            Some((latest_start, _)) if latest_start > start => {}
            _ => last = Some((start, record)),
        }
    }

    let (_, record) = last?;
    dates::parse_utc(&record.end_date).ok()
}
