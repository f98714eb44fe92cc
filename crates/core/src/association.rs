// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The customer-association aggregate.
//!
//! A `CustomerAssociation` owns the ordered sequence of configuration sets
//! for one engagement and keeps it a contiguous, non-overlapping partition of
//! the engagement window.
//!
//! ## Invariants
//!
//! - The sequence is never empty: an unconfigured engagement gets one
//!   synthetic default set spanning the whole window
//! - The first set starts on the engagement start date
//! - Start dates are unique at UTC-day granularity and kept sorted ascending
//! - End dates are always derived from the successor's start date (or the
//!   engagement end date), never read from stored state
//!
//! Policy violations (occupied dates, frozen sets, forbidden deletions) are
//! rejected silently through unchanged-sequence or boolean returns; only
//! malformed wire data errors out of construction.

use engagement_config_domain::{
    AssociationRecord, AssociationResponse, ConfigurationSet, DomainError, EngagementMetadata,
    EngagementStatus, EngagementWindow, dates,
};
use time::OffsetDateTime;

/// The customer-association configuration of a single engagement.
///
/// Constructed fresh from every fetch/save response; discard-changes and
/// post-save flows reconstruct a new instance via [`Self::deep_copy`] or
/// [`Self::from_response`] so the partition invariants are re-validated
/// rather than incrementally trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerAssociation {
    /// Component instance id; `None` until first save.
    id: Option<String>,
    /// The engagement this component belongs to.
    engagement_id: String,
    /// The engagement version this component was saved against.
    engagement_version: u32,
    /// Engagement metadata as received from the proxy.
    metadata: EngagementMetadata,
    /// The window the partition must exactly cover.
    window: EngagementWindow,
    /// The partition, sorted ascending by start date.
    config_sets: Vec<ConfigurationSet>,
    /// Whether any configuration has ever been persisted.
    has_saved_config_sets: bool,
    /// Whether callers may mutate this association at all.
    is_editable: bool,
    /// The response this instance was built from; change-detection baseline.
    initial_response: AssociationResponse,
}

impl CustomerAssociation {
    /// Builds a `CustomerAssociation` from a proxy response.
    ///
    /// Adopts the component's identity and configuration sets when the
    /// response carries a persisted component; otherwise starts a brand-new
    /// association identified by the engagement metadata. An empty
    /// configuration sequence is replaced by a single default set covering
    /// the whole engagement window.
    ///
    /// # Arguments
    ///
    /// * `response` - The fetched engagement + component record
    /// * `is_editable` - The caller's write permission; ANDed with the
    ///   engagement state's own editability
    ///
    /// # Errors
    ///
    /// Returns an error if a window or configuration-set date cannot be
    /// parsed, or if the window's dates are inverted.
    pub fn from_response(
        response: &AssociationResponse,
        is_editable: bool,
    ) -> Result<Self, DomainError> {
        let start_date: OffsetDateTime = dates::parse_utc(&response.metadata.start_date)?;
        let end_date: OffsetDateTime = dates::parse_utc(&response.metadata.end_date)?;
        let window: EngagementWindow = EngagementWindow::new(start_date, end_date)?;

        let component: Option<&AssociationRecord> = response
            .component
            .as_ref()
            .filter(|component| component.has_component_id());

        let (id, engagement_id, engagement_version, mut config_sets) = match component {
            Some(component) => {
                let config_sets: Vec<ConfigurationSet> = component
                    .config_sets
                    .iter()
                    .map(ConfigurationSet::from_record)
                    .collect::<Result<Vec<ConfigurationSet>, DomainError>>()?;
                (
                    component.id.clone(),
                    component.engagement_id.clone(),
                    component.engagement_version,
                    config_sets,
                )
            }
            None => (
                None,
                response.metadata.id.clone(),
                response.metadata.version,
                Vec::new(),
            ),
        };

        let has_saved_config_sets: bool =
            config_sets.iter().any(|set| set.id().is_some()) || component.is_some();

        if config_sets.is_empty() {
            // Cover the whole window with a single, empty configuration
            config_sets.push(ConfigurationSet::with_defaults(window.start_date()));
        }

        let mut association: Self = Self {
            id,
            engagement_id,
            engagement_version,
            metadata: response.metadata.clone(),
            window,
            config_sets,
            has_saved_config_sets,
            is_editable: response.metadata.state.allows_editing() && is_editable,
            initial_response: response.clone(),
        };
        association.sort_config_sets_ascending();
        Ok(association)
    }

    /// Returns the component instance id, if persisted.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the engagement id this association belongs to.
    #[must_use]
    pub fn engagement_id(&self) -> &str {
        &self.engagement_id
    }

    /// Returns the engagement version this association was saved against.
    #[must_use]
    pub const fn engagement_version(&self) -> u32 {
        self.engagement_version
    }

    /// Returns the engagement's lifecycle state.
    #[must_use]
    pub const fn state(&self) -> EngagementStatus {
        self.metadata.state
    }

    /// Returns the engagement window this partition covers.
    #[must_use]
    pub const fn window(&self) -> EngagementWindow {
        self.window
    }

    /// Returns whether any configuration has ever been persisted.
    ///
    /// Distinguishes "create" from "update" on save.
    #[must_use]
    pub const fn has_saved_config_sets(&self) -> bool {
        self.has_saved_config_sets
    }

    /// Returns whether callers may mutate this association.
    ///
    /// Advisory: the engagement state's editability ANDed with the caller's
    /// write permission. The individual operations do not re-check it.
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.is_editable
    }

    /// Returns the current partition, sorted ascending by start date.
    #[must_use]
    pub fn config_sets(&self) -> &[ConfigurationSet] {
        &self.config_sets
    }

    /// Returns the sets frozen because their start date is in the past.
    #[must_use]
    pub fn non_editable_config_sets(&self, today: OffsetDateTime) -> Vec<&ConfigurationSet> {
        self.config_sets
            .iter()
            .filter(|set| !set.is_editable(today))
            .collect()
    }

    /// Returns the sets that may still be edited.
    #[must_use]
    pub fn editable_config_sets(&self, today: OffsetDateTime) -> Vec<&ConfigurationSet> {
        self.config_sets
            .iter()
            .filter(|set| set.is_editable(today))
            .collect()
    }

    /// Derives a configuration set's end date from the partition.
    ///
    /// The end date is the end of the UTC day immediately preceding the next
    /// set's start date, or the engagement end date when no set starts later.
    /// This derivation is authoritative; stored wire end dates are never
    /// consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the successor's start date precedes the calendar
    /// minimum (date arithmetic overflow).
    pub fn config_set_end_date(
        &self,
        config_set: &ConfigurationSet,
    ) -> Result<OffsetDateTime, DomainError> {
        let next_start: Option<OffsetDateTime> = self
            .config_sets
            .iter()
            .map(ConfigurationSet::start_date)
            .filter(|start| dates::is_after_day(*start, config_set.start_date()))
            .min_by(|a, b| dates::compare_days(*a, *b));

        match next_start {
            Some(start) => dates::end_of_previous_utc_day(start),
            None => Ok(self.window.end_date()),
        }
    }

    /// Returns whether a candidate start date may be used for a new set.
    ///
    /// A date is available when it falls within the engagement window
    /// (boundary days included), is not in the past relative to `today`, and
    /// no existing set already starts on the same UTC day.
    #[must_use]
    pub fn is_date_available(&self, date: OffsetDateTime, today: OffsetDateTime) -> bool {
        self.window.contains_day(date)
            && !dates::is_before_day(date, today)
            && !self
                .config_sets
                .iter()
                .any(|set| dates::is_same_day(set.start_date(), date))
    }

    /// Returns whether a configuration set may be deleted.
    ///
    /// The chronologically first set anchors the partition to the engagement
    /// start date and can never be deleted; past (frozen) sets cannot be
    /// deleted either.
    #[must_use]
    pub fn can_delete_config_set(
        &self,
        config_set: &ConfigurationSet,
        today: OffsetDateTime,
    ) -> bool {
        let Some(first) = self.config_sets.first() else {
            return false;
        };
        !dates::is_same_day(config_set.start_date(), first.start_date())
            && config_set.is_editable(today)
    }

    /// Adds a default-valued set starting on the given date.
    ///
    /// A no-op when the date is unavailable. Returns the (possibly
    /// unchanged) partition.
    pub fn add_config_set(
        &mut self,
        start_date: OffsetDateTime,
        today: OffsetDateTime,
    ) -> &[ConfigurationSet] {
        if self.is_date_available(start_date, today) {
            self.config_sets
                .push(ConfigurationSet::with_defaults(start_date));
            self.sort_config_sets_ascending();
        }
        &self.config_sets
    }

    /// Adds a set copying the business payload of the set at `source_index`.
    ///
    /// The clone does not inherit the source's identity. A no-op when the
    /// date is unavailable or the index is out of range. Returns the
    /// (possibly unchanged) partition.
    pub fn clone_config_set(
        &mut self,
        start_date: OffsetDateTime,
        source_index: usize,
        today: OffsetDateTime,
    ) -> &[ConfigurationSet] {
        if let Some(source) = self.config_sets.get(source_index)
            && self.is_date_available(start_date, today)
        {
            let clone: ConfigurationSet = source.clone_with_start(start_date);
            self.config_sets.push(clone);
            self.sort_config_sets_ascending();
        }
        &self.config_sets
    }

    /// Deletes the set starting on the given UTC day.
    ///
    /// Refuses the chronologically first set and frozen sets.
    ///
    /// # Returns
    ///
    /// `true` if a set was removed.
    pub fn delete_config_set(&mut self, start_date: OffsetDateTime, today: OffsetDateTime) -> bool {
        let Some(index) = self
            .config_sets
            .iter()
            .position(|set| dates::is_same_day(set.start_date(), start_date))
        else {
            return false;
        };
        if !self.can_delete_config_set(&self.config_sets[index], today) {
            return false;
        }
        self.config_sets.remove(index);
        true
    }

    /// Replaces the set currently starting on `slot_start` with `updated`.
    ///
    /// Fails when no set starts on that day or the set is frozen. When the
    /// update moves the start date, the new date must be available and the
    /// original slot must be deletable (in particular, the first set cannot
    /// be moved off the engagement start date).
    ///
    /// # Returns
    ///
    /// `true` if the slot was replaced.
    pub fn update_config_set(
        &mut self,
        slot_start: OffsetDateTime,
        updated: ConfigurationSet,
        today: OffsetDateTime,
    ) -> bool {
        let Some(index) = self
            .config_sets
            .iter()
            .position(|set| dates::is_same_day(set.start_date(), slot_start))
        else {
            return false;
        };
        if !self.config_sets[index].is_editable(today) {
            return false;
        }

        let moves_start: bool = !dates::is_same_day(updated.start_date(), slot_start);
        if moves_start
            && (!self.is_date_available(updated.start_date(), today)
                || !self.can_delete_config_set(&self.config_sets[index], today))
        {
            return false;
        }

        self.config_sets[index] = updated;
        self.sort_config_sets_ascending();
        true
    }

    /// Serializes the association to its component record.
    ///
    /// Each set is emitted with its derived end date; `creation_date` is the
    /// supplied `now`, formatted RFC 3339.
    ///
    /// # Errors
    ///
    /// Returns an error if a date cannot be derived or formatted.
    pub fn to_record(&self, now: OffsetDateTime) -> Result<AssociationRecord, DomainError> {
        let mut config_sets = Vec::with_capacity(self.config_sets.len());
        for set in &self.config_sets {
            let end_date: OffsetDateTime = self.config_set_end_date(set)?;
            config_sets.push(set.to_record(end_date)?);
        }

        Ok(AssociationRecord {
            id: self.id.clone(),
            engagement_id: self.engagement_id.clone(),
            engagement_version: self.engagement_version,
            creation_date: dates::format_utc(now)?,
            config_sets,
        })
    }

    /// Rebuilds the full response shape this association round-trips
    /// through: the engagement metadata plus the serialized component.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails (see [`Self::to_record`]).
    pub fn to_response(&self, now: OffsetDateTime) -> Result<AssociationResponse, DomainError> {
        Ok(AssociationResponse {
            metadata: self.metadata.clone(),
            component: Some(self.to_record(now)?),
        })
    }

    /// Returns an independent copy, reconstructed through the wire shape.
    ///
    /// The supported mechanism for "discard changes" and for producing a
    /// snapshot to compare modifications against: reconstruction re-validates
    /// every partition invariant.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or reconstruction fails.
    pub fn deep_copy(&self, now: OffsetDateTime) -> Result<Self, DomainError> {
        Self::from_response(&self.to_response(now)?, true)
    }

    /// Returns whether a set differs from its originally loaded state.
    ///
    /// Reconstructs the baseline association from the retained fetch
    /// response and compares derived end dates: a sibling's start date
    /// moving shifts this set's derived end date and counts as a
    /// modification even though the set's own fields are untouched. A set
    /// with no baseline counterpart on the same start day is new, hence
    /// modified.
    #[must_use]
    pub fn is_config_set_modified(&self, config_set: &ConfigurationSet) -> bool {
        let Ok(baseline) = Self::from_response(&self.initial_response, true) else {
            return true;
        };

        let originals: Vec<&ConfigurationSet> = baseline
            .config_sets()
            .iter()
            .filter(|original| dates::is_same_day(original.start_date(), config_set.start_date()))
            .collect();
        let [original] = originals.as_slice() else {
            return true;
        };

        match (
            self.config_set_end_date(config_set),
            baseline.config_set_end_date(original),
        ) {
            (Ok(current_end), Ok(original_end)) => !dates::is_same_day(current_end, original_end),
            _ => true,
        }
    }

    /// Re-sorts the partition ascending by UTC start day.
    fn sort_config_sets_ascending(&mut self) {
        self.config_sets
            .sort_by(|a, b| dates::compare_days(a.start_date(), b.start_date()));
    }
}
