// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The configuration-set value type.
//!
//! A configuration set is one contiguous time segment of an engagement's
//! window, carrying the business parameters that apply while it is active.
//! Its end boundary is never authoritative state: the owning association
//! derives it from the next segment's start date (or the engagement end).
//!
//! ## Invariants
//!
//! - A set is editable iff its start date is not strictly before "today"
//!   (UTC-day truncated); "today" is always an injected parameter
//! - A stored end date loaded from the wire is informational only

use crate::dates;
use crate::error::DomainError;
use crate::records::ConfigSetRecord;
use crate::types::CustomerLimits;
use time::OffsetDateTime;

/// The business parameters a configuration set carries.
///
/// Opaque to the partition logic: carried, cloned, and serialized, but never
/// interpreted by it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigSetPayload {
    /// Days allowed from claiming a customer to customer consent.
    pub days_from_claim_customer_to_customer_consent: u32,
    /// Days allowed from customer consent to claim submission.
    pub days_from_customer_consent_to_submit_claim: u32,
    /// Days allowed from customer consent to final review.
    pub days_from_customer_consent_to_final_review: u32,
    /// Days allowed from claim rejection to partner dispute.
    pub days_from_claim_rejection_to_partner_dispute: u32,
    /// Whether the partner survey is required.
    pub partner_survey_required: bool,
    /// Whether the customer survey is required.
    pub customer_survey_required: bool,
    /// Name of the survey URL to present.
    pub survey_url_name: String,
    /// Per-country customer caps.
    pub customer_limits: CustomerLimits,
}

/// One time-bounded slice of an engagement's customer-association
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationSet {
    /// Persisted identifier; `None` until first save.
    id: Option<String>,
    /// Inclusive start of this set's validity, unique across the partition.
    start_date: OffsetDateTime,
    /// The end date string as loaded from the wire. Never consulted by
    /// partition derivation.
    end_date_as_loaded: Option<String>,
    /// The business parameters.
    payload: ConfigSetPayload,
}

impl ConfigurationSet {
    /// Creates a `ConfigurationSet` from explicit parts.
    #[must_use]
    pub const fn new(id: Option<String>, start_date: OffsetDateTime, payload: ConfigSetPayload) -> Self {
        Self {
            id,
            start_date,
            end_date_as_loaded: None,
            payload,
        }
    }

    /// Creates the synthetic default set: all counters zero, surveys off,
    /// no customer limits.
    ///
    /// Used to cover the whole engagement window when no set has been
    /// configured yet, and as the payload of a freshly added set.
    #[must_use]
    pub fn with_defaults(start_date: OffsetDateTime) -> Self {
        Self::new(None, start_date, ConfigSetPayload::default())
    }

    /// Builds a `ConfigurationSet` from its wire record.
    ///
    /// Normalizes the start date to a UTC timestamp and demotes an empty id
    /// to `None`. The record's end date is retained verbatim for reference
    /// but plays no part in partition derivation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateParseError` if the start date string is not
    /// a valid ISO-8601 date.
    pub fn from_record(record: &ConfigSetRecord) -> Result<Self, DomainError> {
        let start_date: OffsetDateTime = dates::parse_utc(&record.start_date)?;
        let id: Option<String> = record.id.clone().filter(|id| !id.is_empty());
        let end_date_as_loaded: Option<String> =
            Some(record.end_date.clone()).filter(|end| !end.is_empty());

        Ok(Self {
            id,
            start_date,
            end_date_as_loaded,
            payload: ConfigSetPayload {
                days_from_claim_customer_to_customer_consent: record
                    .days_from_claim_customer_to_customer_consent,
                days_from_customer_consent_to_submit_claim: record
                    .days_from_customer_consent_to_submit_claim,
                days_from_customer_consent_to_final_review: record
                    .days_from_customer_consent_to_final_review,
                days_from_claim_rejection_to_partner_dispute: record
                    .days_from_claim_rejection_to_partner_dispute,
                partner_survey_required: record.partner_survey_required,
                customer_survey_required: record.customer_survey_required,
                survey_url_name: record.survey_url_name.clone(),
                customer_limits: record.customer_limits.clone(),
            },
        })
    }

    /// Copies this set's business payload onto a new start date.
    ///
    /// The clone is unsaved: it does not inherit this set's identity.
    #[must_use]
    pub fn clone_with_start(&self, start_date: OffsetDateTime) -> Self {
        Self::new(None, start_date, self.payload.clone())
    }

    /// Returns the persisted identifier, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the set's start date.
    #[must_use]
    pub const fn start_date(&self) -> OffsetDateTime {
        self.start_date
    }

    /// Returns the end date string as loaded from the wire, if any.
    #[must_use]
    pub fn end_date_as_loaded(&self) -> Option<&str> {
        self.end_date_as_loaded.as_deref()
    }

    /// Returns the business payload.
    #[must_use]
    pub const fn payload(&self) -> &ConfigSetPayload {
        &self.payload
    }

    /// Returns whether this set may still be edited relative to `today`.
    ///
    /// A set whose start date is on or after today's UTC day is editable; one
    /// whose start date is in the past is frozen. Recomputed on every call.
    #[must_use]
    pub fn is_editable(&self, today: OffsetDateTime) -> bool {
        !dates::is_before_day(self.start_date, today)
    }

    /// Serializes this set back to its wire record.
    ///
    /// The caller (the owning association) supplies the derived end date;
    /// the stored wire end date is never echoed back.
    ///
    /// # Errors
    ///
    /// Returns an error if either date cannot be formatted as RFC 3339.
    pub fn to_record(&self, end_date: OffsetDateTime) -> Result<ConfigSetRecord, DomainError> {
        Ok(ConfigSetRecord {
            id: self.id.clone(),
            start_date: dates::format_utc(self.start_date)?,
            end_date: dates::format_utc(end_date)?,
            days_from_claim_customer_to_customer_consent: self
                .payload
                .days_from_claim_customer_to_customer_consent,
            days_from_customer_consent_to_submit_claim: self
                .payload
                .days_from_customer_consent_to_submit_claim,
            days_from_customer_consent_to_final_review: self
                .payload
                .days_from_customer_consent_to_final_review,
            days_from_claim_rejection_to_partner_dispute: self
                .payload
                .days_from_claim_rejection_to_partner_dispute,
            partner_survey_required: self.payload.partner_survey_required,
            customer_survey_required: self.payload.customer_survey_required,
            survey_url_name: self.payload.survey_url_name.clone(),
            customer_limits: self.payload.customer_limits.clone(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::CustomerLimit;
    use time::macros::datetime;

    fn sample_record() -> ConfigSetRecord {
        ConfigSetRecord {
            id: Some(String::from("124125125-1-512512521-124")),
            start_date: String::from("2027-01-02T00:00:00Z"),
            end_date: String::from("2027-12-31T00:00:00Z"),
            days_from_claim_customer_to_customer_consent: 12,
            days_from_customer_consent_to_submit_claim: 4,
            days_from_customer_consent_to_final_review: 2,
            days_from_claim_rejection_to_partner_dispute: 5,
            partner_survey_required: true,
            customer_survey_required: false,
            survey_url_name: String::from("NameOne"),
            customer_limits: CustomerLimits::PerCountry(vec![
                CustomerLimit::new("AF", 222).unwrap(),
                CustomerLimit::new("AX", 333).unwrap(),
            ]),
        }
    }

    #[test]
    fn test_from_record_normalizes_start_date() {
        let set = ConfigurationSet::from_record(&sample_record()).unwrap();
        assert_eq!(set.start_date(), datetime!(2027-01-02 00:00 UTC));
        assert_eq!(set.id(), Some("124125125-1-512512521-124"));
        assert_eq!(set.end_date_as_loaded(), Some("2027-12-31T00:00:00Z"));
    }

    #[test]
    fn test_from_record_demotes_empty_id() {
        let mut record = sample_record();
        record.id = Some(String::new());
        let set = ConfigurationSet::from_record(&record).unwrap();
        assert_eq!(set.id(), None);
    }

    #[test]
    fn test_from_record_rejects_bad_start_date() {
        let mut record = sample_record();
        record.start_date = String::from("soon");
        let result = ConfigurationSet::from_record(&record);
        assert!(matches!(
            result.unwrap_err(),
            DomainError::DateParseError { .. }
        ));
    }

    #[test]
    fn test_default_set_payload_is_empty() {
        let set = ConfigurationSet::with_defaults(datetime!(2027-01-02 00:00 UTC));
        assert_eq!(set.id(), None);
        assert_eq!(set.payload().days_from_claim_customer_to_customer_consent, 0);
        assert_eq!(set.payload().days_from_customer_consent_to_submit_claim, 0);
        assert!(!set.payload().partner_survey_required);
        assert!(!set.payload().customer_survey_required);
        assert!(set.payload().survey_url_name.is_empty());
        assert!(set.payload().customer_limits.is_unrestricted());
    }

    #[test]
    fn test_clone_with_start_drops_identity() {
        let source = ConfigurationSet::from_record(&sample_record()).unwrap();
        let clone = source.clone_with_start(datetime!(2027-03-01 00:00 UTC));

        assert_eq!(clone.id(), None);
        assert_eq!(clone.start_date(), datetime!(2027-03-01 00:00 UTC));
        assert_eq!(clone.payload(), source.payload());
    }

    #[test]
    fn test_editability_boundary() {
        let today = datetime!(2026-08-15 00:00 UTC);

        let starts_today = ConfigurationSet::with_defaults(datetime!(2026-08-15 00:00 UTC));
        let started_yesterday = ConfigurationSet::with_defaults(datetime!(2026-08-14 00:00 UTC));
        let starts_tomorrow = ConfigurationSet::with_defaults(datetime!(2026-08-16 00:00 UTC));

        assert!(starts_today.is_editable(today));
        assert!(!started_yesterday.is_editable(today));
        assert!(starts_tomorrow.is_editable(today));
    }

    #[test]
    fn test_editability_ignores_time_of_day() {
        // Late on the 15th is still "today" for a set starting that morning
        let today = datetime!(2026-08-15 23:30 UTC);
        let set = ConfigurationSet::with_defaults(datetime!(2026-08-15 08:00 UTC));
        assert!(set.is_editable(today));
    }

    #[test]
    fn test_to_record_uses_supplied_end_date() {
        let set = ConfigurationSet::from_record(&sample_record()).unwrap();
        let record = set
            .to_record(datetime!(2027-02-28 23:59:59.999 UTC))
            .unwrap();

        assert_eq!(record.start_date, "2027-01-02T00:00:00Z");
        assert_eq!(record.end_date, "2027-02-28T23:59:59.999Z");
        assert_eq!(record.days_from_claim_customer_to_customer_consent, 12);
        assert_eq!(record.survey_url_name, "NameOne");
    }
}
