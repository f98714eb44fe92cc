// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for the association tests.
//!
//! All fixtures are pinned to a fixed "today" so the tests are deterministic:
//! the engagement window spans the calendar year after `today`, matching the
//! upstream proxy's test data.

use engagement_config_domain::{
    AssociationRecord, AssociationResponse, ConfigSetRecord, CustomerLimit, CustomerLimits,
    EngagementMetadata, EngagementStatus,
};
use time::OffsetDateTime;
use time::macros::datetime;

/// The injected clock every test uses.
pub fn today() -> OffsetDateTime {
    datetime!(2026-08-15 00:00 UTC)
}

pub const ENGAGEMENT_ID: &str = "122141jno14-fw-gag0-as-9g";
pub const COMPONENT_ID: &str = "12241-915124124-1251";

pub fn metadata() -> EngagementMetadata {
    EngagementMetadata {
        state: EngagementStatus::Draft,
        program_guid: String::from("21124jh1d0saf"),
        id: String::from(ENGAGEMENT_ID),
        version: 1,
        start_date: String::from("2027-01-02T00:00:00.000Z"),
        end_date: String::from("2027-12-31T00:00:00.000Z"),
        approved_versions: Vec::new(),
        solution_area: String::from("ModernWorkAndSecurity"),
        partner_role: String::from("BuildIntent"),
        association_type: String::from("CPOR"),
    }
}

pub fn sample_limits() -> CustomerLimits {
    CustomerLimits::PerCountry(vec![
        CustomerLimit::new("AF", 222).unwrap(),
        CustomerLimit::new("AX", 333).unwrap(),
    ])
}

pub fn config_set_record(
    id: &str,
    start_date: &str,
    end_date: &str,
    survey_url_name: &str,
) -> ConfigSetRecord {
    ConfigSetRecord {
        id: Some(String::from(id)),
        start_date: String::from(start_date),
        end_date: String::from(end_date),
        days_from_claim_customer_to_customer_consent: 23,
        days_from_customer_consent_to_submit_claim: 24,
        days_from_customer_consent_to_final_review: 2,
        days_from_claim_rejection_to_partner_dispute: 5,
        partner_survey_required: true,
        customer_survey_required: false,
        survey_url_name: String::from(survey_url_name),
        customer_limits: sample_limits(),
    }
}

/// An engagement with the proxy's `"component": {}` placeholder: nothing
/// has ever been configured or saved.
pub fn response_without_config_sets() -> AssociationResponse {
    AssociationResponse {
        metadata: metadata(),
        component: Some(AssociationRecord::default()),
    }
}

pub fn response_with_one_config_set() -> AssociationResponse {
    AssociationResponse {
        metadata: metadata(),
        component: Some(AssociationRecord {
            id: Some(String::from(COMPONENT_ID)),
            engagement_id: String::from(ENGAGEMENT_ID),
            engagement_version: 1,
            creation_date: String::from("2026-11-01T00:00:00Z"),
            config_sets: vec![config_set_record(
                "124125125-1-512512521-124",
                "2027-01-02T00:00:00.000Z",
                "2027-12-31T00:00:00.000Z",
                "NameOne",
            )],
        }),
    }
}

pub fn response_with_two_config_sets() -> AssociationResponse {
    AssociationResponse {
        metadata: metadata(),
        component: Some(AssociationRecord {
            id: Some(String::from(COMPONENT_ID)),
            engagement_id: String::from(ENGAGEMENT_ID),
            engagement_version: 1,
            creation_date: String::from("2026-11-01T00:00:00Z"),
            config_sets: vec![
                config_set_record(
                    "124125125-1-512512521-124-1",
                    "2027-01-02T00:00:00.000Z",
                    "2027-02-28T00:00:00.000Z",
                    "NameTwo",
                ),
                config_set_record(
                    "124125125-1-512512521-124-2",
                    "2027-03-01T00:00:00.000Z",
                    "2027-12-31T00:00:00.000Z",
                    "NameThree",
                ),
            ],
        }),
    }
}

/// A window that straddles `today`: starts the previous January, ends the
/// following December. The single saved set starts in the past.
pub fn response_spanning_today() -> AssociationResponse {
    let mut response: AssociationResponse = response_with_one_config_set();
    response.metadata.start_date = String::from("2026-01-02T00:00:00.000Z");
    response.metadata.end_date = String::from("2027-12-31T00:00:00.000Z");
    if let Some(component) = response.component.as_mut() {
        component.config_sets[0].start_date = String::from("2026-01-02T00:00:00.000Z");
    }
    response
}
