// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::CustomerAssociation;
use crate::tests::helpers::{
    COMPONENT_ID, ENGAGEMENT_ID, response_with_one_config_set, response_with_two_config_sets,
    response_without_config_sets,
};
use engagement_config_domain::{DomainError, EngagementStatus};
use time::macros::datetime;

#[test]
fn test_adopts_existing_config_sets() {
    let association =
        CustomerAssociation::from_response(&response_with_one_config_set(), true).unwrap();

    assert_eq!(association.config_sets().len(), 1);
    assert_eq!(
        association.config_sets()[0].start_date(),
        datetime!(2027-01-02 00:00 UTC)
    );
    assert_eq!(
        association.config_sets()[0].id(),
        Some("124125125-1-512512521-124")
    );
    assert_eq!(association.id(), Some(COMPONENT_ID));
    assert_eq!(association.engagement_id(), ENGAGEMENT_ID);
    assert_eq!(association.engagement_version(), 1);
    assert!(association.has_saved_config_sets());
}

#[test]
fn test_synthesizes_default_set_when_unconfigured() {
    let association =
        CustomerAssociation::from_response(&response_without_config_sets(), true).unwrap();

    assert_eq!(association.config_sets().len(), 1);
    let default_set = &association.config_sets()[0];
    assert_eq!(default_set.start_date(), datetime!(2027-01-02 00:00 UTC));
    assert_eq!(default_set.id(), None);
    assert_eq!(
        default_set.payload().days_from_claim_customer_to_customer_consent,
        0
    );
    assert!(default_set.payload().customer_limits.is_unrestricted());
}

#[test]
fn test_unconfigured_engagement_identity_comes_from_metadata() {
    let association =
        CustomerAssociation::from_response(&response_without_config_sets(), true).unwrap();

    assert_eq!(association.id(), None);
    assert_eq!(association.engagement_id(), ENGAGEMENT_ID);
    assert!(!association.has_saved_config_sets());
}

#[test]
fn test_missing_component_degrades_to_default_set() {
    let mut response = response_without_config_sets();
    response.component = None;

    let association = CustomerAssociation::from_response(&response, true).unwrap();
    assert_eq!(association.config_sets().len(), 1);
    assert!(!association.has_saved_config_sets());
}

#[test]
fn test_sorts_config_sets_loaded_out_of_order() {
    let mut response = response_with_two_config_sets();
    if let Some(component) = response.component.as_mut() {
        component.config_sets.reverse();
    }

    let association = CustomerAssociation::from_response(&response, true).unwrap();
    assert_eq!(
        association.config_sets()[0].start_date(),
        datetime!(2027-01-02 00:00 UTC)
    );
    assert_eq!(
        association.config_sets()[1].start_date(),
        datetime!(2027-03-01 00:00 UTC)
    );
}

#[test]
fn test_first_set_starts_on_engagement_start() {
    for response in [
        response_without_config_sets(),
        response_with_one_config_set(),
        response_with_two_config_sets(),
    ] {
        let association = CustomerAssociation::from_response(&response, true).unwrap();
        assert_eq!(
            association.config_sets()[0].start_date(),
            association.window().start_date()
        );
    }
}

#[test]
fn test_editability_requires_both_state_and_caller_flag() {
    let response = response_with_one_config_set();

    let editable = CustomerAssociation::from_response(&response, true).unwrap();
    assert!(editable.is_editable());
    assert_eq!(editable.state(), EngagementStatus::Draft);

    let read_only_caller = CustomerAssociation::from_response(&response, false).unwrap();
    assert!(!read_only_caller.is_editable());

    let mut submitted = response_with_one_config_set();
    submitted.metadata.state = EngagementStatus::Submitted;
    let locked_state = CustomerAssociation::from_response(&submitted, true).unwrap();
    assert!(!locked_state.is_editable());
}

#[test]
fn test_rejects_unparseable_window_date() {
    let mut response = response_with_one_config_set();
    response.metadata.start_date = String::from("early next year");

    let result = CustomerAssociation::from_response(&response, true);
    assert!(matches!(
        result.unwrap_err(),
        DomainError::DateParseError { .. }
    ));
}

#[test]
fn test_rejects_inverted_window() {
    let mut response = response_with_one_config_set();
    response.metadata.start_date = String::from("2027-12-31T00:00:00.000Z");
    response.metadata.end_date = String::from("2027-01-02T00:00:00.000Z");

    let result = CustomerAssociation::from_response(&response, true);
    assert!(matches!(
        result.unwrap_err(),
        DomainError::InvalidEngagementWindow { .. }
    ));
}

#[test]
fn test_rejects_unparseable_config_set_start_date() {
    let mut response = response_with_one_config_set();
    if let Some(component) = response.component.as_mut() {
        component.config_sets[0].start_date = String::from("whenever");
    }

    let result = CustomerAssociation::from_response(&response, true);
    assert!(matches!(
        result.unwrap_err(),
        DomainError::DateParseError { .. }
    ));
}
