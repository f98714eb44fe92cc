// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Wire record shapes for the engagement proxy.
//!
//! These structs mirror the JSON contract exactly: camelCase field names and
//! ISO-8601 date strings. Parsing into domain values (`OffsetDateTime`,
//! `ConfigurationSet`) happens at the boundary, never inside these types.

use crate::types::{CustomerLimits, EngagementStatus};
use serde::{Deserialize, Serialize};

/// Engagement-level metadata attached to every proxy response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementMetadata {
    /// Lifecycle state of the engagement.
    pub state: EngagementStatus,
    /// Identifier of the incentives program the engagement belongs to.
    pub program_guid: String,
    /// The engagement identifier.
    pub id: String,
    /// The engagement version this response reflects.
    pub version: u32,
    /// Window start date (ISO 8601).
    pub start_date: String,
    /// Window end date (ISO 8601).
    pub end_date: String,
    /// Versions that have passed approval.
    pub approved_versions: Vec<u32>,
    /// Solution area label; opaque to the configuration core.
    pub solution_area: String,
    /// Partner role label; opaque to the configuration core.
    pub partner_role: String,
    /// Association type label; opaque to the configuration core.
    pub association_type: String,
}

/// One time-bounded configuration segment as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSetRecord {
    /// Persisted identifier; empty or absent for a set never saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Segment start date (ISO 8601).
    pub start_date: String,
    /// Segment end date as stored server-side (ISO 8601). Informational:
    /// the authoritative end date is always re-derived from the partition.
    pub end_date: String,
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
    /// Per-country customer caps, or `{}` when unrestricted.
    pub customer_limits: CustomerLimits,
}

/// The customer-association component record.
///
/// Every field defaults so that the proxy's `"component": {}` placeholder
/// (an engagement with no saved association) still deserializes; an absent
/// or empty `id` marks the record as never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct AssociationRecord {
    /// Component instance identifier, absent until first save.
    pub id: Option<String>,
    /// The engagement this component belongs to.
    pub engagement_id: String,
    /// The engagement version this component was saved against.
    pub engagement_version: u32,
    /// Timestamp the record was created (ISO 8601).
    pub creation_date: String,
    /// The configuration segments, in server order.
    pub config_sets: Vec<ConfigSetRecord>,
}

impl AssociationRecord {
    /// Returns whether this record carries a persisted component id.
    #[must_use]
    pub fn has_component_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// A full fetch response: engagement metadata plus the optional component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationResponse {
    /// Engagement metadata added by the proxy.
    pub metadata: EngagementMetadata,
    /// The customer-association component, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<AssociationRecord>,
}
