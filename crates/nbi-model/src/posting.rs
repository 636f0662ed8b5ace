//! Load posting evaluations and posting status history.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, RecordStatus};
use crate::schema::{Entity, FieldSpec, key_part};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingEvaluation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Legal Load Configuration
    #[serde(rename = "BEP01", skip_serializing_if = "Option::is_none")]
    pub legal_load_configuration: Option<String>,
    /// Legal Load Rating Factor
    #[serde(rename = "BEP02", skip_serializing_if = "Option::is_none")]
    pub legal_load_rating_factor: Option<String>,
    /// Posting Type
    #[serde(rename = "BEP03", skip_serializing_if = "Option::is_none")]
    pub posting_type: Option<String>,
    /// Posting Value
    #[serde(rename = "BEP04", skip_serializing_if = "Option::is_none")]
    pub posting_value: Option<String>,
}

const POSTING_EVALUATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("BEP01", "Legal Load Configuration", 2),
    FieldSpec::numeric("BEP02", "Legal Load Rating Factor", 4, 2),
    FieldSpec::text("BEP03", "Posting Type", 1),
    FieldSpec::text("BEP04", "Posting Value", 15),
];

impl Entity for PostingEvaluation {
    const KIND: EntityKind = EntityKind::PostingEvaluation;

    fn schema() -> &'static [FieldSpec] {
        POSTING_EVALUATION_FIELDS
    }

    fn field(&self, item: &str) -> Option<&str> {
        match item {
            "BEP01" => self.legal_load_configuration.as_deref(),
            "BEP02" => self.legal_load_rating_factor.as_deref(),
            "BEP03" => self.posting_type.as_deref(),
            "BEP04" => self.posting_value.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, item: &str, value: Option<String>) -> bool {
        let slot = match item {
            "BEP01" => &mut self.legal_load_configuration,
            "BEP02" => &mut self.legal_load_rating_factor,
            "BEP03" => &mut self.posting_type,
            "BEP04" => &mut self.posting_value,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn key_parts(&self) -> Vec<String> {
        vec![key_part(self.legal_load_configuration.as_ref())]
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

/// A change in load posting status, keyed by the date it took effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Load Posting Status
    #[serde(rename = "BPS01", skip_serializing_if = "Option::is_none")]
    pub load_posting_status: Option<String>,
    /// Posting Status Change Date
    #[serde(rename = "BPS02", skip_serializing_if = "Option::is_none")]
    pub status_change_date: Option<String>,
}

const POSTING_STATUS_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("BPS01", "Load Posting Status", 1),
    FieldSpec::date("BPS02", "Posting Status Change Date"),
];

impl Entity for PostingStatus {
    const KIND: EntityKind = EntityKind::PostingStatus;

    fn schema() -> &'static [FieldSpec] {
        POSTING_STATUS_FIELDS
    }

    fn field(&self, item: &str) -> Option<&str> {
        match item {
            "BPS01" => self.load_posting_status.as_deref(),
            "BPS02" => self.status_change_date.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, item: &str, value: Option<String>) -> bool {
        let slot = match item {
            "BPS01" => &mut self.load_posting_status,
            "BPS02" => &mut self.status_change_date,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn key_parts(&self) -> Vec<String> {
        vec![key_part(self.status_change_date.as_ref())]
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

