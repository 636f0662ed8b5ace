//! Inspection events.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, RecordStatus};
use crate::schema::{Entity, FieldSpec, key_part};

/// One inspection event. Dates use `YYYYMMDD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inspection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Inspection Type
    #[serde(rename = "BIE01", skip_serializing_if = "Option::is_none")]
    pub inspection_type: Option<String>,
    /// Inspection Begin Date
    #[serde(rename = "BIE02", skip_serializing_if = "Option::is_none")]
    pub begin_date: Option<String>,
    /// Inspection Completion Date
    #[serde(rename = "BIE03", skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
    /// Nationally Certified Bridge Inspector
    #[serde(rename = "BIE04", skip_serializing_if = "Option::is_none")]
    pub inspector: Option<String>,
    /// Inspection Interval
    #[serde(rename = "BIE05", skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    /// Inspection Due Date
    #[serde(rename = "BIE06", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    /// Risk-Based Inspection Interval Method
    #[serde(rename = "BIE07", skip_serializing_if = "Option::is_none")]
    pub risk_based_method: Option<String>,
    /// Inspection Quality Control Date
    #[serde(rename = "BIE08", skip_serializing_if = "Option::is_none")]
    pub quality_control_date: Option<String>,
    /// Inspection Quality Assurance Date
    #[serde(rename = "BIE09", skip_serializing_if = "Option::is_none")]
    pub quality_assurance_date: Option<String>,
    /// Inspection Data Update Date
    #[serde(rename = "BIE10", skip_serializing_if = "Option::is_none")]
    pub data_update_date: Option<String>,
    /// Inspection Note
    #[serde(rename = "BIE11", skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Inspection Equipment
    #[serde(rename = "BIE12", skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
}

const INSPECTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("BIE01", "Inspection Type", 1),
    FieldSpec::date("BIE02", "Inspection Begin Date"),
    FieldSpec::date("BIE03", "Inspection Completion Date"),
    FieldSpec::text("BIE04", "Nationally Certified Bridge Inspector", 15),
    FieldSpec::numeric("BIE05", "Inspection Interval", 2, 0),
    FieldSpec::date("BIE06", "Inspection Due Date"),
    FieldSpec::text("BIE07", "Risk-Based Inspection Interval Method", 1),
    FieldSpec::date("BIE08", "Inspection Quality Control Date"),
    FieldSpec::date("BIE09", "Inspection Quality Assurance Date"),
    FieldSpec::date("BIE10", "Inspection Data Update Date"),
    FieldSpec::truncate("BIE11", "Inspection Note", 300),
    FieldSpec::text("BIE12", "Inspection Equipment", 120),
];

impl Entity for Inspection {
    const KIND: EntityKind = EntityKind::Inspection;

    fn schema() -> &'static [FieldSpec] {
        INSPECTION_FIELDS
    }

    fn field(&self, item: &str) -> Option<&str> {
        match item {
            "BIE01" => self.inspection_type.as_deref(),
            "BIE02" => self.begin_date.as_deref(),
            "BIE03" => self.completion_date.as_deref(),
            "BIE04" => self.inspector.as_deref(),
            "BIE05" => self.interval.as_deref(),
            "BIE06" => self.due_date.as_deref(),
            "BIE07" => self.risk_based_method.as_deref(),
            "BIE08" => self.quality_control_date.as_deref(),
            "BIE09" => self.quality_assurance_date.as_deref(),
            "BIE10" => self.data_update_date.as_deref(),
            "BIE11" => self.note.as_deref(),
            "BIE12" => self.equipment.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, item: &str, value: Option<String>) -> bool {
        let slot = match item {
            "BIE01" => &mut self.inspection_type,
            "BIE02" => &mut self.begin_date,
            "BIE03" => &mut self.completion_date,
            "BIE04" => &mut self.inspector,
            "BIE05" => &mut self.interval,
            "BIE06" => &mut self.due_date,
            "BIE07" => &mut self.risk_based_method,
            "BIE08" => &mut self.quality_control_date,
            "BIE09" => &mut self.quality_assurance_date,
            "BIE10" => &mut self.data_update_date,
            "BIE11" => &mut self.note,
            "BIE12" => &mut self.equipment,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn key_parts(&self) -> Vec<String> {
        vec![key_part(self.inspection_type.as_ref()), key_part(self.begin_date.as_ref())]
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

