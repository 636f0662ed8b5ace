//! Element condition records.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, RecordStatus};
use crate::schema::{Entity, FieldSpec, key_part};

/// A bridge element, or a defect/protective system under a parent element
/// when `BE02` is populated, with its quantity in each condition state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Element {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Element Number
    #[serde(rename = "BE01", skip_serializing_if = "Option::is_none")]
    pub element_number: Option<String>,
    /// Element Parent Number
    #[serde(rename = "BE02", skip_serializing_if = "Option::is_none")]
    pub parent_number: Option<String>,
    /// Element Total Quantity
    #[serde(rename = "BE03", skip_serializing_if = "Option::is_none")]
    pub total_quantity: Option<String>,
    /// Element Quantity Condition State One
    #[serde(rename = "BE04", skip_serializing_if = "Option::is_none")]
    pub cs1_quantity: Option<String>,
    /// Element Quantity Condition State Two
    #[serde(rename = "BE05", skip_serializing_if = "Option::is_none")]
    pub cs2_quantity: Option<String>,
    /// Element Quantity Condition State Three
    #[serde(rename = "BE06", skip_serializing_if = "Option::is_none")]
    pub cs3_quantity: Option<String>,
    /// Element Quantity Condition State Four
    #[serde(rename = "BE07", skip_serializing_if = "Option::is_none")]
    pub cs4_quantity: Option<String>,
}

const ELEMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("BE01", "Element Number", 4),
    FieldSpec::text("BE02", "Element Parent Number", 4),
    FieldSpec::quantity("BE03", "Element Total Quantity", 8),
    FieldSpec::quantity("BE04", "Element Quantity Condition State One", 8),
    FieldSpec::quantity("BE05", "Element Quantity Condition State Two", 8),
    FieldSpec::quantity("BE06", "Element Quantity Condition State Three", 8),
    FieldSpec::quantity("BE07", "Element Quantity Condition State Four", 8),
];

impl Entity for Element {
    const KIND: EntityKind = EntityKind::Element;

    fn schema() -> &'static [FieldSpec] {
        ELEMENT_FIELDS
    }

    fn field(&self, item: &str) -> Option<&str> {
        match item {
            "BE01" => self.element_number.as_deref(),
            "BE02" => self.parent_number.as_deref(),
            "BE03" => self.total_quantity.as_deref(),
            "BE04" => self.cs1_quantity.as_deref(),
            "BE05" => self.cs2_quantity.as_deref(),
            "BE06" => self.cs3_quantity.as_deref(),
            "BE07" => self.cs4_quantity.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, item: &str, value: Option<String>) -> bool {
        let slot = match item {
            "BE01" => &mut self.element_number,
            "BE02" => &mut self.parent_number,
            "BE03" => &mut self.total_quantity,
            "BE04" => &mut self.cs1_quantity,
            "BE05" => &mut self.cs2_quantity,
            "BE06" => &mut self.cs3_quantity,
            "BE07" => &mut self.cs4_quantity,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn key_parts(&self) -> Vec<String> {
        vec![key_part(self.element_number.as_ref()), key_part(self.parent_number.as_ref())]
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

