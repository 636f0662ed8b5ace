//! Span and substructure configuration sets.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, RecordStatus};
use crate::schema::{Entity, FieldSpec, key_part};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpanSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Span Configuration Designation
    #[serde(rename = "BSP01", skip_serializing_if = "Option::is_none")]
    pub configuration_designation: Option<String>,
    /// Number of Spans
    #[serde(rename = "BSP02", skip_serializing_if = "Option::is_none")]
    pub number_of_spans: Option<String>,
    /// Number of Beam Lines
    #[serde(rename = "BSP03", skip_serializing_if = "Option::is_none")]
    pub number_of_beam_lines: Option<String>,
    /// Span Material
    #[serde(rename = "BSP04", skip_serializing_if = "Option::is_none")]
    pub span_material: Option<String>,
    /// Span Continuity
    #[serde(rename = "BSP05", skip_serializing_if = "Option::is_none")]
    pub span_continuity: Option<String>,
    /// Span Type
    #[serde(rename = "BSP06", skip_serializing_if = "Option::is_none")]
    pub span_type: Option<String>,
    /// Span Protective System
    #[serde(rename = "BSP07", skip_serializing_if = "Option::is_none")]
    pub span_protective_system: Option<String>,
    /// Deck Interaction
    #[serde(rename = "BSP08", skip_serializing_if = "Option::is_none")]
    pub deck_interaction: Option<String>,
    /// Deck Material and Type
    #[serde(rename = "BSP09", skip_serializing_if = "Option::is_none")]
    pub deck_material: Option<String>,
    /// Wearing Surface
    #[serde(rename = "BSP10", skip_serializing_if = "Option::is_none")]
    pub wearing_surface: Option<String>,
    /// Deck Protective System
    #[serde(rename = "BSP11", skip_serializing_if = "Option::is_none")]
    pub deck_protective_system: Option<String>,
    /// Deck Reinforcing Protective System
    #[serde(rename = "BSP12", skip_serializing_if = "Option::is_none")]
    pub deck_reinforcing_protective_system: Option<String>,
    /// Deck Stay-In-Place Forms
    #[serde(rename = "BSP13", skip_serializing_if = "Option::is_none")]
    pub deck_stay_in_place_forms: Option<String>,
}

const SPAN_SET_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("BSP01", "Span Configuration Designation", 3),
    FieldSpec::numeric("BSP02", "Number of Spans", 4, 0),
    FieldSpec::numeric("BSP03", "Number of Beam Lines", 3, 0),
    FieldSpec::text("BSP04", "Span Material", 3),
    FieldSpec::text("BSP05", "Span Continuity", 1),
    FieldSpec::text("BSP06", "Span Type", 3),
    FieldSpec::text("BSP07", "Span Protective System", 20),
    FieldSpec::text("BSP08", "Deck Interaction", 1),
    FieldSpec::text("BSP09", "Deck Material and Type", 3),
    FieldSpec::text("BSP10", "Wearing Surface", 3),
    FieldSpec::text("BSP11", "Deck Protective System", 20),
    FieldSpec::text("BSP12", "Deck Reinforcing Protective System", 20),
    FieldSpec::text("BSP13", "Deck Stay-In-Place Forms", 1),
];

impl Entity for SpanSet {
    const KIND: EntityKind = EntityKind::SpanSet;

    fn schema() -> &'static [FieldSpec] {
        SPAN_SET_FIELDS
    }

    fn field(&self, item: &str) -> Option<&str> {
        match item {
            "BSP01" => self.configuration_designation.as_deref(),
            "BSP02" => self.number_of_spans.as_deref(),
            "BSP03" => self.number_of_beam_lines.as_deref(),
            "BSP04" => self.span_material.as_deref(),
            "BSP05" => self.span_continuity.as_deref(),
            "BSP06" => self.span_type.as_deref(),
            "BSP07" => self.span_protective_system.as_deref(),
            "BSP08" => self.deck_interaction.as_deref(),
            "BSP09" => self.deck_material.as_deref(),
            "BSP10" => self.wearing_surface.as_deref(),
            "BSP11" => self.deck_protective_system.as_deref(),
            "BSP12" => self.deck_reinforcing_protective_system.as_deref(),
            "BSP13" => self.deck_stay_in_place_forms.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, item: &str, value: Option<String>) -> bool {
        let slot = match item {
            "BSP01" => &mut self.configuration_designation,
            "BSP02" => &mut self.number_of_spans,
            "BSP03" => &mut self.number_of_beam_lines,
            "BSP04" => &mut self.span_material,
            "BSP05" => &mut self.span_continuity,
            "BSP06" => &mut self.span_type,
            "BSP07" => &mut self.span_protective_system,
            "BSP08" => &mut self.deck_interaction,
            "BSP09" => &mut self.deck_material,
            "BSP10" => &mut self.wearing_surface,
            "BSP11" => &mut self.deck_protective_system,
            "BSP12" => &mut self.deck_reinforcing_protective_system,
            "BSP13" => &mut self.deck_stay_in_place_forms,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn key_parts(&self) -> Vec<String> {
        vec![key_part(self.configuration_designation.as_ref())]
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubstructureSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Substructure Configuration Designation
    #[serde(rename = "BSB01", skip_serializing_if = "Option::is_none")]
    pub configuration_designation: Option<String>,
    /// Number of Substructure Units
    #[serde(rename = "BSB02", skip_serializing_if = "Option::is_none")]
    pub number_of_units: Option<String>,
    /// Substructure Material
    #[serde(rename = "BSB03", skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Substructure Type
    #[serde(rename = "BSB04", skip_serializing_if = "Option::is_none")]
    pub substructure_type: Option<String>,
    /// Substructure Protective System
    #[serde(rename = "BSB05", skip_serializing_if = "Option::is_none")]
    pub protective_system: Option<String>,
    /// Foundation Type
    #[serde(rename = "BSB06", skip_serializing_if = "Option::is_none")]
    pub foundation_type: Option<String>,
    /// Foundation Protective System
    #[serde(rename = "BSB07", skip_serializing_if = "Option::is_none")]
    pub foundation_protective_system: Option<String>,
}

const SUBSTRUCTURE_SET_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("BSB01", "Substructure Configuration Designation", 3),
    FieldSpec::numeric("BSB02", "Number of Substructure Units", 3, 0),
    FieldSpec::text("BSB03", "Substructure Material", 3),
    FieldSpec::text("BSB04", "Substructure Type", 3),
    FieldSpec::text("BSB05", "Substructure Protective System", 20),
    FieldSpec::text("BSB06", "Foundation Type", 3),
    FieldSpec::text("BSB07", "Foundation Protective System", 20),
];

impl Entity for SubstructureSet {
    const KIND: EntityKind = EntityKind::SubstructureSet;

    fn schema() -> &'static [FieldSpec] {
        SUBSTRUCTURE_SET_FIELDS
    }

    fn field(&self, item: &str) -> Option<&str> {
        match item {
            "BSB01" => self.configuration_designation.as_deref(),
            "BSB02" => self.number_of_units.as_deref(),
            "BSB03" => self.material.as_deref(),
            "BSB04" => self.substructure_type.as_deref(),
            "BSB05" => self.protective_system.as_deref(),
            "BSB06" => self.foundation_type.as_deref(),
            "BSB07" => self.foundation_protective_system.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, item: &str, value: Option<String>) -> bool {
        let slot = match item {
            "BSB01" => &mut self.configuration_designation,
            "BSB02" => &mut self.number_of_units,
            "BSB03" => &mut self.material,
            "BSB04" => &mut self.substructure_type,
            "BSB05" => &mut self.protective_system,
            "BSB06" => &mut self.foundation_type,
            "BSB07" => &mut self.foundation_protective_system,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn key_parts(&self) -> Vec<String> {
        vec![key_part(self.configuration_designation.as_ref())]
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

