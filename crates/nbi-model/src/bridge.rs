//! Primary bridge record.

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::enums::{EntityKind, RecordStatus};
use crate::feature::Feature;
use crate::inspection::Inspection;
use crate::keys::{BridgeKey, EntityKey, RecordId};
use crate::posting::{PostingEvaluation, PostingStatus};
use crate::schema::{Entity, FieldSpec, key_part, null_as_empty, trimmed};
use crate::structure::{SpanSet, SubstructureSet};
use crate::work::Work;

/// One bridge as submitted: identification, location, geometry, load
/// rating, condition and border-bridge items plus its child collections.
///
/// Child collections may be absent or `null` in the submission; both
/// deserialize to an empty collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeRecord {
    /// Position in the ingested batch.
    #[serde(skip)]
    pub id: RecordId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Bridge Number
    #[serde(rename = "BID01", skip_serializing_if = "Option::is_none")]
    pub bridge_number: Option<String>,
    /// Bridge Name
    #[serde(rename = "BID02", skip_serializing_if = "Option::is_none")]
    pub bridge_name: Option<String>,
    /// Previous Bridge Number
    #[serde(rename = "BID03", skip_serializing_if = "Option::is_none")]
    pub previous_bridge_number: Option<String>,
    /// State Code
    #[serde(rename = "BL01", skip_serializing_if = "Option::is_none")]
    pub state_code: Option<String>,
    /// County Code
    #[serde(rename = "BL02", skip_serializing_if = "Option::is_none")]
    pub county_code: Option<String>,
    /// Place Code
    #[serde(rename = "BL03", skip_serializing_if = "Option::is_none")]
    pub place_code: Option<String>,
    /// Highway Agency District
    #[serde(rename = "BL04", skip_serializing_if = "Option::is_none")]
    pub highway_agency_district: Option<String>,
    /// Latitude
    #[serde(rename = "BL05", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    /// Longitude
    #[serde(rename = "BL06", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    /// Border Bridge Number
    #[serde(rename = "BL07", skip_serializing_if = "Option::is_none")]
    pub border_bridge_number: Option<String>,
    /// Border Bridge State or Country Code
    #[serde(rename = "BL08", skip_serializing_if = "Option::is_none")]
    pub border_state_or_country: Option<String>,
    /// Border Bridge Inspection Responsibility
    #[serde(rename = "BL09", skip_serializing_if = "Option::is_none")]
    pub border_inspection_responsibility: Option<String>,
    /// Border Bridge Designated Lead State
    #[serde(rename = "BL10", skip_serializing_if = "Option::is_none")]
    pub border_lead_state: Option<String>,
    /// Bridge Location
    #[serde(rename = "BL11", skip_serializing_if = "Option::is_none")]
    pub bridge_location: Option<String>,
    /// Metropolitan Planning Organization
    #[serde(rename = "BL12", skip_serializing_if = "Option::is_none")]
    pub mpo_name: Option<String>,
    /// Owner
    #[serde(rename = "BCL01", skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Maintenance Responsibility
    #[serde(rename = "BCL02", skip_serializing_if = "Option::is_none")]
    pub maintenance_responsibility: Option<String>,
    /// Federal or Tribal Land Access
    #[serde(rename = "BCL03", skip_serializing_if = "Option::is_none")]
    pub federal_tribal_land_access: Option<String>,
    /// Historic Significance
    #[serde(rename = "BCL04", skip_serializing_if = "Option::is_none")]
    pub historic_significance: Option<String>,
    /// Toll
    #[serde(rename = "BCL05", skip_serializing_if = "Option::is_none")]
    pub toll: Option<String>,
    /// Emergency Evacuation Designation
    #[serde(rename = "BCL06", skip_serializing_if = "Option::is_none")]
    pub emergency_evacuation: Option<String>,
    /// Bridge Railings
    #[serde(rename = "BRH01", skip_serializing_if = "Option::is_none")]
    pub bridge_railings: Option<String>,
    /// Transitions
    #[serde(rename = "BRH02", skip_serializing_if = "Option::is_none")]
    pub railing_transitions: Option<String>,
    /// NBIS Bridge Length
    #[serde(rename = "BG01", skip_serializing_if = "Option::is_none")]
    pub nbis_bridge_length: Option<String>,
    /// Total Bridge Length
    #[serde(rename = "BG02", skip_serializing_if = "Option::is_none")]
    pub total_bridge_length: Option<String>,
    /// Maximum Span Length
    #[serde(rename = "BG03", skip_serializing_if = "Option::is_none")]
    pub max_span_length: Option<String>,
    /// Minimum Span Length
    #[serde(rename = "BG04", skip_serializing_if = "Option::is_none")]
    pub min_span_length: Option<String>,
    /// Bridge Width Out-to-Out
    #[serde(rename = "BG05", skip_serializing_if = "Option::is_none")]
    pub width_out_to_out: Option<String>,
    /// Bridge Width Curb-to-Curb
    #[serde(rename = "BG06", skip_serializing_if = "Option::is_none")]
    pub width_curb_to_curb: Option<String>,
    /// Left Curb or Sidewalk Width
    #[serde(rename = "BG07", skip_serializing_if = "Option::is_none")]
    pub left_curb_width: Option<String>,
    /// Right Curb or Sidewalk Width
    #[serde(rename = "BG08", skip_serializing_if = "Option::is_none")]
    pub right_curb_width: Option<String>,
    /// Approach Roadway Width
    #[serde(rename = "BG09", skip_serializing_if = "Option::is_none")]
    pub approach_roadway_width: Option<String>,
    /// Bridge Median
    #[serde(rename = "BG10", skip_serializing_if = "Option::is_none")]
    pub bridge_median: Option<String>,
    /// Skew
    #[serde(rename = "BG11", skip_serializing_if = "Option::is_none")]
    pub skew: Option<String>,
    /// Curved Bridge
    #[serde(rename = "BG12", skip_serializing_if = "Option::is_none")]
    pub curved_bridge: Option<String>,
    /// Maximum Bridge Height
    #[serde(rename = "BG13", skip_serializing_if = "Option::is_none")]
    pub max_bridge_height: Option<String>,
    /// Sidehill Bridge
    #[serde(rename = "BG14", skip_serializing_if = "Option::is_none")]
    pub sidehill_bridge: Option<String>,
    /// Irregular Deck Area
    #[serde(rename = "BG15", skip_serializing_if = "Option::is_none")]
    pub irregular_deck_area: Option<String>,
    /// Calculated Deck Area
    #[serde(rename = "BG16", skip_serializing_if = "Option::is_none")]
    pub calculated_deck_area: Option<String>,
    /// Design Load
    #[serde(rename = "BLR01", skip_serializing_if = "Option::is_none")]
    pub design_load: Option<String>,
    /// Design Method
    #[serde(rename = "BLR02", skip_serializing_if = "Option::is_none")]
    pub design_method: Option<String>,
    /// Load Rating Date
    #[serde(rename = "BLR03", skip_serializing_if = "Option::is_none")]
    pub load_rating_date: Option<String>,
    /// Load Rating Method
    #[serde(rename = "BLR04", skip_serializing_if = "Option::is_none")]
    pub load_rating_method: Option<String>,
    /// Inventory Load Rating Factor
    #[serde(rename = "BLR05", skip_serializing_if = "Option::is_none")]
    pub inventory_load_rating_factor: Option<String>,
    /// Operating Load Rating Factor
    #[serde(rename = "BLR06", skip_serializing_if = "Option::is_none")]
    pub operating_load_rating_factor: Option<String>,
    /// Controlling Legal Load Rating Factor
    #[serde(rename = "BLR07", skip_serializing_if = "Option::is_none")]
    pub controlling_legal_load_rating_factor: Option<String>,
    /// Routine Permit Loads
    #[serde(rename = "BLR08", skip_serializing_if = "Option::is_none")]
    pub routine_permit_loads: Option<String>,
    /// NSTM Inspection Required
    #[serde(rename = "BIR01", skip_serializing_if = "Option::is_none")]
    pub nstm_inspection_required: Option<String>,
    /// Fatigue Details
    #[serde(rename = "BIR02", skip_serializing_if = "Option::is_none")]
    pub fatigue_details: Option<String>,
    /// Underwater Inspection Required
    #[serde(rename = "BIR03", skip_serializing_if = "Option::is_none")]
    pub underwater_inspection_required: Option<String>,
    /// Complex Feature
    #[serde(rename = "BIR04", skip_serializing_if = "Option::is_none")]
    pub complex_feature: Option<String>,
    /// Deck Condition Rating
    #[serde(rename = "BC01", skip_serializing_if = "Option::is_none")]
    pub deck_condition: Option<String>,
    /// Superstructure Condition Rating
    #[serde(rename = "BC02", skip_serializing_if = "Option::is_none")]
    pub superstructure_condition: Option<String>,
    /// Substructure Condition Rating
    #[serde(rename = "BC03", skip_serializing_if = "Option::is_none")]
    pub substructure_condition: Option<String>,
    /// Culvert Condition Rating
    #[serde(rename = "BC04", skip_serializing_if = "Option::is_none")]
    pub culvert_condition: Option<String>,
    /// Bridge Railings Condition Rating
    #[serde(rename = "BC05", skip_serializing_if = "Option::is_none")]
    pub railings_condition: Option<String>,
    /// Bridge Railing Transitions Condition Rating
    #[serde(rename = "BC06", skip_serializing_if = "Option::is_none")]
    pub railing_transitions_condition: Option<String>,
    /// Bridge Bearings Condition Rating
    #[serde(rename = "BC07", skip_serializing_if = "Option::is_none")]
    pub bearings_condition: Option<String>,
    /// Bridge Joints Condition Rating
    #[serde(rename = "BC08", skip_serializing_if = "Option::is_none")]
    pub joints_condition: Option<String>,
    /// Channel Condition Rating
    #[serde(rename = "BC09", skip_serializing_if = "Option::is_none")]
    pub channel_condition: Option<String>,
    /// Channel Protection Condition Rating
    #[serde(rename = "BC10", skip_serializing_if = "Option::is_none")]
    pub channel_protection_condition: Option<String>,
    /// Scour Condition Rating
    #[serde(rename = "BC11", skip_serializing_if = "Option::is_none")]
    pub scour_condition: Option<String>,
    /// Bridge Condition Classification
    #[serde(rename = "BC12", skip_serializing_if = "Option::is_none")]
    pub condition_classification: Option<String>,
    /// Lowest Condition Rating Code
    #[serde(rename = "BC13", skip_serializing_if = "Option::is_none")]
    pub lowest_condition_rating: Option<String>,
    /// NSTM Inspection Condition
    #[serde(rename = "BC14", skip_serializing_if = "Option::is_none")]
    pub nstm_inspection_condition: Option<String>,
    /// Underwater Inspection Condition
    #[serde(rename = "BC15", skip_serializing_if = "Option::is_none")]
    pub underwater_inspection_condition: Option<String>,
    /// Approach Roadway Alignment
    #[serde(rename = "BAP01", skip_serializing_if = "Option::is_none")]
    pub approach_alignment: Option<String>,
    /// Overtopping Likelihood
    #[serde(rename = "BAP02", skip_serializing_if = "Option::is_none")]
    pub overtopping_likelihood: Option<String>,
    /// Scour Vulnerability
    #[serde(rename = "BAP03", skip_serializing_if = "Option::is_none")]
    pub scour_vulnerability: Option<String>,
    /// Scour Plan of Action
    #[serde(rename = "BAP04", skip_serializing_if = "Option::is_none")]
    pub scour_plan_of_action: Option<String>,
    /// Seismic Vulnerability
    #[serde(rename = "BAP05", skip_serializing_if = "Option::is_none")]
    pub seismic_vulnerability: Option<String>,
    /// Year Built
    #[serde(rename = "BW01", skip_serializing_if = "Option::is_none")]
    pub year_built: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub features: Vec<Feature>,
    #[serde(deserialize_with = "null_as_empty")]
    pub elements: Vec<Element>,
    #[serde(deserialize_with = "null_as_empty")]
    pub inspections: Vec<Inspection>,
    #[serde(deserialize_with = "null_as_empty")]
    pub posting_evaluations: Vec<PostingEvaluation>,
    #[serde(deserialize_with = "null_as_empty")]
    pub posting_statuses: Vec<PostingStatus>,
    #[serde(deserialize_with = "null_as_empty")]
    pub span_sets: Vec<SpanSet>,
    #[serde(deserialize_with = "null_as_empty")]
    pub substructure_sets: Vec<SubstructureSet>,
    #[serde(deserialize_with = "null_as_empty")]
    pub work: Vec<Work>,
}

const BRIDGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("BID01", "Bridge Number", 15),
    FieldSpec::truncate("BID02", "Bridge Name", 300),
    FieldSpec::text("BID03", "Previous Bridge Number", 15),
    FieldSpec::text("BL01", "State Code", 2),
    FieldSpec::text("BL02", "County Code", 3),
    FieldSpec::text("BL03", "Place Code", 5),
    FieldSpec::text("BL04", "Highway Agency District", 2),
    FieldSpec::numeric("BL05", "Latitude", 8, 6),
    FieldSpec::numeric("BL06", "Longitude", 9, 6),
    FieldSpec::text("BL07", "Border Bridge Number", 15),
    FieldSpec::text("BL08", "Border Bridge State or Country Code", 2),
    FieldSpec::text("BL09", "Border Bridge Inspection Responsibility", 2),
    FieldSpec::text("BL10", "Border Bridge Designated Lead State", 2),
    FieldSpec::truncate("BL11", "Bridge Location", 300),
    FieldSpec::truncate("BL12", "Metropolitan Planning Organization", 300),
    FieldSpec::text("BCL01", "Owner", 4),
    FieldSpec::text("BCL02", "Maintenance Responsibility", 4),
    FieldSpec::text("BCL03", "Federal or Tribal Land Access", 1),
    FieldSpec::text("BCL04", "Historic Significance", 1),
    FieldSpec::text("BCL05", "Toll", 1),
    FieldSpec::text("BCL06", "Emergency Evacuation Designation", 1),
    FieldSpec::text("BRH01", "Bridge Railings", 1),
    FieldSpec::text("BRH02", "Transitions", 1),
    FieldSpec::numeric("BG01", "NBIS Bridge Length", 6, 1),
    FieldSpec::numeric("BG02", "Total Bridge Length", 6, 1),
    FieldSpec::numeric("BG03", "Maximum Span Length", 5, 1),
    FieldSpec::numeric("BG04", "Minimum Span Length", 5, 1),
    FieldSpec::numeric("BG05", "Bridge Width Out-to-Out", 5, 1),
    FieldSpec::numeric("BG06", "Bridge Width Curb-to-Curb", 5, 1),
    FieldSpec::numeric("BG07", "Left Curb or Sidewalk Width", 4, 1),
    FieldSpec::numeric("BG08", "Right Curb or Sidewalk Width", 4, 1),
    FieldSpec::numeric("BG09", "Approach Roadway Width", 5, 1),
    FieldSpec::text("BG10", "Bridge Median", 1),
    FieldSpec::numeric("BG11", "Skew", 2, 0),
    FieldSpec::text("BG12", "Curved Bridge", 1),
    FieldSpec::numeric("BG13", "Maximum Bridge Height", 4, 0),
    FieldSpec::text("BG14", "Sidehill Bridge", 1),
    FieldSpec::numeric("BG15", "Irregular Deck Area", 8, 1),
    FieldSpec::numeric("BG16", "Calculated Deck Area", 8, 1),
    FieldSpec::text("BLR01", "Design Load", 1),
    FieldSpec::text("BLR02", "Design Method", 1),
    FieldSpec::date("BLR03", "Load Rating Date"),
    FieldSpec::text("BLR04", "Load Rating Method", 1),
    FieldSpec::numeric("BLR05", "Inventory Load Rating Factor", 4, 2),
    FieldSpec::numeric("BLR06", "Operating Load Rating Factor", 4, 2),
    FieldSpec::numeric("BLR07", "Controlling Legal Load Rating Factor", 4, 2),
    FieldSpec::text("BLR08", "Routine Permit Loads", 1),
    FieldSpec::text("BIR01", "NSTM Inspection Required", 1),
    FieldSpec::text("BIR02", "Fatigue Details", 1),
    FieldSpec::text("BIR03", "Underwater Inspection Required", 1),
    FieldSpec::text("BIR04", "Complex Feature", 1),
    FieldSpec::text("BC01", "Deck Condition Rating", 1),
    FieldSpec::text("BC02", "Superstructure Condition Rating", 1),
    FieldSpec::text("BC03", "Substructure Condition Rating", 1),
    FieldSpec::text("BC04", "Culvert Condition Rating", 1),
    FieldSpec::text("BC05", "Bridge Railings Condition Rating", 1),
    FieldSpec::text("BC06", "Bridge Railing Transitions Condition Rating", 1),
    FieldSpec::text("BC07", "Bridge Bearings Condition Rating", 1),
    FieldSpec::text("BC08", "Bridge Joints Condition Rating", 1),
    FieldSpec::text("BC09", "Channel Condition Rating", 1),
    FieldSpec::text("BC10", "Channel Protection Condition Rating", 1),
    FieldSpec::text("BC11", "Scour Condition Rating", 1),
    FieldSpec::text("BC12", "Bridge Condition Classification", 1),
    FieldSpec::text("BC13", "Lowest Condition Rating Code", 1),
    FieldSpec::text("BC14", "NSTM Inspection Condition", 1),
    FieldSpec::text("BC15", "Underwater Inspection Condition", 1),
    FieldSpec::text("BAP01", "Approach Roadway Alignment", 1),
    FieldSpec::text("BAP02", "Overtopping Likelihood", 1),
    FieldSpec::text("BAP03", "Scour Vulnerability", 1),
    FieldSpec::text("BAP04", "Scour Plan of Action", 1),
    FieldSpec::text("BAP05", "Seismic Vulnerability", 1),
    FieldSpec::numeric("BW01", "Year Built", 4, 0),
];

impl Entity for BridgeRecord {
    const KIND: EntityKind = EntityKind::Bridge;

    fn schema() -> &'static [FieldSpec] {
        BRIDGE_FIELDS
    }

    fn field(&self, item: &str) -> Option<&str> {
        match item {
            "BID01" => self.bridge_number.as_deref(),
            "BID02" => self.bridge_name.as_deref(),
            "BID03" => self.previous_bridge_number.as_deref(),
            "BL01" => self.state_code.as_deref(),
            "BL02" => self.county_code.as_deref(),
            "BL03" => self.place_code.as_deref(),
            "BL04" => self.highway_agency_district.as_deref(),
            "BL05" => self.latitude.as_deref(),
            "BL06" => self.longitude.as_deref(),
            "BL07" => self.border_bridge_number.as_deref(),
            "BL08" => self.border_state_or_country.as_deref(),
            "BL09" => self.border_inspection_responsibility.as_deref(),
            "BL10" => self.border_lead_state.as_deref(),
            "BL11" => self.bridge_location.as_deref(),
            "BL12" => self.mpo_name.as_deref(),
            "BCL01" => self.owner.as_deref(),
            "BCL02" => self.maintenance_responsibility.as_deref(),
            "BCL03" => self.federal_tribal_land_access.as_deref(),
            "BCL04" => self.historic_significance.as_deref(),
            "BCL05" => self.toll.as_deref(),
            "BCL06" => self.emergency_evacuation.as_deref(),
            "BRH01" => self.bridge_railings.as_deref(),
            "BRH02" => self.railing_transitions.as_deref(),
            "BG01" => self.nbis_bridge_length.as_deref(),
            "BG02" => self.total_bridge_length.as_deref(),
            "BG03" => self.max_span_length.as_deref(),
            "BG04" => self.min_span_length.as_deref(),
            "BG05" => self.width_out_to_out.as_deref(),
            "BG06" => self.width_curb_to_curb.as_deref(),
            "BG07" => self.left_curb_width.as_deref(),
            "BG08" => self.right_curb_width.as_deref(),
            "BG09" => self.approach_roadway_width.as_deref(),
            "BG10" => self.bridge_median.as_deref(),
            "BG11" => self.skew.as_deref(),
            "BG12" => self.curved_bridge.as_deref(),
            "BG13" => self.max_bridge_height.as_deref(),
            "BG14" => self.sidehill_bridge.as_deref(),
            "BG15" => self.irregular_deck_area.as_deref(),
            "BG16" => self.calculated_deck_area.as_deref(),
            "BLR01" => self.design_load.as_deref(),
            "BLR02" => self.design_method.as_deref(),
            "BLR03" => self.load_rating_date.as_deref(),
            "BLR04" => self.load_rating_method.as_deref(),
            "BLR05" => self.inventory_load_rating_factor.as_deref(),
            "BLR06" => self.operating_load_rating_factor.as_deref(),
            "BLR07" => self.controlling_legal_load_rating_factor.as_deref(),
            "BLR08" => self.routine_permit_loads.as_deref(),
            "BIR01" => self.nstm_inspection_required.as_deref(),
            "BIR02" => self.fatigue_details.as_deref(),
            "BIR03" => self.underwater_inspection_required.as_deref(),
            "BIR04" => self.complex_feature.as_deref(),
            "BC01" => self.deck_condition.as_deref(),
            "BC02" => self.superstructure_condition.as_deref(),
            "BC03" => self.substructure_condition.as_deref(),
            "BC04" => self.culvert_condition.as_deref(),
            "BC05" => self.railings_condition.as_deref(),
            "BC06" => self.railing_transitions_condition.as_deref(),
            "BC07" => self.bearings_condition.as_deref(),
            "BC08" => self.joints_condition.as_deref(),
            "BC09" => self.channel_condition.as_deref(),
            "BC10" => self.channel_protection_condition.as_deref(),
            "BC11" => self.scour_condition.as_deref(),
            "BC12" => self.condition_classification.as_deref(),
            "BC13" => self.lowest_condition_rating.as_deref(),
            "BC14" => self.nstm_inspection_condition.as_deref(),
            "BC15" => self.underwater_inspection_condition.as_deref(),
            "BAP01" => self.approach_alignment.as_deref(),
            "BAP02" => self.overtopping_likelihood.as_deref(),
            "BAP03" => self.scour_vulnerability.as_deref(),
            "BAP04" => self.scour_plan_of_action.as_deref(),
            "BAP05" => self.seismic_vulnerability.as_deref(),
            "BW01" => self.year_built.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, item: &str, value: Option<String>) -> bool {
        let slot = match item {
            "BID01" => &mut self.bridge_number,
            "BID02" => &mut self.bridge_name,
            "BID03" => &mut self.previous_bridge_number,
            "BL01" => &mut self.state_code,
            "BL02" => &mut self.county_code,
            "BL03" => &mut self.place_code,
            "BL04" => &mut self.highway_agency_district,
            "BL05" => &mut self.latitude,
            "BL06" => &mut self.longitude,
            "BL07" => &mut self.border_bridge_number,
            "BL08" => &mut self.border_state_or_country,
            "BL09" => &mut self.border_inspection_responsibility,
            "BL10" => &mut self.border_lead_state,
            "BL11" => &mut self.bridge_location,
            "BL12" => &mut self.mpo_name,
            "BCL01" => &mut self.owner,
            "BCL02" => &mut self.maintenance_responsibility,
            "BCL03" => &mut self.federal_tribal_land_access,
            "BCL04" => &mut self.historic_significance,
            "BCL05" => &mut self.toll,
            "BCL06" => &mut self.emergency_evacuation,
            "BRH01" => &mut self.bridge_railings,
            "BRH02" => &mut self.railing_transitions,
            "BG01" => &mut self.nbis_bridge_length,
            "BG02" => &mut self.total_bridge_length,
            "BG03" => &mut self.max_span_length,
            "BG04" => &mut self.min_span_length,
            "BG05" => &mut self.width_out_to_out,
            "BG06" => &mut self.width_curb_to_curb,
            "BG07" => &mut self.left_curb_width,
            "BG08" => &mut self.right_curb_width,
            "BG09" => &mut self.approach_roadway_width,
            "BG10" => &mut self.bridge_median,
            "BG11" => &mut self.skew,
            "BG12" => &mut self.curved_bridge,
            "BG13" => &mut self.max_bridge_height,
            "BG14" => &mut self.sidehill_bridge,
            "BG15" => &mut self.irregular_deck_area,
            "BG16" => &mut self.calculated_deck_area,
            "BLR01" => &mut self.design_load,
            "BLR02" => &mut self.design_method,
            "BLR03" => &mut self.load_rating_date,
            "BLR04" => &mut self.load_rating_method,
            "BLR05" => &mut self.inventory_load_rating_factor,
            "BLR06" => &mut self.operating_load_rating_factor,
            "BLR07" => &mut self.controlling_legal_load_rating_factor,
            "BLR08" => &mut self.routine_permit_loads,
            "BIR01" => &mut self.nstm_inspection_required,
            "BIR02" => &mut self.fatigue_details,
            "BIR03" => &mut self.underwater_inspection_required,
            "BIR04" => &mut self.complex_feature,
            "BC01" => &mut self.deck_condition,
            "BC02" => &mut self.superstructure_condition,
            "BC03" => &mut self.substructure_condition,
            "BC04" => &mut self.culvert_condition,
            "BC05" => &mut self.railings_condition,
            "BC06" => &mut self.railing_transitions_condition,
            "BC07" => &mut self.bearings_condition,
            "BC08" => &mut self.joints_condition,
            "BC09" => &mut self.channel_condition,
            "BC10" => &mut self.channel_protection_condition,
            "BC11" => &mut self.scour_condition,
            "BC12" => &mut self.condition_classification,
            "BC13" => &mut self.lowest_condition_rating,
            "BC14" => &mut self.nstm_inspection_condition,
            "BC15" => &mut self.underwater_inspection_condition,
            "BAP01" => &mut self.approach_alignment,
            "BAP02" => &mut self.overtopping_likelihood,
            "BAP03" => &mut self.scour_vulnerability,
            "BAP04" => &mut self.scour_plan_of_action,
            "BAP05" => &mut self.seismic_vulnerability,
            "BW01" => &mut self.year_built,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn key_parts(&self) -> Vec<String> {
        vec![key_part(self.state_code.as_ref()), key_part(self.bridge_number.as_ref())]
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

impl BridgeRecord {
    /// Primary key: (state code, bridge number).
    pub fn key(&self) -> BridgeKey {
        BridgeKey::new(self.state_code.as_deref(), self.bridge_number.as_deref())
    }

    pub fn county(&self) -> Option<&str> {
        trimmed(self.county_code.as_deref())
    }

    /// Number of child entities across all collections, routes included.
    pub fn child_count(&self) -> usize {
        self.features
            .iter()
            .map(|feature| 1 + feature.routes.len())
            .sum::<usize>()
            + self.elements.len()
            + self.inspections.len()
            + self.posting_evaluations.len()
            + self.posting_statuses.len()
            + self.span_sets.len()
            + self.substructure_sets.len()
            + self.work.len()
    }

    /// Natural keys of every child entity, routes included, in collection
    /// order.
    pub fn child_keys(&self) -> Vec<EntityKey> {
        fn keys_of<T: Entity>(children: &[T]) -> impl Iterator<Item = EntityKey> + '_ {
            children.iter().map(Entity::entity_key)
        }

        let mut keys = Vec::with_capacity(self.child_count());
        for feature in &self.features {
            keys.push(feature.entity_key());
            keys.extend(feature.routes.iter().map(|route| feature.route_key(route)));
        }
        keys.extend(keys_of(&self.elements));
        keys.extend(keys_of(&self.inspections));
        keys.extend(keys_of(&self.posting_evaluations));
        keys.extend(keys_of(&self.posting_statuses));
        keys.extend(keys_of(&self.span_sets));
        keys.extend(keys_of(&self.substructure_sets));
        keys.extend(keys_of(&self.work));
        keys
    }

    /// A copy with every scalar and child collection cleared, keeping only
    /// the batch identity. This is the sanitizer's target.
    pub fn empty_twin(&self) -> Self {
        Self {
            id: self.id,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_collections_deserialize_empty() {
        let record: BridgeRecord = serde_json::from_str(
            r#"{"BID01": "B-1", "BL01": "06", "features": null, "elements": [{"BE01": "12"}]}"#,
        )
        .expect("deserialize bridge");
        assert!(record.features.is_empty());
        assert!(record.work.is_empty());
        assert_eq!(record.elements.len(), 1);
        assert_eq!(record.key(), BridgeKey::new(Some("06"), Some("B-1")));
    }

    #[test]
    fn field_accessors_follow_schema() {
        let mut record = BridgeRecord::default();
        for spec in BridgeRecord::schema() {
            assert!(record.set_field(spec.item, Some(spec.item.to_string())));
            assert_eq!(record.field(spec.item), Some(spec.item));
        }
        assert!(!record.set_field("BX99", Some("1".into())));
        assert_eq!(record.populated_items().len(), BridgeRecord::schema().len());
    }
}
