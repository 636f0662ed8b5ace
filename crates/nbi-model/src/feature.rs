//! Features carried by or crossing the bridge, and the routes on them.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, RecordStatus};
use crate::keys::EntityKey;
use crate::schema::{Entity, FieldSpec, key_part, null_as_empty, trimmed};

/// A highway, railroad or waterway feature. Highway, railroad and
/// navigation items share one entity; which group applies follows the
/// feature-type prefix (`H`, `R`, `W`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Feature Type
    #[serde(rename = "BF01", skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,
    /// Feature Location
    #[serde(rename = "BF02", skip_serializing_if = "Option::is_none")]
    pub feature_location: Option<String>,
    /// Feature Name
    #[serde(rename = "BF03", skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    /// Functional Classification
    #[serde(rename = "BH01", skip_serializing_if = "Option::is_none")]
    pub functional_classification: Option<String>,
    /// Urban Code
    #[serde(rename = "BH02", skip_serializing_if = "Option::is_none")]
    pub urban_code: Option<String>,
    /// NHS Designation
    #[serde(rename = "BH03", skip_serializing_if = "Option::is_none")]
    pub nhs_designation: Option<String>,
    /// National Highway Freight Network
    #[serde(rename = "BH04", skip_serializing_if = "Option::is_none")]
    pub freight_network: Option<String>,
    /// STRAHNET Designation
    #[serde(rename = "BH05", skip_serializing_if = "Option::is_none")]
    pub strahnet: Option<String>,
    /// LRS Route ID
    #[serde(rename = "BH06", skip_serializing_if = "Option::is_none")]
    pub lrs_route_id: Option<String>,
    /// LRS Mile Point
    #[serde(rename = "BH07", skip_serializing_if = "Option::is_none")]
    pub lrs_mile_point: Option<String>,
    /// Lanes on Highway
    #[serde(rename = "BH08", skip_serializing_if = "Option::is_none")]
    pub lanes: Option<String>,
    /// Annual Average Daily Traffic
    #[serde(rename = "BH09", skip_serializing_if = "Option::is_none")]
    pub aadt: Option<String>,
    /// Annual Average Daily Truck Traffic
    #[serde(rename = "BH10", skip_serializing_if = "Option::is_none")]
    pub aadtt: Option<String>,
    /// Year of Annual Average Daily Traffic
    #[serde(rename = "BH11", skip_serializing_if = "Option::is_none")]
    pub aadt_year: Option<String>,
    /// Highway Maximum Usable Vertical Clearance
    #[serde(rename = "BH12", skip_serializing_if = "Option::is_none")]
    pub max_vertical_clearance: Option<String>,
    /// Highway Minimum Vertical Clearance
    #[serde(rename = "BH13", skip_serializing_if = "Option::is_none")]
    pub min_vertical_clearance: Option<String>,
    /// Highway Minimum Horizontal Clearance, Left
    #[serde(rename = "BH14", skip_serializing_if = "Option::is_none")]
    pub left_horizontal_clearance: Option<String>,
    /// Highway Minimum Horizontal Clearance, Right
    #[serde(rename = "BH15", skip_serializing_if = "Option::is_none")]
    pub right_horizontal_clearance: Option<String>,
    /// Highway Maximum Usable Surface Width
    #[serde(rename = "BH16", skip_serializing_if = "Option::is_none")]
    pub max_usable_surface_width: Option<String>,
    /// Bypass Detour Length
    #[serde(rename = "BH17", skip_serializing_if = "Option::is_none")]
    pub detour_length: Option<String>,
    /// Crossing Bridge Number
    #[serde(rename = "BH18", skip_serializing_if = "Option::is_none")]
    pub crossing_bridge_number: Option<String>,
    /// Railroad Service Type
    #[serde(rename = "BRR01", skip_serializing_if = "Option::is_none")]
    pub railroad_service_type: Option<String>,
    /// Railroad Minimum Vertical Clearance
    #[serde(rename = "BRR02", skip_serializing_if = "Option::is_none")]
    pub railroad_vertical_clearance: Option<String>,
    /// Railroad Minimum Horizontal Offset
    #[serde(rename = "BRR03", skip_serializing_if = "Option::is_none")]
    pub railroad_horizontal_offset: Option<String>,
    /// Navigable Waterway
    #[serde(rename = "BN01", skip_serializing_if = "Option::is_none")]
    pub navigable_waterway: Option<String>,
    /// Navigation Minimum Vertical Clearance
    #[serde(rename = "BN02", skip_serializing_if = "Option::is_none")]
    pub navigation_vertical_clearance: Option<String>,
    /// Movable Bridge Maximum Navigation Vertical Clearance
    #[serde(rename = "BN03", skip_serializing_if = "Option::is_none")]
    pub movable_vertical_clearance: Option<String>,
    /// Navigation Channel Width
    #[serde(rename = "BN04", skip_serializing_if = "Option::is_none")]
    pub navigation_channel_width: Option<String>,
    /// Navigation Channel Minimum Horizontal Clearance
    #[serde(rename = "BN05", skip_serializing_if = "Option::is_none")]
    pub navigation_horizontal_clearance: Option<String>,
    /// Substructure Navigation Protection
    #[serde(rename = "BN06", skip_serializing_if = "Option::is_none")]
    pub navigation_protection: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub routes: Vec<Route>,
}

const FEATURE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("BF01", "Feature Type", 3),
    FieldSpec::text("BF02", "Feature Location", 1),
    FieldSpec::truncate("BF03", "Feature Name", 300),
    FieldSpec::text("BH01", "Functional Classification", 2),
    FieldSpec::text("BH02", "Urban Code", 5),
    FieldSpec::text("BH03", "NHS Designation", 1),
    FieldSpec::text("BH04", "National Highway Freight Network", 1),
    FieldSpec::text("BH05", "STRAHNET Designation", 1),
    FieldSpec::truncate("BH06", "LRS Route ID", 120),
    FieldSpec::numeric("BH07", "LRS Mile Point", 9, 3),
    FieldSpec::numeric("BH08", "Lanes on Highway", 2, 0),
    FieldSpec::numeric("BH09", "Annual Average Daily Traffic", 8, 0),
    FieldSpec::numeric("BH10", "Annual Average Daily Truck Traffic", 8, 0),
    FieldSpec::numeric("BH11", "Year of Annual Average Daily Traffic", 4, 0),
    FieldSpec::numeric("BH12", "Highway Maximum Usable Vertical Clearance", 4, 1),
    FieldSpec::numeric("BH13", "Highway Minimum Vertical Clearance", 4, 1),
    FieldSpec::numeric("BH14", "Highway Minimum Horizontal Clearance, Left", 4, 1),
    FieldSpec::numeric("BH15", "Highway Minimum Horizontal Clearance, Right", 4, 1),
    FieldSpec::numeric("BH16", "Highway Maximum Usable Surface Width", 5, 1),
    FieldSpec::numeric("BH17", "Bypass Detour Length", 3, 0),
    FieldSpec::text("BH18", "Crossing Bridge Number", 15),
    FieldSpec::text("BRR01", "Railroad Service Type", 2),
    FieldSpec::numeric("BRR02", "Railroad Minimum Vertical Clearance", 4, 1),
    FieldSpec::numeric("BRR03", "Railroad Minimum Horizontal Offset", 4, 1),
    FieldSpec::text("BN01", "Navigable Waterway", 1),
    FieldSpec::numeric("BN02", "Navigation Minimum Vertical Clearance", 4, 1),
    FieldSpec::numeric("BN03", "Movable Bridge Maximum Navigation Vertical Clearance", 4, 1),
    FieldSpec::numeric("BN04", "Navigation Channel Width", 5, 1),
    FieldSpec::numeric("BN05", "Navigation Channel Minimum Horizontal Clearance", 5, 1),
    FieldSpec::text("BN06", "Substructure Navigation Protection", 1),
];

impl Entity for Feature {
    const KIND: EntityKind = EntityKind::Feature;

    fn schema() -> &'static [FieldSpec] {
        FEATURE_FIELDS
    }

    fn field(&self, item: &str) -> Option<&str> {
        match item {
            "BF01" => self.feature_type.as_deref(),
            "BF02" => self.feature_location.as_deref(),
            "BF03" => self.feature_name.as_deref(),
            "BH01" => self.functional_classification.as_deref(),
            "BH02" => self.urban_code.as_deref(),
            "BH03" => self.nhs_designation.as_deref(),
            "BH04" => self.freight_network.as_deref(),
            "BH05" => self.strahnet.as_deref(),
            "BH06" => self.lrs_route_id.as_deref(),
            "BH07" => self.lrs_mile_point.as_deref(),
            "BH08" => self.lanes.as_deref(),
            "BH09" => self.aadt.as_deref(),
            "BH10" => self.aadtt.as_deref(),
            "BH11" => self.aadt_year.as_deref(),
            "BH12" => self.max_vertical_clearance.as_deref(),
            "BH13" => self.min_vertical_clearance.as_deref(),
            "BH14" => self.left_horizontal_clearance.as_deref(),
            "BH15" => self.right_horizontal_clearance.as_deref(),
            "BH16" => self.max_usable_surface_width.as_deref(),
            "BH17" => self.detour_length.as_deref(),
            "BH18" => self.crossing_bridge_number.as_deref(),
            "BRR01" => self.railroad_service_type.as_deref(),
            "BRR02" => self.railroad_vertical_clearance.as_deref(),
            "BRR03" => self.railroad_horizontal_offset.as_deref(),
            "BN01" => self.navigable_waterway.as_deref(),
            "BN02" => self.navigation_vertical_clearance.as_deref(),
            "BN03" => self.movable_vertical_clearance.as_deref(),
            "BN04" => self.navigation_channel_width.as_deref(),
            "BN05" => self.navigation_horizontal_clearance.as_deref(),
            "BN06" => self.navigation_protection.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, item: &str, value: Option<String>) -> bool {
        let slot = match item {
            "BF01" => &mut self.feature_type,
            "BF02" => &mut self.feature_location,
            "BF03" => &mut self.feature_name,
            "BH01" => &mut self.functional_classification,
            "BH02" => &mut self.urban_code,
            "BH03" => &mut self.nhs_designation,
            "BH04" => &mut self.freight_network,
            "BH05" => &mut self.strahnet,
            "BH06" => &mut self.lrs_route_id,
            "BH07" => &mut self.lrs_mile_point,
            "BH08" => &mut self.lanes,
            "BH09" => &mut self.aadt,
            "BH10" => &mut self.aadtt,
            "BH11" => &mut self.aadt_year,
            "BH12" => &mut self.max_vertical_clearance,
            "BH13" => &mut self.min_vertical_clearance,
            "BH14" => &mut self.left_horizontal_clearance,
            "BH15" => &mut self.right_horizontal_clearance,
            "BH16" => &mut self.max_usable_surface_width,
            "BH17" => &mut self.detour_length,
            "BH18" => &mut self.crossing_bridge_number,
            "BRR01" => &mut self.railroad_service_type,
            "BRR02" => &mut self.railroad_vertical_clearance,
            "BRR03" => &mut self.railroad_horizontal_offset,
            "BN01" => &mut self.navigable_waterway,
            "BN02" => &mut self.navigation_vertical_clearance,
            "BN03" => &mut self.movable_vertical_clearance,
            "BN04" => &mut self.navigation_channel_width,
            "BN05" => &mut self.navigation_horizontal_clearance,
            "BN06" => &mut self.navigation_protection,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn key_parts(&self) -> Vec<String> {
        vec![key_part(self.feature_type.as_ref())]
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

/// A route on a feature. Keyed within its owning feature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Route Designation
    #[serde(rename = "BRT01", skip_serializing_if = "Option::is_none")]
    pub route_designation: Option<String>,
    /// Route Number
    #[serde(rename = "BRT02", skip_serializing_if = "Option::is_none")]
    pub route_number: Option<String>,
    /// Route Direction
    #[serde(rename = "BRT03", skip_serializing_if = "Option::is_none")]
    pub route_direction: Option<String>,
    /// Route Type
    #[serde(rename = "BRT04", skip_serializing_if = "Option::is_none")]
    pub route_type: Option<String>,
    /// Service Type
    #[serde(rename = "BRT05", skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,
}

const ROUTE_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("BRT01", "Route Designation", 4),
    FieldSpec::text("BRT02", "Route Number", 10),
    FieldSpec::text("BRT03", "Route Direction", 1),
    FieldSpec::text("BRT04", "Route Type", 1),
    FieldSpec::text("BRT05", "Service Type", 1),
];

impl Entity for Route {
    const KIND: EntityKind = EntityKind::Route;

    fn schema() -> &'static [FieldSpec] {
        ROUTE_FIELDS
    }

    fn field(&self, item: &str) -> Option<&str> {
        match item {
            "BRT01" => self.route_designation.as_deref(),
            "BRT02" => self.route_number.as_deref(),
            "BRT03" => self.route_direction.as_deref(),
            "BRT04" => self.route_type.as_deref(),
            "BRT05" => self.service_type.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, item: &str, value: Option<String>) -> bool {
        let slot = match item {
            "BRT01" => &mut self.route_designation,
            "BRT02" => &mut self.route_number,
            "BRT03" => &mut self.route_direction,
            "BRT04" => &mut self.route_type,
            "BRT05" => &mut self.service_type,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn key_parts(&self) -> Vec<String> {
        vec![key_part(self.route_designation.as_ref())]
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

impl Feature {
    fn type_prefix(&self) -> Option<char> {
        trimmed(self.feature_type.as_deref())
            .and_then(|code| code.chars().next())
            .map(|c| c.to_ascii_uppercase())
    }

    pub fn is_highway(&self) -> bool {
        self.type_prefix() == Some('H')
    }

    pub fn is_railroad(&self) -> bool {
        self.type_prefix() == Some('R')
    }

    pub fn is_waterway(&self) -> bool {
        self.type_prefix() == Some('W')
    }

    /// Natural key of a route owned by this feature.
    pub fn route_key(&self, route: &Route) -> EntityKey {
        let mut parts = self.key_parts();
        parts.extend(route.key_parts());
        EntityKey::new(EntityKind::Route, parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_key_includes_feature_type() {
        let feature = Feature {
            feature_type: Some("H01".into()),
            ..Feature::default()
        };
        let route = Route {
            route_designation: Some("1".into()),
            ..Route::default()
        };
        assert_eq!(feature.route_key(&route).parts, vec!["H01", "1"]);
        assert!(feature.is_highway());
        assert!(!feature.is_waterway());
    }
}
