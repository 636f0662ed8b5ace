//! Coded items and the reference list each one is checked against.

use nbi_model::EntityKind;

/// `(dataset, item, code list)` for every coded item.
pub const LOOKUPS: &[(EntityKind, &str, &str)] = &[
    (EntityKind::Bridge, "BCL01", "Agency"),
    (EntityKind::Bridge, "BCL02", "Agency"),
    (EntityKind::Bridge, "BCL03", "LandAccess"),
    (EntityKind::Bridge, "BCL04", "HistoricSignificance"),
    (EntityKind::Bridge, "BCL05", "Toll"),
    (EntityKind::Bridge, "BCL06", "YesNo"),
    (EntityKind::Bridge, "BRH01", "Railing"),
    (EntityKind::Bridge, "BRH02", "Railing"),
    (EntityKind::Bridge, "BG10", "Median"),
    (EntityKind::Bridge, "BG12", "YesNo"),
    (EntityKind::Bridge, "BG14", "YesNo"),
    (EntityKind::Bridge, "BLR01", "DesignLoad"),
    (EntityKind::Bridge, "BLR02", "DesignMethod"),
    (EntityKind::Bridge, "BLR04", "RatingMethod"),
    (EntityKind::Bridge, "BLR08", "PermitLoads"),
    (EntityKind::Bridge, "BIR01", "YesNo"),
    (EntityKind::Bridge, "BIR02", "YesNo"),
    (EntityKind::Bridge, "BIR03", "YesNo"),
    (EntityKind::Bridge, "BIR04", "YesNo"),
    (EntityKind::Bridge, "BC01", "ConditionRating"),
    (EntityKind::Bridge, "BC02", "ConditionRating"),
    (EntityKind::Bridge, "BC03", "ConditionRating"),
    (EntityKind::Bridge, "BC04", "ConditionRating"),
    (EntityKind::Bridge, "BC05", "ConditionRating"),
    (EntityKind::Bridge, "BC06", "ConditionRating"),
    (EntityKind::Bridge, "BC07", "ConditionRating"),
    (EntityKind::Bridge, "BC08", "ConditionRating"),
    (EntityKind::Bridge, "BC09", "ConditionRating"),
    (EntityKind::Bridge, "BC10", "ConditionRating"),
    (EntityKind::Bridge, "BC11", "ConditionRating"),
    (EntityKind::Bridge, "BC12", "ConditionClass"),
    (EntityKind::Bridge, "BC13", "ConditionRating"),
    (EntityKind::Bridge, "BC14", "ConditionRating"),
    (EntityKind::Bridge, "BC15", "ConditionRating"),
    (EntityKind::Bridge, "BAP01", "Alignment"),
    (EntityKind::Bridge, "BAP02", "Overtopping"),
    (EntityKind::Bridge, "BAP03", "ScourVulnerability"),
    (EntityKind::Bridge, "BAP04", "ScourPlan"),
    (EntityKind::Bridge, "BAP05", "Seismic"),
    (EntityKind::Feature, "BF01", "FeatureType"),
    (EntityKind::Feature, "BF02", "FeatureLocation"),
    (EntityKind::Feature, "BH01", "FunctionalClass"),
    (EntityKind::Feature, "BH03", "YesNo"),
    (EntityKind::Feature, "BH04", "YesNo"),
    (EntityKind::Feature, "BH05", "Strahnet"),
    (EntityKind::Feature, "BRR01", "RailroadService"),
    (EntityKind::Feature, "BN01", "YesNo"),
    (EntityKind::Feature, "BN06", "NavProtection"),
    (EntityKind::Route, "BRT01", "RouteDesignation"),
    (EntityKind::Route, "BRT03", "RouteDirection"),
    (EntityKind::Route, "BRT04", "RouteType"),
    (EntityKind::Route, "BRT05", "ServiceType"),
    (EntityKind::Element, "BE01", "Element"),
    (EntityKind::Element, "BE02", "Element"),
    (EntityKind::Inspection, "BIE01", "InspectionType"),
    (EntityKind::Inspection, "BIE07", "RiskMethod"),
    (EntityKind::Inspection, "BIE12", "InspectionEquipment"),
    (EntityKind::PostingEvaluation, "BEP01", "LegalLoad"),
    (EntityKind::PostingEvaluation, "BEP03", "PostingType"),
    (EntityKind::PostingStatus, "BPS01", "PostingStatus"),
    (EntityKind::SpanSet, "BSP04", "Material"),
    (EntityKind::SpanSet, "BSP05", "Continuity"),
    (EntityKind::SpanSet, "BSP06", "SpanType"),
    (EntityKind::SpanSet, "BSP07", "ProtectiveSystem"),
    (EntityKind::SpanSet, "BSP08", "DeckInteraction"),
    (EntityKind::SpanSet, "BSP09", "DeckMaterial"),
    (EntityKind::SpanSet, "BSP10", "WearingSurface"),
    (EntityKind::SpanSet, "BSP11", "ProtectiveSystem"),
    (EntityKind::SpanSet, "BSP12", "ProtectiveSystem"),
    (EntityKind::SpanSet, "BSP13", "YesNo"),
    (EntityKind::SubstructureSet, "BSB03", "Material"),
    (EntityKind::SubstructureSet, "BSB04", "SubstructureType"),
    (EntityKind::SubstructureSet, "BSB05", "ProtectiveSystem"),
    (EntityKind::SubstructureSet, "BSB06", "Foundation"),
    (EntityKind::SubstructureSet, "BSB07", "ProtectiveSystem"),
    (EntityKind::Work, "BW03", "WorkType"),
];
