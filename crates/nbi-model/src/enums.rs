use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::schema::{Entity, FieldSpec};
use crate::{
    BridgeRecord, Element, Feature, Inspection, PostingEvaluation, PostingStatus, Route, SpanSet,
    SubstructureSet, Work,
};

/// Severity class of a failed rule.
///
/// Orthogonal to the fatal flag: a Flag-severity rule may still be fatal,
/// and a Safety finding is never fatal by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// Load-carrying or condition combination that needs immediate attention
    Safety,
    /// Identity or structural problem; usually fatal
    Critical,
    /// Value violates a coding rule
    Error,
    /// Worth reviewing
    Flag,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "safety" => Some(Self::Safety),
            "critical" => Some(Self::Critical),
            "error" => Some(Self::Error),
            "flag" => Some(Self::Flag),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Safety => "Safety",
            Self::Critical => "Critical",
            Self::Error => "Error",
            Self::Flag => "Flag",
        }
    }

    /// All severities, most urgent first.
    pub const fn all() -> &'static [Self] {
        &[Self::Safety, Self::Critical, Self::Error, Self::Flag]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Staging status assigned by the sanitizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordStatus {
    Active,
    Removed,
}

/// Every entity type found in a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Bridge,
    Feature,
    Route,
    Element,
    Inspection,
    PostingEvaluation,
    PostingStatus,
    SpanSet,
    SubstructureSet,
    Work,
}

impl EntityKind {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Bridge,
            Self::Feature,
            Self::Route,
            Self::Element,
            Self::Inspection,
            Self::PostingEvaluation,
            Self::PostingStatus,
            Self::SpanSet,
            Self::SubstructureSet,
            Self::Work,
        ]
    }

    /// Every child dataset, routes included.
    pub fn children() -> &'static [Self] {
        &Self::all()[1..]
    }

    /// Dataset name used in rule metadata and reports.
    pub fn dataset_name(&self) -> &'static str {
        match self {
            Self::Bridge => "Bridge",
            Self::Feature => "Features",
            Self::Route => "Routes",
            Self::Element => "Elements",
            Self::Inspection => "Inspections",
            Self::PostingEvaluation => "PostingEvaluations",
            Self::PostingStatus => "PostingStatuses",
            Self::SpanSet => "SpanSets",
            Self::SubstructureSet => "SubstructureSets",
            Self::Work => "Work",
        }
    }

    /// Slug used to build workflow names (`bridge`, `border-span-sets`, ...).
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Bridge => "bridge",
            Self::Feature => "features",
            Self::Route => "routes",
            Self::Element => "elements",
            Self::Inspection => "inspections",
            Self::PostingEvaluation => "posting-evaluations",
            Self::PostingStatus => "posting-statuses",
            Self::SpanSet => "span-sets",
            Self::SubstructureSet => "substructure-sets",
            Self::Work => "work",
        }
    }

    /// Field schema of this entity type.
    pub fn schema(&self) -> &'static [FieldSpec] {
        match self {
            Self::Bridge => BridgeRecord::schema(),
            Self::Feature => Feature::schema(),
            Self::Route => Route::schema(),
            Self::Element => Element::schema(),
            Self::Inspection => Inspection::schema(),
            Self::PostingEvaluation => PostingEvaluation::schema(),
            Self::PostingStatus => PostingStatus::schema(),
            Self::SpanSet => SpanSet::schema(),
            Self::SubstructureSet => SubstructureSet::schema(),
            Self::Work => Work::schema(),
        }
    }

    pub fn spec(&self, item: &str) -> Option<&'static FieldSpec> {
        self.schema().iter().find(|spec| spec.item == item)
    }

    /// Identity items: a fatal failure on one of these removes the entity.
    pub fn key_items(&self) -> &'static [&'static str] {
        match self {
            Self::Bridge => &["BID01", "BL01"],
            Self::Feature => &["BF01"],
            Self::Route => &["BRT01"],
            Self::Element => &["BE01", "BE02"],
            Self::Inspection => &["BIE01", "BIE02"],
            Self::PostingEvaluation => &["BEP01"],
            Self::PostingStatus => &["BPS02"],
            Self::SpanSet => &["BSP01"],
            Self::SubstructureSet => &["BSB01"],
            Self::Work => &["BW02"],
        }
    }

    /// Name of the default workflow for this dataset.
    pub fn workflow_name(&self, border: bool) -> String {
        if border {
            format!("border-{}", self.slug())
        } else {
            self.slug().to_string()
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dataset_name())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    /// Accepts either the dataset name or the slug, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|kind| {
                kind.dataset_name().eq_ignore_ascii_case(wanted)
                    || kind.slug().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ModelError::UnknownDataset {
                name: wanted.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_parses_from_name_or_slug() {
        assert_eq!(
            "PostingStatuses".parse::<EntityKind>().unwrap(),
            EntityKind::PostingStatus
        );
        assert_eq!(
            "span-sets".parse::<EntityKind>().unwrap(),
            EntityKind::SpanSet
        );
        assert!("Culverts".parse::<EntityKind>().is_err());
    }

    #[test]
    fn key_items_belong_to_the_schema() {
        for kind in EntityKind::all() {
            for item in kind.key_items() {
                assert!(kind.spec(item).is_some(), "{kind} {item}");
            }
        }
    }

    #[test]
    fn workflow_names() {
        assert_eq!(EntityKind::Bridge.workflow_name(false), "bridge");
        assert_eq!(EntityKind::Element.workflow_name(true), "border-elements");
    }

    #[test]
    fn severity_ordering_puts_safety_first() {
        let mut all = vec![Severity::Flag, Severity::Safety, Severity::Error];
        all.sort();
        assert_eq!(all, vec![Severity::Safety, Severity::Error, Severity::Flag]);
        assert_eq!(Severity::parse(" critical "), Some(Severity::Critical));
    }
}
