//! Work history.

use serde::{Deserialize, Serialize};

use crate::enums::{EntityKind, RecordStatus};
use crate::schema::{Entity, FieldSpec, key_part};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Work {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    /// Year Work Performed
    #[serde(rename = "BW02", skip_serializing_if = "Option::is_none")]
    pub year_work_performed: Option<String>,
    /// Work Performed
    #[serde(rename = "BW03", skip_serializing_if = "Option::is_none")]
    pub work_performed: Option<String>,
}

const WORK_FIELDS: &[FieldSpec] = &[
    FieldSpec::numeric("BW02", "Year Work Performed", 4, 0),
    FieldSpec::text("BW03", "Work Performed", 120),
];

impl Entity for Work {
    const KIND: EntityKind = EntityKind::Work;

    fn schema() -> &'static [FieldSpec] {
        WORK_FIELDS
    }

    fn field(&self, item: &str) -> Option<&str> {
        match item {
            "BW02" => self.year_work_performed.as_deref(),
            "BW03" => self.work_performed.as_deref(),
            _ => None,
        }
    }

    fn set_field(&mut self, item: &str, value: Option<String>) -> bool {
        let slot = match item {
            "BW02" => &mut self.year_work_performed,
            "BW03" => &mut self.work_performed,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn key_parts(&self) -> Vec<String> {
        vec![key_part(self.year_work_performed.as_ref())]
    }

    fn status(&self) -> Option<RecordStatus> {
        self.status
    }

    fn set_status(&mut self, status: RecordStatus) {
        self.status = Some(status);
    }
}

