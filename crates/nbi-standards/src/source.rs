//! Reference data feed.
//!
//! [`ReferenceSource`] is the seam to the external reference-data system.
//! [`InMemoryReferenceSource`] holds everything in memory and is filled by
//! hand; [`CsvReferenceSource`] is filled from a verified reference
//! directory.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loaders::{VerifySummary, verify_and_load};

/// One code in a named list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    pub code: String,
    pub abbreviation: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountyEntry {
    pub state: String,
    pub code: String,
    pub name: String,
}

/// Read-only access to named code lists, states and counties.
///
/// An unknown list name yields an empty vector; the cache turns that into
/// an initialization error.
pub trait ReferenceSource: Send + Sync {
    fn code_list(&self, name: &str) -> Result<Vec<CodeEntry>>;
    fn states(&self) -> Result<Vec<StateEntry>>;
    fn counties(&self) -> Result<Vec<CountyEntry>>;
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryReferenceSource {
    lists: BTreeMap<String, Vec<CodeEntry>>,
    states: Vec<StateEntry>,
    counties: Vec<CountyEntry>,
}

impl InMemoryReferenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_code(&mut self, list: &str, code: &str, description: &str) {
        self.lists
            .entry(list.to_string())
            .or_default()
            .push(CodeEntry {
                code: code.to_string(),
                description: description.to_string(),
            });
    }

    /// Builder form of [`Self::add_code`] for a whole list.
    #[must_use]
    pub fn with_codes(mut self, list: &str, codes: &[&str]) -> Self {
        for code in codes {
            self.add_code(list, code, "");
        }
        self
    }

    #[must_use]
    pub fn with_state(mut self, code: &str, abbreviation: &str, name: &str) -> Self {
        self.states.push(StateEntry {
            code: code.to_string(),
            abbreviation: abbreviation.to_string(),
            name: name.to_string(),
        });
        self
    }

    #[must_use]
    pub fn with_county(mut self, state: &str, code: &str, name: &str) -> Self {
        self.counties.push(CountyEntry {
            state: state.to_string(),
            code: code.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub(crate) fn push_state(&mut self, entry: StateEntry) {
        self.states.push(entry);
    }

    pub(crate) fn push_county(&mut self, entry: CountyEntry) {
        self.counties.push(entry);
    }

    pub fn list_names(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }
}

impl ReferenceSource for InMemoryReferenceSource {
    fn code_list(&self, name: &str) -> Result<Vec<CodeEntry>> {
        Ok(self.lists.get(name).cloned().unwrap_or_default())
    }

    fn states(&self) -> Result<Vec<StateEntry>> {
        Ok(self.states.clone())
    }

    fn counties(&self) -> Result<Vec<CountyEntry>> {
        Ok(self.counties.clone())
    }
}

/// Reference directory with a verified `manifest.toml`.
#[derive(Debug, Clone)]
pub struct CsvReferenceSource {
    data: InMemoryReferenceSource,
    summary: VerifySummary,
}

impl CsvReferenceSource {
    /// Verify every digest in the directory's manifest, then parse its files.
    pub fn open(reference_dir: &Path) -> Result<Self> {
        let (data, summary) = verify_and_load(reference_dir)?;
        Ok(Self { data, summary })
    }

    pub fn summary(&self) -> &VerifySummary {
        &self.summary
    }

    pub fn list_names(&self) -> impl Iterator<Item = &str> {
        self.data.list_names()
    }
}

impl ReferenceSource for CsvReferenceSource {
    fn code_list(&self, name: &str) -> Result<Vec<CodeEntry>> {
        self.data.code_list(name)
    }

    fn states(&self) -> Result<Vec<StateEntry>> {
        self.data.states()
    }

    fn counties(&self) -> Result<Vec<CountyEntry>> {
        self.data.counties()
    }
}
