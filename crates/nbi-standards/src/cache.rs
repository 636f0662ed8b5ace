//! Read-through cache over a [`ReferenceSource`].
//!
//! Each named list is fetched at most once per process. Concurrent first
//! access is serialized by a double-checked write lock, so the source sees a
//! single fetch per list no matter how many validators race for it.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use regex::Regex;
use tracing::{debug, error};

use crate::error::{Result, StandardsError};
use crate::source::ReferenceSource;

/// Engineering shorthand accepted for any list when the code is not listed:
/// M, A or S, two digits, and an optional trailing digit 1-6.
static FALLBACK_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[MAS]\d{2}[1-6]?$").expect("Invalid fallback code regex"));

/// Separator for multi-valued lookup fields.
pub const MULTI_VALUE_SEPARATOR: char = '|';

/// How a submitted code matched its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMatch {
    /// Every part found in the cached list.
    Listed,
    /// At least one part accepted only through the fallback pattern.
    Fallback,
    Invalid,
}

impl CodeMatch {
    pub fn is_valid(self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// Codes of one list, upper-cased, with their descriptions.
#[derive(Debug, Default)]
pub struct CodeSet {
    codes: BTreeMap<String, String>,
}

impl CodeSet {
    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains_key(&code.trim().to_ascii_uppercase())
    }

    pub fn description(&self, code: &str) -> Option<&str> {
        self.codes
            .get(&code.trim().to_ascii_uppercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[derive(Debug, Default)]
struct StateSet {
    codes: HashSet<u32>,
}

#[derive(Debug, Default)]
struct CountySet {
    codes: HashSet<(u32, u32)>,
}

fn numeric_code(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

pub struct CodeListCache {
    source: Box<dyn ReferenceSource>,
    lists: RwLock<HashMap<String, Arc<CodeSet>>>,
    states: RwLock<Option<Arc<StateSet>>>,
    counties: RwLock<Option<Arc<CountySet>>>,
}

impl std::fmt::Debug for CodeListCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeListCache")
            .field("loaded_lists", &self.loaded_lists())
            .finish_non_exhaustive()
    }
}

impl CodeListCache {
    pub fn new(source: impl ReferenceSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            lists: RwLock::new(HashMap::new()),
            states: RwLock::new(None),
            counties: RwLock::new(None),
        }
    }

    /// Populate the named lists plus states and counties.
    ///
    /// Any list that comes back empty fails the whole preload.
    pub fn preload<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for name in names {
            self.code_list(name)?;
        }
        self.state_set()?;
        self.county_set()?;
        Ok(())
    }

    /// The named list, fetching it from the source on first use.
    pub fn code_list(&self, name: &str) -> Result<Arc<CodeSet>> {
        if let Some(set) = self
            .lists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ok(Arc::clone(set));
        }

        let mut lists = self.lists.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(set) = lists.get(name) {
            return Ok(Arc::clone(set));
        }
        let entries = self.source.code_list(name)?;
        if entries.is_empty() {
            return Err(StandardsError::EmptyCodeList {
                name: name.to_string(),
            });
        }
        let set = Arc::new(CodeSet {
            codes: entries
                .into_iter()
                .map(|e| (e.code.trim().to_ascii_uppercase(), e.description))
                .collect(),
        });
        debug!(list = name, codes = set.len(), "code list cached");
        lists.insert(name.to_string(), Arc::clone(&set));
        Ok(set)
    }

    fn state_set(&self) -> Result<Arc<StateSet>> {
        if let Some(set) = self
            .states
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(set));
        }
        let mut slot = self.states.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(set) = slot.as_ref() {
            return Ok(Arc::clone(set));
        }
        let codes: HashSet<u32> = self
            .source
            .states()?
            .iter()
            .filter_map(|s| numeric_code(&s.code))
            .collect();
        if codes.is_empty() {
            return Err(StandardsError::EmptyStateList);
        }
        debug!(states = codes.len(), "state list cached");
        let set = Arc::new(StateSet { codes });
        *slot = Some(Arc::clone(&set));
        Ok(set)
    }

    fn county_set(&self) -> Result<Arc<CountySet>> {
        if let Some(set) = self
            .counties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            return Ok(Arc::clone(set));
        }
        let mut slot = self.counties.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(set) = slot.as_ref() {
            return Ok(Arc::clone(set));
        }
        let codes: HashSet<(u32, u32)> = self
            .source
            .counties()?
            .iter()
            .filter_map(|c| Some((numeric_code(&c.state)?, numeric_code(&c.code)?)))
            .collect();
        if codes.is_empty() {
            return Err(StandardsError::EmptyCountyList);
        }
        debug!(counties = codes.len(), "county list cached");
        let set = Arc::new(CountySet { codes });
        *slot = Some(Arc::clone(&set));
        Ok(set)
    }

    /// Classify a possibly multi-valued code against `list`.
    ///
    /// Blank values and blank parts are invalid. A list that cannot be loaded
    /// classifies everything as invalid.
    pub fn classify(&self, list: &str, value: Option<&str>) -> CodeMatch {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return CodeMatch::Invalid;
        };
        let set = match self.code_list(list) {
            Ok(set) => set,
            Err(err) => {
                error!(list, error = %err, "code list unavailable");
                return CodeMatch::Invalid;
            }
        };

        let mut result = CodeMatch::Listed;
        for part in value.split(MULTI_VALUE_SEPARATOR) {
            let part = part.trim().to_ascii_uppercase();
            if part.is_empty() {
                return CodeMatch::Invalid;
            }
            if set.contains(&part) {
                continue;
            }
            if FALLBACK_CODE.is_match(&part) {
                result = CodeMatch::Fallback;
                continue;
            }
            return CodeMatch::Invalid;
        }
        result
    }

    /// Parts of `value` accepted only through the fallback pattern,
    /// upper-cased. Empty unless `classify` yields [`CodeMatch::Fallback`].
    pub fn fallback_codes(&self, list: &str, value: Option<&str>) -> Vec<String> {
        if self.classify(list, value) != CodeMatch::Fallback {
            return Vec::new();
        }
        let Ok(set) = self.code_list(list) else {
            return Vec::new();
        };
        value
            .unwrap_or_default()
            .split(MULTI_VALUE_SEPARATOR)
            .map(|part| part.trim().to_ascii_uppercase())
            .filter(|part| !set.contains(part))
            .collect()
    }

    pub fn is_valid_code(&self, list: &str, value: Option<&str>) -> bool {
        self.classify(list, value).is_valid()
    }

    /// State codes compare numerically, so "6" and "06" are the same state.
    pub fn is_valid_state(&self, value: Option<&str>) -> bool {
        let Some(code) = value.and_then(numeric_code) else {
            return false;
        };
        match self.state_set() {
            Ok(set) => set.codes.contains(&code),
            Err(err) => {
                error!(error = %err, "state list unavailable");
                false
            }
        }
    }

    /// Counties are keyed by the (state, county) pair.
    pub fn is_valid_county(&self, state: Option<&str>, county: Option<&str>) -> bool {
        let (Some(state), Some(county)) =
            (state.and_then(numeric_code), county.and_then(numeric_code))
        else {
            return false;
        };
        match self.county_set() {
            Ok(set) => set.codes.contains(&(state, county)),
            Err(err) => {
                error!(error = %err, "county list unavailable");
                false
            }
        }
    }

    /// Names of the lists fetched so far, sorted.
    pub fn loaded_lists(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .lists
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::InMemoryReferenceSource;

    fn cache() -> CodeListCache {
        CodeListCache::new(
            InMemoryReferenceSource::new()
                .with_codes("Material", &["C01", "S01", "T01"])
                .with_codes("YesNo", &["Y", "N"])
                .with_state("06", "CA", "California")
                .with_county("06", "037", "Los Angeles"),
        )
    }

    #[test]
    fn fallback_pattern_accepts_engineering_shorthand() {
        let cache = cache();
        assert_eq!(cache.classify("Material", Some("c01")), CodeMatch::Listed);
        assert_eq!(cache.classify("Material", Some("M12")), CodeMatch::Fallback);
        assert_eq!(cache.classify("Material", Some("A997")), CodeMatch::Invalid);
        assert_eq!(cache.classify("Material", Some("S127")), CodeMatch::Invalid);
        assert_eq!(cache.classify("Material", Some("S126")), CodeMatch::Fallback);
        assert_eq!(cache.classify("Material", Some("X01")), CodeMatch::Invalid);
    }

    #[test]
    fn multi_values_need_every_part() {
        let cache = cache();
        assert!(cache.is_valid_code("Material", Some("C01|T01")));
        assert!(!cache.is_valid_code("Material", Some("C01|")));
        assert!(!cache.is_valid_code("Material", Some("C01|Q9")));
        assert!(!cache.is_valid_code("Material", Some("  ")));
        assert!(!cache.is_valid_code("Material", None));
    }

    #[test]
    fn state_and_county_compare_numerically() {
        let cache = cache();
        assert!(cache.is_valid_state(Some("6")));
        assert!(cache.is_valid_state(Some("06")));
        assert!(!cache.is_valid_state(Some("CA")));
        assert!(cache.is_valid_county(Some("6"), Some("37")));
        assert!(!cache.is_valid_county(Some("06"), Some("038")));
        assert!(!cache.is_valid_county(None, Some("037")));
    }

    #[test]
    fn unknown_list_is_an_error_and_invalid() {
        let cache = cache();
        assert!(matches!(
            cache.code_list("Nope"),
            Err(StandardsError::EmptyCodeList { .. })
        ));
        assert_eq!(cache.classify("Nope", Some("Y")), CodeMatch::Invalid);
        assert!(cache.preload(["Nope"]).is_err());
        assert!(cache.preload(["YesNo", "Material"]).is_ok());
        assert_eq!(cache.loaded_lists(), vec!["Material", "YesNo"]);
    }
}
