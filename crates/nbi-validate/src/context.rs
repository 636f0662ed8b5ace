//! State handed to every rule evaluation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use nbi_standards::CodeListCache;

/// Read-only collaborators for one batch.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub cache: &'a CodeListCache,
    /// Reference date for "not in the future" rules.
    pub as_of: NaiveDate,
}

impl<'a> RuleContext<'a> {
    pub fn new(cache: &'a CodeListCache, as_of: NaiveDate) -> Self {
        Self { cache, as_of }
    }
}

/// Codes accepted only through the engineering-shorthand fallback, counted
/// per (item, value) so reporting can list temporary codes in use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTally {
    counts: BTreeMap<String, BTreeMap<String, usize>>,
}

impl CodeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, item: &str, value: &str) {
        *self
            .counts
            .entry(item.to_string())
            .or_default()
            .entry(value.trim().to_ascii_uppercase())
            .or_default() += 1;
    }

    /// Occurrences of a value under an item.
    pub fn count(&self, item: &str, value: &str) -> usize {
        self.counts
            .get(item)
            .and_then(|values| values.get(&value.trim().to_ascii_uppercase()))
            .copied()
            .unwrap_or(0)
    }

    /// `(item, value, count)` in item then value order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, usize)> {
        self.counts.iter().flat_map(|(item, values)| {
            values
                .iter()
                .map(move |(value, count)| (item.as_str(), value.as_str(), *count))
        })
    }

    pub fn total(&self) -> usize {
        self.counts.values().flat_map(BTreeMap::values).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_normalizes_values() {
        let mut tally = CodeTally::new();
        tally.record("BSP04", "m12");
        tally.record("BSP04", " M12 ");
        tally.record("BSB03", "S01");
        assert_eq!(tally.count("BSP04", "M12"), 2);
        assert_eq!(tally.total(), 3);
        let entries: Vec<_> = tally.entries().collect();
        assert_eq!(entries[0], ("BSB03", "S01", 1));
    }
}
