//! Small readers shared by hand-written predicates.

use chrono::{Datelike, NaiveDate};

use nbi_model::numeric::{parse_f64, parse_i64};
use nbi_model::{BridgeRecord, DynEntity, parse_date, trimmed};

/// "Not applicable" code in condition-rating items.
pub const NOT_APPLICABLE: &str = "N";

pub fn number(value: Option<&str>) -> Option<f64> {
    value.and_then(parse_f64)
}

pub fn integer(value: Option<&str>) -> Option<i64> {
    value.and_then(parse_i64)
}

pub fn date(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(parse_date)
}

/// A condition rating 0-9. `N` and anything else non-numeric yield `None`.
pub fn rating(value: Option<&str>) -> Option<u8> {
    let value = value?.trim();
    if value.eq_ignore_ascii_case(NOT_APPLICABLE) {
        return None;
    }
    value.parse::<u8>().ok().filter(|r| *r <= 9)
}

pub fn is_code(value: Option<&str>, code: &str) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case(code))
}

/// `a <= b`, or `true` when either side is missing or unparseable.
pub fn not_greater(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a <= b,
        _ => true,
    }
}

/// The date is not after `as_of`; an unparseable date is left to the
/// format rule.
pub fn not_future(value: Option<&str>, as_of: NaiveDate) -> bool {
    date(value).is_none_or(|d| d <= as_of)
}

pub fn year_not_future(value: Option<&str>, as_of: NaiveDate) -> bool {
    integer(value).is_none_or(|year| year <= i64::from(as_of.year()))
}

pub fn field<'a>(entity: &'a dyn DynEntity, item: &str) -> Option<&'a str> {
    trimmed(entity.get(item))
}

/// Lowest numeric rating among the primary components (deck,
/// superstructure, substructure, culvert).
pub fn lowest_component_rating(bridge: &BridgeRecord) -> Option<u8> {
    ["BC01", "BC02", "BC03", "BC04"]
        .iter()
        .filter_map(|item| rating(field(bridge, item)))
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_exclude_not_applicable() {
        assert_eq!(rating(Some("2")), Some(2));
        assert_eq!(rating(Some("n")), None);
        assert_eq!(rating(Some("12")), None);
        assert_eq!(rating(None), None);
    }

    #[test]
    fn missing_sides_cannot_be_compared() {
        assert!(not_greater(None, Some(1.0)));
        assert!(not_greater(Some(1.0), Some(1.0)));
        assert!(!not_greater(Some(1.5), Some(1.0)));
    }
}
