use chrono::NaiveDate;

/// Submitted date in fixed `YYYYMMDD` form.
///
/// Exactly eight ASCII digits that name a real calendar day; anything else,
/// including separators or surrounding text, is rejected.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y%m%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_calendar_days_parse() {
        assert_eq!(
            parse_date(" 20230115 "),
            NaiveDate::from_ymd_opt(2023, 1, 15)
        );
        assert!(parse_date("20230229").is_none());
        assert!(parse_date("2023-01-15").is_none());
        assert!(parse_date("2023115").is_none());
        assert!(parse_date("2023011A").is_none());
    }
}
