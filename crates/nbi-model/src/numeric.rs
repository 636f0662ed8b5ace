//! Textual decimal handling shared by numeric rules and the sanitizer.
//!
//! Values are inspected as text so that digit budgets are checked against
//! what was submitted, not against a float rendering of it.

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    DecimalText::parse(value)?;
    value.trim().parse::<f64>().ok()
}

/// Parses a string as i64, returning None for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().trim_start_matches('+').parse::<i64>().ok()
}

/// A plain decimal literal split into sign, integer and fraction digits.
///
/// Accepts an optional sign, digits, and an optional `.` followed by digits.
/// Exponents, grouping separators and inner whitespace are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalText<'a> {
    pub negative: bool,
    /// Integer digits with leading zeros removed; empty for zero.
    pub integer: &'a str,
    pub fraction: &'a str,
}

impl<'a> DecimalText<'a> {
    pub fn parse(value: &'a str) -> Option<Self> {
        let value = value.trim();
        let (negative, unsigned) = match value.as_bytes().first()? {
            b'-' => (true, &value[1..]),
            b'+' => (false, &value[1..]),
            _ => (false, value),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (unsigned, ""),
        };
        if integer.is_empty() && fraction.is_empty() {
            return None;
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(integer) || !all_digits(fraction) {
            return None;
        }
        Some(Self {
            negative,
            integer: integer.trim_start_matches('0'),
            fraction,
        })
    }

    pub fn integer_digits(&self) -> usize {
        self.integer.len()
    }

    pub fn decimal_digits(&self) -> usize {
        self.fraction.len()
    }

    /// Significant digits counted against a total-digit budget.
    pub fn total_digits(&self) -> usize {
        self.integer_digits() + self.decimal_digits()
    }

    pub fn is_zero(&self) -> bool {
        self.integer.is_empty() && self.fraction.bytes().all(|b| b == b'0')
    }

    /// Canonical text with at most `max_decimals` fraction digits, cut
    /// without rounding.
    pub fn canonical(&self, max_decimals: usize) -> String {
        let fraction = &self.fraction[..self.fraction.len().min(max_decimals)];
        let mut out = String::with_capacity(self.total_digits() + 2);
        let zero = self.integer.is_empty() && fraction.bytes().all(|b| b == b'0');
        if self.negative && !zero {
            out.push('-');
        }
        out.push_str(if self.integer.is_empty() {
            "0"
        } else {
            self.integer
        });
        if !fraction.is_empty() {
            out.push('.');
            out.push_str(fraction);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimals_only() {
        let d = DecimalText::parse(" +007.250 ").expect("decimal");
        assert_eq!(d.integer, "7");
        assert_eq!(d.fraction, "250");
        assert_eq!(d.total_digits(), 4);
        assert!(DecimalText::parse(".5").is_some());
        assert!(DecimalText::parse("5.").is_some());
        for bad in ["", ".", "-", "1e3", "1,000", "1 000", "N", "--1"] {
            assert!(DecimalText::parse(bad).is_none(), "{bad}");
        }
    }

    #[test]
    fn canonical_truncates_without_rounding() {
        let d = DecimalText::parse("12.345").expect("decimal");
        assert_eq!(d.canonical(2), "12.34");
        assert_eq!(DecimalText::parse("-0.001").expect("d").canonical(2), "0.00");
        assert_eq!(DecimalText::parse("0099").expect("d").canonical(0), "99");
        assert_eq!(DecimalText::parse("-.5").expect("d").canonical(1), "-0.5");
    }

    #[test]
    fn float_and_integer_helpers() {
        assert_eq!(parse_f64("0.95"), Some(0.95));
        assert_eq!(parse_f64("1e3"), None);
        assert_eq!(parse_i64("+12"), Some(12));
        assert_eq!(parse_i64(" "), None);
    }
}
