//! Raw control values and the lenient number handling used on submit.

/// The value a control currently holds.
///
/// Selects, text fields, numeric inputs and sliders all hold text, the way an
/// input element does; only checkboxes hold a checked state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Checked(_) => None,
        }
    }

    pub fn as_checked(&self) -> Option<bool> {
        match self {
            FieldValue::Checked(b) => Some(*b),
            FieldValue::Text(_) => None,
        }
    }
}

/// Parse the leading number of `input`, yielding 0 when there is none.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `"12px"` is
/// 12 and `"abc"` is 0. NaN and negative zero also come back as 0.
pub fn parse_float(input: &str) -> f64 {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    match s[..end].parse::<f64>() {
        Ok(v) if v != 0.0 && !v.is_nan() => v,
        _ => 0.0,
    }
}

/// Render a number the way a numeric input shows it: integers without a
/// fractional part, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_float("50"), 50.0);
        assert_eq!(parse_float("-0.25"), -0.25);
        assert_eq!(parse_float("+3"), 3.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("2.5E-1"), 0.25);
    }

    #[test]
    fn test_parse_prefix() {
        assert_eq!(parse_float("  12px"), 12.0);
        assert_eq!(parse_float("3.5.1"), 3.5);
        assert_eq!(parse_float("7e"), 7.0);
        assert_eq!(parse_float("7e+"), 7.0);
        assert_eq!(parse_float("-Infinity and beyond"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_degrades_to_zero() {
        assert_eq!(parse_float(""), 0.0);
        assert_eq!(parse_float("abc"), 0.0);
        assert_eq!(parse_float("-"), 0.0);
        assert_eq!(parse_float("."), 0.0);
        assert_eq!(parse_float("NaN"), 0.0);
        let neg_zero = parse_float("-0");
        assert_eq!(neg_zero, 0.0);
        assert!(neg_zero.is_sign_positive());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(360.0), "360");
        assert_eq!(format_number(-1.0), "-1");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(500_000.0), "500000");
    }
}
