//! Lenient numeric parsing for SVG attribute values.

use regex::Regex;
use std::sync::OnceLock;

/// Signed decimal with optional exponent.
const NUMBER: &str = r"[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?";

fn re_number() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| Regex::new(NUMBER).expect("number pattern is valid"))
}

fn re_translate() -> &'static Regex {
    static ONCE: OnceLock<Regex> = OnceLock::new();
    ONCE.get_or_init(|| {
        let pattern = format!(r"translate\s*\(\s*{NUMBER}(?:\s*,\s*|\s+)({NUMBER})");
        Regex::new(&pattern).expect("translate pattern is valid")
    })
}

/// Extract the first number embedded in an attribute value.
///
/// Unit suffixes and trailing list items are ignored: `"12px"` gives 12 and
/// `"10 20"` gives 10. Returns `None` when no finite number is present.
pub fn parse_number(value: &str) -> Option<f64> {
    let token = re_number().find(value)?;
    token.as_str().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extract the y component of the first `translate(x, y)` in a transform list.
///
/// A single-argument `translate(x)` has no explicit y and yields `None`.
pub fn translate_y(transform: &str) -> Option<f64> {
    let caps = re_translate().captures(transform)?;
    caps.get(1)?
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_number("50"), Some(50.0));
        assert_eq!(parse_number("-3.5"), Some(-3.5));
        assert_eq!(parse_number("+.25"), Some(0.25));
        assert_eq!(parse_number("1e2"), Some(100.0));
    }

    #[test]
    fn test_parse_with_units_and_lists() {
        assert_eq!(parse_number("14px"), Some(14.0));
        assert_eq!(parse_number(" 12.5pt "), Some(12.5));
        assert_eq!(parse_number("10 20 30"), Some(10.0));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("auto"), None);
        assert_eq!(parse_number("-"), None);
    }

    #[test]
    fn test_translate_y() {
        assert_eq!(translate_y("translate(0, 540)"), Some(540.0));
        assert_eq!(translate_y("translate(10 -20.5)"), Some(-20.5));
        assert_eq!(translate_y("scale(2) translate( 5 ,7 )"), Some(7.0));
    }

    #[test]
    fn test_translate_y_malformed() {
        assert_eq!(translate_y("translate(5)"), None);
        assert_eq!(translate_y("translate(a, b)"), None);
        assert_eq!(translate_y("rotate(45)"), None);
        assert_eq!(translate_y(""), None);
    }
}
