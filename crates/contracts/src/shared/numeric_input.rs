//! Numeric filter inputs must never be submitted empty.

pub const ZERO: &str = "0";

/// True when `value` starts with a decimal number the way browsers'
/// `parseFloat` reads one: optional whitespace and sign, then `Infinity`
/// or digits with an optional fraction. Trailing garbage is allowed.
pub fn has_numeric_prefix(value: &str) -> bool {
    let s = value.trim_start();
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    if s.starts_with("Infinity") {
        return true;
    }
    let mut chars = s.chars().peekable();
    let mut seen_digit = false;
    while let Some(c) = chars.peek() {
        if c.is_ascii_digit() {
            seen_digit = true;
            chars.next();
        } else {
            break;
        }
    }
    if seen_digit {
        return true;
    }
    // ".5" is a number, "." is not
    chars.next() == Some('.') && chars.next().is_some_and(|c| c.is_ascii_digit())
}

/// Replacement for a number input's value, or `None` to keep it.
pub fn normalize_number(value: &str) -> Option<&'static str> {
    if value.is_empty() || !has_numeric_prefix(value) {
        Some(ZERO)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_becomes_zero() {
        assert_eq!(normalize_number(""), Some("0"));
    }

    #[test]
    fn test_garbage_becomes_zero() {
        assert_eq!(normalize_number("abc"), Some("0"));
        assert_eq!(normalize_number("."), Some("0"));
        assert_eq!(normalize_number("-"), Some("0"));
        assert_eq!(normalize_number("   "), Some("0"));
    }

    #[test]
    fn test_numbers_are_kept() {
        for value in ["0", "12", "-3.5", "+7", ".25", "  42", "1e3", "Infinity", "-Infinity"] {
            assert_eq!(normalize_number(value), None, "{value}");
        }
    }

    #[test]
    fn test_numeric_prefix_is_enough() {
        assert_eq!(normalize_number("12abc"), None);
        assert!(has_numeric_prefix("3."));
    }
}
