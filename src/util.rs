//! Small default-returning helpers for non-cryptographic call sites.
//!
//! These are the only operations in the crate allowed to swallow a failure
//! into a caller-supplied default. Nothing on the encryption or archive
//! paths uses them.

/// Divides `a` by `b`, returning `default` when `b` is zero.
#[must_use]
pub fn safe_divide(a: f64, b: f64, default: f64) -> f64 {
    if b == 0.0 { default } else { a / b }
}

/// Clamps `value` into `[min, max]`.
#[must_use]
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Truncates `text` to at most `length` characters, appending `suffix` when
/// anything was cut.
#[must_use]
pub fn truncate(text: &str, length: usize, suffix: &str) -> String {
    if text.chars().count() <= length {
        return text.to_owned();
    }

    let mut truncated: String = text.chars().take(length).collect();
    truncated.push_str(suffix);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_divide() {
        assert_eq!(safe_divide(10.0, 4.0, 0.0), 2.5);
        assert_eq!(safe_divide(10.0, 0.0, -1.0), -1.0);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(15.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10, "..."), "hello");
        assert_eq!(truncate("hello world", 5, "..."), "hello...");
        assert_eq!(truncate("héllo", 3, "…"), "hél…");
    }
}
