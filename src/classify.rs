//! Severity buckets and the small coercions applied before display.
//!
//! Everything here is pure; the same helpers are shared by the renderer so
//! that a value and its bucket never disagree.

use std::fmt;

use serde_json::Value;

/// Classification bucket for an importance or score value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Stable lowercase name, usable as a styling hook.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a numeric value: >= 8 is high, >= 4 is medium, everything else is
/// low. Total over all floats; NaN falls through to low, nothing is clamped.
pub fn classify(value: f64) -> Severity {
    if value >= 8.0 {
        Severity::High
    } else if value >= 4.0 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Coerce a JSON value to a number, falling back when it is absent or
/// non-numeric. Numeric strings count as numbers.
pub fn number_or(value: Option<&Value>, fallback: f64) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(fallback),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(fallback),
        _ => fallback,
    }
}

/// Length of a JSON array; anything else counts as zero.
pub fn sequence_len(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Array(items)) => items.len(),
        _ => 0,
    }
}

/// Format a number without a trailing `.0` on integral values.
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
    use serde_json::json;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(classify(8.0), Severity::High);
        assert_eq!(classify(10.0), Severity::High);
        assert_eq!(classify(7.999), Severity::Medium);
        assert_eq!(classify(4.0), Severity::Medium);
        assert_eq!(classify(3.999), Severity::Low);
        assert_eq!(classify(0.0), Severity::Low);
    }

    #[test]
    fn test_classify_total_over_wide_range() {
        // Sweep well past the conventional [0, 10] range in both directions.
        let mut v = -1000.0_f64;
        while v <= 1000.0 {
            let got = classify(v);
            if v >= 8.0 {
                assert_eq!(got, Severity::High, "v = {v}");
            } else if v >= 4.0 {
                assert_eq!(got, Severity::Medium, "v = {v}");
            } else {
                assert_eq!(got, Severity::Low, "v = {v}");
            }
            v += 0.37;
        }
    }

    #[test]
    fn test_classify_non_finite() {
        assert_eq!(classify(f64::NAN), Severity::Low);
        assert_eq!(classify(f64::INFINITY), Severity::High);
        assert_eq!(classify(f64::NEG_INFINITY), Severity::Low);
    }

    #[test]
    fn test_number_or_coercions() {
        assert_eq!(number_or(Some(&json!(7)), 5.0), 7.0);
        assert_eq!(number_or(Some(&json!(9.5)), 5.0), 9.5);
        assert_eq!(number_or(Some(&json!("6.5")), 5.0), 6.5);
        assert_eq!(number_or(Some(&json!("not a number")), 5.0), 5.0);
        assert_eq!(number_or(Some(&json!(null)), 5.0), 5.0);
        assert_eq!(number_or(Some(&json!([1])), 5.0), 5.0);
        assert_eq!(number_or(None, 5.0), 5.0);
    }

    #[test]
    fn test_sequence_len_fallback() {
        assert_eq!(sequence_len(Some(&json!(["a", "b"]))), 2);
        assert_eq!(sequence_len(Some(&json!([]))), 0);
        assert_eq!(sequence_len(Some(&json!("a"))), 0);
        assert_eq!(sequence_len(None), 0);
    }

    #[test]
    fn test_format_number_drops_integral_fraction() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(9.5), "9.5");
        assert_eq!(format_number(-3.0), "-3");
    }
}
