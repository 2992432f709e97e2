//! Version string comparison and normalization
//!
//! This module provides:
//! - Numeric-segment-aware comparison of dotted version strings
//! - Normalization of on-disk version strings before comparison
//! - Mac machine-model identifier comparison

mod machine;

pub use machine::{is_newer_machine, MachineModel};

use std::cmp::Ordering;

/// Compare two dotted version strings.
///
/// Each dot-separated segment is compared as an integer when both sides
/// parse, and lexically otherwise. When the shared prefix is equal, the
/// string with more segments is the newer one ("12.6.5" > "12.6").
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a_segs: Vec<&str> = a.split('.').collect();
    let b_segs: Vec<&str> = b.split('.').collect();

    for (sa, sb) in a_segs.iter().zip(b_segs.iter()) {
        let ord = match (sa.parse::<u64>(), sb.parse::<u64>()) {
            (Ok(na), Ok(nb)) => na.cmp(&nb),
            _ => sa.cmp(sb),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }

    a_segs.len().cmp(&b_segs.len())
}

/// Normalize an on-disk version string before comparison.
///
/// Strips trailing control characters and truncates to at most 3
/// dot-separated segments. Without stripping trailing NULs, "11.4\0\0\0\0"
/// would be considered newer than "11.4"; without truncation, builds
/// embedding extra qualifiers would compare as spuriously newer. Only the
/// tail is stripped; an interior control character stays put rather than
/// fusing its neighbors into a different version.
pub fn normalize_version(version: &str) -> String {
    let cleaned = version.trim_end_matches(char::is_control);
    let segments: Vec<&str> = cleaned.split('.').collect();
    if segments.len() > 3 {
        segments[..3].join(".")
    } else {
        cleaned.to_string()
    }
}

/// Check whether version `a` is strictly newer than version `b`.
///
/// Both sides are normalized before comparison.
pub fn is_newer_version(a: &str, b: &str) -> bool {
    compare_versions(&normalize_version(a), &normalize_version(b)) == Ordering::Greater
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_equal() {
        assert_eq!(compare_versions("12.6.5", "12.6.5"), Ordering::Equal);
        assert_eq!(compare_versions("1.0", "1.0"), Ordering::Equal);
    }

    #[test]
    fn test_compare_numeric_segments() {
        assert_eq!(compare_versions("12.6", "12.7"), Ordering::Less);
        assert_eq!(compare_versions("13.0", "12.9"), Ordering::Greater);
    }

    #[test]
    fn test_compare_multi_digit_not_lexical() {
        // "12.10" > "12.9" numerically even though it sorts lower lexically
        assert_eq!(compare_versions("12.10", "12.9"), Ordering::Greater);
        assert_eq!(compare_versions("9.1.8", "9.1.10"), Ordering::Less);
    }

    #[test]
    fn test_compare_shorter_is_older() {
        assert_eq!(compare_versions("12.6", "12.6.5"), Ordering::Less);
        assert_eq!(compare_versions("12.6.5", "12.6"), Ordering::Greater);
    }

    #[test]
    fn test_compare_antisymmetric() {
        let pairs = [
            ("12.6.5", "12.6"),
            ("12.10", "12.9"),
            ("7.0.3", "7.0.4"),
            ("1700.67", "1700.68"),
        ];
        for (a, b) in pairs {
            assert_eq!(compare_versions(a, b), compare_versions(b, a).reverse());
        }
    }

    #[test]
    fn test_compare_non_numeric_falls_back_to_lexical() {
        assert_eq!(compare_versions("1.0a", "1.0b"), Ordering::Less);
        assert_eq!(compare_versions("1.beta", "1.alpha"), Ordering::Greater);
    }

    #[test]
    fn test_normalize_strips_trailing_nuls() {
        assert_eq!(normalize_version("11.4\0\0\0\0"), "11.4");
    }

    #[test]
    fn test_normalize_leaves_interior_controls_alone() {
        // Stripping is tail-only; "1<NUL>1.4" must not collapse to "11.4"
        assert_eq!(normalize_version("1\u{0}1.4"), "1\u{0}1.4");
        assert_eq!(normalize_version("1\u{0}1.4\0\0"), "1\u{0}1.4");
    }

    #[test]
    fn test_normalize_truncates_to_three_segments() {
        assert_eq!(normalize_version("12.9.5.1024"), "12.9.5");
        assert_eq!(normalize_version("12.9.5"), "12.9.5");
        assert_eq!(normalize_version("12.9"), "12.9");
    }

    #[test]
    fn test_normalize_idempotent() {
        for v in ["11.4\0\0", "12.9.5.1024", "9.6.1", "7.0"] {
            let once = normalize_version(v);
            assert_eq!(normalize_version(&once), once);
        }
    }

    #[test]
    fn test_is_newer_version() {
        assert!(is_newer_version("11.5", "11.4"));
        assert!(!is_newer_version("11.4", "11.4"));
        assert!(!is_newer_version("10.7", "11.4"));
    }

    #[test]
    fn test_is_newer_version_normalizes_both_sides() {
        // Padded NULs must not make an equal version look newer
        assert!(!is_newer_version("11.4\0\0\0\0", "11.4"));
        // Extra build qualifier segments are ignored
        assert!(!is_newer_version("12.9.5.57", "12.9.5"));
    }
}
