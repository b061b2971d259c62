//! Prefix/suffix pattern matching.

use std::fmt;

/// Result of a pattern match operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Full match found
    Match,
    /// No match
    NoMatch,
}

impl MatchResult {
    #[inline]
    pub fn is_match(self) -> bool {
        matches!(self, MatchResult::Match)
    }
}

/// Tests `address_hex` against an optional prefix and suffix.
///
/// Matching is case-sensitive; an empty prefix or suffix is the same as none.
#[inline]
pub fn matches(address_hex: &str, prefix: Option<&str>, suffix: Option<&str>) -> bool {
    prefix.map_or(true, |p| address_hex.starts_with(p))
        && suffix.map_or(true, |s| address_hex.ends_with(s))
}

/// A normalized prefix/suffix pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    prefix: Option<String>,
    suffix: Option<String>,
}

impl Pattern {
    /// Creates a new pattern. Empty strings are dropped; nothing else is normalized.
    pub fn new(prefix: Option<String>, suffix: Option<String>) -> Self {
        Self {
            prefix: prefix.filter(|p| !p.is_empty()),
            suffix: suffix.filter(|s| !s.is_empty()),
        }
    }

    /// Returns the prefix, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Returns the suffix, if any.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// True when neither a prefix nor a suffix is set; every address matches.
    pub fn is_empty(&self) -> bool {
        self.prefix.is_none() && self.suffix.is_none()
    }

    /// Number of hex characters constrained by this pattern.
    pub fn match_length(&self) -> usize {
        self.prefix.as_ref().map_or(0, String::len) + self.suffix.as_ref().map_or(0, String::len)
    }

    /// Matches a lowercase hex address (no 0x prefix) against this pattern.
    #[inline]
    pub fn matches(&self, address_hex: &str) -> MatchResult {
        if matches(address_hex, self.prefix(), self.suffix()) {
            MatchResult::Match
        } else {
            MatchResult::NoMatch
        }
    }

    /// Returns the expected number of attempts per match (16^n).
    pub fn estimated_difficulty(&self) -> f64 {
        16f64.powi(self.match_length() as i32)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.prefix(), self.suffix()) {
            (None, None) => write!(f, "<any>"),
            (Some(p), None) => write!(f, "0x{}...", p),
            (None, Some(s)) => write!(f, "0x...{}", s),
            (Some(p), Some(s)) => write!(f, "0x{}...{}", p, s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "deadbeef000000000000000000000000000000000000000000000000cafebabe";

    fn pattern(prefix: &str, suffix: &str) -> Pattern {
        Pattern::new(Some(prefix.into()), Some(suffix.into()))
    }

    #[test]
    fn test_prefix_match() {
        assert!(pattern("dead", "").matches(ADDR).is_match());
        assert!(!pattern("beef", "").matches(ADDR).is_match());
    }

    #[test]
    fn test_suffix_match() {
        assert!(pattern("", "babe").matches(ADDR).is_match());
        assert!(!pattern("", "cafe").matches(ADDR).is_match());
    }

    #[test]
    fn test_prefix_and_suffix_both_required() {
        assert!(pattern("dead", "babe").matches(ADDR).is_match());
        assert!(!pattern("dead", "cafe").matches(ADDR).is_match());
        assert!(!pattern("beef", "babe").matches(ADDR).is_match());
    }

    #[test]
    fn test_absent_pattern_always_matches() {
        assert!(matches(ADDR, None, None));
        assert!(matches("", None, None));
        assert!(Pattern::default().matches(ADDR).is_match());
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let p = pattern("", "");
        assert!(p.is_empty());
        assert_eq!(p.prefix(), None);
        assert_eq!(p.suffix(), None);
        assert!(matches(ADDR, Some(""), Some("")));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!matches(ADDR, Some("DEAD"), None));
    }

    #[test]
    fn test_match_length_and_difficulty() {
        let p = pattern("dead", "be");
        assert_eq!(p.match_length(), 6);
        assert_eq!(p.estimated_difficulty(), 16_777_216.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(pattern("ab", "").to_string(), "0xab...");
        assert_eq!(pattern("ab", "cd").to_string(), "0xab...cd");
        assert_eq!(Pattern::default().to_string(), "<any>");
    }
}
