//! National numbering plan configuration.
//!
//! A [`NumberingPlan`] describes the single numbering plan the audit engine
//! is configured with: the international country code, the valid 2-digit and
//! 3-digit area codes (NDCs), and the short service codes that are exempt
//! from the area-code/subscriber-number grammar.
//!
//! Plans are constructed once at startup, validated eagerly, and read-only
//! thereafter. The engine ships with the Swiss E.164/2002 plan as a preset:
//!
//! ```rust
//! use phone_audit::plan::NumberingPlan;
//!
//! let plan = NumberingPlan::swiss();
//! assert_eq!(plan.country_code(), "41");
//! assert_eq!(plan.split_significant("441234567"), Some(("44", "1234567")));
//! ```

use rustc_hash::FxHashSet;

/// Swiss international dialing prefix.
const SWISS_COUNTRY_CODE: &str = "41";

/// Swiss 2-digit NDCs: Zurich (43, 44), enterprise (51, 58), mobile (74-79).
const SWISS_NDC2: &[&str] = &[
    "43", "44", "51", "58", "74", "75", "76", "77", "78", "79",
];

/// Swiss 3-digit NDCs: toll-free and premium service prefixes.
const SWISS_NDC3: &[&str] = &["800", "840", "842", "844", "848", "900", "901", "906"];

/// Swiss short service numbers (3-5 digits, all starting with 1), written as
/// digit-class fragments. Each fragment matches complete codes only; the
/// registry anchors the assembled alternation.
const SWISS_SHORT_CODES: &[&str] = &[
    "11[1-3]", "114[145]", "115[1-49]", "117", "118", "140", "1414", "1415", "143", "144", "145",
    "147", "1600", "16[1-4]", "171", "17[5-6]", "18[7-8]", "1811", "1818", "1850",
];

/// Characters permitted in a short-code pattern fragment.
const SHORT_CODE_PATTERN_CHARS: &str = "0123456789[]-";

/// Error type for numbering-plan validation failures.
///
/// All variants are configuration errors: they abort plan construction
/// before any audit call is possible.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The country code was empty or contained non-digit characters.
    #[error("invalid country code {0:?}: must be one or more ASCII digits")]
    InvalidCountryCode(String),

    /// An area code had the wrong length, a non-digit character, or a
    /// leading zero (the national zero is never part of the NDC itself).
    #[error("invalid {expected}-digit area code {code:?}")]
    InvalidAreaCode {
        /// The offending code.
        code: String,
        /// The length the set requires (2 or 3).
        expected: usize,
    },

    /// The same area code was listed twice within one set.
    #[error("duplicate area code {0:?}")]
    DuplicateAreaCode(String),

    /// A short-code pattern fragment was empty or used characters outside
    /// the digit-class subset (digits, `[`, `]`, `-`).
    #[error("invalid short-code pattern {0:?}")]
    InvalidShortCodePattern(String),
}

/// An immutable national numbering plan.
///
/// Holds the valid area-code sets and short-code patterns used to build the
/// classifier registry and to split extracted significant digits. The two
/// area-code sets are disjoint by construction: every member of one has a
/// length the other set's members cannot have.
#[derive(Debug, Clone)]
pub struct NumberingPlan {
    country_code: String,
    two_digit_area_codes: FxHashSet<String>,
    three_digit_area_codes: FxHashSet<String>,
    short_code_patterns: Vec<String>,
}

impl NumberingPlan {
    /// Create a validated numbering plan.
    ///
    /// # Errors
    ///
    /// Returns a [`PlanError`] if the country code is not a digit string, an
    /// area code has the wrong length / a non-digit / a leading zero, an
    /// area code is listed twice, or a short-code pattern uses characters
    /// outside the digit-class subset.
    pub fn new<S: AsRef<str>>(
        country_code: &str,
        two_digit_area_codes: &[S],
        three_digit_area_codes: &[S],
        short_code_patterns: &[S],
    ) -> Result<Self, PlanError> {
        if country_code.is_empty() || !country_code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PlanError::InvalidCountryCode(country_code.to_string()));
        }

        let two = Self::validated_codes(two_digit_area_codes, 2)?;
        let three = Self::validated_codes(three_digit_area_codes, 3)?;

        let mut shorts = Vec::with_capacity(short_code_patterns.len());
        for pattern in short_code_patterns {
            let pattern = pattern.as_ref();
            if pattern.is_empty() || !pattern.chars().all(|c| SHORT_CODE_PATTERN_CHARS.contains(c))
            {
                return Err(PlanError::InvalidShortCodePattern(pattern.to_string()));
            }
            shorts.push(pattern.to_string());
        }

        Ok(NumberingPlan {
            country_code: country_code.to_string(),
            two_digit_area_codes: two,
            three_digit_area_codes: three,
            short_code_patterns: shorts,
        })
    }

    /// The Swiss E.164/2002 numbering plan.
    ///
    /// Covers the Zurich, enterprise and mobile 2-digit NDCs, the service
    /// 3-digit NDCs, and the national short numbers (114, 1818, ...).
    pub fn swiss() -> Self {
        Self::new(
            SWISS_COUNTRY_CODE,
            SWISS_NDC2,
            SWISS_NDC3,
            SWISS_SHORT_CODES,
        )
        .expect("swiss plan constants are valid")
    }

    fn validated_codes<S: AsRef<str>>(
        codes: &[S],
        expected: usize,
    ) -> Result<FxHashSet<String>, PlanError> {
        let mut set = FxHashSet::default();
        for code in codes {
            let code = code.as_ref();
            if code.len() != expected
                || !code.bytes().all(|b| b.is_ascii_digit())
                || code.starts_with('0')
            {
                return Err(PlanError::InvalidAreaCode {
                    code: code.to_string(),
                    expected,
                });
            }
            if !set.insert(code.to_string()) {
                return Err(PlanError::DuplicateAreaCode(code.to_string()));
            }
        }
        Ok(set)
    }

    /// The international dialing prefix digits (e.g. `"41"`).
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Membership test for the 2-digit area-code set.
    pub fn is_two_digit_area_code(&self, code: &str) -> bool {
        self.two_digit_area_codes.contains(code)
    }

    /// Membership test for the 3-digit area-code set.
    pub fn is_three_digit_area_code(&self, code: &str) -> bool {
        self.three_digit_area_codes.contains(code)
    }

    /// The short-code pattern fragments, in configuration order.
    pub fn short_code_patterns(&self) -> &[String] {
        &self.short_code_patterns
    }

    /// Regex alternation of all 2-digit area codes, e.g. `(43|44|...)`.
    pub fn two_digit_alternation(&self) -> String {
        Self::alternation(&self.two_digit_area_codes)
    }

    /// Regex alternation of all 3-digit area codes, e.g. `(800|840|...)`.
    pub fn three_digit_alternation(&self) -> String {
        Self::alternation(&self.three_digit_area_codes)
    }

    /// Regex alternation of the short-code patterns, in configuration order.
    pub fn short_code_alternation(&self) -> String {
        format!("({})", self.short_code_patterns.join("|"))
    }

    fn alternation(codes: &FxHashSet<String>) -> String {
        // Sorted for a deterministic pattern; order is irrelevant for
        // matching fixed-length literals.
        let mut sorted: Vec<&str> = codes.iter().map(String::as_str).collect();
        sorted.sort_unstable();
        format!("({})", sorted.join("|"))
    }

    /// Split a 9-digit significant-digit string into `(area code,
    /// subscriber number)`.
    ///
    /// Tries the 2-digit area-code split (2 + 7) first, then the 3-digit
    /// split (3 + 6). Returns `None` if the input is not exactly nine ASCII
    /// digits or neither prefix is a valid area code.
    pub fn split_significant<'a>(&self, digits: &'a str) -> Option<(&'a str, &'a str)> {
        if digits.len() != 9 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let (ndc2, sbn7) = digits.split_at(2);
        if self.two_digit_area_codes.contains(ndc2) {
            return Some((ndc2, sbn7));
        }
        let (ndc3, sbn6) = digits.split_at(3);
        if self.three_digit_area_codes.contains(ndc3) {
            return Some((ndc3, sbn6));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swiss_plan_basics() {
        let plan = NumberingPlan::swiss();
        assert_eq!(plan.country_code(), "41");
        assert!(plan.is_two_digit_area_code("44"));
        assert!(plan.is_three_digit_area_code("800"));
        assert!(!plan.is_two_digit_area_code("12"));
        assert!(!plan.is_three_digit_area_code("44"));
    }

    #[test]
    fn test_split_significant_prefers_two_digit() {
        let plan = NumberingPlan::swiss();
        assert_eq!(plan.split_significant("441234567"), Some(("44", "1234567")));
        assert_eq!(plan.split_significant("800123456"), Some(("800", "123456")));
    }

    #[test]
    fn test_split_significant_rejects_bad_input() {
        let plan = NumberingPlan::swiss();
        // Unknown area code
        assert_eq!(plan.split_significant("121234567"), None);
        // Wrong length
        assert_eq!(plan.split_significant("44123456"), None);
        assert_eq!(plan.split_significant("4412345678"), None);
        // Non-digits
        assert_eq!(plan.split_significant("44a234567"), None);
        assert_eq!(plan.split_significant(""), None);
    }

    #[test]
    fn test_invalid_country_code() {
        let err = NumberingPlan::new("4a", &["44"], &["800"], &["117"]).unwrap_err();
        assert_eq!(err, PlanError::InvalidCountryCode("4a".to_string()));
    }

    #[test]
    fn test_area_code_length_enforced() {
        let err = NumberingPlan::new("41", &["444"], &["800"], &["117"]).unwrap_err();
        assert_eq!(
            err,
            PlanError::InvalidAreaCode {
                code: "444".to_string(),
                expected: 2,
            }
        );
    }

    #[test]
    fn test_area_code_leading_zero_rejected() {
        let err = NumberingPlan::new("41", &["04"], &["800"], &["117"]).unwrap_err();
        assert!(matches!(err, PlanError::InvalidAreaCode { .. }));
    }

    #[test]
    fn test_duplicate_area_code_rejected() {
        let err = NumberingPlan::new("41", &["44", "44"], &["800"], &["117"]).unwrap_err();
        assert_eq!(err, PlanError::DuplicateAreaCode("44".to_string()));
    }

    #[test]
    fn test_invalid_short_code_pattern() {
        let err = NumberingPlan::new("41", &["44"], &["800"], &["11+"]).unwrap_err();
        assert_eq!(err, PlanError::InvalidShortCodePattern("11+".to_string()));
    }

    #[test]
    fn test_alternations_are_deterministic() {
        let plan = NumberingPlan::swiss();
        assert_eq!(plan.two_digit_alternation(), plan.two_digit_alternation());
        assert!(plan.two_digit_alternation().starts_with("(43|44|"));
        assert_eq!(
            plan.three_digit_alternation(),
            "(800|840|842|844|848|900|901|906)"
        );
        assert!(plan.short_code_alternation().starts_with("(11[1-3]|"));
    }
}
