//! Digit extractors for fixable rules.
//!
//! Every `Fixable` classification rule names one malformed shape; its
//! extractor is the pure inverse of that shape. Each variant strips exactly
//! the spurious characters the rule's description names and returns the bare
//! significant digits (area code + subscriber number, no separators).
//!
//! The extractors are a tagged-variant dispatch over fixed, known
//! transformations; there is no runtime expression evaluation anywhere in
//! the pipeline. An extractor returning `None` means the rule's pattern and
//! its extractor disagree, which the audit engine surfaces as a fatal
//! internal-consistency error.

/// Expected length of a significant-digit string (area code + subscriber).
const SIGNIFICANT_DIGITS: usize = 9;

/// A pure digit-extraction rule for one malformed number shape.
///
/// All extractors operate on the whitespace/dash-stripped working copy of
/// the input, the same string the rule's detection pattern matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigitExtractor {
    /// Strip a `+`, any zero padding before the country code, the country
    /// code itself, and an optional zero-padded `(0)` marker.
    ///
    /// Inverts shapes like `+041(0)0441234567`.
    PaddedCountryMarker {
        /// The plan's country code digits.
        country_code: String,
    },

    /// Strip a `+`, the country code, and a bare national zero that should
    /// have been parenthesized.
    ///
    /// Inverts shapes like `+410441234567`.
    UnparenthesizedZero {
        /// The plan's country code digits.
        country_code: String,
    },

    /// Strip a `+`, the country code, and the parentheses mistakenly
    /// wrapped around the national zero *and* the whole area code.
    ///
    /// Inverts shapes like `+41(044)1234567`.
    ParenthesizedAreaCode {
        /// The plan's country code digits.
        country_code: String,
    },

    /// Strip a fixed literal prefix (e.g. `+41`, `41` or `0041`) and an
    /// optional well-formed `(0)` marker.
    ///
    /// Inverts shapes like `+41(0)441234567`, `41441234567` or
    /// `0041441234567`.
    CountryPrefix {
        /// The literal prefix to remove.
        prefix: String,
    },

    /// Strip the leading national zero of a bare national number.
    ///
    /// Inverts shapes like `0441234567`.
    NationalZero,

    /// Strip a `+` (and any stray zeros) placed directly before the area
    /// code with no country code at all.
    ///
    /// Inverts shapes like `+441234567` or `+0441234567`.
    PlusArea,
}

impl DigitExtractor {
    /// Extract the bare significant digits from a stripped working copy.
    ///
    /// Returns `None` when the input does not have the shape this extractor
    /// inverts, or when the remainder is not exactly nine digits. On a
    /// validated registry this only happens if a rule's pattern and
    /// extractor disagree.
    pub fn extract(&self, stripped: &str) -> Option<String> {
        let digits = match self {
            DigitExtractor::PaddedCountryMarker { country_code } => {
                let rest = stripped.strip_prefix('+')?;
                let rest = rest.trim_start_matches('0');
                let rest = rest.strip_prefix(country_code.as_str())?;
                match rest.strip_prefix("(0)") {
                    // Area codes never start with 0, so the zero run after
                    // the marker is all padding.
                    Some(after_marker) => after_marker.trim_start_matches('0'),
                    None => rest,
                }
            }
            DigitExtractor::UnparenthesizedZero { country_code } => stripped
                .strip_prefix('+')?
                .strip_prefix(country_code.as_str())?
                .strip_prefix('0')?,
            DigitExtractor::ParenthesizedAreaCode { country_code } => {
                let rest = stripped
                    .strip_prefix('+')?
                    .strip_prefix(country_code.as_str())?
                    .strip_prefix("(0")?;
                let (area, subscriber) = rest.split_once(')')?;
                return Self::validated(format!("{}{}", area, subscriber));
            }
            DigitExtractor::CountryPrefix { prefix } => {
                let rest = stripped.strip_prefix(prefix.as_str())?;
                rest.strip_prefix("(0)").unwrap_or(rest)
            }
            DigitExtractor::NationalZero => stripped.strip_prefix('0')?,
            DigitExtractor::PlusArea => stripped.strip_prefix('+')?.trim_start_matches('0'),
        };
        Self::validated(digits.to_string())
    }

    fn validated(digits: String) -> Option<String> {
        if digits.len() == SIGNIFICANT_DIGITS && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(digits)
        } else {
            None
        }
    }
}
