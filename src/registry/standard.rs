//! The standard classification rule set.
//!
//! Builds, for a given numbering plan, the fixed rule order the audit
//! engine reproduces: reject disallowed characters first, accept short
//! codes unchanged, then the progressively more specific malformed
//! country-code/area-code/zero-marker shapes, and finally the terminal
//! catch-all. Every pattern is anchored over the whole stripped input and
//! composed from the plan's area-code alternations.

use crate::plan::NumberingPlan;
use crate::registry::{ClassificationRule, DigitExtractor, RegistryError};

/// Build the standard ordered rule list for `plan`.
///
/// The returned rules are meant to be fed straight into
/// [`Registry::new`](crate::registry::Registry::new); order is part of the
/// contract and must not be rearranged.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidPattern`] if a composed pattern fails to
/// compile, which only happens if the plan's alternations are malformed.
pub fn standard_rules(plan: &NumberingPlan) -> Result<Vec<ClassificationRule>, RegistryError> {
    let cc = regex::escape(plan.country_code());
    let ndc2 = plan.two_digit_alternation();
    let ndc3 = plan.three_digit_alternation();
    let shorts = plan.short_code_alternation();
    // A full significant-digit string: 2-digit NDC + 7-digit SBN, or
    // 3-digit NDC + 6-digit SBN.
    let number = format!("(?:{ndc2}[0-9]{{7}}|{ndc3}[0-9]{{6}})");

    let country = plan.country_code().to_string();

    Ok(vec![
        ClassificationRule::reject(
            "bad_chars",
            "containing characters different from 0-9, '-', '+', '(', ')', whitespace",
            r"[^+()0-9]",
        )?,
        ClassificationRule::unchanged(
            "short_code",
            "short service number, already canonical",
            &format!("^{shorts}$"),
        )?,
        ClassificationRule::fixable(
            "zeros_before_country_code",
            "wrongly starting with both '+' and zeros before the country code",
            &format!(r"^\+0+{cc}\(0\)0+{number}$"),
            DigitExtractor::PaddedCountryMarker {
                country_code: country.clone(),
            },
        )?,
        ClassificationRule::fixable(
            "zeros_inside_marker",
            "'+' and country code wrongly followed by zeros inside the '(0)' marker",
            &format!(r"^\+{cc}\(0\)0+{number}$"),
            DigitExtractor::PaddedCountryMarker {
                country_code: country.clone(),
            },
        )?,
        ClassificationRule::fixable(
            "zero_not_parenthesized",
            "wrongly not placing the zero in front of the area code in '()'",
            &format!(r"^\+{cc}0{number}$"),
            DigitExtractor::UnparenthesizedZero {
                country_code: country.clone(),
            },
        )?,
        ClassificationRule::fixable(
            "area2_in_parentheses",
            "wrongly placing the whole 2-digit area code in '()'",
            &format!(r"^\+{cc}\(0{ndc2}\)[0-9]{{7}}$"),
            DigitExtractor::ParenthesizedAreaCode {
                country_code: country.clone(),
            },
        )?,
        ClassificationRule::fixable(
            "area3_in_parentheses",
            "wrongly placing the whole 3-digit area code in '()'",
            &format!(r"^\+{cc}\(0{ndc3}\)[0-9]{{6}}$"),
            DigitExtractor::ParenthesizedAreaCode {
                country_code: country.clone(),
            },
        )?,
        ClassificationRule::fixable(
            "plus_country_code",
            "starting with '+', country code, optional '(0)', then the number",
            &format!(r"^\+{cc}(?:\(0\))?{number}$"),
            DigitExtractor::CountryPrefix {
                prefix: format!("+{country}"),
            },
        )?,
        ClassificationRule::fixable(
            "bare_country_code",
            "wrongly starting directly with the country code, missing the '+'",
            &format!(r"^{cc}(?:\(0\))?{number}$"),
            DigitExtractor::CountryPrefix {
                prefix: country.clone(),
            },
        )?,
        ClassificationRule::fixable(
            "idd_country_code",
            "starting with the international '00' prefix and the country code",
            &format!(r"^00{cc}(?:\(0\))?{number}$"),
            DigitExtractor::CountryPrefix {
                prefix: format!("00{country}"),
            },
        )?,
        ClassificationRule::fixable(
            "national_zero",
            "starting directly with the national zero and the area code",
            &format!(r"^0{number}$"),
            DigitExtractor::NationalZero,
        )?,
        ClassificationRule::fixable(
            "plus_area_code",
            "wrongly starting with '+' directly followed by the area code",
            &format!(r"^\+0*{number}$"),
            DigitExtractor::PlusArea,
        )?,
        ClassificationRule::catch_all(
            "unclassified",
            "unclassified (wrong number of digits, unexpected area code, unforeseen shape)",
        )?,
    ])
}
