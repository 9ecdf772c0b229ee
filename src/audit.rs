//! The audit engine: classify and, where safe, normalize a single
//! phone-number string.
//!
//! [`Auditor::audit`] is a pure, synchronous function of its input and the
//! static plan/registry: no I/O, no shared mutable state, no locks. A single
//! [`Auditor`] may be shared across threads and audited against
//! concurrently without coordination.
//!
//! ```rust
//! use phone_audit::prelude::*;
//!
//! let auditor = Auditor::swiss();
//! let result = auditor.audit("0041 44 1234567").unwrap();
//! assert_eq!(result.disposition, Disposition::Fixable);
//! assert_eq!(result.normalized_output, "+41 (0)44 123 45 67");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::plan::NumberingPlan;
use crate::registry::{standard_rules, Disposition, Registry, RegistryError};

/// Pattern for the formatting noise removed before matching: spaces and
/// dashes.
static STRIP_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[-\s]+").expect("strip pattern is valid")
});

/// Error type for fatal audit-time consistency failures.
///
/// These are programmer errors (a registry whose patterns and extractors
/// disagree), never normal audit outcomes: rejected and unclassifiable
/// inputs are [`Disposition`]s, not errors. A driver hitting one of these
/// must halt processing of the record loudly rather than emit a guessed
/// result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuditError {
    /// No rule matched, i.e. the terminal catch-all failed. Impossible on a
    /// validated registry.
    #[error("no classifier matched input {input:?}; the registry lost its catch-all")]
    NoRuleMatched {
        /// The raw input that fell through.
        input: String,
    },

    /// A fixable rule matched but its extractor could not invert the shape.
    #[error("rule {rule_id:?} matched {input:?} but its digit extractor could not decompose it")]
    DigitExtractionFailed {
        /// The rule whose pattern and extractor disagree.
        rule_id: &'static str,
        /// The raw input being audited.
        input: String,
    },

    /// Extracted digits admit neither the 2-digit nor the 3-digit
    /// area-code split.
    #[error("rule {rule_id:?} extracted digits {digits:?} with no valid area-code split")]
    InvalidSignificantDigits {
        /// The rule that extracted the digits.
        rule_id: &'static str,
        /// The significant-digit string that failed to split.
        digits: String,
    },
}

/// The outcome of auditing one phone-number string.
///
/// Owned by the caller; the engine never retains results. For any
/// disposition other than [`Disposition::Fixable`], `normalized_output` is
/// the original input unchanged (the stripped working copy is internal to
/// matching and never returned).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub struct AuditResult {
    /// The raw input exactly as supplied.
    pub original_input: String,
    /// The canonical rendering for fixable numbers; the original input
    /// otherwise.
    pub normalized_output: String,
    /// The classification outcome.
    pub disposition: Disposition,
    /// Id of the rule that won the first-match scan.
    pub rule_id: &'static str,
    /// Description of the winning rule.
    pub rule_description: &'static str,
}

impl AuditResult {
    /// Whether the audit produced a rewritten canonical form.
    pub fn was_rewritten(&self) -> bool {
        self.disposition == Disposition::Fixable
    }
}

/// The audit engine: a numbering plan plus its classifier registry.
#[derive(Debug, Clone)]
pub struct Auditor {
    plan: NumberingPlan,
    registry: Registry,
}

impl Auditor {
    /// Create an auditor with the standard rule set for `plan`.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if the standard rules cannot be built
    /// for this plan.
    pub fn new(plan: NumberingPlan) -> Result<Self, RegistryError> {
        let registry = Registry::new(standard_rules(&plan)?)?;
        Ok(Auditor { plan, registry })
    }

    /// Create an auditor with an explicit registry.
    ///
    /// The registry must have been validated via
    /// [`Registry::new`](crate::registry::Registry::new); its fixable rules
    /// are expected to extract digits the plan can split.
    pub fn with_registry(plan: NumberingPlan, registry: Registry) -> Self {
        Auditor { plan, registry }
    }

    /// The standard Swiss auditor.
    pub fn swiss() -> Self {
        Self::new(NumberingPlan::swiss()).expect("standard swiss registry is valid")
    }

    /// The numbering plan this auditor is configured with.
    pub fn plan(&self) -> &NumberingPlan {
        &self.plan
    }

    /// The classifier registry, in classification order.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Audit one raw phone-number string.
    ///
    /// Produces a working copy with all spaces and dashes removed, scans
    /// the registry in order, and applies the first matching rule's
    /// disposition. Every input resolves to exactly one result — the empty
    /// string and arbitrary garbage fall to the catch-all as
    /// [`Disposition::Unclassified`].
    ///
    /// # Errors
    ///
    /// Returns an [`AuditError`] only on internal consistency failures
    /// (see [`AuditError`]); all normal outcomes, including rejected and
    /// unclassifiable inputs, are dispositions in the `Ok` result.
    pub fn audit(&self, raw: &str) -> Result<AuditResult, AuditError> {
        let stripped = STRIP_PATTERN.replace_all(raw, "");

        let rule = self
            .registry
            .classify(&stripped)
            .ok_or_else(|| AuditError::NoRuleMatched {
                input: raw.to_string(),
            })?;

        let normalized_output = match rule.disposition() {
            Disposition::Fixable => {
                let digits = rule
                    .extractor()
                    .and_then(|extractor| extractor.extract(&stripped))
                    .ok_or_else(|| AuditError::DigitExtractionFailed {
                        rule_id: rule.id(),
                        input: raw.to_string(),
                    })?;
                let (area_code, subscriber) =
                    self.plan.split_significant(&digits).ok_or_else(|| {
                        AuditError::InvalidSignificantDigits {
                            rule_id: rule.id(),
                            digits: digits.clone(),
                        }
                    })?;
                self.render_canonical(area_code, subscriber)
            }
            // Reject, Unchanged, Unclassified: the original input is
            // returned untouched.
            _ => raw.to_string(),
        };

        Ok(AuditResult {
            original_input: raw.to_string(),
            normalized_output,
            disposition: rule.disposition(),
            rule_id: rule.id(),
            rule_description: rule.description(),
        })
    }

    /// Render the canonical textual form for a valid area-code/subscriber
    /// split: `+CC (0)AA SSS SS SS` for 2-digit area codes,
    /// `+CC (0)AAA SSS SSS` for 3-digit ones.
    fn render_canonical(&self, area_code: &str, subscriber: &str) -> String {
        let cc = self.plan.country_code();
        if area_code.len() == 2 {
            format!(
                "+{} (0){} {} {} {}",
                cc,
                area_code,
                &subscriber[0..3],
                &subscriber[3..5],
                &subscriber[5..7]
            )
        } else {
            format!(
                "+{} (0){} {} {}",
                cc,
                area_code,
                &subscriber[0..3],
                &subscriber[3..6]
            )
        }
    }
}
