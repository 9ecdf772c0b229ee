//! The classifier registry: an ordered, immutable set of classification
//! rules.
//!
//! Each [`ClassificationRule`] pairs a detection pattern (tested against the
//! whitespace/dash-stripped input) with a [`Disposition`] and, for fixable
//! shapes, a [`DigitExtractor`]. Registry order is significant and fixed:
//! the first matching rule wins, and the last rule is a catch-all that
//! matches every possible input, so classification always produces exactly
//! one winner.
//!
//! Registries are configuration data, not services: they are built once at
//! startup, validated eagerly, and read-only thereafter.

mod extract;
mod standard;

pub use extract::DigitExtractor;
pub use standard::standard_rules;

use regex::Regex;

/// The classification outcome assigned to an audited number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Disposition {
    /// The input is structurally invalid (e.g. disallowed characters) and
    /// must be inspected and corrected manually. Never rewritten.
    Reject,

    /// The input is a recognized short code already in canonical form.
    /// Never rewritten.
    Unchanged,

    /// The input is numerically valid and can be rewritten into the
    /// canonical textual form.
    Fixable,

    /// No specific rule recognized the shape. The number may or may not be
    /// valid; it is flagged for manual review and never auto-corrected.
    Unclassified,
}

impl Disposition {
    /// Get a stable lowercase name for this disposition.
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Reject => "reject",
            Disposition::Unchanged => "unchanged",
            Disposition::Fixable => "fixable",
            Disposition::Unclassified => "unclassified",
        }
    }

    /// Whether a result with this disposition needs manual review
    /// (rejected or unclassified inputs, which are never auto-corrected).
    pub fn needs_review(&self) -> bool {
        matches!(self, Disposition::Reject | Disposition::Unclassified)
    }
}

impl std::fmt::Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Disposition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The historical audit scripts labeled these actions 'reject',
        // 'none', 'fix' and 'inspect'; accept both vocabularies.
        match s.to_lowercase().as_str() {
            "reject" => Ok(Disposition::Reject),
            "unchanged" | "none" => Ok(Disposition::Unchanged),
            "fixable" | "fix" => Ok(Disposition::Fixable),
            "unclassified" | "inspect" => Ok(Disposition::Unclassified),
            _ => Err(format!(
                "Unknown disposition: {}. Valid options: reject, unchanged, fixable, unclassified",
                s
            )),
        }
    }
}

/// Error type for registry validation failures.
///
/// All variants are configuration errors detected at construction time;
/// a registry that constructs successfully upholds the invariants the audit
/// engine relies on.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A rule's detection pattern failed to compile.
    #[error("invalid pattern for rule {id:?}")]
    InvalidPattern {
        /// The rule carrying the pattern.
        id: &'static str,
        /// The underlying regex error.
        #[source]
        source: Box<regex::Error>,
    },

    /// Two rules share the same id.
    #[error("duplicate rule id {0:?}")]
    DuplicateRuleId(&'static str),

    /// No rule carries the `Unclassified` catch-all disposition.
    #[error("registry has no catch-all rule; every input must classify")]
    MissingCatchAll,

    /// A catch-all rule appears before the end of the registry, where it
    /// would shadow every rule after it.
    #[error("catch-all rule {0:?} must be the last rule in the registry")]
    CatchAllNotLast(&'static str),

    /// The final catch-all rule does not match every input.
    #[error("catch-all rule {0:?} must match every possible input")]
    CatchAllNotTotal(&'static str),

    /// A `Fixable` rule has no digit extractor.
    #[error("fixable rule {0:?} has no digit extractor")]
    MissingExtractor(&'static str),

    /// A non-`Fixable` rule carries a digit extractor it can never use.
    #[error("rule {0:?} is not fixable but carries a digit extractor")]
    UnexpectedExtractor(&'static str),
}

/// One ordered member of the classifier registry.
///
/// A rule recognizes one malformed (or already-canonical) shape of phone
/// number. Its pattern is tested against the stripped working copy of the
/// input, never the raw input.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    id: &'static str,
    description: &'static str,
    pattern: Regex,
    disposition: Disposition,
    extractor: Option<DigitExtractor>,
}

impl ClassificationRule {
    /// Create a rule with an explicit disposition and optional extractor.
    ///
    /// Prefer the shape-specific constructors ([`reject`](Self::reject),
    /// [`unchanged`](Self::unchanged), [`fixable`](Self::fixable),
    /// [`catch_all`](Self::catch_all)); they cannot produce a
    /// disposition/extractor mismatch.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidPattern`] if `pattern` does not
    /// compile.
    pub fn new(
        id: &'static str,
        description: &'static str,
        pattern: &str,
        disposition: Disposition,
        extractor: Option<DigitExtractor>,
    ) -> Result<Self, RegistryError> {
        let pattern = Regex::new(pattern).map_err(|source| RegistryError::InvalidPattern {
            id,
            source: Box::new(source),
        })?;
        Ok(ClassificationRule {
            id,
            description,
            pattern,
            disposition,
            extractor,
        })
    }

    /// Create a `Reject` rule.
    pub fn reject(
        id: &'static str,
        description: &'static str,
        pattern: &str,
    ) -> Result<Self, RegistryError> {
        Self::new(id, description, pattern, Disposition::Reject, None)
    }

    /// Create an `Unchanged` rule.
    pub fn unchanged(
        id: &'static str,
        description: &'static str,
        pattern: &str,
    ) -> Result<Self, RegistryError> {
        Self::new(id, description, pattern, Disposition::Unchanged, None)
    }

    /// Create a `Fixable` rule with its digit extractor.
    pub fn fixable(
        id: &'static str,
        description: &'static str,
        pattern: &str,
        extractor: DigitExtractor,
    ) -> Result<Self, RegistryError> {
        Self::new(id, description, pattern, Disposition::Fixable, Some(extractor))
    }

    /// Create the terminal catch-all rule (matches everything, disposition
    /// `Unclassified`).
    pub fn catch_all(id: &'static str, description: &'static str) -> Result<Self, RegistryError> {
        Self::new(id, description, ".*", Disposition::Unclassified, None)
    }

    /// The rule's stable identifier, unique across the registry.
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Human-readable explanation of the shape this rule recognizes.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// The disposition applied when this rule wins.
    pub fn disposition(&self) -> Disposition {
        self.disposition
    }

    /// The digit extractor, present exactly when the rule is `Fixable`.
    pub fn extractor(&self) -> Option<&DigitExtractor> {
        self.extractor.as_ref()
    }

    /// Test the detection pattern against a stripped working copy.
    pub fn matches(&self, stripped: &str) -> bool {
        self.pattern.is_match(stripped)
    }
}

/// The ordered, immutable classifier registry.
///
/// Construction validates the invariants the audit engine depends on:
/// unique rule ids, exactly one catch-all rule in the final position, and
/// extractors present on exactly the `Fixable` rules.
#[derive(Debug, Clone)]
pub struct Registry {
    rules: Vec<ClassificationRule>,
}

impl Registry {
    /// Build a registry from an ordered rule list.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] on any invariant violation: duplicate
    /// ids, missing or misplaced catch-all, a catch-all that cannot match
    /// every input, or a disposition/extractor mismatch.
    pub fn new(rules: Vec<ClassificationRule>) -> Result<Self, RegistryError> {
        let mut seen = rustc_hash::FxHashSet::default();
        for rule in &rules {
            if !seen.insert(rule.id) {
                return Err(RegistryError::DuplicateRuleId(rule.id));
            }
            match (rule.disposition, &rule.extractor) {
                (Disposition::Fixable, None) => {
                    return Err(RegistryError::MissingExtractor(rule.id));
                }
                (Disposition::Fixable, Some(_)) => {}
                (_, Some(_)) => {
                    return Err(RegistryError::UnexpectedExtractor(rule.id));
                }
                (_, None) => {}
            }
        }

        // Exactly one catch-all, in the terminal position. A rule after it
        // would be unreachable.
        let last = rules.last().ok_or(RegistryError::MissingCatchAll)?;
        for rule in &rules[..rules.len() - 1] {
            if rule.disposition == Disposition::Unclassified {
                return Err(RegistryError::CatchAllNotLast(rule.id));
            }
        }
        if last.disposition != Disposition::Unclassified {
            return Err(RegistryError::MissingCatchAll);
        }
        // "Matches everything" is undecidable for an arbitrary pattern;
        // matching the empty string is the conservative necessary condition.
        if !last.matches("") {
            return Err(RegistryError::CatchAllNotTotal(last.id));
        }

        Ok(Registry { rules })
    }

    /// The rules, in classification order.
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Number of rules, including the catch-all.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// A validated registry always holds at least the catch-all.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Look up a rule by id.
    pub fn rule(&self, id: &str) -> Option<&ClassificationRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// First-match scan over the registry.
    ///
    /// Returns `None` only if the terminal catch-all failed to match, which
    /// a validated registry rules out; the engine treats that case as a
    /// fatal consistency error rather than a normal outcome.
    pub fn classify(&self, stripped: &str) -> Option<&ClassificationRule> {
        self.rules.iter().find(|rule| rule.matches(stripped))
    }
}
