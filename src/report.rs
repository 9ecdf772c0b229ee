//! Driver-owned aggregation of audit results.
//!
//! The engine never retains results; batch drivers that want grouped
//! reporting feed every [`AuditResult`] into an [`AuditReport`] they own.
//! This is an explicit aggregation structure passed in and out by the
//! driver — there are no process-wide counters anywhere in the crate.

use std::collections::HashMap;
use std::fmt;

use crate::audit::AuditResult;
use crate::registry::Disposition;

/// One original/normalized pair recorded for a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub struct AuditEntry {
    /// The raw input as audited.
    pub original: String,
    /// The normalized output (equal to `original` unless the rule was
    /// fixable).
    pub normalized: String,
}

/// All results that matched one classification rule.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub struct RuleGroup {
    /// The winning rule's id.
    pub rule_id: &'static str,
    /// The winning rule's description.
    pub description: &'static str,
    /// The rule's disposition.
    pub disposition: Disposition,
    /// The recorded pairs, in audit order.
    pub entries: Vec<AuditEntry>,
}

/// Grouped audit results, keyed by the rule that matched.
///
/// Groups appear in first-seen order, so a report over a stable input
/// sequence renders identically every time.
#[derive(Debug, Clone, Default)]
pub struct AuditReport {
    order: Vec<&'static str>,
    groups: HashMap<&'static str, RuleGroup>,
}

impl AuditReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one audit result.
    pub fn record(&mut self, result: &AuditResult) {
        let order = &mut self.order;
        let group = self.groups.entry(result.rule_id).or_insert_with(|| {
            order.push(result.rule_id);
            RuleGroup {
                rule_id: result.rule_id,
                description: result.rule_description,
                disposition: result.disposition,
                entries: Vec::new(),
            }
        });
        group.entries.push(AuditEntry {
            original: result.original_input.clone(),
            normalized: result.normalized_output.clone(),
        });
    }

    /// Total number of recorded results.
    pub fn len(&self) -> usize {
        self.groups.values().map(|group| group.entries.len()).sum()
    }

    /// Whether anything has been recorded.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All groups, in first-seen order.
    pub fn groups(&self) -> impl Iterator<Item = &RuleGroup> {
        self.order.iter().map(|id| &self.groups[id])
    }

    /// Groups handled automatically (fixable or already canonical).
    pub fn handled(&self) -> impl Iterator<Item = &RuleGroup> {
        self.groups().filter(|group| !group.disposition.needs_review())
    }

    /// Groups needing manual inspection (rejected or unclassified inputs).
    pub fn needs_review(&self) -> impl Iterator<Item = &RuleGroup> {
        self.groups().filter(|group| group.disposition.needs_review())
    }

    /// Number of results that were rewritten into canonical form.
    pub fn rewritten(&self) -> usize {
        self.groups()
            .filter(|group| group.disposition == Disposition::Fixable)
            .map(|group| group.entries.len())
            .sum()
    }
}

impl fmt::Display for AuditReport {
    /// Render the grouped text report: the automatically handled groups
    /// first (original -> normalized), then the groups flagged for manual
    /// inspection.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in self.handled() {
            writeln!(f)?;
            writeln!(f, "{}", group.description)?;
            writeln!(f, "{}", "=".repeat(group.description.len()))?;
            for entry in &group.entries {
                writeln!(f, "{:<30} -> {}", entry.original, entry.normalized)?;
            }
        }

        if self.needs_review().next().is_some() {
            writeln!(f)?;
            writeln!(f, "The following phone numbers need manual inspection:")?;
            for group in self.needs_review() {
                writeln!(f)?;
                writeln!(f, "{}", group.description)?;
                writeln!(f, "{}", "=".repeat(group.description.len()))?;
                for entry in &group.entries {
                    writeln!(f, "{}", entry.original)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Auditor;

    fn report_for(inputs: &[&str]) -> AuditReport {
        let auditor = Auditor::swiss();
        let mut report = AuditReport::new();
        for input in inputs {
            report.record(&auditor.audit(input).unwrap());
        }
        report
    }

    #[test]
    fn test_empty_report() {
        let report = AuditReport::new();
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
        assert_eq!(report.to_string(), "");
    }

    #[test]
    fn test_grouping_and_counts() {
        let report = report_for(&[
            "0041441234567",
            "0041 44 7654321",
            "1818",
            "bogus!",
            "+41 12 345 67 89",
        ]);
        assert_eq!(report.len(), 5);
        assert_eq!(report.rewritten(), 2);

        let ids: Vec<_> = report.groups().map(|g| g.rule_id).collect();
        assert_eq!(ids, ["idd_country_code", "short_code", "bad_chars", "unclassified"]);

        let review: Vec<_> = report.needs_review().map(|g| g.rule_id).collect();
        assert_eq!(review, ["bad_chars", "unclassified"]);
    }

    #[test]
    fn test_render_includes_both_partitions() {
        let report = report_for(&["0041441234567", "bogus!"]);
        let text = report.to_string();
        assert!(text.contains("-> +41 (0)44 123 45 67"));
        assert!(text.contains("need manual inspection"));
        assert!(text.contains("bogus!"));
        // Rejected entries are listed without a rewrite arrow
        assert!(!text.contains("bogus!                         ->"));
    }

    #[test]
    fn test_entries_keep_audit_order() {
        let report = report_for(&["0041441234567", "0041 44 7654321"]);
        let group = report.groups().next().unwrap();
        assert_eq!(group.entries[0].original, "0041441234567");
        assert_eq!(group.entries[1].original, "0041 44 7654321");
    }
}
