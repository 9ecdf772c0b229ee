//! # phone-audit
//!
//! Audit and normalization of phone numbers under a national numbering
//! plan.
//!
//! Given a raw, inconsistently formatted telephone number, the engine
//! determines whether it is numerically valid under the configured plan,
//! classifies the specific way it deviates from canonical form, and — when
//! safe — rewrites it into the single canonical textual representation
//! (`+41 (0)44 123 45 67` for 2-digit area codes, `+41 (0)800 123 456` for
//! 3-digit ones, in the bundled Swiss plan).
//!
//! Classification is an ordered first-match scan over an immutable rule
//! registry; the final catch-all guarantees every input resolves to exactly
//! one labeled outcome. Numbers that cannot be recognized are flagged for
//! manual review, never guessed at.
//!
//! ## Example
//!
//! ```rust
//! use phone_audit::prelude::*;
//!
//! let auditor = Auditor::swiss();
//!
//! let result = auditor.audit("+41(044)1234567").unwrap();
//! assert_eq!(result.disposition, Disposition::Fixable);
//! assert_eq!(result.normalized_output, "+41 (0)44 123 45 67");
//!
//! let result = auditor.audit("1818").unwrap();
//! assert_eq!(result.disposition, Disposition::Unchanged);
//! assert_eq!(result.normalized_output, "1818");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod audit;
pub mod plan;
pub mod registry;
pub mod report;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::audit::{AuditError, AuditResult, Auditor};
    pub use crate::plan::{NumberingPlan, PlanError};
    pub use crate::registry::{
        standard_rules, ClassificationRule, DigitExtractor, Disposition, Registry, RegistryError,
    };
    pub use crate::report::{AuditEntry, AuditReport, RuleGroup};
}
