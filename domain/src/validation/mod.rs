//! Validation domain
//!
//! Two layers check generated search parameters:
//!
//! ```text
//! ┌──────────────────────┐   valid    ┌──────────────────────────┐
//! │  RuleValidator       │ ─────────> │  Semantic verdict        │
//! │  (deterministic)     │            │  (oracle, fail-closed)   │
//! └──────────────────────┘            └──────────────────────────┘
//!          │ invalid                              │
//!          v                                      v
//!   ValidationResult                     ValidationResult
//! ```
//!
//! The rule layer lives here in full. The semantic layer needs an oracle,
//! so only its verdict type and enrichment live in the domain; the call
//! itself is an application use case.

pub mod result;
pub mod rules;
pub mod semantic;

pub use result::{ERROR_ISSUE_KEY, Issue, ParameterIssue, ValidationResult, ValidationStatus};
pub use rules::{RuleCheck, RuleValidator};
pub use semantic::SemanticVerdict;
