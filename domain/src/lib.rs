//! Domain layer for mindat-query
//!
//! This crate contains the search parameter model and the deterministic
//! logic around it. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Query parameters
//!
//! A free-text request about minerals is turned into a [`QueryParameters`]
//! record by an external oracle. The record is checked by the
//! [`RuleValidator`] and, optionally, by a semantic verdict.
//!
//! ## Consensus
//!
//! Several independent generations vote; the canonical form shared by a
//! majority wins (see [`quorum`]).

pub mod apidoc;
pub mod config;
pub mod core;
pub mod prompt;
pub mod query;
pub mod quorum;
pub mod validation;

// Re-export commonly used types
pub use apidoc::{EndpointDocs, GEOMATERIALS_ENDPOINT, ParameterDoc, extract_endpoint_docs};
pub use config::OutputFormat;
pub use core::{error::DomainError, question::SearchRequest};
pub use prompt::PromptTemplate;
pub use query::{CrystalSystem, OutputSchema, QueryParameters};
pub use quorum::{
    ConsensusFailure, ConsensusOutcome, ConsensusRound, GenerationCandidate, GenerationOutput,
    RepeatCount,
};
pub use validation::{
    ERROR_ISSUE_KEY, Issue, ParameterIssue, RuleValidator, SemanticVerdict, ValidationResult,
    ValidationStatus,
};
