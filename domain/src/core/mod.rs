//! Core domain concepts shared across all subdomains.
//!
//! - [`question::SearchRequest`] : a validated free-text search request
//! - [`error::DomainError`] : domain-level errors

pub mod error;
pub mod question;
pub mod string;
