//! Use cases (application services)
//!
//! - [`generate_params`]: consensus-based parameter generation
//! - [`validate_params`]: rule and semantic validation

pub mod generate_params;
pub mod validate_params;

#[cfg(test)]
pub(crate) mod testing;
