//! Application-level configuration.
//!
//! - [`GenerationParams`]: fan-out, retry and round limits

pub mod generation_params;

pub use generation_params::GenerationParams;
