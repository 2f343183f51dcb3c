//! Search parameter domain
//!
//! - [`params::QueryParameters`] : the structured record produced by generation
//! - [`vocabulary`] : crystal systems, element symbols, hardness bounds
//! - [`output_schema::OutputSchema`] : schemas for structured generation

pub mod output_schema;
pub mod params;
pub mod vocabulary;

pub use output_schema::OutputSchema;
pub use params::QueryParameters;
pub use vocabulary::{CrystalSystem, ELEMENT_SYMBOLS, MOHS_MAX, MOHS_MIN, canonical_symbol};
