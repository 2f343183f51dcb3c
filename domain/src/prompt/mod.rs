//! Prompt domain
//!
//! Templates for the generation and semantic validation oracle calls.

mod template;

pub use template::PromptTemplate;
