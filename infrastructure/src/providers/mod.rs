//! Structured-output provider adapters

mod openai;

pub use openai::OpenAiGateway;
