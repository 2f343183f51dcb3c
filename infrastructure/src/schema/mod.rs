//! API schema document adapters

mod http_source;

pub use http_source::{HttpSchemaSource, parse_document};
