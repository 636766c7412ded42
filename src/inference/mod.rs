//! Client side of the inference service
//!
//! The service is an opaque HTTP endpoint: it takes a question and answers
//! with generated text. This module holds the wire types, the error
//! taxonomy, and the reqwest-backed client.

pub mod errors;
pub mod http;
pub mod service;
pub mod types;

pub use errors::*;
pub use http::HttpInferenceClient;
pub use service::InferenceService;
pub use types::*;
