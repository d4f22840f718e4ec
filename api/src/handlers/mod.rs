//! Cross-cutting handler helpers: the API error type and extractor error
//! handlers that render envelopes.

pub mod error;

pub use error::{
    json_error_handler, path_error_handler, query_error_handler, validated, ApiError, IntoApiResult,
};
