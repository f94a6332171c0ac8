//! Storage backends for the service layer.
//!
//! The collection lives in a single JSON file that is re-read on every call;
//! nothing is cached between requests.

pub mod json_array_store;
