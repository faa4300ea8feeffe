//! Ingestion schema for attention events
//!
//! Parsing is lenient (unknown kinds deserialize, batches may arrive as a
//! single object, an array, or NDJSON); validation is strict and runs before
//! anything reaches the store.

pub mod event;

pub use event::{EventAdapter, ValidationError, ValidationFailure, SCHEMA_VERSION};
