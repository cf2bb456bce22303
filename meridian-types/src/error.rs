//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// An element of a typed geometry collection is not of the collection's element type.
    #[error("geometry is not valid for collection, index: {index} (expected {expected})")]
    InvalidCollectionElement {
        /// Position of the first offending element in the input list.
        index: usize,
        /// Name of the element type the collection accepts.
        expected: &'static str,
    },
    /// Persisted geometry could not be read.
    #[error("invalid persisted geometry: {0}")]
    Persisted(String),
    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
