//! Error types for the content crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Document root must be a JSON object")]
    NotAnObject,
}
