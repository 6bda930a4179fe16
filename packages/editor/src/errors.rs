//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Element not registered: {0}")]
    UnknownElement(String),

    #[error("Element is not inline-editable: {0}")]
    NotInlineEditable(String),

    #[error("No inline editor is open")]
    NoActiveEditor,
}
