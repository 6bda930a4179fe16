//! # Inline Editor Surface
//!
//! The editing affordance bound to exactly one active element.
//!
//! Typing goes into the editor's local buffer only; the document is not
//! touched until the user explicitly saves, which consumes the editor and
//! yields one [`EditCommit`]. Cancel (escape / outside press) drops the
//! buffer without producing anything.
//!
//! Two field names are reserved: `title` and `subtitle` live at the top of
//! the document, outside the `sections` map. The editor's caller checks
//! [`EditCommit::reserved_target`] and routes those commits to the dedicated
//! top-level callbacks instead of the generic section mutation.

use crate::registry::{ElementKind, ElementRegistration};
use crate::EditorError;

/// Plain-text vs rich-text editing, selected by the element's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Plain,
    Rich,
}

impl EditMode {
    /// The mode a given element kind edits in; `None` for kinds that do not
    /// take the inline editor.
    pub fn for_kind(kind: ElementKind) -> Option<Self> {
        match kind {
            ElementKind::Text => Some(EditMode::Plain),
            ElementKind::RichText => Some(EditMode::Rich),
            ElementKind::Image | ElementKind::Icon => None,
        }
    }
}

/// Fields that route to top-level update callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedField {
    Title,
    Subtitle,
}

/// A committed inline edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditCommit {
    pub section_key: String,
    pub field_path: String,
    pub value: String,
}

impl EditCommit {
    /// Whether this commit targets one of the reserved top-level fields.
    pub fn reserved_target(&self) -> Option<ReservedField> {
        match self.field_path.as_str() {
            "title" => Some(ReservedField::Title),
            "subtitle" => Some(ReservedField::Subtitle),
            _ => None,
        }
    }
}

/// One open inline editor.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineEditor {
    element_id: String,
    section_key: String,
    field_path: String,
    mode: EditMode,
    buffer: String,
}

impl InlineEditor {
    /// Bind an editor to an element, seeded with its current content.
    pub fn open_for(element: &ElementRegistration, initial: &str) -> Result<Self, EditorError> {
        let mode = EditMode::for_kind(element.kind)
            .ok_or_else(|| EditorError::NotInlineEditable(element.id.clone()))?;

        Ok(Self {
            element_id: element.id.clone(),
            section_key: element.section_key.clone(),
            field_path: element.field_path.clone(),
            mode,
            buffer: initial.to_string(),
        })
    }

    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Replace the local buffer. Never touches the document.
    pub fn input(&mut self, text: &str) {
        self.buffer = text.to_string();
    }

    /// Explicit save: consume the editor, yield the one commit.
    pub fn commit(self) -> EditCommit {
        EditCommit {
            section_key: self.section_key,
            field_path: self.field_path,
            value: self.buffer,
        }
    }

    /// Discard the buffer.
    pub fn cancel(self) {}
}
