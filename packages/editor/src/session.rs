//! # Editing Session
//!
//! Façade wiring the whole in-place editing loop for one preview surface:
//! registry → overlay hit-testing → inline editor → dispatcher → document.
//!
//! The session owns the current document and applies commits to it
//! sequentially, on one thread. There is no merge logic for concurrent
//! writers; hosts that re-render after every apply get consistent bounds
//! back through re-registration.

use std::time::Instant;

use serde_json::Value;
use tracing::debug;

use stanza_content::{create_section_field_path, get_value_by_path, PageContent};

use crate::dispatch::UpdateDispatcher;
use crate::geometry::Point;
use crate::overlay::{FocusState, HoverChange, Indicator, Overlay, PointerOutcome};
use crate::registry::{BoundsSource, ElementRegistry, RefreshDebouncer};
use crate::surface::InlineEditor;
use crate::EditorError;

/// One live editing session over a rendered preview.
pub struct EditorSession {
    document: PageContent,
    registry: ElementRegistry,
    overlay: Overlay,
    focus: FocusState,
    editor: Option<InlineEditor>,
    debouncer: RefreshDebouncer,
}

impl EditorSession {
    pub fn new(document: PageContent) -> Self {
        Self {
            document,
            registry: ElementRegistry::new(),
            overlay: Overlay::new(Point::default()),
            focus: FocusState::new(),
            editor: None,
            debouncer: RefreshDebouncer::new(),
        }
    }

    pub fn document(&self) -> &PageContent {
        &self.document
    }

    /// Replace the document wholesale (host-side load / external save echo).
    /// Registrations are the rendering collaborator's to rebuild.
    pub fn replace_document(&mut self, document: PageContent) {
        self.document = document;
    }

    pub fn registry(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ElementRegistry {
        &mut self.registry
    }

    pub fn overlay_mut(&mut self) -> &mut Overlay {
        &mut self.overlay
    }

    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    pub fn active_editor(&self) -> Option<&InlineEditor> {
        self.editor.as_ref()
    }

    /// Indicator boxes to paint for the current frame.
    pub fn indicators(&self) -> Vec<Indicator> {
        self.overlay.indicators(&self.registry, &self.focus)
    }

    /// Forward a pointer move; returns the hover transition, if any.
    pub fn pointer_move(&mut self, point: Point) -> Option<HoverChange> {
        self.overlay
            .pointer_move(point, &self.registry, &mut self.focus)
    }

    /// Forward a document-level pointer press.
    ///
    /// Activating an element while another editor is open discards the open
    /// buffer first; active reassignment is atomic, so there is never a
    /// moment with two bound editors.
    pub fn pointer_down(&mut self, point: Point) -> PointerOutcome {
        let outcome = self
            .overlay
            .pointer_down(point, &self.registry, &mut self.focus);

        match &outcome {
            PointerOutcome::Activated { id, .. } => {
                self.editor = None;
                let initial = self.initial_value(id);
                if let Some(element) = self.registry.get(id) {
                    if let Ok(editor) = InlineEditor::open_for(element, &initial) {
                        self.editor = Some(editor);
                    }
                }
            }
            PointerOutcome::DismissedActive => {
                self.discard_editor();
            }
            PointerOutcome::Ignored { .. } | PointerOutcome::Missed => {}
        }

        outcome
    }

    /// Escape key: discard the open editor, clear active state.
    pub fn escape(&mut self) -> Option<String> {
        let dismissed = self.overlay.escape(&mut self.focus);
        if dismissed.is_some() {
            self.discard_editor();
        }
        dismissed
    }

    /// Type into the open editor's local buffer.
    pub fn input(&mut self, text: &str) -> Result<(), EditorError> {
        match &mut self.editor {
            Some(editor) => {
                editor.input(text);
                Ok(())
            }
            None => Err(EditorError::NoActiveEditor),
        }
    }

    /// Explicit save of the open editor.
    ///
    /// Routes the commit through the dispatcher, applies the new document,
    /// closes the editor and clears active state. Returns whether the
    /// document actually changed.
    pub fn commit_active(&mut self) -> Result<bool, EditorError> {
        let editor = self.editor.take().ok_or(EditorError::NoActiveEditor)?;
        let commit = editor.commit();

        let mut next: Option<PageContent> = None;
        let changed = UpdateDispatcher::new(|document| next = Some(document))
            .dispatch(&self.document, &commit);

        if let Some(document) = next {
            self.document = document;
        }

        self.focus.clear_active();
        debug!(
            section = %commit.section_key,
            field = %commit.field_path,
            changed,
            "committed inline edit"
        );
        Ok(changed)
    }

    /// Observer-driven layout notification; debounced to one frame.
    /// Returns the number of changed rects when a refresh actually ran.
    pub fn notify_layout_changed(
        &mut self,
        source: &dyn BoundsSource,
        now: Instant,
    ) -> Option<usize> {
        if !self.debouncer.poll(now) {
            return None;
        }
        Some(self.registry.refresh_bounds(source))
    }

    fn discard_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            debug!(element = %editor.element_id(), "discarded inline edit buffer");
            editor.cancel();
        }
    }

    /// Current document text for an element, used to seed its editor.
    fn initial_value(&self, id: &str) -> String {
        let Some(element) = self.registry.get(id) else {
            return String::new();
        };

        // Reserved fields live at the top of the document.
        let raw = match element.field_path.as_str() {
            "title" => return self.document.title().unwrap_or_default().to_string(),
            "subtitle" => return self.document.subtitle().unwrap_or_default().to_string(),
            field_path => {
                let path = create_section_field_path(&element.section_key, field_path);
                get_value_by_path(&self.document, &path)
            }
        };

        raw.and_then(Value::as_str).unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::registry::{ElementKind, ElementRegistration};
    use serde_json::json;

    fn session() -> EditorSession {
        let document = PageContent::from_value(json!({
            "title": "Home",
            "sections": {
                "hero": { "type": "hero", "data": { "title": "Hello" }, "order": 1 }
            }
        }))
        .unwrap();

        let mut session = EditorSession::new(document);
        session.registry_mut().register(ElementRegistration::new(
            "hero",
            "data.title",
            ElementKind::Text,
            Rect::new(0.0, 0.0, 100.0, 20.0),
        ));
        session
    }

    #[test]
    fn test_editor_seeded_from_document() {
        let mut session = session();
        session.pointer_down(Point::new(10.0, 10.0));

        assert_eq!(session.active_editor().unwrap().buffer(), "Hello");
    }

    #[test]
    fn test_escape_discards_without_touching_document() {
        let mut session = session();
        session.pointer_down(Point::new(10.0, 10.0));
        session.input("scratch").unwrap();

        let before = session.document().clone();
        assert_eq!(session.escape().as_deref(), Some("hero:data.title"));
        assert!(session.active_editor().is_none());
        assert_eq!(*session.document(), before);
    }

    #[test]
    fn test_commit_without_editor_errors() {
        let mut session = session();
        assert_eq!(session.commit_active(), Err(EditorError::NoActiveEditor));
        assert_eq!(session.input("x"), Err(EditorError::NoActiveEditor));
    }
}
