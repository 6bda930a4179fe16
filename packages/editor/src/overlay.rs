//! # Overlay / Hit-Testing Layer
//!
//! Paints indicator boxes over registered elements and turns pointer events
//! into hover/activation transitions.
//!
//! Hover and active are two single-valued fields on one [`FocusState`]:
//! moving activation from element A to element B is one atomic reassignment,
//! so there is never a moment with two active elements.
//!
//! The host forwards document-level pointer and key events here. Presses
//! that land inside the inline editor's own UI must not be forwarded — the
//! host owns that DOM subtree and knows when a press is within it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Point, Rect};
use crate::registry::{ElementKind, ElementRegistry};

/// Which element is hovered and which is active (bound to the inline
/// editor). At most one id each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FocusState {
    active_id: Option<String>,
    hovered_id: Option<String>,
}

impl FocusState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn hovered_id(&self) -> Option<&str> {
        self.hovered_id.as_deref()
    }

    /// Make `id` the active element, returning the id it displaced.
    pub fn activate(&mut self, id: &str) -> Option<String> {
        self.active_id.replace(id.to_string())
    }

    /// Clear the active element, returning it.
    pub fn clear_active(&mut self) -> Option<String> {
        self.active_id.take()
    }

    /// Move hover to `id` (or nothing), reporting the transition.
    pub fn set_hovered(&mut self, id: Option<&str>) -> Option<HoverChange> {
        if self.hovered_id.as_deref() == id {
            return None;
        }

        let left = std::mem::replace(&mut self.hovered_id, id.map(str::to_string));
        Some(HoverChange {
            left,
            entered: id.map(str::to_string),
        })
    }
}

/// A hover transition: which element the pointer left and which it entered.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverChange {
    pub left: Option<String>,
    pub entered: Option<String>,
}

/// One indicator box, positioned relative to the preview container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub id: String,
    pub kind: ElementKind,
    pub rect: Rect,
    pub hovered: bool,
    pub active: bool,
}

/// What a pointer press resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerOutcome {
    /// A text-like element was promoted to active; open the inline editor
    /// at `anchor` (container-relative).
    Activated { id: String, anchor: Rect },

    /// The press hit an image/icon indicator; those get an external editing
    /// affordance, and an open inline editor stays open.
    Ignored { id: String },

    /// The press landed outside every indicator while an editor was open;
    /// active state was cleared and the editor must be discarded.
    DismissedActive,

    /// Outside every indicator, nothing was open.
    Missed,
}

/// Indicator painter and pointer-event interpreter.
#[derive(Debug)]
pub struct Overlay {
    container_origin: Point,
    enabled: bool,
}

impl Overlay {
    pub fn new(container_origin: Point) -> Self {
        Self {
            container_origin,
            enabled: true,
        }
    }

    /// Container origin in the rendering collaborator's pixel space. The
    /// overlay subtracts it so indicators are positioned within the preview
    /// container.
    pub fn set_container_origin(&mut self, origin: Point) {
        self.container_origin = origin;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Indicator boxes for every registered element, container-relative.
    /// Empty while the overlay is disabled.
    pub fn indicators(&self, registry: &ElementRegistry, focus: &FocusState) -> Vec<Indicator> {
        if !self.enabled {
            return Vec::new();
        }

        registry
            .iter()
            .map(|element| Indicator {
                id: element.id.clone(),
                kind: element.kind,
                rect: element.bounds.relative_to(self.container_origin),
                hovered: focus.hovered_id() == Some(element.id.as_str()),
                active: focus.active_id() == Some(element.id.as_str()),
            })
            .collect()
    }

    /// Track the pointer: updates hover state, reports the transition.
    pub fn pointer_move(
        &self,
        point: Point,
        registry: &ElementRegistry,
        focus: &mut FocusState,
    ) -> Option<HoverChange> {
        if !self.enabled {
            return focus.set_hovered(None);
        }

        let hit = registry.element_at(point).map(|element| element.id.clone());
        focus.set_hovered(hit.as_deref())
    }

    /// Interpret a pointer press.
    pub fn pointer_down(
        &self,
        point: Point,
        registry: &ElementRegistry,
        focus: &mut FocusState,
    ) -> PointerOutcome {
        if !self.enabled {
            return PointerOutcome::Missed;
        }

        match registry.element_at(point) {
            Some(element) if element.kind.is_inline_editable() => {
                focus.activate(&element.id);
                debug!(element = %element.id, "activated for inline editing");
                PointerOutcome::Activated {
                    id: element.id.clone(),
                    anchor: element.bounds.relative_to(self.container_origin),
                }
            }
            Some(element) => PointerOutcome::Ignored {
                id: element.id.clone(),
            },
            None => {
                if focus.clear_active().is_some() {
                    debug!("outside press dismissed active editor");
                    PointerOutcome::DismissedActive
                } else {
                    PointerOutcome::Missed
                }
            }
        }
    }

    /// Escape key: clear active state, returning the dismissed id.
    pub fn escape(&self, focus: &mut FocusState) -> Option<String> {
        focus.clear_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ElementRegistration;

    fn registry() -> ElementRegistry {
        let mut registry = ElementRegistry::new();
        registry.register(ElementRegistration::new(
            "hero",
            "data.title",
            ElementKind::Text,
            Rect::new(100.0, 100.0, 200.0, 40.0),
        ));
        registry.register(ElementRegistration::new(
            "hero",
            "data.image",
            ElementKind::Image,
            Rect::new(100.0, 200.0, 200.0, 150.0),
        ));
        registry
    }

    #[test]
    fn test_activation_is_atomic_reassignment() {
        let mut focus = FocusState::new();
        focus.activate("a");
        let displaced = focus.activate("b");

        assert_eq!(displaced.as_deref(), Some("a"));
        assert_eq!(focus.active_id(), Some("b"));
    }

    #[test]
    fn test_click_text_activates_with_container_relative_anchor() {
        let overlay = Overlay::new(Point::new(100.0, 100.0));
        let registry = registry();
        let mut focus = FocusState::new();

        let outcome = overlay.pointer_down(Point::new(150.0, 120.0), &registry, &mut focus);
        assert_eq!(
            outcome,
            PointerOutcome::Activated {
                id: "hero:data.title".to_string(),
                anchor: Rect::new(0.0, 0.0, 200.0, 40.0),
            }
        );
        assert_eq!(focus.active_id(), Some("hero:data.title"));
    }

    #[test]
    fn test_click_image_is_ignored_at_this_layer() {
        let overlay = Overlay::new(Point::default());
        let registry = registry();
        let mut focus = FocusState::new();
        focus.activate("hero:data.title");

        let outcome = overlay.pointer_down(Point::new(150.0, 250.0), &registry, &mut focus);
        assert_eq!(
            outcome,
            PointerOutcome::Ignored {
                id: "hero:data.image".to_string()
            }
        );
        // Open editor stays bound.
        assert_eq!(focus.active_id(), Some("hero:data.title"));
    }

    #[test]
    fn test_outside_press_dismisses_active() {
        let overlay = Overlay::new(Point::default());
        let registry = registry();
        let mut focus = FocusState::new();
        focus.activate("hero:data.title");

        let outcome = overlay.pointer_down(Point::new(900.0, 900.0), &registry, &mut focus);
        assert_eq!(outcome, PointerOutcome::DismissedActive);
        assert_eq!(focus.active_id(), None);

        let again = overlay.pointer_down(Point::new(900.0, 900.0), &registry, &mut focus);
        assert_eq!(again, PointerOutcome::Missed);
    }

    #[test]
    fn test_hover_transitions_are_single_valued() {
        let overlay = Overlay::new(Point::default());
        let registry = registry();
        let mut focus = FocusState::new();

        let change = overlay
            .pointer_move(Point::new(150.0, 120.0), &registry, &mut focus)
            .unwrap();
        assert_eq!(change.entered.as_deref(), Some("hero:data.title"));
        assert_eq!(change.left, None);

        // Same element again: no transition.
        assert!(overlay
            .pointer_move(Point::new(160.0, 125.0), &registry, &mut focus)
            .is_none());

        let change = overlay
            .pointer_move(Point::new(150.0, 250.0), &registry, &mut focus)
            .unwrap();
        assert_eq!(change.left.as_deref(), Some("hero:data.title"));
        assert_eq!(change.entered.as_deref(), Some("hero:data.image"));
        assert_eq!(focus.hovered_id(), Some("hero:data.image"));
    }

    #[test]
    fn test_disabled_overlay_paints_nothing() {
        let mut overlay = Overlay::new(Point::default());
        overlay.set_enabled(false);
        let registry = registry();
        let focus = FocusState::new();

        assert!(overlay.indicators(&registry, &focus).is_empty());
    }
}
