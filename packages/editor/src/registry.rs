//! # Editable-Element Registry
//!
//! Live bookkeeping of which preview elements can be edited in place.
//!
//! The rendering collaborator owns the preview DOM. As it mounts elements it
//! registers them here with a stable id, the owning section, the field path
//! the element displays, and its last-known bounds; on unmount it
//! unregisters. The registry never creates or destroys rendered elements —
//! it only records them and looks their bounds back up through a
//! [`BoundsSource`] when layout changes.
//!
//! Registration is idempotent by id: re-registering updates the record in
//! place and keeps the original registration order. Unregistering an absent
//! id is a no-op.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::geometry::{Point, Rect};

/// What kind of editing affordance an element needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Text,
    RichText,
    Image,
    Icon,
}

impl ElementKind {
    /// Only text-like elements open the inline editor; images and icons get
    /// a different affordance outside this crate.
    pub fn is_inline_editable(&self) -> bool {
        matches!(self, ElementKind::Text | ElementKind::RichText)
    }
}

/// Stable element id derived from the section key and field path.
pub fn element_id(section_key: &str, field_path: &str) -> String {
    format!("{section_key}:{field_path}")
}

/// One registered editable element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRegistration {
    pub id: String,
    pub section_key: String,
    pub field_path: String,
    pub kind: ElementKind,

    /// Last-known rectangle in the rendering collaborator's pixel space.
    pub bounds: Rect,
}

impl ElementRegistration {
    pub fn new(section_key: &str, field_path: &str, kind: ElementKind, bounds: Rect) -> Self {
        Self {
            id: element_id(section_key, field_path),
            section_key: section_key.to_string(),
            field_path: field_path.to_string(),
            kind,
            bounds,
        }
    }
}

/// The rendering collaborator's bounds lookup.
///
/// A non-owning back-reference: the registry asks "where is this element
/// now?" and the collaborator answers from its live DOM, or `None` for
/// elements it no longer renders.
pub trait BoundsSource {
    fn bounds_of(&self, id: &str) -> Option<Rect>;
}

/// Registry of currently-mounted editable elements.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    elements: HashMap<String, ElementRegistration>,

    /// Ids in first-registration order; re-registration keeps position.
    order: Vec<String>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an element, or update its record if the id is already known.
    pub fn register(&mut self, registration: ElementRegistration) {
        let id = registration.id.clone();
        if self.elements.insert(id.clone(), registration).is_none() {
            self.order.push(id.clone());
            debug!(element = %id, "registered editable element");
        } else {
            trace!(element = %id, "re-registered editable element");
        }
    }

    /// Remove an element. Safe to call for ids that were never registered.
    pub fn unregister(&mut self, id: &str) {
        if self.elements.remove(id).is_some() {
            self.order.retain(|known| known != id);
            debug!(element = %id, "unregistered editable element");
        }
    }

    /// Drop every registration (preview unmounted).
    pub fn clear(&mut self) {
        self.elements.clear();
        self.order.clear();
    }

    pub fn get(&self, id: &str) -> Option<&ElementRegistration> {
        self.elements.get(id)
    }

    /// Registrations in first-registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ElementRegistration> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The innermost element under `point`: smallest containing rect wins,
    /// registration order breaks exact-area ties.
    pub fn element_at(&self, point: Point) -> Option<&ElementRegistration> {
        self.iter()
            .filter(|element| element.bounds.contains(point))
            .fold(None, |best: Option<&ElementRegistration>, candidate| {
                match best {
                    Some(current) if current.bounds.area() <= candidate.bounds.area() => Some(current),
                    _ => Some(candidate),
                }
            })
    }

    /// Recompute every element's bounds from the rendering collaborator.
    ///
    /// Elements the source no longer knows keep their last-known rect.
    /// Returns how many rects actually changed, so observer-driven callers
    /// can skip repaints on no-op refreshes.
    pub fn refresh_bounds(&mut self, source: &dyn BoundsSource) -> usize {
        let mut changed = 0;
        for (id, element) in &mut self.elements {
            if let Some(bounds) = source.bounds_of(id) {
                if bounds != element.bounds {
                    element.bounds = bounds;
                    changed += 1;
                }
            }
        }

        trace!(changed, total = self.elements.len(), "refreshed element bounds");
        changed
    }
}

/// One-frame debounce window for observer-driven bounds refreshes.
///
/// Layout observers can fire in tight loops when the observed container's
/// size shifts while the overlay repaints. The overlay repaint must not
/// resize the observed container; this window is the guard on top of that.
#[derive(Debug)]
pub struct RefreshDebouncer {
    window: Duration,
    last_run: Option<Instant>,
}

impl RefreshDebouncer {
    /// ~16 ms: one frame at 60 Hz.
    pub fn new() -> Self {
        Self::with_window(Duration::from_millis(16))
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            last_run: None,
        }
    }

    /// Whether a refresh may run at `now`. Consumes the window when it does.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_run {
            Some(last) if now.duration_since(last) < self.window => false,
            _ => {
                self.last_run = Some(now);
                true
            }
        }
    }
}

impl Default for RefreshDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
