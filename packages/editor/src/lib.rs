//! # Stanza Editor
//!
//! In-place visual editing engine for Stanza pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ rendering collaborator (external)           │
//! │  preview DOM tagged with element ids        │
//! └─────────────────────────────────────────────┘
//!                     ↓ bounds lookups
//! ┌─────────────────────────────────────────────┐
//! │ editor: registry → overlay → surface        │
//! │  - track editable elements + bounds         │
//! │  - hit-test pointer events, hover/active    │
//! │  - one inline editor, explicit commit       │
//! └─────────────────────────────────────────────┘
//!                     ↓ commits
//! ┌─────────────────────────────────────────────┐
//! │ content: pure document mutations            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Single active element**: activation is one atomic id reassignment;
//!    there is never a moment with two bound editors.
//! 2. **Local buffer until commit**: typing never touches the document; only
//!    an explicit save dispatches a mutation.
//! 3. **Non-owning registry**: the rendering collaborator owns the DOM; the
//!    registry only looks bounds up by element id.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stanza_editor::{EditorSession, ElementKind, ElementRegistration};
//!
//! let mut session = EditorSession::new(doc);
//! session.registry_mut().register(ElementRegistration::new(
//!     "hero", "data.title", ElementKind::Text, bounds,
//! ));
//!
//! match session.pointer_down(point) {
//!     PointerOutcome::Activated { .. } => {
//!         session.input("New headline");
//!         session.commit_active()?;
//!     }
//!     _ => {}
//! }
//! ```

mod dispatch;
mod errors;
mod geometry;
mod overlay;
mod registry;
mod session;
mod surface;

pub use dispatch::UpdateDispatcher;
pub use errors::EditorError;
pub use geometry::{Point, Rect};
pub use overlay::{FocusState, HoverChange, Indicator, Overlay, PointerOutcome};
pub use registry::{
    element_id, BoundsSource, ElementKind, ElementRegistration, ElementRegistry, RefreshDebouncer,
};
pub use session::EditorSession;
pub use surface::{EditCommit, EditMode, InlineEditor, ReservedField};

// Re-export the document type hosts hand us.
pub use stanza_content::PageContent;
