//! # Stanza Content
//!
//! Document model and content-mutation engine for the Stanza visual editor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ content: PageContent + mutations            │
//! │  - Field-path addressing into the document  │
//! │  - Pure doc-in/doc-out mutation functions   │
//! │  - Legacy feature-array migration           │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: registry + overlay + dispatch       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Document is a value**: every mutation returns a new `PageContent`;
//!    the input is never touched.
//! 2. **Defensive by contract**: addressing a section or array that does not
//!    exist is a silent no-op, not an error.
//! 3. **Homogeneous feature arrays**: an edit that only object-form entries
//!    can satisfy promotes the entire array in one step.

mod bulk;
mod document;
mod errors;
mod feature;
mod mutations;
mod path;

pub use bulk::{apply_bulk_patch, soft_delete, BulkOutcome};
pub use document::{PageContent, Section, SeoMeta};
pub use errors::ContentError;
pub use feature::{promote_features, Feature, FeatureCard, DEFAULT_FEATURE_ICON};
pub use mutations::{
    delete_category, delete_faq, delete_featured_item, update_category, update_faq,
    update_feature, update_featured_item, update_value_item,
};
pub use path::{
    create_section_field_path, get_value_by_path, is_valid_field_path, update_content_by_path,
};
