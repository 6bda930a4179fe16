//! # Content Update Dispatcher
//!
//! Routes UI commits to the matching content mutation and hands the new
//! document to the host's apply callback.
//!
//! Four call shapes come in from the UI layer:
//! - a full field path (inline text / rich-text commit),
//! - a section key plus section-local field path,
//! - the specialized array commits (feature / item / category / featured /
//!   FAQ),
//! - the reserved `title` / `subtitle` commits, which go to dedicated host
//!   callbacks when supplied and fall back to a top-level path write.
//!
//! Every method is synchronous and invokes the apply callback at most once
//! per commit. Mutations that return the document unchanged (the engine's
//! defensive no-ops) skip the callback; that is a performance nicety, not
//! something callers may rely on for correctness.

use serde_json::{Map, Value};
use tracing::debug;

use stanza_content::{
    create_section_field_path, delete_category, delete_faq, delete_featured_item, update_category,
    update_content_by_path, update_faq, update_feature, update_featured_item, update_value_item,
    PageContent,
};

use crate::surface::{EditCommit, ReservedField};

type ApplyFn<'a> = Box<dyn FnMut(PageContent) + 'a>;
type FieldFn<'a> = Box<dyn FnMut(&str) + 'a>;

/// Façade between editor commits and the content-storage collaborator.
pub struct UpdateDispatcher<'a> {
    apply: ApplyFn<'a>,
    on_title: Option<FieldFn<'a>>,
    on_subtitle: Option<FieldFn<'a>>,
}

impl<'a> UpdateDispatcher<'a> {
    /// `apply` receives every new document; persistence and debouncing are
    /// its side of the contract.
    pub fn new(apply: impl FnMut(PageContent) + 'a) -> Self {
        Self {
            apply: Box::new(apply),
            on_title: None,
            on_subtitle: None,
        }
    }

    /// Route `title` commits to a dedicated host callback.
    pub fn with_title_handler(mut self, handler: impl FnMut(&str) + 'a) -> Self {
        self.on_title = Some(Box::new(handler));
        self
    }

    /// Route `subtitle` commits to a dedicated host callback.
    pub fn with_subtitle_handler(mut self, handler: impl FnMut(&str) + 'a) -> Self {
        self.on_subtitle = Some(Box::new(handler));
        self
    }

    /// Generic write through a full field path.
    pub fn commit_path(&mut self, doc: &PageContent, path: &str, value: Value) -> bool {
        let next = update_content_by_path(doc, path, value);
        self.apply_if_changed(doc, next)
    }

    /// Section-scoped write: builds `sections.{key}.{field}` first.
    pub fn commit_section_field(
        &mut self,
        doc: &PageContent,
        section_key: &str,
        field_path: &str,
        value: Value,
    ) -> bool {
        let path = create_section_field_path(section_key, field_path);
        self.commit_path(doc, &path, value)
    }

    /// Route an inline-editor commit, special-casing the reserved fields.
    pub fn dispatch(&mut self, doc: &PageContent, commit: &EditCommit) -> bool {
        match commit.reserved_target() {
            Some(ReservedField::Title) => self.commit_title(doc, &commit.value),
            Some(ReservedField::Subtitle) => self.commit_subtitle(doc, &commit.value),
            None => self.commit_section_field(
                doc,
                &commit.section_key,
                &commit.field_path,
                Value::String(commit.value.clone()),
            ),
        }
    }

    pub fn commit_feature(
        &mut self,
        doc: &PageContent,
        section_key: &str,
        index: usize,
        field: &str,
        value: &str,
    ) -> bool {
        let next = update_feature(doc, section_key, index, field, value);
        self.apply_if_changed(doc, next)
    }

    pub fn commit_value_item(
        &mut self,
        doc: &PageContent,
        section_key: &str,
        index: usize,
        patch: &Map<String, Value>,
    ) -> bool {
        let next = update_value_item(doc, section_key, index, patch);
        self.apply_if_changed(doc, next)
    }

    pub fn commit_category(
        &mut self,
        doc: &PageContent,
        section_key: &str,
        index: usize,
        patch: &Map<String, Value>,
    ) -> bool {
        let next = update_category(doc, section_key, index, patch);
        self.apply_if_changed(doc, next)
    }

    pub fn delete_category(&mut self, doc: &PageContent, section_key: &str, index: usize) -> bool {
        let next = delete_category(doc, section_key, index);
        self.apply_if_changed(doc, next)
    }

    pub fn commit_featured_item(
        &mut self,
        doc: &PageContent,
        section_key: &str,
        index: usize,
        patch: &Map<String, Value>,
    ) -> bool {
        let next = update_featured_item(doc, section_key, index, patch);
        self.apply_if_changed(doc, next)
    }

    pub fn delete_featured_item(
        &mut self,
        doc: &PageContent,
        section_key: &str,
        index: usize,
    ) -> bool {
        let next = delete_featured_item(doc, section_key, index);
        self.apply_if_changed(doc, next)
    }

    pub fn commit_faq(
        &mut self,
        doc: &PageContent,
        section_key: &str,
        index: usize,
        patch: &Map<String, Value>,
    ) -> bool {
        let next = update_faq(doc, section_key, index, patch);
        self.apply_if_changed(doc, next)
    }

    pub fn delete_faq(&mut self, doc: &PageContent, section_key: &str, index: usize) -> bool {
        let next = delete_faq(doc, section_key, index);
        self.apply_if_changed(doc, next)
    }

    /// `title` lives outside `sections`: prefer the host callback, fall back
    /// to a top-level path write.
    pub fn commit_title(&mut self, doc: &PageContent, value: &str) -> bool {
        if let Some(handler) = &mut self.on_title {
            handler(value);
            return true;
        }
        self.commit_path(doc, "title", Value::String(value.to_string()))
    }

    /// See [`Self::commit_title`].
    pub fn commit_subtitle(&mut self, doc: &PageContent, value: &str) -> bool {
        if let Some(handler) = &mut self.on_subtitle {
            handler(value);
            return true;
        }
        self.commit_path(doc, "subtitle", Value::String(value.to_string()))
    }

    fn apply_if_changed(&mut self, old: &PageContent, next: PageContent) -> bool {
        if next == *old {
            debug!("mutation was a no-op, skipping apply");
            return false;
        }
        (self.apply)(next);
        true
    }
}
