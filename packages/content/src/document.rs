//! # Page Content Document
//!
//! The root document a site page is rendered from.
//!
//! A `PageContent` wraps a loose JSON object: top-level `title`, `subtitle`
//! and `seo` metadata, plus a `sections` map keyed by section key. Section
//! keys are the identity of a section; the `order` field is only an advisory
//! sort key for rendering (ties fall back to original key order, which the
//! underlying map preserves).
//!
//! Documents are values. Mutation functions in this crate take a document by
//! reference and return a new one; callers that hold the old reference keep
//! seeing the old content.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::ContentError;

/// A page's content document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageContent(Value);

/// A named, typed, ordered unit of content within a document.
///
/// Typed form used when authoring sections (template instantiation, tests).
/// Inside a document the section lives as loose JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Discriminates the rendering template (`"hero"`, `"faq"`, ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// Loose bag of template-specific content.
    pub data: Value,

    /// Advisory render-position sort key.
    pub order: i64,
}

/// Page-level SEO metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
}

impl PageContent {
    /// Create an empty document with an empty `sections` map.
    pub fn new() -> Self {
        Self(json!({ "sections": {} }))
    }

    /// Wrap an existing JSON value. The root must be an object.
    pub fn from_value(value: Value) -> Result<Self, ContentError> {
        if value.is_object() {
            Ok(Self(value))
        } else {
            Err(ContentError::NotAnObject)
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json(source: &str) -> Result<Self, ContentError> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    fn root(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    pub fn title(&self) -> Option<&str> {
        self.root()?.get("title").and_then(Value::as_str)
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.root()?.get("subtitle").and_then(Value::as_str)
    }

    pub fn seo(&self) -> Option<SeoMeta> {
        let raw = self.root()?.get("seo")?;
        serde_json::from_value(raw.clone()).ok()
    }

    /// The `sections` map, if present.
    pub fn sections(&self) -> Option<&Map<String, Value>> {
        self.root()?.get("sections").and_then(Value::as_object)
    }

    /// Raw section value by key.
    pub fn section(&self, key: &str) -> Option<&Value> {
        self.sections()?.get(key)
    }

    /// A section's `data` bag by key.
    pub fn section_data(&self, key: &str) -> Option<&Value> {
        self.section(key)?.get("data")
    }

    /// Section keys sorted for rendering: by `order`, ties broken by the
    /// original key order of the map.
    pub fn sections_in_order(&self) -> Vec<&str> {
        let mut keys: Vec<(&str, i64)> = match self.sections() {
            Some(map) => map
                .iter()
                .map(|(key, section)| {
                    let order = section.get("order").and_then(Value::as_i64).unwrap_or(0);
                    (key.as_str(), order)
                })
                .collect(),
            None => return Vec::new(),
        };

        // Stable sort keeps map (insertion) order for equal `order` values.
        keys.sort_by_key(|(_, order)| *order);
        keys.into_iter().map(|(key, _)| key).collect()
    }

    /// Return a new document with `section` inserted (or replaced) at `key`.
    pub fn with_section(&self, key: &str, section: Section) -> Self {
        let mut next = self.0.clone();
        let Some(root) = next.as_object_mut() else {
            return self.clone();
        };

        let sections = root
            .entry("sections".to_string())
            .or_insert_with(|| Value::Object(Map::new()));

        if let Some(map) = sections.as_object_mut() {
            let raw = serde_json::to_value(section).expect("section serializes to JSON");
            map.insert(key.to_string(), raw);
        }

        Self(next)
    }
}

impl Default for PageContent {
    fn default() -> Self {
        Self::new()
    }
}
