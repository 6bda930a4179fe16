//! # Content Mutations
//!
//! Pure, doc-in/doc-out mutation functions over [`PageContent`].
//!
//! ## Mutation Semantics
//!
//! ### Shallow patches
//! - `update_value_item` / `update_category` / `update_featured_item` /
//!   `update_faq` merge a patch into one entry of the named array
//!   (`{...existing, ...patch}`); untouched keys survive.
//!
//! ### Deletes
//! - `delete_category` / `delete_featured_item` / `delete_faq` splice the
//!   entry out by index; later entries shift down.
//!
//! ### Feature updates
//! - `update_feature` keeps `text` and `title` synchronized on card entries
//!   and migrates a legacy string array wholesale when asked to set a field
//!   only cards can carry. The array is homogeneous after every call.
//!
//! ### Defensive contract
//! Every function returns the input document unchanged when the section, its
//! `data`, the named array, or the indexed entry is absent. Callers that need
//! to know whether a mutation took must compare documents themselves.

use serde_json::{Map, Value};

use crate::feature::{promote_features, Feature};
use crate::PageContent;

/// Update one field of a feature entry, migrating the array if needed.
///
/// - Card entry, `field` is `text`/`title`: both keys get `value`.
/// - Card entry, other field: only that key is written.
/// - String entry, `field` is `text`/`title`: in-place string replacement.
/// - String entry, other field: the whole array is promoted to card form,
///   then the write is applied to the target card.
pub fn update_feature(
    doc: &PageContent,
    section_key: &str,
    index: usize,
    field: &str,
    value: &str,
) -> PageContent {
    mutate_section_array(doc, section_key, "features", |entries| {
        if index >= entries.len() {
            return false;
        }

        let display_field = field == "text" || field == "title";

        // A field only cards can carry, on an entry that is not a card:
        // promote every entry first so the array stays homogeneous.
        let needs_promotion = match &entries[index] {
            Value::Object(_) => false,
            Value::String(_) if display_field => false,
            _ => true,
        };

        if needs_promotion {
            let parsed: Vec<Feature> = entries
                .iter()
                .map(|raw| {
                    serde_json::from_value(raw.clone())
                        .unwrap_or_else(|_| Feature::Text(String::new()))
                })
                .collect();

            *entries = promote_features(&parsed)
                .into_iter()
                .map(|card| serde_json::to_value(card).expect("feature card serializes to JSON"))
                .collect();
        }

        match &mut entries[index] {
            Value::Object(card) => {
                write_card_field(card, field, value, display_field);
                true
            }
            Value::String(text) if display_field => {
                *text = value.to_string();
                true
            }
            _ => false,
        }
    })
}

fn write_card_field(card: &mut Map<String, Value>, field: &str, value: &str, display_field: bool) {
    if display_field {
        card.insert("text".to_string(), Value::String(value.to_string()));
        card.insert("title".to_string(), Value::String(value.to_string()));
    } else {
        card.insert(field.to_string(), Value::String(value.to_string()));
    }
}

/// Shallow-merge `patch` into `data.items[index]`.
pub fn update_value_item(
    doc: &PageContent,
    section_key: &str,
    index: usize,
    patch: &Map<String, Value>,
) -> PageContent {
    patch_array_entry(doc, section_key, "items", index, patch)
}

/// Shallow-merge `patch` into `data.categories[index]`.
pub fn update_category(
    doc: &PageContent,
    section_key: &str,
    index: usize,
    patch: &Map<String, Value>,
) -> PageContent {
    patch_array_entry(doc, section_key, "categories", index, patch)
}

/// Remove `data.categories[index]`.
pub fn delete_category(doc: &PageContent, section_key: &str, index: usize) -> PageContent {
    splice_array_entry(doc, section_key, "categories", index)
}

/// Shallow-merge `patch` into `data.featuredItems[index]`.
pub fn update_featured_item(
    doc: &PageContent,
    section_key: &str,
    index: usize,
    patch: &Map<String, Value>,
) -> PageContent {
    patch_array_entry(doc, section_key, "featuredItems", index, patch)
}

/// Remove `data.featuredItems[index]`.
pub fn delete_featured_item(doc: &PageContent, section_key: &str, index: usize) -> PageContent {
    splice_array_entry(doc, section_key, "featuredItems", index)
}

/// Shallow-merge `patch` into `data.faqs[index]`.
pub fn update_faq(
    doc: &PageContent,
    section_key: &str,
    index: usize,
    patch: &Map<String, Value>,
) -> PageContent {
    patch_array_entry(doc, section_key, "faqs", index, patch)
}

/// Remove `data.faqs[index]`.
pub fn delete_faq(doc: &PageContent, section_key: &str, index: usize) -> PageContent {
    splice_array_entry(doc, section_key, "faqs", index)
}

fn patch_array_entry(
    doc: &PageContent,
    section_key: &str,
    array_name: &str,
    index: usize,
    patch: &Map<String, Value>,
) -> PageContent {
    mutate_section_array(doc, section_key, array_name, |entries| {
        match entries.get_mut(index) {
            Some(Value::Object(existing)) => {
                for (key, value) in patch {
                    existing.insert(key.clone(), value.clone());
                }
                true
            }
            _ => false,
        }
    })
}

fn splice_array_entry(
    doc: &PageContent,
    section_key: &str,
    array_name: &str,
    index: usize,
) -> PageContent {
    mutate_section_array(doc, section_key, array_name, |entries| {
        if index < entries.len() {
            entries.remove(index);
            true
        } else {
            false
        }
    })
}

/// Clone the document and hand the named section array to `mutate`.
///
/// Returns the input unchanged when `sections.{key}.data.{array}` does not
/// resolve to an array, or when `mutate` reports a no-op.
fn mutate_section_array(
    doc: &PageContent,
    section_key: &str,
    array_name: &str,
    mutate: impl FnOnce(&mut Vec<Value>) -> bool,
) -> PageContent {
    let mut next = doc.as_value().clone();

    let mutated = match next
        .get_mut("sections")
        .and_then(|sections| sections.get_mut(section_key))
        .and_then(|section| section.get_mut("data"))
        .and_then(|data| data.get_mut(array_name))
        .and_then(Value::as_array_mut)
    {
        Some(entries) => mutate(entries),
        None => false,
    };

    if mutated {
        PageContent::from_value(next).unwrap_or_else(|_| doc.clone())
    } else {
        doc.clone()
    }
}
