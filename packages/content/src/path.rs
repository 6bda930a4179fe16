//! # Field-Path Addressing
//!
//! Dotted string addresses into a [`PageContent`] document, e.g.
//! `sections.hero.title` or `sections.faq.data.faqs.0.question`.
//!
//! Reads return `None` on any non-traversable segment. Writes deep-clone the
//! document, creating intermediate objects for missing segments. A path that
//! contains a prototype-pollution guard token (`__proto__`, `constructor`,
//! `prototype`) is refused: reads return `None`, writes return the input
//! document unchanged. Nothing here ever panics on caller input.

use serde_json::{Map, Value};

use crate::PageContent;

const GUARDED_SEGMENTS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// Whether `path` is a well-formed, safe field path.
///
/// Rejects empty paths, empty segments (`a..b`) and guard tokens.
pub fn is_valid_field_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .split('.')
            .all(|segment| !segment.is_empty() && !GUARDED_SEGMENTS.contains(&segment))
}

/// Build the canonical path to a field inside a section.
pub fn create_section_field_path(section_key: &str, field_path: &str) -> String {
    format!("sections.{section_key}.{field_path}")
}

/// Resolve `path` against the document, if every segment traverses.
///
/// Objects are traversed by key; arrays by decimal index segment.
pub fn get_value_by_path<'a>(doc: &'a PageContent, path: &str) -> Option<&'a Value> {
    if !is_valid_field_path(path) {
        return None;
    }

    let mut current = doc.as_value();
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let index: usize = segment.parse().ok()?;
                items.get(index)?
            }
            _ => return None,
        };
    }

    Some(current)
}

/// Return a new document with the location at `path` replaced by `value`.
///
/// Missing intermediate segments are created as objects. The input document
/// is returned unchanged (as a clone) when the path is invalid or an
/// intermediate segment resolves to a scalar that cannot be traversed.
pub fn update_content_by_path(doc: &PageContent, path: &str, value: Value) -> PageContent {
    if !is_valid_field_path(path) {
        return doc.clone();
    }

    let mut next = doc.as_value().clone();
    if write_path(&mut next, path, value) {
        // Root stays an object: write_path only replaces at or below a
        // top-level key.
        PageContent::from_value(next).unwrap_or_else(|_| doc.clone())
    } else {
        doc.clone()
    }
}

/// Walk `root` along `path`, creating object intermediates, and set the leaf.
/// Returns false if a segment lands on a non-container value.
fn write_path(root: &mut Value, path: &str, value: Value) -> bool {
    let segments: Vec<&str> = path.split('.').collect();
    let mut current = root;

    for (depth, segment) in segments.iter().enumerate() {
        let is_leaf = depth == segments.len() - 1;

        match current {
            Value::Object(map) => {
                if is_leaf {
                    map.insert(segment.to_string(), value);
                    return true;
                }
                current = map
                    .entry(segment.to_string())
                    .or_insert_with(|| Value::Object(Map::new()));
            }
            Value::Array(items) => {
                let Ok(index) = segment.parse::<usize>() else {
                    return false;
                };
                if index >= items.len() {
                    return false;
                }
                if is_leaf {
                    items[index] = value;
                    return true;
                }
                current = &mut items[index];
            }
            _ => return false,
        }
    }

    false
}
