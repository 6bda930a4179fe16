//! # Bulk Admin Patches
//!
//! Pure helpers behind the admin panels' bulk actions. These operate on rows
//! as loose JSON records keyed by an `id` field and report how many of the
//! requested rows were actually touched.
//!
//! "Delete" for products and content is a soft delete: it clears the
//! `is_active` and `is_featured` flags instead of removing rows.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub updated_count: usize,
    pub total_requested: usize,
}

/// Shallow-merge `patch` into every record whose `id` is in `ids`.
pub fn apply_bulk_patch(
    records: &[Value],
    ids: &[String],
    patch: &Map<String, Value>,
) -> (Vec<Value>, BulkOutcome) {
    let mut updated_count = 0;

    let next = records
        .iter()
        .map(|record| {
            let Some(existing) = record.as_object() else {
                return record.clone();
            };
            let matches = existing
                .get("id")
                .and_then(Value::as_str)
                .is_some_and(|id| ids.iter().any(|wanted| wanted == id));
            if !matches {
                return record.clone();
            }

            updated_count += 1;
            let mut merged = existing.clone();
            for (key, value) in patch {
                merged.insert(key.clone(), value.clone());
            }
            Value::Object(merged)
        })
        .collect();

    (
        next,
        BulkOutcome {
            updated_count,
            total_requested: ids.len(),
        },
    )
}

/// Soft-delete the records in `ids`: clear `is_active` and `is_featured`.
pub fn soft_delete(records: &[Value], ids: &[String]) -> (Vec<Value>, BulkOutcome) {
    let mut patch = Map::new();
    patch.insert("is_active".to_string(), Value::Bool(false));
    patch.insert("is_featured".to_string(), Value::Bool(false));
    apply_bulk_patch(records, ids, &patch)
}
