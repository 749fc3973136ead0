//! JSON formatter: a lossless array of `Violation` (spec.md §3: "serialization to mapping
//! form is lossless"), `serde_json` with `preserve_order` (matching the crate's dependency
//! choice for deterministic field ordering).

use crate::violation::Violation;

pub fn render(violations: &[Violation]) -> String {
    serde_json::to_string_pretty(violations).unwrap_or_else(|_| "[]".to_string())
}
