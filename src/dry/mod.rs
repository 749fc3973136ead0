//! C6: the DRY (duplicate code) engine (spec.md §4.6): tokenization, rolling-hash windowing,
//! cross-file aggregation, and the duplicate-constants subsystem. C5 (the content-addressed
//! cache) lives alongside it in `cache.rs` since the two are tightly coupled (cache hits skip
//! tokenization entirely, per spec.md §4.6 "Cache hit path").

pub mod aggregator;
pub mod cache;
pub mod constants;
pub mod hasher;
pub mod single_statement;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

/// A hashed window of normalized source (spec.md §3). Blocks are the unit of cache storage
/// and cross-file aggregation; two blocks with equal `hash_value` are semantically identical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub file_path: String,
    pub start_line: usize,
    pub end_line: usize,
    pub snippet: String,
    pub hash_value: u64,
}

/// Resolved DRY configuration for one run, after per-language overlay (spec.md §4.4).
#[derive(Debug, Clone)]
pub struct DryConfig {
    pub min_duplicate_lines: usize,
    pub min_duplicate_tokens: usize,
    pub min_occurrences: usize,
    pub cache_enabled: bool,
    pub cache_path: Option<std::path::PathBuf>,
    pub cache_max_age_days: Option<u64>,
    pub detect_duplicate_constants: bool,
    pub min_constant_occurrences: usize,
}

impl Default for DryConfig {
    fn default() -> Self {
        Self {
            min_duplicate_lines: 3,
            min_duplicate_tokens: 30,
            min_occurrences: 2,
            cache_enabled: true,
            cache_path: None,
            cache_max_age_days: None,
            detect_duplicate_constants: true,
            min_constant_occurrences: 2,
        }
    }
}

impl DryConfig {
    /// Reads a `dry` `RuleSection`, applying per-language `min_occurrences` overlay
    /// (spec.md Open Questions: "the per-language value winning over the global one when
    /// both are set").
    pub fn from_section(section: Option<&crate::config::types::RuleSection>, language: &str) -> Self {
        let mut cfg = Self::default();
        let Some(section) = section else { return cfg };

        if let Some(v) = section.get("min_duplicate_lines").and_then(|v| v.as_u64()) {
            cfg.min_duplicate_lines = v as usize;
        }
        if let Some(v) = section.get("min_duplicate_tokens").and_then(|v| v.as_u64()) {
            cfg.min_duplicate_tokens = v as usize;
        }
        if let Some(v) = section.overlay(language, "min_occurrences").and_then(|v| v.as_u64()) {
            cfg.min_occurrences = v as usize;
        }
        if let Some(v) = section.get("cache_enabled").and_then(|v| v.as_bool()) {
            cfg.cache_enabled = v;
        }
        if let Some(v) = section.get("cache_path").and_then(|v| v.as_str()) {
            cfg.cache_path = Some(std::path::PathBuf::from(v));
        }
        if let Some(v) = section.get("cache_max_age_days").and_then(|v| v.as_u64()) {
            cfg.cache_max_age_days = Some(v);
        }
        if let Some(v) = section.get("detect_duplicate_constants").and_then(|v| v.as_bool()) {
            cfg.detect_duplicate_constants = v;
        }
        if let Some(v) = section.get("min_constant_occurrences").and_then(|v| v.as_u64()) {
            cfg.min_constant_occurrences = v as usize;
        }
        cfg
    }
}
