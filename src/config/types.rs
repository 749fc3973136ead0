//! Configuration schema (spec.md §4.4): a top-level mapping keyed by rule-category name,
//! each holding common options (`enabled`, `ignore`) plus rule-specific ones, with optional
//! per-language overlay subsections.
//!
//! Grounded in `examples/sthagen-rvben-rumdl/src/config/types.rs`'s `Config { global,
//! per_file_ignores, rules: BTreeMap<String, RuleConfig> }` shape — we keep the same
//! "typed global + flattened per-rule BTreeMap" layout and generalize `RuleConfig`'s single
//! `toml::Value` bag to a YAML one, since spec.md §4.4/§6 names `.thailint.yaml`/`.thailint.json`
//! rather than TOML as the config formats.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// One rule-category section of the config file: common options plus an arbitrary bag of
/// rule-specific keys (including per-language overlay subsections, e.g. `python:`/`typescript:`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleSection {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(flatten)]
    pub values: serde_yml::Mapping,
}

impl RuleSection {
    /// Looks up `key` in this section, falling back to `None` (caller supplies the rule's
    /// own default).
    pub fn get(&self, key: &str) -> Option<&serde_yml::Value> {
        self.values.get(serde_yml::Value::String(key.to_string()))
    }

    /// Looks up `key` inside a per-language overlay subsection, if present, per spec.md §4.4:
    /// "Language-specific overrides are applied by overlaying config[rule][language] on top
    /// of config[rule]".
    pub fn get_for_language<'a>(&'a self, language: &str, key: &str) -> Option<&'a serde_yml::Value> {
        self.values
            .get(serde_yml::Value::String(language.to_string()))
            .and_then(|v| v.as_mapping())
            .and_then(|m| m.get(serde_yml::Value::String(key.to_string())))
    }

    /// `get_for_language(language, key)` if present, else `get(key)` — the overlay-wins lookup
    /// every rule config struct uses.
    pub fn overlay<'a>(&'a self, language: &str, key: &str) -> Option<&'a serde_yml::Value> {
        self.get_for_language(language, key).or_else(|| self.get(key))
    }
}

/// Global (non-rule-scoped) options: file discovery behavior, standard exclusions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GlobalConfig {
    #[serde(default = "default_true")]
    pub recursive: bool,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub enable: Vec<String>,
    #[serde(default)]
    pub disable: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            exclude: Vec::new(),
            enable: Vec::new(),
            disable: Vec::new(),
        }
    }
}

/// The complete configuration loaded from `.thailint.yaml`/`.thailint.json` (spec.md §4.4/§6).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,

    /// Per-file rule ignores (`file_path pattern -> rule ids`), the directory-ignore-adjacent
    /// convenience every teacher-style config carries (mirrors `per-file-ignores` in
    /// `examples/sthagen-rvben-rumdl/src/config/types.rs`).
    #[serde(default, rename = "per-file-ignores")]
    pub per_file_ignores: BTreeMap<String, Vec<String>>,

    /// Rule-category sections (`dry`, `nesting`, `srp`, `stringly_typed`, `file_header`,
    /// `magic_numbers`, `stateless-class`, `collection-pipeline`, `lbyl`, `method-property`,
    /// `file-placement`), flattened at the top level per spec.md §4.4.
    #[serde(flatten)]
    pub rules: BTreeMap<String, RuleSection>,

    #[serde(skip)]
    pub project_root: Option<PathBuf>,
}

impl Config {
    pub fn rule_section(&self, category: &str) -> Option<&RuleSection> {
        self.rules.get(category)
    }

    pub fn is_rule_enabled(&self, category: &str, default_enabled: bool) -> bool {
        self.rule_section(category)
            .and_then(|s| s.enabled)
            .unwrap_or(default_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_prefers_language_subsection() {
        let yaml = "enabled: true\nmin_occurrences: 2\npython:\n  min_occurrences: 4\n";
        let section: RuleSection = serde_yml::from_str(yaml).unwrap();
        let v = section.overlay("python", "min_occurrences").unwrap();
        assert_eq!(v.as_i64(), Some(4));
        let v = section.overlay("typescript", "min_occurrences").unwrap();
        assert_eq!(v.as_i64(), Some(2));
    }

    #[test]
    fn default_global_config_is_recursive() {
        assert!(GlobalConfig::default().recursive);
    }
}
