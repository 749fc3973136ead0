//! Config validation (spec.md §4.4, §7): invalid regex or negative thresholds raise
//! `ConfigParseError` at load time, never silently later.

use super::types::Config;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigParseError {
    #[error("invalid YAML: {0}")]
    Yaml(String),
    #[error("invalid JSON: {0}")]
    Json(String),
    #[error("invalid regex in {field}: {source}")]
    Regex { field: String, source: regex::Error },
    #[error("{field} must be positive, got {value}")]
    OutOfRange { field: String, value: i64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: ConfigParseError,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validates the numeric thresholds and regex patterns named throughout spec.md §4.4.
/// Returns the first violation encountered; callers surface it as a fatal `ConfigError`
/// (spec.md §7: "Config errors ... fatal to the run").
pub fn validate(config: &Config) -> Result<(), ConfigParseError> {
    validate_positive_int(config, "dry", "min_duplicate_lines")?;
    validate_positive_int(config, "dry", "min_duplicate_tokens")?;
    validate_min_occurrences(config, "dry", "min_occurrences")?;
    validate_min_occurrences(config, "stringly_typed", "min_occurrences")?;
    validate_positive_int(config, "srp", "max_methods")?;
    validate_positive_int(config, "srp", "max_loc")?;
    validate_positive_int(config, "nesting", "max_depth")?;
    validate_file_placement_regexes(config)?;
    Ok(())
}

fn validate_positive_int(config: &Config, category: &str, field: &str) -> Result<(), ConfigParseError> {
    let Some(section) = config.rule_section(category) else {
        return Ok(());
    };
    let Some(value) = section.get(field) else {
        return Ok(());
    };
    let Some(n) = value.as_i64() else {
        return Ok(());
    };
    if n <= 0 {
        return Err(ConfigParseError::OutOfRange {
            field: format!("{category}.{field}"),
            value: n,
        });
    }
    Ok(())
}

fn validate_min_occurrences(config: &Config, category: &str, field: &str) -> Result<(), ConfigParseError> {
    let Some(section) = config.rule_section(category) else {
        return Ok(());
    };
    let Some(value) = section.get(field) else {
        return Ok(());
    };
    let Some(n) = value.as_i64() else {
        return Ok(());
    };
    if n < 2 {
        return Err(ConfigParseError::OutOfRange {
            field: format!("{category}.{field}"),
            value: n,
        });
    }
    Ok(())
}

fn validate_file_placement_regexes(config: &Config) -> Result<(), ConfigParseError> {
    let Some(section) = config.rule_section("file-placement") else {
        return Ok(());
    };
    for pattern in collect_all_patterns(section) {
        regex::Regex::new(&pattern).map_err(|source| ConfigParseError::Regex {
            field: "file-placement pattern".to_string(),
            source,
        })?;
    }
    Ok(())
}

fn collect_all_patterns(section: &super::types::RuleSection) -> Vec<String> {
    let mut patterns = Vec::new();
    if let Some(directories) = section.get("directories").and_then(|v| v.as_mapping()) {
        for (_, rule) in directories {
            collect_patterns_from_rule(rule, &mut patterns);
        }
    }
    if let Some(global) = section.get("global_patterns").and_then(|v| v.as_mapping()) {
        collect_patterns_from_rule(&serde_yml::Value::Mapping(global.clone()), &mut patterns);
    }
    if let Some(deny) = section.get("global_deny").and_then(|v| v.as_sequence()) {
        collect_deny_patterns(deny, &mut patterns);
    }
    patterns
}

fn collect_patterns_from_rule(rule: &serde_yml::Value, patterns: &mut Vec<String>) {
    let Some(map) = rule.as_mapping() else { return };
    if let Some(allow) = map.get(serde_yml::Value::String("allow".to_string())).and_then(|v| v.as_sequence()) {
        for p in allow {
            if let Some(s) = p.as_str() {
                patterns.push(s.to_string());
            }
        }
    }
    if let Some(deny) = map.get(serde_yml::Value::String("deny".to_string())).and_then(|v| v.as_sequence()) {
        collect_deny_patterns(deny, patterns);
    }
}

fn collect_deny_patterns(deny: &[serde_yml::Value], patterns: &mut Vec<String>) {
    for entry in deny {
        if let Some(s) = entry.as_str() {
            patterns.push(s.to_string());
        } else if let Some(map) = entry.as_mapping() {
            if let Some(p) = map.get(serde_yml::Value::String("pattern".to_string())).and_then(|v| v.as_str()) {
                patterns.push(p.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::RuleSection;

    #[test]
    fn negative_threshold_is_rejected() {
        let mut config = Config::default();
        let section: RuleSection = serde_yml::from_str("max_depth: -1\n").unwrap();
        config.rules.insert("nesting".to_string(), section);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let mut config = Config::default();
        let section: RuleSection = serde_yml::from_str("global_deny:\n  - pattern: \"[unclosed\"\n").unwrap();
        config.rules.insert("file-placement".to_string(), section);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn valid_config_passes() {
        let mut config = Config::default();
        let section: RuleSection = serde_yml::from_str("max_depth: 4\n").unwrap();
        config.rules.insert("nesting".to_string(), section);
        assert!(validate(&config).is_ok());
    }
}
