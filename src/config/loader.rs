//! Config file discovery and loading (spec.md §4.4, §6).
//!
//! Search order: explicit `config_file` argument wins; else ascend from the target path
//! looking for `.thailint.yaml` then `.thailint.json` at each ancestor, stopping at the
//! project root; if none found, defaults are used. Grounded in
//! `examples/sthagen-rvben-rumdl/src/cli_utils.rs`'s ascend-and-discover pattern for
//! `.rumdl.toml`/`pyproject.toml`.

use super::types::Config;
use super::validation::{validate, ConfigError};
use std::path::{Path, PathBuf};

const YAML_NAME: &str = ".thailint.yaml";
const JSON_NAME: &str = ".thailint.json";
const IGNORE_FILE_NAME: &str = ".thailintignore";

/// Project markers recognized when no explicit config file is found, used to anchor
/// "project root" per spec.md §3 ("nearest ancestor containing .thailint.yaml, .thailint.json,
/// or a recognized project marker; default: the CWD").
const PROJECT_MARKERS: &[&str] = &[".git", "pyproject.toml", "package.json"];

/// Loads configuration starting the search from `start`. `explicit_config_file`, if given,
/// is read directly and wins over directory ascent.
pub fn load_config(start: &Path, explicit_config_file: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = explicit_config_file {
        return load_from_path(path).map(|mut c| {
            c.project_root = path.parent().map(Path::to_path_buf);
            c
        });
    }

    let mut dir = if start.is_dir() { start } else { start.parent().unwrap_or(start) };
    loop {
        let yaml = dir.join(YAML_NAME);
        if yaml.is_file() {
            let mut config = load_from_path(&yaml)?;
            config.project_root = Some(dir.to_path_buf());
            return Ok(config);
        }
        let json = dir.join(JSON_NAME);
        if json.is_file() {
            let mut config = load_from_path(&json)?;
            config.project_root = Some(dir.to_path_buf());
            return Ok(config);
        }
        if PROJECT_MARKERS.iter().any(|m| dir.join(m).exists()) {
            let mut config = Config::default();
            config.project_root = Some(dir.to_path_buf());
            return Ok(config);
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    let mut config = Config::default();
    config.project_root = Some(start.to_path_buf());
    Ok(config)
}

fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: Config = if path.extension().and_then(|e| e.to_str()) == Some("json") {
        serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: super::validation::ConfigParseError::Json(e.to_string()),
        })?
    } else {
        serde_yml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: super::validation::ConfigParseError::Yaml(e.to_string()),
        })?
    };

    validate(&config).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(config)
}

/// Path to the repository-level ignore file for a given project root (spec.md §4.2 level 1).
pub fn ignore_file_path(project_root: &Path) -> PathBuf {
    project_root.join(IGNORE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_yaml_config_from_ancestor_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(YAML_NAME), "global:\n  recursive: false\n").unwrap();
        let sub = tmp.path().join("a/b");
        fs::create_dir_all(&sub).unwrap();
        let config = load_config(&sub, None).unwrap();
        assert!(!config.global.recursive);
        assert_eq!(config.project_root.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path(), None).unwrap();
        assert!(config.global.recursive);
    }

    #[test]
    fn malformed_yaml_is_a_fatal_parse_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(YAML_NAME), "not: valid: yaml: [\n").unwrap();
        assert!(load_config(tmp.path(), None).is_err());
    }

    #[test]
    fn yaml_wins_over_json_at_same_directory() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(YAML_NAME), "global:\n  recursive: false\n").unwrap();
        fs::write(tmp.path().join(JSON_NAME), "{\"global\": {\"recursive\": true}}").unwrap();
        let config = load_config(tmp.path(), None).unwrap();
        assert!(!config.global.recursive);
    }
}
