//! The duplicate-constants subsystem (spec.md §4.6): extracts module/file-level uppercase
//! constant definitions and groups them by exact-name or fuzzy-name match.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDefinition {
    pub name: String,
    pub value: String,
    pub file_path: String,
    pub line: usize,
}

/// Antonym pairs that block a fuzzy match even when the edit distance/word-set otherwise
/// agrees (spec.md §4.6): `MIN_TIMEOUT` and `MAX_TIMEOUT` are not duplicates of each other.
const ANTONYMS: &[(&str, &str)] = &[
    ("MIN", "MAX"),
    ("START", "END"),
    ("FIRST", "LAST"),
    ("OPEN", "CLOSE"),
    ("BEGIN", "FINISH"),
    ("ENABLE", "DISABLE"),
];

/// Single-letter/short type-parameter-style names excluded even though they're "uppercase"
/// (spec.md §4.6: "a configurable single-letter-name filter excludes T, P, K, V, etc.").
const TYPE_PARAM_NAMES: &[&str] = &["T", "P", "K", "V", "E", "U", "R"];

fn is_candidate_name(name: &str) -> bool {
    if name.len() < 2 || name.starts_with('_') {
        return false;
    }
    if TYPE_PARAM_NAMES.contains(&name) {
        return false;
    }
    name.chars().all(|c| c.is_ascii_uppercase() || c == '_' || c.is_ascii_digit())
}

/// Python module-level constants: `NAME = expr` at column 0 (class-level and function-local
/// definitions are indented and therefore excluded, matching spec.md §4.6).
pub fn extract_python(lines: &[&str], file_path: &str) -> Vec<ConstantDefinition> {
    static ASSIGN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z][A-Z0-9_]*)\s*(?::[^=]+)?=\s*(.+?)\s*$").unwrap());
    let mut out = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if line.starts_with(char::is_whitespace) || line.trim().is_empty() {
            continue;
        }
        if let Some(caps) = ASSIGN.captures(line) {
            let name = caps.get(1).unwrap().as_str();
            if is_candidate_name(name) {
                out.push(ConstantDefinition {
                    name: name.to_string(),
                    value: caps.get(2).unwrap().as_str().trim_end_matches(',').to_string(),
                    file_path: file_path.to_string(),
                    line: idx + 1,
                });
            }
        }
    }
    out
}

/// TypeScript file-level `const NAME = expr` at column 0. `let`/`var` never count, and neither
/// do class-level or function-local definitions, since both are indented (spec.md §4.6).
pub fn extract_typescript(lines: &[&str], file_path: &str) -> Vec<ConstantDefinition> {
    static ASSIGN: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?:export\s+)?const\s+([A-Z][A-Z0-9_]*)\s*(?::[^=]+)?=\s*(.+?);?\s*$").unwrap());
    let mut out = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        if line.starts_with(char::is_whitespace) || line.trim().is_empty() {
            continue;
        }
        if let Some(caps) = ASSIGN.captures(line) {
            let name = caps.get(1).unwrap().as_str();
            if is_candidate_name(name) {
                out.push(ConstantDefinition {
                    name: name.to_string(),
                    value: caps.get(2).unwrap().as_str().to_string(),
                    file_path: file_path.to_string(),
                    line: idx + 1,
                });
            }
        }
    }
    out
}

/// Two constant names "match" if identical, or if both have ≥ 2 underscore-delimited words
/// and either their word-sets are equal or their Levenshtein distance ≤ 2 — unless an antonym
/// pair among the differing tokens rules the match out (spec.md §4.6).
pub fn names_match(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let words_a: Vec<&str> = a.split('_').filter(|s| !s.is_empty()).collect();
    let words_b: Vec<&str> = b.split('_').filter(|s| !s.is_empty()).collect();
    if words_a.len() < 2 || words_b.len() < 2 {
        return false;
    }

    let set_a: std::collections::HashSet<&str> = words_a.iter().copied().collect();
    let set_b: std::collections::HashSet<&str> = words_b.iter().copied().collect();
    let word_sets_equal = set_a == set_b;
    let edit_distance_close = levenshtein::levenshtein(a, b) <= 2;

    if !word_sets_equal && !edit_distance_close {
        return false;
    }
    !has_antonym_pair(&words_a, &words_b)
}

fn has_antonym_pair(a: &[&str], b: &[&str]) -> bool {
    let diff_a: Vec<&str> = a.iter().filter(|w| !b.contains(w)).copied().collect();
    let diff_b: Vec<&str> = b.iter().filter(|w| !a.contains(w)).copied().collect();
    for da in &diff_a {
        for db in &diff_b {
            for (x, y) in ANTONYMS {
                let forward = da.eq_ignore_ascii_case(x) && db.eq_ignore_ascii_case(y);
                let backward = da.eq_ignore_ascii_case(y) && db.eq_ignore_ascii_case(x);
                if forward || backward {
                    return true;
                }
            }
        }
    }
    false
}

/// Groups `defs` into match clusters (union-find over pairwise `names_match`), keeping only
/// clusters whose members span at least `min_occurrences` distinct files.
pub fn group_matches(defs: &[ConstantDefinition], min_occurrences: usize) -> Vec<Vec<usize>> {
    let n = defs.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], x: usize) -> usize {
        if parent[x] != x {
            parent[x] = find(parent, parent[x]);
        }
        parent[x]
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if names_match(&defs[i].name, &defs[j].name) {
                let ri = find(&mut parent, i);
                let rj = find(&mut parent, j);
                if ri != rj {
                    parent[ri] = rj;
                }
            }
        }
    }

    // IndexMap keeps clusters in first-member order, so a single deterministic pass
    // (no sort-by-key step) already matches the orchestrator's eventual (line, column,
    // rule_id) ordering for the common case of one cluster per occurrence.
    let mut clusters: IndexMap<usize, Vec<usize>> = IndexMap::new();
    for i in 0..n {
        let root = find(&mut parent, i);
        clusters.entry(root).or_default().push(i);
    }

    clusters
        .into_values()
        .filter(|indices| {
            let files: std::collections::HashSet<&str> =
                indices.iter().map(|&i| defs[i].file_path.as_str()).collect();
            files.len() >= min_occurrences
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_python_module_level_constant_only() {
        let lines = vec!["API_TIMEOUT = 30", "    INDENTED = 1", "x = API_TIMEOUT"];
        let defs = extract_python(&lines, "a.py");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "API_TIMEOUT");
        assert_eq!(defs[0].value, "30");
    }

    #[test]
    fn excludes_single_letter_type_params_and_leading_underscore() {
        let lines = vec!["T = 1", "_PRIVATE = 2", "OK = 3"];
        let defs = extract_python(&lines, "a.py");
        assert_eq!(defs.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(), vec!["OK"]);
    }

    #[test]
    fn typescript_let_and_var_do_not_count() {
        let lines = vec!["let MAYBE = 1;", "var ALSO_NOT = 2;", "const REAL = 3;"];
        let defs = extract_typescript(&lines, "a.ts");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "REAL");
    }

    #[test]
    fn fuzzy_word_set_match() {
        assert!(names_match("API_TIMEOUT", "TIMEOUT_API"));
    }

    #[test]
    fn fuzzy_edit_distance_match() {
        assert!(names_match("MAX_RETRY_COUNT", "MAX_RETRY_COUNTS"));
    }

    #[test]
    fn antonym_pair_blocks_match() {
        assert!(!names_match("MIN_TIMEOUT", "MAX_TIMEOUT"));
        assert!(!names_match("START_INDEX", "END_INDEX"));
    }

    #[test]
    fn single_word_names_never_fuzzy_match() {
        assert!(!names_match("TIMEOUT", "TIMEOUTS"));
    }

    #[test]
    fn groups_require_minimum_distinct_files() {
        let defs = vec![
            ConstantDefinition {
                name: "API_TIMEOUT".into(),
                value: "30".into(),
                file_path: "a.py".into(),
                line: 1,
            },
            ConstantDefinition {
                name: "TIMEOUT_API".into(),
                value: "60".into(),
                file_path: "b.py".into(),
                line: 1,
            },
        ];
        let groups = group_matches(&defs, 2);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
    }
}
