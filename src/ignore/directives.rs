//! Shared directive parsing: rule-pattern matching, bracket-list parsing, and the
//! `thailint:`/`noqa`/legacy `design-lint:` literal synonyms (spec.md §4.2, §2 of SPEC_FULL.md).
//!
//! Grounded in `examples/original_source/src/linter_config/ignore.py`'s `_rule_matches` and
//! bracket-regex parsing (`re.search(r"ignore\[([^\]]+)\]", code)`), translated to `regex`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Returns true if `rule_id` matches `pattern`. A trailing `*` is a prefix match on the
/// dotted category (`foo.*` matches any `foo.`-prefixed id); otherwise exact match. Matching
/// is case-sensitive for rule ids (spec.md §4.2).
pub fn rule_matches(rule_id: &str, pattern: &str) -> bool {
    match pattern.strip_suffix('*') {
        Some(prefix) => rule_id.starts_with(prefix),
        None => rule_id == pattern,
    }
}

/// True if any pattern in the comma-separated bracket list matches `rule_id` (the list is
/// ORed per spec.md §4.2).
pub fn any_rule_matches(rule_id: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| rule_matches(rule_id, p.trim()))
}

/// Extracts the comma-separated rule-pattern list out of `literal[...]` in `text`, if present.
/// Malformed brackets (unclosed, e.g. `ignore[unclosed`) return `None` rather than raising
/// (spec.md §4.2: "treated as no match and never raise").
fn extract_bracket_list(text: &str, literal: &str) -> Option<Vec<String>> {
    static BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\[\]]*)\]").ok().unwrap());
    let idx = text.find(literal)?;
    let rest = &text[idx + literal.len()..];
    // Only consider a `[...]` that directly follows the literal (possibly after nothing else).
    let caps = BRACKET.captures(rest)?;
    if caps.get(0)?.start() != 0 {
        return None;
    }
    let inner = caps.get(1)?.as_str();
    Some(inner.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
}

/// A directive keyword that may be bracketed (e.g. `ignore`, `ignore-file`, `ignore-next-line`)
/// paired with the literal prefixes that introduce it (`# thailint: `, `# noqa`, the legacy
/// `# design-lint: ` synonym).
pub struct DirectiveMatch {
    /// `None` means "applies to all rules"; `Some(patterns)` means only the listed rules.
    pub rule_patterns: Option<Vec<String>>,
}

/// Looks for `keyword` (optionally followed by a bracketed rule list) introduced by one of the
/// recognized literals, case-insensitively for the literal itself. Returns `None` if the
/// keyword isn't present at all.
pub fn find_directive(text: &str, keyword: &str) -> Option<DirectiveMatch> {
    let lower = text.to_ascii_lowercase();
    for literal in directive_literals(keyword) {
        let literal_lower = literal.to_ascii_lowercase();
        if let Some(idx) = lower.find(&literal_lower) {
            let after = idx + literal_lower.len();
            // Require a word boundary so `ignore` doesn't match `ignore-file`/`ignore-next-line`.
            let boundary_ok = text[after..]
                .chars()
                .next()
                .is_none_or(|c| !(c.is_alphanumeric() || c == '-'));
            if boundary_ok {
                let rule_patterns = extract_bracket_list(&text[idx..], &literal);
                return Some(DirectiveMatch { rule_patterns });
            }
        }
    }
    None
}

/// `# noqa` / `# noqa: <rule>` synonym handling (spec.md §4.2 level 5): `noqa` has a `:`
/// separator instead of brackets and only ever applies to the bare `ignore` keyword.
pub fn find_noqa_directive(text: &str) -> Option<DirectiveMatch> {
    let lower = text.to_ascii_lowercase();
    let idx = lower.find("# noqa").or_else(|| lower.find("#noqa"))?;
    let rest = &text[idx..];
    if let Some(colon) = rest.find(':') {
        let rule = rest[colon + 1..].trim();
        let rule = rule.split_whitespace().next().unwrap_or("").to_string();
        if rule.is_empty() {
            return Some(DirectiveMatch { rule_patterns: None });
        }
        return Some(DirectiveMatch {
            rule_patterns: Some(vec![rule]),
        });
    }
    Some(DirectiveMatch { rule_patterns: None })
}

fn directive_literals(keyword: &str) -> Vec<String> {
    vec![
        format!("# thailint: {keyword}"),
        format!("#thailint: {keyword}"),
        format!("# design-lint: {keyword}"),
        format!("#design-lint: {keyword}"),
    ]
}

impl DirectiveMatch {
    pub fn applies_to(&self, rule_id: &str) -> bool {
        match &self.rule_patterns {
            None => true,
            Some(patterns) => any_rule_matches(rule_id, patterns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_rule_pattern_matches_prefix() {
        assert!(rule_matches("literals.magic-number", "literals.*"));
        assert!(!rule_matches("literals.magic-number", "other.*"));
    }

    #[test]
    fn bare_pattern_matches_exactly() {
        assert!(rule_matches("dry.duplicate-code", "dry.duplicate-code"));
        assert!(!rule_matches("dry.duplicate-code", "dry"));
    }

    #[test]
    fn malformed_bracket_is_not_a_match_and_does_not_panic() {
        let m = find_directive("x = 1  # thailint: ignore[unclosed", "ignore");
        let m = m.unwrap();
        assert!(m.rule_patterns.is_none());
    }

    #[test]
    fn bracket_list_is_parsed_and_ored() {
        let m = find_directive("x = 1  # thailint: ignore[a.*, b.exact]", "ignore").unwrap();
        assert!(m.applies_to("a.whatever"));
        assert!(m.applies_to("b.exact"));
        assert!(!m.applies_to("c.other"));
    }

    #[test]
    fn noqa_with_rule_suffix_is_honored() {
        let m = find_noqa_directive("x = 1  # noqa: dry.duplicate-code").unwrap();
        assert!(m.applies_to("dry.duplicate-code"));
        assert!(!m.applies_to("other.rule"));
    }

    #[test]
    fn ignore_keyword_does_not_match_ignore_file_or_ignore_next_line() {
        assert!(find_directive("# thailint: ignore-file", "ignore").is_none());
        assert!(find_directive("# thailint: ignore-next-line", "ignore").is_none());
        assert!(find_directive("# thailint: ignore-file[a.*]", "ignore-file").is_some());
    }

    #[test]
    fn bare_noqa_applies_to_all_rules() {
        let m = find_noqa_directive("x = 1  # noqa").unwrap();
        assert!(m.applies_to("anything"));
    }
}
