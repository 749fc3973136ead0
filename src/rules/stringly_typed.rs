//! `stringly_typed.*` (spec.md §4.8): cross-file rule. Detects membership tests, if/elif
//! equality chains, match/switch string patterns, and string-literal call arguments, then
//! groups the results by fingerprint in `finalize` and reports every occurrence site once the
//! fingerprint has been seen in `min_occurrences` distinct files.
//!
//! Python detection walks the native AST (`rustpython_ast`); TypeScript/JavaScript detection
//! walks the shared `tree-sitter` tree, mirroring the inline-walker pattern in
//! `rules::nesting`'s `ts_function_violations`. Grounded in
//! `examples/original_source/src/linters/stringly_typed/typescript/analyzer.py`'s facade,
//! which coordinates call and comparison trackers into one unified result shape — this rule
//! keeps that shape but folds both trackers into a single buffered `Detection` vec.

use crate::analyzers::{Language, Tree};
use crate::lint_context::LintContext;
use crate::rule::Rule;
use crate::violation::{Severity, Violation};
use rustpython_ast::{Expr, Stmt};
use std::collections::BTreeSet;

const RULE_ID_PREFIX: &str = "stringly_typed";
const DEFAULT_MIN_OCCURRENCES: usize = 2;
const DEFAULT_MIN_VALUES_FOR_ENUM: usize = 2;
const DEFAULT_MAX_VALUES_FOR_ENUM: usize = 6;

#[derive(Debug, Clone)]
struct Detection {
    file_path: String,
    line: usize,
    kind: &'static str,
    values: Vec<String>,
}

#[derive(Clone, Default)]
pub struct StringlyTypedRule {
    detections: Vec<Detection>,
    config: Option<ResolvedConfig>,
}

#[derive(Clone)]
struct ResolvedConfig {
    min_occurrences: usize,
    min_values_for_enum: usize,
    max_values_for_enum: usize,
    require_cross_file: bool,
    allowed_string_sets: Vec<BTreeSet<String>>,
    exclude_variables: Vec<String>,
}

impl Rule for StringlyTypedRule {
    fn rule_id(&self) -> &'static str {
        "stringly_typed.cross-file-duplication"
    }

    fn description(&self) -> &'static str {
        "string literals used as implicit enums across files should be a shared constant or enum type"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python, Language::TypeScript, Language::JavaScript]
    }

    fn check(&mut self, ctx: &LintContext) -> Vec<Violation> {
        let config = self.config.get_or_insert_with(|| resolve_config(ctx)).clone();

        match ctx.ast() {
            Ok(Tree::Python(py)) => {
                for f in py.functions() {
                    walk_python(f.body, &ctx.file_content, &ctx.file_path, &config, &mut self.detections);
                }
            }
            Ok(Tree::TypeScript(ts)) => {
                walk_typescript(ts, &ctx.file_path, &config, &mut self.detections);
            }
            _ => {}
        }
        Vec::new()
    }

    fn finalize(&mut self) -> Vec<Violation> {
        let config = self.config.clone().unwrap_or_else(default_config);
        let detections = std::mem::take(&mut self.detections);

        let mut groups: std::collections::BTreeMap<(String, &'static str), Vec<usize>> = Default::default();
        for (i, d) in detections.iter().enumerate() {
            groups.entry((fingerprint(&d.values), d.kind)).or_default().push(i);
        }

        let mut out = Vec::new();
        for indices in groups.values() {
            let files: BTreeSet<&str> = indices.iter().map(|&i| detections[i].file_path.as_str()).collect();
            // `require_cross_file` (default true): when true, the occurrence count that must
            // clear `min_occurrences` is the number of distinct files; when false, repeated
            // occurrences within a single file also count.
            let occurrence_count = if config.require_cross_file { files.len() } else { indices.len() };
            if occurrence_count < config.min_occurrences {
                continue;
            }
            let value_set: BTreeSet<String> = detections[indices[0]].values.iter().map(|v| v.to_lowercase()).collect();
            if config.allowed_string_sets.iter().any(|s| *s == value_set) {
                continue;
            }

            for &i in indices {
                let d = &detections[i];
                let others: Vec<String> = if config.require_cross_file {
                    files.iter().filter(|&&f| f != d.file_path).map(|s| s.to_string()).collect()
                } else {
                    // Not cross-file-only: other *lines* count, including ones in the same
                    // file, so a lone single-file repeat still gets a cross-reference.
                    indices
                        .iter()
                        .filter(|&&j| j != i)
                        .map(|&j| format!("{}:{}", detections[j].file_path, detections[j].line))
                        .collect()
                };
                out.push(
                    Violation::new(
                        format!("{RULE_ID_PREFIX}.{}", d.kind),
                        &d.file_path,
                        d.line,
                        0,
                        format!(
                            "string values [{}] repeat an implicit enum also used in {}",
                            d.values.join(", "),
                            others.join(", ")
                        ),
                        Severity::Info,
                    )
                    .with_suggestion("extract a shared enum or set of named constants"),
                );
            }
        }
        out
    }

    fn reset(&mut self) {
        self.detections.clear();
        self.config = None;
    }
}

fn default_config() -> ResolvedConfig {
    ResolvedConfig {
        min_occurrences: DEFAULT_MIN_OCCURRENCES,
        min_values_for_enum: DEFAULT_MIN_VALUES_FOR_ENUM,
        max_values_for_enum: DEFAULT_MAX_VALUES_FOR_ENUM,
        require_cross_file: true,
        allowed_string_sets: Vec::new(),
        exclude_variables: Vec::new(),
    }
}

fn resolve_config(ctx: &LintContext) -> ResolvedConfig {
    let section = ctx.rule_config("stringly_typed");
    let get = |key: &str| section.and_then(|v| v.get(key));

    let min_occurrences = get("min_occurrences").and_then(|v| v.as_u64()).map(|v| v as usize).unwrap_or(DEFAULT_MIN_OCCURRENCES);
    let min_values_for_enum = get("min_values_for_enum")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_MIN_VALUES_FOR_ENUM);
    let max_values_for_enum = get("max_values_for_enum")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_MAX_VALUES_FOR_ENUM);
    let require_cross_file = get("require_cross_file").and_then(|v| v.as_bool()).unwrap_or(true);

    let allowed_string_sets = get("allowed_string_sets")
        .and_then(|v| v.as_sequence())
        .map(|seq| {
            seq.iter()
                .filter_map(|set| set.as_sequence())
                .map(|set| set.iter().filter_map(|v| v.as_str()).map(|s| s.to_lowercase()).collect())
                .collect()
        })
        .unwrap_or_default();

    let exclude_variables = get("exclude_variables")
        .and_then(|v| v.as_sequence())
        .map(|seq| seq.iter().filter_map(|v| v.as_str()).map(str::to_string).collect())
        .unwrap_or_default();

    ResolvedConfig {
        min_occurrences,
        min_values_for_enum,
        max_values_for_enum,
        require_cross_file,
        allowed_string_sets,
        exclude_variables,
    }
}

fn fingerprint(values: &[String]) -> String {
    let mut lowered: Vec<String> = values.iter().map(|v| v.to_lowercase()).collect();
    lowered.sort();
    lowered.dedup();
    lowered.join("\u{1f}")
}

fn line_of(stmt: &Stmt, source: &str) -> usize {
    use rustpython_ast::Ranged;
    crate::analyzers::python::line_for_offset(source, stmt.range().start().to_usize())
}

fn walk_python(body: &[Stmt], source: &str, file_path: &str, config: &ResolvedConfig, out: &mut Vec<Detection>) {
    for stmt in body {
        match stmt {
            Stmt::If(s) => {
                if let Some((kind, values)) = classify_condition(&s.test, config) {
                    out.push(Detection {
                        file_path: file_path.to_string(),
                        line: line_of(stmt, source),
                        kind,
                        values,
                    });
                    walk_python(&s.body, source, file_path, config, out);
                    walk_python(&s.orelse, source, file_path, config, out);
                } else {
                    // Not a single-test pattern: look for an `if x == "a": elif x == "b": ...`
                    // chain starting here. `walk_elif_chain_tail` (not a generic recursive
                    // `walk_python` call) visits each consumed elif arm's body exactly once and
                    // skips re-running `equality_chain_values` on them, since their literals are
                    // already folded into this chain's one `Detection`.
                    if let Some(values) = equality_chain_values(s, config) {
                        out.push(Detection {
                            file_path: file_path.to_string(),
                            line: line_of(stmt, source),
                            kind: "equality-chain",
                            values,
                        });
                    }
                    walk_python(&s.body, source, file_path, config, out);
                    walk_elif_chain_tail(&s.orelse, source, file_path, config, out);
                }
            }
            Stmt::Match(m) => {
                let values: Vec<String> = m
                    .cases
                    .iter()
                    .filter_map(|case| match_case_literal(&case.pattern))
                    .collect();
                if values.len() >= config.min_values_for_enum && values.len() <= config.max_values_for_enum {
                    out.push(Detection {
                        file_path: file_path.to_string(),
                        line: line_of(stmt, source),
                        kind: "match-pattern",
                        values,
                    });
                }
                for case in &m.cases {
                    walk_python(&case.body, source, file_path, config, out);
                }
            }
            Stmt::Expr(e) => {
                if let Some(values) = call_string_args(&e.value, config) {
                    out.push(Detection {
                        file_path: file_path.to_string(),
                        line: line_of(stmt, source),
                        kind: "call-argument",
                        values,
                    });
                }
            }
            _ => {
                for nested in crate::analyzers::python::nested_bodies(stmt) {
                    walk_python(nested, source, file_path, config, out);
                }
            }
        }
    }
}

/// Recognizes `x in (…)`/`{…}`/`[…]` membership tests and `x == "a" or x == "b"` equality
/// chains with 2..`max_values_for_enum` string-literal operands.
fn classify_condition(test: &Expr, config: &ResolvedConfig) -> Option<(&'static str, Vec<String>)> {
    if let Expr::Compare(c) = test {
        if matches!(c.ops.first(), Some(rustpython_ast::CmpOp::In) | Some(rustpython_ast::CmpOp::NotIn)) {
            if is_excluded(&c.left, config) {
                return None;
            }
            let values = c.comparators.first().and_then(string_collection_literals)?;
            if values.len() >= config.min_values_for_enum && values.len() <= config.max_values_for_enum {
                return Some(("membership-test", values));
            }
        }
    }
    if let Expr::BoolOp(b) = test {
        if matches!(b.op, rustpython_ast::BoolOp::Or) {
            let mut values = Vec::new();
            let mut subject = None;
            for value in &b.values {
                let Expr::Compare(c) = value else { return None };
                if !matches!(c.ops.first(), Some(rustpython_ast::CmpOp::Eq)) {
                    return None;
                }
                if is_excluded(&c.left, config) {
                    return None;
                }
                let lit = c.comparators.first().and_then(string_literal_value)?;
                let this_subject = expr_key(&c.left);
                match &subject {
                    None => subject = Some(this_subject),
                    Some(s) if *s == this_subject => {}
                    _ => return None,
                }
                values.push(lit);
            }
            if values.len() >= config.min_values_for_enum && values.len() <= config.max_values_for_enum {
                return Some(("equality-chain", values));
            }
        }
    }
    None
}

/// Walks the elif arms already folded into a just-emitted (or attempted) equality-chain
/// detection: visits each arm's body once and recurses into the next `elif`, without
/// re-invoking `equality_chain_values` on them (that would re-detect overlapping sub-chains and
/// double-count literals already captured at the chain's head). A trailing plain `else:` (or no
/// `else` at all) falls through to the ordinary recursive walk.
fn walk_elif_chain_tail(orelse: &[Stmt], source: &str, file_path: &str, config: &ResolvedConfig, out: &mut Vec<Detection>) {
    if let [Stmt::If(next)] = orelse {
        if let Some((kind, values)) = classify_condition(&next.test, config) {
            out.push(Detection {
                file_path: file_path.to_string(),
                line: line_of(&orelse[0], source),
                kind,
                values,
            });
        }
        walk_python(&next.body, source, file_path, config, out);
        walk_elif_chain_tail(&next.orelse, source, file_path, config, out);
    } else {
        walk_python(orelse, source, file_path, config, out);
    }
}

/// Recognizes `if x == "a": ... elif x == "b": ... elif x == "c": ...` — a genuine if/elif
/// chain where each arm is its own `Stmt::If` (rustpython folds `elif` into `orelse = [If]`),
/// as distinct from the single compound `x == "a" or x == "b"` test `classify_condition`
/// already handles. Requires every arm to compare the *same* subject and walks as long as each
/// `orelse` is exactly one more `if`/`elif` arm (a trailing plain `else:` ends the chain without
/// contributing literals).
fn equality_chain_values(s: &rustpython_ast::StmtIf, config: &ResolvedConfig) -> Option<Vec<String>> {
    let mut subject = None;
    let mut values = Vec::new();
    if !collect_equality_chain(s, config, &mut subject, &mut values) {
        return None;
    }
    if values.len() >= config.min_values_for_enum && values.len() <= config.max_values_for_enum {
        Some(values)
    } else {
        None
    }
}

fn collect_equality_chain(s: &rustpython_ast::StmtIf, config: &ResolvedConfig, subject: &mut Option<String>, values: &mut Vec<String>) -> bool {
    let Expr::Compare(c) = s.test.as_ref() else { return false };
    if !matches!(c.ops.first(), Some(rustpython_ast::CmpOp::Eq)) {
        return false;
    }
    if is_excluded(&c.left, config) {
        return false;
    }
    let Some(lit) = c.comparators.first().and_then(string_literal_value) else { return false };
    let Some(this_subject) = expr_key(&c.left) else { return false };
    match subject {
        None => *subject = Some(this_subject),
        Some(sub) if *sub == this_subject => {}
        _ => return false,
    }
    values.push(lit);
    if let [rustpython_ast::Stmt::If(next)] = s.orelse.as_slice() {
        collect_equality_chain(next, config, subject, values);
    }
    true
}

fn is_excluded(expr: &Expr, config: &ResolvedConfig) -> bool {
    expr_key(expr).is_some_and(|k| config.exclude_variables.iter().any(|e| e == &k))
}

fn expr_key(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Name(n) => Some(n.id.to_string()),
        Expr::Attribute(a) => Some(a.attr.to_string()),
        _ => None,
    }
}

fn string_literal_value(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Constant(c) => match &c.value {
            rustpython_ast::Constant::Str(s) => Some(s.to_string()),
            _ => None,
        },
        _ => None,
    }
}

fn string_collection_literals(expr: &Expr) -> Option<Vec<String>> {
    let elts: &[Expr] = match expr {
        Expr::Tuple(t) => &t.elts,
        Expr::List(l) => &l.elts,
        Expr::Set(s) => &s.elts,
        _ => return None,
    };
    let values: Vec<String> = elts.iter().filter_map(string_literal_value).collect();
    if values.len() == elts.len() && !values.is_empty() {
        Some(values)
    } else {
        None
    }
}

fn match_case_literal(pattern: &rustpython_ast::Pattern) -> Option<String> {
    match pattern {
        rustpython_ast::Pattern::MatchValue(v) => string_literal_value(&v.value),
        _ => None,
    }
}

/// `some_call("a")` / `some_call("a", "b")` — a call whose every argument is a string literal
/// and there are 2..`max_values_for_enum` of them.
fn call_string_args(expr: &Expr, config: &ResolvedConfig) -> Option<Vec<String>> {
    let Expr::Call(call) = expr else { return None };
    if call.args.is_empty() {
        return None;
    }
    let values: Vec<String> = call.args.iter().filter_map(string_literal_value).collect();
    if values.len() != call.args.len() || values.len() < config.min_values_for_enum || values.len() > config.max_values_for_enum {
        return None;
    }
    Some(values)
}

fn walk_typescript(ts: &crate::analyzers::typescript::TsTree, file_path: &str, config: &ResolvedConfig, out: &mut Vec<Detection>) {
    ts_walk(ts, ts.tree.root_node(), file_path, config, out);
}

fn ts_walk(
    ts: &crate::analyzers::typescript::TsTree,
    node: tree_sitter::Node,
    file_path: &str,
    config: &ResolvedConfig,
    out: &mut Vec<Detection>,
) {
    match node.kind() {
        "call_expression" => {
            if let Some(args) = node.child_by_field_name("arguments") {
                if args.kind() == "arguments" {
                    let values = ts_string_children(ts, args);
                    if values.len() >= config.min_values_for_enum && values.len() <= config.max_values_for_enum && values.len() == non_comma_child_count(args) {
                        out.push(Detection {
                            file_path: file_path.to_string(),
                            line: node.start_position().row + 1,
                            kind: "call-argument",
                            values,
                        });
                    }
                }
                // `.includes(x)` on an array literal: arr-literal `.includes(...)` membership test.
                if let Some(callee) = node.child_by_field_name("function") {
                    if callee.kind() == "member_expression" {
                        if let Some(prop) = callee.child_by_field_name("property") {
                            if ts.text(prop) == "includes" {
                                if let Some(obj) = callee.child_by_field_name("object") {
                                    if obj.kind() == "array" {
                                        let values = ts_string_children(ts, obj);
                                        if values.len() >= config.min_values_for_enum && values.len() <= config.max_values_for_enum {
                                            out.push(Detection {
                                                file_path: file_path.to_string(),
                                                line: node.start_position().row + 1,
                                                kind: "membership-test",
                                                values,
                                            });
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
        "switch_statement" => {
            let values = ts_switch_case_literals(ts, node);
            if values.len() >= config.min_values_for_enum && values.len() <= config.max_values_for_enum {
                out.push(Detection {
                    file_path: file_path.to_string(),
                    line: node.start_position().row + 1,
                    kind: "match-pattern",
                    values,
                });
            }
        }
        _ => {}
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        ts_walk(ts, child, file_path, config, out);
    }
}

fn ts_string_children(ts: &crate::analyzers::typescript::TsTree, parent: tree_sitter::Node) -> Vec<String> {
    let mut cursor = parent.walk();
    parent
        .children(&mut cursor)
        .filter(|c| c.kind() == "string")
        .map(|c| ts_string_literal_value(ts, c))
        .collect()
}

fn non_comma_child_count(parent: tree_sitter::Node) -> usize {
    let mut cursor = parent.walk();
    parent.children(&mut cursor).filter(|c| !matches!(c.kind(), "(" | ")" | ",")).count()
}

fn ts_string_literal_value(ts: &crate::analyzers::typescript::TsTree, node: tree_sitter::Node) -> String {
    ts.text(node).trim_matches(|c| c == '"' || c == '\'' || c == '`').to_string()
}

fn ts_switch_case_literals(ts: &crate::analyzers::typescript::TsTree, switch: tree_sitter::Node) -> Vec<String> {
    let mut out = Vec::new();
    let mut cursor = switch.walk();
    for child in switch.children(&mut cursor) {
        if child.kind() == "switch_case" {
            if let Some(value) = child.child(1) {
                if value.kind() == "string" {
                    out.push(ts_string_literal_value(ts, value));
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn cross_file_membership_test_duplication_is_flagged() {
        let mut rule = StringlyTypedRule::default();
        let ctx_a = LintContext::new(
            "a.py",
            Language::Python,
            "def f(env):\n    if env in (\"staging\", \"production\"):\n        pass\n".to_string(),
            HashMap::new(),
        );
        let ctx_b = LintContext::new(
            "b.py",
            Language::Python,
            "def g(env):\n    if env not in (\"staging\", \"production\"):\n        pass\n".to_string(),
            HashMap::new(),
        );
        rule.check(&ctx_a);
        rule.check(&ctx_b);
        let violations = rule.finalize();
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.rule_id == "stringly_typed.membership-test"));
    }

    #[test]
    fn single_occurrence_is_not_flagged() {
        let mut rule = StringlyTypedRule::default();
        let ctx = LintContext::new(
            "a.py",
            Language::Python,
            "def f(env):\n    if env in (\"staging\", \"production\"):\n        pass\n".to_string(),
            HashMap::new(),
        );
        rule.check(&ctx);
        assert!(rule.finalize().is_empty());
    }

    #[test]
    fn equality_chain_against_string_literals_is_detected() {
        let mut rule = StringlyTypedRule::default();
        let ctx_a = LintContext::new(
            "a.py",
            Language::Python,
            "def f(role):\n    if role == \"admin\" or role == \"owner\":\n        pass\n".to_string(),
            HashMap::new(),
        );
        let ctx_b = LintContext::new(
            "b.py",
            Language::Python,
            "def g(role):\n    if role == \"admin\" or role == \"owner\":\n        pass\n".to_string(),
            HashMap::new(),
        );
        rule.check(&ctx_a);
        rule.check(&ctx_b);
        assert_eq!(rule.finalize().len(), 2);
    }

    #[test]
    fn reset_clears_buffered_detections() {
        let mut rule = StringlyTypedRule::default();
        let ctx = LintContext::new(
            "a.py",
            Language::Python,
            "def f(env):\n    if env in (\"staging\", \"production\"):\n        pass\n".to_string(),
            HashMap::new(),
        );
        rule.check(&ctx);
        rule.reset();
        assert!(rule.finalize().is_empty());
    }

    fn config_with(entries: &[(&str, serde_yml::Value)]) -> HashMap<String, serde_yml::Value> {
        let mut mapping = serde_yml::Mapping::new();
        for (k, v) in entries {
            mapping.insert(serde_yml::Value::String((*k).to_string()), v.clone());
        }
        let mut metadata = HashMap::new();
        metadata.insert("stringly_typed".to_string(), serde_yml::Value::Mapping(mapping));
        metadata
    }

    #[test]
    fn genuine_if_elif_equality_chain_is_detected() {
        let mut rule = StringlyTypedRule::default();
        let src = "def f(role):\n    if role == \"admin\":\n        pass\n    elif role == \"owner\":\n        pass\n";
        let ctx_a = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        let ctx_b = LintContext::new("b.py", Language::Python, src.to_string(), HashMap::new());
        rule.check(&ctx_a);
        rule.check(&ctx_b);
        let violations = rule.finalize();
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.rule_id == "stringly_typed.equality-chain"));
    }

    #[test]
    fn elif_chain_arms_are_not_double_counted_as_their_own_sub_chains() {
        let mut rule = StringlyTypedRule::default();
        let src = "def f(role):\n    if role == \"admin\":\n        pass\n    elif role == \"owner\":\n        pass\n    elif role == \"guest\":\n        pass\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), HashMap::new());
        rule.check(&ctx);
        // Only the head of the chain should have produced a Detection; a second file with the
        // identical chain is needed to cross the min_occurrences bar.
        assert!(rule.finalize().is_empty());
    }

    #[test]
    fn min_values_for_enum_raises_the_detection_floor() {
        let mut rule = StringlyTypedRule::default();
        let metadata = config_with(&[("min_values_for_enum", serde_yml::Value::from(3))]);
        let ctx_a = LintContext::new(
            "a.py",
            Language::Python,
            "def f(env):\n    if env in (\"staging\", \"production\"):\n        pass\n".to_string(),
            metadata.clone(),
        );
        let ctx_b = LintContext::new(
            "b.py",
            Language::Python,
            "def g(env):\n    if env in (\"staging\", \"production\"):\n        pass\n".to_string(),
            metadata,
        );
        rule.check(&ctx_a);
        rule.check(&ctx_b);
        // Only 2 string values in the membership test; min_values_for_enum: 3 excludes it.
        assert!(rule.finalize().is_empty());
    }

    #[test]
    fn require_cross_file_false_flags_repeats_within_a_single_file() {
        let mut rule = StringlyTypedRule::default();
        let metadata = config_with(&[("require_cross_file", serde_yml::Value::from(false))]);
        let src = "def f(env):\n    if env in (\"staging\", \"production\"):\n        pass\n\n\
def g(env2):\n    if env2 in (\"staging\", \"production\"):\n        pass\n";
        let ctx = LintContext::new("a.py", Language::Python, src.to_string(), metadata);
        rule.check(&ctx);
        let violations = rule.finalize();
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.file_path == "a.py"));
    }
}
