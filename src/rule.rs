//! The `Rule` capability set (spec.md §3): `rule_id`, `description`, `check`, optional
//! `finalize`. Grounded in `examples/sthagen-rvben-rumdl/src/rules/md009_trailing_spaces.rs`'s
//! `impl Rule for MD009TrailingSpaces { fn name, fn description, fn check }` shape and the
//! `dyn-clone`-boxed trait object pattern used throughout rumdl's registry
//! (`dyn_clone::clone_box(&**rule)` in `src/rules/mod.rs`).
//!
//! Unlike rumdl's rules (stateless `&self`), spec.md requires a subset of rules to accumulate
//! state across every file's `check` call and emit only in `finalize` (stringly-typed,
//! duplicate-code, duplicate-constants). `check`/`finalize` therefore take `&mut self`, and
//! `reset` is the "stateful rules must clear buffers at the start of a run" contract (spec.md
//! §3 Lifecycles) made explicit rather than reconstructing the rule.

use crate::analyzers::Language;
use crate::lint_context::LintContext;
use crate::violation::Violation;
use dyn_clone::DynClone;

pub trait Rule: DynClone {
    /// Stable identifier of the form `<category>.<kind>` (e.g. `dry.duplicate-code`).
    fn rule_id(&self) -> &'static str;

    /// Human-readable one-liner, shown by the `rule`/`explain` CLI surface.
    fn description(&self) -> &'static str;

    /// Languages this rule examines; files whose language isn't in this set are skipped
    /// without the rule being invoked (spec.md §4.3).
    fn languages(&self) -> &'static [Language];

    /// Per-file analysis. Stateless rules return violations directly; stateful rules buffer
    /// internally and return an empty vec here, emitting in `finalize` instead.
    fn check(&mut self, ctx: &LintContext) -> Vec<Violation>;

    /// Cross-file analysis, called exactly once per rule per run after every file's `check`
    /// has completed (spec.md §3 invariants). Default: no cross-file component.
    fn finalize(&mut self) -> Vec<Violation> {
        Vec::new()
    }

    /// Clears any buffered cross-file state. The orchestrator calls this on every registered
    /// rule once at the start of a run (spec.md §4.1 step 5), so a rule instance can be reused
    /// across runs.
    fn reset(&mut self) {}
}

dyn_clone::clone_trait_object!(Rule);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::Severity;

    #[derive(Clone, Default)]
    struct Counter {
        seen: usize,
    }

    impl Rule for Counter {
        fn rule_id(&self) -> &'static str {
            "test.counter"
        }
        fn description(&self) -> &'static str {
            "counts files"
        }
        fn languages(&self) -> &'static [Language] {
            &[Language::Python]
        }
        fn check(&mut self, _ctx: &LintContext) -> Vec<Violation> {
            self.seen += 1;
            Vec::new()
        }
        fn finalize(&mut self) -> Vec<Violation> {
            vec![Violation::new("test.counter", "*", 1, 0, format!("saw {} files", self.seen), Severity::Info)]
        }
        fn reset(&mut self) {
            self.seen = 0;
        }
    }

    #[test]
    fn reset_clears_cross_file_state() {
        let mut rule = Counter::default();
        let ctx = LintContext::new("a.py", Language::Python, String::new(), Default::default());
        rule.check(&ctx);
        rule.check(&ctx);
        assert_eq!(rule.finalize()[0].message, "saw 2 files");
        rule.reset();
        let violations = rule.finalize();
        assert_eq!(violations[0].message, "saw 0 files");
    }
}
