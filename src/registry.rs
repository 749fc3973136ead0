//! C3: Rule Registry (spec.md §4.3). A closed list of boxed `Rule` trait objects, constructed
//! fresh per `Linter`/orchestrator run and cloned (via `dyn_clone`) when a caller needs an
//! independent set — the same ctor-table shape as
//! `examples/sthagen-rvben-rumdl/src/rules/mod.rs`'s `pub fn all_rules() -> Vec<Box<dyn Rule>>`.

use crate::rule::Rule;
use crate::rules::*;
use std::path::Path;

/// Every rule this crate ships, in a stable order (registration order, not execution order —
/// the orchestrator re-sorts by `rule_id` before `finalize`, spec.md §4.1). `project_root`
/// anchors the DRY cache's default on-disk location (spec.md §4.5).
pub fn all_rules(project_root: &Path) -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(nesting::NestingRule),
        Box::new(srp::SrpRule),
        Box::new(collection_pipeline::CollectionPipelineRule),
        Box::new(lbyl::LbylRule),
        Box::new(stringly_typed::StringlyTypedRule::default()),
        Box::new(file_header::FileHeaderRule),
        Box::new(file_placement::FilePlacementRule),
        Box::new(magic_numbers::MagicNumbersRule),
        Box::new(method_property::MethodPropertyRule),
        Box::new(stateless_class::StatelessClassRule),
        Box::new(dry_duplicate_code::DryDuplicateCodeRule::new(project_root)),
        Box::new(dry_duplicate_constant::DryDuplicateConstantRule::default()),
    ]
}

/// Rules whose `rule_id` matches `prefix` (`rule_id == prefix` or `rule_id` starts with
/// `"{prefix}."`), the selection spec.md §4.1/§6 calls "rule-id-prefix filtering" (e.g. a
/// `--rule lbyl` CLI flag selects every `lbyl.*` sub-pattern).
pub fn rules_matching_prefix(rules: &[Box<dyn Rule>], prefix: &str) -> Vec<Box<dyn Rule>> {
    rules
        .iter()
        .filter(|r| r.rule_id() == prefix || r.rule_id().starts_with(&format!("{prefix}.")))
        .map(|r| dyn_clone::clone_box(&**r))
        .collect()
}

/// Looks up one rule by its exact `rule_id`, used by the `rule`/`explain` CLI surface.
pub fn find_rule<'a>(rules: &'a [Box<dyn Rule>], rule_id: &str) -> Option<&'a dyn Rule> {
    rules.iter().find(|r| r.rule_id() == rule_id).map(|r| r.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_id_is_unique() {
        let rules = all_rules(Path::new("."));
        let mut ids: Vec<&str> = rules.iter().map(|r| r.rule_id()).collect();
        ids.sort_unstable();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids.len(), deduped.len());
    }

    #[test]
    fn prefix_filter_selects_all_lbyl_subpatterns() {
        let rules = all_rules(Path::new("."));
        let selected = rules_matching_prefix(&rules, "lbyl");
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].rule_id(), "lbyl.precondition-check");
    }

    #[test]
    fn find_rule_by_exact_id() {
        let rules = all_rules(Path::new("."));
        assert!(find_rule(&rules, "srp.violation").is_some());
        assert!(find_rule(&rules, "nonexistent.rule").is_none());
    }
}
