//! Handler for the `rule` subcommand: lists every registered rule's id and description.
//! Grounded in `examples/sthagen-rvben-rumdl/src/commands/rule.rs`'s `handle_rule` listing
//! shape, trimmed to the id+description pair spec.md's data model actually defines for a Rule.

use crate::registry::all_rules;
use std::path::Path;
use std::process::ExitCode;

pub fn run_rule_list() -> ExitCode {
    let rules = all_rules(Path::new("."));
    for rule in &rules {
        println!("{:<30} {}", rule.rule_id(), rule.description());
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_rule_without_panicking() {
        run_rule_list();
    }
}
