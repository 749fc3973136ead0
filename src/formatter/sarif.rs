//! SARIF v2.1.0 formatter (spec.md §6, specified at the interface level): one `results` entry
//! per violation, `ruleId`, `message.text`, `locations[0].physicalLocation.artifactLocation.uri`
//! (project-relative), `region.startLine`/`startColumn`. Tool name defaults to `thai-lint`.

use crate::violation::{Severity, Violation};
use serde::Serialize;

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const DEFAULT_TOOL_NAME: &str = "thai-lint";

#[derive(Serialize)]
struct SarifLog<'a> {
    version: &'static str,
    #[serde(rename = "$schema")]
    schema: &'static str,
    runs: Vec<SarifRun<'a>>,
}

#[derive(Serialize)]
struct SarifRun<'a> {
    tool: SarifTool<'a>,
    results: Vec<SarifResult<'a>>,
}

#[derive(Serialize)]
struct SarifTool<'a> {
    driver: SarifDriver<'a>,
}

#[derive(Serialize)]
struct SarifDriver<'a> {
    name: &'a str,
    rules: Vec<SarifRuleDescriptor<'a>>,
}

#[derive(Serialize)]
struct SarifRuleDescriptor<'a> {
    id: &'a str,
}

#[derive(Serialize)]
struct SarifResult<'a> {
    #[serde(rename = "ruleId")]
    rule_id: &'a str,
    level: &'static str,
    message: SarifMessage<'a>,
    locations: Vec<SarifLocation<'a>>,
}

#[derive(Serialize)]
struct SarifMessage<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SarifLocation<'a> {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation<'a>,
}

#[derive(Serialize)]
struct SarifPhysicalLocation<'a> {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation<'a>,
    region: SarifRegion,
}

#[derive(Serialize)]
struct SarifArtifactLocation<'a> {
    uri: &'a str,
}

#[derive(Serialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
    #[serde(rename = "startColumn")]
    start_column: usize,
}

fn sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}

/// Renders `violations` as a SARIF v2.1.0 log with the default `thai-lint` tool name.
pub fn render(violations: &[Violation]) -> String {
    render_with_tool_name(violations, DEFAULT_TOOL_NAME)
}

/// Renders `violations` as a SARIF v2.1.0 log, overriding the tool name (spec.md §6: "Tool
/// metadata is overridable").
pub fn render_with_tool_name(violations: &[Violation], tool_name: &str) -> String {
    let mut rule_ids: Vec<&str> = violations.iter().map(|v| v.rule_id.as_str()).collect();
    rule_ids.sort_unstable();
    rule_ids.dedup();

    let results = violations
        .iter()
        .map(|v| SarifResult {
            rule_id: &v.rule_id,
            level: sarif_level(v.severity),
            message: SarifMessage { text: &v.message },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifactLocation { uri: &v.file_path },
                    region: SarifRegion {
                        start_line: v.line,
                        start_column: v.column,
                    },
                },
            }],
        })
        .collect();

    let log = SarifLog {
        version: SARIF_VERSION,
        schema: SARIF_SCHEMA,
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: tool_name,
                    rules: rule_ids.into_iter().map(|id| SarifRuleDescriptor { id }).collect(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&log).unwrap_or_else(|_| "{}".to_string())
}
