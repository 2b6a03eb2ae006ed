// SPDX-License-Identifier: PMPL-1.0-or-later
//! Report generation for compliance reports and raw scan results.
//!
//! Supports multiple output formats:
//! - Text: human-readable scores and violations grouped by WCAG level
//! - JSON: structured reports for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use crate::compliance::ComplianceReport;
use crate::model::{Impact, Principle, ScanResult, WcagLevel};
use serde::Serialize;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI integration
    Sarif,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Sarif => write!(f, "sarif"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "sarif" => Ok(OutputFormat::Sarif),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Render compliance reports
pub fn generate_report(reports: &[ComplianceReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => generate_text_report(reports),
        OutputFormat::Json => generate_json_report(reports),
        OutputFormat::Sarif => generate_sarif_report(reports),
    }
}

/// Render the raw passes and violations of one scan.
///
/// SARIF has no notion of passes, so it falls back to JSON.
pub fn render_scan(scan: &ScanResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => scan_text(scan),
        OutputFormat::Json | OutputFormat::Sarif => serde_json::to_string_pretty(scan)
            .unwrap_or_else(|e| format!("{{\"error\": \"Failed to serialize scan: {}\"}}", e)),
    }
}

fn scan_text(scan: &ScanResult) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Scan found {} violation(s), {} pass(es)\n\n",
        scan.violations.len(),
        scan.passes.len()
    ));

    for v in &scan.violations {
        let impact = v.impact.map(|i| i.to_string()).unwrap_or_default();
        output.push_str(&format!("VIOLATION [{}] ({}) {}\n", v.rule_id, impact, v.description));
        if !v.help.is_empty() {
            output.push_str(&format!("  Help: {}\n", v.help));
        }
        output.push_str(&format!("  Element: {}\n", v.element()));
    }
    for p in &scan.passes {
        output.push_str(&format!("PASS [{}] {}\n", p.rule_id, p.description));
    }

    output
}

/// Generate human-readable text report
fn generate_text_report(reports: &[ComplianceReport]) -> String {
    let mut output = String::new();

    output.push_str("=== Auditbot WCAG Compliance Report ===\n\n");

    if reports.is_empty() {
        output.push_str("No documents scanned.\n");
        return output;
    }

    for report in reports {
        output.push_str(&format!("Target: {}\n", report.url));
        output.push_str(&format!("Overall score: {:.1}\n", report.overall_score));
        output.push_str(&format!(
            "Levels: A {:.1} | AA {:.1} | AAA {:.1}\n",
            report.level_a_score, report.level_aa_score, report.level_aaa_score
        ));
        let principles: Vec<String> = Principle::ALL
            .iter()
            .map(|p| format!("{} {:.1}", p, report.principle_score(*p)))
            .collect();
        output.push_str(&format!("Principles: {}\n", principles.join(" | ")));

        if report.violations.is_empty() {
            output.push_str("\nNo violations found.\n\n");
            continue;
        }

        let impacts: Vec<String> = Impact::ALL
            .iter()
            .map(|i| format!("{} {}", i, report.violations_with(*i).len()))
            .collect();
        output.push_str(&format!("Impacts: {}\n\n", impacts.join(" | ")));

        let groups = WcagLevel::ALL
            .iter()
            .map(|l| (format!("Level {}", l), Some(*l)))
            .chain(std::iter::once(("Unclassified".to_string(), None)));

        for (heading, level) in groups {
            let violations = report.violations_at(level);
            if violations.is_empty() {
                continue;
            }

            output.push_str(&format!("--- {} ({}) ---\n", heading, violations.len()));

            for v in violations {
                let impact = v.impact.map(|i| i.to_string()).unwrap_or_default();
                output.push_str(&format!("[{}] {} ({})\n", v.rule_id, v.description, impact));
                if let Some(ref criterion) = v.criterion {
                    output.push_str(&format!("  WCAG: {} (Level {})\n", criterion, v.level_label()));
                }
                output.push_str(&format!("  Element: {}\n", v.element));
                if !v.suggestion.is_empty() {
                    output.push_str(&format!("  Fix: {}\n", v.suggestion));
                }
                output.push('\n');
            }
        }
    }

    if reports.iter().any(ComplianceReport::has_critical) {
        output.push_str("RESULT: FAIL (critical violations found)\n");
    } else if reports.iter().any(|r| !r.violations.is_empty()) {
        output.push_str("RESULT: PASS WITH VIOLATIONS\n");
    } else {
        output.push_str("RESULT: PASS\n");
    }

    output
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    reports: &'a [ComplianceReport],
}

/// Generate JSON report
fn generate_json_report(reports: &[ComplianceReport]) -> String {
    serde_json::to_string_pretty(&JsonReport { reports }).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize reports: {}\"}}", e)
    })
}

/// SARIF report structure (simplified)
#[derive(Debug, Serialize)]
struct SarifReport {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Debug, Serialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Debug, Serialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Debug, Serialize)]
struct SarifDriver {
    name: String,
    version: String,
    #[serde(rename = "informationUri")]
    information_uri: String,
}

#[derive(Debug, Serialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Debug, Serialize)]
struct SarifMessage {
    text: String,
}

#[derive(Debug, Serialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Serialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifactLocation,
}

#[derive(Debug, Serialize)]
struct SarifArtifactLocation {
    uri: String,
}

fn sarif_level(impact: Option<Impact>) -> &'static str {
    match impact {
        Some(Impact::Critical) | Some(Impact::Serious) => "error",
        Some(Impact::Moderate) => "warning",
        Some(Impact::Minor) | None => "note",
    }
}

/// Generate SARIF report
fn generate_sarif_report(reports: &[ComplianceReport]) -> String {
    let results: Vec<SarifResult> = reports
        .iter()
        .flat_map(|report| {
            report.violations.iter().map(move |v| {
                let text = if v.suggestion.is_empty() {
                    v.description.clone()
                } else {
                    format!("{}. {}", v.description, v.suggestion)
                };

                let mut locations = Vec::new();
                if !report.url.is_empty() {
                    locations.push(SarifLocation {
                        physical_location: SarifPhysicalLocation {
                            artifact_location: SarifArtifactLocation {
                                uri: report.url.clone(),
                            },
                        },
                    });
                }

                SarifResult {
                    rule_id: v.rule_id.clone(),
                    level: sarif_level(v.impact).to_string(),
                    message: SarifMessage { text },
                    locations,
                }
            })
        })
        .collect();

    let report = SarifReport {
        schema: "https://json.schemastore.org/sarif-2.1.0.json".to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "auditbot".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    information_uri: "https://github.com/hyperpolymath/gitbot-fleet".to_string(),
                },
            },
            results,
        }],
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        format!("{{\"error\": \"Failed to serialize SARIF report: {}\"}}", e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance::{aggregate, ClassificationTable};
    use crate::model::AccessibilityCheck;
    use uuid::Uuid;

    fn sample_report() -> ComplianceReport {
        let scan = ScanResult {
            passes: vec![AccessibilityCheck::pass("link-name", "Link has descriptive text", "<a>Home</a>".into())],
            violations: vec![
                AccessibilityCheck::violation("image-alt", Impact::Critical, "Image is missing alt text", "<img></img>".into())
                    .with_help("Images must have alternate text"),
                AccessibilityCheck::violation("heading-order", Impact::Moderate, "First heading is not h1", "<h2>x</h2>".into()),
            ],
        };
        aggregate(&scan, &ClassificationTable::builtin()).with_target(Uuid::nil(), "index.html")
    }

    #[test]
    fn test_text_report_empty() {
        let report = generate_report(&[], OutputFormat::Text);
        assert!(report.contains("No documents scanned"));
    }

    #[test]
    fn test_text_report_with_violations() {
        let report = generate_report(&[sample_report()], OutputFormat::Text);
        assert!(report.contains("Target: index.html"));
        assert!(report.contains("Impacts: critical 1 | serious 0 | moderate 1 | minor 0"));
        assert!(report.contains("--- Level A (1) ---"));
        assert!(report.contains("--- Unclassified (1) ---"));
        assert!(report.contains("WCAG: 1.1.1 (Level A)"));
        assert!(report.contains("RESULT: FAIL"));
    }

    #[test]
    fn test_json_report() {
        let report = generate_report(&[sample_report()], OutputFormat::Json);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert!(parsed["reports"].is_array());
        assert_eq!(parsed["reports"][0]["url"], "index.html");
        assert_eq!(parsed["reports"][0]["violations"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_sarif_report() {
        let report = generate_report(&[sample_report()], OutputFormat::Sarif);
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("valid JSON");
        assert_eq!(parsed["version"], "2.1.0");
        let results = &parsed["runs"][0]["results"];
        assert_eq!(results[0]["ruleId"], "image-alt");
        assert_eq!(results[0]["level"], "error");
        assert_eq!(results[1]["level"], "warning");
        assert_eq!(results[0]["locations"][0]["physicalLocation"]["artifactLocation"]["uri"], "index.html");
    }

    #[test]
    fn test_render_scan_text() {
        let text = render_scan(
            &ScanResult {
                passes: vec![AccessibilityCheck::pass("landmark", "Page has proper main landmark", "<main></main>".into())],
                violations: vec![],
            },
            OutputFormat::Text,
        );
        assert!(text.contains("PASS [landmark]"));
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("sarif".parse::<OutputFormat>().unwrap(), OutputFormat::Sarif);
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
