// SPDX-License-Identifier: PMPL-1.0-or-later
//! Compliance aggregation: turns a [`ScanResult`] into WCAG level and POUR
//! principle scores plus a structured violation list.
//!
//! Scoring rules:
//! - A pass counts toward every level and every principle of its rule.
//! - A violation counts toward the first of its levels (A, AA, AAA order)
//!   and toward every one of its principles.
//! - A bucket scores `passes / (passes + violations) * 100`. Empty level
//!   buckets score 0, empty principle buckets score 100.
//! - The overall score is the mean of the four principle scores, forced to
//!   0 when all four are 0.

pub mod classification;

pub use classification::{ClassificationTable, RuleClassification};

use crate::model::{Impact, Principle, ScanResult, WcagLevel};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};
use uuid::Uuid;

/// Score of a level bucket no rule fired in
pub const EMPTY_LEVEL_SCORE: f64 = 0.0;

/// Score of a principle bucket no rule fired in
pub const EMPTY_PRINCIPLE_SCORE: f64 = 100.0;

/// A violation as it appears in a compliance report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceViolation {
    pub rule_id: String,
    /// Level the violation is credited to; `None` when unclassified
    pub wcag_level: Option<WcagLevel>,
    /// WCAG success criterion, when the table names one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion: Option<String>,
    pub impact: Option<Impact>,
    pub description: String,
    /// First element snippet captured for the violation
    pub element: String,
    /// Remediation text
    pub suggestion: String,
}

impl ComplianceViolation {
    /// Level as shown in reports
    pub fn level_label(&self) -> String {
        self.wcag_level
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unclassified".to_string())
    }
}

/// Scored compliance report for one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    pub project_id: Uuid,
    pub url: String,
    pub generated_at: DateTime<Utc>,
    pub overall_score: f64,
    #[serde(rename = "levelAScore")]
    pub level_a_score: f64,
    #[serde(rename = "levelAAScore")]
    pub level_aa_score: f64,
    #[serde(rename = "levelAAAScore")]
    pub level_aaa_score: f64,
    pub perceivable_score: f64,
    pub operable_score: f64,
    pub understandable_score: f64,
    pub robust_score: f64,
    pub violations: Vec<ComplianceViolation>,
}

impl ComplianceReport {
    /// Attach the project and page the report describes
    pub fn with_target(mut self, project_id: Uuid, url: &str) -> Self {
        self.project_id = project_id;
        self.url = url.to_string();
        self
    }

    pub fn level_score(&self, level: WcagLevel) -> f64 {
        match level {
            WcagLevel::A => self.level_a_score,
            WcagLevel::AA => self.level_aa_score,
            WcagLevel::AAA => self.level_aaa_score,
        }
    }

    pub fn principle_score(&self, principle: Principle) -> f64 {
        match principle {
            Principle::Perceivable => self.perceivable_score,
            Principle::Operable => self.operable_score,
            Principle::Understandable => self.understandable_score,
            Principle::Robust => self.robust_score,
        }
    }

    /// Violations credited to `level` (`None` selects unclassified ones)
    pub fn violations_at(&self, level: Option<WcagLevel>) -> Vec<&ComplianceViolation> {
        self.violations.iter().filter(|v| v.wcag_level == level).collect()
    }

    /// Violations with the given impact
    pub fn violations_with(&self, impact: Impact) -> Vec<&ComplianceViolation> {
        self.violations.iter().filter(|v| v.impact == Some(impact)).collect()
    }

    pub fn has_critical(&self) -> bool {
        !self.violations_with(Impact::Critical).is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    passes: usize,
    violations: usize,
}

impl Tally {
    fn score(&self, empty: f64) -> f64 {
        let total = self.passes + self.violations;
        if total == 0 {
            empty
        } else {
            self.passes as f64 / total as f64 * 100.0
        }
    }
}

/// Score a scan against a classification table.
///
/// Never fails. The report's project id is nil and its url empty until
/// [`ComplianceReport::with_target`] is applied.
pub fn aggregate(scan: &ScanResult, table: &ClassificationTable) -> ComplianceReport {
    let mut levels: BTreeMap<WcagLevel, Tally> = BTreeMap::new();
    let mut principles: BTreeMap<Principle, Tally> = BTreeMap::new();

    for pass in &scan.passes {
        for level in table.levels(&pass.rule_id) {
            levels.entry(level).or_default().passes += 1;
        }
        for principle in table.principles(&pass.rule_id) {
            principles.entry(principle).or_default().passes += 1;
        }
    }

    let mut violations = Vec::with_capacity(scan.violations.len());
    for check in &scan.violations {
        let level = table.primary_level(&check.rule_id);
        if let Some(level) = level {
            levels.entry(level).or_default().violations += 1;
        }
        for principle in table.principles(&check.rule_id) {
            principles.entry(principle).or_default().violations += 1;
        }

        violations.push(ComplianceViolation {
            rule_id: check.rule_id.clone(),
            wcag_level: level,
            criterion: table.criterion(&check.rule_id).map(String::from),
            impact: check.impact,
            description: check.description.clone(),
            element: check.element().to_string(),
            suggestion: check.help.clone(),
        });
    }

    let level_score = |level: WcagLevel| {
        levels
            .get(&level)
            .copied()
            .unwrap_or_default()
            .score(EMPTY_LEVEL_SCORE)
    };
    let principle_score = |principle: Principle| {
        principles
            .get(&principle)
            .copied()
            .unwrap_or_default()
            .score(EMPTY_PRINCIPLE_SCORE)
    };

    let perceivable_score = principle_score(Principle::Perceivable);
    let operable_score = principle_score(Principle::Operable);
    let understandable_score = principle_score(Principle::Understandable);
    let robust_score = principle_score(Principle::Robust);

    let principle_scores = [perceivable_score, operable_score, understandable_score, robust_score];
    let overall_score = if principle_scores.iter().all(|&s| s == 0.0) {
        0.0
    } else {
        principle_scores.iter().sum::<f64>() / principle_scores.len() as f64
    };

    let report = ComplianceReport {
        project_id: Uuid::nil(),
        url: String::new(),
        generated_at: Utc::now(),
        overall_score,
        level_a_score: level_score(WcagLevel::A),
        level_aa_score: level_score(WcagLevel::AA),
        level_aaa_score: level_score(WcagLevel::AAA),
        perceivable_score,
        operable_score,
        understandable_score,
        robust_score,
        violations,
    };

    for level in WcagLevel::ALL {
        debug!("Level {} score: {:.1}", level, report.level_score(level));
    }
    for principle in Principle::ALL {
        debug!("{} score: {:.1}", principle, report.principle_score(principle));
    }
    info!(
        "Compliance score {:.1} with {} violation(s)",
        report.overall_score,
        report.violations.len()
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccessibilityCheck;

    fn pass(rule: &str) -> AccessibilityCheck {
        AccessibilityCheck::pass(rule, "ok", "<p></p>".to_string())
    }

    fn violation(rule: &str, impact: Impact) -> AccessibilityCheck {
        AccessibilityCheck::violation(rule, impact, "bad", "<p>x</p>".to_string()).with_help("fix it")
    }

    fn scan(passes: Vec<AccessibilityCheck>, violations: Vec<AccessibilityCheck>) -> ScanResult {
        ScanResult { passes, violations }
    }

    #[test]
    fn test_empty_scan_defaults() {
        let report = aggregate(&ScanResult::new(), &ClassificationTable::builtin());
        assert_eq!(report.level_a_score, 0.0);
        assert_eq!(report.level_aa_score, 0.0);
        assert_eq!(report.level_aaa_score, 0.0);
        for principle in Principle::ALL {
            assert_eq!(report.principle_score(principle), 100.0);
        }
        assert_eq!(report.overall_score, 100.0);
        assert!(report.violations.is_empty());
    }

    #[test]
    fn test_mixed_image_results() {
        let report = aggregate(
            &scan(vec![pass("image-alt")], vec![violation("image-alt", Impact::Critical)]),
            &ClassificationTable::builtin(),
        );
        assert_eq!(report.level_a_score, 50.0);
        assert_eq!(report.perceivable_score, 50.0);
        assert_eq!(report.operable_score, 100.0);
        assert_eq!(report.overall_score, 87.5);

        let v = &report.violations[0];
        assert_eq!(v.wcag_level, Some(WcagLevel::A));
        assert_eq!(v.criterion.as_deref(), Some("1.1.1"));
        assert_eq!(v.element, "<p>x</p>");
        assert_eq!(v.suggestion, "fix it");
        assert_eq!(v.impact, Some(Impact::Critical));
    }

    #[test]
    fn test_violation_credited_to_first_level_only() {
        let table = ClassificationTable::new().with_rule(
            "multi",
            RuleClassification::new()
                .with_level(WcagLevel::AA)
                .with_level(WcagLevel::AAA),
        );
        let report = aggregate(&scan(vec![], vec![violation("multi", Impact::Minor)]), &table);
        assert_eq!(report.violations[0].wcag_level, Some(WcagLevel::AA));
        assert_eq!(report.level_aa_score, 0.0);
        // AAA saw nothing, so it keeps the empty-bucket score
        assert_eq!(report.level_aaa_score, EMPTY_LEVEL_SCORE);
    }

    #[test]
    fn test_pass_counts_toward_every_level() {
        let table = ClassificationTable::new().with_rule(
            "multi",
            RuleClassification::new()
                .with_level(WcagLevel::A)
                .with_level(WcagLevel::AAA),
        );
        let report = aggregate(
            &scan(vec![pass("multi")], vec![violation("multi", Impact::Minor)]),
            &table,
        );
        assert_eq!(report.level_a_score, 50.0);
        assert_eq!(report.level_aaa_score, 100.0);
    }

    #[test]
    fn test_violation_counts_toward_every_principle() {
        let table = ClassificationTable::new().with_rule(
            "both",
            RuleClassification::new()
                .with_principle(Principle::Operable)
                .with_principle(Principle::Robust),
        );
        let report = aggregate(
            &scan(vec![pass("both")], vec![violation("both", Impact::Serious)]),
            &table,
        );
        assert_eq!(report.operable_score, 50.0);
        assert_eq!(report.robust_score, 50.0);
        assert_eq!(report.perceivable_score, 100.0);
    }

    #[test]
    fn test_unclassified_violation_is_listed_but_unscored() {
        let report = aggregate(
            &scan(vec![], vec![violation("heading-order", Impact::Moderate)]),
            &ClassificationTable::builtin(),
        );
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].wcag_level, None);
        assert_eq!(report.violations[0].level_label(), "unclassified");
        assert_eq!(report.overall_score, 100.0);
        assert_eq!(report.violations_at(None).len(), 1);
    }

    #[test]
    fn test_all_principles_zero_forces_zero_overall() {
        let table = ClassificationTable::new().with_rule(
            "everything",
            RuleClassification::new()
                .with_principle(Principle::Perceivable)
                .with_principle(Principle::Operable)
                .with_principle(Principle::Understandable)
                .with_principle(Principle::Robust),
        );
        let report = aggregate(&scan(vec![], vec![violation("everything", Impact::Critical)]), &table);
        assert_eq!(report.overall_score, 0.0);
        assert!(report.has_critical());
    }

    #[test]
    fn test_with_target() {
        let id = Uuid::new_v4();
        let report = aggregate(&ScanResult::new(), &ClassificationTable::builtin())
            .with_target(id, "https://example.org/");
        assert_eq!(report.project_id, id);
        assert_eq!(report.url, "https://example.org/");
    }

    #[test]
    fn test_report_json_shape() {
        let report = aggregate(
            &scan(vec![], vec![violation("color-contrast", Impact::Serious)]),
            &ClassificationTable::builtin(),
        );
        let json = serde_json::to_value(&report).expect("serializable");
        assert_eq!(json["levelAAScore"], 0.0);
        assert_eq!(json["violations"][0]["wcagLevel"], "AA");
        assert_eq!(json["violations"][0]["impact"], "serious");
    }
}
