// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule outcome types shared by the analyzers and the compliance aggregator.

use serde::{Deserialize, Serialize};

/// Base URL of the rule reference pages linked from violations
pub const HELP_URL_BASE: &str = "https://dequeuniversity.com/rules/axe/4.6";

/// How badly a violation affects users
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    /// Blocks access to content entirely
    Critical,
    /// Seriously hinders access
    Serious,
    /// Some difficulty accessing content
    Moderate,
    /// Nuisance
    Minor,
}

impl Impact {
    /// All impacts, most severe first
    pub const ALL: [Impact; 4] = [Impact::Critical, Impact::Serious, Impact::Moderate, Impact::Minor];
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Impact::Critical => write!(f, "critical"),
            Impact::Serious => write!(f, "serious"),
            Impact::Moderate => write!(f, "moderate"),
            Impact::Minor => write!(f, "minor"),
        }
    }
}

/// WCAG conformance level, ordered by strictness
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl WcagLevel {
    /// All levels in scoring priority order
    pub const ALL: [WcagLevel; 3] = [WcagLevel::A, WcagLevel::AA, WcagLevel::AAA];
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WcagLevel::A => write!(f, "A"),
            WcagLevel::AA => write!(f, "AA"),
            WcagLevel::AAA => write!(f, "AAA"),
        }
    }
}

/// The four POUR principles of WCAG
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Principle {
    Perceivable,
    Operable,
    Understandable,
    Robust,
}

impl Principle {
    pub const ALL: [Principle; 4] = [
        Principle::Perceivable,
        Principle::Operable,
        Principle::Understandable,
        Principle::Robust,
    ];
}

impl std::fmt::Display for Principle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Principle::Perceivable => write!(f, "Perceivable"),
            Principle::Operable => write!(f, "Operable"),
            Principle::Understandable => write!(f, "Understandable"),
            Principle::Robust => write!(f, "Robust"),
        }
    }
}

/// One rule outcome for one element: either a pass or a violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityCheck {
    /// Stable rule identifier (e.g., "image-alt")
    pub rule_id: String,
    /// Set on violations, absent on passes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    pub description: String,
    /// Remediation text
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub help_url: String,
    /// Serialized snippets of the elements involved
    pub nodes: Vec<String>,
}

impl AccessibilityCheck {
    /// Create a passing check for one element
    pub fn pass(rule_id: &str, description: &str, node: String) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            impact: None,
            description: description.to_string(),
            help: String::new(),
            help_url: String::new(),
            nodes: vec![node],
        }
    }

    /// Create a violation for one element
    pub fn violation(rule_id: &str, impact: Impact, description: &str, node: String) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            impact: Some(impact),
            description: description.to_string(),
            help: String::new(),
            help_url: format!("{}/{}", HELP_URL_BASE, rule_id),
            nodes: vec![node],
        }
    }

    /// Set remediation text
    pub fn with_help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    /// Point the help URL at a reference page whose name differs from the rule id
    pub fn with_help_page(mut self, page: &str) -> Self {
        self.help_url = format!("{}/{}", HELP_URL_BASE, page);
        self
    }

    pub fn is_violation(&self) -> bool {
        self.impact.is_some()
    }

    /// First captured element snippet
    pub fn element(&self) -> &str {
        self.nodes.first().map(String::as_str).unwrap_or("")
    }
}

/// Outcome of one document traversal, in traversal order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub passes: Vec<AccessibilityCheck>,
    pub violations: Vec<AccessibilityCheck>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a check under passes or violations depending on its impact
    pub fn record(&mut self, check: AccessibilityCheck) {
        if check.is_violation() {
            self.violations.push(check);
        } else {
            self.passes.push(check);
        }
    }

    /// Passes recorded for a rule
    pub fn passes_for(&self, rule_id: &str) -> Vec<&AccessibilityCheck> {
        self.passes.iter().filter(|c| c.rule_id == rule_id).collect()
    }

    /// Violations recorded for a rule
    pub fn violations_for(&self, rule_id: &str) -> Vec<&AccessibilityCheck> {
        self.violations.iter().filter(|c| c.rule_id == rule_id).collect()
    }

    /// Total number of checks
    pub fn len(&self) -> usize {
        self.passes.len() + self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty() && self.violations.is_empty()
    }

    pub fn has_violations(&self) -> bool {
        !self.violations.is_empty()
    }
}
