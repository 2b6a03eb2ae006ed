// SPDX-License-Identifier: PMPL-1.0-or-later
//! Rule classification table: rule id -> WCAG levels, POUR principles and
//! success criterion.
//!
//! The table is plain data loaded from TOML. A built-in table ships with the
//! crate (`rules/wcag.toml`); an alternate one can be loaded from disk so
//! rule sets change without touching the analyzers.

use crate::error::{AuditError, Result};
use crate::model::{Principle, WcagLevel};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

const BUILTIN_TABLE: &str = include_str!("../../rules/wcag.toml");

/// Classification of a single rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleClassification {
    #[serde(default)]
    pub levels: BTreeSet<WcagLevel>,
    #[serde(default)]
    pub principles: BTreeSet<Principle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criterion: Option<String>,
}

impl RuleClassification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: WcagLevel) -> Self {
        self.levels.insert(level);
        self
    }

    pub fn with_principle(mut self, principle: Principle) -> Self {
        self.principles.insert(principle);
        self
    }

    pub fn with_criterion(mut self, criterion: &str) -> Self {
        self.criterion = Some(criterion.to_string());
        self
    }

    /// The level a violation is credited to: first of A, AA, AAA present
    pub fn primary_level(&self) -> Option<WcagLevel> {
        WcagLevel::ALL.into_iter().find(|l| self.levels.contains(l))
    }
}

/// Mapping from rule id to its classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationTable {
    #[serde(default)]
    pub rules: BTreeMap<String, RuleClassification>,
}

impl ClassificationTable {
    /// Empty table: every rule is unclassified
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shipped with auditbot
    pub fn builtin() -> Self {
        Self::from_toml(BUILTIN_TABLE).expect("embedded classification table is valid")
    }

    /// Parse a table from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AuditError::Classification(e.to_string()))
    }

    /// Load a table from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading classification table from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            AuditError::Classification(format!("{}: {}", path.display(), e))
        })
    }

    /// Render the table as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AuditError::Classification(e.to_string()))
    }

    /// Add or replace a rule's classification
    pub fn with_rule(mut self, rule_id: &str, classification: RuleClassification) -> Self {
        self.rules.insert(rule_id.to_string(), classification);
        self
    }

    pub fn get(&self, rule_id: &str) -> Option<&RuleClassification> {
        self.rules.get(rule_id)
    }

    /// Every level the rule belongs to, in A, AA, AAA order
    pub fn levels(&self, rule_id: &str) -> Vec<WcagLevel> {
        self.get(rule_id)
            .map(|c| c.levels.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn primary_level(&self, rule_id: &str) -> Option<WcagLevel> {
        self.get(rule_id).and_then(RuleClassification::primary_level)
    }

    /// Every principle the rule belongs to
    pub fn principles(&self, rule_id: &str) -> Vec<Principle> {
        self.get(rule_id)
            .map(|c| c.principles.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn criterion(&self, rule_id: &str) -> Option<&str> {
        self.get(rule_id).and_then(|c| c.criterion.as_deref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
