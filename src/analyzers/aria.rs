// SPDX-License-Identifier: PMPL-1.0-or-later
//! ARIA attribute analyzer - WCAG 4.1.2 Name, Role, Value (Level A)
//!
//! Any `aria-*` attribute with an empty value is invalid. Elements without
//! ARIA attributes produce no outcome at all.

use crate::analyzers::{Analyzer, ScanContext};
use crate::dom::{Document, NodeId};
use crate::model::{AccessibilityCheck, Impact};

const RULE_ID: &str = "aria-valid";

/// ARIA validity analyzer
pub struct AriaValidAnalyzer;

impl Analyzer for AriaValidAnalyzer {
    fn name(&self) -> &str {
        "ARIA Validator"
    }

    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn applies_to(&self, doc: &Document, node: NodeId) -> bool {
        doc.is_element(node)
    }

    fn evaluate(&self, doc: &Document, node: NodeId, ctx: &mut ScanContext) {
        let aria: Vec<&(String, String)> = doc
            .attrs(node)
            .iter()
            .filter(|(k, _)| k.starts_with("aria-"))
            .collect();

        if aria.is_empty() {
            return;
        }

        let invalid: Vec<&str> = aria
            .iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(k, _)| k.as_str())
            .collect();

        let check = if invalid.is_empty() {
            AccessibilityCheck::pass(RULE_ID, "ARIA attributes are valid", doc.outer_html(node))
        } else {
            AccessibilityCheck::violation(
                RULE_ID,
                Impact::Serious,
                "ARIA attribute is invalid",
                doc.outer_html(node),
            )
            .with_help(&format!(
                "ARIA attributes must be valid. Empty value for: {}",
                invalid.join(", ")
            ))
            .with_help_page("aria-valid-attr")
        };
        ctx.record(check);
    }
}
