// SPDX-License-Identifier: PMPL-1.0-or-later
//! Landmark coverage - records each structural region element as a pass.
//!
//! This analyzer never reports a violation.

use crate::analyzers::{tag_in, Analyzer, ScanContext};
use crate::dom::{Document, NodeId};
use crate::model::AccessibilityCheck;

const RULE_ID: &str = "landmark";

/// Elements that define navigable page regions
pub const LANDMARK_ELEMENTS: &[&str] = &[
    "main", "nav", "header", "footer", "article", "aside", "section",
];

/// Landmark analyzer
pub struct LandmarkAnalyzer;

impl Analyzer for LandmarkAnalyzer {
    fn name(&self) -> &str {
        "Landmark Analyzer"
    }

    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn applies_to(&self, doc: &Document, node: NodeId) -> bool {
        tag_in(doc, node, LANDMARK_ELEMENTS)
    }

    fn evaluate(&self, doc: &Document, node: NodeId, ctx: &mut ScanContext) {
        let tag = doc.tag_name(node).unwrap_or_default();
        ctx.record(AccessibilityCheck::pass(
            RULE_ID,
            &format!("Page has proper {} landmark", tag),
            doc.outer_html(node),
        ));
    }
}
