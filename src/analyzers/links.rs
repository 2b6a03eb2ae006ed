// SPDX-License-Identifier: PMPL-1.0-or-later
//! Link text analyzer - WCAG 2.4.4 Link Purpose (Level A)
//!
//! A link is named when any descendant text node has non-whitespace
//! content. Images, `aria-label` and `title` are not consulted.

use crate::analyzers::{tag_in, Analyzer, ScanContext};
use crate::dom::{Document, NodeId};
use crate::model::{AccessibilityCheck, Impact};

const RULE_ID: &str = "link-name";

/// Link name analyzer
pub struct LinkNameAnalyzer;

impl Analyzer for LinkNameAnalyzer {
    fn name(&self) -> &str {
        "Link Text Analyzer"
    }

    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn applies_to(&self, doc: &Document, node: NodeId) -> bool {
        tag_in(doc, node, &["a"])
    }

    fn evaluate(&self, doc: &Document, node: NodeId, ctx: &mut ScanContext) {
        let snippet = doc.outer_html(node);
        let check = if doc.descendant_text(node).is_empty() {
            AccessibilityCheck::violation(
                RULE_ID,
                Impact::Serious,
                "Link does not have descriptive text",
                snippet,
            )
            .with_help("Links must have discernible text")
        } else {
            AccessibilityCheck::pass(RULE_ID, "Link has descriptive text", snippet)
        };
        ctx.record(check);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::Evaluator;
    use crate::model::ScanResult;

    fn run(html: &str) -> ScanResult {
        let doc = Document::parse_html(html);
        Evaluator::with_analyzers(vec![Box::new(LinkNameAnalyzer)]).evaluate(&doc)
    }

    #[test]
    fn test_link_with_text() {
        let result = run(r#"<a href="/about">About us</a>"#);
        assert_eq!(result.passes.len(), 1);
    }

    #[test]
    fn test_nested_text_counts() {
        let result = run(r#"<a href="/"><span><b>Home</b></span></a>"#);
        assert_eq!(result.passes.len(), 1);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_whitespace_only_link_is_serious() {
        let result = run("<a href=\"/x\">   \n  </a>");
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].impact, Some(Impact::Serious));
    }

    #[test]
    fn test_image_only_link_is_unnamed() {
        let result = run(r#"<a href="/"><img src="logo.png" alt="Home"></a>"#);
        assert_eq!(result.violations.len(), 1);
    }
}
