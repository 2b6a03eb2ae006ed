// SPDX-License-Identifier: PMPL-1.0-or-later
//! Image alt text analyzer - WCAG 1.1.1 Non-text Content (Level A)
//!
//! Every `<img>` needs a non-empty `alt` attribute. Decorative and
//! informative images are not told apart: `alt=""` counts as missing.

use crate::analyzers::{tag_in, Analyzer, ScanContext};
use crate::dom::{Document, NodeId};
use crate::model::{AccessibilityCheck, Impact};

const RULE_ID: &str = "image-alt";

/// Analyzer for image alt text
pub struct ImageAltAnalyzer;

impl Analyzer for ImageAltAnalyzer {
    fn name(&self) -> &str {
        "Alt Text Analyzer"
    }

    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn applies_to(&self, doc: &Document, node: NodeId) -> bool {
        tag_in(doc, node, &["img"])
    }

    fn evaluate(&self, doc: &Document, node: NodeId, ctx: &mut ScanContext) {
        let snippet = doc.outer_html(node);
        let check = match doc.attr(node, "alt") {
            Some(alt) if !alt.is_empty() => {
                AccessibilityCheck::pass(RULE_ID, "Image has appropriate alt text", snippet)
            }
            _ => AccessibilityCheck::violation(
                RULE_ID,
                Impact::Critical,
                "Image is missing alt text",
                snippet,
            )
            .with_help("Images must have alternate text"),
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
        Evaluator::with_analyzers(vec![Box::new(ImageAltAnalyzer)]).evaluate(&doc)
    }

    #[test]
    fn test_described_image_passes() {
        let result = run(r#"<img src="chart.png" alt="Q4 revenue up 15%">"#);
        assert_eq!(result.passes.len(), 1);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_missing_alt_is_critical() {
        let result = run(r#"<img src="photo.jpg">"#);
        assert_eq!(result.violations.len(), 1);
        let v = &result.violations[0];
        assert_eq!(v.impact, Some(Impact::Critical));
        assert_eq!(v.nodes, vec![r#"<img src="photo.jpg"></img>"#.to_string()]);
        assert_eq!(v.help_url, "https://dequeuniversity.com/rules/axe/4.6/image-alt");
    }

    #[test]
    fn test_empty_alt_is_a_violation() {
        let result = run(r#"<img src="divider.png" alt="">"#);
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn test_one_outcome_per_image() {
        let result = run(r#"
            <img src="a.png">
            <div><img src="b.png" alt="B"><span><img src="c.png" alt=""></span></div>
            <img src="d.png" alt="D">
        "#);
        assert_eq!(result.len(), 4);
        assert_eq!(result.passes.len(), 2);
        assert_eq!(result.violations.len(), 2);
    }
}
