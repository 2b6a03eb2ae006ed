// SPDX-License-Identifier: PMPL-1.0-or-later
//! Color contrast analyzer - WCAG 1.4.3 Contrast (Minimum) (Level AA)
//!
//! Looks at `<p>`, `<span>` and `<div>` elements whose inline style sets both
//! a text color and a background. Ratios below 4.5:1 are violations.
//! Elements with unparseable or missing colors are skipped.

use crate::analyzers::style::{background, contrast_ratio, foreground};
use crate::analyzers::{tag_in, Analyzer, ScanContext};
use crate::dom::{Document, NodeId};
use crate::model::{AccessibilityCheck, Impact};

const RULE_ID: &str = "color-contrast";

/// Minimum ratio for normal text at level AA
pub const MIN_CONTRAST_RATIO: f64 = 4.5;

/// Inline-style contrast analyzer
pub struct ContrastAnalyzer;

impl Analyzer for ContrastAnalyzer {
    fn name(&self) -> &str {
        "Color Contrast Analyzer"
    }

    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn applies_to(&self, doc: &Document, node: NodeId) -> bool {
        tag_in(doc, node, &["p", "span", "div"]) && doc.has_attr(node, "style")
    }

    fn evaluate(&self, doc: &Document, node: NodeId, ctx: &mut ScanContext) {
        let style = doc.attr(node, "style").unwrap_or_default();
        let (Some(fg), Some(bg)) = (foreground(style), background(style)) else {
            return;
        };

        let ratio = contrast_ratio(fg, bg);
        let check = if ratio < MIN_CONTRAST_RATIO {
            AccessibilityCheck::violation(
                RULE_ID,
                Impact::Serious,
                "Text has insufficient color contrast",
                doc.outer_html(node),
            )
            .with_help(&format!(
                "Foreground and background colors must have sufficient contrast (AA: 4.5:1), found {:.2}:1",
                ratio
            ))
        } else {
            AccessibilityCheck::pass(RULE_ID, "Text has sufficient color contrast", doc.outer_html(node))
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
        Evaluator::with_analyzers(vec![Box::new(ContrastAnalyzer)]).evaluate(&doc)
    }

    #[test]
    fn test_black_on_white_passes() {
        let result = run(r#"<p style="color: #000000; background-color: #FFFFFF">ok</p>"#);
        assert_eq!(result.passes.len(), 1);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_close_grays_fail() {
        let result = run(r#"<div style="color: #777777; background: #888888">faint</div>"#);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].impact, Some(Impact::Serious));
        assert!(result.violations[0].help.contains("4.5:1"));
    }

    #[test]
    fn test_rgb_colors() {
        let result = run(r#"<span style="color: rgb(255, 255, 255); background-color: rgb(0, 0, 0)">x</span>"#);
        assert_eq!(result.passes.len(), 1);
    }

    #[test]
    fn test_named_colors_are_skipped() {
        let result = run(r#"<p style="color: white; background-color: white">x</p>"#);
        assert!(result.is_empty());
    }

    #[test]
    fn test_missing_background_is_skipped() {
        let result = run(r#"<p style="color: #777">x</p>"#);
        assert!(result.is_empty());
    }

    #[test]
    fn test_other_tags_are_ignored() {
        let result = run(r#"<section style="color: #fff; background: #fff">x</section>"#);
        assert!(result.is_empty());
    }
}
