// SPDX-License-Identifier: PMPL-1.0-or-later
//! Target size analyzer - WCAG 2.5.5 Target Size (Level AAA)
//!
//! Buttons and links whose inline style gives both `width` and `height` in
//! pixels must be at least 24x24. Targets sized any other way are not
//! measured and produce no outcome.

use crate::analyzers::style::pixel_dimension;
use crate::analyzers::{tag_in, Analyzer, ScanContext};
use crate::dom::{Document, NodeId};
use crate::model::{AccessibilityCheck, Impact};

const RULE_ID: &str = "target-size";

/// Smallest acceptable width and height, in CSS pixels
pub const MIN_TARGET_PX: u32 = 24;

/// Target size analyzer
pub struct TargetSizeAnalyzer;

impl Analyzer for TargetSizeAnalyzer {
    fn name(&self) -> &str {
        "Target Size Analyzer"
    }

    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn applies_to(&self, doc: &Document, node: NodeId) -> bool {
        tag_in(doc, node, &["button", "a"]) && doc.has_attr(node, "style")
    }

    fn evaluate(&self, doc: &Document, node: NodeId, ctx: &mut ScanContext) {
        let style = doc.attr(node, "style").unwrap_or_default();
        let (Some(width), Some(height)) = (
            pixel_dimension(style, "width"),
            pixel_dimension(style, "height"),
        ) else {
            return;
        };

        let check = if width < MIN_TARGET_PX || height < MIN_TARGET_PX {
            AccessibilityCheck::violation(
                RULE_ID,
                Impact::Minor,
                "Element has insufficient target size",
                doc.outer_html(node),
            )
            .with_help(&format!(
                "Clickable targets should be at least 24x24px (AAA), found {}x{}px",
                width, height
            ))
        } else {
            AccessibilityCheck::pass(RULE_ID, "Element has sufficient target size", doc.outer_html(node))
        };
        ctx.record(check);
    }
}
