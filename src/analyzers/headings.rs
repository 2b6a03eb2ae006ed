// SPDX-License-Identifier: PMPL-1.0-or-later
//! Heading order analyzer - WCAG 1.3.1 Info and Relationships
//!
//! Checks heading levels as they appear in document order:
//! - The first heading must be `<h1>`
//! - A heading may go at most one level deeper than the previous one
//!
//! Only local jumps are detected. Every heading is recorded in the
//! tracker whether it passed or not, so one skip is reported once.

use crate::analyzers::{Analyzer, ScanContext};
use crate::dom::{Document, NodeId};
use crate::model::{AccessibilityCheck, Impact};

const RULE_ID: &str = "heading-order";

/// Heading levels seen during one traversal
#[derive(Debug, Clone, Default)]
pub struct HeadingTracker {
    levels: Vec<u8>,
}

/// Verdict for a heading compared with the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingVerdict {
    Valid,
    /// First heading of the document is not h1
    FirstNotH1 { level: u8 },
    /// Level jumped by more than one
    Skipped { from: u8, to: u8 },
}

impl HeadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently recorded level
    pub fn last(&self) -> Option<u8> {
        self.levels.last().copied()
    }

    /// All recorded levels in document order
    pub fn history(&self) -> &[u8] {
        &self.levels
    }

    /// Judge `level` against the history, then append it
    pub fn observe(&mut self, level: u8) -> HeadingVerdict {
        let verdict = match self.last() {
            None if level != 1 => HeadingVerdict::FirstNotH1 { level },
            Some(last) if level > last.saturating_add(1) => HeadingVerdict::Skipped { from: last, to: level },
            _ => HeadingVerdict::Valid,
        };
        self.levels.push(level);
        verdict
    }
}

/// Numeric level of an `h1`..`h6` tag
pub fn heading_level(tag: &str) -> Option<u8> {
    let digit = tag.strip_prefix('h')?;
    match digit.parse::<u8>() {
        Ok(level @ 1..=6) if digit.len() == 1 => Some(level),
        _ => None,
    }
}

/// Heading hierarchy analyzer
pub struct HeadingOrderAnalyzer;

impl Analyzer for HeadingOrderAnalyzer {
    fn name(&self) -> &str {
        "Heading Order Analyzer"
    }

    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn applies_to(&self, doc: &Document, node: NodeId) -> bool {
        doc.tag_name(node).and_then(heading_level).is_some()
    }

    fn evaluate(&self, doc: &Document, node: NodeId, ctx: &mut ScanContext) {
        let Some(tag) = doc.tag_name(node) else {
            return;
        };
        let Some(level) = heading_level(tag) else {
            return;
        };

        let check = match ctx.headings.observe(level) {
            HeadingVerdict::Valid => {
                AccessibilityCheck::pass(RULE_ID, "Heading has valid level", doc.outer_html(node))
            }
            HeadingVerdict::FirstNotH1 { level } => AccessibilityCheck::violation(
                RULE_ID,
                Impact::Moderate,
                "First heading is not h1",
                heading_snippet(doc, node, tag),
            )
            .with_help(&format!(
                "The first heading on the page should be h1, found h{}",
                level
            )),
            HeadingVerdict::Skipped { from, to } => AccessibilityCheck::violation(
                RULE_ID,
                Impact::Moderate,
                &format!("Skipped heading level from h{} to h{}", from, to),
                heading_snippet(doc, node, tag),
            )
            .with_help(&format!(
                "Heading levels should not be skipped. Found h{} after h{}",
                to, from
            )),
        };

        ctx.record(check);
    }
}

/// `<hN>text</hN>` using only the heading's own text
fn heading_snippet(doc: &Document, node: NodeId, tag: &str) -> String {
    format!("<{tag}>{}</{tag}>", doc.own_text(node))
}
