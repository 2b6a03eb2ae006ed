// SPDX-License-Identifier: PMPL-1.0-or-later
//! Accessibility analyzers and the rule evaluator that drives them.
//!
//! Each analyzer owns one rule id and decides per element whether it
//! applies. The [`Evaluator`] walks the document once, depth-first and
//! pre-order, and hands every element to every applicable analyzer in a
//! fixed order. State that must persist between elements (heading levels)
//! lives in a [`ScanContext`] created fresh for each call.

pub mod alt_text;
pub mod aria;
pub mod contrast;
pub mod forms;
pub mod headings;
pub mod landmarks;
pub mod links;
pub mod style;
pub mod target_size;

use crate::dom::{Document, NodeId};
use crate::model::{AccessibilityCheck, ScanResult};
use headings::HeadingTracker;
use tracing::{debug, info};

/// Trait implemented by all analyzers
pub trait Analyzer: Send + Sync {
    /// Human-readable name of this analyzer
    fn name(&self) -> &str;

    /// Rule id attached to every check this analyzer records
    fn rule_id(&self) -> &str;

    /// Whether the element matches this analyzer's tag/attribute precondition
    fn applies_to(&self, doc: &Document, node: NodeId) -> bool;

    /// Evaluate one element, recording passes and violations on `ctx`
    fn evaluate(&self, doc: &Document, node: NodeId, ctx: &mut ScanContext);
}

/// Mutable state scoped to a single traversal
#[derive(Debug, Default)]
pub struct ScanContext {
    /// Heading levels seen so far, consumed by the heading-order analyzer
    pub headings: HeadingTracker,
    result: ScanResult,
}

impl ScanContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pass or violation
    pub fn record(&mut self, check: AccessibilityCheck) {
        self.result.record(check);
    }

    pub fn into_result(self) -> ScanResult {
        self.result
    }
}

/// The analyzers run by default, in dispatch order
pub fn default_analyzers() -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(alt_text::ImageAltAnalyzer),
        Box::new(headings::HeadingOrderAnalyzer),
        Box::new(forms::FormLabelAnalyzer),
        Box::new(links::LinkNameAnalyzer),
        Box::new(aria::AriaValidAnalyzer),
        Box::new(landmarks::LandmarkAnalyzer),
        Box::new(contrast::ContrastAnalyzer),
        Box::new(target_size::TargetSizeAnalyzer),
    ]
}

/// Runs an ordered set of analyzers over a document
pub struct Evaluator {
    analyzers: Vec<Box<dyn Analyzer>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Evaluator running [`default_analyzers`]
    pub fn new() -> Self {
        Self::with_analyzers(default_analyzers())
    }

    /// Evaluator running a custom analyzer set, in the given order
    pub fn with_analyzers(analyzers: Vec<Box<dyn Analyzer>>) -> Self {
        Self { analyzers }
    }

    pub fn analyzers(&self) -> &[Box<dyn Analyzer>] {
        &self.analyzers
    }

    /// Traverse the document once and collect every rule outcome.
    ///
    /// Deterministic for a given tree: all traversal state is created here
    /// and dropped on return.
    pub fn evaluate(&self, doc: &Document) -> ScanResult {
        let mut ctx = ScanContext::new();

        for analyzer in &self.analyzers {
            debug!("Running {} ({})", analyzer.name(), analyzer.rule_id());
        }

        for node in doc.preorder() {
            if !doc.is_element(node) {
                continue;
            }
            for analyzer in &self.analyzers {
                if analyzer.applies_to(doc, node) {
                    analyzer.evaluate(doc, node, &mut ctx);
                }
            }
        }

        let result = ctx.into_result();
        for v in &result.violations {
            debug!(
                "Violation: {}, impact: {}, {}",
                v.rule_id,
                v.impact.map(|i| i.to_string()).unwrap_or_default(),
                v.description
            );
        }
        for p in &result.passes {
            debug!("Pass: {}, {}", p.rule_id, p.description);
        }
        info!(
            "Evaluation found {} violation(s), {} pass(es)",
            result.violations.len(),
            result.passes.len()
        );

        result
    }
}

/// Evaluate a document with the default analyzers
pub fn evaluate(doc: &Document) -> ScanResult {
    Evaluator::new().evaluate(doc)
}

/// Whether `node` is an element whose tag is one of `tags`
pub(crate) fn tag_in(doc: &Document, node: NodeId, tags: &[&str]) -> bool {
    doc.tag_name(node).is_some_and(|t| tags.contains(&t))
}
