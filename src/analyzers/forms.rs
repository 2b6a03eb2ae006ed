// SPDX-License-Identifier: PMPL-1.0-or-later
//! Form label analyzer - WCAG 3.3.2 Labels or Instructions (Level A)
//!
//! Every `<input>`, `<select>` and `<textarea>` needs a label, unless its
//! type never shows a text field. A control counts as labelled when:
//! - it carries `aria-label` or `aria-labelledby`, or
//! - it has an `id` and some `<label for="id">` is a direct child of one of
//!   its ancestors (i.e. a sibling of the control or of an ancestor)
//!
//! Placeholders are not labels.

use crate::analyzers::{tag_in, Analyzer, ScanContext};
use crate::dom::{Document, NodeId};
use crate::model::{AccessibilityCheck, Impact};

const RULE_ID: &str = "label";

/// Input types that do not need a label
const EXEMPT_INPUT_TYPES: &[&str] = &["hidden", "button", "submit", "reset", "image"];

/// Form label analyzer
pub struct FormLabelAnalyzer;

/// Attributes of a form control relevant to labelling
#[derive(Debug, Default)]
struct ControlInfo<'a> {
    id: Option<&'a str>,
    name: Option<&'a str>,
    input_type: Option<&'a str>,
    placeholder: Option<&'a str>,
    has_aria_label: bool,
}

impl<'a> ControlInfo<'a> {
    fn collect(doc: &'a Document, node: NodeId) -> Self {
        let non_empty = |name: &str| doc.attr(node, name).filter(|v| !v.is_empty());
        Self {
            id: non_empty("id"),
            name: non_empty("name"),
            input_type: non_empty("type"),
            placeholder: non_empty("placeholder"),
            has_aria_label: doc.has_attr(node, "aria-label") || doc.has_attr(node, "aria-labelledby"),
        }
    }

    fn is_exempt(&self) -> bool {
        self.input_type.is_some_and(|t| {
            EXEMPT_INPUT_TYPES
                .iter()
                .any(|exempt| t.eq_ignore_ascii_case(exempt))
        })
    }

    /// `select type="x" id="y" name="z" placeholder="w"`
    fn describe(&self, tag: &str) -> String {
        let mut desc = tag.to_string();
        let attrs = [
            ("type", self.input_type),
            ("id", self.id),
            ("name", self.name),
            ("placeholder", self.placeholder),
        ];
        for (key, value) in attrs {
            if let Some(value) = value {
                desc.push_str(&format!(" {}=\"{}\"", key, value));
            }
        }
        desc
    }
}

/// Whether a `<label for="id">` hangs directly off any ancestor of `node`
pub fn has_associated_label(doc: &Document, node: NodeId, id: &str) -> bool {
    doc.ancestors(node).any(|ancestor| {
        doc.children(ancestor).iter().any(|&child| {
            doc.tag_name(child) == Some("label") && doc.attr(child, "for") == Some(id)
        })
    })
}

impl Analyzer for FormLabelAnalyzer {
    fn name(&self) -> &str {
        "Form Label Analyzer"
    }

    fn rule_id(&self) -> &str {
        RULE_ID
    }

    fn applies_to(&self, doc: &Document, node: NodeId) -> bool {
        tag_in(doc, node, &["input", "select", "textarea"])
    }

    fn evaluate(&self, doc: &Document, node: NodeId, ctx: &mut ScanContext) {
        let info = ControlInfo::collect(doc, node);
        let has_label = info
            .id
            .is_some_and(|id| has_associated_label(doc, node, id));

        let check = if has_label || info.has_aria_label || info.is_exempt() {
            AccessibilityCheck::pass(RULE_ID, "Form element has proper labeling", doc.outer_html(node))
        } else {
            let tag = doc.tag_name(node).unwrap_or_default();
            AccessibilityCheck::violation(
                RULE_ID,
                Impact::Critical,
                "Form element does not have a label",
                doc.outer_html(node),
            )
            .with_help(&format!(
                "Form elements must have labels. Element: <{}>",
                info.describe(tag)
            ))
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
        Evaluator::with_analyzers(vec![Box::new(FormLabelAnalyzer)]).evaluate(&doc)
    }

    #[test]
    fn test_sibling_label_passes() {
        let result = run(r#"<form><label for="x">Name</label><input id="x"></form>"#);
        assert_eq!(result.passes.len(), 1);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_unlabelled_input_is_critical() {
        let result = run(r#"<form><input id="x"></form>"#);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].impact, Some(Impact::Critical));
        assert!(result.violations[0].help.contains(r#"<input id="x">"#));
    }

    #[test]
    fn test_label_on_ancestor_level_passes() {
        let result = run(r#"
            <form>
                <label for="email">Email</label>
                <div class="field"><span><input id="email" type="email"></span></div>
            </form>
        "#);
        assert_eq!(result.passes.len(), 1);
    }

    #[test]
    fn test_label_nested_elsewhere_is_not_found() {
        // The label is a child of a sibling's subtree, never of an ancestor.
        let result = run(r#"
            <form>
                <div><label for="q">Query</label></div>
                <div><input id="q"></div>
            </form>
        "#);
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn test_label_for_other_id_does_not_count() {
        let result = run(r#"<form><label for="other">Other</label><input id="x"></form>"#);
        assert_eq!(result.violations.len(), 1);
    }

    #[test]
    fn test_aria_label_passes() {
        let result = run(r#"<input type="search" aria-label="Search">"#);
        assert_eq!(result.passes.len(), 1);
    }

    #[test]
    fn test_aria_labelledby_passes_even_when_empty() {
        let result = run(r#"<textarea aria-labelledby=""></textarea>"#);
        assert_eq!(result.passes.len(), 1);
    }

    #[test]
    fn test_exempt_types_pass() {
        let result = run(r#"
            <form>
                <input type="hidden" name="csrf" value="t">
                <input type="submit" value="Go">
                <input type="reset">
                <input type="button" value="b">
                <input type="image" src="go.png" alt="Go">
            </form>
        "#);
        assert_eq!(result.passes.len(), 5);
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_placeholder_is_not_a_label() {
        let result = run(r#"<input type="text" name="q" placeholder="Search">"#);
        assert_eq!(result.violations.len(), 1);
        assert!(result.violations[0]
            .help
            .contains(r#"input type="text" name="q" placeholder="Search""#));
    }

    #[test]
    fn test_select_and_textarea_are_checked() {
        let result = run(r#"
            <form>
                <select name="size"><option>S</option></select>
                <label for="msg">Message</label>
                <textarea id="msg"></textarea>
            </form>
        "#);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.passes.len(), 1);
        assert!(result.violations[0].help.contains("<select"));
    }
}
