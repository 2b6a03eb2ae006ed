// SPDX-License-Identifier: PMPL-1.0-or-later
//! Auditbot - WCAG rule evaluation and compliance scoring
//!
//! Auditbot walks a parsed HTML document once, runs a fixed set of
//! accessibility rules over every element, and folds the outcomes into
//! per-level (A/AA/AAA) and per-principle (POUR) compliance scores.
//!
//! ## Rules
//!
//! - **image-alt** (1.1.1): Images carry non-empty alternative text
//! - **heading-order** (1.3.1): First heading is h1, no skipped levels
//! - **label** (3.3.2): Form controls have an associated label
//! - **link-name** (2.4.4): Links have visible text
//! - **aria-valid** (4.1.2): ARIA attributes are not empty
//! - **landmark** (1.3.1): Landmark elements are present
//! - **color-contrast** (1.4.3): Inline text colors reach 4.5:1
//! - **target-size** (2.5.5): Inline-sized buttons and links are at least 24px
//!
//! ## Example
//!
//! ```
//! use auditbot::compliance::{aggregate, ClassificationTable};
//! use auditbot::dom::Document;
//!
//! let doc = Document::parse_html(r#"<main><h1>Hi</h1><img src="a.png"></main>"#);
//! let scan = auditbot::analyzers::evaluate(&doc);
//! let report = aggregate(&scan, &ClassificationTable::builtin());
//! assert_eq!(scan.violations.len(), 1);
//! assert!(report.level_a_score < 100.0);
//! ```

pub mod analyzers;
pub mod compliance;
pub mod config;
pub mod dom;
pub mod error;
pub mod model;
pub mod report;
pub mod scanner;

pub use error::{AuditError, Result};
