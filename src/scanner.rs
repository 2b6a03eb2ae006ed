// SPDX-License-Identifier: PMPL-1.0-or-later
//! File and directory scanning.
//!
//! Reads HTML from disk, hands the parsed tree to the evaluator and scores
//! the result. This is the only layer that touches the filesystem.

use crate::analyzers::Evaluator;
use crate::compliance::{aggregate, ClassificationTable, ComplianceReport};
use crate::config::ScanConfig;
use crate::dom::Document;
use crate::error::{AuditError, Result};
use crate::model::ScanResult;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;
use walkdir::WalkDir;

/// Evaluation and compliance report for one document
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub path: PathBuf,
    pub scan: ScanResult,
    pub report: ComplianceReport,
}

/// Read and parse a document. Read failures and decode failures are
/// reported as distinct errors.
pub fn load_document(path: &Path) -> Result<Document> {
    let bytes = std::fs::read(path).map_err(|source| AuditError::Fetch {
        path: path.to_path_buf(),
        source,
    })?;
    let content = String::from_utf8(bytes).map_err(|e| AuditError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(Document::parse_html(&content))
}

/// Runs evaluation and aggregation over files
pub struct Scanner {
    evaluator: Evaluator,
    table: ClassificationTable,
    config: ScanConfig,
    project_id: Uuid,
}

impl Scanner {
    pub fn new(table: ClassificationTable) -> Self {
        Self {
            evaluator: Evaluator::new(),
            table,
            config: ScanConfig::default(),
            project_id: Uuid::new_v4(),
        }
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_project_id(mut self, project_id: Uuid) -> Self {
        self.project_id = project_id;
        self
    }

    /// Evaluate and score an already parsed document
    pub fn scan_document(&self, doc: &Document, url: &str) -> (ScanResult, ComplianceReport) {
        let scan = self.evaluator.evaluate(doc);
        let report = aggregate(&scan, &self.table).with_target(self.project_id, url);
        (scan, report)
    }

    /// Scan a single file. `url` defaults to the file path.
    pub fn scan_file(&self, path: &Path, url: Option<&str>) -> Result<ScanOutcome> {
        let doc = load_document(path)?;
        let url = url
            .map(String::from)
            .unwrap_or_else(|| path.display().to_string());
        let (scan, report) = self.scan_document(&doc, &url);
        Ok(ScanOutcome {
            path: path.to_path_buf(),
            scan,
            report,
        })
    }

    /// Scan every matching file under `dir`. Unreadable files are skipped.
    pub fn scan_directory(&self, dir: &Path) -> Result<Vec<ScanOutcome>> {
        let mut outcomes = Vec::new();

        info!("Scanning directory: {}", dir.display());

        for entry in WalkDir::new(dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_str().unwrap_or("");
                if e.depth() > 0 && e.file_type().is_dir() {
                    return !self.config.exclude.iter().any(|x| x == name) && !name.starts_with('.');
                }
                true
            })
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.is_scannable(entry.path()) {
                continue;
            }

            match self.scan_file(entry.path(), None) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => warn!("Skipping {}: {}", entry.path().display(), e),
            }
        }

        info!("Scanned {} document(s)", outcomes.len());

        Ok(outcomes)
    }

    /// Scan a file or, for directories, every matching file below it
    pub fn scan_path(&self, path: &Path, url: Option<&str>) -> Result<Vec<ScanOutcome>> {
        if path.is_dir() {
            self.scan_directory(path)
        } else {
            Ok(vec![self.scan_file(path, url)?])
        }
    }

    fn is_scannable(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        self.config
            .extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext))
    }
}
