// SPDX-License-Identifier: PMPL-1.0-or-later
//! Error types for auditbot
//!
//! Only the boundaries can fail: reading a document, decoding it, and
//! loading configuration or an alternate rule table. Evaluation and
//! aggregation never return errors.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Failed to fetch {}: {source}", path.display())]
    Fetch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Classification table error: {0}")]
    Classification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
