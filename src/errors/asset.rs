// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use crate::model::SchemaViolation;

/// Errors produced while materializing an asset or evaluating a check.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load '{path}': {reason}")]
    Load { path: PathBuf, reason: String },

    #[error("missing upstream asset '{0}'")]
    MissingInput(String),

    #[error("upstream asset '{asset_id}' is a {actual} table, expected {expected}")]
    WrongInput {
        asset_id: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{} schema violation(s) in '{table}', first: {}", .violations.len(), first_violation(.violations))]
    Schema {
        table: String,
        violations: Vec<SchemaViolation>,
    },

    #[error("cannot build '{asset_id}': {reason}")]
    EmptyInput { asset_id: String, reason: String },

    #[error("failed to write '{path}': {reason}")]
    Write { path: PathBuf, reason: String },

    #[error("timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

fn first_violation(violations: &[SchemaViolation]) -> String {
    violations
        .first()
        .map(|v| v.to_string())
        .unwrap_or_default()
}

impl AssetError {
    pub fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AssetError::Load {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AssetError::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
