// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution errors and failure handling policy for the DAG executors.

use serde::Deserialize;

use super::AssetError;

/// How an executor reacts when an asset fails to materialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStrategy {
    /// Abort the run on the first failed asset.
    #[default]
    FailFast,
    /// Record the failure, skip its dependents and keep running independent branches.
    ContinueOnError,
    /// Like `ContinueOnError`, but never fail the run as a whole.
    BestEffort,
}

impl std::fmt::Display for FailureStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FailureStrategy::FailFast => "fail_fast",
            FailureStrategy::ContinueOnError => "continue_on_error",
            FailureStrategy::BestEffort => "best_effort",
        };
        f.write_str(name)
    }
}

/// Errors that abort a DAG run.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("asset '{asset_id}' failed: {error}")]
    AssetFailed {
        asset_id: String,
        #[source]
        error: AssetError,
    },

    #[error("asset '{0}' not found in asset map")]
    AssetNotFound(String),

    #[error("no asset could be materialized")]
    NothingMaterialized,

    #[error("internal executor error: {message}")]
    InternalError { message: String },
}
