// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Materializing a single asset and running its checks, shared by the executors.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::Instrument;

use crate::errors::{AssetError, ExecutionError, FailureStrategy};
use crate::model::{AssetInputs, AssetValue};
use crate::observability::messages::asset::{
    AssetMaterializationFailed, AssetMaterializationStarted, AssetMaterialized, AssetSkipped,
};
use crate::observability::messages::check::{CheckFailed, CheckPassed};
use crate::observability::messages::StructuredLog;
use crate::traits::{Asset, AssetCheck};

use super::outcome::{AssetOutcome, CheckRecord};

pub(crate) struct AssetRun {
    pub asset_id: String,
    pub value: Option<Arc<AssetValue>>,
    pub outcome: AssetOutcome,
    pub checks: Vec<CheckRecord>,
}

impl AssetRun {
    pub fn skipped(asset_id: &str, blocked_by: String) -> Self {
        AssetSkipped {
            asset_id,
            blocked_by: &blocked_by,
        }
        .log();
        Self {
            asset_id: asset_id.to_string(),
            value: None,
            outcome: AssetOutcome::Skipped { blocked_by },
            checks: Vec::new(),
        }
    }

    /// The error that aborts the run, if this asset failed under fail-fast.
    pub fn fail_fast_error(&self, failure_strategy: FailureStrategy) -> Option<ExecutionError> {
        match (&self.outcome, failure_strategy) {
            (AssetOutcome::Failed { error }, FailureStrategy::FailFast) => {
                Some(ExecutionError::AssetFailed {
                    asset_id: self.asset_id.clone(),
                    error: error.clone(),
                })
            }
            _ => None,
        }
    }
}

/// Materialize `asset` from `inputs`, then evaluate `checks` against the value.
pub(crate) async fn run_asset(
    asset: Arc<dyn Asset>,
    checks: Vec<Arc<dyn AssetCheck>>,
    inputs: AssetInputs,
    timeout: Option<Duration>,
) -> AssetRun {
    let asset_id = asset.id();
    let started = AssetMaterializationStarted {
        asset_id,
        input_count: inputs.len(),
    };
    started.log();
    let span = started.span("materialize");

    let start = Instant::now();
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, asset.materialize(inputs))
            .instrument(span)
            .await
            .unwrap_or_else(|_| {
                Err(AssetError::Timeout {
                    seconds: limit.as_secs(),
                })
            }),
        None => asset.materialize(inputs).instrument(span).await,
    };
    let duration = start.elapsed();

    let value = match result {
        Ok(value) => value,
        Err(error) => {
            AssetMaterializationFailed {
                asset_id,
                error: &error,
            }
            .log();
            return AssetRun {
                asset_id: asset_id.to_string(),
                value: None,
                outcome: AssetOutcome::Failed { error },
                checks: Vec::new(),
            };
        }
    };

    let rows = value.row_count();
    AssetMaterialized {
        asset_id,
        rows,
        duration,
    }
    .log();

    let records: Vec<CheckRecord> = checks
        .iter()
        .map(|check| evaluate_check(check.as_ref(), &value))
        .collect();
    let outcome = match records.iter().find(|r| r.blocking && !r.passed) {
        Some(blocking) => AssetOutcome::CheckBlocked {
            check: blocking.check.clone(),
        },
        None => AssetOutcome::Materialized { rows, duration },
    };

    AssetRun {
        asset_id: asset_id.to_string(),
        value: Some(Arc::new(value)),
        outcome,
        checks: records,
    }
}

/// A check that cannot evaluate counts as failed.
fn evaluate_check(check: &dyn AssetCheck, value: &AssetValue) -> CheckRecord {
    let (passed, description) = match check.evaluate(value) {
        Ok(result) => (result.passed, result.description),
        Err(error) => (false, format!("check could not run: {}", error)),
    };

    if passed {
        CheckPassed {
            check: check.name(),
            asset_id: check.asset(),
            description: &description,
        }
        .log();
    } else {
        CheckFailed {
            check: check.name(),
            asset_id: check.asset(),
            blocking: check.blocking(),
            description: &description,
        }
        .log();
    }

    CheckRecord {
        check: check.name().to_string(),
        asset_id: check.asset().to_string(),
        blocking: check.blocking(),
        passed,
        description,
    }
}
