// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::errors::{AssetError, ExecutionError, FailureStrategy};
use crate::model::{AssetInputs, AssetValue};
use crate::observability::messages::engine::{ExecutionCompleted, ExecutionFailed};
use crate::observability::messages::StructuredLog;

use super::step::AssetRun;

/// What happened to one asset during a run.
#[derive(Debug, Clone)]
pub enum AssetOutcome {
    Materialized { rows: usize, duration: Duration },
    Failed { error: AssetError },
    /// Not run because `blocked_by` did not produce a usable value.
    Skipped { blocked_by: String },
    /// Materialized, but the blocking check `check` failed so dependents did not run.
    CheckBlocked { check: String },
}

impl AssetOutcome {
    /// Dependents may consume the value.
    pub fn is_usable(&self) -> bool {
        matches!(self, AssetOutcome::Materialized { .. })
    }

    /// The asset produced a value, whether or not its checks passed.
    pub fn produced_value(&self) -> bool {
        matches!(
            self,
            AssetOutcome::Materialized { .. } | AssetOutcome::CheckBlocked { .. }
        )
    }
}

impl Display for AssetOutcome {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            AssetOutcome::Materialized { rows, duration } => {
                write!(f, "materialized ({} rows, {:?})", rows, duration)
            }
            AssetOutcome::Failed { error } => write!(f, "failed: {}", error),
            AssetOutcome::Skipped { blocked_by } => {
                write!(f, "skipped (upstream '{}' unavailable)", blocked_by)
            }
            AssetOutcome::CheckBlocked { check } => {
                write!(f, "blocked by failing check '{}'", check)
            }
        }
    }
}

/// Result of one asset check evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckRecord {
    pub check: String,
    pub asset_id: String,
    pub blocking: bool,
    pub passed: bool,
    pub description: String,
}

/// Everything a run produced: per-asset outcomes, values and check results.
#[derive(Debug, Default)]
pub struct MaterializationReport {
    pub outcomes: BTreeMap<String, AssetOutcome>,
    pub values: HashMap<String, Arc<AssetValue>>,
    pub checks: Vec<CheckRecord>,
}

impl MaterializationReport {
    pub fn outcome(&self, asset_id: &str) -> Option<&AssetOutcome> {
        self.outcomes.get(asset_id)
    }

    pub fn value(&self, asset_id: &str) -> Option<&AssetValue> {
        self.values.get(asset_id).map(|v| v.as_ref())
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.outcomes.contains_key(asset_id)
    }

    pub fn materialized_count(&self) -> usize {
        self.outcomes.values().filter(|o| o.produced_value()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .values()
            .filter(|o| matches!(o, AssetOutcome::Failed { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes
            .values()
            .filter(|o| matches!(o, AssetOutcome::Skipped { .. }))
            .count()
    }

    /// Every asset materialized and no blocking check failed.
    pub fn is_success(&self) -> bool {
        self.outcomes.values().all(AssetOutcome::is_usable)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &CheckRecord> {
        self.checks.iter().filter(|c| !c.passed)
    }

    pub(crate) fn record(&mut self, run: AssetRun) {
        if let Some(value) = run.value {
            self.values.insert(run.asset_id.clone(), value);
        }
        self.checks.extend(run.checks);
        self.outcomes.insert(run.asset_id, run.outcome);
    }

    /// The first dependency without a usable value, traced back to the asset
    /// that actually failed when the dependency was itself skipped.
    pub(crate) fn first_unusable(&self, dependencies: &[String]) -> Option<String> {
        dependencies.iter().find_map(|dep| match self.outcomes.get(dep) {
            Some(outcome) if outcome.is_usable() => None,
            Some(AssetOutcome::Skipped { blocked_by }) => Some(blocked_by.clone()),
            _ => Some(dep.clone()),
        })
    }

    /// Upstream values for an asset whose dependencies are all usable.
    pub(crate) fn inputs_for(&self, dependencies: &[String]) -> Result<AssetInputs, ExecutionError> {
        let mut inputs = AssetInputs::new();
        for dependency in dependencies {
            let value = self
                .values
                .get(dependency)
                .ok_or_else(|| ExecutionError::InternalError {
                    message: format!("value for '{}' requested before it materialized", dependency),
                })?;
            inputs.insert(dependency.clone(), value.clone());
        }
        Ok(inputs)
    }

    /// Apply the end-of-run rules of the failure strategy and log the summary.
    pub(crate) fn finish(
        self,
        strategy: &str,
        failure_strategy: FailureStrategy,
        duration: Duration,
    ) -> Result<Self, ExecutionError> {
        if failure_strategy == FailureStrategy::ContinueOnError
            && !self.outcomes.is_empty()
            && self.materialized_count() == 0
        {
            let error = ExecutionError::NothingMaterialized;
            ExecutionFailed {
                strategy,
                error: &error,
            }
            .log();
            return Err(error);
        }

        ExecutionCompleted {
            strategy,
            materialized: self.materialized_count(),
            failed: self.failed_count(),
            skipped: self.skipped_count(),
            duration,
        }
        .log();
        Ok(self)
    }
}
