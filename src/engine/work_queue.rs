// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Work Queue DAG executor with dependency counting.
//!
//! # Architecture Overview
//!
//! - Every asset starts with a counter of unfinished dependencies
//! - Assets whose counter is zero sit in the ready queue and are spawned at once
//! - When an asset materializes, each dependent's counter is decremented; dependents
//!   reaching zero join the ready queue
//! - A semaphore bounds how many assets materialize at the same time
//!
//! Unlike the level-by-level executor, a slow asset only holds back its own
//! dependents, never a whole level.
//!
//! # Failure Handling
//!
//! - **FailFast**: the first failure cancels all outstanding work through a
//!   `CancellationToken` and the run returns `ExecutionError::AssetFailed`
//! - **ContinueOnError / BestEffort**: every transitive dependent of the failed
//!   asset is recorded as skipped; independent branches keep running
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use energy_analysis::config::{AssetMap, CheckMap, DependencyGraph, EntryPoints};
//! use energy_analysis::engine::WorkQueueExecutor;
//! use energy_analysis::errors::{AssetError, FailureStrategy};
//! use energy_analysis::model::{AssetInputs, AssetValue, RegionalGroupingRecord, Table};
//! use energy_analysis::traits::{Asset, DagExecutor};
//!
//! struct Regions;
//!
//! #[async_trait]
//! impl Asset for Regions {
//!     fn id(&self) -> &'static str {
//!         "regional_grouping"
//!     }
//!
//!     fn description(&self) -> &'static str {
//!         "Hand-written regions"
//!     }
//!
//!     async fn materialize(&self, _inputs: AssetInputs) -> Result<AssetValue, AssetError> {
//!         let rows = vec![RegionalGroupingRecord {
//!             region_entity_code: "IBR".into(),
//!             region_name: "Iberia".into(),
//!             entity_code: "ESP".into(),
//!         }];
//!         Ok(AssetValue::RegionalGrouping(Table::new("regional_grouping", rows)))
//!     }
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let assets: AssetMap = vec![Arc::new(Regions) as Arc<dyn Asset>].into_iter().collect();
//! let graph = DependencyGraph::from_specs(&[Regions.spec()]);
//! let entry_points = EntryPoints::from_graph(&graph);
//!
//! let report = WorkQueueExecutor::new(4)
//!     .execute(assets, CheckMap::new(), graph, entry_points, FailureStrategy::FailFast)
//!     .await?;
//!
//! assert!(report.is_success());
//! assert_eq!(report.value("regional_grouping").map(|v| v.row_count()), Some(1));
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::config::{AssetMap, CheckMap, DependencyGraph, EntryPoints};
use crate::errors::{ExecutionError, FailureStrategy};
use crate::observability::messages::engine::{ExecutionFailed, ExecutionStarted};
use crate::observability::messages::StructuredLog;
use crate::traits::executor::DagExecutor;

use super::outcome::MaterializationReport;
use super::step::{run_asset, AssetRun};

/// Work Queue executor: starts each asset as soon as its dependencies have materialized.
pub struct WorkQueueExecutor {
    /// Maximum number of concurrent materializations.
    max_concurrency: usize,
    timeout: Option<Duration>,
}

impl WorkQueueExecutor {
    /// Clamps `max_concurrency` to at least 1.
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
            timeout: None,
        }
    }

    /// Limit how long a single asset may take to materialize.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Number of unfinished dependencies per asset.
    fn build_dependency_counts(graph: &DependencyGraph) -> HashMap<String, usize> {
        graph
            .build_reverse_dependencies()
            .into_iter()
            .map(|(id, deps)| (id, deps.len()))
            .collect()
    }

    fn fail(&self, error: ExecutionError) -> Result<MaterializationReport, ExecutionError> {
        ExecutionFailed {
            strategy: self.name(),
            error: &error,
        }
        .log();
        Err(error)
    }
}

#[async_trait]
impl DagExecutor for WorkQueueExecutor {
    fn name(&self) -> &'static str {
        "work_queue"
    }

    async fn execute(
        &self,
        assets: AssetMap,
        checks: CheckMap,
        graph: DependencyGraph,
        entrypoints: EntryPoints,
        failure_strategy: FailureStrategy,
    ) -> Result<MaterializationReport, ExecutionError> {
        let start = Instant::now();
        ExecutionStarted {
            strategy: self.name(),
            asset_count: assets.len(),
            max_concurrency: self.max_concurrency,
        }
        .log();

        let reverse_deps = graph.build_reverse_dependencies();
        let mut dependency_counts = Self::build_dependency_counts(&graph);
        let mut ready: VecDeque<String> = entrypoints
            .iter()
            .filter(|id| dependency_counts.get(id.as_str()).copied() == Some(0))
            .cloned()
            .collect();

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let cancel = CancellationToken::new();
        let mut running = JoinSet::new();
        let mut report = MaterializationReport::default();

        loop {
            while let Some(asset_id) = ready.pop_front() {
                let Some(asset) = assets.get(&asset_id).cloned() else {
                    cancel.cancel();
                    running.shutdown().await;
                    return self.fail(ExecutionError::AssetNotFound(asset_id));
                };
                let dependencies = reverse_deps
                    .get(&asset_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                let inputs = report.inputs_for(dependencies)?;
                let asset_checks = checks.for_asset(&asset_id).to_vec();
                let semaphore = semaphore.clone();
                let cancel = cancel.clone();
                let timeout = self.timeout;

                running.spawn(async move {
                    tokio::select! {
                        _ = cancel.cancelled() => None,
                        run = async {
                            let _permit = semaphore.acquire_owned().await.ok()?;
                            Some(run_asset(asset, asset_checks, inputs, timeout).await)
                        } => run,
                    }
                });
            }

            let Some(joined) = running.join_next().await else {
                break;
            };
            let run = match joined {
                Ok(Some(run)) => run,
                Ok(None) => continue,
                Err(join_error) => {
                    cancel.cancel();
                    running.shutdown().await;
                    return self.fail(ExecutionError::InternalError {
                        message: format!("Task join error: {}", join_error),
                    });
                }
            };

            if let Some(error) = run.fail_fast_error(failure_strategy) {
                cancel.cancel();
                running.shutdown().await;
                return self.fail(error);
            }

            let asset_id = run.asset_id.clone();
            let usable = run.outcome.is_usable();
            report.record(run);

            if usable {
                for dependent in graph.get_dependents(&asset_id).into_iter().flatten() {
                    let count = dependency_counts.get_mut(dependent).ok_or_else(|| {
                        ExecutionError::InternalError {
                            message: format!("asset '{}' missing from dependency counts", dependent),
                        }
                    })?;
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(dependent.clone());
                    }
                }
            } else {
                let mut downstream: Vec<String> = graph.downstream_of(&asset_id).into_iter().collect();
                downstream.sort();
                for dependent in downstream {
                    if !report.contains(&dependent) {
                        report.record(AssetRun::skipped(&dependent, asset_id.clone()));
                    }
                }
            }
        }

        if let Some(stuck) = graph.keys().find(|id| !report.contains(id)) {
            return self.fail(ExecutionError::InternalError {
                message: format!(
                    "asset '{}' never became ready; the dependency graph contains a cycle",
                    stuck
                ),
            });
        }

        report.finish(self.name(), failure_strategy, start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_counts_match_direct_dependencies() {
        let graph = DependencyGraph(HashMap::from([
            ("energy_consumption".to_string(), vec!["energy_breakdown".to_string()]),
            ("renewable_coverage".to_string(), vec!["energy_breakdown".to_string()]),
            ("energy_breakdown".to_string(), vec![]),
        ]));
        let counts = WorkQueueExecutor::build_dependency_counts(&graph);

        assert_eq!(counts["energy_breakdown"], 2);
        assert_eq!(counts["energy_consumption"], 0);
        assert_eq!(counts["renewable_coverage"], 0);
    }

    #[tokio::test]
    async fn empty_graph_produces_an_empty_report() {
        let report = WorkQueueExecutor::new(2)
            .execute(
                AssetMap::new(),
                CheckMap::new(),
                DependencyGraph::new(),
                EntryPoints::new(),
                FailureStrategy::ContinueOnError,
            )
            .await
            .unwrap();
        assert!(report.outcomes.is_empty());
    }
}
