// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::{AssetMap, CheckMap, DependencyGraph, EntryPoints};
use crate::errors::{ExecutionError, FailureStrategy};
use crate::observability::messages::engine::{
    ExecutionFailed, ExecutionStarted, LevelComputationCompleted, TopologicalSortFailed,
};
use crate::observability::messages::StructuredLog;
use crate::traits::executor::DagExecutor;

use super::outcome::MaterializationReport;
use super::step::{run_asset, AssetRun};

/// Level-by-Level executor: materializes the DAG one topological level at a time.
///
/// ## Execution Strategy
///
/// 1. **Topological Level Computation**: Kahn's algorithm over the reverse
///    dependency map. Level 0 holds the source assets; level N holds the assets
///    whose dependencies all sit in levels 0..N-1.
/// 2. **Level Execution**: every asset of a level runs concurrently, bounded by a
///    semaphore of `max_concurrency` permits. The next level starts once the
///    whole level has finished.
///
/// Assets whose upstream failed, was skipped or was blocked by a check are
/// recorded as skipped instead of run. Simple to reason about, at the cost of
/// waiting for the slowest asset of each level.
pub struct LevelByLevelExecutor {
    /// Maximum number of concurrent materializations within a level
    max_concurrency: usize,
    timeout: Option<Duration>,
}

impl LevelByLevelExecutor {
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

    /// Compute topological levels, each sorted by asset id.
    ///
    /// ## Error Conditions
    /// - `InternalError` if no entry point has zero in-degree
    /// - `InternalError` if a cycle leaves assets unprocessed (validation should
    ///   have rejected the graph already)
    fn compute_topological_levels(
        &self,
        graph: &DependencyGraph,
        entrypoints: &EntryPoints,
    ) -> Result<Vec<Vec<String>>, ExecutionError> {
        if graph.is_empty() {
            return Ok(Vec::new());
        }

        let reverse_deps = graph.build_reverse_dependencies();
        let mut in_degree: HashMap<&str, usize> = reverse_deps
            .iter()
            .map(|(id, deps)| (id.as_str(), deps.len()))
            .collect();

        let mut processed: HashSet<String> = HashSet::new();
        let mut current_level: Vec<String> = entrypoints
            .iter()
            .filter(|id| in_degree.get(id.as_str()).copied() == Some(0))
            .cloned()
            .collect();
        current_level.sort();

        if current_level.is_empty() {
            return Err(ExecutionError::InternalError {
                message: "No valid entry points found - every asset has dependencies".into(),
            });
        }

        let mut levels = Vec::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        while !current_level.is_empty() {
            for id in &current_level {
                processed.insert(id.clone());
                queue.push_back(id.clone());
            }
            levels.push(std::mem::take(&mut current_level));

            while let Some(current_id) = queue.pop_front() {
                for dependent_id in graph.get_dependents(&current_id).into_iter().flatten() {
                    let degree = in_degree.get_mut(dependent_id.as_str()).ok_or_else(|| {
                        ExecutionError::InternalError {
                            message: format!(
                                "asset '{}' missing from in-degree map during topological sort",
                                dependent_id
                            ),
                        }
                    })?;
                    *degree -= 1;
                    if *degree == 0 {
                        current_level.push(dependent_id.clone());
                    }
                }
            }
            current_level.sort();
        }

        if processed.len() != graph.len() {
            let reason = "dependency graph contains cycles";
            TopologicalSortFailed { reason }.log();
            return Err(ExecutionError::InternalError {
                message: format!(
                    "Internal consistency error: {} (should have been caught during config validation)",
                    reason
                ),
            });
        }

        Ok(levels)
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
impl DagExecutor for LevelByLevelExecutor {
    fn name(&self) -> &'static str {
        "level_by_level"
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

        let levels = self.compute_topological_levels(&graph, &entrypoints)?;
        LevelComputationCompleted {
            level_count: levels.len(),
            asset_count: graph.len(),
        }
        .log();

        let reverse_deps = graph.build_reverse_dependencies();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut report = MaterializationReport::default();

        for level in &levels {
            let mut running = JoinSet::new();

            for asset_id in level {
                let Some(asset) = assets.get(asset_id).cloned() else {
                    running.shutdown().await;
                    return self.fail(ExecutionError::AssetNotFound(asset_id.clone()));
                };
                let dependencies = reverse_deps
                    .get(asset_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();

                if let Some(blocked_by) = report.first_unusable(dependencies) {
                    report.record(AssetRun::skipped(asset_id, blocked_by));
                    continue;
                }

                let inputs = match report.inputs_for(dependencies) {
                    Ok(inputs) => inputs,
                    Err(error) => {
                        running.shutdown().await;
                        return self.fail(error);
                    }
                };
                let asset_checks = checks.for_asset(asset_id).to_vec();
                let semaphore = semaphore.clone();
                let timeout = self.timeout;
                let asset_id = asset_id.clone();

                running.spawn(async move {
                    let _permit = semaphore.acquire_owned().await.map_err(|e| {
                        ExecutionError::InternalError {
                            message: format!(
                                "Failed to acquire semaphore permit for asset '{}': {}",
                                asset_id, e
                            ),
                        }
                    })?;
                    Ok::<_, ExecutionError>(run_asset(asset, asset_checks, inputs, timeout).await)
                });
            }

            // Completion order, so a failure is seen as soon as it happens
            while let Some(joined) = running.join_next().await {
                let run = match joined {
                    Ok(Ok(run)) => run,
                    Ok(Err(error)) => {
                        running.shutdown().await;
                        return self.fail(error);
                    }
                    Err(join_error) => {
                        running.shutdown().await;
                        return self.fail(ExecutionError::InternalError {
                            message: format!("Task join error: {}", join_error),
                        });
                    }
                };

                if let Some(error) = run.fail_fast_error(failure_strategy) {
                    running.shutdown().await;
                    return self.fail(error);
                }
                report.record(run);
            }
        }

        report.finish(self.name(), failure_strategy, start.elapsed())
    }
}
