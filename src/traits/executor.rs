// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::{AssetMap, CheckMap, DependencyGraph, EntryPoints};
use crate::engine::MaterializationReport;
use crate::errors::{ExecutionError, FailureStrategy};

#[async_trait]
pub trait DagExecutor: Send + Sync {
    /// Strategy name used in logs.
    fn name(&self) -> &'static str;

    /// Materialize every asset in the graph.
    ///
    /// - `assets`: registry mapping id -> asset instance
    /// - `checks`: checks keyed by the asset they evaluate
    /// - `graph`: adjacency list (id -> list of dependents)
    /// - `entrypoints`: assets with no dependencies
    /// - `failure_strategy`: how to handle asset failures
    async fn execute(
        &self,
        assets: AssetMap,
        checks: CheckMap,
        graph: DependencyGraph,
        entrypoints: EntryPoints,
        failure_strategy: FailureStrategy,
    ) -> Result<MaterializationReport, ExecutionError>;
}
