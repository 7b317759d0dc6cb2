// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for DAG executor lifecycle and execution events.
//!
//! This module contains message types for logging events related to:
//! * DAG execution lifecycle (start, completion, failure)
//! * Level computation for the level-by-level executor

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Execution started with specified strategy and configuration.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ExecutionStarted<'a> {
    pub strategy: &'a str,
    pub asset_count: usize,
    pub max_concurrency: usize,
}

impl Display for ExecutionStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting materialization with {} strategy: {} assets, max_concurrency={}",
            self.strategy, self.asset_count, self.max_concurrency
        )
    }
}

impl StructuredLog for ExecutionStarted<'_> {
    fn log(&self) {
        tracing::info!(
            strategy = self.strategy,
            asset_count = self.asset_count,
            max_concurrency = self.max_concurrency,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution",
            span_name = name,
            strategy = self.strategy,
            asset_count = self.asset_count,
            max_concurrency = self.max_concurrency,
        )
    }
}

/// Execution finished, whether or not every asset materialized.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use energy_analysis::observability::messages::engine::ExecutionCompleted;
/// use std::time::Duration;
///
/// let msg = ExecutionCompleted {
///     strategy: "level_by_level",
///     materialized: 7,
///     failed: 1,
///     skipped: 1,
///     duration: Duration::from_millis(250),
/// };
///
/// assert!(msg.to_string().contains("7 materialized"));
/// ```
pub struct ExecutionCompleted<'a> {
    pub strategy: &'a str,
    pub materialized: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration: std::time::Duration,
}

impl Display for ExecutionCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Materialization completed with {} strategy: {} materialized, {} failed, {} skipped in {:?}",
            self.strategy, self.materialized, self.failed, self.skipped, self.duration
        )
    }
}

impl StructuredLog for ExecutionCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            strategy = self.strategy,
            materialized = self.materialized,
            failed = self.failed,
            skipped = self.skipped,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "execution_completed",
            span_name = name,
            strategy = self.strategy,
            materialized = self.materialized,
            duration = ?self.duration,
        )
    }
}

/// Execution aborted.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ExecutionFailed<'a> {
    pub strategy: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Materialization failed with {} strategy: {}",
            self.strategy, self.error
        )
    }
}

impl StructuredLog for ExecutionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            strategy = self.strategy,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "execution_failed",
            span_name = name,
            strategy = self.strategy,
            error = %self.error,
        )
    }
}

/// Level computation completed for level-by-level executor.
///
/// # Log Level
/// `debug!` - Executor internals
pub struct LevelComputationCompleted {
    pub level_count: usize,
    pub asset_count: usize,
}

impl Display for LevelComputationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Computed {} levels for {} assets",
            self.level_count, self.asset_count
        )
    }
}

impl StructuredLog for LevelComputationCompleted {
    fn log(&self) {
        tracing::debug!(
            level_count = self.level_count,
            asset_count = self.asset_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "level_computation",
            span_name = name,
            level_count = self.level_count,
            asset_count = self.asset_count,
        )
    }
}

/// Topological sort failed (cyclic dependency detected).
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct TopologicalSortFailed<'a> {
    pub reason: &'a str,
}

impl Display for TopologicalSortFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Topological sort failed: {}", self.reason)
    }
}

impl StructuredLog for TopologicalSortFailed<'_> {
    fn log(&self) {
        tracing::error!(
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "topological_sort_failed",
            span_name = name,
            reason = self.reason,
        )
    }
}
