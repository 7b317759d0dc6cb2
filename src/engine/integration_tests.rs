// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Executor behaviour shared by both strategies, driven by stub assets.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::config::{AssetMap, CheckMap, DependencyGraph, EntryPoints};
use crate::engine::{AssetOutcome, LevelByLevelExecutor, MaterializationReport, WorkQueueExecutor};
use crate::errors::{AssetError, ExecutionError, FailureStrategy};
use crate::model::{AssetInputs, AssetValue, RegionalGroupingRecord, Table};
use crate::traits::{Asset, AssetCheck, CheckResult, DagExecutor};

#[derive(Clone, Copy)]
enum Behavior {
    Rows(usize),
    Fail,
    Sleep(u64),
}

struct StubAsset {
    id: &'static str,
    depends_on: &'static [&'static str],
    behavior: Behavior,
}

fn stub(id: &'static str, depends_on: &'static [&'static str], behavior: Behavior) -> StubAsset {
    StubAsset {
        id,
        depends_on,
        behavior,
    }
}

fn grouping(name: &str, rows: usize) -> AssetValue {
    let rows = (0..rows)
        .map(|i| RegionalGroupingRecord {
            region_entity_code: "REG".into(),
            region_name: "Region".into(),
            entity_code: format!("C{}", i),
        })
        .collect();
    AssetValue::RegionalGrouping(Table::new(name, rows))
}

#[async_trait]
impl Asset for StubAsset {
    fn id(&self) -> &'static str {
        self.id
    }

    fn depends_on(&self) -> &'static [&'static str] {
        self.depends_on
    }

    fn description(&self) -> &'static str {
        "stub asset"
    }

    async fn materialize(&self, inputs: AssetInputs) -> Result<AssetValue, AssetError> {
        for dependency in self.depends_on {
            inputs.get(dependency)?;
        }
        match self.behavior {
            Behavior::Rows(n) => Ok(grouping(self.id, n)),
            Behavior::Fail => Err(AssetError::load(format!("{}.csv", self.id), "file not found")),
            Behavior::Sleep(ms) => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                Ok(grouping(self.id, 1))
            }
        }
    }
}

struct FailingCheck {
    asset: &'static str,
    blocking: bool,
}

impl AssetCheck for FailingCheck {
    fn name(&self) -> &'static str {
        "always_fails"
    }

    fn asset(&self) -> &'static str {
        self.asset
    }

    fn blocking(&self) -> bool {
        self.blocking
    }

    fn description(&self) -> &'static str {
        "fails on every value"
    }

    fn evaluate(&self, _value: &AssetValue) -> Result<CheckResult, AssetError> {
        Ok(CheckResult {
            passed: false,
            description: "nothing is ever good enough".into(),
        })
    }
}

fn executors(timeout: Option<Duration>) -> Vec<Box<dyn DagExecutor>> {
    vec![
        Box::new(LevelByLevelExecutor::new(2).with_timeout(timeout)),
        Box::new(WorkQueueExecutor::new(2).with_timeout(timeout)),
    ]
}

/// source_a and source_b feed join, join feeds leaf; independent stands alone.
fn diamond(source_a: Behavior) -> Vec<StubAsset> {
    vec![
        stub("source_a", &[], source_a),
        stub("source_b", &[], Behavior::Rows(3)),
        stub("join", &["source_a", "source_b"], Behavior::Rows(4)),
        stub("leaf", &["join"], Behavior::Rows(5)),
        stub("independent", &[], Behavior::Rows(1)),
    ]
}

async fn run(
    executor: &dyn DagExecutor,
    stubs: Vec<StubAsset>,
    checks: Vec<Arc<dyn AssetCheck>>,
    failure_strategy: FailureStrategy,
) -> Result<MaterializationReport, ExecutionError> {
    let specs: Vec<_> = stubs.iter().map(|s| s.spec()).collect();
    let graph = DependencyGraph::from_specs(&specs);
    let entry_points = EntryPoints::from_graph(&graph);
    let assets: AssetMap = stubs
        .into_iter()
        .map(|s| Arc::new(s) as Arc<dyn Asset>)
        .collect();
    let checks: CheckMap = checks.into_iter().collect();

    executor
        .execute(assets, checks, graph, entry_points, failure_strategy)
        .await
}

fn is_skipped_by(outcome: Option<&AssetOutcome>, upstream: &str) -> bool {
    matches!(outcome, Some(AssetOutcome::Skipped { blocked_by }) if blocked_by == upstream)
}

#[tokio::test]
async fn every_asset_materializes_with_its_inputs() {
    for executor in executors(None) {
        let report = run(executor.as_ref(), diamond(Behavior::Rows(2)), vec![], FailureStrategy::FailFast)
            .await
            .unwrap();

        assert!(report.is_success(), "{}", executor.name());
        assert_eq!(report.materialized_count(), 5);
        assert!(matches!(
            report.outcome("leaf"),
            Some(AssetOutcome::Materialized { rows: 5, .. })
        ));
        assert_eq!(report.value("source_b").map(|v| v.row_count()), Some(3));
    }
}

#[tokio::test]
async fn fail_fast_aborts_on_first_failure() {
    for executor in executors(None) {
        let result = run(executor.as_ref(), diamond(Behavior::Fail), vec![], FailureStrategy::FailFast).await;

        match result {
            Err(ExecutionError::AssetFailed { asset_id, error }) => {
                assert_eq!(asset_id, "source_a");
                assert!(matches!(error, AssetError::Load { .. }));
            }
            other => panic!("{}: expected AssetFailed, got {:?}", executor.name(), other),
        }
    }
}

#[tokio::test]
async fn fail_fast_does_not_wait_for_slow_siblings() {
    for executor in executors(None) {
        let stubs = vec![
            stub("a_slow", &[], Behavior::Sleep(5_000)),
            stub("b_fail", &[], Behavior::Fail),
        ];
        let start = Instant::now();
        let result = run(executor.as_ref(), stubs, vec![], FailureStrategy::FailFast).await;

        assert!(
            start.elapsed() < Duration::from_secs(2),
            "{} waited {:?}",
            executor.name(),
            start.elapsed()
        );
        assert!(
            matches!(result, Err(ExecutionError::AssetFailed { ref asset_id, .. }) if asset_id == "b_fail"),
            "{}: {:?}",
            executor.name(),
            result
        );
    }
}

#[tokio::test]
async fn continue_on_error_skips_only_dependents() {
    for executor in executors(None) {
        let report = run(
            executor.as_ref(),
            diamond(Behavior::Fail),
            vec![],
            FailureStrategy::ContinueOnError,
        )
        .await
        .unwrap();

        assert!(matches!(report.outcome("source_a"), Some(AssetOutcome::Failed { .. })));
        assert!(is_skipped_by(report.outcome("join"), "source_a"), "{}", executor.name());
        assert!(is_skipped_by(report.outcome("leaf"), "source_a"), "{}", executor.name());
        assert!(report.outcome("source_b").is_some_and(AssetOutcome::is_usable));
        assert!(report.outcome("independent").is_some_and(AssetOutcome::is_usable));
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.skipped_count(), 2);
        assert!(report.value("join").is_none());
    }
}

#[tokio::test]
async fn nothing_materialized_depends_on_strategy() {
    for executor in executors(None) {
        let stubs = vec![stub("only", &[], Behavior::Fail)];
        let result = run(executor.as_ref(), stubs, vec![], FailureStrategy::ContinueOnError).await;
        assert!(matches!(result, Err(ExecutionError::NothingMaterialized)));

        let stubs = vec![stub("only", &[], Behavior::Fail)];
        let report = run(executor.as_ref(), stubs, vec![], FailureStrategy::BestEffort)
            .await
            .unwrap();
        assert_eq!(report.materialized_count(), 0);
        assert_eq!(report.failed_count(), 1);
    }
}

#[tokio::test]
async fn blocking_check_failure_skips_downstream() {
    for executor in executors(None) {
        let checks: Vec<Arc<dyn AssetCheck>> = vec![Arc::new(FailingCheck {
            asset: "join",
            blocking: true,
        })];
        let report = run(executor.as_ref(), diamond(Behavior::Rows(2)), checks, FailureStrategy::FailFast)
            .await
            .unwrap();

        assert!(matches!(
            report.outcome("join"),
            Some(AssetOutcome::CheckBlocked { check }) if check == "always_fails"
        ));
        assert!(is_skipped_by(report.outcome("leaf"), "join"), "{}", executor.name());
        assert!(report.value("join").is_some());
        assert_eq!(report.failed_checks().count(), 1);
        assert!(!report.is_success());
    }
}

#[tokio::test]
async fn non_blocking_check_failure_is_only_recorded() {
    for executor in executors(None) {
        let checks: Vec<Arc<dyn AssetCheck>> = vec![Arc::new(FailingCheck {
            asset: "join",
            blocking: false,
        })];
        let report = run(executor.as_ref(), diamond(Behavior::Rows(2)), checks, FailureStrategy::FailFast)
            .await
            .unwrap();

        assert!(report.outcome("leaf").is_some_and(AssetOutcome::is_usable));
        assert_eq!(report.checks.len(), 1);
        assert!(!report.checks[0].passed);
        assert!(!report.checks[0].blocking);
    }
}

#[tokio::test]
async fn slow_assets_time_out() {
    for executor in executors(Some(Duration::from_millis(50))) {
        let stubs = vec![
            stub("slow", &[], Behavior::Sleep(5_000)),
            stub("fast", &[], Behavior::Rows(1)),
        ];
        let report = run(executor.as_ref(), stubs, vec![], FailureStrategy::ContinueOnError)
            .await
            .unwrap();

        assert!(matches!(
            report.outcome("slow"),
            Some(AssetOutcome::Failed {
                error: AssetError::Timeout { .. }
            })
        ));
        assert!(report.outcome("fast").is_some_and(AssetOutcome::is_usable));
    }
}

#[tokio::test]
async fn missing_asset_definition_is_reported() {
    let graph = DependencyGraph::from_specs(&[stub("ghost", &[], Behavior::Rows(1)).spec()]);
    let entry_points = EntryPoints::from_graph(&graph);
    for executor in executors(None) {
        let result = executor
            .execute(
                AssetMap::new(),
                CheckMap::new(),
                graph.clone(),
                entry_points.clone(),
                FailureStrategy::FailFast,
            )
            .await;
        assert!(matches!(result, Err(ExecutionError::AssetNotFound(id)) if id == "ghost"));
    }
}
