// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::assets::AssetFactory;
use crate::checks::CheckFactory;
use crate::config::{AssetMap, CheckMap, Config, DependencyGraph, EntryPoints};
use crate::engine::factory::ExecutorFactory;
use crate::errors::{ConfigError, FailureStrategy, ValidationError};
use crate::traits::DagExecutor;

/// Everything needed to run one pipeline.
pub struct Runtime {
    pub assets: AssetMap,
    pub checks: CheckMap,
    pub graph: DependencyGraph,
    pub entry_points: EntryPoints,
    pub executor: Box<dyn DagExecutor>,
    pub failure_strategy: FailureStrategy,
}

impl Runtime {
    /// Run the executor over the assets and checks this runtime was built with.
    pub async fn execute(
        self,
    ) -> Result<crate::engine::MaterializationReport, crate::errors::ExecutionError> {
        self.executor
            .execute(
                self.assets,
                self.checks,
                self.graph,
                self.entry_points,
                self.failure_strategy,
            )
            .await
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("assets", &self.assets)
            .field("checks", &self.checks)
            .field("entry_points", &self.entry_points)
            .field("executor", &self.executor.name())
            .field("failure_strategy", &self.failure_strategy)
            .finish()
    }
}

/// DAG runtime builder - orchestrates asset map, check map and executor creation
/// from configuration.
///
/// When the config carries a `selection`, the runtime is narrowed to the selected
/// assets and everything upstream of them; checks on assets outside that set
/// are dropped.
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    pub fn from_config(cfg: &Config) -> Result<Runtime, ConfigError> {
        cfg.validate_options()?;

        let definitions = AssetFactory::create_assets(cfg);
        let specs: Vec<_> = definitions.iter().map(|a| a.spec()).collect();
        crate::config::validate_dependency_graph(&specs).map_err(ConfigError::Validation)?;

        let full_graph = DependencyGraph::from_specs(&specs);
        let keep: HashSet<String> = if cfg.selection.is_empty() {
            full_graph.keys().cloned().collect()
        } else {
            let unknown: Vec<_> = cfg
                .selection
                .iter()
                .filter(|id| !full_graph.0.contains_key(*id))
                .map(|id| ValidationError::UnknownSelection {
                    asset_id: id.clone(),
                })
                .collect();
            if !unknown.is_empty() {
                return Err(ConfigError::Validation(unknown));
            }
            full_graph.upstream_closure(&cfg.selection)
        };

        let graph = full_graph.retain(&keep);
        let entry_points = EntryPoints::from_graph(&graph);
        let assets: AssetMap = definitions
            .into_iter()
            .filter(|a| keep.contains(a.id()))
            .collect();
        let checks: CheckMap = CheckFactory::create_checks(cfg)
            .into_iter()
            .filter(|c| keep.contains(c.asset()))
            .collect();
        let executor = ExecutorFactory::from_config(cfg);

        Ok(Runtime {
            assets,
            checks,
            graph,
            entry_points,
            executor,
            failure_strategy: cfg.failure_strategy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn full_runtime_contains_every_asset_and_check() {
        let runtime = RuntimeBuilder::from_config(&config("strategy: level\n")).unwrap();
        assert_eq!(runtime.assets.len(), 9);
        assert_eq!(runtime.checks.len(), 2);
        assert_eq!(runtime.executor.name(), "level_by_level");
        assert_eq!(runtime.failure_strategy, FailureStrategy::FailFast);

        let entry_points: Vec<String> = runtime.entry_points.into();
        assert_eq!(
            entry_points,
            vec![
                "energy_consumption",
                "population",
                "regional_grouping",
                "renewable_coverage"
            ]
        );
    }

    #[test]
    fn selection_keeps_upstream_only() {
        let runtime = RuntimeBuilder::from_config(&config(
            "strategy: work_queue\nselection: [energy_breakdown]\n",
        ))
        .unwrap();

        let mut ids: Vec<_> = runtime.assets.keys().cloned().collect();
        ids.sort();
        assert_eq!(
            ids,
            vec!["energy_breakdown", "energy_consumption", "renewable_coverage"]
        );
        assert!(runtime.checks.is_empty());
        assert_eq!(runtime.executor.name(), "work_queue");
    }

    #[test]
    fn unknown_selection_is_rejected() {
        let err = RuntimeBuilder::from_config(&config("strategy: level\nselection: [wind]\n"))
            .unwrap_err();
        assert!(err.to_string().contains("Selected asset 'wind' does not exist"));
    }
}
