// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::*;
use crate::config::DependencyGraph;
use crate::errors::{ConfigError, FailureStrategy, ValidationError};
use crate::observability::messages::validation::{
    ValidationCompleted, ValidationFailed, ValidationProblem, ValidationStarted,
};
use crate::observability::messages::StructuredLog;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for the energy analysis pipeline.
///
/// This struct represents the complete configuration for one pipeline run:
/// the execution strategy, where the source datasets live, check thresholds,
/// report layout and optional persistence of materialized assets.
/// It is typically loaded from a YAML configuration file.
///
/// # Fields
/// * `strategy` - The execution strategy to use for the DAG
/// * `failure_strategy` - How to handle asset failures (optional, defaults to FailFast)
/// * `executor_options` - Executor-specific configuration options (optional)
/// * `data` - Source dataset locations (optional)
/// * `checks` - Asset check thresholds (optional)
/// * `report` - Report output options (optional)
/// * `storage` - Persistence of materialized tables (optional)
/// * `selection` - Assets to materialize; upstream dependencies are included automatically
///
/// # Example
/// ```yaml
/// strategy: level
/// failure_strategy: fail_fast
/// executor_options:
///   max_concurrency: 4
/// data:
///   directory: data
/// report:
///   focus_entities: ["North America", "Iberia"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub strategy: Strategy,
    #[serde(default)]
    pub failure_strategy: FailureStrategy,
    #[serde(default)]
    pub executor_options: ExecutorOptions,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub checks: CheckConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub selection: Vec<String>,
}

/// Execution strategy for DAG processing.
///
/// # Variants
/// * `Level` - Executes assets level by level based on dependency depth
/// * `WorkQueue` - Starts each asset as soon as its dependencies are done
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Level,
    #[value(name = "work_queue")]
    WorkQueue,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Level => f.write_str("level"),
            Strategy::WorkQueue => f.write_str("work_queue"),
        }
    }
}

/// Executor-specific configuration options.
///
/// # Fields
/// * `max_concurrency` - Maximum number of assets materializing at once (optional)
/// * `timeout_seconds` - Timeout for a single asset in seconds (optional)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExecutorOptions {
    pub max_concurrency: Option<usize>,
    pub timeout_seconds: Option<u64>,
}

impl ExecutorOptions {
    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency.unwrap_or_else(default_concurrency)
    }
}

/// Locations of the four source datasets.
///
/// File names are resolved against `directory`, which in turn is resolved
/// against the config file's directory when relative.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub directory: PathBuf,
    pub population: String,
    pub renewable_share: String,
    pub energy_consumption: String,
    pub regional_grouping: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DATA_DIRECTORY),
            population: DEFAULT_POPULATION_FILE.to_string(),
            renewable_share: DEFAULT_RENEWABLE_SHARE_FILE.to_string(),
            energy_consumption: DEFAULT_ENERGY_CONSUMPTION_FILE.to_string(),
            regional_grouping: DEFAULT_REGIONAL_GROUPING_FILE.to_string(),
        }
    }
}

impl DataConfig {
    pub fn population_path(&self) -> PathBuf {
        self.directory.join(&self.population)
    }

    pub fn renewable_share_path(&self) -> PathBuf {
        self.directory.join(&self.renewable_share)
    }

    pub fn energy_consumption_path(&self) -> PathBuf {
        self.directory.join(&self.energy_consumption)
    }

    pub fn regional_grouping_path(&self) -> PathBuf {
        self.directory.join(&self.regional_grouping)
    }
}

/// Thresholds for the built-in asset checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// Largest plausible per-capita consumption, in GWh per person per year.
    pub per_capita_max_gwh: f64,
    /// Allowed drift of fossil + renewable shares away from 1.0.
    pub conservation_tolerance: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            per_capita_max_gwh: DEFAULT_PER_CAPITA_MAX_GWH,
            conservation_tolerance: DEFAULT_CONSERVATION_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_directory: PathBuf,
    pub top_n: usize,
    pub window_years: i32,
    pub focus_entities: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from(DEFAULT_REPORT_DIRECTORY),
            top_n: DEFAULT_TOP_N,
            window_years: DEFAULT_WINDOW_YEARS,
            focus_entities: DEFAULT_FOCUS_ENTITIES.iter().map(|e| e.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub persist_assets: bool,
    pub directory: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist_assets: false,
            directory: PathBuf::from(DEFAULT_STORAGE_DIRECTORY),
        }
    }
}

impl Config {
    /// Anchor every relative path in the config to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.data.directory,
            &mut self.report.output_directory,
            &mut self.storage.directory,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    /// Check option ranges that serde cannot express.
    pub fn validate_options(&self) -> Result<(), ConfigError> {
        if self.executor_options.max_concurrency == Some(0) {
            return Err(ConfigError::InvalidOption {
                option: "executor_options.max_concurrency",
                reason: "must be at least 1".into(),
            });
        }
        if self.executor_options.timeout_seconds == Some(0) {
            return Err(ConfigError::InvalidOption {
                option: "executor_options.timeout_seconds",
                reason: "must be at least 1".into(),
            });
        }
        if self.report.top_n == 0 {
            return Err(ConfigError::InvalidOption {
                option: "report.top_n",
                reason: "must be at least 1".into(),
            });
        }
        if self.report.window_years < 1 {
            return Err(ConfigError::InvalidOption {
                option: "report.window_years",
                reason: "must be at least 1".into(),
            });
        }
        for (option, value) in [
            ("checks.per_capita_max_gwh", self.checks.per_capita_max_gwh),
            ("checks.conservation_tolerance", self.checks.conservation_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidOption {
                    option,
                    reason: format!("must be a finite, non-negative number, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Load a config from a YAML file, or TOML when the extension is `.toml`.
///
/// Relative paths inside the config are resolved against the config file's directory.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut cfg = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str::<Config>(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_yaml::from_str::<Config>(&content).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?
    };

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    cfg.resolve_paths(base);
    Ok(cfg)
}

/// Load and validate a config file.
///
/// Besides option ranges, this validates the asset graph that the config will run:
/// asset ids are unique, dependencies resolve, the graph is acyclic, every check
/// targets a known asset and every selected asset exists.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    cfg.validate_options()?;

    let assets = crate::assets::AssetFactory::create_assets(&cfg);
    let checks = crate::checks::CheckFactory::create_checks(&cfg);
    let specs: Vec<_> = assets.iter().map(|a| a.spec()).collect();
    ValidationStarted {
        asset_count: specs.len(),
        check_count: checks.len(),
    }
    .log();

    let mut errors = match crate::config::validate_dependency_graph(&specs) {
        Ok(()) => Vec::new(),
        Err(errors) => errors,
    };

    for check in &checks {
        if !specs.iter().any(|s| s.id == check.asset()) {
            errors.push(ValidationError::UnknownCheckTarget {
                check: check.name().to_string(),
                asset_id: check.asset().to_string(),
            });
        }
    }

    for selected in &cfg.selection {
        if !specs.iter().any(|s| &s.id == selected) {
            errors.push(ValidationError::UnknownSelection {
                asset_id: selected.clone(),
            });
        }
    }

    if !errors.is_empty() {
        for error in &errors {
            ValidationProblem { error }.log();
        }
        ValidationFailed {
            error_count: errors.len(),
        }
        .log();
        return Err(ConfigError::Validation(errors));
    }

    let selected_count = if cfg.selection.is_empty() {
        specs.len()
    } else {
        DependencyGraph::from_specs(&specs)
            .upstream_closure(&cfg.selection)
            .len()
    };
    ValidationCompleted {
        asset_count: specs.len(),
        selected_count,
    }
    .log();
    Ok(cfg)
}
