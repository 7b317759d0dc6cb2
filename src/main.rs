// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};

use energy_analysis::assets::AssetFactory;
use energy_analysis::checks::CheckFactory;
use energy_analysis::config::{
    load_and_validate_config, Config, DependencyGraph, RuntimeBuilder, Strategy,
};
use energy_analysis::engine::{AssetOutcome, MaterializationReport};
use energy_analysis::observability::{init_tracing, LogFormat};
use energy_analysis::storage::persist_report;

/// Energy consumption asset pipeline: renewable vs fossil breakdowns, regional
/// rollups and per-capita reports
#[derive(Parser, Debug)]
#[command(name = "energy-analysis")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug   Override the log filter (default: info)")]
struct Cli {
    /// Log output format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Materialize the asset graph and write the report
    Materialize {
        /// Pipeline configuration (YAML, or TOML by extension)
        #[arg(short, long)]
        config: PathBuf,

        /// Materialize only these assets and their upstream dependencies
        #[arg(long = "select")]
        select: Vec<String>,

        /// Override the configured execution strategy
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,
    },

    /// Validate the configuration and the asset graph without running anything
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },

    /// List assets in dependency order with their checks
    List {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let result = match cli.command {
        Command::Materialize {
            config,
            select,
            strategy,
        } => run_materialize(&config, select, strategy).await,
        Command::Validate { config } => run_validate(&config),
        Command::List { config } => run_list(&config),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn load(path: &Path) -> anyhow::Result<Config> {
    load_and_validate_config(path).with_context(|| format!("invalid config {}", path.display()))
}

async fn run_materialize(
    path: &Path,
    select: Vec<String>,
    strategy: Option<Strategy>,
) -> anyhow::Result<bool> {
    let mut cfg = load(path)?;
    if !select.is_empty() {
        cfg.selection = select;
    }
    if let Some(strategy) = strategy {
        cfg.strategy = strategy;
    }

    let runtime = RuntimeBuilder::from_config(&cfg)?;
    println!("🚀 Energy analysis");
    println!("═══════════════════════════════════");
    println!("Config:   {}", path.display());
    println!("Strategy: {} ({})", runtime.executor.name(), cfg.failure_strategy);
    println!("Assets:   {}", runtime.assets.len());
    println!();

    let report = runtime.execute().await?;
    print_summary(&report);

    if cfg.storage.persist_assets {
        let written = persist_report(&cfg.storage.directory, &report)?;
        println!(
            "\n💾 Persisted {} tables to {}",
            written.len(),
            cfg.storage.directory.display()
        );
    }

    Ok(report.is_success())
}

fn print_summary(report: &MaterializationReport) {
    for (asset_id, outcome) in &report.outcomes {
        let marker = match outcome {
            AssetOutcome::Materialized { .. } => "✅",
            AssetOutcome::Failed { .. } => "❌",
            AssetOutcome::Skipped { .. } => "⏭️ ",
            AssetOutcome::CheckBlocked { .. } => "🚫",
        };
        println!("{} {:<36} {}", marker, asset_id, outcome);
    }

    if !report.checks.is_empty() {
        println!("\nChecks:");
        for check in &report.checks {
            let status = if check.passed { "pass" } else { "FAIL" };
            println!("  [{}] {} on {}: {}", status, check.check, check.asset_id, check.description);
        }
    }
}

fn run_validate(path: &Path) -> anyhow::Result<bool> {
    let cfg = load(path)?;
    let runtime = RuntimeBuilder::from_config(&cfg)?;
    println!(
        "✅ {} is valid: {} assets, {} checks, {} strategy",
        path.display(),
        runtime.assets.len(),
        runtime.checks.len(),
        runtime.executor.name()
    );
    Ok(true)
}

fn run_list(path: &Path) -> anyhow::Result<bool> {
    let cfg = load(path)?;
    let assets = AssetFactory::create_assets(&cfg);
    let specs: Vec<_> = assets.iter().map(|a| a.spec()).collect();
    let order = DependencyGraph::from_specs(&specs)
        .topological_order()
        .ok_or_else(|| anyhow!("asset graph contains a cycle"))?;

    let by_id: HashMap<&str, _> = assets.iter().map(|a| (a.id(), a)).collect();
    let checks = CheckFactory::create_checks(&cfg);

    for id in &order {
        let Some(asset) = by_id.get(id.as_str()) else {
            continue;
        };
        if asset.depends_on().is_empty() {
            println!("{}", id);
        } else {
            println!("{} <- {}", id, asset.depends_on().join(", "));
        }
        println!("    {}", asset.description());
        for check in checks.iter().filter(|c| c.asset() == id.as_str()) {
            let kind = if check.blocking() { "blocking" } else { "non-blocking" };
            println!("    check: {} ({}) {}", check.name(), kind, check.description());
        }
    }
    Ok(true)
}
