// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Energy analysis report built from the per-capita table.
//!
//! The report is a set of named sheets:
//!
//! * `Top_10_Renewable_Max` / `Top_10_Fossil_Max`: each entity's peak year for the
//!   metric, largest first
//! * `Renewable_Energy_Per_Capita`, `Fossil_Energy_Percent`, `Energy_per_Capita`:
//!   the focus entities side by side over the most recent window of years
//! * `Raw_Data`: every per-capita row
//!
//! Sheet names for the top lists follow the configured `top_n`.

mod writer;

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::ReportConfig;
use crate::errors::AssetError;
use crate::model::{PerCapitaRecord, Table};

pub use writer::{write_records, write_report, MANIFEST_FILE};

pub const RAW_DATA_SHEET: &str = "Raw_Data";

/// A rectangular sheet of already formatted cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// What was written, recorded as the report asset's value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub output_directory: PathBuf,
    pub latest_year: i32,
    pub sheets: Vec<SheetSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub file: String,
    pub rows: usize,
}

/// The computed report, before it is written to disk.
#[derive(Debug)]
pub struct Report<'a> {
    pub latest_year: i32,
    pub sheets: Vec<Sheet>,
    pub raw_data: &'a [PerCapitaRecord],
}

#[derive(Clone, Copy)]
enum Metric {
    RenewablePerCapita,
    FossilPerCapita,
    EnergyPerCapita,
    FossilPct,
}

impl Metric {
    fn column(self) -> &'static str {
        match self {
            Metric::RenewablePerCapita => "renewable_energy_per_capita_gwh",
            Metric::FossilPerCapita => "fossil_energy_per_capita_gwh",
            Metric::EnergyPerCapita => "energy_consumption_per_capita_gwh",
            Metric::FossilPct => "fossil_energy_pct",
        }
    }

    /// Only called on rows with valid per-capita values.
    fn value(self, row: &PerCapitaRecord) -> f64 {
        match self {
            Metric::RenewablePerCapita => row.renewable_energy_per_capita_gwh,
            Metric::FossilPerCapita => row.fossil_energy_per_capita_gwh,
            Metric::EnergyPerCapita => row.energy_consumption_per_capita_gwh,
            Metric::FossilPct => Some(row.fossil_energy_pct),
        }
        .unwrap_or(f64::NAN)
    }
}

/// Window comparison sheets and the metric each one pivots.
const PIVOT_SHEETS: [(&str, Metric); 3] = [
    ("Renewable_Energy_Per_Capita", Metric::RenewablePerCapita),
    ("Fossil_Energy_Percent", Metric::FossilPct),
    ("Energy_per_Capita", Metric::EnergyPerCapita),
];

/// Most recent year that has a population figure.
pub fn latest_year_with_population(table: &Table<PerCapitaRecord>) -> Option<i32> {
    table
        .iter()
        .filter(|r| r.population.is_some())
        .map(|r| r.year)
        .max()
}

/// Compute every sheet of the report.
pub fn build_report<'a>(
    table: &'a Table<PerCapitaRecord>,
    cfg: &ReportConfig,
) -> Result<Report<'a>, AssetError> {
    let latest_year = latest_year_with_population(table).ok_or_else(|| AssetError::EmptyInput {
        asset_id: table.name().to_string(),
        reason: "no row has a population figure".into(),
    })?;

    let valid: Vec<&PerCapitaRecord> = table.iter().filter(|r| r.has_valid_per_capita()).collect();

    let mut sheets = vec![
        top_entities_sheet(
            &format!("Top_{}_Renewable_Max", cfg.top_n),
            &valid,
            Metric::RenewablePerCapita,
            cfg.top_n,
        ),
        top_entities_sheet(
            &format!("Top_{}_Fossil_Max", cfg.top_n),
            &valid,
            Metric::FossilPerCapita,
            cfg.top_n,
        ),
    ];

    let first_year = latest_year - (cfg.window_years - 1);
    let window: Vec<&PerCapitaRecord> = valid
        .iter()
        .copied()
        .filter(|r| r.year >= first_year && cfg.focus_entities.contains(&r.entity))
        .collect();
    sheets.extend(
        PIVOT_SHEETS
            .iter()
            .map(|&(name, metric)| pivot_sheet(name, &window, metric)),
    );

    Ok(Report {
        latest_year,
        sheets,
        raw_data: table.rows(),
    })
}

/// Each entity's row with the highest metric (first one on ties), then the
/// `top_n` largest of those. Ties keep entity name order.
fn top_entities_sheet(name: &str, rows: &[&PerCapitaRecord], metric: Metric, top_n: usize) -> Sheet {
    let mut best: BTreeMap<&str, &PerCapitaRecord> = BTreeMap::new();
    for &row in rows {
        best.entry(row.entity.as_str())
            .and_modify(|current| {
                if metric.value(row) > metric.value(current) {
                    *current = row;
                }
            })
            .or_insert(row);
    }

    let mut leaders: Vec<&PerCapitaRecord> = best.into_values().collect();
    leaders.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));
    leaders.truncate(top_n);

    Sheet {
        name: name.to_string(),
        headers: vec!["entity".into(), "year".into(), metric.column().into()],
        rows: leaders
            .into_iter()
            .map(|r| vec![r.entity.clone(), r.year.to_string(), metric.value(r).to_string()])
            .collect(),
    }
}

/// Years as rows, entities (sorted by name) as columns. Absent values are blank.
fn pivot_sheet(name: &str, rows: &[&PerCapitaRecord], metric: Metric) -> Sheet {
    let mut grid: BTreeMap<i32, BTreeMap<&str, f64>> = BTreeMap::new();
    let mut entities: Vec<&str> = Vec::new();
    for row in rows {
        grid.entry(row.year)
            .or_default()
            .entry(row.entity.as_str())
            .or_insert_with(|| metric.value(row));
        if !entities.contains(&row.entity.as_str()) {
            entities.push(row.entity.as_str());
        }
    }
    entities.sort_unstable();

    let mut headers = vec!["year".to_string()];
    headers.extend(entities.iter().map(|e| e.to_string()));

    let rows = grid
        .into_iter()
        .map(|(year, values)| {
            let mut cells = vec![year.to_string()];
            cells.extend(
                entities
                    .iter()
                    .map(|e| values.get(e).map(|v| v.to_string()).unwrap_or_default()),
            );
            cells
        })
        .collect();

    Sheet {
        name: name.to_string(),
        headers,
        rows,
    }
}
