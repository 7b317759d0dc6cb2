// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Persisting materialized tables as CSV files.

use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::MaterializationReport;
use crate::errors::AssetError;
use crate::model::AssetValue;
use crate::observability::messages::asset::AssetsPersisted;
use crate::observability::messages::StructuredLog;
use crate::report::write_records;

/// Write one table to `<dir>/<asset_id>.csv`. Returns `None` for report values,
/// which write their own files.
pub fn persist_value(dir: &Path, asset_id: &str, value: &AssetValue) -> Result<Option<PathBuf>, AssetError> {
    match value {
        AssetValue::Population(t) => write_records(dir, asset_id, t.rows()),
        AssetValue::EnergyConsumption(t) => write_records(dir, asset_id, t.rows()),
        AssetValue::RenewableCoverage(t) => write_records(dir, asset_id, t.rows()),
        AssetValue::RegionalGrouping(t) => write_records(dir, asset_id, t.rows()),
        AssetValue::EnergyBreakdown(t) => write_records(dir, asset_id, t.rows()),
        AssetValue::BreakdownWithPopulation(t) => write_records(dir, asset_id, t.rows()),
        AssetValue::PerCapita(t) => write_records(dir, asset_id, t.rows()),
        AssetValue::Report(_) => return Ok(None),
    }?;
    Ok(Some(dir.join(format!("{}.csv", asset_id))))
}

/// Write every materialized table of a run into `dir`, in asset id order.
pub fn persist_report(dir: &Path, report: &MaterializationReport) -> Result<Vec<PathBuf>, AssetError> {
    fs::create_dir_all(dir).map_err(|e| AssetError::write(dir, e))?;

    let mut ids: Vec<&String> = report.values.keys().collect();
    ids.sort();

    let mut written = Vec::new();
    for id in ids {
        if let Some(path) = persist_value(dir, id, &report.values[id])? {
            written.push(path);
        }
    }

    AssetsPersisted {
        directory: dir,
        count: written.len(),
    }
    .log();
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BreakdownWithPopulationRecord, PopulationRecord, Schema, Table};
    use crate::report::ReportSummary;

    #[test]
    fn tables_are_written_and_reports_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let population = AssetValue::Population(Table::new(
            "population",
            vec![PopulationRecord {
                entity: "Spain".into(),
                entity_code: "ESP".into(),
                year: 2020,
                population: 47_000_000,
            }],
        ));
        let summary = AssetValue::Report(ReportSummary {
            output_directory: dir.path().join("report"),
            latest_year: 2020,
            sheets: vec![],
        });

        let written = persist_value(dir.path(), "population", &population).unwrap();
        assert_eq!(written, Some(dir.path().join("population.csv")));
        assert_eq!(
            fs::read_to_string(dir.path().join("population.csv")).unwrap(),
            "entity,entity_code,year,population\nSpain,ESP,2020,47000000\n"
        );

        assert_eq!(persist_value(dir.path(), "energy_analysis_report", &summary).unwrap(), None);
        assert!(!dir.path().join("energy_analysis_report.csv").exists());
    }

    #[test]
    fn empty_tables_keep_their_header() {
        let dir = tempfile::tempdir().unwrap();
        let regions = AssetValue::BreakdownWithPopulation(Table::<BreakdownWithPopulationRecord>::new(
            "energy_breakdown_with_new_regions",
            vec![],
        ));

        persist_value(dir.path(), "energy_breakdown_with_new_regions", &regions).unwrap();

        let csv = fs::read_to_string(dir.path().join("energy_breakdown_with_new_regions.csv")).unwrap();
        assert_eq!(csv, format!("{}\n", BreakdownWithPopulationRecord::COLUMNS.join(",")));
        assert!(csv.starts_with("entity,entity_code,year,energy_consumption_gwh,"));
        assert!(csv.trim_end().ends_with(",population"));
    }
}
