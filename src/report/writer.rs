// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::errors::AssetError;
use crate::model::Schema;

use super::{Report, ReportSummary, Sheet, SheetSummary, RAW_DATA_SHEET};

pub const MANIFEST_FILE: &str = "report.json";

fn sheet_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.csv", name))
}

fn write_sheet(dir: &Path, sheet: &Sheet) -> Result<SheetSummary, AssetError> {
    let path = sheet_path(dir, &sheet.name);
    let mut writer = csv::Writer::from_path(&path).map_err(|e| AssetError::write(&path, e))?;
    writer
        .write_record(&sheet.headers)
        .map_err(|e| AssetError::write(&path, e))?;
    for row in &sheet.rows {
        writer
            .write_record(row)
            .map_err(|e| AssetError::write(&path, e))?;
    }
    writer.flush().map_err(|e| AssetError::write(&path, e))?;

    Ok(SheetSummary {
        name: sheet.name.clone(),
        file: format!("{}.csv", sheet.name),
        rows: sheet.rows.len(),
    })
}

/// Serialize records to `<dir>/<name>.csv`. The header comes from the record
/// schema, so an empty table still keeps its columns.
pub fn write_records<R: Schema + Serialize>(
    dir: &Path,
    name: &str,
    records: &[R],
) -> Result<usize, AssetError> {
    let path = sheet_path(dir, name);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .map_err(|e| AssetError::write(&path, e))?;
    writer
        .write_record(R::COLUMNS)
        .map_err(|e| AssetError::write(&path, e))?;
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| AssetError::write(&path, e))?;
    }
    writer.flush().map_err(|e| AssetError::write(&path, e))?;
    Ok(records.len())
}

/// Write every sheet plus the JSON manifest into `dir`, creating it if needed.
pub fn write_report(dir: &Path, report: &Report<'_>) -> Result<ReportSummary, AssetError> {
    fs::create_dir_all(dir).map_err(|e| AssetError::write(dir, e))?;

    let mut sheets = report
        .sheets
        .iter()
        .map(|sheet| write_sheet(dir, sheet))
        .collect::<Result<Vec<_>, _>>()?;

    let rows = write_records(dir, RAW_DATA_SHEET, report.raw_data)?;
    sheets.push(SheetSummary {
        name: RAW_DATA_SHEET.to_string(),
        file: format!("{}.csv", RAW_DATA_SHEET),
        rows,
    });

    let summary = ReportSummary {
        output_directory: dir.to_path_buf(),
        latest_year: report.latest_year,
        sheets,
    };

    let manifest = dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&summary).map_err(|e| AssetError::write(&manifest, e))?;
    fs::write(&manifest, json).map_err(|e| AssetError::write(&manifest, e))?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PerCapitaRecord;

    #[test]
    fn writes_sheets_raw_data_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report");
        let raw = vec![PerCapitaRecord {
            entity: "Iberia".into(),
            entity_code: "IBR".into(),
            year: 2020,
            energy_consumption_gwh: 10.0,
            renewable_energy_pct: 0.5,
            fossil_energy_pct: 0.5,
            renewable_energy_consumption_gwh: 5.0,
            fossil_energy_consumption_gwh: 5.0,
            population: None,
            energy_consumption_per_capita_gwh: None,
            renewable_energy_per_capita_gwh: None,
            fossil_energy_per_capita_gwh: None,
        }];
        let report = Report {
            latest_year: 2020,
            sheets: vec![Sheet {
                name: "Energy_per_Capita".into(),
                headers: vec!["year".into(), "Iberia".into()],
                rows: vec![vec!["2020".into(), "".into()]],
            }],
            raw_data: &raw,
        };

        let summary = write_report(&out, &report).unwrap();
        assert_eq!(summary.sheets.len(), 2);
        assert_eq!(summary.sheets[1].name, "Raw_Data");

        let pivot = std::fs::read_to_string(out.join("Energy_per_Capita.csv")).unwrap();
        assert_eq!(pivot, "year,Iberia\n2020,\n");

        let raw_csv = std::fs::read_to_string(out.join("Raw_Data.csv")).unwrap();
        let mut lines = raw_csv.lines();
        assert!(lines.next().unwrap().starts_with("entity,entity_code,year,"));
        assert!(lines.next().unwrap().starts_with("Iberia,IBR,2020,10.0,0.5,"));

        let manifest: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join(MANIFEST_FILE)).unwrap()).unwrap();
        assert_eq!(manifest["latest_year"], 2020);
        assert_eq!(manifest["sheets"][0]["file"], "Energy_per_Capita.csv");
    }
}
