// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::ReportConfig;
use crate::errors::AssetError;
use crate::model::{AssetInputs, AssetValue};
use crate::observability::messages::asset::ReportWritten;
use crate::observability::messages::StructuredLog;
use crate::report::{build_report, write_report};
use crate::traits::Asset;

use super::per_capita::ENERGY_BREAKDOWN_PER_CAPITA;

pub const ENERGY_ANALYSIS_REPORT: &str = "energy_analysis_report";

/// Writes the report sheets for the per-capita table into a directory.
pub struct EnergyAnalysisReportAsset {
    config: ReportConfig,
}

impl EnergyAnalysisReportAsset {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Asset for EnergyAnalysisReportAsset {
    fn id(&self) -> &'static str {
        ENERGY_ANALYSIS_REPORT
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &[ENERGY_BREAKDOWN_PER_CAPITA]
    }

    fn description(&self) -> &'static str {
        "Top renewable and fossil consumers, focus-region trends and raw data"
    }

    async fn materialize(&self, inputs: AssetInputs) -> Result<AssetValue, AssetError> {
        let value = inputs.get_shared(ENERGY_BREAKDOWN_PER_CAPITA)?;
        let config = self.config.clone();
        let directory = config.output_directory.clone();

        let summary = tokio::task::spawn_blocking(move || {
            let table = value.as_per_capita(ENERGY_BREAKDOWN_PER_CAPITA)?;
            let report = build_report(table, &config)?;
            write_report(&config.output_directory, &report)
        })
        .await
        .map_err(|e| AssetError::write(&directory, e))??;

        ReportWritten {
            directory: &summary.output_directory,
            sheets: summary.sheets.len(),
            latest_year: summary.latest_year,
        }
        .log();

        Ok(AssetValue::Report(summary))
    }
}
