// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::AssetError;
use crate::report::ReportSummary;

use super::records::*;

/// A named, ordered set of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table<R> {
    name: String,
    rows: Vec<R>,
}

impl<R> Table<R> {
    pub fn new(name: impl Into<String>, rows: Vec<R>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The output of a materialized asset.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetValue {
    Population(Table<PopulationRecord>),
    EnergyConsumption(Table<EnergyConsumptionRecord>),
    RenewableCoverage(Table<RenewableCoverageRecord>),
    RegionalGrouping(Table<RegionalGroupingRecord>),
    EnergyBreakdown(Table<EnergyBreakdownRecord>),
    BreakdownWithPopulation(Table<BreakdownWithPopulationRecord>),
    PerCapita(Table<PerCapitaRecord>),
    Report(ReportSummary),
}

impl AssetValue {
    pub fn kind(&self) -> &'static str {
        match self {
            AssetValue::Population(_) => "population",
            AssetValue::EnergyConsumption(_) => "energy consumption",
            AssetValue::RenewableCoverage(_) => "renewable coverage",
            AssetValue::RegionalGrouping(_) => "regional grouping",
            AssetValue::EnergyBreakdown(_) => "energy breakdown",
            AssetValue::BreakdownWithPopulation(_) => "breakdown with population",
            AssetValue::PerCapita(_) => "per-capita",
            AssetValue::Report(_) => "report",
        }
    }

    /// Number of rows, or number of sheets for a report.
    pub fn row_count(&self) -> usize {
        match self {
            AssetValue::Population(t) => t.len(),
            AssetValue::EnergyConsumption(t) => t.len(),
            AssetValue::RenewableCoverage(t) => t.len(),
            AssetValue::RegionalGrouping(t) => t.len(),
            AssetValue::EnergyBreakdown(t) => t.len(),
            AssetValue::BreakdownWithPopulation(t) => t.len(),
            AssetValue::PerCapita(t) => t.len(),
            AssetValue::Report(summary) => summary.sheets.len(),
        }
    }
}

macro_rules! typed_accessor {
    ($fn_name:ident, $variant:ident, $record:ty, $expected:literal) => {
        impl AssetValue {
            pub fn $fn_name(&self, asset_id: &str) -> Result<&Table<$record>, AssetError> {
                match self {
                    AssetValue::$variant(table) => Ok(table),
                    other => Err(AssetError::WrongInput {
                        asset_id: asset_id.to_string(),
                        expected: $expected,
                        actual: other.kind(),
                    }),
                }
            }
        }
    };
}

typed_accessor!(as_population, Population, PopulationRecord, "population");
typed_accessor!(as_energy_consumption, EnergyConsumption, EnergyConsumptionRecord, "energy consumption");
typed_accessor!(as_renewable_coverage, RenewableCoverage, RenewableCoverageRecord, "renewable coverage");
typed_accessor!(as_regional_grouping, RegionalGrouping, RegionalGroupingRecord, "regional grouping");
typed_accessor!(as_energy_breakdown, EnergyBreakdown, EnergyBreakdownRecord, "energy breakdown");
typed_accessor!(as_breakdown_with_population, BreakdownWithPopulation, BreakdownWithPopulationRecord, "breakdown with population");
typed_accessor!(as_per_capita, PerCapita, PerCapitaRecord, "per-capita");

/// Upstream values handed to an asset, keyed by asset id.
#[derive(Debug, Clone, Default)]
pub struct AssetInputs(pub std::collections::HashMap<String, Arc<AssetValue>>);

impl AssetInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset_id: impl Into<String>, value: Arc<AssetValue>) {
        self.0.insert(asset_id.into(), value);
    }

    pub fn get(&self, asset_id: &str) -> Result<&AssetValue, AssetError> {
        self.0
            .get(asset_id)
            .map(|v| v.as_ref())
            .ok_or_else(|| AssetError::MissingInput(asset_id.to_string()))
    }

    /// Shared handle to an upstream value, for work moved onto a blocking thread.
    pub fn get_shared(&self, asset_id: &str) -> Result<Arc<AssetValue>, AssetError> {
        self.0
            .get(asset_id)
            .cloned()
            .ok_or_else(|| AssetError::MissingInput(asset_id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
