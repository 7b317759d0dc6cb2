// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Source assets: the four published datasets read from CSV.
//!
//! Column names follow the published files. Each loader renames columns onto
//! the record fields and normalises units (TWh -> GWh, percent -> fraction).

use std::path::{Path, PathBuf};
use std::time::Instant;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::AssetError;
use crate::model::*;
use crate::observability::messages::asset::DatasetLoaded;
use crate::observability::messages::StructuredLog;
use crate::traits::Asset;

pub const POPULATION: &str = "population";
pub const ENERGY_CONSUMPTION: &str = "energy_consumption";
pub const RENEWABLE_COVERAGE: &str = "renewable_coverage";
pub const REGIONAL_GROUPING: &str = "regional_grouping";

const GWH_PER_TWH: f64 = 1000.0;

/// Read every row of a CSV file into `T`.
///
/// Errors carry the file path and, for malformed rows, the csv position.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AssetError> {
    let start = Instant::now();
    let mut reader = csv::Reader::from_path(path).map_err(|e| AssetError::load(path, e))?;
    let rows = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| AssetError::load(path, e))?;

    DatasetLoaded {
        path,
        rows: rows.len(),
        duration: start.elapsed(),
    }
    .log();
    Ok(rows)
}

/// Run a blocking CSV read off the async worker threads.
async fn read_csv_blocking<T>(path: PathBuf) -> Result<Vec<T>, AssetError>
where
    T: DeserializeOwned + Send + 'static,
{
    let display_path = path.clone();
    tokio::task::spawn_blocking(move || read_csv(&path))
        .await
        .map_err(|e| AssetError::load(display_path, e))?
}

#[derive(Debug, Deserialize)]
struct PopulationRow {
    #[serde(rename = "Entity")]
    entity: String,
    #[serde(rename = "Code", default)]
    code: Option<String>,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "population__sex_all__age_all__variant_estimates", default)]
    population: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct EnergyConsumptionRow {
    #[serde(rename = "Entity")]
    entity: String,
    #[serde(rename = "Code", default)]
    code: Option<String>,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "primary_energy_consumption__twh", default)]
    consumption_twh: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RenewableShareRow {
    #[serde(rename = "Entity")]
    entity: String,
    #[serde(rename = "Code", default)]
    code: Option<String>,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "renewables__pct_equivalent_primary_energy", default)]
    renewable_pct: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RegionalGroupingRow {
    region_entity_code: String,
    region_name: String,
    entity_code: String,
}

/// Population by country from UN projections.
///
/// Rows without a population estimate are dropped.
pub struct PopulationAsset {
    path: PathBuf,
}

impl PopulationAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Asset for PopulationAsset {
    fn id(&self) -> &'static str {
        POPULATION
    }

    fn description(&self) -> &'static str {
        "Population by country from UN projections"
    }

    async fn materialize(&self, _inputs: AssetInputs) -> Result<AssetValue, AssetError> {
        let rows: Vec<PopulationRow> = read_csv_blocking(self.path.clone()).await?;
        let records = rows
            .into_iter()
            .filter_map(|row| {
                row.population.map(|population| PopulationRecord {
                    entity: row.entity,
                    entity_code: row.code.unwrap_or_default(),
                    year: row.year,
                    population: population as i64,
                })
            })
            .collect();

        let table = Table::new(POPULATION, records);
        validate_table(&table)?;
        Ok(AssetValue::Population(table))
    }
}

/// Primary energy consumption by country, converted from TWh to GWh.
pub struct EnergyConsumptionAsset {
    path: PathBuf,
}

impl EnergyConsumptionAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Asset for EnergyConsumptionAsset {
    fn id(&self) -> &'static str {
        ENERGY_CONSUMPTION
    }

    fn description(&self) -> &'static str {
        "Primary energy consumption by country, in GWh"
    }

    async fn materialize(&self, _inputs: AssetInputs) -> Result<AssetValue, AssetError> {
        let rows: Vec<EnergyConsumptionRow> = read_csv_blocking(self.path.clone()).await?;
        let records = rows
            .into_iter()
            .map(|row| EnergyConsumptionRecord {
                entity: row.entity,
                entity_code: row.code.unwrap_or_default(),
                year: row.year,
                energy_consumption_gwh: row.consumption_twh.unwrap_or(f64::NAN) * GWH_PER_TWH,
            })
            .collect();

        let table = Table::new(ENERGY_CONSUMPTION, records);
        validate_table(&table)?;
        Ok(AssetValue::EnergyConsumption(table))
    }
}

/// Renewable share of primary energy by country, as a fraction.
pub struct RenewableCoverageAsset {
    path: PathBuf,
}

impl RenewableCoverageAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Asset for RenewableCoverageAsset {
    fn id(&self) -> &'static str {
        RENEWABLE_COVERAGE
    }

    fn description(&self) -> &'static str {
        "Renewable energy coverage by country"
    }

    async fn materialize(&self, _inputs: AssetInputs) -> Result<AssetValue, AssetError> {
        let rows: Vec<RenewableShareRow> = read_csv_blocking(self.path.clone()).await?;
        let records = rows
            .into_iter()
            .map(|row| RenewableCoverageRecord {
                entity: row.entity,
                entity_code: row.code.unwrap_or_default(),
                year: row.year,
                renewable_energy_pct: row.renewable_pct.unwrap_or(f64::NAN) / 100.0,
            })
            .collect();

        let table = Table::new(RENEWABLE_COVERAGE, records);
        validate_table(&table)?;
        Ok(AssetValue::RenewableCoverage(table))
    }
}

/// Country to custom-region mapping.
pub struct RegionalGroupingAsset {
    path: PathBuf,
}

impl RegionalGroupingAsset {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Asset for RegionalGroupingAsset {
    fn id(&self) -> &'static str {
        REGIONAL_GROUPING
    }

    fn description(&self) -> &'static str {
        "Regional grouping taxonomy"
    }

    async fn materialize(&self, _inputs: AssetInputs) -> Result<AssetValue, AssetError> {
        let rows: Vec<RegionalGroupingRow> = read_csv_blocking(self.path.clone()).await?;
        let records = rows
            .into_iter()
            .map(|row| RegionalGroupingRecord {
                region_entity_code: row.region_entity_code,
                region_name: row.region_name,
                entity_code: row.entity_code,
            })
            .collect();

        let table = Table::new(REGIONAL_GROUPING, records);
        validate_table(&table)?;
        Ok(AssetValue::RegionalGrouping(table))
    }
}
