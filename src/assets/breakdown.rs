// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::AssetError;
use crate::model::*;
use crate::traits::Asset;

use super::sources::{ENERGY_CONSUMPTION, POPULATION, RENEWABLE_COVERAGE};

pub const ENERGY_BREAKDOWN: &str = "energy_breakdown";
pub const ENERGY_BREAKDOWN_WITH_POPULATION: &str = "energy_breakdown_with_population";

/// Index a table by `(entity, entity_code, year)`. The first row for a key wins.
fn index_by_key<R: KeyedRecord, V>(
    rows: &[R],
    value: impl Fn(&R) -> V,
) -> HashMap<EntityYearKey, V> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        index.entry(row.key()).or_insert_with(|| value(row));
    }
    index
}

/// Split consumption into renewable and fossil parts.
///
/// Left join of consumption onto renewable coverage; entities without a
/// renewable share are treated as fully fossil.
pub fn compute_energy_breakdown(
    consumption: &Table<EnergyConsumptionRecord>,
    coverage: &Table<RenewableCoverageRecord>,
) -> Table<EnergyBreakdownRecord> {
    let shares = index_by_key(coverage.rows(), |r| r.renewable_energy_pct);

    let rows = consumption
        .iter()
        .map(|row| {
            let renewable_energy_pct = shares.get(&row.key()).copied().unwrap_or(0.0);
            let fossil_energy_pct = 1.0 - renewable_energy_pct;
            EnergyBreakdownRecord {
                entity: row.entity.clone(),
                entity_code: row.entity_code.clone(),
                year: row.year,
                energy_consumption_gwh: row.energy_consumption_gwh,
                renewable_energy_pct,
                fossil_energy_pct,
                renewable_energy_consumption_gwh: row.energy_consumption_gwh * renewable_energy_pct,
                fossil_energy_consumption_gwh: row.energy_consumption_gwh * fossil_energy_pct,
            }
        })
        .collect();

    Table::new(ENERGY_BREAKDOWN, rows)
}

/// Left join of the breakdown onto population; unknown populations stay `None`.
pub fn attach_population(
    breakdown: &Table<EnergyBreakdownRecord>,
    population: &Table<PopulationRecord>,
) -> Table<BreakdownWithPopulationRecord> {
    let populations = index_by_key(population.rows(), |r| r.population);

    let rows = breakdown
        .iter()
        .map(|row| {
            BreakdownWithPopulationRecord::from_breakdown(row, populations.get(&row.key()).copied())
        })
        .collect();

    Table::new(ENERGY_BREAKDOWN_WITH_POPULATION, rows)
}

pub struct EnergyBreakdownAsset;

#[async_trait]
impl Asset for EnergyBreakdownAsset {
    fn id(&self) -> &'static str {
        ENERGY_BREAKDOWN
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &[ENERGY_CONSUMPTION, RENEWABLE_COVERAGE]
    }

    fn description(&self) -> &'static str {
        "Combine energy consumption with renewable percentages to calculate fossil vs renewable breakdown"
    }

    async fn materialize(&self, inputs: AssetInputs) -> Result<AssetValue, AssetError> {
        let consumption = inputs
            .get(ENERGY_CONSUMPTION)?
            .as_energy_consumption(ENERGY_CONSUMPTION)?;
        let coverage = inputs
            .get(RENEWABLE_COVERAGE)?
            .as_renewable_coverage(RENEWABLE_COVERAGE)?;

        let table = compute_energy_breakdown(consumption, coverage);
        validate_table(&table)?;
        Ok(AssetValue::EnergyBreakdown(table))
    }
}

pub struct EnergyBreakdownWithPopulationAsset;

#[async_trait]
impl Asset for EnergyBreakdownWithPopulationAsset {
    fn id(&self) -> &'static str {
        ENERGY_BREAKDOWN_WITH_POPULATION
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &[ENERGY_BREAKDOWN, POPULATION]
    }

    fn description(&self) -> &'static str {
        "Combine energy breakdown with population data"
    }

    async fn materialize(&self, inputs: AssetInputs) -> Result<AssetValue, AssetError> {
        let breakdown = inputs
            .get(ENERGY_BREAKDOWN)?
            .as_energy_breakdown(ENERGY_BREAKDOWN)?;
        let population = inputs.get(POPULATION)?.as_population(POPULATION)?;

        let table = attach_population(breakdown, population);
        validate_table(&table)?;
        Ok(AssetValue::BreakdownWithPopulation(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn consumption(rows: &[(&str, &str, i32, f64)]) -> Table<EnergyConsumptionRecord> {
        Table::new(
            ENERGY_CONSUMPTION,
            rows.iter()
                .map(|(entity, code, year, gwh)| EnergyConsumptionRecord {
                    entity: entity.to_string(),
                    entity_code: code.to_string(),
                    year: *year,
                    energy_consumption_gwh: *gwh,
                })
                .collect(),
        )
    }

    fn coverage(rows: &[(&str, &str, i32, f64)]) -> Table<RenewableCoverageRecord> {
        Table::new(
            RENEWABLE_COVERAGE,
            rows.iter()
                .map(|(entity, code, year, pct)| RenewableCoverageRecord {
                    entity: entity.to_string(),
                    entity_code: code.to_string(),
                    year: *year,
                    renewable_energy_pct: *pct,
                })
                .collect(),
        )
    }

    #[test]
    fn breakdown_splits_consumption() {
        let table = compute_energy_breakdown(
            &consumption(&[("Spain", "ESP", 2020, 1000.0)]),
            &coverage(&[("Spain", "ESP", 2020, 0.25)]),
        );

        let row = &table.rows()[0];
        assert_eq!(row.renewable_energy_pct, 0.25);
        assert_eq!(row.fossil_energy_pct, 0.75);
        assert_eq!(row.renewable_energy_consumption_gwh, 250.0);
        assert_eq!(row.fossil_energy_consumption_gwh, 750.0);
    }

    #[test]
    fn missing_share_counts_as_fossil() {
        let table = compute_energy_breakdown(
            &consumption(&[("Spain", "ESP", 2021, 1000.0), ("Chad", "TCD", 2021, 10.0)]),
            &coverage(&[("Spain", "ESP", 2020, 0.25)]),
        );

        assert_eq!(table.len(), 2);
        assert!(table
            .iter()
            .all(|r| r.renewable_energy_pct == 0.0 && r.fossil_energy_pct == 1.0));
        assert_eq!(table.rows()[1].fossil_energy_consumption_gwh, 10.0);
    }

    #[test]
    fn rows_without_code_join_each_other() {
        let table = compute_energy_breakdown(
            &consumption(&[("World", "", 2020, 100.0)]),
            &coverage(&[("World", "", 2020, 0.5)]),
        );
        assert_eq!(table.rows()[0].renewable_energy_pct, 0.5);
    }

    #[tokio::test]
    async fn with_population_keeps_unmatched_rows() {
        let breakdown = compute_energy_breakdown(
            &consumption(&[("Spain", "ESP", 2020, 1000.0), ("Spain", "ESP", 1900, 5.0)]),
            &coverage(&[]),
        );
        let population = Table::new(
            POPULATION,
            vec![PopulationRecord {
                entity: "Spain".into(),
                entity_code: "ESP".into(),
                year: 2020,
                population: 47_000_000,
            }],
        );

        let mut inputs = AssetInputs::new();
        inputs.insert(ENERGY_BREAKDOWN, Arc::new(AssetValue::EnergyBreakdown(breakdown)));
        inputs.insert(POPULATION, Arc::new(AssetValue::Population(population)));

        let value = EnergyBreakdownWithPopulationAsset
            .materialize(inputs)
            .await
            .unwrap();
        let table = value
            .as_breakdown_with_population(ENERGY_BREAKDOWN_WITH_POPULATION)
            .unwrap();

        assert_eq!(table.rows()[0].population, Some(47_000_000));
        assert_eq!(table.rows()[1].population, None);
    }

    #[tokio::test]
    async fn breakdown_asset_requires_both_inputs() {
        let mut inputs = AssetInputs::new();
        inputs.insert(
            ENERGY_CONSUMPTION,
            Arc::new(AssetValue::EnergyConsumption(consumption(&[]))),
        );

        let err = EnergyBreakdownAsset.materialize(inputs).await.unwrap_err();
        assert!(matches!(err, AssetError::MissingInput(id) if id == RENEWABLE_COVERAGE));
    }
}
