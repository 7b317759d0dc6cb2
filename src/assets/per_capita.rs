// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::AssetError;
use crate::model::*;
use crate::traits::Asset;

use super::breakdown::ENERGY_BREAKDOWN_WITH_POPULATION;
use super::regions::ENERGY_BREAKDOWN_WITH_NEW_REGIONS;

pub const ENERGY_BREAKDOWN_PER_CAPITA: &str = "energy_breakdown_per_capita";

/// Countries followed by regions, each with per-capita consumption figures.
pub fn compute_per_capita(
    countries: &Table<BreakdownWithPopulationRecord>,
    regions: &Table<BreakdownWithPopulationRecord>,
) -> Table<PerCapitaRecord> {
    let rows = countries
        .iter()
        .chain(regions.iter())
        .map(PerCapitaRecord::from_breakdown)
        .collect();
    Table::new(ENERGY_BREAKDOWN_PER_CAPITA, rows)
}

pub struct EnergyBreakdownPerCapitaAsset;

#[async_trait]
impl Asset for EnergyBreakdownPerCapitaAsset {
    fn id(&self) -> &'static str {
        ENERGY_BREAKDOWN_PER_CAPITA
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &[ENERGY_BREAKDOWN_WITH_POPULATION, ENERGY_BREAKDOWN_WITH_NEW_REGIONS]
    }

    fn description(&self) -> &'static str {
        "Compute per-capita energy consumption metrics"
    }

    async fn materialize(&self, inputs: AssetInputs) -> Result<AssetValue, AssetError> {
        let countries = inputs
            .get(ENERGY_BREAKDOWN_WITH_POPULATION)?
            .as_breakdown_with_population(ENERGY_BREAKDOWN_WITH_POPULATION)?;
        let regions = inputs
            .get(ENERGY_BREAKDOWN_WITH_NEW_REGIONS)?
            .as_breakdown_with_population(ENERGY_BREAKDOWN_WITH_NEW_REGIONS)?;

        let table = compute_per_capita(countries, regions);
        validate_table(&table)?;
        Ok(AssetValue::PerCapita(table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entity: &str, population: Option<i64>) -> BreakdownWithPopulationRecord {
        BreakdownWithPopulationRecord {
            entity: entity.into(),
            entity_code: String::new(),
            year: 2020,
            energy_consumption_gwh: 50.0,
            renewable_energy_pct: 0.2,
            fossil_energy_pct: 0.8,
            renewable_energy_consumption_gwh: 10.0,
            fossil_energy_consumption_gwh: 40.0,
            population,
        }
    }

    #[test]
    fn countries_come_before_regions() {
        let countries = Table::new("c", vec![row("Spain", Some(10)), row("Narnia", None)]);
        let regions = Table::new("r", vec![row("Iberia", Some(25))]);

        let table = compute_per_capita(&countries, &regions);
        let entities: Vec<_> = table.iter().map(|r| r.entity.as_str()).collect();
        assert_eq!(entities, vec!["Spain", "Narnia", "Iberia"]);

        assert_eq!(table.rows()[0].energy_consumption_per_capita_gwh, Some(5.0));
        assert_eq!(table.rows()[1].energy_consumption_per_capita_gwh, None);
        assert_eq!(table.rows()[2].fossil_energy_per_capita_gwh, Some(1.6));
    }
}
