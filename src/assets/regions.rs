// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;

use crate::errors::AssetError;
use crate::model::*;
use crate::traits::Asset;

use super::breakdown::ENERGY_BREAKDOWN_WITH_POPULATION;
use super::sources::REGIONAL_GROUPING;

pub const ENERGY_BREAKDOWN_WITH_NEW_REGIONS: &str = "energy_breakdown_with_new_regions";

#[derive(Default)]
struct RegionTotals {
    population: i64,
    energy_consumption_gwh: f64,
    renewable_energy_consumption_gwh: f64,
    fossil_energy_consumption_gwh: f64,
}

/// Roll country rows up into the custom regions of `grouping`.
///
/// Inner join on `entity_code` (a country listed under several regions counts
/// towards each), grouped by `(region_entity_code, region_name, year)`. Unknown
/// populations add nothing to the regional total. Shares are recomputed from the
/// summed consumption, so a region with zero consumption gets NaN shares.
/// Regions become entities in their own right: the output is keyed by region name
/// and code, sorted by the grouping key.
pub fn compute_regional_rollups(
    breakdown: &Table<BreakdownWithPopulationRecord>,
    grouping: &Table<RegionalGroupingRecord>,
) -> Table<BreakdownWithPopulationRecord> {
    let mut regions_by_code: HashMap<&str, Vec<(&str, &str)>> = HashMap::new();
    for row in grouping.iter() {
        regions_by_code
            .entry(row.entity_code.as_str())
            .or_default()
            .push((row.region_entity_code.as_str(), row.region_name.as_str()));
    }

    let mut totals: BTreeMap<(&str, &str, i32), RegionTotals> = BTreeMap::new();
    for row in breakdown.iter() {
        let Some(regions) = regions_by_code.get(row.entity_code.as_str()) else {
            continue;
        };
        for &(region_code, region_name) in regions {
            let entry = totals.entry((region_code, region_name, row.year)).or_default();
            entry.population += row.population.unwrap_or(0);
            entry.energy_consumption_gwh += row.energy_consumption_gwh;
            entry.renewable_energy_consumption_gwh += row.renewable_energy_consumption_gwh;
            entry.fossil_energy_consumption_gwh += row.fossil_energy_consumption_gwh;
        }
    }

    let rows = totals
        .into_iter()
        .map(|((region_code, region_name, year), t)| BreakdownWithPopulationRecord {
            entity: region_name.to_string(),
            entity_code: region_code.to_string(),
            year,
            energy_consumption_gwh: t.energy_consumption_gwh,
            renewable_energy_pct: t.renewable_energy_consumption_gwh / t.energy_consumption_gwh,
            fossil_energy_pct: t.fossil_energy_consumption_gwh / t.energy_consumption_gwh,
            renewable_energy_consumption_gwh: t.renewable_energy_consumption_gwh,
            fossil_energy_consumption_gwh: t.fossil_energy_consumption_gwh,
            population: Some(t.population),
        })
        .collect();

    Table::new(ENERGY_BREAKDOWN_WITH_NEW_REGIONS, rows)
}

pub struct EnergyBreakdownWithNewRegionsAsset;

#[async_trait]
impl Asset for EnergyBreakdownWithNewRegionsAsset {
    fn id(&self) -> &'static str {
        ENERGY_BREAKDOWN_WITH_NEW_REGIONS
    }

    fn depends_on(&self) -> &'static [&'static str] {
        &[ENERGY_BREAKDOWN_WITH_POPULATION, REGIONAL_GROUPING]
    }

    fn description(&self) -> &'static str {
        "Combine energy breakdown with new regional data"
    }

    async fn materialize(&self, inputs: AssetInputs) -> Result<AssetValue, AssetError> {
        let breakdown = inputs
            .get(ENERGY_BREAKDOWN_WITH_POPULATION)?
            .as_breakdown_with_population(ENERGY_BREAKDOWN_WITH_POPULATION)?;
        let grouping = inputs
            .get(REGIONAL_GROUPING)?
            .as_regional_grouping(REGIONAL_GROUPING)?;

        let table = compute_regional_rollups(breakdown, grouping);
        validate_table(&table)?;
        Ok(AssetValue::BreakdownWithPopulation(table))
    }
}
