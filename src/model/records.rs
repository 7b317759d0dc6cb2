// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Row types for every table that flows through the asset graph.
//!
//! Entity codes that are missing in the published datasets are carried as the
//! empty string so that join keys compare the way the source data lines up:
//! two aggregate rows without a code still match each other on
//! `(entity, entity_code, year)`.

use serde::Serialize;

/// Join key shared by every per-entity, per-year table.
pub type EntityYearKey = (String, String, i32);

/// Population estimate for one entity and year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationRecord {
    pub entity: String,
    pub entity_code: String,
    pub year: i32,
    pub population: i64,
}

/// Primary energy consumption, in GWh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyConsumptionRecord {
    pub entity: String,
    pub entity_code: String,
    pub year: i32,
    pub energy_consumption_gwh: f64,
}

/// Renewable share of primary energy as a fraction in `0..=1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenewableCoverageRecord {
    pub entity: String,
    pub entity_code: String,
    pub year: i32,
    pub renewable_energy_pct: f64,
}

/// Maps a country code onto a custom region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionalGroupingRecord {
    pub region_entity_code: String,
    pub region_name: String,
    pub entity_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnergyBreakdownRecord {
    pub entity: String,
    pub entity_code: String,
    pub year: i32,
    pub energy_consumption_gwh: f64,
    pub renewable_energy_pct: f64,
    pub fossil_energy_pct: f64,
    pub renewable_energy_consumption_gwh: f64,
    pub fossil_energy_consumption_gwh: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownWithPopulationRecord {
    pub entity: String,
    pub entity_code: String,
    pub year: i32,
    pub energy_consumption_gwh: f64,
    pub renewable_energy_pct: f64,
    pub fossil_energy_pct: f64,
    pub renewable_energy_consumption_gwh: f64,
    pub fossil_energy_consumption_gwh: f64,
    pub population: Option<i64>,
}

impl BreakdownWithPopulationRecord {
    pub fn from_breakdown(breakdown: &EnergyBreakdownRecord, population: Option<i64>) -> Self {
        Self {
            entity: breakdown.entity.clone(),
            entity_code: breakdown.entity_code.clone(),
            year: breakdown.year,
            energy_consumption_gwh: breakdown.energy_consumption_gwh,
            renewable_energy_pct: breakdown.renewable_energy_pct,
            fossil_energy_pct: breakdown.fossil_energy_pct,
            renewable_energy_consumption_gwh: breakdown.renewable_energy_consumption_gwh,
            fossil_energy_consumption_gwh: breakdown.fossil_energy_consumption_gwh,
            population,
        }
    }
}

/// Energy breakdown with per-capita figures. Per-capita values are `None`
/// when the population is unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerCapitaRecord {
    pub entity: String,
    pub entity_code: String,
    pub year: i32,
    pub energy_consumption_gwh: f64,
    pub renewable_energy_pct: f64,
    pub fossil_energy_pct: f64,
    pub renewable_energy_consumption_gwh: f64,
    pub fossil_energy_consumption_gwh: f64,
    pub population: Option<i64>,
    pub energy_consumption_per_capita_gwh: Option<f64>,
    pub renewable_energy_per_capita_gwh: Option<f64>,
    pub fossil_energy_per_capita_gwh: Option<f64>,
}

impl PerCapitaRecord {
    pub fn from_breakdown(row: &BreakdownWithPopulationRecord) -> Self {
        let per_capita = |value: f64| row.population.map(|p| value / p as f64);
        Self {
            entity: row.entity.clone(),
            entity_code: row.entity_code.clone(),
            year: row.year,
            energy_consumption_gwh: row.energy_consumption_gwh,
            renewable_energy_pct: row.renewable_energy_pct,
            fossil_energy_pct: row.fossil_energy_pct,
            renewable_energy_consumption_gwh: row.renewable_energy_consumption_gwh,
            fossil_energy_consumption_gwh: row.fossil_energy_consumption_gwh,
            population: row.population,
            energy_consumption_per_capita_gwh: per_capita(row.energy_consumption_gwh),
            renewable_energy_per_capita_gwh: per_capita(row.renewable_energy_consumption_gwh),
            fossil_energy_per_capita_gwh: per_capita(row.fossil_energy_consumption_gwh),
        }
    }

    /// True when all three per-capita figures exist and are finite.
    pub fn has_valid_per_capita(&self) -> bool {
        [
            self.energy_consumption_per_capita_gwh,
            self.renewable_energy_per_capita_gwh,
            self.fossil_energy_per_capita_gwh,
        ]
        .iter()
        .all(|v| v.is_some_and(f64::is_finite))
    }
}

/// Types that can be joined on `(entity, entity_code, year)`.
pub trait KeyedRecord {
    fn key(&self) -> EntityYearKey;
}

macro_rules! keyed_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl KeyedRecord for $ty {
                fn key(&self) -> EntityYearKey {
                    (self.entity.clone(), self.entity_code.clone(), self.year)
                }
            }
        )*
    };
}

keyed_record!(
    PopulationRecord,
    EnergyConsumptionRecord,
    RenewableCoverageRecord,
    EnergyBreakdownRecord,
    BreakdownWithPopulationRecord,
    PerCapitaRecord,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn with_population(population: Option<i64>) -> BreakdownWithPopulationRecord {
        BreakdownWithPopulationRecord {
            entity: "Portugal".into(),
            entity_code: "PRT".into(),
            year: 2020,
            energy_consumption_gwh: 200.0,
            renewable_energy_pct: 0.25,
            fossil_energy_pct: 0.75,
            renewable_energy_consumption_gwh: 50.0,
            fossil_energy_consumption_gwh: 150.0,
            population,
        }
    }

    #[test]
    fn per_capita_divides_by_population() {
        let row = PerCapitaRecord::from_breakdown(&with_population(Some(100)));
        assert_eq!(row.energy_consumption_per_capita_gwh, Some(2.0));
        assert_eq!(row.renewable_energy_per_capita_gwh, Some(0.5));
        assert_eq!(row.fossil_energy_per_capita_gwh, Some(1.5));
        assert!(row.has_valid_per_capita());
    }

    #[test]
    fn per_capita_is_absent_without_population() {
        let row = PerCapitaRecord::from_breakdown(&with_population(None));
        assert_eq!(row.energy_consumption_per_capita_gwh, None);
        assert!(!row.has_valid_per_capita());
    }

    #[test]
    fn zero_population_yields_non_finite_values() {
        let row = PerCapitaRecord::from_breakdown(&with_population(Some(0)));
        assert_eq!(row.energy_consumption_per_capita_gwh, Some(f64::INFINITY));
        assert!(!row.has_valid_per_capita());
    }
}
