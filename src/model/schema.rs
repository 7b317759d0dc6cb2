// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Column-level schemas for asset tables.
//!
//! Types are enforced by the record structs; what remains to check at runtime is
//! nullability. Each record declares the columns that must be populated and an
//! asset whose output breaks that contract fails instead of handing bad rows
//! downstream.

use std::fmt;

use serde::Serialize;

use crate::errors::AssetError;

use super::records::*;
use super::table::Table;

/// One column in one row that breaks its table schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaViolation {
    pub table: String,
    pub row: usize,
    pub column: &'static str,
    pub reason: &'static str,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} row {} column '{}': {}",
            self.table, self.row, self.column, self.reason
        )
    }
}

/// A record type with column constraints.
pub trait Schema {
    /// Column names in serialization order, used as the CSV header.
    const COLUMNS: &'static [&'static str];

    /// Columns that violate the schema in this row.
    fn violations(&self) -> Vec<(&'static str, &'static str)>;
}

const EMPTY: &str = "must not be empty";
const NAN: &str = "must not be NaN";

fn require_text(out: &mut Vec<(&'static str, &'static str)>, column: &'static str, value: &str) {
    if value.trim().is_empty() {
        out.push((column, EMPTY));
    }
}

fn require_number(out: &mut Vec<(&'static str, &'static str)>, column: &'static str, value: f64) {
    if value.is_nan() {
        out.push((column, NAN));
    }
}

impl Schema for PopulationRecord {
    const COLUMNS: &'static [&'static str] = &["entity", "entity_code", "year", "population"];

    fn violations(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        require_text(&mut out, "entity", &self.entity);
        if self.population < 0 {
            out.push(("population", "must not be negative"));
        }
        out
    }
}

impl Schema for EnergyConsumptionRecord {
    const COLUMNS: &'static [&'static str] = &["entity", "entity_code", "year", "energy_consumption_gwh"];

    fn violations(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        require_text(&mut out, "entity", &self.entity);
        require_number(&mut out, "energy_consumption_gwh", self.energy_consumption_gwh);
        out
    }
}

impl Schema for RenewableCoverageRecord {
    const COLUMNS: &'static [&'static str] = &["entity", "entity_code", "year", "renewable_energy_pct"];

    fn violations(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        require_text(&mut out, "entity", &self.entity);
        require_number(&mut out, "renewable_energy_pct", self.renewable_energy_pct);
        out
    }
}

impl Schema for RegionalGroupingRecord {
    const COLUMNS: &'static [&'static str] = &["region_entity_code", "region_name", "entity_code"];

    fn violations(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        require_text(&mut out, "region_entity_code", &self.region_entity_code);
        require_text(&mut out, "region_name", &self.region_name);
        require_text(&mut out, "entity_code", &self.entity_code);
        out
    }
}

impl Schema for EnergyBreakdownRecord {
    const COLUMNS: &'static [&'static str] = &[
        "entity", "entity_code", "year",
        "energy_consumption_gwh",
        "renewable_energy_pct",
        "fossil_energy_pct",
        "renewable_energy_consumption_gwh",
        "fossil_energy_consumption_gwh",
    ];

    fn violations(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        require_text(&mut out, "entity", &self.entity);
        require_number(&mut out, "renewable_energy_pct", self.renewable_energy_pct);
        require_number(&mut out, "fossil_energy_pct", self.fossil_energy_pct);
        out
    }
}

// Shares are 0/0 for a regional rollup with no consumption in a year.
impl Schema for BreakdownWithPopulationRecord {
    const COLUMNS: &'static [&'static str] = &[
        "entity", "entity_code", "year",
        "energy_consumption_gwh",
        "renewable_energy_pct",
        "fossil_energy_pct",
        "renewable_energy_consumption_gwh",
        "fossil_energy_consumption_gwh",
        "population",
    ];

    fn violations(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        require_text(&mut out, "entity", &self.entity);
        if self.energy_consumption_gwh != 0.0 {
            require_number(&mut out, "renewable_energy_pct", self.renewable_energy_pct);
            require_number(&mut out, "fossil_energy_pct", self.fossil_energy_pct);
        }
        out
    }
}

impl Schema for PerCapitaRecord {
    const COLUMNS: &'static [&'static str] = &[
        "entity", "entity_code", "year",
        "energy_consumption_gwh",
        "renewable_energy_pct",
        "fossil_energy_pct",
        "renewable_energy_consumption_gwh",
        "fossil_energy_consumption_gwh",
        "population",
        "energy_consumption_per_capita_gwh",
        "renewable_energy_per_capita_gwh",
        "fossil_energy_per_capita_gwh",
    ];

    fn violations(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        require_text(&mut out, "entity", &self.entity);
        out
    }
}

/// Collect every schema violation in a table.
pub fn schema_violations<R: Schema>(table: &Table<R>) -> Vec<SchemaViolation> {
    table
        .iter()
        .enumerate()
        .flat_map(|(row, record)| {
            record
                .violations()
                .into_iter()
                .map(move |(column, reason)| SchemaViolation {
                    table: table.name().to_string(),
                    row,
                    column,
                    reason,
                })
        })
        .collect()
}

/// Fail with `AssetError::Schema` when any row breaks the table schema.
pub fn validate_table<R: Schema>(table: &Table<R>) -> Result<(), AssetError> {
    let violations = schema_violations(table);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(AssetError::Schema {
            table: table.name().to_string(),
            violations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_requires_every_column() {
        let table = Table::new(
            "regional_grouping",
            vec![
                RegionalGroupingRecord {
                    region_entity_code: "IBR".into(),
                    region_name: "Iberia".into(),
                    entity_code: "ESP".into(),
                },
                RegionalGroupingRecord {
                    region_entity_code: "IBR".into(),
                    region_name: "".into(),
                    entity_code: "PRT".into(),
                },
            ],
        );

        let violations = schema_violations(&table);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].row, 1);
        assert_eq!(violations[0].column, "region_name");
        assert!(validate_table(&table).is_err());
    }

    #[test]
    fn breakdown_rejects_nan_shares() {
        let table = Table::new(
            "energy_breakdown",
            vec![EnergyBreakdownRecord {
                entity: "Spain".into(),
                entity_code: "ESP".into(),
                year: 2020,
                energy_consumption_gwh: 10.0,
                renewable_energy_pct: f64::NAN,
                fossil_energy_pct: 0.5,
                renewable_energy_consumption_gwh: 5.0,
                fossil_energy_consumption_gwh: 5.0,
            }],
        );

        let err = validate_table(&table).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1 schema violation(s) in 'energy_breakdown'"));
        assert!(msg.contains("renewable_energy_pct"));
    }

    fn with_population(consumption: f64, share: f64) -> BreakdownWithPopulationRecord {
        BreakdownWithPopulationRecord {
            entity: "Iberia".into(),
            entity_code: "IBR".into(),
            year: 2020,
            energy_consumption_gwh: consumption,
            renewable_energy_pct: share,
            fossil_energy_pct: share,
            renewable_energy_consumption_gwh: 0.0,
            fossil_energy_consumption_gwh: 0.0,
            population: Some(57_000_000),
        }
    }

    #[test]
    fn nan_shares_need_zero_consumption() {
        let table = Table::new(
            "energy_breakdown_with_new_regions",
            vec![with_population(100.0, f64::NAN)],
        );
        match validate_table(&table) {
            Err(AssetError::Schema { violations, .. }) => {
                let columns: Vec<_> = violations.iter().map(|v| v.column).collect();
                assert_eq!(columns, vec!["renewable_energy_pct", "fossil_energy_pct"]);
            }
            other => panic!("expected schema error, got {:?}", other),
        }

        let idle = Table::new(
            "energy_breakdown_with_new_regions",
            vec![with_population(0.0, f64::NAN)],
        );
        assert!(validate_table(&idle).is_ok());
    }

    fn serialized_header<R: Serialize>(record: &R) -> String {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(record).unwrap();
        let csv = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        csv.lines().next().unwrap().to_string()
    }

    #[test]
    fn columns_match_serialized_field_order() {
        let breakdown = EnergyBreakdownRecord {
            entity: "Spain".into(),
            entity_code: "ESP".into(),
            year: 2020,
            energy_consumption_gwh: 10.0,
            renewable_energy_pct: 0.5,
            fossil_energy_pct: 0.5,
            renewable_energy_consumption_gwh: 5.0,
            fossil_energy_consumption_gwh: 5.0,
        };
        let with_population = BreakdownWithPopulationRecord::from_breakdown(&breakdown, Some(1));
        let per_capita = PerCapitaRecord::from_breakdown(&with_population);

        assert_eq!(
            serialized_header(&PopulationRecord {
                entity: "Spain".into(),
                entity_code: "ESP".into(),
                year: 2020,
                population: 1,
            }),
            PopulationRecord::COLUMNS.join(",")
        );
        assert_eq!(
            serialized_header(&EnergyConsumptionRecord {
                entity: "Spain".into(),
                entity_code: "ESP".into(),
                year: 2020,
                energy_consumption_gwh: 1.0,
            }),
            EnergyConsumptionRecord::COLUMNS.join(",")
        );
        assert_eq!(
            serialized_header(&RenewableCoverageRecord {
                entity: "Spain".into(),
                entity_code: "ESP".into(),
                year: 2020,
                renewable_energy_pct: 0.1,
            }),
            RenewableCoverageRecord::COLUMNS.join(",")
        );
        assert_eq!(
            serialized_header(&RegionalGroupingRecord {
                region_entity_code: "IBR".into(),
                region_name: "Iberia".into(),
                entity_code: "ESP".into(),
            }),
            RegionalGroupingRecord::COLUMNS.join(",")
        );
        assert_eq!(serialized_header(&breakdown), EnergyBreakdownRecord::COLUMNS.join(","));
        assert_eq!(
            serialized_header(&with_population),
            BreakdownWithPopulationRecord::COLUMNS.join(",")
        );
        assert_eq!(serialized_header(&per_capita), PerCapitaRecord::COLUMNS.join(","));
    }

    #[test]
    fn missing_entity_code_is_allowed() {
        let table = Table::new(
            "population",
            vec![PopulationRecord {
                entity: "World".into(),
                entity_code: String::new(),
                year: 2020,
                population: 7_800_000_000,
            }],
        );
        assert!(validate_table(&table).is_ok());
    }
}
