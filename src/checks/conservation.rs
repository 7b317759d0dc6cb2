// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::assets::ENERGY_BREAKDOWN_WITH_NEW_REGIONS;
use crate::errors::AssetError;
use crate::model::AssetValue;
use crate::traits::{AssetCheck, CheckResult};

pub const ENERGY_CONSERVATION_CHECK: &str = "energy_conservation_check";

/// Renewable and fossil shares of every regional row must add up to one.
///
/// Rows whose shares are NaN (regions with no recorded consumption) cannot be
/// compared and are not counted as violations.
pub struct EnergyConservationCheck {
    tolerance: f64,
}

impl EnergyConservationCheck {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
}

impl AssetCheck for EnergyConservationCheck {
    fn name(&self) -> &'static str {
        ENERGY_CONSERVATION_CHECK
    }

    fn asset(&self) -> &'static str {
        ENERGY_BREAKDOWN_WITH_NEW_REGIONS
    }

    fn blocking(&self) -> bool {
        true
    }

    fn description(&self) -> &'static str {
        "Fossil and renewable shares sum to 100% for every region"
    }

    fn evaluate(&self, value: &AssetValue) -> Result<CheckResult, AssetError> {
        let table = value.as_breakdown_with_population(ENERGY_BREAKDOWN_WITH_NEW_REGIONS)?;
        let invalid = table
            .iter()
            .filter(|r| (r.fossil_energy_pct + r.renewable_energy_pct - 1.0).abs() > self.tolerance)
            .count();

        Ok(CheckResult {
            passed: invalid == 0,
            description: format!(
                "Energy conservation: {} invalid rows out of {}",
                invalid,
                table.len()
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BreakdownWithPopulationRecord, Table};

    fn region(renewable: f64, fossil: f64) -> BreakdownWithPopulationRecord {
        BreakdownWithPopulationRecord {
            entity: "Iberia".into(),
            entity_code: "IBR".into(),
            year: 2020,
            energy_consumption_gwh: 100.0,
            renewable_energy_pct: renewable,
            fossil_energy_pct: fossil,
            renewable_energy_consumption_gwh: 100.0 * renewable,
            fossil_energy_consumption_gwh: 100.0 * fossil,
            population: Some(1),
        }
    }

    fn evaluate(rows: Vec<BreakdownWithPopulationRecord>) -> CheckResult {
        let value = AssetValue::BreakdownWithPopulation(Table::new(ENERGY_BREAKDOWN_WITH_NEW_REGIONS, rows));
        EnergyConservationCheck::new(1e-6).evaluate(&value).unwrap()
    }

    #[test]
    fn balanced_shares_pass() {
        let result = evaluate(vec![region(0.3, 0.7), region(1.0 / 3.0, 2.0 / 3.0)]);
        assert!(result.passed);
        assert_eq!(result.description, "Energy conservation: 0 invalid rows out of 2");
    }

    #[test]
    fn unbalanced_shares_fail() {
        let result = evaluate(vec![region(0.3, 0.7), region(0.5, 0.6)]);
        assert!(!result.passed);
        assert_eq!(result.description, "Energy conservation: 1 invalid rows out of 2");
    }

    #[test]
    fn nan_shares_are_not_counted() {
        let result = evaluate(vec![region(f64::NAN, f64::NAN)]);
        assert!(result.passed);
    }

    #[test]
    fn rejects_other_tables() {
        let value = AssetValue::Population(Table::new("population", vec![]));
        assert!(matches!(
            EnergyConservationCheck::new(1e-6).evaluate(&value),
            Err(AssetError::WrongInput { .. })
        ));
    }
}
