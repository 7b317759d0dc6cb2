// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::assets::ENERGY_BREAKDOWN_PER_CAPITA;
use crate::errors::AssetError;
use crate::model::AssetValue;
use crate::traits::{AssetCheck, CheckResult};

pub const PER_CAPITA_PLAUSIBILITY_CHECK: &str = "per_capita_plausibility_check";

/// Flags per-capita consumption above a plausible ceiling. Non-blocking.
pub struct PerCapitaPlausibilityCheck {
    max_gwh: f64,
}

impl PerCapitaPlausibilityCheck {
    pub fn new(max_gwh: f64) -> Self {
        Self { max_gwh }
    }
}

impl AssetCheck for PerCapitaPlausibilityCheck {
    fn name(&self) -> &'static str {
        PER_CAPITA_PLAUSIBILITY_CHECK
    }

    fn asset(&self) -> &'static str {
        ENERGY_BREAKDOWN_PER_CAPITA
    }

    fn blocking(&self) -> bool {
        false
    }

    fn description(&self) -> &'static str {
        "Per-capita energy consumption stays below a plausible maximum"
    }

    fn evaluate(&self, value: &AssetValue) -> Result<CheckResult, AssetError> {
        let table = value.as_per_capita(ENERGY_BREAKDOWN_PER_CAPITA)?;
        let violations = table
            .iter()
            .filter(|r| {
                r.energy_consumption_per_capita_gwh
                    .is_some_and(|v| v > self.max_gwh)
            })
            .count();

        Ok(CheckResult {
            passed: violations == 0,
            description: format!(
                "Per-capita bounds: {} violations (max allowed: {} GWh)",
                violations, self.max_gwh
            ),
        })
    }
}
