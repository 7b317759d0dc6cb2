// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::Config;
use crate::traits::AssetCheck;

use super::{EnergyConservationCheck, PerCapitaPlausibilityCheck};

/// Builds the asset checks with thresholds from configuration.
pub struct CheckFactory;

impl CheckFactory {
    pub fn create_checks(cfg: &Config) -> Vec<Arc<dyn AssetCheck>> {
        vec![
            Arc::new(EnergyConservationCheck::new(cfg.checks.conservation_tolerance)),
            Arc::new(PerCapitaPlausibilityCheck::new(cfg.checks.per_capita_max_gwh)),
        ]
    }
}
