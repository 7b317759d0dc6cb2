// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::Config;
use crate::traits::Asset;

use super::*;

/// Builds the energy analysis asset definitions from configuration.
pub struct AssetFactory;

impl AssetFactory {
    /// Every asset in the pipeline, sources first. Dependencies are declared by
    /// the assets themselves; configuration supplies file locations and report
    /// settings.
    pub fn create_assets(cfg: &Config) -> Vec<Arc<dyn Asset>> {
        vec![
            Arc::new(PopulationAsset::new(cfg.data.population_path())),
            Arc::new(EnergyConsumptionAsset::new(cfg.data.energy_consumption_path())),
            Arc::new(RenewableCoverageAsset::new(cfg.data.renewable_share_path())),
            Arc::new(RegionalGroupingAsset::new(cfg.data.regional_grouping_path())),
            Arc::new(EnergyBreakdownAsset),
            Arc::new(EnergyBreakdownWithPopulationAsset),
            Arc::new(EnergyBreakdownWithNewRegionsAsset),
            Arc::new(EnergyBreakdownPerCapitaAsset),
            Arc::new(EnergyAnalysisReportAsset::new(cfg.report.clone())),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validate_dependency_graph;

    #[test]
    fn default_assets_form_a_valid_graph() {
        let cfg: Config = serde_yaml::from_str("strategy: level").unwrap();
        let assets = AssetFactory::create_assets(&cfg);
        let specs: Vec<_> = assets.iter().map(|a| a.spec()).collect();

        assert_eq!(specs.len(), 9);
        assert!(validate_dependency_graph(&specs).is_ok());

        let report = specs
            .iter()
            .find(|s| s.id == ENERGY_ANALYSIS_REPORT)
            .unwrap();
        assert_eq!(report.depends_on, vec![ENERGY_BREAKDOWN_PER_CAPITA.to_string()]);
    }
}
