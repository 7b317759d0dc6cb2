//! The energy analysis assets.
//!
//! ```text
//! energy_consumption ─┐
//! renewable_coverage ─┴─ energy_breakdown ─┐
//! population ──────────────────────────────┴─ energy_breakdown_with_population ─┬──────────────┐
//! regional_grouping ────────────────────────── energy_breakdown_with_new_regions ┴─ per_capita ─ report
//! ```

pub mod breakdown;
pub mod factory;
pub mod per_capita;
pub mod regions;
pub mod report;
pub mod sources;

pub use breakdown::{
    EnergyBreakdownAsset, EnergyBreakdownWithPopulationAsset, ENERGY_BREAKDOWN,
    ENERGY_BREAKDOWN_WITH_POPULATION,
};
pub use factory::AssetFactory;
pub use per_capita::{EnergyBreakdownPerCapitaAsset, ENERGY_BREAKDOWN_PER_CAPITA};
pub use regions::{EnergyBreakdownWithNewRegionsAsset, ENERGY_BREAKDOWN_WITH_NEW_REGIONS};
pub use report::{EnergyAnalysisReportAsset, ENERGY_ANALYSIS_REPORT};
pub use sources::{
    EnergyConsumptionAsset, PopulationAsset, RegionalGroupingAsset, RenewableCoverageAsset,
    ENERGY_CONSUMPTION, POPULATION, REGIONAL_GROUPING, RENEWABLE_COVERAGE,
};
