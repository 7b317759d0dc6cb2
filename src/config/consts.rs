/// Fallback concurrency when available parallelism cannot be detected
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;
/// Per-capita consumption above this is implausible (100 MWh per person per year)
pub const DEFAULT_PER_CAPITA_MAX_GWH: f64 = 0.1;
/// Allowed drift of fossil + renewable shares away from 1.0
pub const DEFAULT_CONSERVATION_TOLERANCE: f64 = 1e-6;
/// Number of entities listed in the top-N report sheets
pub const DEFAULT_TOP_N: usize = 10;
/// Number of years covered by the focus-entity comparison sheets
pub const DEFAULT_WINDOW_YEARS: i32 = 10;

pub const DEFAULT_DATA_DIRECTORY: &str = "data";
pub const DEFAULT_POPULATION_FILE: &str = "population-with-un-projections.csv";
pub const DEFAULT_RENEWABLE_SHARE_FILE: &str = "renewable-share-energy.csv";
pub const DEFAULT_ENERGY_CONSUMPTION_FILE: &str = "primary-energy-cons.csv";
pub const DEFAULT_REGIONAL_GROUPING_FILE: &str = "regional-grouping.csv";
pub const DEFAULT_REPORT_DIRECTORY: &str = "energy_analysis_report";
pub const DEFAULT_STORAGE_DIRECTORY: &str = "materialized";
pub const DEFAULT_FOCUS_ENTITIES: [&str; 2] = ["North America", "Iberia"];

/// Number of available CPU cores, falling back to `DEFAULT_MAX_CONCURRENCY`.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(DEFAULT_MAX_CONCURRENCY)
}
