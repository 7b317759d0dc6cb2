//! Data quality checks attached to assets.
//!
//! Checks run as soon as their asset materializes. A failing blocking check
//! keeps every downstream asset from running; a failing non-blocking check is
//! recorded and logged.

mod conservation;
mod factory;
mod plausibility;

pub use conservation::{EnergyConservationCheck, ENERGY_CONSERVATION_CHECK};
pub use factory::CheckFactory;
pub use plausibility::{PerCapitaPlausibilityCheck, PER_CAPITA_PLAUSIBILITY_CHECK};
