pub mod factory;
pub mod level_by_level;
mod outcome;
mod step;
pub mod work_queue;

#[cfg(test)]
mod integration_tests;

pub use factory::ExecutorFactory;
pub use level_by_level::LevelByLevelExecutor;
pub use outcome::{AssetOutcome, CheckRecord, MaterializationReport};
pub use work_queue::WorkQueueExecutor;
