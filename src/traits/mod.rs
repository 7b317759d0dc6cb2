pub mod asset;
pub mod check;
pub mod executor;

pub use asset::Asset;
pub use check::{AssetCheck, CheckResult};
pub use executor::DagExecutor;
