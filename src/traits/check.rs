// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::errors::AssetError;
use crate::model::AssetValue;

/// Outcome of evaluating a check against a materialized asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub passed: bool,
    pub description: String,
}

/// A data quality check attached to one asset.
///
/// A failing blocking check stops every downstream asset from materializing.
pub trait AssetCheck: Send + Sync {
    fn name(&self) -> &'static str;

    /// Id of the asset this check evaluates.
    fn asset(&self) -> &'static str;

    fn blocking(&self) -> bool;

    fn description(&self) -> &'static str;

    fn evaluate(&self, value: &AssetValue) -> Result<CheckResult, AssetError>;
}
