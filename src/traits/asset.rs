// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::config::AssetSpec;
use crate::errors::AssetError;
use crate::model::{AssetInputs, AssetValue};

/// A software-defined asset: a named table computed from its upstream assets.
#[async_trait]
pub trait Asset: Send + Sync {
    /// Unique asset id, also the key its dependents use to find it.
    fn id(&self) -> &'static str;

    /// Ids of the assets whose values are passed to `materialize`.
    fn depends_on(&self) -> &'static [&'static str] {
        &[]
    }

    fn description(&self) -> &'static str;

    /// Compute the asset from its upstream values.
    async fn materialize(&self, inputs: AssetInputs) -> Result<AssetValue, AssetError>;

    fn spec(&self) -> AssetSpec {
        AssetSpec {
            id: self.id().to_string(),
            depends_on: self.depends_on().iter().map(|d| d.to_string()).collect(),
        }
    }
}
