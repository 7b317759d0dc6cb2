// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::traits::{Asset, AssetCheck};

/// A type-safe registry mapping asset IDs to their definitions.
///
/// Definitions are wrapped in `Arc<dyn Asset>` so executors can hand the same
/// instance to a spawned task without cloning it.
#[derive(Clone, Default)]
pub struct AssetMap(pub HashMap<String, Arc<dyn Asset>>);

impl AssetMap {
    /// Create a new empty asset map
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Insert an asset under its own id
    pub fn register(&mut self, asset: Arc<dyn Asset>) {
        self.0.insert(asset.id().to_string(), asset);
    }

    /// Get an asset by ID
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Asset>> {
        self.0.get(id)
    }

    pub fn contains_key(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for AssetMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetMap")
            .field("asset_count", &self.0.len())
            .field("asset_ids", &self.0.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FromIterator<Arc<dyn Asset>> for AssetMap {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Asset>>>(iter: I) -> Self {
        let mut map = Self::new();
        for asset in iter {
            map.register(asset);
        }
        map
    }
}

/// Checks grouped by the asset they evaluate.
#[derive(Clone, Default)]
pub struct CheckMap(pub HashMap<String, Vec<Arc<dyn AssetCheck>>>);

impl CheckMap {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn register(&mut self, check: Arc<dyn AssetCheck>) {
        self.0
            .entry(check.asset().to_string())
            .or_default()
            .push(check);
    }

    /// Checks attached to `asset_id`, in registration order.
    pub fn for_asset(&self, asset_id: &str) -> &[Arc<dyn AssetCheck>] {
        self.0.get(asset_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CheckMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.0.values().flatten().map(|c| c.name()).collect();
        f.debug_struct("CheckMap").field("checks", &names).finish()
    }
}

impl FromIterator<Arc<dyn AssetCheck>> for CheckMap {
    fn from_iter<I: IntoIterator<Item = Arc<dyn AssetCheck>>>(iter: I) -> Self {
        let mut map = Self::new();
        for check in iter {
            map.register(check);
        }
        map
    }
}
