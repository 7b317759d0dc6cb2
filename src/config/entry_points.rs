// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use super::DependencyGraph;

/// A type-safe wrapper for DAG entry points - assets with no dependencies.
///
/// Entry points can be materialized as soon as a run starts. For this pipeline
/// they are the source datasets read from disk.
///
/// # Examples
///
/// ```
/// use energy_analysis::config::EntryPoints;
///
/// let mut entry_points = EntryPoints::new();
/// entry_points.add("population".to_string());
/// entry_points.add("regional_grouping".to_string());
///
/// assert_eq!(entry_points.iter().count(), 2);
/// let ids: Vec<String> = entry_points.into();
/// assert_eq!(ids, vec!["population", "regional_grouping"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntryPoints(pub Vec<String>);

impl EntryPoints {
    /// Create a new empty entrypoints list
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Every asset in `graph` that nothing points to, sorted by id.
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let mut entries: Vec<String> = graph
            .build_reverse_dependencies()
            .into_iter()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(id, _)| id)
            .collect();
        entries.sort();
        Self(entries)
    }

    /// Add an entrypoint
    pub fn add(&mut self, asset_id: String) {
        self.0.push(asset_id);
    }

    /// Get iterator over entrypoints
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for EntryPoints {
    fn from(entrypoints: Vec<String>) -> Self {
        Self(entrypoints)
    }
}

impl From<EntryPoints> for Vec<String> {
    fn from(value: EntryPoints) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssetSpec;

    #[test]
    fn entry_points_are_assets_without_dependencies() {
        let graph = DependencyGraph::from_specs(&[
            AssetSpec { id: "b".into(), depends_on: vec![] },
            AssetSpec { id: "a".into(), depends_on: vec![] },
            AssetSpec { id: "c".into(), depends_on: vec!["a".into(), "b".into()] },
        ]);
        let entry_points: Vec<String> = EntryPoints::from_graph(&graph).into();
        assert_eq!(entry_points, vec!["a", "b"]);
    }
}
