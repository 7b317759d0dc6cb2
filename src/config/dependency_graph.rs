// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

/// The id and dependencies of one asset, as declared by its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    pub id: String,
    pub depends_on: Vec<String>,
}

/// Newtype wrapper for dependency graph providing type safety
///
/// Maps every asset id to the ids of the assets that depend on it.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph(pub HashMap<String, Vec<String>>);

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Build the forward graph (dependency -> dependents) from asset specs.
    ///
    /// Every asset gets an entry, even when nothing depends on it.
    pub fn from_specs(specs: &[AssetSpec]) -> Self {
        let mut graph: HashMap<String, Vec<String>> = HashMap::new();
        for spec in specs {
            graph.entry(spec.id.clone()).or_default();
            for dependency in &spec.depends_on {
                graph
                    .entry(dependency.clone())
                    .or_default()
                    .push(spec.id.clone());
            }
        }
        Self(graph)
    }

    /// Get dependents for an asset
    pub fn get_dependents(&self, asset_id: &str) -> Option<&Vec<String>> {
        self.0.get(asset_id)
    }

    /// Get all asset IDs in the graph
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Invert the graph: asset id -> ids of the assets it depends on.
    ///
    /// Every asset in the graph appears as a key, with an empty list for entry points.
    pub fn build_reverse_dependencies(&self) -> HashMap<String, Vec<String>> {
        let mut reverse: HashMap<String, Vec<String>> =
            self.0.keys().map(|id| (id.clone(), Vec::new())).collect();

        for (dependency, dependents) in &self.0 {
            for dependent in dependents {
                reverse
                    .entry(dependent.clone())
                    .or_default()
                    .push(dependency.clone());
            }
        }

        for dependencies in reverse.values_mut() {
            dependencies.sort();
        }
        reverse
    }

    /// Every asset reachable downstream of `asset_id`, excluding itself.
    pub fn downstream_of(&self, asset_id: &str) -> HashSet<String> {
        let mut seen = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::from([asset_id]);
        while let Some(current) = queue.pop_front() {
            if let Some(dependents) = self.0.get(current) {
                for dependent in dependents {
                    if seen.insert(dependent.clone()) {
                        queue.push_back(dependent);
                    }
                }
            }
        }
        seen
    }

    /// The selected assets plus all of their transitive dependencies.
    pub fn upstream_closure(&self, selection: &[String]) -> HashSet<String> {
        let reverse = self.build_reverse_dependencies();
        let mut closure = HashSet::new();
        let mut queue: VecDeque<String> = selection.iter().cloned().collect();
        while let Some(current) = queue.pop_front() {
            if !closure.insert(current.clone()) {
                continue;
            }
            if let Some(dependencies) = reverse.get(&current) {
                queue.extend(dependencies.iter().cloned());
            }
        }
        closure
    }

    /// Restrict the graph to `keep`, dropping edges to removed assets.
    pub fn retain(&self, keep: &HashSet<String>) -> Self {
        let graph = self
            .0
            .iter()
            .filter(|(id, _)| keep.contains(*id))
            .map(|(id, dependents)| {
                let dependents = dependents
                    .iter()
                    .filter(|d| keep.contains(*d))
                    .cloned()
                    .collect();
                (id.clone(), dependents)
            })
            .collect();
        Self(graph)
    }

    /// Deterministic topological order (Kahn's algorithm, ties broken by id).
    ///
    /// Returns `None` if the graph contains a cycle.
    pub fn topological_order(&self) -> Option<Vec<String>> {
        let reverse = self.build_reverse_dependencies();
        let mut in_degree: BTreeMap<&str, usize> = reverse
            .iter()
            .map(|(id, deps)| (id.as_str(), deps.len()))
            .collect();

        let mut ready: Vec<&str> = in_degree
            .iter()
            .filter(|(_, degree)| **degree == 0)
            .map(|(id, _)| *id)
            .collect();
        let mut order = Vec::with_capacity(in_degree.len());

        while let Some(current) = ready.first().copied() {
            ready.remove(0);
            order.push(current.to_string());
            if let Some(dependents) = self.0.get(current) {
                for dependent in dependents {
                    if let Some(degree) = in_degree.get_mut(dependent.as_str()) {
                        *degree -= 1;
                        if *degree == 0 {
                            ready.push(dependent);
                            ready.sort_unstable();
                        }
                    }
                }
            }
        }

        (order.len() == in_degree.len()).then_some(order)
    }
}

impl From<HashMap<String, Vec<String>>> for DependencyGraph {
    fn from(graph: HashMap<String, Vec<String>>) -> Self {
        Self(graph)
    }
}

impl From<DependencyGraph> for HashMap<String, Vec<String>> {
    fn from(graph: DependencyGraph) -> Self {
        graph.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str, deps: &[&str]) -> AssetSpec {
        AssetSpec {
            id: id.to_string(),
            depends_on: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn diamond() -> DependencyGraph {
        DependencyGraph::from_specs(&[
            spec("source", &[]),
            spec("left", &["source"]),
            spec("right", &["source"]),
            spec("sink", &["left", "right"]),
        ])
    }

    #[test]
    fn from_specs_builds_forward_edges() {
        let graph = diamond();
        assert_eq!(graph.len(), 4);
        let mut dependents = graph.get_dependents("source").unwrap().clone();
        dependents.sort();
        assert_eq!(dependents, vec!["left", "right"]);
        assert!(graph.get_dependents("sink").unwrap().is_empty());
    }

    #[test]
    fn reverse_dependencies_cover_every_asset() {
        let reverse = diamond().build_reverse_dependencies();
        assert_eq!(reverse["source"], Vec::<String>::new());
        assert_eq!(reverse["sink"], vec!["left", "right"]);
    }

    #[test]
    fn downstream_is_transitive() {
        let downstream = diamond().downstream_of("left");
        assert_eq!(downstream, HashSet::from(["sink".to_string()]));
        assert_eq!(diamond().downstream_of("source").len(), 3);
    }

    #[test]
    fn upstream_closure_includes_dependencies() {
        let closure = diamond().upstream_closure(&["left".to_string()]);
        assert_eq!(
            closure,
            HashSet::from(["left".to_string(), "source".to_string()])
        );
    }

    #[test]
    fn retain_drops_edges_to_removed_assets() {
        let keep = HashSet::from(["source".to_string(), "left".to_string()]);
        let graph = diamond().retain(&keep);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.get_dependents("source").unwrap(), &vec!["left".to_string()]);
        assert!(graph.get_dependents("left").unwrap().is_empty());
    }

    #[test]
    fn topological_order_is_deterministic() {
        let order = diamond().topological_order().unwrap();
        assert_eq!(order, vec!["source", "left", "right", "sink"]);
    }

    #[test]
    fn topological_order_detects_cycles() {
        let graph = DependencyGraph::from_specs(&[spec("a", &["b"]), spec("b", &["a"])]);
        assert!(graph.topological_order().is_none());
    }
}
