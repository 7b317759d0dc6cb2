// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation of the asset graph.
//!
//! Validation runs three checks in order:
//!
//! 1. **Uniqueness**: every asset id appears once
//! 2. **References**: every `depends_on` entry names an existing asset
//! 3. **Cycles**: DFS with a recursion stack, reporting the cycle path
//!
//! Cycle detection needs a structurally valid graph, so it only runs when the
//! first two checks pass. Errors from the first two checks are accumulated so a
//! broken definition set is reported in one go.
//!
//! # Example
//! ```rust
//! use energy_analysis::config::{validate_dependency_graph, AssetSpec};
//! use energy_analysis::errors::ValidationError;
//!
//! let specs = vec![
//!     AssetSpec { id: "population".into(), depends_on: vec![] },
//!     AssetSpec { id: "per_capita".into(), depends_on: vec!["populaton".into()] },
//! ];
//!
//! let errors = validate_dependency_graph(&specs).unwrap_err();
//! assert!(matches!(errors[0], ValidationError::UnresolvedDependency { .. }));
//! ```

use std::collections::{BTreeMap, HashSet};

use crate::config::AssetSpec;
use crate::errors::ValidationError;

/// Validates asset definitions for structural integrity and executability.
///
/// # Returns
///
/// * `Ok(())` - The graph is valid and ready for execution
/// * `Err(Vec<ValidationError>)` - Every validation error found
pub fn validate_dependency_graph(specs: &[AssetSpec]) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_asset_ids(specs) {
        errors.extend(duplicate_errors);
    }

    if let Err(unresolved_errors) = validate_dependency_references(specs) {
        errors.extend(unresolved_errors);
    }

    // Cycle detection needs a valid graph
    if errors.is_empty() {
        if let Err(cycle_errors) = validate_acyclic_graph(specs) {
            errors.extend(cycle_errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_unique_asset_ids(specs: &[AssetSpec]) -> Result<(), Vec<ValidationError>> {
    let mut seen_ids = HashSet::new();
    let mut errors = Vec::new();

    for spec in specs {
        if !seen_ids.insert(&spec.id) {
            errors.push(ValidationError::DuplicateAssetId {
                asset_id: spec.id.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Every dependency must name an asset in `specs`.
///
/// Typical failures: a typo in a dependency name, or an asset removed from the
/// definitions while its dependents still reference it.
fn validate_dependency_references(specs: &[AssetSpec]) -> Result<(), Vec<ValidationError>> {
    let asset_ids: HashSet<&String> = specs.iter().map(|s| &s.id).collect();
    let mut errors = Vec::new();

    for spec in specs {
        for dependency in &spec.depends_on {
            if !asset_ids.contains(dependency) {
                errors.push(ValidationError::UnresolvedDependency {
                    asset_id: spec.id.clone(),
                    missing_dependency: dependency.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// "Three colors" DFS over the forward graph (dependency -> dependents).
///
/// A node reached again while still on the recursion stack closes a cycle; the
/// path from that node to the current one, plus the back edge, is reported.
/// Nodes are visited in id order so the reported cycle is stable.
fn validate_acyclic_graph(specs: &[AssetSpec]) -> Result<(), Vec<ValidationError>> {
    let mut graph: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for spec in specs {
        graph.entry(spec.id.as_str()).or_default();
    }
    for spec in specs {
        for dependency in &spec.depends_on {
            graph
                .entry(dependency.as_str())
                .or_default()
                .push(spec.id.as_str());
        }
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for &asset_id in graph.keys() {
        if !visited.contains(asset_id) {
            if let Some(cycle) =
                dfs_cycle_detection(asset_id, &graph, &mut visited, &mut rec_stack, &mut path)
            {
                return Err(vec![ValidationError::CyclicDependency { cycle }]);
            }
        }
    }

    Ok(())
}

fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &BTreeMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(neighbors) = graph.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path)
                {
                    return Some(cycle);
                }
            } else if rec_stack.contains(neighbor) {
                let start = path.iter().position(|&n| n == neighbor).unwrap_or(0);
                let mut cycle: Vec<String> = path[start..].iter().map(|n| n.to_string()).collect();
                cycle.push(neighbor.to_string());
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(id: &str, depends_on: Vec<&str>) -> AssetSpec {
        AssetSpec {
            id: id.to_string(),
            depends_on: depends_on.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_valid_empty_graph() {
        assert!(validate_dependency_graph(&[]).is_ok());
    }

    #[test]
    fn test_valid_diamond_dependency() {
        let specs = vec![
            spec("energy_breakdown", vec![]),
            spec("with_population", vec!["energy_breakdown"]),
            spec("regions", vec!["with_population"]),
            spec("per_capita", vec!["with_population", "regions"]),
        ];
        assert!(validate_dependency_graph(&specs).is_ok());
    }

    #[test]
    fn test_duplicate_asset_ids() {
        let specs = vec![spec("population", vec![]), spec("population", vec![])];
        let errors = validate_dependency_graph(&specs).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::DuplicateAssetId {
                asset_id: "population".into()
            }]
        );
    }

    #[test]
    fn test_unresolved_dependency() {
        let specs = vec![spec("energy_breakdown", vec!["energy_consumption"])];
        let errors = validate_dependency_graph(&specs).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::UnresolvedDependency {
                asset_id: "energy_breakdown".into(),
                missing_dependency: "energy_consumption".into(),
            }]
        );
    }

    #[test]
    fn test_simple_cycle() {
        let specs = vec![spec("a", vec!["b"]), spec("b", vec!["a"])];
        let errors = validate_dependency_graph(&specs).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec!["a".into(), "b".into(), "a".into()]
            }]
        );
    }

    #[test]
    fn test_self_dependency_cycle() {
        let specs = vec![spec("a", vec!["a"])];
        let errors = validate_dependency_graph(&specs).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::CyclicDependency {
                cycle: vec!["a".into(), "a".into()]
            }]
        );
    }

    #[test]
    fn test_complex_cycle_reports_only_the_loop() {
        // root -> b -> c -> d -> b
        let specs = vec![
            spec("root", vec![]),
            spec("b", vec!["root", "d"]),
            spec("c", vec!["b"]),
            spec("d", vec!["c"]),
        ];
        let errors = validate_dependency_graph(&specs).unwrap_err();
        match &errors[0] {
            ValidationError::CyclicDependency { cycle } => {
                assert_eq!(cycle.first(), cycle.last());
                assert!(!cycle.contains(&"root".to_string()));
                assert_eq!(cycle.len(), 4);
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_multiple_errors_skip_cycle_detection() {
        let specs = vec![
            spec("a", vec!["b"]),
            spec("b", vec!["a"]),
            spec("a", vec![]),
            spec("c", vec!["missing"]),
        ];
        let errors = validate_dependency_graph(&specs).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| !matches!(e, ValidationError::CyclicDependency { .. })));
    }
}
