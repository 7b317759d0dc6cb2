// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;

/// Errors that can occur during asset graph validation
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A circular dependency was detected in the asset graph
    CyclicDependency {
        /// The cycle path showing the circular dependency
        cycle: Vec<String>,
    },
    /// An asset references a dependency that doesn't exist
    UnresolvedDependency {
        /// The asset that has the unresolved dependency
        asset_id: String,
        /// The dependency that couldn't be resolved
        missing_dependency: String,
    },
    /// Two assets share the same ID
    DuplicateAssetId {
        asset_id: String,
    },
    /// A check is attached to an asset that doesn't exist
    UnknownCheckTarget {
        check: String,
        asset_id: String,
    },
    /// The configured selection names an asset that doesn't exist
    UnknownSelection {
        asset_id: String,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CyclicDependency { cycle } => {
                write!(f, "Cyclic dependency detected: {}", cycle.join(" -> "))
            }
            ValidationError::UnresolvedDependency {
                asset_id,
                missing_dependency,
            } => {
                write!(
                    f,
                    "Asset '{}' depends on '{}' which does not exist",
                    asset_id, missing_dependency
                )
            }
            ValidationError::DuplicateAssetId { asset_id } => {
                write!(f, "Duplicate asset ID: '{}'", asset_id)
            }
            ValidationError::UnknownCheckTarget { check, asset_id } => {
                write!(
                    f,
                    "Check '{}' targets asset '{}' which does not exist",
                    check, asset_id
                )
            }
            ValidationError::UnknownSelection { asset_id } => {
                write!(f, "Selected asset '{}' does not exist", asset_id)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading or interpreting a pipeline configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML config '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse TOML config '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid option '{option}': {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
