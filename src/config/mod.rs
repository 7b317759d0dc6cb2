// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod asset_map;
mod dependency_graph;
mod entry_points;
mod loader;
mod runtime;
mod validation;

pub mod consts;

pub use asset_map::{AssetMap, CheckMap};
pub use dependency_graph::{AssetSpec, DependencyGraph};
pub use entry_points::EntryPoints;
pub use loader::{
    load_and_validate_config, load_config, CheckConfig, Config, DataConfig, ExecutorOptions,
    ReportConfig, StorageConfig, Strategy,
};
pub use runtime::{Runtime, RuntimeBuilder};
pub use validation::validate_dependency_graph;
