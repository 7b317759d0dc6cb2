// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod assets;     // energy analysis asset definitions
pub mod checks;     // data quality checks
pub mod config;     // config + runtime assembly
pub mod engine;     // DAG executors
pub mod errors;     // error handling
pub mod model;      // typed tables and schemas
pub mod observability;
pub mod report;     // report sheets
pub mod storage;    // persisted asset tables
pub mod traits;     // unified abstractions
