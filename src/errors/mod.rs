// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod asset;
mod config;
mod execution;

pub use asset::AssetError;
pub use config::{ConfigError, ValidationError};
pub use execution::{ExecutionError, FailureStrategy};
