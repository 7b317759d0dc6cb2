// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed tables passed between assets.

mod records;
mod schema;
mod table;

pub use records::*;
pub use schema::{schema_violations, validate_table, Schema, SchemaViolation};
pub use table::{AssetInputs, AssetValue, Table};
